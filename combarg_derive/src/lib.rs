extern crate proc_macro;

mod generate;
mod load;
mod model;

use crate::model::DeriveArgs;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

const MACRO_COMBARG_ARGS: &str = "#[derive(Args)]";
const ATTRIBUTE_COMBARG: &str = "combarg";
// The binding recording which variant of a sub-command enum matched.
const COMMAND_BINDING: &str = "command";

/// Derive `combarg::prelude::Args` for a struct with named fields, or for an enum of sub-commands.
///
/// Each field becomes one parameter of an `interleave` grammar:
/// * `bool` fields are flags (`--field-name`), binding `false` when absent.
/// * `Option<T>` fields are optional options (`--field-name VALUE`).
/// * `Vec<T>` fields are repeatable options.
/// * Other fields are required options; `T` must implement `FromStr`.
///
/// Fields marked `#[combarg(argument)]` are positional instead, matched in declaration order with the options allowed between them.
/// Fields marked `#[combarg(command)]` are sub-commands: their type derives `Args` too, typically as an enum.
///
/// Each enum variant is a sub-command, selected by its name in kebab-case (ex: `DryRun` is `dry-run`).
/// See the documentation on `combarg::derive` for the full set of attributes.
#[proc_macro_derive(Args, attributes(combarg))]
pub fn combarg_args(input: TokenStream) -> TokenStream {
    let derive_input = syn::parse_macro_input!(input as syn::DeriveInput);
    let generated = DeriveArgs::try_from(derive_input).map(TokenStream2::from);

    match generated {
        Ok(stream) => stream.into(),
        Err(error) => error.to_compile_error().into(),
    }
}
