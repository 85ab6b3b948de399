use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

use crate::model::{DeriveArgs, DeriveKind, DeriveParameter, DeriveValue, DeriveVariant};
use crate::COMMAND_BINDING;

impl From<DeriveArgs> for TokenStream2 {
    fn from(value: DeriveArgs) -> Self {
        let DeriveArgs {
            struct_name,
            program,
            about,
            kind,
        } = value;
        let program = program.tokens;
        let about = about.map(|DeriveValue { tokens }| {
            quote! { .about(#tokens) }
        });
        let (parser, from_namespace) = match kind {
            DeriveKind::Struct { parameters } => {
                let grammar = generate_grammar(&parameters);
                let extracts = parameters.iter().map(DeriveParameter::generate_extract);
                (
                    grammar,
                    quote! {
                        ::std::result::Result::Ok(Self { #( #extracts ),* })
                    },
                )
            }
            DeriveKind::Enum { variants } => (
                generate_dispatch(&variants),
                generate_select(&variants),
            ),
        };

        quote! {
            impl ::combarg::prelude::Args for #struct_name {
                fn command_line_parser() -> ::combarg::CommandLineParser {
                    ::combarg::CommandLineParser::new(#program) #about
                }

                fn parser() -> ::combarg::Parser {
                    #parser
                }

                #[allow(unused_variables)]
                fn from_namespace(
                    namespace: &::combarg::Namespace,
                ) -> ::std::result::Result<Self, ::combarg::NamespaceError> {
                    #from_namespace
                }
            }
        }
    }
}

// Options anywhere, positionals in declaration order.
fn generate_grammar(parameters: &[DeriveParameter]) -> TokenStream2 {
    let (positionals, options): (Vec<&DeriveParameter>, Vec<&DeriveParameter>) =
        parameters.iter().partition(|p| p.is_positional());
    let options = options.iter().map(|parameter| parameter.generate_parser());
    let positionals = positionals
        .iter()
        .map(|parameter| parameter.generate_parser());

    quote! {
        ::combarg::interleave(
            ::std::vec![ #( #options ),* ],
            ::std::vec![ #( #positionals ),* ]
        )
    }
}

// ex: `(commit [--all] | push remote)`, binding the selected variant under `command`.
fn generate_dispatch(variants: &[DeriveVariant]) -> TokenStream2 {
    let branches = variants.iter().map(|variant| {
        let command = &variant.command.tokens;
        let help = variant.help.as_ref().map(|DeriveValue { tokens }| {
            quote! { .help(#tokens) }
        });
        let grammar = generate_grammar(&variant.parameters);

        quote! {
            (::combarg::Parser::from(::combarg::Parameter::literal(#command) #help)
                >> ::combarg::defaults([(#COMMAND_BINDING, #command)])
                >> #grammar)
        }
    });

    quote! {
        #( #branches )|*
    }
}

fn generate_select(variants: &[DeriveVariant]) -> TokenStream2 {
    let arms = variants.iter().map(|variant| {
        let command = &variant.command.tokens;
        let variant_name = &variant.variant_name;
        let extracts = variant
            .parameters
            .iter()
            .map(DeriveParameter::generate_extract);

        quote! {
            #command => ::std::result::Result::Ok(Self::#variant_name { #( #extracts ),* }),
        }
    });

    quote! {
        match namespace
            .extract_scalar::<::std::string::String>(#COMMAND_BINDING)?
            .as_str()
        {
            #( #arms )*
            other => ::std::result::Result::Err(::combarg::NamespaceError::Unrecognized {
                name: #COMMAND_BINDING.to_string(),
                value: other.to_string(),
            }),
        }
    }
}
