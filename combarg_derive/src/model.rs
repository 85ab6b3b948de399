use proc_macro2::TokenStream as TokenStream2;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub(crate) struct DeriveValue {
    pub(crate) tokens: TokenStream2,
}

impl PartialEq for DeriveValue {
    fn eq(&self, other: &Self) -> bool {
        self.tokens.to_string() == other.tokens.to_string()
    }
}

impl Eq for DeriveValue {}

/// The raw contents of the `#[combarg(..)]` attributes on one item.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct IntermediateAttributes {
    pub(crate) singletons: HashSet<String>,
    pub(crate) pairs: HashMap<String, Vec<DeriveValue>>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ParameterType {
    Switch { short: Option<DeriveValue> },
    OptionalOption { short: Option<DeriveValue> },
    CollectionOption { short: Option<DeriveValue> },
    ScalarOption { short: Option<DeriveValue> },
    CollectionArgument,
    ScalarArgument,
    // A field whose type implements `Args`, matched as a sub-command.
    Command,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DeriveParameter {
    pub(crate) field_name: syn::Ident,
    // The `T` in `T`, `Option<T>` or `Vec<T>`.
    pub(crate) inner_type: DeriveValue,
    pub(crate) parameter_type: ParameterType,
    pub(crate) help: Option<DeriveValue>,
}

/// One variant of a sub-command enum.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DeriveVariant {
    pub(crate) variant_name: syn::Ident,
    // The literal token selecting this variant.
    pub(crate) command: DeriveValue,
    pub(crate) help: Option<DeriveValue>,
    pub(crate) parameters: Vec<DeriveParameter>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum DeriveKind {
    Struct { parameters: Vec<DeriveParameter> },
    Enum { variants: Vec<DeriveVariant> },
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DeriveArgs {
    pub(crate) struct_name: syn::Ident,
    pub(crate) program: DeriveValue,
    pub(crate) about: Option<DeriveValue>,
    pub(crate) kind: DeriveKind,
}
