use crate::model::{
    DeriveArgs, DeriveKind, DeriveParameter, DeriveValue, DeriveVariant, IntermediateAttributes,
};
use crate::MACRO_COMBARG_ARGS;
use quote::quote;

impl TryFrom<syn::DeriveInput> for DeriveArgs {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        let attributes = IntermediateAttributes::load(&value.attrs)?;

        if let Some(unknown) = attributes.singletons.iter().next() {
            return Err(syn::Error::new(
                value.ident.span(),
                format!("Invalid - unknown attribute `#[combarg({unknown})]`."),
            ));
        }

        let program = attributes.first("program").unwrap_or_else(|| DeriveValue {
            tokens: quote! { env!("CARGO_CRATE_NAME") },
        });
        let about = attributes.first("about");

        let kind = match &value.data {
            syn::Data::Struct(ds) => {
                let parameters = match ds {
                    syn::DataStruct {
                        fields: syn::Fields::Named(ref fields),
                        ..
                    } => fields
                        .named
                        .iter()
                        .map(DeriveParameter::try_from)
                        .collect::<Result<Vec<_>, _>>()?,
                    syn::DataStruct {
                        fields: syn::Fields::Unnamed(_),
                        ..
                    } => {
                        return Err(syn::Error::new(
                            value.ident.span(),
                            format!("Invalid - {MACRO_COMBARG_ARGS} requires named fields."),
                        ))
                    }
                    syn::DataStruct { .. } => Vec::default(),
                };

                DeriveKind::Struct { parameters }
            }
            syn::Data::Enum(de) => {
                if de.variants.is_empty() {
                    return Err(syn::Error::new(
                        value.ident.span(),
                        format!("Invalid - {MACRO_COMBARG_ARGS} requires at least one variant."),
                    ));
                }

                let variants = de
                    .variants
                    .iter()
                    .map(DeriveVariant::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                DeriveKind::Enum { variants }
            }
            syn::Data::Union(_) => {
                return Err(syn::Error::new(
                    value.ident.span(),
                    format!(
                        "Invalid - {MACRO_COMBARG_ARGS} only applies to 'struct' and 'enum' data structures."
                    ),
                ))
            }
        };

        Ok(DeriveArgs {
            struct_name: value.ident.clone(),
            program,
            about,
            kind,
        })
    }
}
