use crate::model::{DeriveParameter, DeriveValue, DeriveVariant, IntermediateAttributes};
use crate::MACRO_COMBARG_ARGS;
use proc_macro2::Literal;
use quote::ToTokens;

impl TryFrom<&syn::Variant> for DeriveVariant {
    type Error = syn::Error;

    fn try_from(value: &syn::Variant) -> Result<Self, Self::Error> {
        let variant_name = value.ident.clone();
        let attributes = IntermediateAttributes::load(&value.attrs)?;

        if let Some(unknown) = attributes.singletons.iter().next() {
            return Err(syn::Error::new(
                variant_name.span(),
                format!("Invalid - unknown attribute `#[combarg({unknown})]`."),
            ));
        }

        let command = attributes.first("name").unwrap_or_else(|| DeriveValue {
            tokens: Literal::string(&kebab_case(&variant_name.to_string())).into_token_stream(),
        });
        let help = attributes.first("help");
        let parameters = match &value.fields {
            syn::Fields::Named(fields) => fields
                .named
                .iter()
                .map(DeriveParameter::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            syn::Fields::Unit => Vec::default(),
            syn::Fields::Unnamed(_) => {
                return Err(syn::Error::new(
                    variant_name.span(),
                    format!("Invalid - {MACRO_COMBARG_ARGS} requires named or unit variants."),
                ))
            }
        };

        Ok(DeriveVariant {
            variant_name,
            command,
            help,
            parameters,
        })
    }
}

// ex: `DryRun` -> `dry-run`
fn kebab_case(name: &str) -> String {
    let mut out = String::default();

    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('-');
            }

            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}
