use crate::model::{DeriveValue, IntermediateAttributes};
use crate::ATTRIBUTE_COMBARG;
use quote::ToTokens;

impl IntermediateAttributes {
    /// Load the `#[combarg(..)]` attributes out of `attributes`, ignoring all others.
    /// Repeated attributes accumulate.
    pub(crate) fn load(attributes: &[syn::Attribute]) -> Result<Self, syn::Error> {
        let mut loaded = IntermediateAttributes::default();

        for attribute in attributes {
            if attribute.path().is_ident(ATTRIBUTE_COMBARG) {
                let IntermediateAttributes { singletons, pairs } =
                    IntermediateAttributes::try_from(attribute)?;
                loaded.singletons.extend(singletons);

                for (key, values) in pairs {
                    loaded.pairs.entry(key).or_default().extend(values);
                }
            }
        }

        Ok(loaded)
    }

    /// The first value of the pair `key`, if present.
    pub(crate) fn first(&self, key: &str) -> Option<DeriveValue> {
        self.pairs
            .get(key)
            .and_then(|values| values.first())
            .cloned()
    }
}

impl TryFrom<&syn::Attribute> for IntermediateAttributes {
    type Error = syn::Error;

    fn try_from(value: &syn::Attribute) -> Result<Self, Self::Error> {
        let attributes_parser =
            syn::punctuated::Punctuated::<syn::Expr, syn::Token![,]>::parse_terminated;
        let expressions = value.parse_args_with(attributes_parser)?;
        let mut attributes = IntermediateAttributes::default();

        for expression in expressions {
            match expression {
                syn::Expr::Assign(assignment) => {
                    let left = assignment.left.to_token_stream();
                    attributes
                        .pairs
                        .entry(left.to_string())
                        .or_default()
                        .push(DeriveValue {
                            tokens: assignment.right.to_token_stream(),
                        });
                }
                syn::Expr::Path(path) if path.path.get_ident().is_some() => {
                    attributes.singletons.insert(path.to_token_stream().to_string());
                }
                _ => {
                    return Err(syn::Error::new_spanned(
                        &expression,
                        format!(
                            "Invalid - unparseable attribute `{}`.",
                            expression.to_token_stream()
                        ),
                    ));
                }
            };
        }

        Ok(attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proc_macro2::Literal;
    use std::collections::{HashMap, HashSet};
    use syn::parse_quote;

    #[test]
    fn construct_attributes_empty() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[combarg()]
        };

        // Execute
        let attributes = IntermediateAttributes::try_from(&attribute).unwrap();

        // Verify
        assert_eq!(attributes, IntermediateAttributes::default());
    }

    #[test]
    fn construct_attributes() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[combarg(argument, help = "123")]
        };

        // Execute
        let attributes = IntermediateAttributes::try_from(&attribute).unwrap();

        // Verify
        assert_eq!(
            attributes,
            IntermediateAttributes {
                singletons: HashSet::from(["argument".to_string()]),
                pairs: HashMap::from([(
                    "help".to_string(),
                    vec![DeriveValue {
                        tokens: Literal::string("123").into_token_stream(),
                    }]
                )])
            }
        );
    }

    #[test]
    fn load_accumulates() {
        // Setup
        let attributes: Vec<syn::Attribute> = vec![
            parse_quote! { #[combarg(short = 'a')] },
            parse_quote! { #[doc = "ignored"] },
            parse_quote! { #[combarg(argument, short = 'b')] },
        ];

        // Execute
        let loaded = IntermediateAttributes::load(&attributes).unwrap();

        // Verify
        assert!(loaded.singletons.contains("argument"));
        assert_eq!(loaded.pairs["short"].len(), 2);
        assert_eq!(
            loaded.first("short"),
            Some(DeriveValue {
                tokens: Literal::character('a').into_token_stream(),
            })
        );
        assert_eq!(loaded.first("help"), None);
    }

    #[test]
    fn construct_attributes_invalid() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[combarg]
        };

        // Execute & verify
        IntermediateAttributes::try_from(&attribute).unwrap_err();
    }

    #[test]
    fn construct_attributes_invalid_expression() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[combarg(1 + 2)]
        };

        // Execute
        let error = IntermediateAttributes::try_from(&attribute).unwrap_err();

        // Verify
        assert_eq!(error.to_string(), "Invalid - unparseable attribute `1 + 2`.");
    }
}
