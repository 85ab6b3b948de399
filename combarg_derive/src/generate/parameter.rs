use crate::model::{DeriveParameter, DeriveValue, ParameterType};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

impl DeriveParameter {
    pub(crate) fn is_positional(&self) -> bool {
        matches!(
            self.parameter_type,
            ParameterType::ScalarArgument
                | ParameterType::CollectionArgument
                | ParameterType::Command
        )
    }

    /// The namespace name this field binds to.
    /// Flags & options use the field name dashed (ex: `dry_run` -> `dry-run`); arguments use it verbatim.
    fn binding(&self) -> String {
        let field_name_str = self.field_name.to_string();

        if self.is_positional() {
            field_name_str
        } else {
            field_name_str.replace('_', "-")
        }
    }

    /// The expression constructing this field's `::combarg::Parser`.
    pub(crate) fn generate_parser(&self) -> TokenStream2 {
        let binding = self.binding();
        let token = format!("--{binding}");
        let inner_type = &self.inner_type.tokens;
        let help = self.help.as_ref().map(|DeriveValue { tokens }| {
            quote! { .help(#tokens) }
        });

        match &self.parameter_type {
            ParameterType::Switch { short } => {
                let short = flatten_short(short);
                quote! {
                    ::combarg::Parser::from(::combarg::Parameter::flag(#token) #short #help)
                        .with_default(false)
                }
            }
            ParameterType::OptionalOption { short } => {
                let short = flatten_short(short);
                quote! {
                    ::combarg::optional(
                        ::combarg::Parser::from(::combarg::Parameter::option(#binding, #token) #short #help)
                            .validate::<#inner_type>()
                    )
                }
            }
            ParameterType::CollectionOption { short } => {
                let short = flatten_short(short);
                quote! {
                    ::combarg::many(
                        ::combarg::Parser::from(::combarg::Parameter::option(#binding, #token) #short #help)
                            .validate::<#inner_type>()
                    )
                }
            }
            ParameterType::ScalarOption { short } => {
                let short = flatten_short(short);
                quote! {
                    ::combarg::Parser::from(::combarg::Parameter::option(#binding, #token) #short #help)
                        .validate::<#inner_type>()
                }
            }
            ParameterType::CollectionArgument => {
                quote! {
                    ::combarg::many1(
                        ::combarg::Parser::from(::combarg::Parameter::argument(#binding) #help)
                            .validate::<#inner_type>()
                    )
                }
            }
            ParameterType::ScalarArgument => {
                quote! {
                    ::combarg::Parser::from(::combarg::Parameter::argument(#binding) #help)
                        .validate::<#inner_type>()
                }
            }
            ParameterType::Command => {
                quote! {
                    <#inner_type as ::combarg::prelude::Args>::parser()
                }
            }
        }
    }

    /// The field initializer extracting this field out of `namespace`.
    pub(crate) fn generate_extract(&self) -> TokenStream2 {
        let field_name = &self.field_name;
        let binding = self.binding();
        let inner_type = &self.inner_type.tokens;

        match &self.parameter_type {
            ParameterType::Switch { .. } => quote! {
                #field_name: namespace.extract_switch(#binding)?
            },
            ParameterType::OptionalOption { .. } => quote! {
                #field_name: namespace.extract_optional::<#inner_type>(#binding)?
            },
            ParameterType::CollectionOption { .. } | ParameterType::CollectionArgument => quote! {
                #field_name: namespace.extract_collection::<#inner_type>(#binding)?
            },
            ParameterType::ScalarOption { .. } | ParameterType::ScalarArgument => quote! {
                #field_name: namespace.extract_scalar::<#inner_type>(#binding)?
            },
            // The sub-command shares the flat namespace.
            ParameterType::Command => quote! {
                #field_name: <#inner_type as ::combarg::prelude::Args>::from_namespace(namespace)?
            },
        }
    }
}

fn flatten_short(short: &Option<DeriveValue>) -> Option<TokenStream2> {
    short.as_ref().map(|DeriveValue { tokens }| {
        quote! { .short(#tokens) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proc_macro2::Span;

    #[test]
    fn render_switch() {
        // Setup
        let parameter = DeriveParameter {
            field_name: ident("dry_run"),
            inner_type: value(quote! { bool }),
            parameter_type: ParameterType::Switch {
                short: Some(value(quote! { 'd' })),
            },
            help: Some(value(quote! { "Do nothing." })),
        };

        // Execute
        let parser = parameter.generate_parser();
        let extract = parameter.generate_extract();

        // Verify
        assert_eq!(
            parser.to_string(),
            quote! {
                ::combarg::Parser::from(::combarg::Parameter::flag("--dry-run").short('d').help("Do nothing."))
                    .with_default(false)
            }
            .to_string()
        );
        assert_eq!(
            extract.to_string(),
            quote! { dry_run: namespace.extract_switch("dry-run")? }.to_string()
        );
    }

    #[test]
    fn render_optional_option() {
        // Setup
        let parameter = DeriveParameter {
            field_name: ident("limit"),
            inner_type: value(quote! { usize }),
            parameter_type: ParameterType::OptionalOption { short: None },
            help: None,
        };

        // Execute
        let parser = parameter.generate_parser();
        let extract = parameter.generate_extract();

        // Verify
        assert_eq!(
            parser.to_string(),
            quote! {
                ::combarg::optional(
                    ::combarg::Parser::from(::combarg::Parameter::option("limit", "--limit"))
                        .validate::<usize>()
                )
            }
            .to_string()
        );
        assert_eq!(
            extract.to_string(),
            quote! { limit: namespace.extract_optional::<usize>("limit")? }.to_string()
        );
    }

    #[test]
    fn render_collection_option() {
        // Setup
        let parameter = DeriveParameter {
            field_name: ident("include_path"),
            inner_type: value(quote! { String }),
            parameter_type: ParameterType::CollectionOption {
                short: Some(value(quote! { 'I' })),
            },
            help: None,
        };

        // Execute
        let parser = parameter.generate_parser();
        let extract = parameter.generate_extract();

        // Verify
        assert_eq!(
            parser.to_string(),
            quote! {
                ::combarg::many(
                    ::combarg::Parser::from(::combarg::Parameter::option("include-path", "--include-path").short('I'))
                        .validate::<String>()
                )
            }
            .to_string()
        );
        assert_eq!(
            extract.to_string(),
            quote! { include_path: namespace.extract_collection::<String>("include-path")? }
                .to_string()
        );
    }

    #[test]
    fn render_scalar_option() {
        // Setup
        let parameter = DeriveParameter {
            field_name: ident("count"),
            inner_type: value(quote! { u32 }),
            parameter_type: ParameterType::ScalarOption { short: None },
            help: Some(value(quote! { "How many." })),
        };

        // Execute
        let parser = parameter.generate_parser();

        // Verify
        assert_eq!(
            parser.to_string(),
            quote! {
                ::combarg::Parser::from(::combarg::Parameter::option("count", "--count").help("How many."))
                    .validate::<u32>()
            }
            .to_string()
        );
    }

    #[test]
    fn render_arguments() {
        // Setup
        let scalar = DeriveParameter {
            field_name: ident("source_file"),
            inner_type: value(quote! { std::path::PathBuf }),
            parameter_type: ParameterType::ScalarArgument,
            help: None,
        };
        let collection = DeriveParameter {
            field_name: ident("items"),
            inner_type: value(quote! { u32 }),
            parameter_type: ParameterType::CollectionArgument,
            help: Some(value(quote! { "The items." })),
        };

        // Execute
        let scalar_parser = scalar.generate_parser();
        let scalar_extract = scalar.generate_extract();
        let collection_parser = collection.generate_parser();
        let collection_extract = collection.generate_extract();

        // Verify
        assert!(scalar.is_positional());
        assert!(collection.is_positional());
        assert_eq!(
            scalar_parser.to_string(),
            quote! {
                ::combarg::Parser::from(::combarg::Parameter::argument("source_file"))
                    .validate::<std::path::PathBuf>()
            }
            .to_string()
        );
        assert_eq!(
            scalar_extract.to_string(),
            quote! { source_file: namespace.extract_scalar::<std::path::PathBuf>("source_file")? }
                .to_string()
        );
        assert_eq!(
            collection_parser.to_string(),
            quote! {
                ::combarg::many1(
                    ::combarg::Parser::from(::combarg::Parameter::argument("items").help("The items."))
                        .validate::<u32>()
                )
            }
            .to_string()
        );
        assert_eq!(
            collection_extract.to_string(),
            quote! { items: namespace.extract_collection::<u32>("items")? }.to_string()
        );
    }

    #[test]
    fn render_command() {
        // Setup
        let parameter = DeriveParameter {
            field_name: ident("action"),
            inner_type: value(quote! { Action }),
            parameter_type: ParameterType::Command,
            help: None,
        };

        // Execute
        let parser = parameter.generate_parser();
        let extract = parameter.generate_extract();

        // Verify
        assert!(parameter.is_positional());
        assert_eq!(
            parser.to_string(),
            quote! { <Action as ::combarg::prelude::Args>::parser() }.to_string()
        );
        assert_eq!(
            extract.to_string(),
            quote! { action: <Action as ::combarg::prelude::Args>::from_namespace(namespace)? }
                .to_string()
        );
    }

    fn ident(name: &str) -> syn::Ident {
        syn::Ident::new(name, Span::call_site())
    }

    fn value(tokens: TokenStream2) -> DeriveValue {
        DeriveValue { tokens }
    }
}
