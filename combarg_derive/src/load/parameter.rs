use crate::load::incompatible_error;
use crate::model::{DeriveParameter, DeriveValue, IntermediateAttributes, ParameterType};
use quote::ToTokens;

impl TryFrom<&syn::Field> for DeriveParameter {
    type Error = syn::Error;

    fn try_from(value: &syn::Field) -> Result<Self, Self::Error> {
        let field_name = match &value.ident {
            Some(ident) => ident.clone(),
            None => {
                return Err(syn::Error::new_spanned(
                    value,
                    "Invalid - field must be named.",
                ))
            }
        };
        let attributes = IntermediateAttributes::load(&value.attrs)?;
        let explicit_argument = attributes.singletons.contains("argument");
        let explicit_command = attributes.singletons.contains("command");
        let short = attributes.first("short");
        let help = attributes.first("help");

        if let Some(unknown) = attributes
            .singletons
            .iter()
            .find(|singleton| !matches!(singleton.as_str(), "argument" | "command"))
        {
            return Err(syn::Error::new(
                field_name.span(),
                format!("Invalid - unknown attribute `#[combarg({unknown})]`."),
            ));
        }

        if explicit_argument && short.is_some() {
            return Err(incompatible_error(
                &field_name,
                "#[combarg(argument)]",
                "#[combarg(short = ..)]",
            ));
        }

        if explicit_command {
            if explicit_argument {
                return Err(incompatible_error(
                    &field_name,
                    "#[combarg(command)]",
                    "#[combarg(argument)]",
                ));
            }

            if short.is_some() || help.is_some() {
                return Err(syn::Error::new(
                    field_name.span(),
                    "Invalid - #[combarg(command)] fields take no other attributes.",
                ));
            }

            return Ok(DeriveParameter {
                field_name,
                inner_type: DeriveValue {
                    tokens: value.ty.to_token_stream(),
                },
                parameter_type: ParameterType::Command,
                help: None,
            });
        }

        let (container, inner_type) = container_type(&value.ty)?;
        let parameter_type = match container {
            Container::Bool => {
                disallow(&field_name, "bool", explicit_argument)?;
                ParameterType::Switch { short }
            }
            Container::Option => {
                disallow(&field_name, "Option<..>", explicit_argument)?;
                ParameterType::OptionalOption { short }
            }
            Container::Vec => {
                if explicit_argument {
                    ParameterType::CollectionArgument
                } else {
                    ParameterType::CollectionOption { short }
                }
            }
            Container::None => {
                if explicit_argument {
                    ParameterType::ScalarArgument
                } else {
                    ParameterType::ScalarOption { short }
                }
            }
        };

        Ok(DeriveParameter {
            field_name,
            inner_type: DeriveValue {
                tokens: inner_type.to_token_stream(),
            },
            parameter_type,
            help,
        })
    }
}

enum Container {
    Bool,
    Option,
    Vec,
    None,
}

/// Classify the field type, returning the type that values convert to.
fn container_type(ty: &syn::Type) -> Result<(Container, &syn::Type), syn::Error> {
    let segment = match ty {
        syn::Type::Path(path) => match path.path.segments.last() {
            Some(segment) => segment,
            None => return Err(syn::Error::new_spanned(ty, "Invalid - empty field type.")),
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ty,
                format!("Invalid - unsupported field type `{}`.", ty.to_token_stream()),
            ))
        }
    };

    match segment.ident.to_string().as_str() {
        "bool" => Ok((Container::Bool, ty)),
        "Option" => Ok((Container::Option, generic_argument(ty, segment)?)),
        "Vec" => Ok((Container::Vec, generic_argument(ty, segment)?)),
        _ => Ok((Container::None, ty)),
    }
}

fn generic_argument<'a>(
    ty: &syn::Type,
    segment: &'a syn::PathSegment,
) -> Result<&'a syn::Type, syn::Error> {
    if let syn::PathArguments::AngleBracketed(arguments) = &segment.arguments {
        if let Some(syn::GenericArgument::Type(inner)) = arguments.args.first() {
            return Ok(inner);
        }
    }

    Err(syn::Error::new_spanned(
        ty,
        format!(
            "Invalid - expected a type argument in `{}`.",
            ty.to_token_stream()
        ),
    ))
}

fn disallow(
    field_name: &syn::Ident,
    antecedent: &str,
    explicit_argument: bool,
) -> Result<(), syn::Error> {
    if explicit_argument {
        Err(incompatible_error(
            field_name,
            antecedent,
            "#[combarg(argument)]",
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::assert_contains;
    use proc_macro2::Span;
    use quote::quote;
    use syn::parse_quote;

    #[test]
    fn construct_switch() {
        // Setup
        let field = parse_field(quote! {
            #[combarg(short = 'v', help = "Be loud.")]
            verbose: bool
        });

        // Execute
        let parameter = DeriveParameter::try_from(&field).unwrap();

        // Verify
        assert_eq!(
            parameter,
            DeriveParameter {
                field_name: ident("verbose"),
                inner_type: value(quote! { bool }),
                parameter_type: ParameterType::Switch {
                    short: Some(value(quote! { 'v' })),
                },
                help: Some(value(quote! { "Be loud." })),
            }
        );
    }

    #[test]
    fn construct_optional_option() {
        // Setup
        let field = parse_field(quote! {
            limit: Option<usize>
        });

        // Execute
        let parameter = DeriveParameter::try_from(&field).unwrap();

        // Verify
        assert_eq!(
            parameter,
            DeriveParameter {
                field_name: ident("limit"),
                inner_type: value(quote! { usize }),
                parameter_type: ParameterType::OptionalOption { short: None },
                help: None,
            }
        );
    }

    #[test]
    fn construct_collection() {
        // Setup
        let option = parse_field(quote! {
            include: std::vec::Vec<String>
        });
        let argument = parse_field(quote! {
            #[combarg(argument)]
            items: Vec<u32>
        });

        // Execute
        let option = DeriveParameter::try_from(&option).unwrap();
        let argument = DeriveParameter::try_from(&argument).unwrap();

        // Verify
        assert_eq!(option.inner_type, value(quote! { String }));
        assert_eq!(
            option.parameter_type,
            ParameterType::CollectionOption { short: None }
        );
        assert_eq!(argument.inner_type, value(quote! { u32 }));
        assert_eq!(argument.parameter_type, ParameterType::CollectionArgument);
    }

    #[test]
    fn construct_scalar() {
        // Setup
        let option = parse_field(quote! {
            #[combarg(short = 'n')]
            count: u8
        });
        let argument = parse_field(quote! {
            #[combarg(argument)]
            #[combarg(help = "The file.")]
            file: std::path::PathBuf
        });

        // Execute
        let option = DeriveParameter::try_from(&option).unwrap();
        let argument = DeriveParameter::try_from(&argument).unwrap();

        // Verify
        assert_eq!(
            option.parameter_type,
            ParameterType::ScalarOption {
                short: Some(value(quote! { 'n' })),
            }
        );
        assert_eq!(argument.inner_type, value(quote! { std::path::PathBuf }));
        assert_eq!(argument.parameter_type, ParameterType::ScalarArgument);
        assert_eq!(argument.help, Some(value(quote! { "The file." })));
    }

    #[test]
    fn construct_command() {
        // Setup
        let field = parse_field(quote! {
            #[combarg(command)]
            action: Action
        });

        // Execute
        let parameter = DeriveParameter::try_from(&field).unwrap();

        // Verify
        assert_eq!(
            parameter,
            DeriveParameter {
                field_name: ident("action"),
                inner_type: value(quote! { Action }),
                parameter_type: ParameterType::Command,
                help: None,
            }
        );
    }

    #[test]
    fn construct_invalid() {
        let switch_argument = parse_field(quote! {
            #[combarg(argument)]
            verbose: bool
        });
        let optional_argument = parse_field(quote! {
            #[combarg(argument)]
            limit: Option<u8>
        });
        let short_argument = parse_field(quote! {
            #[combarg(argument, short = 'f')]
            file: String
        });
        let unknown = parse_field(quote! {
            #[combarg(positional)]
            file: String
        });
        let bare_option = parse_field(quote! {
            limit: Option
        });
        let tuple = parse_field(quote! {
            pair: (u8, u8)
        });
        let command_argument = parse_field(quote! {
            #[combarg(command, argument)]
            action: Action
        });
        let command_short = parse_field(quote! {
            #[combarg(command, short = 'a')]
            action: Action
        });

        assert_contains!(
            DeriveParameter::try_from(&switch_argument)
                .unwrap_err()
                .to_string(),
            "cannot be both `bool` and `#[combarg(argument)]`"
        );
        assert_contains!(
            DeriveParameter::try_from(&optional_argument)
                .unwrap_err()
                .to_string(),
            "cannot be both `Option<..>` and `#[combarg(argument)]`"
        );
        assert_contains!(
            DeriveParameter::try_from(&short_argument)
                .unwrap_err()
                .to_string(),
            "cannot be both `#[combarg(argument)]` and `#[combarg(short = ..)]`"
        );
        assert_contains!(
            DeriveParameter::try_from(&unknown).unwrap_err().to_string(),
            "unknown attribute `#[combarg(positional)]`"
        );
        assert_contains!(
            DeriveParameter::try_from(&bare_option)
                .unwrap_err()
                .to_string(),
            "expected a type argument"
        );
        assert_contains!(
            DeriveParameter::try_from(&tuple).unwrap_err().to_string(),
            "unsupported field type"
        );
        assert_contains!(
            DeriveParameter::try_from(&command_argument)
                .unwrap_err()
                .to_string(),
            "cannot be both `#[combarg(command)]` and `#[combarg(argument)]`"
        );
        assert_contains!(
            DeriveParameter::try_from(&command_short)
                .unwrap_err()
                .to_string(),
            "#[combarg(command)] fields take no other attributes"
        );
    }

    fn ident(name: &str) -> syn::Ident {
        syn::Ident::new(name, Span::call_site())
    }

    fn parse_field(tokens: proc_macro2::TokenStream) -> syn::Field {
        let input: syn::DeriveInput = parse_quote! {
            struct Test { #tokens }
        };

        match input.data {
            syn::Data::Struct(data) => data.fields.into_iter().next().unwrap(),
            _ => unreachable!(),
        }
    }

    fn value(tokens: proc_macro2::TokenStream) -> DeriveValue {
        DeriveValue { tokens }
    }
}
