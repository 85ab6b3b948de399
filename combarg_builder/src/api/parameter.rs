use crate::api::Parser;
use crate::matcher::{Node, Primitive};
use crate::model::{Namespace, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParameterClass {
    Flag,
    Opt,
    Arg,
    Literal,
}

/// A primitive parser under configuration.
///
/// Converts into a [`Parser`] (all the combinators accept `impl Into<Parser>`).
///
/// ### Example
/// ```
/// # use combarg_builder as combarg;
/// use combarg::{optional, Parameter, Parser};
///
/// let verbose = Parameter::flag("verbose")
///     .short('v')
///     .help("Make the program output verbose.");
/// let parser: Parser = optional(verbose);
/// assert_eq!(parser.usage(), "[--verbose]");
/// ```
#[derive(Debug, Clone)]
pub struct Parameter {
    class: ParameterClass,
    name: String,
    tokens: Vec<String>,
    metavar: String,
    help: Option<String>,
}

impl Parameter {
    /// Create a flag: a token that binds `true` when present.
    ///
    /// When `name` starts with a dash it is the flag token, and the binding name is `name` without leading dashes.
    /// Otherwise the token is `-x` for a single character name, or `--name`.
    ///
    /// ### Example
    /// ```
    /// # use combarg_builder as combarg;
    /// use combarg::{Parameter, Parser};
    ///
    /// assert_eq!(Parser::from(Parameter::flag("verbose")).usage(), "--verbose");
    /// assert_eq!(Parser::from(Parameter::flag("v")).usage(), "-v");
    /// assert_eq!(Parser::from(Parameter::flag("--dry-run")).usage(), "--dry-run");
    /// ```
    pub fn flag(name: impl Into<String>) -> Self {
        let name = name.into();
        let (name, token) = flag_token(name);

        Self {
            class: ParameterClass::Flag,
            metavar: name.to_ascii_uppercase(),
            name,
            tokens: vec![token],
            help: None,
        }
    }

    /// Create an option: the `flag_token` followed by one value token (or `flag_token=value`).
    /// Binds the value under `name`.
    ///
    /// ### Example
    /// ```
    /// # use combarg_builder as combarg;
    /// use combarg::{Parameter, Parser};
    ///
    /// assert_eq!(Parser::from(Parameter::option("count", "--count")).usage(), "--count COUNT");
    /// ```
    pub fn option(name: impl Into<String>, flag_token: impl Into<String>) -> Self {
        let name = name.into();

        Self {
            class: ParameterClass::Opt,
            metavar: name.to_ascii_uppercase().replace('-', "_"),
            name,
            tokens: vec![flag_token.into()],
            help: None,
        }
    }

    /// Create a positional argument: any one token that does not look like a flag.
    /// Binds the token under `name`.
    pub fn argument(name: impl Into<String>) -> Self {
        let name = name.into();

        Self {
            class: ParameterClass::Arg,
            metavar: name.clone(),
            name,
            tokens: Vec::default(),
            help: None,
        }
    }

    /// Create a literal: exactly the token `text`, binding nothing (ex: a sub-command keyword).
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();

        Self {
            class: ParameterClass::Literal,
            metavar: text.clone(),
            name: text.clone(),
            tokens: vec![text],
            help: None,
        }
    }

    /// Add the single character token `-c` to a flag/option.
    /// Has no effect on arguments and literals.
    pub fn short(self, short: char) -> Self {
        self.alias(format!("-{short}"))
    }

    /// Add an alternative token to a flag/option.
    /// Has no effect on arguments and literals.
    pub fn alias(mut self, token: impl Into<String>) -> Self {
        if matches!(self.class, ParameterClass::Flag | ParameterClass::Opt) {
            self.tokens.push(token.into());
        }

        self
    }

    /// Document the value placeholder used in the usage (options & arguments).
    /// If repeated, only the final metavar will apply.
    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        if matches!(self.class, ParameterClass::Opt | ParameterClass::Arg) {
            self.metavar = metavar.into();
        }

        self
    }

    /// Document the help message for this parameter.
    /// If repeated, only the final message will apply to the parameter.
    ///
    /// A help message describes the parameter in full sentence/paragraph format.
    /// We recommend allowing `combarg` to format this field (ex: it is not recommended to use line breaks `'\n'`).
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help.replace(description.into());
        self
    }
}

fn flag_token(name: String) -> (String, String) {
    if name.starts_with('-') {
        (name.trim_start_matches('-').to_string(), name)
    } else if name.chars().count() == 1 {
        let token = format!("-{name}");
        (name, token)
    } else {
        let token = format!("--{name}");
        (name, token)
    }
}

impl From<Parameter> for Parser {
    fn from(value: Parameter) -> Self {
        let Parameter {
            class,
            name,
            tokens,
            metavar,
            help,
        } = value;
        let primitive = Primitive {
            name,
            tokens,
            metavar,
            help,
        };

        Parser::new(match class {
            ParameterClass::Flag => Node::Flag(primitive),
            ParameterClass::Opt => Node::Option(primitive),
            ParameterClass::Arg => Node::Argument(primitive),
            ParameterClass::Literal => Node::Literal {
                text: primitive.name,
                help: primitive.help,
            },
        })
    }
}

/// Create a flag parser; see [`Parameter::flag`].
///
/// ### Example
/// ```
/// # use combarg_builder as combarg;
/// use combarg::{flag, CommandLineParser};
///
/// let parser = CommandLineParser::new("program").build(flag("--verbose")).unwrap();
/// let namespace = parser.parse_tokens(&["--verbose"]).unwrap();
/// assert_eq!(namespace.get_bool("verbose"), Some(true));
/// ```
pub fn flag(name: impl Into<String>) -> Parser {
    Parameter::flag(name).into()
}

/// Create an option parser; see [`Parameter::option`].
///
/// ### Example
/// ```
/// # use combarg_builder as combarg;
/// use combarg::{option, CommandLineParser};
///
/// let parser = CommandLineParser::new("program").build(option("b", "--b")).unwrap();
/// assert_eq!(parser.parse_tokens(&["--b", "1"]).unwrap().get_str("b"), Some("1"));
/// assert_eq!(parser.parse_tokens(&["--b=2"]).unwrap().get_str("b"), Some("2"));
/// assert!(parser.parse_tokens(&["--b"]).is_err());
/// ```
pub fn option(name: impl Into<String>, flag_token: impl Into<String>) -> Parser {
    Parameter::option(name, flag_token).into()
}

/// Create a positional argument parser; see [`Parameter::argument`].
pub fn argument(name: impl Into<String>) -> Parser {
    Parameter::argument(name).into()
}

/// Create a literal parser; see [`Parameter::literal`].
pub fn literal(text: impl Into<String>) -> Parser {
    Parameter::literal(text).into()
}

/// Create a parser that always succeeds without consuming input, binding the given values.
///
/// ### Example
/// ```
/// # use combarg_builder as combarg;
/// use combarg::{defaults, flag, CommandLineParser};
///
/// let parser = CommandLineParser::new("program")
///     .build(flag("--verbose") | defaults([("verbose", false)]))
///     .unwrap();
/// assert_eq!(parser.parse_tokens(&[]).unwrap().get_bool("verbose"), Some(false));
/// ```
pub fn defaults<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Parser
where
    K: Into<String>,
    V: Into<Value>,
{
    Parser::new(Node::Defaults(pairs.into_iter().collect::<Namespace>()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("verbose", "verbose", "--verbose")]
    #[case("v", "v", "-v")]
    #[case("--verbose", "verbose", "--verbose")]
    #[case("-v", "v", "-v")]
    #[case("--dry-run", "dry-run", "--dry-run")]
    fn flag_naming(#[case] name: &str, #[case] binding: &str, #[case] token: &str) {
        // Execute
        let parser = flag(name);

        // Verify
        assert_matches!(parser.node, Node::Flag(Primitive { name, tokens, .. }) if name == binding && tokens == vec![token.to_string()]);
    }

    #[test]
    fn option_configured() {
        // Setup
        let parameter = Parameter::option("dry-run", "--dry-run")
            .short('d')
            .alias("--simulate")
            .help("--this will get discarded--")
            .help("Do nothing.");

        // Execute
        let parser = Parser::from(parameter);

        // Verify
        assert_matches!(parser.node, Node::Option(Primitive { name, tokens, metavar, help }) => {
            assert_eq!(name, "dry-run");
            assert_eq!(tokens, vec!["--dry-run", "-d", "--simulate"]);
            assert_eq!(metavar, "DRY_RUN");
            assert_eq!(help, Some("Do nothing.".to_string()));
        });
    }

    #[test]
    fn argument_configured() {
        let parser = Parser::from(Parameter::argument("file").short('f').metavar("FILE"));

        assert_matches!(parser.node, Node::Argument(Primitive { name, tokens, metavar, help: None }) => {
            assert_eq!(name, "file");
            assert!(tokens.is_empty());
            assert_eq!(metavar, "FILE");
        });
    }

    #[test]
    fn literal_configured() {
        let parser = Parser::from(Parameter::literal("commit").alias("ci").metavar("X").help("Record changes."));

        assert_matches!(parser.node, Node::Literal { text, help } => {
            assert_eq!(text, "commit");
            assert_eq!(help, Some("Record changes.".to_string()));
        });
    }

    #[test]
    fn defaults_configured() {
        let parser = defaults([("a", 1), ("b", 2)]);

        assert_matches!(parser.node, Node::Defaults(namespace) => {
            assert_eq!(namespace.get("a"), Some(&Value::Int(1)));
            assert_eq!(namespace.get("b"), Some(&Value::Int(2)));
        });
    }
}
