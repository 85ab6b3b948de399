//! Traits which, typically, may be imported without concern: `use combarg::prelude::*`.
use crate::api::{CommandLineParser, Parser};
use crate::model::{Namespace, NamespaceError};
use crate::parser::{ArgsError, GeneralParser};

/// Behaviour for a type that is parsed from the Cli.
///
/// Typically implemented via `#[derive(Args)]` (see `combarg::derive`), but may be written by hand.
///
/// ### Example
/// ```
/// # use combarg_builder as combarg;
/// use combarg::prelude::*;
/// use combarg::{argument, flag, CommandLineParser, Namespace, NamespaceError, Parser};
///
/// #[derive(Debug, PartialEq)]
/// struct Transfer {
///     force: bool,
///     source: String,
/// }
///
/// impl Args for Transfer {
///     fn command_line_parser() -> CommandLineParser {
///         CommandLineParser::new("copy")
///     }
///
///     fn parser() -> Parser {
///         flag("--force").with_default(false) >> argument("source")
///     }
///
///     fn from_namespace(namespace: &Namespace) -> Result<Self, NamespaceError> {
///         Ok(Transfer {
///             force: namespace.extract_switch("force")?,
///             source: namespace.extract_scalar("source")?,
///         })
///     }
/// }
///
/// let transfer = Transfer::parse_tokens(&["--force", "a.txt"]).unwrap();
/// assert_eq!(transfer, Transfer { force: true, source: "a.txt".to_string() });
/// ```
pub trait Args: Sized {
    /// The command line parser to build the grammar with.
    fn command_line_parser() -> CommandLineParser;

    /// The grammar of this type.
    fn parser() -> Parser;

    /// Convert the bindings of a successful parse into this type.
    fn from_namespace(namespace: &Namespace) -> Result<Self, NamespaceError>;

    /// Build the command line parser of this type.
    ///
    /// Exits (code 1) when the grammar is misconfigured.
    fn build() -> GeneralParser {
        match Self::command_line_parser().build(Self::parser()) {
            Ok(parser) => parser,
            Err(error) => {
                eprintln!("{error}");
                std::process::exit(1);
            }
        }
    }

    /// Parse this type from the input tokens, without any printing or exiting.
    fn parse_tokens(tokens: &[&str]) -> Result<Self, ArgsError> {
        let parser = Self::command_line_parser().build(Self::parser())?;
        let namespace = parser.parse_tokens(tokens)?;
        Ok(Self::from_namespace(&namespace)?)
    }

    /// Parse this type from the Cli [`std::env::args`]; see [`GeneralParser::parse`].
    ///
    /// Exits (code 1) when the bindings do not fit this type.
    fn parse() -> Self {
        let namespace = Self::build().parse();

        match Self::from_namespace(&namespace) {
            Ok(value) => value,
            Err(error) => {
                eprintln!("Extract error: {error}");
                std::process::exit(1);
            }
        }
    }
}
