use crate::constant::*;
use crate::matcher::Node;
use crate::model::Namespace;
use crate::parser::{ConfigError, ConsoleInterface, GeneralParser, ParseError, Printer, UserInterface};

/// A composable grammar for (part of) a command line.
///
/// Build parsers from the primitives ([`flag`](crate::flag), [`option`](crate::option), [`argument`](crate::argument), [`literal`](crate::literal)),
/// then compose them with the combinators ([`sequence`](crate::sequence) `>>`, [`alternative`](crate::alternative) `|`, [`many`](crate::many), [`optional`](crate::optional), etc).
/// A parser is immutable; every combinator consumes its operands and produces a new parser.
///
/// ### Example
/// ```
/// # use combarg_builder as combarg;
/// use combarg::{argument, flag, option, Parser};
///
/// let parser: Parser = argument("file") >> (flag("--verbose") | option("level", "--level"));
/// assert_eq!(parser.usage(), "file (--verbose | --level LEVEL)");
/// ```
pub struct Parser {
    pub(crate) node: Node,
}

impl Parser {
    pub(crate) fn new(node: Node) -> Self {
        Self { node }
    }

    /// The usage fragment of this parser, synthesized from its structure.
    pub fn usage(&self) -> String {
        self.node.usage().to_string()
    }

    /// Document the help message of a primitive parser (including when optional, repeated, or transformed).
    /// Has no effect on composite parsers.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        document(&mut self.node, description.into());
        self
    }
}

fn document(node: &mut Node, description: String) {
    match node {
        Node::Flag(primitive) | Node::Option(primitive) | Node::Argument(primitive) => {
            primitive.help.replace(description);
        }
        Node::Literal { help, .. } => {
            help.replace(description);
        }
        Node::Many { inner, .. }
        | Node::Optional(inner)
        | Node::Mapped { inner, .. }
        | Node::Ignore(inner) => document(inner, description),
        Node::Defaults(_)
        | Node::Sequence(..)
        | Node::Alternative(..)
        | Node::Interleave { .. } => {}
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("usage", &self.usage())
            .finish()
    }
}

/// The base command line parser.
///
/// ### Example
/// ```
/// # use combarg_builder as combarg;
/// use combarg::{argument, optional, flag, CommandLineParser};
///
/// let parser = CommandLineParser::new("program")
///     .about("My program that does awesome stuff.  Check it out!")
///     .build(argument("file") >> optional(flag("--verbose")))
///     .unwrap();
///
/// assert_eq!(parser.usage(), "usage: program [-h] file [--verbose]");
/// parser.parse_tokens(&["data.txt"]).unwrap();
/// ```
pub struct CommandLineParser {
    program: String,
    about: Option<String>,
}

impl CommandLineParser {
    /// Create a command line parser.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
        }
    }

    /// Document the about message for this command line parser.
    /// If repeated, only the final help message will apply.
    ///
    /// An about message documents the command line parser in full sentence/paragraph format.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    pub(crate) fn build_with_interface(
        self,
        parser: impl Into<Parser>,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<GeneralParser, ConfigError> {
        let Parser { node } = parser.into();
        let help_short = format!("-{HELP_SHORT}");
        let help_long = format!("--{HELP_NAME}");
        node.validate(&[help_short.as_str(), help_long.as_str()])?;
        let printer = Printer::terminal(self.program, self.about, &node);
        Ok(GeneralParser::new(node, printer, user_interface))
    }

    /// Build the command line parser for the grammar `parser`.
    /// This finalizes the configuration and checks the grammar for errors (ex: a name bound twice within a sequence).
    ///
    /// ### Example
    /// ```
    /// # use combarg_builder as combarg;
    /// use combarg::{argument, CommandLineParser, ConfigError};
    ///
    /// let result = CommandLineParser::new("program").build(argument("a") >> argument("a"));
    /// assert_eq!(result.unwrap_err(), ConfigError::DuplicateBinding("a".to_string()));
    /// ```
    pub fn build(self, parser: impl Into<Parser>) -> Result<GeneralParser, ConfigError> {
        self.build_with_interface(parser, Box::new(ConsoleInterface::default()))
    }
}

/// Run the built `parser` against the `tokens`; see [`GeneralParser::parse_tokens`].
pub fn parse(parser: &GeneralParser, tokens: &[&str]) -> Result<Namespace, ParseError> {
    parser.parse_tokens(tokens)
}

/// The usage fragment of the `parser`; see [`Parser::usage`].
///
/// ### Example
/// ```
/// # use combarg_builder as combarg;
/// use combarg::{argument, flag, optional, sequence, usage};
///
/// let parser = sequence(argument("file"), optional(flag("--verbose")));
/// assert_eq!(usage(&parser), "file [--verbose]");
/// ```
pub fn usage(parser: &Parser) -> String {
    parser.usage()
}
