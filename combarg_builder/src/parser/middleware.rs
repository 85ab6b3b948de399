use std::env;

use crate::constant::*;
use crate::matcher::{Node, Outcome, Step};
use crate::model::Namespace;
use crate::parser::base::*;
use crate::parser::interface::UserInterface;
use crate::parser::printer::Printer;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The configured command line parser.
/// Built via [`CommandLineParser::build`](crate::CommandLineParser::build).
///
/// Parsing is pure and repeatable: the same tokens always produce the same result.
pub struct GeneralParser {
    node: Node,
    printer: Printer,
    user_interface: Box<dyn UserInterface>,
}

impl std::fmt::Debug for GeneralParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneralParser")
            .field("usage", &self.printer.usage())
            .finish()
    }
}

// The complete outcome selected by the driver.
struct Resolution {
    namespace: Namespace,
    ambiguous: bool,
}

impl GeneralParser {
    pub(crate) fn new(node: Node, printer: Printer, user_interface: Box<dyn UserInterface>) -> Self {
        Self {
            node,
            printer,
            user_interface,
        }
    }

    fn resolve(&self, tokens: &[&str]) -> Result<Resolution, ParseError> {
        let Step {
            outcomes,
            mut failure,
        } = self.node.step(tokens, 0);
        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Explored {} outcomes over {} tokens, with failure: {failure:?}.",
                outcomes.len(),
                tokens.len()
            );
        }
        let mut complete: Vec<Outcome> = Vec::default();

        for outcome in outcomes {
            match tokens.get(outcome.position) {
                None => complete.push(outcome),
                Some(token) => {
                    // Explored failures win ties against trailing tokens.
                    failure = furthest(
                        failure,
                        Some(ParseError::Unconsumed {
                            position: outcome.position,
                            token: token.to_string(),
                        }),
                    );
                }
            }
        }

        let mut complete = complete.into_iter();

        match complete.next() {
            Some(Outcome { namespace, .. }) => {
                // Another complete outcome binding the same values is the same parse.
                let alternatives = complete.filter(|o| o.namespace != namespace).count();
                let ambiguous = alternatives > 0;
                #[cfg(feature = "tracing_debug")]
                {
                    if ambiguous {
                        debug!("Ambiguous parse, selecting the first complete outcome over {alternatives} others.");
                    }
                }

                Ok(Resolution {
                    namespace,
                    ambiguous,
                })
            }
            None => match failure {
                Some(error) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("No complete outcome, selecting failure: {error:?}.");
                    }

                    Err(error)
                }
                None => unreachable!("internal error - an unmatched parse must record a failure."),
            },
        }
    }

    /// Run the grammar against the input tokens, producing the bound [`Namespace`].
    ///
    /// When several complete parses exist, the first in declaration order is selected.
    /// When none exist, the failure that progressed furthest into the tokens is returned.
    ///
    /// ### Example
    /// ```
    /// # use combarg_builder as combarg;
    /// use combarg::{argument, flag, CommandLineParser, ParseError};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .build(argument("a") >> flag("--b"))
    ///     .unwrap();
    ///
    /// let namespace = parser.parse_tokens(&["x", "--b"]).unwrap();
    /// assert_eq!(namespace.get_str("a"), Some("x"));
    ///
    /// let error = parser.parse_tokens(&["x"]).unwrap_err();
    /// assert_eq!(error.position(), 1);
    /// ```
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<Namespace, ParseError> {
        self.resolve(tokens).map(|resolution| resolution.namespace)
    }

    /// Whether the input tokens admit more than one parse, in which case [`GeneralParser::parse_tokens`]
    /// selects the first in declaration order.
    /// Unparseable tokens are not ambiguous.
    pub fn is_ambiguous(&self, tokens: &[&str]) -> bool {
        self.resolve(tokens)
            .map(|resolution| resolution.ambiguous)
            .unwrap_or(false)
    }

    /// The usage line, ex: `usage: program [-h] file [--verbose]`.
    pub fn usage(&self) -> String {
        self.printer.usage()
    }

    /// The full help message.
    pub fn help(&self) -> String {
        self.printer.help().join("\n")
    }

    /// Run the command line parser against the input tokens, as a Cli program.
    ///
    /// If the help switch (`-h` or `--help`) is encountered, the parser will display the help message and return with `Err(0)`.
    ///
    /// If the tokens do not parse, the parser will display the usage, error and error context, and return with `Err(1)`.
    pub fn invoke(&self, tokens: &[&str]) -> Result<Namespace, i32> {
        let help_short = format!("-{HELP_SHORT}");
        let help_long = format!("--{HELP_NAME}");

        if tokens
            .iter()
            .any(|token| *token == help_short || *token == help_long)
        {
            self.printer.print_help(&*self.user_interface);
            return Err(0);
        }

        match self.parse_tokens(tokens) {
            Ok(namespace) => Ok(namespace),
            Err(error) => {
                let position = error.position();
                self.user_interface.print_usage(self.printer.usage());
                self.user_interface.print_error(error);
                self.user_interface
                    .print_error_context(ErrorContext::new(position, tokens));
                Err(1)
            }
        }
    }

    /// Run the command line parser against the Cli [`env::args`].
    ///
    /// If the help switch is encountered, or the Cli does not parse, exits (via [`std::process::exit`]) as explained in [`GeneralParser::invoke`].
    pub fn parse(&self) -> Namespace {
        let command_input: Vec<String> = env::args().skip(1).collect();

        match self.invoke(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(namespace) => namespace,
            Err(exit_code) => {
                std::process::exit(exit_code);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::*;
    use crate::parser::util::InMemoryInterface;
    use crate::test::assert_contains;
    use crate::Value;
    use rand::seq::SliceRandom;
    use rand::thread_rng;
    use rstest::rstest;

    fn build(parser: impl Into<Parser>) -> (GeneralParser, InMemoryInterface) {
        let interface = InMemoryInterface::default();
        let general_parser = CommandLineParser::new("program")
            .build_with_interface(parser, Box::new(interface.clone()))
            .unwrap();
        (general_parser, interface)
    }

    fn ns(pairs: Vec<(&str, Value)>) -> Namespace {
        pairs.into_iter().collect()
    }

    #[test]
    fn parse_tokens_empty() {
        // Setup
        let (parser, interface) = build(nonpositional(vec![]));

        // Execute
        let namespace = parser.parse_tokens(&[]).unwrap();

        // Verify
        assert!(namespace.is_empty());
        let (message, usage, error, error_context) = interface.consume();
        assert_eq!(message, None);
        assert_eq!(usage, None);
        assert_eq!(error, None);
        assert_eq!(error_context, None);
    }

    #[rstest]
    #[case(vec!["x"], ns(vec![("a", Value::from("x"))]))]
    #[case(vec!["--verbose"], ns(vec![("verbose", Value::from(true))]))]
    #[case(vec!["-n", "3"], ns(vec![("n", Value::from("3"))]))]
    #[case(vec!["-n=3"], ns(vec![("n", Value::from("3"))]))]
    fn parse_tokens_identity(#[case] tokens: Vec<&str>, #[case] expected: Namespace) {
        // Setup
        let (parser, _) = build(argument("a") | flag("verbose") | option("n", "-n"));

        // Execute
        let namespace = parser.parse_tokens(&tokens).unwrap();

        // Verify
        assert_eq!(namespace, expected);
    }

    #[test]
    fn parse_tokens_deterministic() {
        // Setup
        let (parser, _) = build(
            nonpositional(vec![
                flag("--verbose").with_default(false),
                optional(option("x", "-x")),
                many(argument("item")),
            ]) | (literal("x") >> many(argument("rest"))),
        );
        let mut tokens = vec!["--verbose", "-x", "1", "a", "b"];

        for _ in 0..20 {
            tokens.shuffle(&mut thread_rng());

            // Execute
            let first = parser.parse_tokens(&tokens);
            let second = parser.parse_tokens(&tokens);

            // Verify
            assert_eq!(first, second);
        }
    }

    #[test]
    fn alternative_tie_break() {
        // Setup
        let (parser, _) = build(argument("x") | argument("y"));

        // Execute
        let namespace = parser.parse_tokens(&["1"]).unwrap();

        // Verify
        assert_eq!(namespace, ns(vec![("x", Value::from("1"))]));
        assert!(parser.is_ambiguous(&["1"]));
    }

    #[rstest]
    #[case(vec!["--x"], true, false)]
    #[case(vec!["--y"], false, true)]
    fn alternative_flags(#[case] tokens: Vec<&str>, #[case] x: bool, #[case] y: bool) {
        // Setup
        let (parser, _) = build(alternative(flag("--x"), flag("--y")));

        // Execute
        let namespace = parser.parse_tokens(&tokens).unwrap();

        // Verify
        assert_eq!(namespace.get_bool("x"), x.then_some(true));
        assert_eq!(namespace.get_bool("y"), y.then_some(true));
        assert!(!parser.is_ambiguous(&tokens));
    }

    #[rstest]
    #[case(optional(argument("a")), vec!["x"])]
    #[case(optional(argument("a")), vec![])]
    #[case(flag("--verbose").with_default(false), vec!["--verbose"])]
    #[case(flag("--verbose").with_default(false), vec![])]
    #[case(nonpositional(vec![flag("--a").with_default(false), optional(option("b", "--b"))]), vec![])]
    #[case(interleave(vec![flag("--v").with_default(false)], vec![argument("x")]), vec!["x", "--v"])]
    fn single_parse_not_ambiguous(#[case] grammar: Parser, #[case] tokens: Vec<&str>) {
        // Setup
        let (parser, _) = build(grammar);

        // Execute
        let ambiguous = parser.is_ambiguous(&tokens);

        // Verify
        assert!(parser.parse_tokens(&tokens).is_ok());
        assert!(!ambiguous);
    }

    #[rstest]
    #[case(optional(argument("a")) >> optional(argument("b")), vec!["x"])]
    #[case(many(argument("a")) | many(argument("b")), vec!["x"])]
    fn multiple_parses_ambiguous(#[case] grammar: Parser, #[case] tokens: Vec<&str>) {
        let (parser, _) = build(grammar);

        assert!(parser.is_ambiguous(&tokens));
    }

    #[test]
    fn unparseable_not_ambiguous() {
        let (parser, _) = build(argument("x") | argument("y"));

        assert!(!parser.is_ambiguous(&["1", "2"]));
    }

    #[test]
    fn alternative_flags_fail() {
        let (parser, _) = build(alternative(flag("--x"), flag("--y")));

        let error = parser.parse_tokens(&["--z"]).unwrap_err();

        assert_eq!(error.position(), 0);
        assert_eq!(error.class(), FailureClass::Match);
        assert_eq!(error.to_string(), "Expected '--x'. Got '--z'.");
    }

    #[test]
    fn sequence_fails_at_position() {
        let (parser, _) = build(sequence(argument("a"), option("b", "--b")));

        let error = parser.parse_tokens(&["v1"]).unwrap_err();

        assert_eq!(error.position(), 1);
        assert_eq!(error.class(), FailureClass::Match);
    }

    #[test]
    fn unconsumed_trailing() {
        let (parser, _) = build(argument("a"));

        let error = parser.parse_tokens(&["x", "y"]).unwrap_err();

        assert_eq!(
            error,
            ParseError::Unconsumed {
                position: 1,
                token: "y".to_string(),
            }
        );
        assert_eq!(error.class(), FailureClass::Consumption);
    }

    #[test]
    fn explored_failure_beats_unconsumed() {
        // Setup
        let (parser, _) = build(flag("--x") >> optional(flag("--y")));

        // Execute
        let error = parser.parse_tokens(&["--x", "--z"]).unwrap_err();

        // Verify
        assert_eq!(
            error,
            ParseError::Mismatch {
                position: 1,
                expected: "--y".to_string(),
                found: "--z".to_string(),
            }
        );
    }

    #[test]
    fn many_empty() {
        let (parser, _) = build(many(argument("item")));

        let namespace = parser.parse_tokens(&[]).unwrap();

        assert_eq!(namespace.get_list("item"), Some(&[][..]));
    }

    #[test]
    fn optional_never_fails() {
        let (parser, _) = build(optional(flag("--x")));

        let namespace = parser.parse_tokens(&[]).unwrap();

        assert!(namespace.is_empty());
    }

    #[test]
    fn typed_failure() {
        // Setup
        let (parser, _) = build(argument("name") >> option("n", "-n").typed::<u8>());

        // Execute
        let error = parser.parse_tokens(&["x", "-n", "300"]).unwrap_err();

        // Verify
        assert_eq!(error.class(), FailureClass::Transform);
        assert_eq!(error.position(), 2);
        assert_contains!(error.to_string(), "'300' cannot convert for 'n'");
    }

    #[rstest]
    #[case(vec!["--help"])]
    #[case(vec!["-h"])]
    #[case(vec!["x", "-h"])]
    fn invoke_help(#[case] tokens: Vec<&str>) {
        // Setup
        let (parser, interface) = build(argument("file") >> optional(flag("--verbose")));

        // Execute
        let error_code = parser.invoke(&tokens).unwrap_err();

        // Verify
        assert_eq!(error_code, 0);

        let message = interface.consume_message();
        assert_contains!(message, "usage: program [-h] file [--verbose]\n");
        assert_contains!(message, "-h, --help");
        assert_contains!(message, "--verbose");
    }

    #[test]
    fn invoke_complete() {
        let (parser, interface) = build(argument("file") >> optional(flag("--verbose")));

        let namespace = parser.invoke(&["data.txt"]).unwrap();

        assert_eq!(namespace.get_str("file"), Some("data.txt"));
        let (message, usage, error, error_context) = interface.consume();
        assert_eq!(message, None);
        assert_eq!(usage, None);
        assert_eq!(error, None);
        assert_eq!(error_context, None);
    }

    #[rstest]
    #[case(vec![], 0, "The following arguments are required: file")]
    #[case(vec!["data.txt", "--loud"], 1, "Expected '--verbose'. Got '--loud'.")]
    #[case(vec!["--verbose"], 0, "Expected 'file'. Got '--verbose'.")]
    fn invoke_error(#[case] tokens: Vec<&str>, #[case] position: usize, #[case] expected: &str) {
        // Setup
        let (parser, interface) = build(argument("file") >> optional(flag("--verbose")));

        // Execute
        let error_code = parser.invoke(&tokens).unwrap_err();

        // Verify
        assert_eq!(error_code, 1);

        let (message, usage, error, error_context) = interface.consume();
        assert_eq!(message, None);
        assert_eq!(usage, Some("usage: program [-h] file [--verbose]".to_string()));
        assert_eq!(error, Some(expected.to_string()));
        assert_eq!(error_context, Some(ErrorContext::new(position, &tokens)));
    }

    #[test]
    fn usage_and_help() {
        let (parser, _) = build(argument("file") >> optional(flag("--verbose")));

        assert_eq!(parser.usage(), "usage: program [-h] file [--verbose]");
        assert_contains!(parser.help(), "positional arguments:\n file");
    }
}
