use thiserror::Error;

use crate::model::NamespaceError;

/// Error for an invalid grammar, raised when building a [`GeneralParser`](crate::GeneralParser).
///
/// A configuration error is a mistake by the grammar's author, never a problem with the Cli input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Two sequenced (or nonpositional) parsers may bind the same name.
    #[error("Config error: Cannot duplicate the binding '{0}' within a sequence.")]
    DuplicateBinding(String),

    /// A repetition body may succeed without consuming a token.
    #[error("Config error: Repetition of '{0}' may match zero tokens.")]
    NullableRepetition(String),

    /// A primitive uses a token reserved by the parser (ex: the help switch).
    #[error("Config error: The token '{0}' is reserved.")]
    ReservedToken(String),

    /// A primitive was configured with an empty name or token.
    #[error("Config error: Invalid empty name or token for '{0}'.")]
    InvalidName(String),
}

/// The coarse classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// A primitive did not match the token at its position.
    Match,
    /// The input otherwise matched, but trailing tokens were left over.
    Consumption,
    /// A transformation rejected a matched value.
    Transform,
}

/// Error for a Cli input the grammar does not accept.
///
/// Every variant carries the token `position` at which matching stopped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The token at `position` is not what the grammar expected.
    #[error("Expected '{expected}'. Got '{found}'.")]
    Mismatch {
        /// The token offset.
        position: usize,
        /// The expected syntax.
        expected: String,
        /// The token encountered.
        found: String,
    },

    /// The input ran out while the grammar still required something.
    #[error("The following arguments are required: {expected}")]
    Exhausted {
        /// The token offset (the input length).
        position: usize,
        /// The expected syntax.
        expected: String,
    },

    /// An option flag matched, but no value token follows it.
    #[error("Missing value for '{flag}'.")]
    MissingValue {
        /// The token offset.
        position: usize,
        /// The option flag.
        flag: String,
    },

    /// A parse matched, but left trailing tokens.
    #[error("Unrecognized trailing token '{token}'.")]
    Unconsumed {
        /// The offset of the first unconsumed token.
        position: usize,
        /// The first unconsumed token.
        token: String,
    },

    /// A transformation rejected a matched value.
    #[error("'{value}' cannot convert for '{name}': {reason}")]
    Transform {
        /// The offset of the (last) token holding the value.
        position: usize,
        /// The binding name.
        name: String,
        /// The rejected value.
        value: String,
        /// The transformation's error message.
        reason: String,
    },
}

impl ParseError {
    /// The token offset at which matching stopped.
    pub fn position(&self) -> usize {
        match self {
            ParseError::Mismatch { position, .. }
            | ParseError::Exhausted { position, .. }
            | ParseError::MissingValue { position, .. }
            | ParseError::Unconsumed { position, .. }
            | ParseError::Transform { position, .. } => *position,
        }
    }

    /// The classification of this failure.
    pub fn class(&self) -> FailureClass {
        match self {
            ParseError::Mismatch { .. }
            | ParseError::Exhausted { .. }
            | ParseError::MissingValue { .. } => FailureClass::Match,
            ParseError::Unconsumed { .. } => FailureClass::Consumption,
            ParseError::Transform { .. } => FailureClass::Transform,
        }
    }

    pub(crate) fn expected(position: usize, tokens: &[&str], expected: impl Into<String>) -> Self {
        match tokens.get(position) {
            Some(found) => ParseError::Mismatch {
                position,
                expected: expected.into(),
                found: found.to_string(),
            },
            None => ParseError::Exhausted {
                position,
                expected: expected.into(),
            },
        }
    }
}

/// Keep the failure that progressed furthest into the input.
/// On a tie the `current` (earlier explored) failure wins.
pub(crate) fn furthest(current: Option<ParseError>, next: Option<ParseError>) -> Option<ParseError> {
    match (current, next) {
        (Some(c), Some(n)) => {
            if n.position() > c.position() {
                Some(n)
            } else {
                Some(c)
            }
        }
        (c, None) => c,
        (None, n) => n,
    }
}

/// Error from [`Args::parse_tokens`](crate::prelude::Args::parse_tokens).
#[derive(Debug, Error)]
pub enum ArgsError {
    /// The derived grammar is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The input does not match the grammar.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The namespace does not fit the target struct.
    #[error("Extract error: {0}")]
    Namespace(#[from] NamespaceError),
}

/// The input tokens, with a caret pointing at the failing position.
///
/// ```console
/// 1 blah
///   ^
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    line: String,
    offset: usize,
}

impl ErrorContext {
    pub(crate) fn new(position: usize, tokens: &[&str]) -> Self {
        let line = tokens.join(" ");
        // Each preceding token is followed by a single space separator.
        let offset = tokens
            .iter()
            .take(position)
            .map(|token| token.len() + 1)
            .sum::<usize>();

        Self { line, offset }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let offset = self.offset;
        write!(f, "{}\n{:offset$}^", self.line, "")
    }
}
