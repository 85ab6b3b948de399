use crate::model::{Namespace, Value};
use crate::parser::{furthest, ParseError};

/// A value transformation applied by [`Node::Mapped`].
pub(crate) struct Transform(Box<dyn Fn(Value) -> Result<Value, String>>);

impl Transform {
    pub(crate) fn new(f: impl Fn(Value) -> Result<Value, String> + 'static) -> Self {
        Self(Box::new(f))
    }

    pub(crate) fn apply(&self, value: Value) -> Result<Value, String> {
        (self.0)(value)
    }
}

impl std::fmt::Debug for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transform{..}").finish()
    }
}

/// The configuration shared by the name-binding primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Primitive {
    pub(crate) name: String,
    // The flag tokens, primary first (empty for arguments).
    pub(crate) tokens: Vec<String>,
    pub(crate) metavar: String,
    pub(crate) help: Option<String>,
}

impl Primitive {
    pub(crate) fn primary(&self) -> &str {
        self.tokens
            .first()
            .map(String::as_str)
            .unwrap_or(self.metavar.as_str())
    }

    pub(crate) fn matches(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }
}

/// The grammar tree.
///
/// Every combinator kind is a variant, so evaluation, validation and usage synthesis each match
/// the tree exhaustively.
#[derive(Debug)]
pub(crate) enum Node {
    Flag(Primitive),
    Option(Primitive),
    Argument(Primitive),
    Literal {
        text: String,
        help: Option<String>,
    },
    Defaults(Namespace),
    Sequence(Box<Node>, Box<Node>),
    Alternative(Box<Node>, Box<Node>),
    // Each member exactly once: the positional members in order, the nonpositional members anywhere.
    Interleave {
        positional: Vec<Node>,
        nonpositional: Vec<Node>,
    },
    Many {
        inner: Box<Node>,
        at_least_one: bool,
    },
    Optional(Box<Node>),
    Mapped {
        inner: Box<Node>,
        transform: Transform,
    },
    Ignore(Box<Node>),
}

/// One candidate parse: the bindings so far, and the offset of the first unconsumed token.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Outcome {
    pub(crate) namespace: Namespace,
    pub(crate) position: usize,
}

impl Outcome {
    pub(crate) fn new(namespace: Namespace, position: usize) -> Self {
        Self {
            namespace,
            position,
        }
    }

    pub(crate) fn empty(position: usize) -> Self {
        Self::new(Namespace::default(), position)
    }

    pub(crate) fn consumed_from(&self, start: usize) -> bool {
        self.position > start
    }
}

/// The result of applying a node at one position.
///
/// Outcomes are kept in declaration order: earlier alternatives come first.
/// The failure is the furthest one seen while exploring, kept even when outcomes exist, since the
/// outcomes may still be discarded later for not consuming the whole input.
#[derive(Debug, Clone, Default)]
pub(crate) struct Step {
    pub(crate) outcomes: Vec<Outcome>,
    pub(crate) failure: Option<ParseError>,
}

impl Step {
    pub(crate) fn matched(outcome: Outcome) -> Self {
        Self {
            outcomes: vec![outcome],
            failure: None,
        }
    }

    pub(crate) fn failed(error: ParseError) -> Self {
        Self {
            outcomes: Vec::default(),
            failure: Some(error),
        }
    }

    pub(crate) fn record(&mut self, failure: Option<ParseError>) {
        self.failure = furthest(self.failure.take(), failure);
    }

    /// Append the outcomes of a later explored sibling, keeping the furthest failure.
    pub(crate) fn absorb(&mut self, other: Step) {
        let Step { outcomes, failure } = other;
        self.outcomes.extend(outcomes);
        self.record(failure);
    }
}
