use std::ops::{Add, BitOr, Shr};
use std::str::FromStr;

use crate::api::Parser;
use crate::matcher::{Node, Transform};
use crate::model::{Namespace, Value};

impl Parser {
    /// Sequence this parser with `next`; equivalent to `self >> next`.
    pub fn then(self, next: impl Into<Parser>) -> Parser {
        sequence(self, next)
    }

    /// Alternate this parser with `other`; equivalent to `self | other`.
    pub fn or(self, other: impl Into<Parser>) -> Parser {
        alternative(self, other)
    }

    /// Repeat this parser zero or more times; see [`many`].
    pub fn many(self) -> Parser {
        many(self)
    }

    /// Repeat this parser one or more times; see [`many1`].
    pub fn many1(self) -> Parser {
        many1(self)
    }

    /// Make this parser optional; see [`optional`].
    pub fn optional(self) -> Parser {
        optional(self)
    }

    /// Transform every value this parser binds; see [`map`].
    pub fn map<F, E>(self, transform: F) -> Parser
    where
        F: Fn(Value) -> Result<Value, E> + 'static,
        E: std::fmt::Display,
    {
        map(self, transform)
    }

    /// Convert every string this parser binds to `T` (element-wise inside lists).
    /// A string that does not convert fails the parse.
    ///
    /// ### Example
    /// ```
    /// # use combarg_builder as combarg;
    /// use combarg::{option, CommandLineParser, Value};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .build(option("n", "-n").typed::<u32>())
    ///     .unwrap();
    ///
    /// assert_eq!(parser.parse_tokens(&["-n", "3"]).unwrap().get("n"), Some(&Value::Int(3)));
    /// assert!(parser.parse_tokens(&["-n", "three"]).is_err());
    /// ```
    pub fn typed<T>(self) -> Parser
    where
        T: FromStr + Into<Value> + 'static,
        <T as FromStr>::Err: std::fmt::Display,
    {
        let transform = Transform::new(convert::<T>);
        Parser::new(Node::Mapped {
            inner: Box::new(self.node),
            transform,
        })
    }

    /// Check every string this parser binds converts to `T`, keeping the original string.
    /// A string that does not convert fails the parse.
    pub fn validate<T>(self) -> Parser
    where
        T: FromStr + 'static,
        <T as FromStr>::Err: std::fmt::Display,
    {
        let transform = Transform::new(check::<T>);
        Parser::new(Node::Mapped {
            inner: Box::new(self.node),
            transform,
        })
    }

    /// Match like this parser, but bind nothing.
    pub fn ignore(self) -> Parser {
        Parser::new(Node::Ignore(Box::new(self.node)))
    }

    /// Fall back to binding `value` to each of this parser's names, when this parser does not match.
    ///
    /// ### Example
    /// ```
    /// # use combarg_builder as combarg;
    /// use combarg::{flag, CommandLineParser};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .build(flag("--verbose").with_default(false))
    ///     .unwrap();
    ///
    /// assert_eq!(parser.usage(), "usage: program [-h] [--verbose]");
    /// assert_eq!(parser.parse_tokens(&[]).unwrap().get_bool("verbose"), Some(false));
    /// assert_eq!(parser.parse_tokens(&["--verbose"]).unwrap().get_bool("verbose"), Some(true));
    /// ```
    pub fn with_default(self, value: impl Into<Value>) -> Parser {
        let value = value.into();
        let fallback: Namespace = self
            .node
            .names()
            .into_iter()
            .map(|name| (name, value.clone()))
            .collect();
        alternative(self, Parser::new(Node::Defaults(fallback)))
    }
}

fn convert<T>(value: Value) -> Result<Value, String>
where
    T: FromStr + Into<Value>,
    <T as FromStr>::Err: std::fmt::Display,
{
    match value {
        Value::Str(raw) => T::from_str(&raw)
            .map(Into::into)
            .map_err(|error| error.to_string()),
        Value::List(values) => values
            .into_iter()
            .map(convert::<T>)
            .collect::<Result<Vec<Value>, String>>()
            .map(Value::List),
        // Flags & defaults are already typed.
        other => Ok(other),
    }
}

fn check<T>(value: Value) -> Result<Value, String>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    match &value {
        Value::Str(raw) => {
            T::from_str(raw).map_err(|error| error.to_string())?;
        }
        Value::List(values) => {
            for item in values {
                if let Value::Str(raw) = item {
                    T::from_str(raw).map_err(|error| error.to_string())?;
                }
            }
        }
        _ => {}
    };

    Ok(value)
}

/// Match `first`, then `second` on the remaining input; the bindings of both are merged.
/// The two parsers may not bind the same name.
pub fn sequence(first: impl Into<Parser>, second: impl Into<Parser>) -> Parser {
    Parser::new(Node::Sequence(
        Box::new(first.into().node),
        Box::new(second.into().node),
    ))
}

/// Match either `left` or `right`.
/// When both match, `left` is preferred.
pub fn alternative(left: impl Into<Parser>, right: impl Into<Parser>) -> Parser {
    Parser::new(Node::Alternative(
        Box::new(left.into().node),
        Box::new(right.into().node),
    ))
}

/// Match `parser` as many times as possible (possibly zero), greedily.
/// Each name `parser` binds is bound to the list of values collected.
///
/// ### Example
/// ```
/// # use combarg_builder as combarg;
/// use combarg::{argument, many, CommandLineParser, Value};
///
/// let parser = CommandLineParser::new("program")
///     .build(many(argument("item")))
///     .unwrap();
///
/// assert_eq!(parser.usage(), "usage: program [-h] [item ...]");
/// assert_eq!(
///     parser.parse_tokens(&["a", "b"]).unwrap().get("item"),
///     Some(&Value::from(vec!["a", "b"]))
/// );
/// assert_eq!(parser.parse_tokens(&[]).unwrap().get("item"), Some(&Value::List(vec![])));
/// ```
pub fn many(parser: impl Into<Parser>) -> Parser {
    Parser::new(Node::Many {
        inner: Box::new(parser.into().node),
        at_least_one: false,
    })
}

/// Match `parser` as many times as possible, but at least once.
pub fn many1(parser: impl Into<Parser>) -> Parser {
    Parser::new(Node::Many {
        inner: Box::new(parser.into().node),
        at_least_one: true,
    })
}

/// Match `parser`, or nothing.
pub fn optional(parser: impl Into<Parser>) -> Parser {
    Parser::new(Node::Optional(Box::new(parser.into().node)))
}

/// Transform every value `parser` binds.
/// An `Err` fails the parse, reporting the position of the value.
///
/// ### Example
/// ```
/// # use combarg_builder as combarg;
/// use combarg::{argument, map, CommandLineParser, Value};
///
/// let parser = CommandLineParser::new("program")
///     .build(map(argument("name"), |value: Value| match value {
///         Value::Str(name) if !name.is_empty() => Ok(Value::Str(name.to_uppercase())),
///         _ => Err("empty name"),
///     }))
///     .unwrap();
///
/// assert_eq!(parser.parse_tokens(&["abc"]).unwrap().get_str("name"), Some("ABC"));
/// assert!(parser.parse_tokens(&[""]).is_err());
/// ```
pub fn map<F, E>(parser: impl Into<Parser>, transform: F) -> Parser
where
    F: Fn(Value) -> Result<Value, E> + 'static,
    E: std::fmt::Display,
{
    let transform = Transform::new(move |value| transform(value).map_err(|e| e.to_string()));
    Parser::new(Node::Mapped {
        inner: Box::new(parser.into().node),
        transform,
    })
}

/// Match each of the `parsers` exactly once, in any order.
/// When several orders match, the declared order is preferred.
///
/// ### Example
/// ```
/// # use combarg_builder as combarg;
/// use combarg::{flag, nonpositional, option, CommandLineParser};
///
/// let parser = CommandLineParser::new("program")
///     .build(nonpositional(vec![flag("--verbose"), option("x", "-x")]))
///     .unwrap();
///
/// assert_eq!(
///     parser.parse_tokens(&["-x", "1", "--verbose"]).unwrap(),
///     parser.parse_tokens(&["--verbose", "-x", "1"]).unwrap(),
/// );
/// ```
pub fn nonpositional(parsers: Vec<Parser>) -> Parser {
    interleave(parsers, Vec::default())
}

/// Match each of the `positional` parsers in order, with each of the `nonpositional` parsers
/// exactly once, anywhere before, between or after them.
/// The usage lists the nonpositional parsers first.
///
/// ### Example
/// ```
/// # use combarg_builder as combarg;
/// use combarg::{argument, interleave, option, CommandLineParser};
///
/// let parser = CommandLineParser::new("copy")
///     .build(interleave(
///         vec![option("n", "-n")],
///         vec![argument("source"), argument("target")],
///     ))
///     .unwrap();
///
/// let namespace = parser.parse_tokens(&["a", "-n", "2", "b"]).unwrap();
/// assert_eq!(namespace.get_str("source"), Some("a"));
/// assert_eq!(namespace.get_str("n"), Some("2"));
/// assert_eq!(namespace.get_str("target"), Some("b"));
/// assert_eq!(parser.usage(), "usage: copy [-h] -n N source target");
/// ```
pub fn interleave(nonpositional: Vec<Parser>, positional: Vec<Parser>) -> Parser {
    Parser::new(Node::Interleave {
        positional: positional.into_iter().map(|parser| parser.node).collect(),
        nonpositional: nonpositional.into_iter().map(|parser| parser.node).collect(),
    })
}

impl<P: Into<Parser>> Shr<P> for Parser {
    type Output = Parser;

    fn shr(self, rhs: P) -> Self::Output {
        sequence(self, rhs)
    }
}

impl<P: Into<Parser>> BitOr<P> for Parser {
    type Output = Parser;

    fn bitor(self, rhs: P) -> Self::Output {
        alternative(self, rhs)
    }
}

impl<P: Into<Parser>> Add<P> for Parser {
    type Output = Parser;

    fn add(self, rhs: P) -> Self::Output {
        nonpositional(vec![self, rhs.into()])
    }
}
