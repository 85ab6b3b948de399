use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;

/// A value bound to a name by a successful parse.
///
/// Primitives bind [`Value::Str`] (arguments & options) or [`Value::Bool`] (flags).
/// Repetitions bind [`Value::List`].
/// The remaining variants are produced by transformations, such as [`Parser::typed`](crate::Parser::typed).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A raw token, exactly as it appeared on the Cli.
    Str(String),
    /// The presence (or configured absence) of a flag.
    Bool(bool),
    /// A transformed integer.
    Int(i64),
    /// A transformed floating point number.
    Float(f64),
    /// The values collected by a repetition, in input order.
    List(Vec<Value>),
}

impl Value {
    /// Get the string of a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Get the boolean of a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the integer of a [`Value::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the number of a [`Value::Float`] (or a widened [`Value::Int`]).
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            Value::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Get the items of a [`Value::List`].
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::List(_) => "list",
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Str(value) => write!(f, "{value}"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::List(values) => {
                write!(f, "[")?;

                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "]")
            }
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! int_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Int(i64::from(value))
                }
            }
        )*
    };
}

int_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

/// Errors raised while extracting typed fields out of a [`Namespace`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamespaceError {
    /// The namespace has no binding for the name.
    #[error("No value bound to '{0}'.")]
    Missing(String),

    /// The binding exists, but holds a different kind of value.
    #[error("Value bound to '{name}' is a {found}, expected a {expected}.")]
    WrongKind {
        /// The binding name.
        name: String,
        /// The kind of value that was expected.
        expected: &'static str,
        /// The kind of value that was found.
        found: &'static str,
    },

    /// The binding could not be converted via [`FromStr`].
    #[error("'{value}' cannot convert for '{name}': {reason}")]
    Conversion {
        /// The binding name.
        name: String,
        /// The raw value.
        value: String,
        /// The conversion error message.
        reason: String,
    },

    /// The binding holds a value that selects none of the known alternatives (ex: an unknown sub-command).
    #[error("'{value}' bound to '{name}' is not recognized.")]
    Unrecognized {
        /// The binding name.
        name: String,
        /// The bound value.
        value: String,
    },
}

/// The bindings produced by a successful parse: a mapping from names to [`Value`]s.
///
/// Names are unique within a namespace.
/// Iteration is ordered by name; the order carries no meaning beyond making output reproducible.
///
/// ### Example
/// ```
/// # use combarg_builder as combarg;
/// use combarg::{argument, flag, CommandLineParser, Value};
///
/// let parser = CommandLineParser::new("program")
///     .build(argument("file") >> flag("--verbose"))
///     .unwrap();
/// let namespace = parser.parse_tokens(&["data.txt", "--verbose"]).unwrap();
///
/// assert_eq!(namespace.get("file"), Some(&Value::Str("data.txt".to_string())));
/// assert_eq!(namespace.get_bool("verbose"), Some(true));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    values: BTreeMap<String, Value>,
}

impl Namespace {
    /// Look up the value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Look up the string bound to `name`.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Look up the boolean bound to `name`.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Look up the list bound to `name`.
    pub fn get_list(&self, name: &str) -> Option<&[Value]> {
        self.get(name).and_then(Value::as_list)
    }

    /// Whether `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The number of bindings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The bound names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterate the bindings.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Extract a flag-like binding; an absent binding reads as `false`.
    pub fn extract_switch(&self, name: &str) -> Result<bool, NamespaceError> {
        match self.get(name) {
            None => Ok(false),
            Some(Value::Bool(value)) => Ok(*value),
            Some(other) => Err(wrong_kind(name, "bool", other)),
        }
    }

    /// Extract a required binding, converting it via [`FromStr`].
    pub fn extract_scalar<T>(&self, name: &str) -> Result<T, NamespaceError>
    where
        T: FromStr,
        <T as FromStr>::Err: std::fmt::Display,
    {
        match self.get(name) {
            Some(value) => convert(name, value),
            None => Err(NamespaceError::Missing(name.to_string())),
        }
    }

    /// Extract an optional binding, converting it via [`FromStr`] when present.
    pub fn extract_optional<T>(&self, name: &str) -> Result<Option<T>, NamespaceError>
    where
        T: FromStr,
        <T as FromStr>::Err: std::fmt::Display,
    {
        self.get(name).map(|value| convert(name, value)).transpose()
    }

    /// Extract a list binding, converting each item via [`FromStr`].
    /// An absent binding reads as the empty list.
    pub fn extract_collection<T>(&self, name: &str) -> Result<Vec<T>, NamespaceError>
    where
        T: FromStr,
        <T as FromStr>::Err: std::fmt::Display,
    {
        match self.get(name) {
            None => Ok(Vec::default()),
            Some(Value::List(values)) => values.iter().map(|v| convert(name, v)).collect(),
            Some(other) => Err(wrong_kind(name, "list", other)),
        }
    }

    pub(crate) fn singleton(name: impl Into<String>, value: Value) -> Self {
        let mut namespace = Self::default();
        namespace.values.insert(name.into(), value);
        namespace
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Merge `other` into this namespace.
    /// Sequenced parsers bind disjoint names (checked at build), so nothing is overwritten in practice.
    pub(crate) fn extend(&mut self, other: Namespace) {
        self.values.extend(other.values);
    }

    pub(crate) fn into_values(self) -> BTreeMap<String, Value> {
        self.values
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Namespace {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn wrong_kind(name: &str, expected: &'static str, found: &Value) -> NamespaceError {
    NamespaceError::WrongKind {
        name: name.to_string(),
        expected,
        found: found.kind(),
    }
}

fn convert<T>(name: &str, value: &Value) -> Result<T, NamespaceError>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    // Transformed values (ex: Int) round trip through their display form.
    let raw = match value {
        Value::List(_) => return Err(wrong_kind(name, "scalar", value)),
        Value::Str(s) => s.clone(),
        other => other.to_string(),
    };

    T::from_str(&raw).map_err(|error| NamespaceError::Conversion {
        name: name.to_string(),
        value: raw,
        reason: error.to_string(),
    })
}
