use crate::matcher::model::{Node, Primitive};
use crate::parser::ConfigError;

impl Node {
    /// The names this node may bind, in first-declared order.
    pub(crate) fn names(&self) -> Vec<String> {
        let mut names = Vec::default();
        self.collect_names(&mut names);
        names
    }

    fn collect_names(&self, names: &mut Vec<String>) {
        match self {
            Node::Flag(primitive) | Node::Option(primitive) | Node::Argument(primitive) => {
                add_name(names, &primitive.name)
            }
            Node::Defaults(namespace) => {
                for name in namespace.names() {
                    add_name(names, name);
                }
            }
            Node::Literal { .. } | Node::Ignore(_) => {}
            Node::Sequence(first, second) | Node::Alternative(first, second) => {
                first.collect_names(names);
                second.collect_names(names);
            }
            Node::Interleave {
                positional,
                nonpositional,
            } => {
                for node in nonpositional.iter().chain(positional.iter()) {
                    node.collect_names(names);
                }
            }
            Node::Many { inner, .. } | Node::Optional(inner) | Node::Mapped { inner, .. } => {
                inner.collect_names(names)
            }
        }
    }

    /// Whether this node may succeed without consuming a token.
    pub(crate) fn nullable(&self) -> bool {
        match self {
            Node::Flag(_) | Node::Option(_) | Node::Argument(_) | Node::Literal { .. } => false,
            Node::Defaults(_) | Node::Optional(_) => true,
            Node::Sequence(first, second) => first.nullable() && second.nullable(),
            Node::Alternative(left, right) => left.nullable() || right.nullable(),
            Node::Interleave {
                positional,
                nonpositional,
            } => positional.iter().chain(nonpositional.iter()).all(Node::nullable),
            Node::Many {
                inner,
                at_least_one,
            } => !at_least_one || inner.nullable(),
            Node::Mapped { inner, .. } | Node::Ignore(inner) => inner.nullable(),
        }
    }

    /// Check the grammar is well formed.
    /// The `reserved` tokens may not be used by any primitive.
    pub(crate) fn validate(&self, reserved: &[&str]) -> Result<(), ConfigError> {
        match self {
            Node::Flag(primitive) | Node::Option(primitive) => {
                validate_primitive(primitive, reserved)
            }
            Node::Argument(primitive) => {
                if primitive.name.is_empty() || primitive.metavar.is_empty() {
                    Err(ConfigError::InvalidName(primitive.metavar.clone()))
                } else {
                    Ok(())
                }
            }
            Node::Literal { text, .. } => {
                if text.is_empty() {
                    Err(ConfigError::InvalidName(text.clone()))
                } else if reserved.contains(&text.as_str()) {
                    Err(ConfigError::ReservedToken(text.clone()))
                } else {
                    Ok(())
                }
            }
            Node::Defaults(namespace) => match namespace.names().find(|n| n.is_empty()) {
                Some(name) => Err(ConfigError::InvalidName(name.to_string())),
                None => Ok(()),
            },
            Node::Sequence(first, second) => {
                first.validate(reserved)?;
                second.validate(reserved)?;
                disjoint(&[first.as_ref(), second.as_ref()])
            }
            Node::Interleave {
                positional,
                nonpositional,
            } => {
                let nodes: Vec<&Node> = nonpositional.iter().chain(positional.iter()).collect();

                for node in &nodes {
                    node.validate(reserved)?;
                }

                disjoint(&nodes)
            }
            // Exclusive branches may bind the same name.
            Node::Alternative(left, right) => {
                left.validate(reserved)?;
                right.validate(reserved)
            }
            Node::Many { inner, .. } => {
                inner.validate(reserved)?;

                if inner.nullable() {
                    Err(ConfigError::NullableRepetition(inner.usage().to_string()))
                } else {
                    Ok(())
                }
            }
            Node::Optional(inner) | Node::Mapped { inner, .. } | Node::Ignore(inner) => {
                inner.validate(reserved)
            }
        }
    }
}

fn add_name(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

fn validate_primitive(primitive: &Primitive, reserved: &[&str]) -> Result<(), ConfigError> {
    if primitive.name.is_empty() || primitive.tokens.iter().any(String::is_empty) {
        return Err(ConfigError::InvalidName(primitive.primary().to_string()));
    }

    match primitive
        .tokens
        .iter()
        .find(|token| reserved.contains(&token.as_str()))
    {
        Some(token) => Err(ConfigError::ReservedToken(token.clone())),
        None => Ok(()),
    }
}

fn disjoint(nodes: &[&Node]) -> Result<(), ConfigError> {
    let mut seen: Vec<String> = Vec::default();

    for node in nodes {
        let names = node.names();

        if let Some(name) = names.iter().find(|name| seen.contains(name)) {
            return Err(ConfigError::DuplicateBinding(name.clone()));
        }

        seen.extend(names);
    }

    Ok(())
}
