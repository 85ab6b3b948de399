use std::collections::HashMap;

use crate::matcher::model::*;
use crate::model::{Namespace, Value};
use crate::parser::ParseError;

type InterleaveMemo = HashMap<(Vec<bool>, usize), Step>;

impl Node {
    /// Apply this node to the `tokens`, starting from `position`.
    pub(crate) fn step(&self, tokens: &[&str], position: usize) -> Step {
        match self {
            Node::Flag(primitive) => match_flag(primitive, tokens, position),
            Node::Option(primitive) => match_option(primitive, tokens, position),
            Node::Argument(primitive) => match_argument(primitive, tokens, position),
            Node::Literal { text, .. } => match_literal(text, tokens, position),
            Node::Defaults(namespace) => Step::matched(Outcome::new(namespace.clone(), position)),
            Node::Sequence(first, second) => step_sequence(first, second, tokens, position),
            Node::Alternative(left, right) => {
                let mut step = left.step(tokens, position);
                step.absorb(right.step(tokens, position));
                step
            }
            Node::Interleave {
                positional,
                nonpositional,
            } => {
                let members = Members {
                    nodes: positional.iter().chain(nonpositional.iter()).collect(),
                    positional: positional.len(),
                };
                let mut used = vec![false; members.nodes.len()];
                let mut memo = InterleaveMemo::default();
                step_interleave(&members, &mut used, tokens, position, &mut memo)
            }
            Node::Many {
                inner,
                at_least_one,
            } => {
                let names = inner.names();
                let mut step = Step::default();
                repeat(
                    inner,
                    &names,
                    *at_least_one,
                    tokens,
                    Iteration {
                        collected: Vec::default(),
                        position,
                    },
                    &mut step,
                );
                step
            }
            Node::Optional(inner) => {
                let mut step = inner.step(tokens, position);
                step.absorb(Step::matched(Outcome::empty(position)));
                step
            }
            Node::Mapped { inner, transform } => mapped(inner, transform, tokens, position),
            Node::Ignore(inner) => {
                let mut step = inner.step(tokens, position);

                for outcome in step.outcomes.iter_mut() {
                    outcome.namespace = Namespace::default();
                }

                step
            }
        }
    }
}

/// Whether the token looks like a flag (`-v`, `--verbose`), rather than a positional value.
/// Negative numbers (`-5`) are not flags.
fn is_flag_shaped(token: &str) -> bool {
    let mut chars = token.chars();

    match (chars.next(), chars.next()) {
        (Some('-'), Some(c)) => !c.is_ascii_digit() && c != '.',
        _ => false,
    }
}

fn split_equals_delimiter(token: &str) -> (&str, Option<&str>) {
    match token.split_once('=') {
        Some((n, v)) => (n, Some(v)),
        None => (token, None),
    }
}

fn match_flag(primitive: &Primitive, tokens: &[&str], position: usize) -> Step {
    match tokens.get(position) {
        Some(token) if primitive.matches(token) => Step::matched(Outcome::new(
            Namespace::singleton(&primitive.name, Value::Bool(true)),
            position + 1,
        )),
        _ => Step::failed(ParseError::expected(position, tokens, primitive.primary())),
    }
}

fn match_option(primitive: &Primitive, tokens: &[&str], position: usize) -> Step {
    let bind = |value: &str, next: usize| {
        Step::matched(Outcome::new(
            Namespace::singleton(&primitive.name, Value::Str(value.to_string())),
            next,
        ))
    };

    match tokens.get(position) {
        Some(token) if primitive.matches(token) => match tokens.get(position + 1) {
            Some(value) => bind(value, position + 2),
            None => Step::failed(ParseError::MissingValue {
                position: position + 1,
                flag: token.to_string(),
            }),
        },
        // 1. --name=value
        // 2. -n=value
        Some(token) => match split_equals_delimiter(token) {
            (flag, Some(value)) if primitive.matches(flag) => bind(value, position + 1),
            _ => Step::failed(ParseError::expected(position, tokens, primitive.primary())),
        },
        None => Step::failed(ParseError::expected(position, tokens, primitive.primary())),
    }
}

fn match_argument(primitive: &Primitive, tokens: &[&str], position: usize) -> Step {
    match tokens.get(position) {
        Some(token) if !is_flag_shaped(token) => Step::matched(Outcome::new(
            Namespace::singleton(&primitive.name, Value::Str(token.to_string())),
            position + 1,
        )),
        _ => Step::failed(ParseError::expected(position, tokens, &primitive.metavar)),
    }
}

fn match_literal(text: &str, tokens: &[&str], position: usize) -> Step {
    match tokens.get(position) {
        Some(token) if *token == text => Step::matched(Outcome::empty(position + 1)),
        _ => Step::failed(ParseError::expected(position, tokens, text)),
    }
}

fn join(head: &Outcome, tail: Outcome) -> Outcome {
    let mut namespace = head.namespace.clone();
    namespace.extend(tail.namespace);

    Outcome {
        namespace,
        position: tail.position,
    }
}

fn step_sequence(first: &Node, second: &Node, tokens: &[&str], position: usize) -> Step {
    let Step { outcomes, failure } = first.step(tokens, position);
    let mut step = Step {
        outcomes: Vec::default(),
        failure,
    };

    for head in outcomes {
        let Step {
            outcomes: tails,
            failure,
        } = second.step(tokens, head.position);
        step.record(failure);

        for tail in tails {
            step.outcomes.push(join(&head, tail));
        }
    }

    step
}

struct Members<'a> {
    // The positional members first, so the next positional member is always the lowest unused one.
    nodes: Vec<&'a Node>,
    positional: usize,
}

fn step_interleave(
    members: &Members,
    used: &mut Vec<bool>,
    tokens: &[&str],
    position: usize,
    memo: &mut InterleaveMemo,
) -> Step {
    let lowest = match used.iter().position(|u| !u) {
        Some(lowest) => lowest,
        None => return Step::matched(Outcome::empty(position)),
    };
    let key = (used.clone(), position);

    if let Some(step) = memo.get(&key) {
        return step.clone();
    }

    let mut step = Step::default();

    for i in 0..members.nodes.len() {
        if used[i] || (i < members.positional && i != lowest) {
            continue;
        }

        let Step {
            outcomes: heads,
            failure,
        } = members.nodes[i].step(tokens, position);
        step.record(failure);
        used[i] = true;

        for head in heads {
            // Members matching nothing at the same position may do so in any order.
            // Only the lowest unused member takes a non-consuming head, so each order is explored once.
            if !head.consumed_from(position) && i != lowest {
                continue;
            }

            let Step {
                outcomes: tails,
                failure,
            } = step_interleave(members, used, tokens, head.position, memo);
            step.record(failure);

            for tail in tails {
                let outcome = join(&head, tail);

                if !step.outcomes.contains(&outcome) {
                    step.outcomes.push(outcome);
                }
            }
        }

        used[i] = false;
    }

    memo.insert(key, step.clone());
    step
}

struct Iteration {
    collected: Vec<Namespace>,
    position: usize,
}

// Greedy: a branch only ends once the inner node fails (or stops consuming) to match.
fn repeat(
    inner: &Node,
    names: &[String],
    at_least_one: bool,
    tokens: &[&str],
    iteration: Iteration,
    step: &mut Step,
) {
    let Iteration {
        collected,
        position,
    } = iteration;
    let Step { outcomes, failure } = inner.step(tokens, position);
    step.record(failure);
    let progressed: Vec<Outcome> = outcomes
        .into_iter()
        .filter(|o| o.consumed_from(position))
        .collect();

    if progressed.is_empty() {
        if !(at_least_one && collected.is_empty()) {
            step.outcomes
                .push(Outcome::new(gather(names, collected), position));
        }

        return;
    }

    for outcome in progressed {
        let mut next = collected.clone();
        next.push(outcome.namespace);
        repeat(
            inner,
            names,
            at_least_one,
            tokens,
            Iteration {
                collected: next,
                position: outcome.position,
            },
            step,
        );
    }
}

/// Fold the per-iteration namespaces into one list per name.
fn gather(names: &[String], collected: Vec<Namespace>) -> Namespace {
    let mut lists: Vec<Vec<Value>> = vec![Vec::default(); names.len()];

    for namespace in collected {
        for (name, value) in namespace.into_values() {
            if let Some(i) = names.iter().position(|n| n == &name) {
                lists[i].push(value);
            }
        }
    }

    names
        .iter()
        .cloned()
        .zip(lists.into_iter().map(Value::List))
        .collect()
}

// A list converts as a whole, so a rejected list points at the last token the outcome consumed.
fn mapped(inner: &Node, transform: &Transform, tokens: &[&str], position: usize) -> Step {
    let Step { outcomes, failure } = inner.step(tokens, position);
    let mut step = Step::default();
    let mut rejected_end = None;

    for outcome in outcomes {
        // Point at the last token this outcome consumed.
        let value_position = if outcome.consumed_from(position) {
            outcome.position - 1
        } else {
            position
        };
        let Outcome {
            namespace,
            position: next,
        } = outcome;
        let mut transformed = Namespace::default();
        let mut rejected = None;

        for (name, value) in namespace.into_values() {
            let raw = value.to_string();

            match transform.apply(value) {
                Ok(value) => transformed.insert(name, value),
                Err(reason) => {
                    rejected.replace(ParseError::Transform {
                        position: value_position,
                        name,
                        value: raw,
                        reason,
                    });
                    break;
                }
            }
        }

        match rejected {
            Some(error) => {
                step.record(Some(error));
                rejected_end = std::cmp::max(rejected_end, Some(next));
            }
            None => step.outcomes.push(Outcome::new(transformed, next)),
        }
    }

    // A rejected outcome explains the inner failures up to where it ended.
    match (failure, rejected_end) {
        (Some(error), Some(end)) if error.position() <= end => {}
        (failure, _) => step.record(failure),
    }

    step
}
