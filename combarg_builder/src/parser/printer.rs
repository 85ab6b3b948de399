use terminal_size::{terminal_size, Width};

use crate::constant::*;
use crate::matcher::{Node, Primitive};
use crate::parser::interface::{
    ColumnRenderer, LeftWidth, MiddleWidth, PaddingWidth, TotalWidth, UserInterface,
};

/// A usage fragment, derived structurally from a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Usage {
    Empty,
    Token {
        text: String,
        metavar: Option<String>,
    },
    Sequence(Vec<Usage>),
    Alternative(Vec<Usage>),
    Optional(Box<Usage>),
    Repeated {
        inner: Box<Usage>,
        at_least_one: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Top,
    // An element of a sequence (or of an alternative).
    InSequence,
    // The repeated element.
    Atom,
}

impl Usage {
    fn token(text: impl Into<String>, metavar: Option<String>) -> Self {
        Usage::Token {
            text: text.into(),
            metavar,
        }
    }

    fn sequence(items: Vec<Usage>) -> Self {
        let mut flat = Vec::default();

        for item in items {
            match item {
                Usage::Empty => {}
                Usage::Sequence(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }

        match flat.len() {
            0 => Usage::Empty,
            1 => flat.remove(0),
            _ => Usage::Sequence(flat),
        }
    }

    fn alternative(items: Vec<Usage>) -> Self {
        let mut flat: Vec<Usage> = Vec::default();
        let mut nullable = false;

        for item in items {
            let branches = match item {
                Usage::Alternative(inner) => inner,
                other => vec![other],
            };

            for branch in branches {
                match branch {
                    Usage::Empty => nullable = true,
                    Usage::Optional(inner) => {
                        nullable = true;
                        flat.push(*inner);
                    }
                    other => flat.push(other),
                }
            }
        }

        flat.dedup();

        let alternative = match flat.len() {
            0 => Usage::Empty,
            1 => flat.remove(0),
            _ => Usage::Alternative(flat),
        };

        if nullable {
            Usage::optional(alternative)
        } else {
            alternative
        }
    }

    fn optional(inner: Usage) -> Self {
        match inner {
            Usage::Empty => Usage::Empty,
            // Already optional.
            Usage::Optional(_)
            | Usage::Repeated {
                at_least_one: false,
                ..
            } => inner,
            other => Usage::Optional(Box::new(other)),
        }
    }

    fn repeated(inner: Usage, at_least_one: bool) -> Self {
        match inner {
            Usage::Empty => Usage::Empty,
            other => Usage::Repeated {
                inner: Box::new(other),
                at_least_one,
            },
        }
    }

    fn render(&self, context: Context) -> String {
        match self {
            Usage::Empty => String::default(),
            Usage::Token { text, metavar } => match metavar {
                Some(metavar) => format!("{text} {metavar}"),
                None => text.clone(),
            },
            Usage::Sequence(items) => {
                let out = items
                    .iter()
                    .map(|item| item.render(Context::InSequence))
                    .collect::<Vec<String>>()
                    .join(" ");

                if context == Context::Atom && items.len() > 1 {
                    format!("({out})")
                } else {
                    out
                }
            }
            Usage::Alternative(items) => {
                let out = items
                    .iter()
                    .map(|item| item.render(Context::InSequence))
                    .collect::<Vec<String>>()
                    .join(ALTERNATIVE_SEPARATOR);

                if context == Context::Top {
                    out
                } else {
                    format!("({out})")
                }
            }
            Usage::Optional(inner) => format!("[{}]", inner.render(Context::Top)),
            Usage::Repeated {
                inner,
                at_least_one,
            } => {
                let item = inner.render(Context::Atom);

                if *at_least_one {
                    format!("{item} [{item} {ELLIPSIS}]")
                } else {
                    format!("[{item} {ELLIPSIS}]")
                }
            }
        }
    }
}

impl std::fmt::Display for Usage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(Context::Top))
    }
}

impl Node {
    /// Derive the usage fragment of this node.
    pub(crate) fn usage(&self) -> Usage {
        match self {
            Node::Flag(primitive) => Usage::token(primitive.primary(), None),
            Node::Option(primitive) => {
                Usage::token(primitive.primary(), Some(primitive.metavar.clone()))
            }
            Node::Argument(primitive) => Usage::token(primitive.metavar.clone(), None),
            Node::Literal { text, .. } => Usage::token(text.clone(), None),
            Node::Defaults(_) => Usage::Empty,
            Node::Sequence(first, second) => Usage::sequence(vec![first.usage(), second.usage()]),
            Node::Alternative(left, right) => {
                Usage::alternative(vec![left.usage(), right.usage()])
            }
            Node::Interleave {
                positional,
                nonpositional,
            } => Usage::sequence(
                nonpositional
                    .iter()
                    .chain(positional.iter())
                    .map(Node::usage)
                    .collect(),
            ),
            Node::Many {
                inner,
                at_least_one,
            } => Usage::repeated(inner.usage(), *at_least_one),
            Node::Optional(inner) => Usage::optional(inner.usage()),
            Node::Mapped { inner, .. } | Node::Ignore(inner) => inner.usage(),
        }
    }

    // Collect the help entries, in declaration order.
    fn entries(&self, entries: &mut Vec<Entry>) {
        match self {
            Node::Flag(primitive) => add_entry(entries, Entry::option(primitive, None)),
            Node::Option(primitive) => add_entry(
                entries,
                Entry::option(primitive, Some(primitive.metavar.as_str())),
            ),
            Node::Argument(primitive) => add_entry(
                entries,
                Entry {
                    left: primitive.metavar.clone(),
                    help: primitive.help.clone(),
                    positional: true,
                },
            ),
            Node::Literal { text, help } => add_entry(
                entries,
                Entry {
                    left: text.clone(),
                    help: help.clone(),
                    positional: true,
                },
            ),
            Node::Defaults(_) => {}
            Node::Sequence(first, second) | Node::Alternative(first, second) => {
                first.entries(entries);
                second.entries(entries);
            }
            Node::Interleave {
                positional,
                nonpositional,
            } => {
                for node in nonpositional.iter().chain(positional.iter()) {
                    node.entries(entries);
                }
            }
            Node::Many { inner, .. }
            | Node::Optional(inner)
            | Node::Mapped { inner, .. }
            | Node::Ignore(inner) => inner.entries(entries),
        }
    }
}

fn add_entry(entries: &mut Vec<Entry>, entry: Entry) {
    if !entries.iter().any(|e| e.left == entry.left) {
        entries.push(entry);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    left: String,
    help: Option<String>,
    positional: bool,
}

impl Entry {
    fn option(primitive: &Primitive, metavar: Option<&str>) -> Self {
        // Shortest first, ex: "-v, --verbose".
        let mut tokens: Vec<&String> = primitive.tokens.iter().collect();
        tokens.sort_by_key(|token| token.len());
        let left = tokens
            .into_iter()
            .map(|token| match metavar {
                Some(metavar) => format!("{token} {metavar}"),
                None => token.clone(),
            })
            .collect::<Vec<String>>()
            .join(", ");

        Self {
            left,
            help: primitive.help.clone(),
            positional: false,
        }
    }
}

/// Renders the usage line & help message of a grammar.
pub(crate) struct Printer {
    program: String,
    about: Option<String>,
    usage: Usage,
    entries: Vec<Entry>,
    terminal_width: Option<usize>,
}

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
const DEFAULT_MIDDLE_WIDTH: usize = 17;
const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 1;

impl Printer {
    pub(crate) fn terminal(program: String, about: Option<String>, node: &Node) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(program, about, node, terminal_width)
    }

    pub(crate) fn new(
        program: String,
        about: Option<String>,
        node: &Node,
        terminal_width: Option<usize>,
    ) -> Self {
        let mut entries = Vec::default();
        node.entries(&mut entries);

        Self {
            program,
            about,
            usage: node.usage(),
            entries,
            terminal_width,
        }
    }

    pub(crate) fn usage(&self) -> String {
        // The grammar follows the help switch, so a top level alternative is grouped.
        let grammar = self.usage.render(Context::InSequence);

        if grammar.is_empty() {
            format!("usage: {p} [-{HELP_SHORT}]", p = self.program)
        } else {
            format!("usage: {p} [-{HELP_SHORT}] {grammar}", p = self.program)
        }
    }

    pub(crate) fn help(&self) -> Vec<String> {
        let help_flags = format!("-{HELP_SHORT}, --{HELP_NAME}");
        let left_column_width = self
            .entries
            .iter()
            .map(|entry| entry.left.chars().count())
            .chain(std::iter::once(help_flags.len()))
            .max()
            .unwrap_or_default();
        let middle_column_width = self
            .entries
            .iter()
            .filter_map(|entry| entry.help.as_ref().map(|help| help.chars().count()))
            .chain(std::iter::once(HELP_MESSAGE.len()))
            .max()
            .unwrap_or_default()
            + MAIN_INDENT;
        let column_renderer = match self.terminal_width {
            Some(terminal_width) => ColumnRenderer::guided(
                PaddingWidth::new(PADDING_WIDTH),
                LeftWidth::new(left_column_width),
                MiddleWidth::new(middle_column_width),
                TotalWidth(terminal_width),
            ),
            None => ColumnRenderer::new(
                PaddingWidth::new(PADDING_WIDTH),
                LeftWidth::new(left_column_width),
                MiddleWidth::new(std::cmp::min(middle_column_width, DEFAULT_MIDDLE_WIDTH)),
            ),
        };
        let mut lines = vec![self.usage()];

        if let Some(about) = &self.about {
            lines.push(String::default());
            lines.push(about.clone());
        }

        let render = |entry: &Entry| {
            column_renderer.render(
                MAIN_INDENT,
                &entry.left,
                entry.help.as_deref().unwrap_or_default(),
            )
        };

        if self.entries.iter().any(|entry| entry.positional) {
            lines.push(String::default());
            lines.push("positional arguments:".to_string());

            for entry in self.entries.iter().filter(|entry| entry.positional) {
                lines.extend(render(entry));
            }
        }

        lines.push(String::default());
        lines.push("options:".to_string());
        lines.extend(column_renderer.render(MAIN_INDENT, &help_flags, HELP_MESSAGE));

        for entry in self.entries.iter().filter(|entry| !entry.positional) {
            lines.extend(render(entry));
        }

        lines
    }

    pub(crate) fn print_help(&self, user_interface: &(impl UserInterface + ?Sized)) {
        for line in self.help() {
            user_interface.print(line);
        }
    }
}
