//! `combarg` is a parser-combinator engine for command line argument grammars.
//!
//! Rather than configuring a fixed set of arguments & options, a `combarg` Cli is *composed*.
//! Small parsers (flags, options, positional arguments, literals) combine into larger ones via sequencing, alternation and repetition.
//! The composed grammar then runs against the Cli tokens, producing either a [`Namespace`] of bound values, or a descriptive [`ParseError`].
//! The usage string is synthesized from the very same grammar, so it can never drift from what is actually parsed.
//!
//! `combarg` prioritizes the following design concerns:
//! * *Composition*:
//! Every grammar is a value, built from smaller values with a handful of combinators.
//! Complex Clis (sub-commands, mutually exclusive options) need no dedicated features.
//! * *Determinism*:
//! When more than one interpretation of the input succeeds, the first in declaration order wins.
//! The same grammar and tokens always produce the same result.
//! * *Early configuration errors*:
//! Grammars that could never parse sensibly (ex: a name bound twice in a sequence) are rejected when built, not when run.
//! * *Detailed yet basic UX*:
//! The help and error output of the Cli should leave no ambiguity in how to use the program.
//! We do not aim to support rich display configurations, such as colour output, shell completions, etc.
//!
//! # Usage
//! This page includes a few demos on using `combarg`.
//!
//! via [derive Api](./derive/index.html):
//! ```no_run
#![doc = include_str!("../demos/demo_derived.rs")]
//! ```
//! or via the builder Api (this page):
//! ```no_run
#![doc = include_str!("../demos/demo_power.rs")]
//! ```
//!
//! ```console
//! $ power -h
//! usage: power [-h] [--exponent EXPONENT] item [item ...]
//!
//! Sum the items, each raised to the exponent.
//!
//! positional arguments:
//!  item                               The items to sum.
//!
//! options:
//!  -h, --help                         Show this help message and exit.
//!  -e EXPONENT, --exponent EXPONENT   The power to raise each item to.
//!
//! $ power 1 2 3 -e 2
//! Sum: 14
//!
//! $ power 1 blah
//! usage: power [-h] [--exponent EXPONENT] item [item ...]
//! Parse error: 'blah' cannot convert for 'item': invalid digit found in string
//! 1 blah
//!   ^
//! ```
//!
//! # Builder Api
//! ### Primitives
//! * [`flag`]: a token such as `--verbose` that binds `true` when present.
//! * [`option`]: a flag token followed by a value (`--level 3` or `--level=3`), binding the value.
//! * [`argument`]: any one token that does not look like a flag, binding it.
//! * [`literal`]: exactly one fixed token, binding nothing (ex: a sub-command keyword).
//! * [`defaults`]: consumes nothing, binding fixed values.
//!
//! Each primitive is also available as a [`Parameter`], for further configuration (short tokens, aliases, metavars and help messages).
//!
//! ### Combinators
//! * [`sequence`] (`a >> b`): match `a`, then `b` on the remaining tokens.
//! * [`alternative`] (`a | b`): match either; both are explored, and `a` is preferred when both succeed.
//! * [`nonpositional`] (`a + b`): match each exactly once, in any order.
//! * [`interleave`]: match the positional parsers in order, with the nonpositional parsers anywhere among them.
//! * [`many`] / [`many1`]: match repeatedly and greedily, binding lists.
//! * [`optional`]: match, or consume nothing.
//! * [`map`], [`Parser::typed`], [`Parser::validate`]: transform or check the bound values.
//! * [`Parser::with_default`]: bind a fallback value when the parser does not match.
//!
//! ### Execution
//! Build the grammar with a [`CommandLineParser`], which validates it into a [`GeneralParser`].
//! Then, either:
//! * [`GeneralParser::parse_tokens`] (or [`parse`]): run against the tokens, returning a `Result`.
//! * [`GeneralParser::parse`]: run against the Cli, printing help/errors and exiting as a Cli program does.
//!
//! ### Sub-commands
//! Sub-commands are alternatives of sequences that start with a [`literal`].
//!
//! ```no_run
#![doc = include_str!("../demos/demo_sub_command.rs")]
//! ```
//!
//! ```console
//! $ sub-command -h
//! usage: sub-command [-h] [--verbose] (commit [--all] --message MESSAGE | push [remote])
//!
//! $ sub-command commit -m "Initial" --all
//! Commit (all: true): Initial
//!
//! $ sub-command push
//! Push to 'origin'.
//! ```
//!
//! # Cli Semantics
//! * Parsing explores every interpretation of the input; there is no backtracking limit.
//! * A parse succeeds only when all tokens are consumed.
//! When no interpretation succeeds, the error reported is the one that progressed furthest into the input.
//! * Arguments never match tokens that look like flags (`-x`, `--x`), with the exception of negative numbers (`-1`, `-.5`).
//! Option values, however, may be any token.
//! * The help switch (`-h` or `--help`) is reserved, and takes precedence anywhere in the input.
//!
//! # Features
//! * `tracing_debug`: Emit debug logs via the `tracing` crate, detailing how the input was resolved.
pub mod derive;
pub use combarg_builder::*;
