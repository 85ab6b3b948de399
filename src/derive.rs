//! Derive Api for `combarg` configuration.
//!
//! ### Getting Started
//! Use the derive Api by instrumenting a parameter struct `S` with `#[derive(Args)]`.
//! This implements [`Args`](../prelude/trait.Args.html) for `S`, including `S::parse() -> S` which parses the Cli fitting `S`.
//!
//! ```no_run
#![doc = include_str!("../demos/demo_derived.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ demo_derived -h
//! usage: demo_derived [-h] [--banana] [--carrots CARROTS ...] [--daikon-root DAIKON_ROOT] apple
//!
//! Demonstrate the derive Api.
//!
//! positional arguments:
//!  apple                       The number of apples.
//!
//! options:
//!  -h, --help                  Show this help message and exit.
//!  -b, --banana
//!  --carrots CARROTS           Repeat to add more carrots.
//!  --daikon-root DAIKON_ROOT
//! ```
//!
//! ### Parameter Configuration
//! The fields of `S` are combined with [`interleave`](../fn.interleave.html), following these rules:
//! ```console
//! Type        | Parser
//! -------------------------------------------------------------
//! bool        | flag("--name").with_default(false)
//! Option<T>   | optional(option("name", "--name"))
//! Vec<T>      | many(option("name", "--name"))
//! T           | option("name", "--name")
//! ```
//!
//! Flag & option tokens are the field name with `_` replaced by `-` (ex: `daikon_root` becomes `--daikon-root`).
//! Every value is checked to convert to `T` (via [`std::str::FromStr`]) during the parse.
//!
//! The following field attributes adjust these rules:
//! * `#[combarg(argument)]` makes the field positional: `T` becomes `argument("name")`, and `Vec<T>` becomes `many1(argument("name"))`.
//! Positional fields are matched in declaration order, with the flags & options allowed before, between or after them.
//! Not applicable to `bool` or `Option<T>` fields.
//! * `#[combarg(command)]` makes the field a sub-command, where its type also derives `Args` (typically an enum, see below).
//! The sub-command is matched as the last positional field. Takes no other attributes.
//! * `#[combarg(short = C)]` adds the short token `-C` to a flag/option, where `C` is a char value (ex: `'c'`).
//! * `#[combarg(help = "..")]` defines the help message for the parameter.
//!
//! The struct itself may be configured with:
//! * `#[combarg(program = "..")]` for the program name (defaults to the crate name).
//! * `#[combarg(about = "..")]` for the about message.
//!
//! ### Sub-commands
//! An enum deriving `Args` matches one of its variants, each selected by a literal keyword: the variant name in kebab-case (ex: `DryRun` becomes `dry-run`).
//! The fields of a variant follow the same rules as struct fields.
//! The selected keyword is bound under `command`, so a grammar holds at most one level of sub-commands.
//!
//! Variants may be configured with:
//! * `#[combarg(name = "..")]` to replace the keyword.
//! * `#[combarg(help = "..")]` for the keyword's help message.
//!
//! ```ignore
//! #[derive(Args)]
//! enum Action {
//!     Commit { all: bool },
//!     Push {
//!         #[combarg(argument)]
//!         remote: String,
//!     },
//! }
//! // the above generates:
//! //  (Parser::from(Parameter::literal("commit")) >> defaults([("command", "commit")]) >> interleave(..))
//! //      | (Parser::from(Parameter::literal("push")) >> defaults([("command", "push")]) >> interleave(..))
//!
//! #[derive(Args)]
//! struct Vcs {
//!     verbose: bool,
//!     #[combarg(command)]
//!     action: Action,
//! }
//! // usage: vcs [-h] [--verbose] (commit [--all] | push remote)
//! ```
//!
//! A partial example of these rules is provided as follows:
//! ```ignore
//! #[derive(Args)]
//! struct Parameters {
//!     #[combarg(argument)]
//!     quick: usize,
//!     // the above generates:
//!     //  Parser::from(Parameter::argument("quick")).validate::<usize>()
//!
//!     #[combarg(short = 'f', help = "The fox.")]
//!     brown_fox: Option<String>,
//!     // the above generates:
//!     //  optional(Parser::from(Parameter::option("brown-fox", "--brown-fox").short('f').help("The fox."))
//!     //      .validate::<String>())
//! }
//! ```
pub use combarg_derive::*;
