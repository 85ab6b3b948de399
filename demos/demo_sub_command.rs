use combarg::{argument, defaults, flag, optional, CommandLineParser, Parameter, Parser};

/// A sub-command keyword, binding its own name to `command`.
fn command(name: &str, description: &str) -> Parser {
    Parser::from(Parameter::literal(name).help(description)) >> defaults([("command", name)])
}

fn main() {
    let message = Parameter::option("message", "--message")
        .short('m')
        .help("The commit message.");
    let commit = command("commit", "Record changes to the repository.")
        >> (flag("--all").with_default(false) + message);
    let push = command("push", "Update the remote.") >> optional(argument("remote"));
    let grammar = flag("--verbose").with_default(false) >> (commit | push);

    let parser = CommandLineParser::new("sub-command")
        .about("A version control program, in miniature.")
        .build(grammar)
        .expect("Invalid grammar");
    let namespace = parser.parse();

    match namespace.get_str("command") {
        Some("commit") => {
            let all = namespace.get_bool("all").unwrap_or(false);
            let message = namespace.get_str("message").unwrap_or_default();
            println!("Commit (all: {all}): {message}");
        }
        Some("push") => {
            let remote = namespace.get_str("remote").unwrap_or("origin");
            println!("Push to '{remote}'.");
        }
        _ => unreachable!("the grammar only accepts 'commit' or 'push'"),
    }

    if namespace.get_bool("verbose") == Some(true) {
        println!("{namespace:?}");
    }
}
