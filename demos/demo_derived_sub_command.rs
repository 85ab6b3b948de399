use combarg::derive::*;
use combarg::prelude::*;

#[derive(Debug, Args)]
enum Action {
    #[combarg(help = "Record the staged changes.")]
    Commit {
        #[combarg(short = 'm')]
        message: String,
        #[combarg(short = 'a')]
        all: bool,
    },
    #[combarg(help = "Send the commits to a remote.")]
    Push {
        #[combarg(argument)]
        remote: String,
        force: bool,
    },
    Status,
}

#[derive(Debug, Args)]
#[combarg(
    program = "demo_derived_sub_command",
    about = "Demonstrate sub-commands with the derive Api."
)]
struct Parameters {
    #[combarg(short = 'v')]
    verbose: bool,
    #[combarg(command)]
    action: Action,
}

fn main() {
    let parameters = Parameters::parse();
    println!("{parameters:?}");
}
