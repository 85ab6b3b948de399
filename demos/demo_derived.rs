use combarg::derive::*;
use combarg::prelude::*;

#[derive(Debug, Args)]
#[combarg(program = "demo_derived", about = "Demonstrate the derive Api.")]
struct Parameters {
    #[combarg(argument, help = "The number of apples.")]
    apple: usize,
    #[combarg(short = 'b')]
    banana: bool,
    #[combarg(help = "Repeat to add more carrots.")]
    carrots: Vec<u32>,
    daikon_root: Option<String>,
}

fn main() {
    let parameters = Parameters::parse();
    println!("{parameters:?}");
}
