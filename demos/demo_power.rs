use combarg::{argument, many1, CommandLineParser, Parameter, Parser, Value};

fn main() {
    let exponent = Parser::from(
        Parameter::option("exponent", "--exponent")
            .short('e')
            .help("The power to raise each item to."),
    )
    .typed::<u32>()
    .with_default(1);
    let items = many1(Parser::from(Parameter::argument("item").help("The items to sum.")).typed::<i64>());

    let parser = CommandLineParser::new("power")
        .about("Sum the items, each raised to the exponent.")
        .build(exponent + items)
        .expect("Invalid grammar");

    let namespace = parser.parse();
    let exponent = namespace
        .get("exponent")
        .and_then(Value::as_int)
        .unwrap_or(1) as u32;
    let sum: i64 = namespace
        .get_list("item")
        .unwrap_or(&[])
        .iter()
        .filter_map(Value::as_int)
        .map(|item| item.pow(exponent))
        .sum();
    println!("Sum: {sum}");
}
