#![allow(non_snake_case)]
use RustedExpr::Examples::symbolic_examples::sym_examples;
use RustedExpr::Utils::logger::init_logger;
use log::error;
use std::env;

fn main() {
    // usage: RustedExpr [example] [loglevel]
    let args: Vec<String> = env::args().collect();
    let example = match args.get(1).map(|s| s.parse::<usize>()) {
        Some(Ok(example)) => example,
        Some(Err(_)) => {
            eprintln!("example must be a non-negative number, got \"{}\"", args[1]);
            std::process::exit(2);
        }
        None => 0,
    };
    let loglevel = args.get(2).map(String::as_str);
    if let Err(err) = init_logger(loglevel, false) {
        eprintln!("{}", err);
        std::process::exit(2);
    }
    if let Err(err) = sym_examples(example) {
        error!("example {} failed: {}", example, err);
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
