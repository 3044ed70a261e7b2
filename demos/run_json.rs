//! Example: Evaluate a JSON-packed program from a file
//!
//! Usage: cargo run --example run_json <program.json>
//!
//! The file holds a JSON array of top-level forms, evaluated in order:
//!
//! ```json
//! [
//!   ["set", "double", ["lambda", ["x"], ["+", "x", "x"]]],
//!   ["double", 21]
//! ]
//! ```

use anyhow::{bail, Context};
use std::env;
use std::fs;
use std::process;
use treelisp::{Evaluator, Value};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo run --example run_json <program.json>");
        process::exit(1);
    }

    match run(&args[1]) {
        Ok(result) => println!("{}", result),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    }
}

fn run(file_path: &str) -> anyhow::Result<Value> {
    let source = fs::read_to_string(file_path)
        .with_context(|| format!("reading '{}'", file_path))?;

    let forms = match Value::parse_json(&source)? {
        Value::List(forms) => forms,
        other => bail!("expected a JSON array of forms, got {}", other.type_name()),
    };

    let evaluator = Evaluator::new();
    let result = evaluator
        .execute(&forms)
        .with_context(|| format!("evaluating '{}'", file_path))?;
    Ok(result)
}
