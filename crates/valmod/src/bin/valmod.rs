//! `valmod` — apply path-addressed mutations to a JSON/YAML document.
//!
//! Usage:
//!   valmod [--input-format json|yaml] [--output-format json|yaml] <operation>...
//!
//! The document is read from stdin; operations are applied in argument
//! order and the mutated document is printed to stdout.

use clap::Parser;
use valmod::cli::{run, Args};

fn main() {
    let args = Args::parse();
    match run(&args) {
        Ok(output) => print!("{output}"),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
