//! CLI surface: read a document from stdin, apply operation strings given
//! as arguments, print the mutated document.

use std::io::{self, Read};

use serde_json::Value;

use crate::format::{decode, encode, Format, FormatError};
use crate::ops::{apply_all, ApplyError};

#[derive(Debug, clap::Parser)]
#[command(name = "valmod", version, about = "json/yaml mutation tool")]
pub struct Args {
    /// Input document format
    #[arg(long, value_enum, default_value = "json")]
    pub input_format: Format,

    /// Output document format
    #[arg(long, value_enum, default_value = "json")]
    pub output_format: Format,

    /// Operations to apply in order, e.g. 'set(a.b[0], "x")'
    #[arg(required = true)]
    pub operations: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("cannot parse operation `{input}`: {source}")]
    Parse {
        input: String,
        #[source]
        source: valmod_lang::ParseError,
    },
    #[error(transparent)]
    Apply(#[from] ApplyError),
}

/// Read the document from stdin and run.
pub fn run(args: &Args) -> Result<String, CliError> {
    let mut input = Vec::new();
    io::stdin().read_to_end(&mut input)?;
    run_on(&input, args)
}

/// Parse every operation before touching the tree, then apply them in
/// order. A malformed operation string therefore never partially corrupts
/// the document.
pub fn run_on(input: &[u8], args: &Args) -> Result<String, CliError> {
    let calls = args
        .operations
        .iter()
        .map(|op| {
            valmod_lang::parse(op).map_err(|source| CliError::Parse {
                input: op.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut doc: Value = decode(input, args.input_format)?;
    apply_all(&mut doc, &calls)?;
    Ok(encode(&doc, args.output_format)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(operations: &[&str]) -> Args {
        Args {
            input_format: Format::Json,
            output_format: Format::Json,
            operations: operations.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn applies_operations_in_order() {
        let out = run_on(
            br#"{"a": {"list": [1, 2]}}"#,
            &args(&["push(a.list, 3)", "set(a.flag, true)"]),
        )
        .unwrap();
        let doc: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            doc,
            serde_json::json!({"a": {"list": [1, 2, 3], "flag": true}})
        );
    }

    #[test]
    fn parse_errors_abort_before_any_mutation() {
        let err = run_on(
            br#"{"a": 1}"#,
            &args(&["set(a, 2)", "set(broken"]),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Parse { .. }));
    }

    #[test]
    fn converts_json_to_yaml() {
        let mut args = args(&["set(a.b, 1)"]);
        args.output_format = Format::Yaml;
        let out = run_on(br#"{"a": {}}"#, &args).unwrap();
        assert_eq!(out, "a:\n  b: 1\n");
    }
}
