//! Decode and encode between raw document bytes and the value tree.
//!
//! The tree itself is always `serde_json::Value`; YAML documents are
//! decoded into the same variant set, so every operation works identically
//! on both formats and the two can be converted into each other.

use clap::ValueEnum;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
}

pub fn decode(input: &[u8], format: Format) -> Result<Value, FormatError> {
    match format {
        Format::Json => Ok(serde_json::from_slice(input)?),
        Format::Yaml => Ok(serde_yaml::from_slice(input)?),
    }
}

/// Serialize the final tree. JSON output is pretty-printed with a trailing
/// newline.
pub fn encode(value: &Value, format: Format) -> Result<String, FormatError> {
    match format {
        Format::Json => {
            let mut out = serde_json::to_string_pretty(value)?;
            out.push('\n');
            Ok(out)
        }
        Format::Yaml => Ok(serde_yaml::to_string(value)?),
    }
}
