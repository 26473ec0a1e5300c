//! valmod — single-document JSON/YAML mutation engine.
//!
//! A document is decoded once, mutated by an ordered sequence of
//! path-addressed operations written in a compact call syntax, and
//! serialized once at the end.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use valmod::{apply, parse};
//!
//! let mut doc = json!({"a": {"b": [1, 2, 3]}});
//! let call = parse("del(a.b[1])").unwrap();
//! apply(&mut doc, &call).unwrap();
//! assert_eq!(doc, json!({"a": {"b": [1, 3]}}));
//! ```

pub mod cli;
pub mod format;
pub mod ops;

pub use ops::{apply, apply_all, ApplyError, OpError};
pub use valmod_lang::{parse, Call, LexError, ParseError};
pub use valmod_traverse::{Node, NodeError, NodeKind, Path, PathStep};
