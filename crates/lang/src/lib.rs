//! Operation-language front end for valmod.
//!
//! Turns one operation string like `set(a.b[0], "x")` into a structured
//! [`Call`] carrying the lower-cased operation name, the parsed path, and
//! the decoded arguments.
//!
//! # Example
//!
//! ```
//! use valmod_lang::parse;
//!
//! let call = parse(r#"merge(a.b, {"added": true})"#).unwrap();
//! assert_eq!(call.name, "merge");
//! assert_eq!(call.path.to_string(), "a.b");
//! assert_eq!(call.args, vec![serde_json::json!({"added": true})]);
//! ```

pub mod lexer;
pub mod parser;

pub use lexer::{LexError, Lexer, Token};
pub use parser::{parse, Call, ParseError};
