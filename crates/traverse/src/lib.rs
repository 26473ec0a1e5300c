//! Path model and tree-node view for valmod.
//!
//! A [`Path`] is an ordered address into a decoded value tree; a [`Node`]
//! is a transient handle onto one position in that tree, valid for a
//! single operation.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use valmod_traverse::{Node, PathStep};
//!
//! let mut doc = json!({"a": {"b": [1, 2, 3]}});
//! let node = Node::new(&mut doc)
//!     .visit(&PathStep::Field("a".into()))
//!     .unwrap();
//! let mut node = node.visit(&PathStep::Field("b".into())).unwrap();
//! node.delete(&PathStep::Index(1)).unwrap();
//! assert_eq!(doc, json!({"a": {"b": [1, 3]}}));
//! ```

pub mod node;
pub mod path;

pub use node::{Node, NodeError, NodeKind};
pub use path::{Path, PathStep};
