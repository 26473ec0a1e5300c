//! Operation registry, dispatch, and the shared traversal helper.

use serde_json::Value;
use thiserror::Error;
use valmod_lang::Call;
use valmod_traverse::{Node, NodeError, Path, PathStep};

mod del;
mod merge;
mod pop;
mod push;
mod set;

pub use del::del;
pub use merge::merge;
pub use pop::pop;
pub use push::push;
pub use set::set;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OpError {
    #[error("operation `{0}` is not supported")]
    UnknownOperation(String),
    #[error("expected {expected} argument(s), got {got}")]
    ArgumentCount { expected: usize, got: usize },
    #[error("expected {expected} as the argument")]
    ArgumentType { expected: &'static str },
    #[error("cannot traverse with a zero length path")]
    EmptyPath,
    #[error("cannot pop from an empty array")]
    EmptyArray,
    #[error(transparent)]
    Node(#[from] NodeError),
}

/// An operation receives the root handle, the full path, and the bound
/// arguments.
pub type Operation = for<'a> fn(Node<'a>, &Path, &[Value]) -> Result<(), OpError>;

/// Resolve a lower-cased operation name against the static registry.
pub fn resolve(name: &str) -> Option<Operation> {
    match name {
        "set" => Some(set),
        "del" => Some(del),
        "merge" => Some(merge),
        "push" => Some(push),
        "pop" => Some(pop),
        _ => None,
    }
}

/// Failure of one operation, carrying enough context for a one-line
/// diagnostic.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("operation {name} at path `{path}`: {source}")]
pub struct ApplyError {
    pub name: String,
    pub path: String,
    #[source]
    pub source: OpError,
}

/// Apply one parsed call to the document.
pub fn apply(doc: &mut Value, call: &Call) -> Result<(), ApplyError> {
    let wrap = |source| ApplyError {
        name: call.name.clone(),
        path: call.path.to_string(),
        source,
    };
    let op = resolve(&call.name.to_ascii_lowercase())
        .ok_or_else(|| wrap(OpError::UnknownOperation(call.name.clone())))?;
    op(Node::new(doc), &call.path, &call.args).map_err(wrap)
}

/// Apply calls strictly in input order, stopping at the first failure.
/// Earlier mutations stay applied; there is no rollback.
pub fn apply_all(doc: &mut Value, calls: &[Call]) -> Result<(), ApplyError> {
    for call in calls {
        apply(doc, call)?;
    }
    Ok(())
}

/// Walk every path element except the last, returning the penultimate node
/// and the final element. Operations work against the parent container.
pub(crate) fn traverse_but_one<'a, 'p>(
    root: Node<'a>,
    path: &'p Path,
) -> Result<(Node<'a>, &'p PathStep), OpError> {
    let Some((walk, last)) = path.split_last() else {
        return Err(OpError::EmptyPath);
    };
    let mut node = root;
    for step in walk {
        node = node.visit(step)?;
    }
    Ok((node, last))
}

pub(crate) fn expect_args(args: &[Value], expected: usize) -> Result<(), OpError> {
    if args.len() != expected {
        return Err(OpError::ArgumentCount {
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use valmod_lang::parse;

    #[test]
    fn traverse_but_one_walks_all_but_the_last() {
        let mut doc = json!({"abc": {"def": {"cfa": "test"}}});
        let path = parse("del(abc.def)").unwrap().path;
        let (node, last) = traverse_but_one(Node::new(&mut doc), &path).unwrap();
        assert_eq!(node.value().unwrap(), json!({"def": {"cfa": "test"}}));
        assert_eq!(last, &PathStep::Field("def".into()));
    }

    #[test]
    fn traverse_but_one_through_an_array() {
        let mut doc = json!({"abc": [true, null, {"def": {"cfa": "test"}}]});
        let path = parse("del(abc[2].def)").unwrap().path;
        let (node, last) = traverse_but_one(Node::new(&mut doc), &path).unwrap();
        assert_eq!(node.value().unwrap(), json!({"def": {"cfa": "test"}}));
        assert_eq!(last, &PathStep::Field("def".into()));
    }

    #[test]
    fn traverse_but_one_single_step_yields_root() {
        let mut doc = json!({"abc": 1});
        let path = parse("del(abc)").unwrap().path;
        let (node, last) = traverse_but_one(Node::new(&mut doc), &path).unwrap();
        assert_eq!(node.value().unwrap(), json!({"abc": 1}));
        assert_eq!(last, &PathStep::Field("abc".into()));
    }

    #[test]
    fn traverse_but_one_missing_ancestor_fails() {
        let mut doc = json!({"abc": 1});
        let path = parse("del(ddd.dkjk)").unwrap().path;
        let err = traverse_but_one(Node::new(&mut doc), &path).unwrap_err();
        assert_eq!(err, OpError::Node(NodeError::FieldMissing));
    }

    #[test]
    fn empty_path_is_an_error() {
        let mut doc = json!({});
        let err = traverse_but_one(Node::new(&mut doc), &Path::default()).unwrap_err();
        assert_eq!(err, OpError::EmptyPath);
    }

    #[test]
    fn unknown_operation_is_reported() {
        let mut doc = json!({});
        let call = parse("frobnicate(a)").unwrap();
        let err = apply(&mut doc, &call).unwrap_err();
        assert_eq!(err.source, OpError::UnknownOperation("frobnicate".into()));
    }

    #[test]
    fn operation_names_are_case_insensitive() {
        let mut doc = json!({});
        let call = parse("SET(a, 1)").unwrap();
        apply(&mut doc, &call).unwrap();
        assert_eq!(doc, json!({"a": 1}));
    }

    #[test]
    fn apply_all_is_fail_fast_without_rollback() {
        let mut doc = json!({"a": {}});
        let calls = vec![
            parse("set(a.b, 1)").unwrap(),
            parse("push(a.b, 2)").unwrap(), // b is not an array
            parse("set(a.c, 3)").unwrap(),
        ];
        let err = apply_all(&mut doc, &calls).unwrap_err();
        assert_eq!(err.source, OpError::Node(NodeError::WrongVisit));
        // first op applied, third never ran
        assert_eq!(doc, json!({"a": {"b": 1}}));
    }

    #[test]
    fn apply_error_renders_a_one_line_diagnostic() {
        let mut doc = json!({"a": [1]});
        let call = parse("set(a[5], 1)").unwrap();
        let err = apply(&mut doc, &call).unwrap_err();
        assert_eq!(
            err.to_string(),
            "operation set at path `a[5]`: index out of bounds"
        );
    }
}
