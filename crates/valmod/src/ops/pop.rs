use serde_json::Value;
use valmod_traverse::{Node, NodeError, Path};

use super::{expect_args, traverse_but_one, OpError};

/// Remove the last element of the array at `path` and write the shortened
/// array back through the parent. Popping an empty array is an explicit
/// error rather than a silent no-op.
pub fn pop(root: Node<'_>, path: &Path, args: &[Value]) -> Result<(), OpError> {
    expect_args(args, 0)?;
    let (mut parent, last) = traverse_but_one(root, path)?;
    let Value::Array(mut items) = parent.get(last)? else {
        return Err(OpError::Node(NodeError::WrongVisit));
    };
    if items.pop().is_none() {
        return Err(OpError::EmptyArray);
    }
    parent.set(last, Value::Array(items))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(doc: &mut Value, op: &str) -> Result<(), OpError> {
        let call = valmod_lang::parse(op).unwrap();
        pop(Node::new(doc), &call.path, &[])
    }

    #[test]
    fn pops_the_last_element() {
        let mut doc = json!({"abc": [1, 2, 3]});
        run(&mut doc, "pop(abc)").unwrap();
        assert_eq!(doc, json!({"abc": [1, 2]}));
    }

    #[test]
    fn pop_on_a_scalar_fails() {
        let mut doc = json!({"abc": [1, 2, 3]});
        let err = run(&mut doc, "pop(abc[0])").unwrap_err();
        assert_eq!(err, OpError::Node(NodeError::WrongVisit));
    }

    #[test]
    fn pop_on_an_empty_array_is_an_error() {
        let mut doc = json!({"abc": []});
        let err = run(&mut doc, "pop(abc)").unwrap_err();
        assert_eq!(err, OpError::EmptyArray);
        assert_eq!(doc, json!({"abc": []}));
    }
}
