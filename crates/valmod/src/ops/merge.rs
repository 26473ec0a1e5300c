use serde_json::Value;
use valmod_traverse::{Node, NodeError, Path};

use super::{expect_args, traverse_but_one, OpError};

/// Deep-merge an object into the value at `path`.
///
/// A missing target behaves like `set`. When both the existing value and
/// the incoming value at a key are objects the merge recurses; in every
/// other case the incoming value wins. Arrays are replaced, never merged.
pub fn merge(root: Node<'_>, path: &Path, args: &[Value]) -> Result<(), OpError> {
    expect_args(args, 1)?;
    if !args[0].is_object() {
        return Err(OpError::ArgumentType {
            expected: "a JSON object",
        });
    }
    let (mut parent, last) = traverse_but_one(root, path)?;
    let merged = match parent.get(last) {
        Err(NodeError::FieldMissing) => args[0].clone(),
        Err(err) => return Err(err.into()),
        Ok(existing) => merge_value(existing, args[0].clone()),
    };
    parent.set(last, merged)?;
    Ok(())
}

fn merge_value(existing: Value, incoming: Value) -> Value {
    match (existing, incoming) {
        (Value::Object(mut base), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match base.get_mut(&key) {
                    Some(slot) => {
                        let prior = slot.take();
                        *slot = merge_value(prior, value);
                    }
                    None => {
                        base.insert(key, value);
                    }
                }
            }
            Value::Object(base)
        }
        // non-object on either side: incoming replaces outright
        (_, incoming) => incoming,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(doc: &mut Value, op: &str, arg: Value) -> Result<(), OpError> {
        let call = valmod_lang::parse(op).unwrap();
        merge(Node::new(doc), &call.path, &[arg])
    }

    #[test]
    fn adds_new_fields_to_the_target() {
        let mut doc = json!({"abc": {"def": {"cfa": [1, 2, 3]}}});
        run(&mut doc, "merge(abc.def)", json!({"added": true})).unwrap();
        assert_eq!(
            doc,
            json!({"abc": {"def": {"cfa": [1, 2, 3], "added": true}}})
        );
    }

    #[test]
    fn scalar_argument_is_rejected() {
        let mut doc = json!({"abc": {"def": {}}});
        let err = run(&mut doc, "merge(abc.def)", json!(true)).unwrap_err();
        assert_eq!(
            err,
            OpError::ArgumentType {
                expected: "a JSON object"
            }
        );
    }

    #[test]
    fn missing_field_behaves_like_set() {
        let mut doc = json!({"abc": {"def": {"cfa": 1}}});
        run(&mut doc, "merge(abc.newfield)", json!({"added": true})).unwrap();
        assert_eq!(
            doc,
            json!({"abc": {"def": {"cfa": 1}, "newfield": {"added": true}}})
        );
    }

    #[test]
    fn non_object_target_is_replaced_outright() {
        let mut doc = json!({"abc": {"def": true}});
        run(&mut doc, "merge(abc.def)", json!({"added": true})).unwrap();
        assert_eq!(doc, json!({"abc": {"def": {"added": true}}}));
    }

    #[test]
    fn nested_objects_merge_recursively() {
        let mut doc = json!({"a": {"b": {"x": 1, "keep": true}, "c": 2}});
        run(&mut doc, "merge(a)", json!({"b": {"x": 9, "y": 10}})).unwrap();
        assert_eq!(
            doc,
            json!({"a": {"b": {"x": 9, "keep": true, "y": 10}, "c": 2}})
        );
    }

    #[test]
    fn arrays_are_replaced_not_merged() {
        let mut doc = json!({"a": {"list": [1, 2, 3]}});
        run(&mut doc, "merge(a)", json!({"list": [9]})).unwrap();
        assert_eq!(doc, json!({"a": {"list": [9]}}));
    }

    #[test]
    fn incoming_key_wins_on_scalar_conflict() {
        let mut doc = json!({"a": {"k": "old"}});
        run(&mut doc, "merge(a)", json!({"k": "new"})).unwrap();
        assert_eq!(doc, json!({"a": {"k": "new"}}));
    }
}
