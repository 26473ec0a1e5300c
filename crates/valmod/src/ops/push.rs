use serde_json::Value;
use valmod_traverse::{Node, NodeError, Path};

use super::{expect_args, traverse_but_one, OpError};

/// Append a value to the array at `path`. The array is read, extended, and
/// written back through the parent: an append may reallocate the backing
/// storage, so in-place mutation of the read copy cannot be assumed.
pub fn push(root: Node<'_>, path: &Path, args: &[Value]) -> Result<(), OpError> {
    expect_args(args, 1)?;
    let (mut parent, last) = traverse_but_one(root, path)?;
    let Value::Array(mut items) = parent.get(last)? else {
        return Err(OpError::Node(NodeError::WrongVisit));
    };
    items.push(args[0].clone());
    parent.set(last, Value::Array(items))?;
    Ok(())
}
