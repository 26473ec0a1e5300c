use serde_json::Value;
use valmod_traverse::{Node, NodeError, Path};

use super::{expect_args, traverse_but_one, OpError};

/// Delete the value at `path`. Deleting something already gone is not an
/// error: a missing ancestor during the walk, like an absent terminal key,
/// counts as success. Every other walk failure surfaces.
pub fn del(root: Node<'_>, path: &Path, args: &[Value]) -> Result<(), OpError> {
    expect_args(args, 0)?;
    let (mut parent, last) = match traverse_but_one(root, path) {
        Ok(found) => found,
        Err(OpError::Node(NodeError::FieldMissing)) => return Ok(()),
        Err(err) => return Err(err),
    };
    parent.delete(last)?;
    Ok(())
}
