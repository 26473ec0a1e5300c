use serde_json::Value;
use valmod_traverse::{Node, Path};

use super::{expect_args, traverse_but_one, OpError};

/// Write `value` at `path`. Object parents upsert, creating the key when
/// absent; array parents require the index to exist.
pub fn set(root: Node<'_>, path: &Path, args: &[Value]) -> Result<(), OpError> {
    expect_args(args, 1)?;
    let (mut parent, last) = traverse_but_one(root, path)?;
    parent.set(last, args[0].clone())?;
    Ok(())
}
