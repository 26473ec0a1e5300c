//! Transient, re-walking view onto a position in a value tree.

use serde_json::Value;
use thiserror::Error;

use crate::path::PathStep;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NodeError {
    #[error("no field with such name")]
    FieldMissing,
    #[error("index out of bounds")]
    IdxOutOfBounds,
    #[error("cannot visit a field on a value of this type")]
    WrongVisit,
}

/// The variant of the value a node currently points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl NodeKind {
    pub fn of(value: &Value) -> NodeKind {
        match value {
            Value::Null => NodeKind::Null,
            Value::Bool(_) => NodeKind::Bool,
            Value::Number(_) => NodeKind::Number,
            Value::String(_) => NodeKind::String,
            Value::Array(_) => NodeKind::Array,
            Value::Object(_) => NodeKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Null => "null",
            NodeKind::Bool => "bool",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Array => "array",
            NodeKind::Object => "object",
        }
    }
}

/// A handle onto one position in a value tree.
///
/// The node owns no storage: it keeps the root borrow plus the steps that
/// reached the current position, and re-walks them on every access. A
/// container replaced anywhere along that chain is therefore observed on
/// the next call, and an array shortened through this handle is shortened
/// in the tree itself. Handles are single-use: never keep one across
/// operations.
#[derive(Debug)]
pub struct Node<'a> {
    root: &'a mut Value,
    trail: Vec<PathStep>,
}

impl<'a> Node<'a> {
    pub fn new(root: &'a mut Value) -> Node<'a> {
        Node {
            root,
            trail: Vec::new(),
        }
    }

    fn current(&self) -> Result<&Value, NodeError> {
        let mut value: &Value = &*self.root;
        for step in &self.trail {
            value = read_step(value, step)?;
        }
        Ok(value)
    }

    fn current_mut(&mut self) -> Result<&mut Value, NodeError> {
        let mut value: &mut Value = &mut *self.root;
        for step in &self.trail {
            value = read_step_mut(value, step)?;
        }
        Ok(value)
    }

    pub fn kind(&self) -> Result<NodeKind, NodeError> {
        Ok(NodeKind::of(self.current()?))
    }

    /// A clone of the value at the current position.
    pub fn value(&self) -> Result<Value, NodeError> {
        Ok(self.current()?.clone())
    }

    /// One hop down. Consumes the handle; the returned node re-walks the
    /// extended trail on its next access.
    pub fn visit(mut self, step: &PathStep) -> Result<Node<'a>, NodeError> {
        read_step(self.current()?, step)?;
        self.trail.push(step.clone());
        Ok(self)
    }

    /// A clone of the child value addressed by `step`.
    pub fn get(&self, step: &PathStep) -> Result<Value, NodeError> {
        Ok(read_step(self.current()?, step)?.clone())
    }

    /// Write the child addressed by `step`. Objects upsert, creating the
    /// key when absent; arrays require the index to exist and never grow.
    pub fn set(&mut self, step: &PathStep, value: Value) -> Result<(), NodeError> {
        match self.current_mut()? {
            Value::Object(map) => {
                let name = step.as_field().ok_or(NodeError::WrongVisit)?;
                map.insert(name.to_string(), value);
                Ok(())
            }
            Value::Array(items) => {
                let idx = step.as_index().ok_or(NodeError::WrongVisit)?;
                match items.get_mut(idx) {
                    Some(slot) => {
                        *slot = value;
                        Ok(())
                    }
                    None => Err(NodeError::IdxOutOfBounds),
                }
            }
            _ => Err(NodeError::WrongVisit),
        }
    }

    /// Remove the child addressed by `step`. Removing an absent object key
    /// is a no-op. Array removal shifts the tail left; the removal happens
    /// through the root borrow, so the shortened array is what every
    /// ancestor sees.
    pub fn delete(&mut self, step: &PathStep) -> Result<(), NodeError> {
        match self.current_mut()? {
            Value::Object(map) => {
                let name = step.as_field().ok_or(NodeError::WrongVisit)?;
                map.shift_remove(name);
                Ok(())
            }
            Value::Array(items) => {
                let idx = step.as_index().ok_or(NodeError::WrongVisit)?;
                if idx >= items.len() {
                    return Err(NodeError::IdxOutOfBounds);
                }
                items.remove(idx);
                Ok(())
            }
            _ => Err(NodeError::WrongVisit),
        }
    }
}

fn read_step<'v>(value: &'v Value, step: &PathStep) -> Result<&'v Value, NodeError> {
    match value {
        Value::Object(map) => {
            let name = step.as_field().ok_or(NodeError::WrongVisit)?;
            map.get(name).ok_or(NodeError::FieldMissing)
        }
        Value::Array(items) => {
            let idx = step.as_index().ok_or(NodeError::WrongVisit)?;
            items.get(idx).ok_or(NodeError::IdxOutOfBounds)
        }
        _ => Err(NodeError::WrongVisit),
    }
}

fn read_step_mut<'v>(value: &'v mut Value, step: &PathStep) -> Result<&'v mut Value, NodeError> {
    match value {
        Value::Object(map) => {
            let name = step.as_field().ok_or(NodeError::WrongVisit)?;
            map.get_mut(name).ok_or(NodeError::FieldMissing)
        }
        Value::Array(items) => {
            let idx = step.as_index().ok_or(NodeError::WrongVisit)?;
            items.get_mut(idx).ok_or(NodeError::IdxOutOfBounds)
        }
        _ => Err(NodeError::WrongVisit),
    }
}
