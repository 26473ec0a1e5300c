//! Path model: an ordered address into a value tree.

use std::fmt;

/// A single hop in a path: a named object field or a numeric array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    Field(String),
    Index(usize),
}

impl PathStep {
    /// Numeric view of the step, for array addressing. A field whose name
    /// is all digits addresses an array position too, so `a.0` and `a[0]`
    /// are equivalent.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathStep::Index(idx) => Some(*idx),
            PathStep::Field(name) => name.parse().ok(),
        }
    }

    /// The field name, if this step names one.
    pub fn as_field(&self) -> Option<&str> {
        match self {
            PathStep::Field(name) => Some(name),
            PathStep::Index(_) => None,
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Field(name) => write!(f, "{name}"),
            PathStep::Index(idx) => write!(f, "[{idx}]"),
        }
    }
}

impl From<&str> for PathStep {
    fn from(name: &str) -> Self {
        PathStep::Field(name.to_string())
    }
}

impl From<usize> for PathStep {
    fn from(idx: usize) -> Self {
        PathStep::Index(idx)
    }
}

/// An ordered sequence of steps. Every operation requires it to be
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path(Vec<PathStep>);

impl Path {
    pub fn new(steps: Vec<PathStep>) -> Self {
        Path(steps)
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Split into all-but-last and last. `None` for the empty path.
    pub fn split_last(&self) -> Option<(&[PathStep], &PathStep)> {
        self.0.split_last().map(|(last, rest)| (rest, last))
    }
}

impl fmt::Display for Path {
    /// Renders the call-syntax form: fields joined with `.`, indexes in
    /// brackets with no separating dot, e.g. `a.b[0].c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pos, step) in self.0.iter().enumerate() {
            if pos > 0 && matches!(step, PathStep::Field(_)) {
                write!(f, ".")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl From<Vec<PathStep>> for Path {
    fn from(steps: Vec<PathStep>) -> Self {
        Path(steps)
    }
}

impl FromIterator<PathStep> for Path {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}
