//! Error types for writing fields and collecting forms.

use crate::document::node::NodeKind;
use std::fmt;

/// A field write that could not be applied without corrupting the tree.
///
/// Conflicts are per field: the write is abandoned, nothing is mutated, and
/// the caller moves on to the next field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteConflict {
    /// A sequence was required at `segment` but something else is there.
    ExpectedSequence { segment: String, found: NodeKind },
    /// A mapping was required at `segment` but something else is there.
    ExpectedMapping { segment: String, found: NodeKind },
    /// A terminal index was written while the enclosing container is not a sequence.
    IndexOutsideSequence { index: usize, found: NodeKind },
    /// A sequence position beyond the supported range.
    IndexOutOfRange { index: usize, limit: usize },
    /// A field name with more segments than supported.
    PathTooDeep { depth: usize, limit: usize },
    /// An append marker was walked through while the enclosing container is not a sequence.
    AppendOutsideSequence { found: NodeKind },
    /// A key was walked through while the enclosing container is not a mapping.
    KeyOutsideMapping { segment: String, found: NodeKind },
    /// An append marker with no key to append to (`[]`, `[][x]`).
    MissingArrayKey,
    /// The field name tokenized to nothing.
    EmptyPath,
}

impl WriteConflict {
    /// The path segment the conflict was detected at, in bracket form.
    pub fn segment(&self) -> String {
        match self {
            WriteConflict::ExpectedSequence { segment, .. }
            | WriteConflict::ExpectedMapping { segment, .. }
            | WriteConflict::KeyOutsideMapping { segment, .. } => segment.clone(),
            WriteConflict::IndexOutsideSequence { index, .. }
            | WriteConflict::IndexOutOfRange { index, .. } => format!("[{}]", index),
            WriteConflict::AppendOutsideSequence { .. } | WriteConflict::MissingArrayKey => {
                "[]".to_string()
            }
            WriteConflict::PathTooDeep { .. } | WriteConflict::EmptyPath => String::new(),
        }
    }
}

impl fmt::Display for WriteConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteConflict::ExpectedSequence { segment, found } => write!(
                f,
                "Type conflict at '{}': expected a sequence, found a {}",
                segment, found
            ),
            WriteConflict::ExpectedMapping { segment, found } => write!(
                f,
                "Type conflict at '{}': expected a mapping, found a {}",
                segment, found
            ),
            WriteConflict::IndexOutsideSequence { index, found } => write!(
                f,
                "Index [{}] needs an enclosing sequence, found a {}",
                index, found
            ),
            WriteConflict::IndexOutOfRange { index, limit } => {
                write!(f, "Index [{}] exceeds the largest supported index {}", index, limit)
            }
            WriteConflict::PathTooDeep { depth, limit } => write!(
                f,
                "Field name has {} segments, more than the supported {}",
                depth, limit
            ),
            WriteConflict::AppendOutsideSequence { found } => {
                write!(f, "Append marker needs an enclosing sequence, found a {}", found)
            }
            WriteConflict::KeyOutsideMapping { segment, found } => write!(
                f,
                "Key '{}' needs an enclosing mapping, found a {}",
                segment, found
            ),
            WriteConflict::MissingArrayKey => write!(f, "Append marker has no array key"),
            WriteConflict::EmptyPath => write!(f, "Field name has no path segments"),
        }
    }
}

impl std::error::Error for WriteConflict {}

/// Errors from locating the fields of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// No container with this identifier exists in the document.
    ContainerNotFound(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::ContainerNotFound(id) => {
                write!(f, "Container with id \"{}\" was not found", id)
            }
        }
    }
}

impl std::error::Error for FormError {}
