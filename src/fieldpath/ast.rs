//! Segment types for tokenized field names.

use std::fmt;

/// One unit of a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Named property (`name`, `.name`, `[name]`)
    Key(String),
    /// Explicit sequence position (`[0]`)
    Index(usize),
    /// Push to the end of the enclosing sequence (`[]`)
    Append,
}

impl PathSegment {
    /// Returns true if the segment addresses a sequence slot.
    ///
    /// A non-terminal segment followed by one of these resolves to a sequence.
    pub fn wants_sequence(&self) -> bool {
        matches!(self, PathSegment::Index(_) | PathSegment::Append)
    }

    /// Returns the mapping key this segment stands for, if it has one.
    ///
    /// Indices double as keys when they land in a mapping (`"0"`), the append
    /// marker never does.
    pub fn as_key(&self) -> Option<String> {
        match self {
            PathSegment::Key(key) => Some(key.clone()),
            PathSegment::Index(index) => Some(index.to_string()),
            PathSegment::Append => None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
            PathSegment::Append => write!(f, "[]"),
        }
    }
}

/// A tokenized field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates a path from already tokenized segments.
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Segments from the outermost key to the terminal position.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segment the value is written at.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Splits an `items[][field]` path into its array key and field name.
    ///
    /// Matches paths with at least three segments whose terminal segment is
    /// a key directly preceded by an append marker; the array key is the
    /// segment two before the terminal one.
    pub fn object_in_array(&self) -> Option<(&PathSegment, &str)> {
        let n = self.segments.len();
        if n < 3 {
            return None;
        }
        match (&self.segments[n - 2], &self.segments[n - 1]) {
            (PathSegment::Append, PathSegment::Key(field)) => Some((&self.segments[n - 3], field.as_str())),
            _ => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i > 0 => write!(f, "[{}]", key)?,
                other => write!(f, "{}", other)?,
            }
        }
        Ok(())
    }
}
