//! The accumulator for one serialize operation.
//!
//! A `FormTree` owns the root mapping while fields are written into it and is
//! consumed by [`FormTree::into_pruned`] once every field has been seen, so
//! no state carries over between operations.
//!
//! # Example
//!
//! ```
//! use formnest::document::node::Node;
//! use formnest::document::tree::FormTree;
//! use formnest::fieldpath::Tokenizer;
//!
//! let mut tree = FormTree::new();
//! tree.write(&Tokenizer::tokenize("user[name]"), Node::from("Alice")).unwrap();
//! tree.write(&Tokenizer::tokenize("items[3]"), Node::from("x")).unwrap();
//!
//! let data = tree.into_pruned();
//! assert_eq!(data["items"], Node::Sequence(vec![Node::from("x")]));
//! ```

use super::node::{Mapping, Node};
use super::prune::prune_root;
use super::writer;
use crate::error::WriteConflict;
use crate::fieldpath::FieldPath;

/// A result tree under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormTree {
    root: Mapping,
}

impl FormTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the root mapping as written so far, holes included.
    pub fn root(&self) -> &Mapping {
        &self.root
    }

    /// Writes one field value. See [`writer::write`] for the rules.
    pub fn write(&mut self, path: &FieldPath, value: Node) -> Result<(), WriteConflict> {
        writer::write(&mut self.root, path, value)
    }

    /// Number of top-level keys written so far.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Finishes the operation, returning the pruned root.
    pub fn into_pruned(self) -> Mapping {
        prune_root(self.root)
    }
}
