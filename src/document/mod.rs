//! Nested result documents.
//!
//! [`node`] defines the value type, [`writer`] places one field into a tree,
//! [`prune`] strips empty branches, and [`tree`] ties them together for one
//! serialize operation.

pub mod node;
pub mod prune;
pub mod tree;
pub mod writer;
