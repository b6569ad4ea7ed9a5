//! Node representation for nested form data.
//!
//! Every value collected from a form ends up as a [`Node`]: a string scalar, an
//! ordered sequence, a string-keyed mapping, or an absent slot. Absent slots
//! appear as holes in sparsely indexed sequences (`items[3]` written before
//! `items[0]`) and as values dropped by normalization; pruning removes them.
//!
//! Container kinds only change through [`promote_to_sequence`],
//! [`promote_to_mapping`] and [`claim_sequence`].
//!
//! # Example
//!
//! ```
//! use formnest::document::node::{Mapping, Node};
//!
//! let mut row = Mapping::new();
//! row.insert("type".to_string(), Node::from("video"));
//!
//! let media = Node::Sequence(vec![Node::Mapping(row)]);
//! assert!(media.is_sequence());
//! assert_eq!(media.kind().to_string(), "sequence");
//! ```

use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};
use std::fmt;

/// A string-keyed mapping that keeps first-insertion order.
pub type Mapping = IndexMap<String, Node>;

/// A value in the nested result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A leaf value
    Scalar(String),
    /// An ordered list
    Sequence(Vec<Node>),
    /// Key/value pairs
    Mapping(Mapping),
    /// A hole or a value dropped before writing
    Absent,
}

/// The shape of a node, used in diagnostics and conflict checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Scalar,
    Sequence,
    Mapping,
    Absent,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Scalar => "scalar",
            NodeKind::Sequence => "sequence",
            NodeKind::Mapping => "mapping",
            NodeKind::Absent => "absent",
        };
        write!(f, "{}", name)
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Scalar(_) => NodeKind::Scalar,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Mapping(_) => NodeKind::Mapping,
            Node::Absent => NodeKind::Absent,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Node::Scalar(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Node::Sequence(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Node::Mapping(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Node::Absent)
    }

    /// Returns the scalar text, if this node is a scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up a key in a mapping node.
    ///
    /// Returns `None` for missing keys and for non-mapping nodes.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries.get(key),
            _ => None,
        }
    }

    /// Looks up a position in a sequence node.
    pub fn at(&self, index: usize) -> Option<&Node> {
        match self {
            Node::Sequence(items) => items.get(index),
            _ => None,
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Scalar(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Scalar(value)
    }
}

impl From<Mapping> for Node {
    fn from(entries: Mapping) -> Self {
        Node::Mapping(entries)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Sequence(items)
    }
}

/// Makes `node` a sequence without discarding data, returning its items.
///
/// Sequences are left alone, an absent slot becomes an empty sequence, and a
/// scalar becomes the single item of a new sequence. A mapping is left
/// untouched and `None` is returned.
pub fn promote_to_sequence(node: &mut Node) -> Option<&mut Vec<Node>> {
    if node.is_absent() {
        *node = Node::Sequence(Vec::new());
    } else if node.is_scalar() {
        let scalar = std::mem::replace(node, Node::Absent);
        *node = Node::Sequence(vec![scalar]);
    }
    match node {
        Node::Sequence(items) => Some(items),
        _ => None,
    }
}

/// Makes `node` a mapping when that loses nothing.
///
/// Mappings are left alone and absent slots become empty mappings. Scalars
/// and sequences cannot be keyed without inventing names, so they are left
/// untouched and `None` is returned.
pub fn promote_to_mapping(node: &mut Node) -> Option<&mut Mapping> {
    if node.is_absent() {
        *node = Node::Mapping(Mapping::new());
    }
    match node {
        Node::Mapping(entries) => Some(entries),
        _ => None,
    }
}

/// Gives access to `node` as a sequence without coercing other shapes.
///
/// Absent slots become empty sequences; scalars and mappings yield `None`.
pub fn claim_sequence(node: &mut Node) -> Option<&mut Vec<Node>> {
    if node.is_absent() {
        *node = Node::Sequence(Vec::new());
    }
    match node {
        Node::Sequence(items) => Some(items),
        _ => None,
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Scalar(s) => serializer.serialize_str(s),
            Node::Sequence(items) => serializer.collect_seq(items),
            Node::Mapping(entries) => serializer.collect_map(entries),
            Node::Absent => serializer.serialize_unit(),
        }
    }
}
