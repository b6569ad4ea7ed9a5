//! Removal of empty branches from a finished tree.
//!
//! Pruning runs depth-first. Scalars always survive, including empty
//! strings. Absent slots are dropped, and a sequence or mapping left with no
//! children after its own children were pruned becomes absent itself.

use super::node::{Mapping, Node};

/// Prunes a node, returning [`Node::Absent`] when nothing survives.
///
/// Relative order of surviving sequence items and mapping keys is kept.
/// Pruning an already pruned node returns it unchanged.
pub fn prune(node: Node) -> Node {
    match node {
        Node::Scalar(value) => Node::Scalar(value),
        Node::Sequence(items) => {
            let kept: Vec<Node> = items
                .into_iter()
                .map(prune)
                .filter(|item| !item.is_absent())
                .collect();
            if kept.is_empty() {
                Node::Absent
            } else {
                Node::Sequence(kept)
            }
        }
        Node::Mapping(entries) => {
            let kept = prune_entries(entries);
            if kept.is_empty() {
                Node::Absent
            } else {
                Node::Mapping(kept)
            }
        }
        Node::Absent => Node::Absent,
    }
}

/// Prunes a root mapping.
///
/// Unlike [`prune`] this never reports absence: a root with nothing left is
/// an empty mapping.
pub fn prune_root(root: Mapping) -> Mapping {
    prune_entries(root)
}

fn prune_entries(entries: Mapping) -> Mapping {
    entries
        .into_iter()
        .map(|(key, value)| (key, prune(value)))
        .filter(|(_, value)| !value.is_absent())
        .collect()
}
