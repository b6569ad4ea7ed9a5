//! Writes one field value into the nested result.
//!
//! The writer walks a [`FieldPath`] from the root mapping, creating the
//! containers the path asks for, and stores the value at the terminal
//! segment. The kind of container created for a segment is decided by the
//! segment that follows it: an index or append marker asks for a sequence,
//! a key asks for a mapping.
//!
//! # Terminal writes
//!
//! - `a[]`: appends to the sequence at `a`, wrapping an existing scalar first.
//!   A mapping at `a` is a conflict.
//! - `a[3]`: sets position 3, padding the sequence with absent holes.
//! - `a[][field]`: appends a new `{ field: value }` mapping to the sequence
//!   under `a` in the root mapping.
//! - `a`: sets the key, or turns an existing scalar into a sequence and
//!   appends, so repeated names collect all their values. A mapping at `a`
//!   is a conflict.
//!
//! # Conflicts
//!
//! When an existing entry has the wrong kind for the path, the write is
//! abandoned with a [`WriteConflict`]. Conflicts are only ever found on
//! entries that already existed; anything the writer creates is fresh and
//! empty below it, so a failed write leaves the tree as it was. The one
//! exception is a shorthand whose own walk creates a mapping under the array
//! key (`b[x][][c]`); the empty containers it leaves are removed by pruning.
//!
//! Paths longer than [`MAX_PATH_DEPTH`] segments and indices above
//! [`MAX_SEQUENCE_INDEX`] are refused before anything is touched.

use super::node::{claim_sequence, promote_to_mapping, promote_to_sequence, Mapping, Node, NodeKind};
use crate::error::WriteConflict;
use crate::fieldpath::{FieldPath, PathSegment};

/// Largest sequence position a field name may address.
pub const MAX_SEQUENCE_INDEX: usize = 65_535;

/// Largest number of segments a field name may have.
pub const MAX_PATH_DEPTH: usize = 64;

/// A container the walk is currently positioned in.
enum Container<'a> {
    Mapping(&'a mut Mapping),
    Sequence(&'a mut Vec<Node>),
}

impl<'a> Container<'a> {
    fn kind(&self) -> NodeKind {
        match self {
            Container::Mapping(_) => NodeKind::Mapping,
            Container::Sequence(_) => NodeKind::Sequence,
        }
    }

    /// Returns the child slot `segment` addresses, making room for it.
    ///
    /// Missing mapping keys and sequence positions come back as
    /// [`Node::Absent`]; an append marker reserves a new slot at the end.
    fn slot(self, segment: &PathSegment) -> Result<&'a mut Node, WriteConflict> {
        match (self, segment) {
            (Container::Mapping(entries), PathSegment::Key(key)) => {
                Ok(entries.entry(key.clone()).or_insert(Node::Absent))
            }
            (Container::Mapping(entries), PathSegment::Index(index)) => {
                Ok(entries.entry(index.to_string()).or_insert(Node::Absent))
            }
            (Container::Mapping(_), PathSegment::Append) => {
                Err(WriteConflict::AppendOutsideSequence {
                    found: NodeKind::Mapping,
                })
            }
            (Container::Sequence(items), PathSegment::Index(index)) => Ok(position(items, *index)),
            (Container::Sequence(items), PathSegment::Append) => {
                let end = items.len();
                items.push(Node::Absent);
                Ok(&mut items[end])
            }
            (Container::Sequence(_), PathSegment::Key(key)) => Err(WriteConflict::KeyOutsideMapping {
                segment: key.clone(),
                found: NodeKind::Sequence,
            }),
        }
    }
}

/// Returns sequence position `index`, padding with absent holes.
fn position(items: &mut Vec<Node>, index: usize) -> &mut Node {
    if items.len() <= index {
        items.resize(index + 1, Node::Absent);
    }
    &mut items[index]
}

/// Enters the container stored in `slot`, creating it when the slot is empty.
///
/// `next` is the segment after `segment`; it decides whether a sequence or
/// a mapping is required.
fn descend<'a>(
    slot: &'a mut Node,
    segment: &PathSegment,
    next: &PathSegment,
) -> Result<Container<'a>, WriteConflict> {
    let found = slot.kind();
    if next.wants_sequence() {
        claim_sequence(slot)
            .map(Container::Sequence)
            .ok_or_else(|| WriteConflict::ExpectedSequence {
                segment: segment.to_string(),
                found,
            })
    } else {
        promote_to_mapping(slot)
            .map(Container::Mapping)
            .ok_or_else(|| WriteConflict::ExpectedMapping {
                segment: segment.to_string(),
                found,
            })
    }
}

/// Walks the first `depth` segments as intermediate containers.
fn walk<'a>(
    root: &'a mut Mapping,
    segments: &[PathSegment],
    depth: usize,
) -> Result<Container<'a>, WriteConflict> {
    let mut current = Container::Mapping(root);
    for i in 0..depth {
        let slot = current.slot(&segments[i])?;
        current = descend(slot, &segments[i], &segments[i + 1])?;
    }
    Ok(current)
}

/// Turns `slot` into a sequence for appending; a mapping there is a conflict.
fn extend_sequence<'a>(
    slot: &'a mut Node,
    segment: &PathSegment,
) -> Result<&'a mut Vec<Node>, WriteConflict> {
    let found = slot.kind();
    promote_to_sequence(slot).ok_or_else(|| WriteConflict::ExpectedSequence {
        segment: segment.to_string(),
        found,
    })
}

/// Writes `value` at `path` inside `root`.
///
/// On conflict the value is not written. See the module docs for the one
/// case that leaves empty containers behind.
///
/// # Example
///
/// ```
/// use formnest::document::node::{Mapping, Node};
/// use formnest::document::writer::write;
/// use formnest::fieldpath::Tokenizer;
///
/// let mut root = Mapping::new();
/// write(&mut root, &Tokenizer::tokenize("colors[]"), Node::from("red")).unwrap();
/// write(&mut root, &Tokenizer::tokenize("colors[]"), Node::from("blue")).unwrap();
///
/// let colors = root.get("colors").unwrap();
/// assert_eq!(colors.at(1).and_then(Node::as_str), Some("blue"));
/// ```
pub fn write(root: &mut Mapping, path: &FieldPath, value: Node) -> Result<(), WriteConflict> {
    let segments = path.segments();
    let n = segments.len();
    let last = segments.last().ok_or(WriteConflict::EmptyPath)?;

    if n > MAX_PATH_DEPTH {
        return Err(WriteConflict::PathTooDeep {
            depth: n,
            limit: MAX_PATH_DEPTH,
        });
    }

    if let Some(index) = segments.iter().find_map(|segment| match segment {
        PathSegment::Index(index) if *index > MAX_SEQUENCE_INDEX => Some(*index),
        _ => None,
    }) {
        return Err(WriteConflict::IndexOutOfRange {
            index,
            limit: MAX_SEQUENCE_INDEX,
        });
    }

    if let Some((array_segment, field)) = path.object_in_array() {
        let array_key = array_segment
            .as_key()
            .ok_or(WriteConflict::MissingArrayKey)?;
        if let Some(existing @ Node::Mapping(_)) = root.get(&array_key) {
            return Err(WriteConflict::ExpectedSequence {
                segment: array_segment.to_string(),
                found: existing.kind(),
            });
        }
        walk(root, segments, n - 2)?;

        let mut row = Mapping::new();
        row.insert(field.to_string(), value);
        let slot = root.entry(array_key).or_insert(Node::Absent);
        extend_sequence(slot, array_segment)?.push(Node::Mapping(row));
        return Ok(());
    }

    match last {
        PathSegment::Append => {
            if n < 2 {
                return Err(WriteConflict::MissingArrayKey);
            }
            let container = walk(root, segments, n - 2)?;
            let slot = container.slot(&segments[n - 2])?;
            extend_sequence(slot, &segments[n - 2])?.push(value);
        }
        PathSegment::Index(index) => match walk(root, segments, n - 1)? {
            Container::Sequence(items) => *position(items, *index) = value,
            other => {
                return Err(WriteConflict::IndexOutsideSequence {
                    index: *index,
                    found: other.kind(),
                })
            }
        },
        PathSegment::Key(_) => {
            let container = walk(root, segments, n - 1)?;
            let slot = container.slot(last)?;
            if slot.is_absent() {
                *slot = value;
            } else {
                extend_sequence(slot, last)?.push(value);
            }
        }
    }

    Ok(())
}
