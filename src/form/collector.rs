//! Turns the controls of a container into field tuples.
//!
//! Mirrors what a browser submits: unnamed controls and unchecked
//! checkboxes are skipped, and of each group of same-named radio buttons
//! only the first checked one is kept.

use super::element::{FieldTuple, FormDocument, FormElement};
use crate::error::FormError;
use std::collections::HashSet;

/// Collects the fields of container `id`.
///
/// # Errors
///
/// Returns [`FormError::ContainerNotFound`] if the document has no such container.
pub fn collect(document: &FormDocument, id: &str) -> Result<Vec<FieldTuple>, FormError> {
    document
        .container(id)
        .map(collect_elements)
        .ok_or_else(|| FormError::ContainerNotFound(id.to_string()))
}

/// Collects the fields of a list of controls, in order.
pub fn collect_elements(elements: &[FormElement]) -> Vec<FieldTuple> {
    let mut radios_seen: HashSet<&str> = HashSet::new();
    let mut fields = Vec::new();

    for element in elements {
        if element.name.is_empty() {
            continue;
        }
        if element.is_checkbox() && !element.checked {
            continue;
        }
        if element.is_radio() && (!element.checked || !radios_seen.insert(&element.name)) {
            continue;
        }
        fields.push(element.to_field());
    }

    fields
}
