//! The serialize operation: fields in, nested mapping out.
//!
//! Each field name is tokenized, its value normalized, and the result written
//! into a fresh [`FormTree`]; once every field has been consumed the tree is
//! pruned. Problems never abort the operation. Type conflicts skip the one
//! field involved, a missing container yields an empty mapping, and both are
//! logged and returned as [`Diagnostic`]s.

use super::collector::collect;
use super::element::{FieldTuple, FormDocument};
use crate::config::Config;
use crate::document::node::{Mapping, Node};
use crate::document::tree::FormTree;
use crate::error::{FormError, WriteConflict};
use crate::fieldpath::Tokenizer;
use crate::normalize::Normalizer;
use std::fmt;

/// Something that went wrong during one serialize operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A field was skipped because its path clashed with existing data.
    TypeConflict {
        field: String,
        conflict: WriteConflict,
    },
    /// The requested container does not exist.
    ContainerNotFound { id: String },
}

impl Diagnostic {
    /// Returns true for diagnostics that emptied the whole result.
    pub fn is_error(&self) -> bool {
        matches!(self, Diagnostic::ContainerNotFound { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::TypeConflict { field, conflict } => {
                write!(f, "Skipped field \"{}\": {}", field, conflict)
            }
            Diagnostic::ContainerNotFound { id } => {
                write!(f, "{}", FormError::ContainerNotFound(id.clone()))
            }
        }
    }
}

/// The outcome of one serialize operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Serialized {
    /// The pruned result; empty when nothing survived.
    pub data: Mapping,
    /// Everything that was skipped, in input order.
    pub diagnostics: Vec<Diagnostic>,
}

impl Serialized {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Serializes field tuples into nested mappings.
#[derive(Debug)]
pub struct FormSerializer {
    normalizer: Normalizer,
    drop_empty_values: bool,
}

impl Default for FormSerializer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl FormSerializer {
    /// Creates a serializer with the default normalization rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a serializer whose rules and empty-value handling follow `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            normalizer: Normalizer::from_config(config),
            drop_empty_values: config.drop_empty_values,
        }
    }

    /// Replaces the normalization rules.
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// When set, fields whose normalized value is empty are skipped and
    /// leave the tree untouched.
    pub fn drop_empty_values(mut self, drop: bool) -> Self {
        self.drop_empty_values = drop;
        self
    }

    /// Serializes an ordered sequence of fields.
    ///
    /// # Example
    ///
    /// ```
    /// use formnest::form::{FieldTuple, FormSerializer};
    ///
    /// let result = FormSerializer::new().serialize(vec![
    ///     FieldTuple::new("tag", "a"),
    ///     FieldTuple::new("tag", "b"),
    /// ]);
    /// assert_eq!(serde_json::to_string(&result.data).unwrap(), r#"{"tag":["a","b"]}"#);
    /// ```
    pub fn serialize<I>(&self, fields: I) -> Serialized
    where
        I: IntoIterator<Item = FieldTuple>,
    {
        let mut tree = FormTree::new();
        let mut diagnostics = Vec::new();

        for field in fields {
            let path = Tokenizer::tokenize(&field.name);
            let value = self.normalizer.normalize(&field.value, &field.classes);
            if self.drop_empty_values && value.is_empty() {
                tracing::debug!(field = %field.name, "dropping empty value");
                continue;
            }

            tracing::debug!(field = %field.name, path = %path, kind = ?field.kind, "writing field");

            if let Err(conflict) = tree.write(&path, Node::Scalar(value)) {
                tracing::warn!(
                    field = %field.name,
                    segment = %conflict.segment(),
                    "{}; field skipped",
                    conflict
                );
                diagnostics.push(Diagnostic::TypeConflict {
                    field: field.name,
                    conflict,
                });
            }
        }

        Serialized {
            data: tree.into_pruned(),
            diagnostics,
        }
    }

    /// Collects and serializes the fields of one container of `document`.
    ///
    /// A missing container yields an empty mapping and a
    /// [`Diagnostic::ContainerNotFound`].
    pub fn serialize_container(&self, document: &FormDocument, id: &str) -> Serialized {
        match collect(document, id) {
            Ok(fields) => self.serialize(fields),
            Err(err) => {
                tracing::error!(container = id, "{}", err);
                Serialized {
                    data: Mapping::new(),
                    diagnostics: vec![Diagnostic::ContainerNotFound { id: id.to_string() }],
                }
            }
        }
    }
}

/// Serializes fields with the default settings, returning only the mapping.
pub fn serialize<I>(fields: I) -> Mapping
where
    I: IntoIterator<Item = FieldTuple>,
{
    FormSerializer::new().serialize(fields).data
}
