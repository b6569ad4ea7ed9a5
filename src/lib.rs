//! formnest turns flat, bracket-named form fields into nested data.
//!
//! Field names follow the convention HTML forms use: `user[name]`,
//! `items[0]`, `tags[]`, `media[][type]`. Each `(name, value)` pair is
//! written into a nested mapping of sequences and mappings, values are
//! normalized according to the field's classes, and empty branches are
//! pruned at the end.
//!
//! # Example
//!
//! ```
//! use formnest::form::{serialize, FieldTuple};
//!
//! let data = serialize(vec![
//!     FieldTuple::new("user[name]", "Ana"),
//!     FieldTuple::new("colors[]", "red"),
//!     FieldTuple::new("colors[]", "blue"),
//! ]);
//!
//! assert_eq!(
//!     serde_json::to_string(&data).unwrap(),
//!     r#"{"user":{"name":"Ana"},"colors":["red","blue"]}"#
//! );
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod fieldpath;
pub mod file;
pub mod form;
pub mod normalize;

pub use document::node::{Mapping, Node};
pub use error::{FormError, WriteConflict};
pub use form::{serialize, FieldTuple, FormSerializer, Serialized};
