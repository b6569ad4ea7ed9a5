//! Form documents and the serialize operation.
//!
//! - [`element`]: form controls, containers, and field tuples
//! - [`collector`]: which controls of a container contribute fields
//! - [`serializer`]: tokenize, normalize, write, prune

pub mod collector;
pub mod element;
pub mod serializer;

pub use collector::{collect, collect_elements};
pub use element::{ElementKind, FieldTuple, FormDocument, FormElement, DEFAULT_CONTAINER};
pub use serializer::{serialize, Diagnostic, FormSerializer, Serialized};
