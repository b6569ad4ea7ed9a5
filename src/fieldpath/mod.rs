//! Bracket-notation field names and their tokenizer.
//!
//! Form controls name their values with a small path language. This module
//! turns such names into a [`FieldPath`] that the document writer can walk.
//!
//! # Supported Syntax
//!
//! - `name` - Plain key
//! - `a.b.c` - Dotted keys
//! - `a[b]` - Named nested key
//! - `a[0]` - Explicit sequence position
//! - `a[]` - Append to the enclosing sequence
//! - `a[][field]` - New object appended to `a` for each occurrence
//!
//! # Examples
//!
//! ```
//! use formnest::fieldpath::{PathSegment, Tokenizer};
//!
//! let path = Tokenizer::tokenize("media[][type]");
//! assert_eq!(
//!     path.segments(),
//!     &[
//!         PathSegment::Key("media".to_string()),
//!         PathSegment::Append,
//!         PathSegment::Key("type".to_string()),
//!     ]
//! );
//! ```

pub mod ast;
pub mod tokenizer;

pub use ast::{FieldPath, PathSegment};
pub use tokenizer::Tokenizer;
