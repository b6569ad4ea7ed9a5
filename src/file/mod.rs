//! File I/O operations for form documents and results.
//!
//! This module provides functionality to load form documents from disk or stdin,
//! and save serialized results back to files with atomic write operations and
//! optional backups.

pub mod loader;
pub mod saver;
