//! Result rendering and saving.
//!
//! This module renders serialized mappings as JSON or YAML and writes them
//! to files with atomic write operations and optional backups.

use crate::config::{Config, OutputFormat};
use crate::document::node::Mapping;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Renders a mapping in the configured output format.
///
/// JSON is pretty-printed with `config.indent_size` spaces; both formats end
/// with a newline.
///
/// # Examples
///
/// ```
/// use formnest::config::Config;
/// use formnest::document::node::{Mapping, Node};
/// use formnest::file::saver::render;
///
/// let mut data = Mapping::new();
/// data.insert("a".to_string(), Node::from("x"));
/// assert_eq!(render(&data, &Config::default()).unwrap(), "{\n  \"a\": \"x\"\n}\n");
/// ```
pub fn render(data: &Mapping, config: &Config) -> Result<String> {
    let mut output = match config.output_format {
        OutputFormat::Json => render_json(data, config.indent_size)?,
        OutputFormat::Yaml => serde_yaml::to_string(data).context("Failed to render YAML")?,
    };
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn render_json(data: &Mapping, indent_size: usize) -> Result<String> {
    let indent = " ".repeat(indent_size);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    data.serialize(&mut serializer)
        .context("Failed to render JSON")?;
    String::from_utf8(buffer).context("Rendered JSON is not UTF-8")
}

/// Saves a serialized mapping to a file.
///
/// The write is atomic (temp file then rename). A target ending in `.gz` is
/// gzip-compressed. With `config.create_backup`, an existing target is first
/// copied to `<name>.bak`.
///
/// # Examples
///
/// ```no_run
/// use formnest::config::Config;
/// use formnest::document::node::Mapping;
/// use formnest::file::saver::save_result;
///
/// save_result("output.json", &Mapping::new(), &Config::default()).unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - Rendering fails
/// - Backup creation fails (if requested)
/// - Writing the temp file or renaming it fails
pub fn save_result<P: AsRef<Path>>(path: P, data: &Mapping, config: &Config) -> Result<()> {
    let path = path.as_ref();

    // Determine if we should compress based on target filename
    let should_compress = path.to_string_lossy().ends_with(".gz");

    // Create backup if requested and file exists
    if config.create_backup && path.exists() {
        create_backup(path)?;
    }

    let output = render(data, config)?;
    write_file_atomic(path, output.as_bytes(), should_compress)?;

    Ok(())
}

/// Creates a backup of a file by copying it with a .bak extension.
fn create_backup<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut backup_path = path.to_path_buf();
    let original_name = backup_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?;
    backup_path.set_file_name(format!("{}.bak", original_name));
    fs::copy(path, backup_path).context("Failed to create backup")?;
    Ok(())
}

/// Writes data to a file atomically, optionally compressing with gzip.
///
/// # Errors
///
/// Returns an error if:
/// - Creating the temp file fails
/// - Writing or compressing fails
/// - Renaming the temp file fails
fn write_file_atomic<P: AsRef<Path>>(path: P, data: &[u8], compress: bool) -> Result<()> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let path = path.as_ref();
    let temp_path = path.with_extension("tmp");

    if compress {
        let file = fs::File::create(&temp_path).context("Failed to create temp file")?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(data)
            .context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?;
    } else {
        fs::write(&temp_path, data).context("Failed to write temp file")?;
    }

    // Atomic rename
    fs::rename(&temp_path, path).context("Failed to rename temp file")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::Node;

    fn sample() -> Mapping {
        let mut data = Mapping::new();
        data.insert(
            "tags".to_string(),
            Node::Sequence(vec![Node::from("a"), Node::from("b")]),
        );
        data
    }

    #[test]
    fn test_render_json_indent() {
        let config = Config {
            indent_size: 4,
            ..Config::default()
        };
        let output = render(&sample(), &config).unwrap();
        assert_eq!(output, "{\n    \"tags\": [\n        \"a\",\n        \"b\"\n    ]\n}\n");
    }

    #[test]
    fn test_render_yaml() {
        let config = Config {
            output_format: OutputFormat::Yaml,
            ..Config::default()
        };
        let output = render(&sample(), &config).unwrap();
        assert_eq!(output, "tags:\n- a\n- b\n");
    }

    #[test]
    fn test_render_empty_json() {
        assert_eq!(render(&Mapping::new(), &Config::default()).unwrap(), "{}\n");
    }
}
