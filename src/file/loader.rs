//! Form document loading functionality.
//!
//! This module provides functions to load form documents from files or stdin.
//! A document is either an object mapping container ids to lists of controls,
//! or a bare list of controls (a single container named
//! [`DEFAULT_CONTAINER`](crate::form::DEFAULT_CONTAINER)). JSON, YAML and JSONL
//! (one control per line) are accepted, optionally gzip-compressed.

use crate::form::{FormDocument, FormElement};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// The two top-level shapes a document may take.
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentShape {
    Elements(Vec<FormElement>),
    Containers(FormDocument),
}

impl From<DocumentShape> for FormDocument {
    fn from(shape: DocumentShape) -> Self {
        match shape {
            DocumentShape::Elements(elements) => FormDocument::single(elements),
            DocumentShape::Containers(document) => document,
        }
    }
}

/// Input encodings, decided from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputFormat {
    Json,
    Jsonl,
    Yaml,
}

/// Loads and parses a form document from the filesystem.
///
/// # Arguments
///
/// * `path` - The path to the document to load
///
/// # Examples
///
/// ```no_run
/// use formnest::file::loader::load_form_file;
///
/// let document = load_form_file("signup.json").unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist
/// - The file cannot be read (permissions, etc.)
/// - The file contents do not describe a form document
pub fn load_form_file<P: AsRef<Path>>(path: P) -> Result<FormDocument> {
    let path_ref = path.as_ref();

    // Check if file is gzipped
    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    // Read content (decompress if needed)
    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref).context("Failed to read file")?
    };

    match determine_format(path_ref) {
        InputFormat::Jsonl => parse_jsonl_content(&content),
        InputFormat::Yaml => parse_yaml_content(&content),
        InputFormat::Json => parse_json_content(&content),
    }
}

/// Loads a form document from standard input.
///
/// Gzip input is detected from its magic bytes. The content is tried as
/// JSON, then JSONL, then YAML.
///
/// # Errors
///
/// This function will return an error if:
/// - Reading from stdin fails
/// - The input is none of the accepted encodings
pub fn load_form_from_stdin() -> Result<FormDocument> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    parse_bytes(buffer)
}

/// Parses raw bytes from an unnamed source, sniffing the encoding.
pub fn parse_bytes(buffer: Vec<u8>) -> Result<FormDocument> {
    // Check for gzip magic bytes (0x1f 0x8b)
    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in input")?
    };

    if let Ok(document) = parse_json_content(&content) {
        return Ok(document);
    }
    if let Ok(document) = parse_jsonl_content(&content) {
        return Ok(document);
    }
    parse_yaml_content(&content)
        .context("Failed to parse input: it is neither JSON, JSONL nor YAML")
}

/// Parses a JSON document.
pub fn parse_json_content(content: &str) -> Result<FormDocument> {
    let shape: DocumentShape =
        serde_json::from_str(content).context("Failed to parse JSON form document")?;
    Ok(shape.into())
}

/// Parses a YAML document.
pub fn parse_yaml_content(content: &str) -> Result<FormDocument> {
    let shape: DocumentShape =
        serde_yaml::from_str(content).context("Failed to parse YAML form document")?;
    Ok(shape.into())
}

/// Parses JSONL content, one control per line, as a single container.
///
/// Blank lines are skipped.
pub fn parse_jsonl_content(content: &str) -> Result<FormDocument> {
    let mut elements = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue; // Skip blank lines
        }

        let element: FormElement = serde_json::from_str(line)
            .with_context(|| format!("Invalid form control on line {}", line_num + 1))?;
        elements.push(element);
    }

    if elements.is_empty() {
        anyhow::bail!("No form controls found in JSONL content");
    }

    Ok(FormDocument::single(elements))
}

/// Determines the input format based on filename.
///
/// Handles a trailing .gz suffix. Examples:
/// - `form.jsonl` → JSONL
/// - `form.yaml.gz` → YAML
/// - `form.json` → JSON
fn determine_format<P: AsRef<Path>>(path: P) -> InputFormat {
    let path_str = path.as_ref().to_string_lossy();

    // Remove .gz suffix if present
    let base = if let Some(stripped) = path_str.strip_suffix(".gz") {
        stripped
    } else {
        &path_str
    };

    if base.ends_with(".jsonl") || base.ends_with(".ndjson") {
        InputFormat::Jsonl
    } else if base.ends_with(".yaml") || base.ends_with(".yml") {
        InputFormat::Yaml
    } else {
        InputFormat::Json
    }
}

/// Reads and decompresses a gzipped file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid gzip format (corrupted)
/// - The decompressed content is not valid UTF-8
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::DEFAULT_CONTAINER;

    #[test]
    fn test_parse_json_containers() {
        let content = r#"{"signup": [{"name": "email", "value": "a@b.c"}]}"#;
        let document = parse_json_content(content).unwrap();
        assert_eq!(document.ids().collect::<Vec<_>>(), vec!["signup"]);
    }

    #[test]
    fn test_parse_json_bare_list() {
        let content = r#"[{"name": "a"}, {"name": "b", "type": "checkbox"}]"#;
        let document = parse_json_content(content).unwrap();
        assert_eq!(document.container(DEFAULT_CONTAINER).map(|c| c.len()), Some(2));
    }

    #[test]
    fn test_parse_jsonl_content_skips_blank_lines() {
        let content = "{\"name\":\"a\"}\n\n{\"name\":\"b\"}\n";
        let document = parse_jsonl_content(content).unwrap();
        assert_eq!(document.container(DEFAULT_CONTAINER).map(|c| c.len()), Some(2));
    }

    #[test]
    fn test_parse_jsonl_reports_line() {
        let err = parse_jsonl_content("{\"name\":\"a\"}\nnot json").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_jsonl_empty_fails() {
        assert!(parse_jsonl_content("\n\n").is_err());
    }

    #[test]
    fn test_parse_yaml() {
        let content = "main:\n  - name: a\n    value: '1'\n    class: format-float\n";
        let document = parse_yaml_content(content).unwrap();
        let elements = document.container("main").unwrap();
        assert_eq!(elements[0].classes, vec!["format-float"]);
    }

    #[test]
    fn test_parse_bytes_sniffs_jsonl() {
        let bytes = b"{\"name\":\"a\"}\n{\"name\":\"b\"}\n".to_vec();
        let document = parse_bytes(bytes).unwrap();
        assert_eq!(document.container(DEFAULT_CONTAINER).map(|c| c.len()), Some(2));
    }

    #[test]
    fn test_determine_format() {
        assert_eq!(determine_format("a.jsonl"), InputFormat::Jsonl);
        assert_eq!(determine_format("a.ndjson.gz"), InputFormat::Jsonl);
        assert_eq!(determine_format("a.yml"), InputFormat::Yaml);
        assert_eq!(determine_format("a.json.gz"), InputFormat::Json);
        assert_eq!(determine_format("a"), InputFormat::Json);
    }
}
