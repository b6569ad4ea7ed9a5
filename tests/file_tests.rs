//! Integration tests for loading form documents and saving results.

use formnest::config::{Config, OutputFormat};
use formnest::file::loader::{load_form_file, parse_bytes};
use formnest::file::saver::save_result;
use formnest::form::{FormSerializer, DEFAULT_CONTAINER};
use serde_json::json;
use std::fs;
use std::io::{Read, Write};
use tempfile::{NamedTempFile, TempDir};

const SIGNUP: &str = r#"{
    "signup": [
        {"name": "user[email]", "value": "ana@example.com", "type": "email"},
        {"name": "user[plan]", "value": "free", "type": "radio"},
        {"name": "user[plan]", "value": "pro", "type": "radio", "checked": true},
        {"name": "topics[]", "value": "rust", "type": "checkbox", "checked": true},
        {"name": "topics[]", "value": "go", "type": "checkbox"},
        {"name": "budget", "value": "1,500", "class": "form-control format-float"},
        {"value": "ignored"}
    ],
    "newsletter": [
        {"name": "email", "value": "b@example.com"}
    ]
}"#;

#[test]
fn test_load_and_serialize_json_file() {
    let mut temp_file = NamedTempFile::with_suffix(".json").unwrap();
    write!(temp_file, "{}", SIGNUP).unwrap();

    let document = load_form_file(temp_file.path()).unwrap();
    assert_eq!(document.ids().collect::<Vec<_>>(), vec!["signup", "newsletter"]);

    let result = FormSerializer::new().serialize_container(&document, "signup");
    assert_eq!(
        serde_json::to_value(&result.data).unwrap(),
        json!({
            "user": {"email": "ana@example.com", "plan": "pro"},
            "topics": ["rust"],
            "budget": "1500"
        })
    );
    assert!(!result.has_diagnostics());
}

#[test]
fn test_load_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("form.yaml");
    fs::write(
        &path,
        "- name: when\n  value: 01/02/2023 12:05 am\n  class: format-date\n- name: tags[]\n  value: a\n",
    )
    .unwrap();

    let document = load_form_file(&path).unwrap();
    let result = FormSerializer::new().serialize_container(&document, DEFAULT_CONTAINER);
    assert_eq!(
        serde_json::to_value(&result.data).unwrap(),
        json!({"when": "2023-02-01 00:05", "tags": ["a"]})
    );
}

#[test]
fn test_load_jsonl_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("form.jsonl");
    fs::write(
        &path,
        "{\"name\":\"media[][type]\",\"value\":\"video\"}\n{\"name\":\"media[][type]\",\"value\":\"audio\"}\n",
    )
    .unwrap();

    let document = load_form_file(&path).unwrap();
    let result = FormSerializer::new().serialize_container(&document, DEFAULT_CONTAINER);
    assert_eq!(
        serde_json::to_value(&result.data).unwrap(),
        json!({"media": [{"type": "video"}, {"type": "audio"}]})
    );
}

#[test]
fn test_load_gzipped_file() {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("form.json.gz");
    let mut encoder = GzEncoder::new(fs::File::create(&path).unwrap(), Compression::default());
    encoder.write_all(SIGNUP.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let document = load_form_file(&path).unwrap();
    assert_eq!(document.container("newsletter").map(|c| c.len()), Some(1));
}

#[test]
fn test_parse_bytes_detects_gzip() {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(b"[{\"name\": \"a\", \"value\": \"1\"}]").unwrap();
    let bytes = encoder.finish().unwrap();

    let document = parse_bytes(bytes).unwrap();
    assert_eq!(document.container(DEFAULT_CONTAINER).map(|c| c.len()), Some(1));
}

#[test]
fn test_load_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    assert!(load_form_file(dir.path().join("missing.json")).is_err());
}

#[test]
fn test_load_malformed_file_fails() {
    let mut temp_file = NamedTempFile::with_suffix(".json").unwrap();
    write!(temp_file, "{{not json").unwrap();
    assert!(load_form_file(temp_file.path()).is_err());
}

#[test]
fn test_missing_container_yields_empty_result() {
    let mut temp_file = NamedTempFile::with_suffix(".json").unwrap();
    write!(temp_file, "{}", SIGNUP).unwrap();

    let document = load_form_file(temp_file.path()).unwrap();
    let result = FormSerializer::new().serialize_container(&document, "checkout");
    assert!(result.data.is_empty());
    assert!(result.diagnostics.iter().any(|d| d.is_error()));
}

#[test]
fn test_save_json_result() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");
    let data = formnest::serialize(vec![formnest::FieldTuple::new("a[b]", "x")]);

    save_result(&path, &data, &Config::default()).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, "{\n  \"a\": {\n    \"b\": \"x\"\n  }\n}\n");
    assert!(!dir.path().join("out.tmp").exists());
}

#[test]
fn test_save_yaml_result() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.yaml");
    let data = formnest::serialize(vec![formnest::FieldTuple::new("tags[]", "a")]);
    let config = Config {
        output_format: OutputFormat::Yaml,
        ..Config::default()
    };

    save_result(&path, &data, &config).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "tags:\n- a\n");
}

#[test]
fn test_save_gzipped_result() {
    use flate2::read::GzDecoder;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json.gz");
    let data = formnest::serialize(vec![formnest::FieldTuple::new("a", "1")]);

    save_result(&path, &data, &Config::default()).unwrap();

    let mut decoder = GzDecoder::new(fs::File::open(&path).unwrap());
    let mut content = String::new();
    decoder.read_to_string(&mut content).unwrap();
    assert_eq!(content, "{\n  \"a\": \"1\"\n}\n");
}

#[test]
fn test_save_creates_backup() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");
    fs::write(&path, "previous").unwrap();

    let config = Config {
        create_backup: true,
        ..Config::default()
    };
    let data = formnest::serialize(vec![formnest::FieldTuple::new("a", "1")]);
    save_result(&path, &data, &config).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("out.json.bak")).unwrap(),
        "previous"
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\n  \"a\": \"1\"\n}\n");
}

#[test]
fn test_save_without_backup() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");
    fs::write(&path, "previous").unwrap();

    let data = formnest::serialize(vec![formnest::FieldTuple::new("a", "1")]);
    save_result(&path, &data, &Config::default()).unwrap();

    assert!(!dir.path().join("out.json.bak").exists());
}
