use formnest::config::{Config, OutputFormat};
use formnest::form::{FieldTuple, FormSerializer};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.output_format, OutputFormat::Json);
    assert_eq!(config.indent_size, 2);
    assert!(!config.drop_empty_values);
    assert_eq!(config.digit_group_classes, vec!["format-float", "format-miles"]);
    assert_eq!(config.date_classes, vec!["format-date"]);
    assert!(!config.create_backup);
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config {
        output_format: OutputFormat::Yaml,
        indent_size: 4,
        drop_empty_values: true,
        digit_group_classes: vec!["money".to_string()],
        date_classes: vec![],
        create_backup: true,
    };
    config.save_to(&path).unwrap();

    assert_eq!(Config::load_from(&path), config);
}

#[test]
fn test_partial_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "output_format = \"yaml\"\n").unwrap();

    let config = Config::load_from(&path);
    assert_eq!(config.output_format, OutputFormat::Yaml);
    assert_eq!(config.indent_size, 2);
    assert_eq!(config.date_classes, vec!["format-date"]);
}

#[test]
fn test_missing_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    assert_eq!(Config::load_from(dir.path().join("absent.toml")), Config::default());
}

#[test]
fn test_malformed_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "indent_size = \"wide\"\n[[[").unwrap();

    assert_eq!(Config::load_from(&path), Config::default());
}

#[test]
fn test_config_drives_normalization_classes() {
    let config = Config {
        digit_group_classes: vec!["money".to_string()],
        date_classes: vec!["day".to_string()],
        ..Config::default()
    };
    let result = FormSerializer::from_config(&config).serialize(vec![
        FieldTuple::new("a", "1,000").with_class("money"),
        FieldTuple::new("b", "1,000").with_class("format-float"),
        FieldTuple::new("c", "31/01/2020").with_class("day"),
    ]);
    assert_eq!(
        serde_json::to_value(&result.data).unwrap(),
        json!({"a": "1000", "b": "1,000", "c": "2020-01-31"})
    );
}

#[test]
fn test_config_drop_empty_values() {
    let config = Config {
        drop_empty_values: true,
        ..Config::default()
    };
    let result = FormSerializer::from_config(&config)
        .serialize(vec![FieldTuple::new("a", ""), FieldTuple::new("b", "x")]);
    assert_eq!(serde_json::to_value(&result.data).unwrap(), json!({"b": "x"}));
}
