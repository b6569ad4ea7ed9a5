//! Form controls and the field tuples derived from them.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Container id used for documents that hold a single anonymous form.
pub const DEFAULT_CONTAINER: &str = "form";

/// What kind of control produced a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    /// Free-text style controls
    Text,
    /// A checkbox that was checked
    CheckboxChecked,
    /// The first checked radio button of its name group
    RadioChecked,
    /// Anything else (selects, ranges, custom elements)
    Other,
}

/// One collected field: the input of a serialize operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTuple {
    pub name: String,
    pub value: String,
    pub kind: ElementKind,
    pub classes: BTreeSet<String>,
}

impl FieldTuple {
    /// Creates a text field with no classes.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind: ElementKind::Text,
            classes: BTreeSet::new(),
        }
    }

    pub fn with_kind(mut self, kind: ElementKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }
}

/// A form control as described in an input document.
///
/// Mirrors the attributes a browser exposes: `name`, `value`, `type`,
/// `checked` and the class list. `classes` accepts either a list or an HTML
/// style space-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormElement {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub value: String,

    #[serde(rename = "type", default = "default_input_type")]
    pub input_type: String,

    #[serde(default)]
    pub checked: bool,

    #[serde(default, alias = "class", deserialize_with = "deserialize_classes")]
    pub classes: Vec<String>,
}

fn default_input_type() -> String {
    "text".to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassList {
    Text(String),
    List(Vec<String>),
}

fn deserialize_classes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match ClassList::deserialize(deserializer)? {
        ClassList::Text(text) => text.split_whitespace().map(str::to_string).collect(),
        ClassList::List(list) => list,
    })
}

impl FormElement {
    /// Creates a text input.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            input_type: default_input_type(),
            ..Self::default()
        }
    }

    /// Creates a checkbox.
    pub fn checkbox(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self {
            input_type: "checkbox".to_string(),
            checked,
            ..Self::text(name, value)
        }
    }

    /// Creates a radio button.
    pub fn radio(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self {
            input_type: "radio".to_string(),
            checked,
            ..Self::text(name, value)
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn is_checkbox(&self) -> bool {
        self.input_type.eq_ignore_ascii_case("checkbox")
    }

    pub fn is_radio(&self) -> bool {
        self.input_type.eq_ignore_ascii_case("radio")
    }

    /// Classifies the control for its field tuple.
    ///
    /// Unchecked checkboxes and radios never become fields, so their kinds
    /// here assume the control is checked.
    pub fn kind(&self) -> ElementKind {
        if self.is_checkbox() {
            return ElementKind::CheckboxChecked;
        }
        if self.is_radio() {
            return ElementKind::RadioChecked;
        }
        match self.input_type.to_ascii_lowercase().as_str() {
            "" | "text" | "textarea" | "email" | "password" | "search" | "tel" | "url"
            | "number" | "hidden" | "date" | "datetime-local" | "time" | "month" | "week" => {
                ElementKind::Text
            }
            _ => ElementKind::Other,
        }
    }

    /// Builds the field tuple for this control.
    pub fn to_field(&self) -> FieldTuple {
        FieldTuple {
            name: self.name.clone(),
            value: self.value.clone(),
            kind: self.kind(),
            classes: self.classes.iter().cloned().collect(),
        }
    }
}

/// Named containers of form controls, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormDocument {
    containers: IndexMap<String, Vec<FormElement>>,
}

impl FormDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a flat list of controls as the single container [`DEFAULT_CONTAINER`].
    pub fn single(elements: Vec<FormElement>) -> Self {
        let mut document = Self::new();
        document.insert(DEFAULT_CONTAINER, elements);
        document
    }

    /// Adds or replaces a container.
    pub fn insert(&mut self, id: impl Into<String>, elements: Vec<FormElement>) {
        self.containers.insert(id.into(), elements);
    }

    /// Looks up a container by id.
    pub fn container(&self, id: &str) -> Option<&[FormElement]> {
        self.containers.get(id).map(Vec::as_slice)
    }

    /// Container ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.containers.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_defaults() {
        let element: FormElement = serde_json::from_str(r#"{"name": "a"}"#).unwrap();
        assert_eq!(element.input_type, "text");
        assert_eq!(element.value, "");
        assert!(!element.checked);
        assert!(element.classes.is_empty());
    }

    #[test]
    fn test_class_string_is_split() {
        let element: FormElement =
            serde_json::from_str(r#"{"name": "a", "class": "form-control  format-date"}"#).unwrap();
        assert_eq!(element.classes, vec!["form-control", "format-date"]);
    }

    #[test]
    fn test_class_list() {
        let element: FormElement =
            serde_json::from_str(r#"{"name": "a", "classes": ["format-float"]}"#).unwrap();
        assert_eq!(element.classes, vec!["format-float"]);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(FormElement::checkbox("a", "1", true).kind(), ElementKind::CheckboxChecked);
        assert_eq!(FormElement::radio("a", "1", true).kind(), ElementKind::RadioChecked);
        assert_eq!(FormElement::text("a", "1").kind(), ElementKind::Text);

        let select = FormElement {
            input_type: "select-one".to_string(),
            ..FormElement::text("a", "1")
        };
        assert_eq!(select.kind(), ElementKind::Other);
    }

    #[test]
    fn test_to_field_collects_classes() {
        let field = FormElement::text("price", "1,000")
            .with_class("format-float")
            .with_class("format-float")
            .to_field();
        assert_eq!(field.classes.len(), 1);
        assert_eq!(field, FieldTuple::new("price", "1,000").with_class("format-float"));
    }

    #[test]
    fn test_document_keeps_order() {
        let document: FormDocument =
            serde_json::from_str(r#"{"second": [], "first": [{"name": "x"}]}"#).unwrap();
        assert_eq!(document.ids().collect::<Vec<_>>(), vec!["second", "first"]);
        assert_eq!(document.container("first").map(|c| c.len()), Some(1));
        assert!(document.container("third").is_none());
    }
}
