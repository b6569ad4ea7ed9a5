//! Field-level value normalization.
//!
//! Form controls opt into value transforms through their CSS classes. A
//! [`Normalizer`] holds an ordered list of rules, each pairing a set of class
//! names with a [`ValueTransform`]; every rule whose classes intersect the
//! element's classes is applied, in registration order.
//!
//! The default rules are:
//!
//! - `format-float`, `format-miles` - strip digit-group commas ([`DigitGroupStrip`])
//! - `format-date` - `DD/MM/YYYY[ H:MM[ am|pm]]` to `YYYY-MM-DD[ HH:MM]` ([`DateReformat`])
//!
//! # Example
//!
//! ```
//! use formnest::normalize::Normalizer;
//! use std::collections::BTreeSet;
//!
//! let normalizer = Normalizer::default();
//! let classes: BTreeSet<String> = ["format-date".to_string()].into();
//! assert_eq!(normalizer.normalize("25/12/2024 2:30 pm", &classes), "2024-12-25 14:30");
//! ```

pub mod date;
pub mod digits;

pub use date::DateReformat;
pub use digits::DigitGroupStrip;

use crate::config::Config;
use std::collections::BTreeSet;
use std::fmt;

/// A pure string-to-string value transform.
pub trait ValueTransform: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Transforms a raw value. Values the transform does not recognize are
    /// returned unchanged.
    fn apply(&self, value: &str) -> String;
}

/// A transform and the classes that trigger it.
pub struct Rule {
    classes: Vec<String>,
    transform: Box<dyn ValueTransform>,
}

impl Rule {
    pub fn new(classes: Vec<String>, transform: Box<dyn ValueTransform>) -> Self {
        Self { classes, transform }
    }

    /// Returns true if any of the rule's classes is present.
    pub fn matches(&self, classes: &BTreeSet<String>) -> bool {
        self.classes.iter().any(|class| classes.contains(class))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("classes", &self.classes)
            .field("transform", &self.transform.name())
            .finish()
    }
}

/// An ordered registry of value transforms.
#[derive(Debug)]
pub struct Normalizer {
    rules: Vec<Rule>,
}

impl Normalizer {
    /// Creates a normalizer with no rules; every value passes through.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Builds the default rules using the class names from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::empty()
            .with_rule(config.digit_group_classes.clone(), DigitGroupStrip)
            .with_rule(config.date_classes.clone(), DateReformat)
    }

    /// Appends a rule triggered by any of `classes`.
    pub fn with_rule<T>(mut self, classes: Vec<String>, transform: T) -> Self
    where
        T: ValueTransform + 'static,
    {
        self.rules.push(Rule::new(classes, Box::new(transform)));
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Applies every matching rule to `value`, in registration order.
    pub fn normalize(&self, value: &str, classes: &BTreeSet<String>) -> String {
        let mut value = value.to_string();
        for rule in self.rules.iter().filter(|rule| rule.matches(classes)) {
            let next = rule.transform.apply(&value);
            if next != value {
                tracing::trace!(
                    transform = rule.transform.name(),
                    from = %value,
                    to = %next,
                    "normalized value"
                );
            }
            value = next;
        }
        value
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
