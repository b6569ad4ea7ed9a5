//! Digit-group separator removal.

use super::ValueTransform;

/// Removes every comma, turning `1,234.50` into `1234.50`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigitGroupStrip;

impl ValueTransform for DigitGroupStrip {
    fn name(&self) -> &str {
        "digit-groups"
    }

    fn apply(&self, value: &str) -> String {
        value.replace(',', "")
    }
}
