//! Day-first date reformatting.

use super::ValueTransform;
use regex::Regex;
use std::sync::LazyLock;

/// `DD/MM/YYYY`, optionally followed by `H[H]:MM` and an am/pm marker.
///
/// The pattern is searched for anywhere in the value.
static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{2})/([0-9]{2})/([0-9]{4})(?:\s+([0-9]{1,2}):([0-9]{2})(?:\s*([aApP])\.?[mM]\.?)?)?")
        .unwrap()
});

/// Rewrites `DD/MM/YYYY[ H:MM[ am|pm]]` as `YYYY-MM-DD[ HH:MM]`.
///
/// Times come out in 24-hour form. Values that do not contain a date are
/// returned unchanged; the date itself is not validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateReformat;

impl ValueTransform for DateReformat {
    fn name(&self) -> &str {
        "date"
    }

    fn apply(&self, value: &str) -> String {
        let Some(caps) = DATE_TIME.captures(value) else {
            return value.to_string();
        };

        let mut formatted = format!("{}-{}-{}", &caps[3], &caps[2], &caps[1]);

        if let (Some(hours), Some(minutes)) = (caps.get(4), caps.get(5)) {
            // Both groups are ASCII digits of bounded length.
            let mut hours: u32 = hours.as_str().parse().unwrap_or(0);
            let minutes: u32 = minutes.as_str().parse().unwrap_or(0);
            match caps.get(6).map(|m| m.as_str().to_ascii_lowercase()) {
                Some(marker) if marker == "p" && hours < 12 => hours += 12,
                Some(marker) if marker == "a" && hours == 12 => hours = 0,
                _ => {}
            }
            formatted.push_str(&format!(" {:02}:{:02}", hours, minutes));
        }

        formatted
    }
}
