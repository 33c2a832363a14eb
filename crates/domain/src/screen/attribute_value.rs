//! Typed values scraped from a pump screen.

use serde::{Deserialize, Serialize};

/// A single typed attribute value shown on a pump screen.
///
/// The display only ever renders numbers or clock-style times, so the set is
/// closed; a missing attribute is `None` at the lookup site, not a variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    Number(f64),
    Time(MenuTime),
}

/// An `hh:mm` value as rendered by the pump (time of day or a remaining runtime).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuTime {
    pub hour: u8,
    pub minute: u8,
}

impl MenuTime {
    #[must_use]
    pub fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Build the `hh:mm` rendering of a minute count, saturating at `255:59`.
    #[must_use]
    pub fn from_minutes(minutes: i64) -> Self {
        let minutes = minutes.clamp(0, 255 * 60 + 59);
        Self {
            hour: u8::try_from(minutes / 60).unwrap_or(u8::MAX),
            minute: u8::try_from(minutes % 60).unwrap_or(0),
        }
    }

    /// Total minutes represented by this value.
    #[must_use]
    pub fn total_minutes(self) -> i64 {
        i64::from(self.hour) * 60 + i64::from(self.minute)
    }
}

impl std::fmt::Display for MenuTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
