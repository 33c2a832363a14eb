//! Immutable snapshots of what the pump display shows.
//!
//! A navigation driver scrapes the display into a [`Screen`]: a
//! [`ScreenType`] tag plus typed attributes. Snapshots are never mutated;
//! the engine captures a fresh one after every button press it cares about.

mod attribute_value;

pub use attribute_value::{AttributeValue, MenuTime};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The kind of menu currently on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScreenType {
    /// Home screen showing the committed operating state.
    MainMenu,
    StopMenu,
    BolusMenu,
    /// Top-level TBR entry in the menu carousel.
    TbrMenu,
    /// Editing the TBR percentage.
    TbrSet,
    /// Editing the TBR duration.
    TbrDuration,
    /// Any warning or error alert.
    WarningOrError,
    /// A screen the driver does not classify.
    Other,
}

impl ScreenType {
    /// Whether an edit is in progress but not yet confirmed on this screen.
    #[must_use]
    pub fn is_setting_screen(self) -> bool {
        matches!(self, Self::TbrSet | Self::TbrDuration)
    }

    /// Whether this is an alert screen.
    #[must_use]
    pub fn is_alert(self) -> bool {
        matches!(self, Self::WarningOrError)
    }
}

impl std::fmt::Display for ScreenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MainMenu => f.write_str("MAIN_MENU"),
            Self::StopMenu => f.write_str("STOP_MENU"),
            Self::BolusMenu => f.write_str("BOLUS_MENU"),
            Self::TbrMenu => f.write_str("TBR_MENU"),
            Self::TbrSet => f.write_str("TBR_SET"),
            Self::TbrDuration => f.write_str("TBR_DURATION"),
            Self::WarningOrError => f.write_str("WARNING_OR_ERROR"),
            Self::Other => f.write_str("OTHER"),
        }
    }
}

/// Which attribute of a screen a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// Percentage being edited on the TBR set screen.
    BasalRate,
    /// Active TBR percentage on the home screen.
    Tbr,
    /// Remaining runtime of the active TBR (home screen) or the duration
    /// being edited (duration screen).
    Runtime,
    /// Warning number shown on an alert screen.
    WarningCode,
}

/// A captured pump screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    screen_type: ScreenType,
    attributes: HashMap<AttributeKind, AttributeValue>,
}

impl Screen {
    /// A screen of the given type without attributes.
    #[must_use]
    pub fn new(screen_type: ScreenType) -> Self {
        Self {
            screen_type,
            attributes: HashMap::new(),
        }
    }

    /// Return a copy of this snapshot with one more attribute.
    #[must_use]
    pub fn with_attribute(mut self, kind: AttributeKind, value: AttributeValue) -> Self {
        self.attributes.insert(kind, value);
        self
    }

    #[must_use]
    pub fn screen_type(&self) -> ScreenType {
        self.screen_type
    }

    /// Look up an attribute; `None` when the display does not show it.
    #[must_use]
    pub fn attribute(&self, kind: AttributeKind) -> Option<&AttributeValue> {
        self.attributes.get(&kind)
    }

    #[must_use]
    pub fn has_attribute(&self, kind: AttributeKind) -> bool {
        self.attributes.contains_key(&kind)
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.screen_type.fmt(f)
    }
}
