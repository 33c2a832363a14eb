//! Pump buttons and step directions.

use serde::{Deserialize, Serialize};

/// A physical button on the pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    /// Cycles through menus; also moves between sub-screens of an edit.
    Menu,
    /// Enters a menu, confirms an edit, acknowledges an alert.
    Check,
    Up,
    Down,
}

/// Which way a step press moves an editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepDirection {
    Increase,
    Decrease,
}

impl StepDirection {
    /// Direction matching the sign of a step count; `None` for zero.
    #[must_use]
    pub fn of(steps: i64) -> Option<Self> {
        match steps.signum() {
            1 => Some(Self::Increase),
            -1 => Some(Self::Decrease),
            _ => None,
        }
    }

    /// The button that moves a field this way.
    #[must_use]
    pub fn key(self) -> Key {
        match self {
            Self::Increase => Key::Up,
            Self::Decrease => Key::Down,
        }
    }
}

impl std::fmt::Display for StepDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Increase => f.write_str("increase"),
            Self::Decrease => f.write_str("decrease"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_follow_sign_of_steps() {
        assert_eq!(StepDirection::of(3), Some(StepDirection::Increase));
        assert_eq!(StepDirection::of(-2), Some(StepDirection::Decrease));
        assert_eq!(StepDirection::of(0), None);
    }

    #[test]
    fn should_map_direction_to_arrow_key() {
        assert_eq!(StepDirection::Increase.key(), Key::Up);
        assert_eq!(StepDirection::Decrease.key(), Key::Down);
    }
}
