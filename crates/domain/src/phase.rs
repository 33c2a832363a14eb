//! The states a TBR command walks through on the pump.

use serde::{Deserialize, Serialize};

/// One step of the command-level state machine.
///
/// Phases run strictly in declaration order. The duration phases are skipped
/// when a command cancels the running TBR. Any failure ends the command in the
/// phase where it happened; there is no retry across phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandPhase {
    SeekingMenu,
    EnteringSetScreen,
    AdjustingPercentage,
    EnteringDurationScreen,
    AdjustingDuration,
    Confirming,
    ReturningHome,
    VerifyingOutcome,
}

impl std::fmt::Display for CommandPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SeekingMenu => f.write_str("seeking menu"),
            Self::EnteringSetScreen => f.write_str("entering set screen"),
            Self::AdjustingPercentage => f.write_str("adjusting percentage"),
            Self::EnteringDurationScreen => f.write_str("entering duration screen"),
            Self::AdjustingDuration => f.write_str("adjusting duration"),
            Self::Confirming => f.write_str("confirming"),
            Self::ReturningHome => f.write_str("returning home"),
            Self::VerifyingOutcome => f.write_str("verifying outcome"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_phase_in_plain_words() {
        assert_eq!(
            CommandPhase::EnteringDurationScreen.to_string(),
            "entering duration screen"
        );
    }

    #[test]
    fn should_serialize_as_snake_case() {
        let json = serde_json::to_string(&CommandPhase::ReturningHome).unwrap();
        assert_eq!(json, "\"returning_home\"");
    }
}
