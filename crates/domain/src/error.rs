//! Error taxonomy shared across the workspace.
//!
//! Each failure category has its own typed error; [`PumpScriptError`] wraps
//! them via `#[from]` so every layer can use `?` and the command runner can
//! turn any of them into a failed result at the command boundary.

use crate::phase::CommandPhase;
use crate::screen::ScreenType;
use crate::tbr::Violation;

/// Top-level error for everything that can abort a pump command.
#[derive(Debug, thiserror::Error)]
pub enum PumpScriptError {
    /// The command failed its pre-flight checks and never reached the pump.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A screen transition ran out of attempts.
    #[error(transparent)]
    NavigationTimeout(#[from] NavigationTimeoutError),

    /// A numeric field could not be dialled to its target.
    #[error(transparent)]
    Convergence(#[from] ConvergenceError),

    /// An alert appeared where none was expected.
    #[error(transparent)]
    UnexpectedAlert(#[from] UnexpectedAlertError),

    /// The home screen does not show the requested change.
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// The navigation driver or the link beneath it failed.
    #[error("pump driver error: {0}")]
    Driver(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// One or more violated preconditions on a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid command: {}", join(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A screen-transition retry budget was exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("not able to find {target}: stuck in {stuck_in}")]
pub struct NavigationTimeoutError {
    /// Screen the engine was trying to reach.
    pub target: ScreenType,
    /// Screen the pump was showing when the budget ran out.
    pub stuck_in: ScreenType,
}

/// A numeric field never matched its target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvergenceError {
    /// The driver returned a negative reading.
    #[error("unable to set {field}: pump reported invalid value {value}")]
    InvalidReading { field: &'static str, value: i64 },

    /// The read/press budget ran out before the field matched.
    #[error(
        "unable to set {field} after {attempts} attempts, requested: {target}, displayed on pump: {displayed}"
    )]
    AttemptsExhausted {
        field: &'static str,
        target: i64,
        displayed: i64,
        attempts: u32,
    },

    /// The field matched, but a re-read after settling did not.
    #[error("wrong {field}! requested: {target}, displayed on pump: {displayed}")]
    Unsettled {
        field: &'static str,
        target: i64,
        displayed: i64,
    },
}

/// An alert screen appeared outside the sanctioned cancellation case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unexpected alert on pump while {phase}")]
pub struct UnexpectedAlertError {
    pub phase: CommandPhase,
}

/// The home screen disagrees with the requested change.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VerificationError {
    #[error("TBR cancelled, but main menu shows a running TBR")]
    TbrStillRunning,

    #[error("main menu shows no TBR percentage")]
    MissingPercentage,

    #[error("main menu TBR percentage is not a number")]
    PercentageNotNumeric,

    #[error("wrong percentage set! requested: {expected}, displayed on pump: {displayed}")]
    WrongPercentage { expected: i64, displayed: f64 },

    #[error("main menu shows no TBR runtime")]
    MissingRuntime,

    #[error("main menu TBR runtime is not a time")]
    RuntimeNotTime,

    #[error("wrong time set! requested: {expected} min, remaining on pump: {remaining} min")]
    WrongRuntime { expected: i64, remaining: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_name_stuck_screen_in_navigation_timeout() {
        let err = NavigationTimeoutError {
            target: ScreenType::TbrMenu,
            stuck_in: ScreenType::BolusMenu,
        };
        assert_eq!(
            err.to_string(),
            "not able to find TBR_MENU: stuck in BOLUS_MENU"
        );
    }

    #[test]
    fn should_join_violations_in_validation_error() {
        let err = ValidationError {
            violations: vec![Violation::PercentageStep, Violation::PercentageRange],
        };
        assert_eq!(
            err.to_string(),
            "invalid command: TBR percentage must be set in 10% steps; TBR percentage must be within 0-500%"
        );
    }

    #[test]
    fn should_display_inner_message_when_wrapped() {
        let err: PumpScriptError = VerificationError::TbrStillRunning.into();
        assert_eq!(
            err.to_string(),
            "TBR cancelled, but main menu shows a running TBR"
        );
    }

    #[test]
    fn should_display_unsettled_convergence_error() {
        let err = ConvergenceError::Unsettled {
            field: "percentage",
            target: 150,
            displayed: 140,
        };
        assert_eq!(
            err.to_string(),
            "wrong percentage! requested: 150, displayed on pump: 140"
        );
    }

    #[test]
    fn should_display_unexpected_alert_with_phase() {
        let err = UnexpectedAlertError {
            phase: CommandPhase::ReturningHome,
        };
        assert_eq!(
            err.to_string(),
            "unexpected alert on pump while returning home"
        );
    }

    #[test]
    fn should_box_driver_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "link lost");
        let err = PumpScriptError::Driver(Box::new(io));
        assert_eq!(err.to_string(), "pump driver error: link lost");
    }
}
