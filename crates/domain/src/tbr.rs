//! Temporary basal rate (TBR) commands and their pre-flight checks.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Percentage that means "no TBR": setting it cancels the running one.
pub const CANCEL_PERCENTAGE: i64 = 100;

/// Granularity of the percentage field on the pump.
pub const PERCENTAGE_STEP: i64 = 10;
pub const MAX_PERCENTAGE: i64 = 500;

/// Granularity of the duration field on the pump, in minutes.
pub const DURATION_STEP: i64 = 15;
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;
pub const MAX_ZERO_TEMP_MINUTES: i64 = 2 * 60;

/// Request to set (or cancel) a temporary basal rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetTbr {
    pub percentage: i64,
    pub duration_minutes: i64,
}

impl SetTbr {
    #[must_use]
    pub fn new(percentage: i64, duration_minutes: i64) -> Self {
        Self {
            percentage,
            duration_minutes,
        }
    }

    /// Command cancelling whatever TBR is running.
    #[must_use]
    pub fn cancel() -> Self {
        Self::new(CANCEL_PERCENTAGE, 0)
    }

    /// Whether this command cancels the running TBR instead of setting one.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        self.percentage == CANCEL_PERCENTAGE
    }

    /// Collect every violated precondition. Empty means the command may run.
    #[must_use]
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.percentage % PERCENTAGE_STEP != 0 {
            violations.push(Violation::PercentageStep);
        }
        if !(0..=MAX_PERCENTAGE).contains(&self.percentage) {
            violations.push(Violation::PercentageRange);
        }

        if !self.is_cancellation() {
            if self.duration_minutes % DURATION_STEP != 0 {
                violations.push(Violation::DurationStep);
            }
            if self.duration_minutes > MAX_DURATION_MINUTES {
                violations.push(Violation::DurationTooLong);
            }
            if self.duration_minutes < 0 {
                violations.push(Violation::NegativeDuration);
            }
        }

        if self.percentage == 0 && self.duration_minutes > MAX_ZERO_TEMP_MINUTES {
            violations.push(Violation::ZeroTempTooLong);
        }

        violations
    }

    /// Like [`validate`](Self::validate), as a `Result`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every violation when any check fails.
    pub fn ensure_valid(&self) -> Result<(), ValidationError> {
        let violations = self.validate();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}

impl std::fmt::Display for SetTbr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SetTbr{{percentage={}, duration={}}}",
            self.percentage, self.duration_minutes
        )
    }
}

/// A single failed precondition on a [`SetTbr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    PercentageStep,
    PercentageRange,
    DurationStep,
    DurationTooLong,
    NegativeDuration,
    ZeroTempTooLong,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PercentageStep => f.write_str("TBR percentage must be set in 10% steps"),
            Self::PercentageRange => f.write_str("TBR percentage must be within 0-500%"),
            Self::DurationStep => f.write_str("TBR duration can only be set in 15 minute steps"),
            Self::DurationTooLong => f.write_str("Maximum TBR duration is 24 hours"),
            Self::NegativeDuration => f.write_str("TBR duration must not be negative"),
            Self::ZeroTempTooLong => f.write_str("Max allowed zero-temp duration is 2h"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_every_valid_percentage() {
        for percentage in (0..=MAX_PERCENTAGE).step_by(10) {
            let violations = SetTbr::new(percentage, 60).validate();
            assert!(
                violations.is_empty(),
                "{percentage}% should be valid, got {violations:?}"
            );
        }
    }

    #[test]
    fn should_reject_percentage_when_not_multiple_of_ten() {
        for percentage in [1, 15, 99, 101, 499] {
            let violations = SetTbr::new(percentage, 60).validate();
            assert!(violations.contains(&Violation::PercentageStep));
            assert!(!violations.contains(&Violation::PercentageRange));
        }
    }

    #[test]
    fn should_reject_percentage_when_out_of_range() {
        for percentage in [-10, 510, 1000] {
            let violations = SetTbr::new(percentage, 60).validate();
            assert!(violations.contains(&Violation::PercentageRange));
            assert!(!violations.contains(&Violation::PercentageStep));
        }
    }

    #[test]
    fn should_report_both_percentage_violations_when_applicable() {
        let violations = SetTbr::new(505, 60).validate();
        assert_eq!(
            violations,
            vec![Violation::PercentageStep, Violation::PercentageRange]
        );
    }

    #[test]
    fn should_reject_duration_when_not_multiple_of_fifteen() {
        let violations = SetTbr::new(150, 20).validate();
        assert_eq!(violations, vec![Violation::DurationStep]);
    }

    #[test]
    fn should_reject_duration_when_longer_than_a_day() {
        let violations = SetTbr::new(150, 1455).validate();
        assert_eq!(violations, vec![Violation::DurationTooLong]);
    }

    #[test]
    fn should_accept_full_day_duration() {
        assert!(SetTbr::new(150, 1440).validate().is_empty());
    }

    #[test]
    fn should_reject_negative_duration() {
        let violations = SetTbr::new(150, -15).validate();
        assert_eq!(violations, vec![Violation::NegativeDuration]);
    }

    #[test]
    fn should_ignore_duration_when_cancelling() {
        assert!(SetTbr::new(100, 7).validate().is_empty());
        assert!(SetTbr::new(100, 5000).validate().is_empty());
    }

    #[test]
    fn should_reject_zero_temp_longer_than_two_hours() {
        let violations = SetTbr::new(0, 150).validate();
        assert_eq!(violations, vec![Violation::ZeroTempTooLong]);
    }

    #[test]
    fn should_report_zero_temp_violation_regardless_of_step_check() {
        let violations = SetTbr::new(0, 125).validate();
        assert_eq!(
            violations,
            vec![Violation::DurationStep, Violation::ZeroTempTooLong]
        );
    }

    #[test]
    fn should_accept_two_hour_zero_temp() {
        assert!(SetTbr::new(0, 120).validate().is_empty());
    }

    #[test]
    fn should_return_validation_error_when_invalid() {
        let err = SetTbr::new(0, 150).ensure_valid().unwrap_err();
        assert_eq!(err.violations, vec![Violation::ZeroTempTooLong]);
    }

    #[test]
    fn should_treat_hundred_percent_as_cancellation() {
        assert!(SetTbr::cancel().is_cancellation());
        assert!(!SetTbr::new(110, 30).is_cancellation());
    }

    #[test]
    fn should_display_percentage_and_duration() {
        assert_eq!(
            SetTbr::new(150, 30).to_string(),
            "SetTbr{percentage=150, duration=30}"
        );
    }
}
