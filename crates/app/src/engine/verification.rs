//! Cross-checking the home screen against the requested command.

use pumpscript_domain::error::VerificationError;
use pumpscript_domain::screen::{AttributeKind, AttributeValue, Screen};
use pumpscript_domain::tbr::SetTbr;

/// Message returned when a cancellation is verified.
pub const CANCELLED_MESSAGE: &str = "TBR was cancelled";

/// Check that `home` shows the outcome `command` asked for.
///
/// A cancellation is confirmed by the absence of a TBR runtime. An active
/// rate needs the exact percentage and a remaining runtime at most
/// `tolerance_minutes` below the requested duration (the pump counts down
/// between the commit and this read, so it may never be above).
///
/// Returns the success message for the command result.
///
/// # Errors
///
/// Returns the first [`VerificationError`] found.
pub fn verify_outcome(
    home: &Screen,
    command: &SetTbr,
    tolerance_minutes: i64,
) -> Result<String, VerificationError> {
    if command.is_cancellation() {
        if home.has_attribute(AttributeKind::Runtime) {
            return Err(VerificationError::TbrStillRunning);
        }
        return Ok(CANCELLED_MESSAGE.to_string());
    }

    let displayed = match home.attribute(AttributeKind::Tbr) {
        None => return Err(VerificationError::MissingPercentage),
        Some(AttributeValue::Time(_)) => return Err(VerificationError::PercentageNotNumeric),
        Some(AttributeValue::Number(n)) => *n,
    };
    if whole_number(displayed) != Some(command.percentage) {
        return Err(VerificationError::WrongPercentage {
            expected: command.percentage,
            displayed,
        });
    }

    let remaining = match home.attribute(AttributeKind::Runtime) {
        None => return Err(VerificationError::MissingRuntime),
        Some(AttributeValue::Number(_)) => return Err(VerificationError::RuntimeNotTime),
        Some(AttributeValue::Time(t)) => t.total_minutes(),
    };
    let expected = command.duration_minutes;
    if !(expected - tolerance_minutes..=expected).contains(&remaining) {
        return Err(VerificationError::WrongRuntime {
            expected,
            remaining,
        });
    }

    Ok(format!(
        "TBR set to {}% for {} min",
        command.percentage, command.duration_minutes
    ))
}

#[allow(clippy::cast_possible_truncation)]
fn whole_number(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0).then(|| value as i64)
}
