//! The all-or-nothing outcome handed back to a dispatcher.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::PumpScriptError;

/// UTC timestamp recorded when a result is produced.
pub type Timestamp = DateTime<Utc>;

/// Outcome of running one command against the pump.
///
/// `enacted` separates "the pump state changed" from "succeeded without
/// touching anything". A failed result always carries its cause.
#[derive(Debug)]
pub struct CommandResult {
    pub success: bool,
    pub enacted: bool,
    pub message: String,
    pub cause: Option<PumpScriptError>,
    pub completed_at: Timestamp,
}

impl CommandResult {
    /// The pump state changed as requested.
    #[must_use]
    pub fn enacted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            enacted: true,
            message: message.into(),
            cause: None,
            completed_at: Utc::now(),
        }
    }

    /// Nothing needed to change on the pump.
    #[must_use]
    pub fn unchanged(message: impl Into<String>) -> Self {
        Self {
            success: true,
            enacted: false,
            message: message.into(),
            cause: None,
            completed_at: Utc::now(),
        }
    }

    /// The command failed; the error's message becomes the result message.
    #[must_use]
    pub fn failed(cause: PumpScriptError) -> Self {
        Self {
            success: false,
            enacted: false,
            message: cause.to_string(),
            cause: Some(cause),
            completed_at: Utc::now(),
        }
    }

    /// A serialisable view with the cause flattened to text.
    #[must_use]
    pub fn summary(&self) -> CommandResultSummary<'_> {
        CommandResultSummary {
            success: self.success,
            enacted: self.enacted,
            message: &self.message,
            cause: self.cause.as_ref().map(ToString::to_string),
            completed_at: self.completed_at,
        }
    }
}

/// Borrowed, serialisable form of a [`CommandResult`].
#[derive(Debug, Serialize)]
pub struct CommandResultSummary<'a> {
    pub success: bool,
    pub enacted: bool,
    pub message: &'a str,
    pub cause: Option<String>,
    pub completed_at: Timestamp,
}
