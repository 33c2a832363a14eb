//! Dialling a blinking numeric field to a target with step presses.

use pumpscript_domain::error::{ConvergenceError, PumpScriptError};
use pumpscript_domain::key::StepDirection;
use pumpscript_domain::phase::CommandPhase;
use pumpscript_domain::screen::AttributeKind;
use pumpscript_domain::tbr::{DURATION_STEP, PERCENTAGE_STEP};

use super::Session;
use crate::ports::{Clock, CommandObserver, Observation, PumpNavigator};

/// Where the live value of a field is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveSource {
    Number(AttributeKind),
    Duration,
}

/// An editable numeric field on a setting screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericField {
    pub name: &'static str,
    pub source: LiveSource,
    /// How far one press moves the value.
    pub step_size: i64,
    /// Nudge the step count by one when truncated division would land off target.
    pub corrects_truncation: bool,
}

impl NumericField {
    /// TBR percentage on the set screen, 10% per press.
    pub const PERCENTAGE: Self = Self {
        name: "percentage",
        source: LiveSource::Number(AttributeKind::BasalRate),
        step_size: PERCENTAGE_STEP,
        corrects_truncation: false,
    };

    /// TBR duration on the duration screen, 15 minutes per press.
    pub const DURATION: Self = Self {
        name: "duration",
        source: LiveSource::Duration,
        step_size: DURATION_STEP,
        corrects_truncation: true,
    };

    /// Signed number of presses to move `current` toward `target`.
    #[must_use]
    pub fn steps_towards(&self, current: i64, target: i64) -> i64 {
        let mut steps = (target - current) / self.step_size;
        if self.corrects_truncation {
            let landing = current + steps * self.step_size;
            if landing < target {
                steps += 1;
            } else if landing > target {
                steps -= 1;
            }
        }
        steps
    }
}

impl<N, C, O> Session<'_, N, C, O>
where
    N: PumpNavigator,
    C: Clock,
    O: CommandObserver,
{
    /// Press `field` toward `target` until the display shows it.
    ///
    /// Each cycle reads the live value, presses the computed number of steps,
    /// and waits for the display. Once the value matches, it is read once
    /// more after another screen update; a blinking value that had not caught
    /// up yet fails here instead of passing as converged.
    ///
    /// # Errors
    ///
    /// Returns [`PumpScriptError::Convergence`] when the driver reports a
    /// negative reading, the cycle budget runs out, or the settled re-read
    /// differs from `target`; or a driver error.
    pub async fn converge(
        &self,
        phase: CommandPhase,
        field: NumericField,
        target: i64,
    ) -> Result<i64, PumpScriptError> {
        let budget = self.config.convergence_attempts;
        let update_timeout = self.config.screen_update_timeout();
        let mut current = self.read_live(field).await?;
        let mut attempts = 0;

        while current != target {
            if attempts == budget {
                return Err(ConvergenceError::AttemptsExhausted {
                    field: field.name,
                    target,
                    displayed: current,
                    attempts,
                }
                .into());
            }
            attempts += 1;

            let steps = field.steps_towards(current, target);
            self.observer.attempt(
                self.id,
                phase,
                attempts,
                Observation::Value {
                    observed: current,
                    target,
                },
            );
            tracing::debug!(
                command_id = %self.id,
                field = field.name,
                target,
                current,
                steps,
                attempts_left = budget - attempts,
                "adjusting field"
            );

            if let Some(direction) = StepDirection::of(steps) {
                let presses = u32::try_from(steps.unsigned_abs()).unwrap_or(u32::MAX);
                self.navigator
                    .press(presses, direction, self.config.step_delay())
                    .await?;
            }
            self.navigator.wait_for_screen_update(update_timeout).await?;
            current = self.read_live(field).await?;
        }

        self.navigator.wait_for_screen_update(update_timeout).await?;
        let settled = self.read_live(field).await?;
        if settled != target {
            return Err(ConvergenceError::Unsettled {
                field: field.name,
                target,
                displayed: settled,
            }
            .into());
        }

        tracing::debug!(
            command_id = %self.id,
            field = field.name,
            target,
            attempts,
            "field converged"
        );
        Ok(settled)
    }

    async fn read_live(&self, field: NumericField) -> Result<i64, PumpScriptError> {
        let value = match field.source {
            LiveSource::Number(kind) => self.navigator.read_live_number(kind).await?,
            LiveSource::Duration => self.navigator.read_live_duration().await?,
        };
        if value < 0 {
            return Err(ConvergenceError::InvalidReading {
                field: field.name,
                value,
            }
            .into());
        }
        Ok(value)
    }
}
