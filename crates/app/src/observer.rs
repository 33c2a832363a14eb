//! Observer that turns command progress into `tracing` events.

use pumpscript_domain::id::CommandId;
use pumpscript_domain::phase::CommandPhase;
use pumpscript_domain::result::CommandResult;
use pumpscript_domain::screen::Screen;

use crate::ports::{CommandObserver, Observation};

/// Logs every progress record with structured fields.
///
/// Phase changes and retries go out at `debug`, acknowledged alerts at
/// `info`, and the final outcome at `info` or `warn` depending on success.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CommandObserver for TracingObserver {
    fn phase_entered(&self, id: CommandId, phase: CommandPhase) {
        tracing::debug!(command_id = %id, %phase, "phase entered");
    }

    fn attempt(&self, id: CommandId, phase: CommandPhase, attempt: u32, observation: Observation) {
        match observation {
            Observation::Screen { observed, target } => {
                tracing::debug!(
                    command_id = %id,
                    %phase,
                    attempt,
                    %observed,
                    %target,
                    "screen attempt"
                );
            }
            Observation::Value { observed, target } => {
                tracing::debug!(
                    command_id = %id,
                    %phase,
                    attempt,
                    observed,
                    target,
                    "value attempt"
                );
            }
        }
    }

    fn alert_acknowledged(&self, id: CommandId, alert: &Screen) {
        tracing::info!(command_id = %id, %alert, "alert acknowledged");
    }

    fn finished(&self, id: CommandId, result: &CommandResult) {
        if result.success {
            tracing::info!(
                command_id = %id,
                enacted = result.enacted,
                message = %result.message,
                "command finished"
            );
        } else {
            tracing::warn!(command_id = %id, message = %result.message, "command failed");
        }
    }
}
