//! Observer port for progress reporting while a command runs.

use pumpscript_domain::id::CommandId;
use pumpscript_domain::phase::CommandPhase;
use pumpscript_domain::result::CommandResult;
use pumpscript_domain::screen::{Screen, ScreenType};

/// What one retry iteration saw, next to what it wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// A navigation or confirmation attempt.
    Screen {
        observed: ScreenType,
        target: ScreenType,
    },
    /// A convergence cycle on a numeric field.
    Value { observed: i64, target: i64 },
}

/// Receives progress records while a command runs.
///
/// All methods default to no-ops so implementations pick what they need.
pub trait CommandObserver {
    /// The command moved into `phase`.
    fn phase_entered(&self, _id: CommandId, _phase: CommandPhase) {}

    /// A bounded retry loop in `phase` ran its `attempt`-th iteration (1-based).
    fn attempt(
        &self,
        _id: CommandId,
        _phase: CommandPhase,
        _attempt: u32,
        _observation: Observation,
    ) {
    }

    /// An alert screen was acknowledged while cancelling a TBR.
    fn alert_acknowledged(&self, _id: CommandId, _alert: &Screen) {}

    /// The command ended; `result` is what the caller receives.
    fn finished(&self, _id: CommandId, _result: &CommandResult) {}
}

impl<T: CommandObserver> CommandObserver for std::sync::Arc<T> {
    fn phase_entered(&self, id: CommandId, phase: CommandPhase) {
        (**self).phase_entered(id, phase);
    }

    fn attempt(&self, id: CommandId, phase: CommandPhase, attempt: u32, observation: Observation) {
        (**self).attempt(id, phase, attempt, observation);
    }

    fn alert_acknowledged(&self, id: CommandId, alert: &Screen) {
        (**self).alert_acknowledged(id, alert);
    }

    fn finished(&self, id: CommandId, result: &CommandResult) {
        (**self).finished(id, result);
    }
}
