//! Building blocks a pump command is scripted from.
//!
//! A [`Session`] bundles the collaborators of one command run (navigator,
//! clock, observer, configuration) and exposes the engine components as
//! methods:
//!
//! - [`Session::reach_screen`]: bounded-retry navigation to a screen type
//! - [`Session::converge`]: dial a blinking numeric field to a target
//! - [`Session::commit`]: confirm the edit and get back to the home screen
//!
//! plus the pure [`verify_outcome`] check on the resulting home screen.
//!
//! Every method either returns its success value or the first error; the
//! caller stops at the first failure.

mod commit;
mod convergence;
mod navigation;
mod verification;

pub use commit::HomeScreen;
pub use convergence::{LiveSource, NumericField};
pub use navigation::Transition;
pub use verification::{CANCELLED_MESSAGE, verify_outcome};

use pumpscript_domain::id::CommandId;
use pumpscript_domain::phase::CommandPhase;

use crate::config::EngineConfig;
use crate::ports::CommandObserver;

/// Collaborators for one command run against the pump.
pub struct Session<'a, N, C, O> {
    id: CommandId,
    navigator: &'a N,
    clock: &'a C,
    observer: &'a O,
    config: &'a EngineConfig,
}

impl<'a, N, C, O: CommandObserver> Session<'a, N, C, O> {
    /// Start a session for the run identified by `id`.
    pub fn new(
        id: CommandId,
        navigator: &'a N,
        clock: &'a C,
        observer: &'a O,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            id,
            navigator,
            clock,
            observer,
            config,
        }
    }

    #[must_use]
    pub fn id(&self) -> CommandId {
        self.id
    }

    /// Record that the command moved into `phase`.
    pub fn enter(&self, phase: CommandPhase) {
        self.observer.phase_entered(self.id, phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeNavigator, InstantClock, SpyObserver};
    use pumpscript_domain::screen::ScreenType;

    #[test]
    fn should_report_each_phase_once_when_entered() {
        let nav = FakeNavigator::showing(&[ScreenType::MainMenu]);
        let clock = InstantClock::default();
        let observer = SpyObserver::default();
        let config = EngineConfig::default();
        let session = Session::new(CommandId::new(), &nav, &clock, &observer, &config);

        session.enter(CommandPhase::SeekingMenu);
        session.enter(CommandPhase::EnteringSetScreen);

        assert_eq!(
            observer.phases(),
            vec![CommandPhase::SeekingMenu, CommandPhase::EnteringSetScreen]
        );
        assert!(nav.untouched());
    }
}
