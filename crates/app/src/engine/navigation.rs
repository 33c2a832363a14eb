//! Bounded-retry navigation to a target screen.

use pumpscript_domain::error::{NavigationTimeoutError, PumpScriptError};
use pumpscript_domain::key::Key;
use pumpscript_domain::phase::CommandPhase;
use pumpscript_domain::screen::{Screen, ScreenType};

use super::Session;
use crate::config::NavigationPolicy;
use crate::ports::{Clock, CommandObserver, Observation, PumpNavigator};

/// How the driver is asked to move toward a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Cycle the top-level menus until `target` shows.
    GoTo(ScreenType),
    /// Press `key` on `from` to open `to`.
    Enter {
        from: ScreenType,
        to: ScreenType,
        key: Key,
    },
}

impl Transition {
    #[must_use]
    pub fn target(self) -> ScreenType {
        match self {
            Self::GoTo(target) | Self::Enter { to: target, .. } => target,
        }
    }
}

impl<N, C, O> Session<'_, N, C, O>
where
    N: PumpNavigator,
    C: Clock,
    O: CommandObserver,
{
    /// Drive the pump to `transition`'s target screen.
    ///
    /// Each attempt asks the driver to transition. When it reports failure,
    /// the actual screen is inspected after `policy.retry_delay`: the target
    /// counts as reached (the driver was wrong), while `stuck_on` gets a menu
    /// key press before the next attempt.
    ///
    /// # Errors
    ///
    /// Returns [`PumpScriptError::NavigationTimeout`] naming the current
    /// screen when the pump is not on the target after the last attempt, or a
    /// driver error.
    pub async fn reach_screen(
        &self,
        phase: CommandPhase,
        transition: Transition,
        stuck_on: Option<ScreenType>,
        policy: &NavigationPolicy,
    ) -> Result<Screen, PumpScriptError> {
        let target = transition.target();

        for attempt in 1..=policy.attempts {
            if self.request(transition, policy).await? {
                break;
            }

            self.clock.sleep(policy.retry_delay).await;
            let screen = self.navigator.current_screen().await?;
            self.observer.attempt(
                self.id,
                phase,
                attempt,
                Observation::Screen {
                    observed: screen.screen_type(),
                    target,
                },
            );
            tracing::debug!(
                command_id = %self.id,
                %phase,
                attempt,
                observed = %screen,
                %target,
                "transition not confirmed by driver"
            );

            if screen.screen_type() == target {
                return Ok(screen);
            }
            if stuck_on == Some(screen.screen_type()) {
                self.navigator.press_navigation_key().await?;
                self.navigator
                    .wait_for_screen_update(policy.update_timeout)
                    .await?;
            }
        }

        let screen = self.navigator.current_screen().await?;
        if screen.screen_type() == target {
            Ok(screen)
        } else {
            tracing::warn!(
                command_id = %self.id,
                %phase,
                stuck_in = %screen,
                %target,
                "navigation gave up"
            );
            Err(NavigationTimeoutError {
                target,
                stuck_in: screen.screen_type(),
            }
            .into())
        }
    }

    pub(super) async fn request(
        &self,
        transition: Transition,
        policy: &NavigationPolicy,
    ) -> Result<bool, PumpScriptError> {
        match transition {
            Transition::GoTo(target) => {
                self.navigator
                    .go_to_screen_of_type(target, policy.transition_timeout)
                    .await
            }
            Transition::Enter { from, to, key } => {
                self.navigator
                    .enter_sub_menu(from, to, key, policy.transition_timeout)
                    .await
            }
        }
    }
}
