//! Confirming an edit and getting back to the home screen.
//!
//! Cancelling a running TBR makes the pump raise a "TBR cancelled" alert on
//! the way home. While cancelling, any alert is taken to be that notice and
//! acknowledged. An unrelated alert (an occlusion, say) showing up at the
//! same moment would be acknowledged too; nothing on the alert screen tells
//! the two apart, so this stays an open risk. When setting a rate no alert is
//! expected and any alert aborts the command.

use pumpscript_domain::error::{NavigationTimeoutError, PumpScriptError, UnexpectedAlertError};
use pumpscript_domain::phase::CommandPhase;
use pumpscript_domain::screen::{Screen, ScreenType};

use super::{Session, Transition};
use crate::ports::{Clock, CommandObserver, Observation, PumpNavigator};

/// The home screen reached after committing.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeScreen {
    pub screen: Screen,
    /// Alerts acknowledged on the way; evidence that a cancellation went through.
    pub alerts_acknowledged: u32,
}

impl<N, C, O> Session<'_, N, C, O>
where
    N: PumpNavigator,
    C: Clock,
    O: CommandObserver,
{
    /// Confirm the pending setting, then wait for the home screen.
    ///
    /// Enters [`CommandPhase::Confirming`] and [`CommandPhase::ReturningHome`].
    ///
    /// # Errors
    ///
    /// See [`confirm`](Self::confirm) and [`return_home`](Self::return_home).
    pub async fn commit(&self, is_cancellation: bool) -> Result<HomeScreen, PumpScriptError> {
        self.enter(CommandPhase::Confirming);
        self.confirm().await?;
        self.enter(CommandPhase::ReturningHome);
        self.return_home(is_cancellation).await
    }

    /// Press confirm until the pump leaves the setting screens.
    ///
    /// # Errors
    ///
    /// Returns [`PumpScriptError::NavigationTimeout`] when the pump is still on
    /// a setting screen after the confirm budget, or a driver error.
    pub async fn confirm(&self) -> Result<Screen, PumpScriptError> {
        let update_timeout = self.config.screen_update_timeout();
        let mut screen = self.navigator.current_screen().await?;
        let mut attempts = 0;

        while screen.screen_type().is_setting_screen() {
            if attempts == self.config.confirm_attempts {
                tracing::warn!(
                    command_id = %self.id,
                    stuck_in = %screen,
                    "failed confirming TBR"
                );
                return Err(NavigationTimeoutError {
                    target: ScreenType::MainMenu,
                    stuck_in: screen.screen_type(),
                }
                .into());
            }
            attempts += 1;
            self.observer.attempt(
                self.id,
                CommandPhase::Confirming,
                attempts,
                Observation::Screen {
                    observed: screen.screen_type(),
                    target: ScreenType::MainMenu,
                },
            );

            self.navigator.press_confirm_key().await?;
            self.navigator.wait_for_screen_update(update_timeout).await?;
            screen = self.navigator.current_screen().await?;
        }

        Ok(screen)
    }

    /// Drive the pump back to the home screen, acknowledging the cancellation
    /// alert on the way.
    ///
    /// Every other screen costs one attempt: the driver is asked to go to the
    /// main menu, with a retry pause when it reports failure. Alert
    /// acknowledgements do not use up the home budget; they have their
    /// own cap (`max_alert_acks`).
    ///
    /// # Errors
    ///
    /// Returns [`PumpScriptError::UnexpectedAlert`] for an alert while
    /// setting a rate (or too many while cancelling),
    /// [`PumpScriptError::NavigationTimeout`] when the home screen does not
    /// show within the budget, or a driver error.
    pub async fn return_home(&self, is_cancellation: bool) -> Result<HomeScreen, PumpScriptError> {
        let policy = self.config.menu_policy();
        let mut screen = self.navigator.current_screen().await?;
        let mut attempts = 0;
        let mut alerts_acknowledged = 0;

        loop {
            match screen.screen_type() {
                ScreenType::MainMenu => {
                    return Ok(HomeScreen {
                        screen,
                        alerts_acknowledged,
                    });
                }
                kind if kind.is_alert() => {
                    if !is_cancellation || alerts_acknowledged == self.config.max_alert_acks {
                        tracing::warn!(
                            command_id = %self.id,
                            is_cancellation,
                            alerts_acknowledged,
                            "unexpected alert while returning home"
                        );
                        return Err(UnexpectedAlertError {
                            phase: CommandPhase::ReturningHome,
                        }
                        .into());
                    }
                    alerts_acknowledged += 1;
                    tracing::info!(command_id = %self.id, "acknowledging TBR cancelled alert");
                    self.observer.alert_acknowledged(self.id, &screen);
                    self.navigator.press_confirm_key().await?;
                }
                kind => {
                    if attempts == self.config.home_attempts {
                        tracing::warn!(
                            command_id = %self.id,
                            stuck_in = %screen,
                            "failed going to main menu"
                        );
                        return Err(NavigationTimeoutError {
                            target: ScreenType::MainMenu,
                            stuck_in: kind,
                        }
                        .into());
                    }
                    attempts += 1;
                    self.observer.attempt(
                        self.id,
                        CommandPhase::ReturningHome,
                        attempts,
                        Observation::Screen {
                            observed: kind,
                            target: ScreenType::MainMenu,
                        },
                    );
                    if !self.request(Transition::GoTo(ScreenType::MainMenu), &policy).await? {
                        self.clock.sleep(policy.retry_delay).await;
                    }
                }
            }

            self.navigator
                .wait_for_screen_update(policy.update_timeout)
                .await?;
            screen = self.navigator.current_screen().await?;
        }
    }
}
