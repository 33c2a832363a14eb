//! Setting or cancelling a temporary basal rate through the pump's menus.

use std::future::Future;

use pumpscript_domain::error::PumpScriptError;
use pumpscript_domain::id::CommandId;
use pumpscript_domain::key::Key;
use pumpscript_domain::phase::CommandPhase;
use pumpscript_domain::result::CommandResult;
use pumpscript_domain::screen::ScreenType;
use pumpscript_domain::tbr::{SetTbr, Violation};

use super::PumpCommand;
use crate::config::EngineConfig;
use crate::engine::{NumericField, Session, Transition, verify_outcome};
use crate::ports::{Clock, CommandObserver, PumpNavigator};

const OPEN_TBR_MENU: Transition = Transition::GoTo(ScreenType::TbrMenu);

const OPEN_SET_SCREEN: Transition = Transition::Enter {
    from: ScreenType::TbrMenu,
    to: ScreenType::TbrSet,
    key: Key::Check,
};

const OPEN_DURATION_SCREEN: Transition = Transition::Enter {
    from: ScreenType::TbrSet,
    to: ScreenType::TbrDuration,
    key: Key::Menu,
};

/// Runs [`SetTbr`] commands against one pump.
pub struct SetTbrService<N, C, O> {
    navigator: N,
    clock: C,
    observer: O,
    config: EngineConfig,
}

impl<N, C, O> SetTbrService<N, C, O>
where
    N: PumpNavigator,
    C: Clock,
    O: CommandObserver,
{
    pub fn new(navigator: N, clock: C, observer: O, config: EngineConfig) -> Self {
        Self {
            navigator,
            clock,
            observer,
            config,
        }
    }

    #[must_use]
    pub fn validate(&self, command: &SetTbr) -> Vec<Violation> {
        command.validate()
    }

    /// Validate `command`, then walk the pump through every phase.
    ///
    /// Never fails: the first error stops the run and comes back as a failed
    /// [`CommandResult`] carrying it as the cause. An invalid command fails
    /// before anything is sent to the pump.
    #[tracing::instrument(
        skip(self, command),
        fields(percentage = command.percentage, duration = command.duration_minutes)
    )]
    pub async fn execute(&self, command: SetTbr) -> CommandResult {
        let id = CommandId::new();
        tracing::info!(command_id = %id, %command, "running command");

        let result = match self.run(id, &command).await {
            Ok(message) => {
                tracing::info!(command_id = %id, %message, "command succeeded");
                CommandResult::enacted(message)
            }
            Err(err) => {
                tracing::error!(command_id = %id, error = %err, "command failed");
                CommandResult::failed(err)
            }
        };

        self.observer.finished(id, &result);
        result
    }

    async fn run(&self, id: CommandId, command: &SetTbr) -> Result<String, PumpScriptError> {
        command.ensure_valid()?;

        let session = Session::new(
            id,
            &self.navigator,
            &self.clock,
            &self.observer,
            &self.config,
        );
        let menu = self.config.menu_policy();
        let sub_menu = self.config.sub_menu_policy();

        session.enter(CommandPhase::SeekingMenu);
        session
            .reach_screen(CommandPhase::SeekingMenu, OPEN_TBR_MENU, None, &menu)
            .await?;

        session.enter(CommandPhase::EnteringSetScreen);
        session
            .reach_screen(
                CommandPhase::EnteringSetScreen,
                OPEN_SET_SCREEN,
                Some(ScreenType::TbrDuration),
                &sub_menu,
            )
            .await?;

        session.enter(CommandPhase::AdjustingPercentage);
        session
            .converge(
                CommandPhase::AdjustingPercentage,
                NumericField::PERCENTAGE,
                command.percentage,
            )
            .await?;

        if !command.is_cancellation() {
            session.enter(CommandPhase::EnteringDurationScreen);
            session
                .reach_screen(
                    CommandPhase::EnteringDurationScreen,
                    OPEN_DURATION_SCREEN,
                    Some(ScreenType::TbrSet),
                    &sub_menu,
                )
                .await?;

            session.enter(CommandPhase::AdjustingDuration);
            session
                .converge(
                    CommandPhase::AdjustingDuration,
                    NumericField::DURATION,
                    command.duration_minutes,
                )
                .await?;
        }

        let home = session.commit(command.is_cancellation()).await?;
        tracing::debug!(
            command_id = %id,
            alerts_acknowledged = home.alerts_acknowledged,
            "back on main menu"
        );

        session.enter(CommandPhase::VerifyingOutcome);
        let message = verify_outcome(
            &home.screen,
            command,
            self.config.runtime_tolerance_minutes,
        )?;
        Ok(message)
    }
}

impl<N, C, O> PumpCommand<SetTbr> for SetTbrService<N, C, O>
where
    N: PumpNavigator + Sync,
    C: Clock + Sync,
    O: CommandObserver + Sync,
{
    fn validate(&self, command: &SetTbr) -> Vec<Violation> {
        Self::validate(self, command)
    }

    fn execute(&self, command: SetTbr) -> impl Future<Output = CommandResult> + Send {
        Self::execute(self, command)
    }
}
