//! Navigator port: the driver that presses pump buttons and scrapes the display.
//!
//! Implementations sit on top of the remote link to the pump. Every call may
//! fail with [`PumpScriptError::Driver`] when the link drops; a `false` from a
//! transition method only means the driver gave up, not that the pump is in a
//! bad state.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use pumpscript_domain::error::PumpScriptError;
use pumpscript_domain::key::{Key, StepDirection};
use pumpscript_domain::screen::{AttributeKind, Screen, ScreenType};

/// Drives the pump's menu system one button press at a time.
pub trait PumpNavigator {
    /// Snapshot of what the display currently shows.
    fn current_screen(&self) -> impl Future<Output = Result<Screen, PumpScriptError>> + Send;

    /// Cycle through the top-level menus until one of type `target` shows.
    ///
    /// Returns `false` if the driver did not see the target within `timeout`.
    fn go_to_screen_of_type(
        &self,
        target: ScreenType,
        timeout: Duration,
    ) -> impl Future<Output = Result<bool, PumpScriptError>> + Send;

    /// From a `from` screen, press `key` and wait up to `timeout` for `to`.
    fn enter_sub_menu(
        &self,
        from: ScreenType,
        to: ScreenType,
        key: Key,
        timeout: Duration,
    ) -> impl Future<Output = Result<bool, PumpScriptError>> + Send;

    /// Press the menu key.
    fn press_navigation_key(&self) -> impl Future<Output = Result<(), PumpScriptError>> + Send;

    /// Press the check key.
    fn press_confirm_key(&self) -> impl Future<Output = Result<(), PumpScriptError>> + Send;

    /// Press the up or down key `steps` times, pausing `per_step_delay` between presses.
    fn press(
        &self,
        steps: u32,
        direction: StepDirection,
        per_step_delay: Duration,
    ) -> impl Future<Output = Result<(), PumpScriptError>> + Send;

    /// Block until the display redraws or `timeout` passes.
    fn wait_for_screen_update(
        &self,
        timeout: Duration,
    ) -> impl Future<Output = Result<(), PumpScriptError>> + Send;

    /// Read the blinking (being edited) numeric value of `kind`.
    ///
    /// A negative value means the driver could not read the field.
    fn read_live_number(
        &self,
        kind: AttributeKind,
    ) -> impl Future<Output = Result<i64, PumpScriptError>> + Send;

    /// Read the blinking duration, in minutes. Negative when unreadable.
    fn read_live_duration(&self) -> impl Future<Output = Result<i64, PumpScriptError>> + Send;
}

impl<T: PumpNavigator + Send + Sync> PumpNavigator for Arc<T> {
    fn current_screen(&self) -> impl Future<Output = Result<Screen, PumpScriptError>> + Send {
        (**self).current_screen()
    }

    fn go_to_screen_of_type(
        &self,
        target: ScreenType,
        timeout: Duration,
    ) -> impl Future<Output = Result<bool, PumpScriptError>> + Send {
        (**self).go_to_screen_of_type(target, timeout)
    }

    fn enter_sub_menu(
        &self,
        from: ScreenType,
        to: ScreenType,
        key: Key,
        timeout: Duration,
    ) -> impl Future<Output = Result<bool, PumpScriptError>> + Send {
        (**self).enter_sub_menu(from, to, key, timeout)
    }

    fn press_navigation_key(&self) -> impl Future<Output = Result<(), PumpScriptError>> + Send {
        (**self).press_navigation_key()
    }

    fn press_confirm_key(&self) -> impl Future<Output = Result<(), PumpScriptError>> + Send {
        (**self).press_confirm_key()
    }

    fn press(
        &self,
        steps: u32,
        direction: StepDirection,
        per_step_delay: Duration,
    ) -> impl Future<Output = Result<(), PumpScriptError>> + Send {
        (**self).press(steps, direction, per_step_delay)
    }

    fn wait_for_screen_update(
        &self,
        timeout: Duration,
    ) -> impl Future<Output = Result<(), PumpScriptError>> + Send {
        (**self).wait_for_screen_update(timeout)
    }

    fn read_live_number(
        &self,
        kind: AttributeKind,
    ) -> impl Future<Output = Result<i64, PumpScriptError>> + Send {
        (**self).read_live_number(kind)
    }

    fn read_live_duration(&self) -> impl Future<Output = Result<i64, PumpScriptError>> + Send {
        (**self).read_live_duration()
    }
}
