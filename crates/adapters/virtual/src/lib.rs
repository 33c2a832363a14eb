//! # pumpscript-adapter-virtual
//!
//! A simulated insulin pump implementing the [`PumpNavigator`] port, for
//! demonstration and end-to-end tests.
//!
//! ## Menus
//!
//! | Screen | Menu key | Check key | Up / Down |
//! |--------|----------|-----------|-----------|
//! | `MAIN_MENU` → `STOP_MENU` → `BOLUS_MENU` → `TBR_MENU` | next in carousel | (`TBR_MENU` only) open `TBR_SET` | |
//! | `TBR_SET` | open `TBR_DURATION` | commit | ±10% |
//! | `TBR_DURATION` | back to `TBR_SET` | commit | ±15 min |
//! | `WARNING_OR_ERROR` | | acknowledge | |
//!
//! Faults (frozen display, swallowed presses, stray alerts, a pump storing
//! the wrong value, a dropping link) are injected through
//! [`VirtualPumpConfig`].
//!
//! ## Dependency rule
//!
//! Depends on `pumpscript-app` (port traits) and `pumpscript-domain` only.

pub mod config;
pub mod error;
mod menu;

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use pumpscript_app::ports::PumpNavigator;
use pumpscript_domain::error::PumpScriptError;
use pumpscript_domain::key::{Key, StepDirection};
use pumpscript_domain::screen::{AttributeKind, Screen, ScreenType};

pub use config::{FaultConfig, RunningTbrConfig, VirtualPumpConfig};
pub use error::VirtualPumpError;
pub use menu::{OCCLUSION_ERROR, RunningTbr, TBR_CANCELLED_WARNING};

use menu::PumpState;

/// Upper bound on menu key presses needed to go round the carousel once.
const CAROUSEL_LEN: usize = 4;

/// Simulated pump behind a simulated link.
pub struct VirtualPump {
    link: Mutex<Link>,
}

struct Link {
    pump: PumpState,
    calls: u32,
    disconnect_after: Option<u32>,
    dropped_presses: u32,
}

impl VirtualPump {
    #[must_use]
    pub fn new(config: &VirtualPumpConfig) -> Self {
        Self {
            link: Mutex::new(Link {
                pump: PumpState::new(config),
                calls: 0,
                disconnect_after: config.faults.disconnect_after,
                dropped_presses: config.faults.dropped_presses,
            }),
        }
    }

    /// TBR currently delivered, as the pump itself knows it.
    #[must_use]
    pub fn running_tbr(&self) -> Option<RunningTbr> {
        self.lock().pump.running()
    }

    #[must_use]
    pub fn screen_type(&self) -> ScreenType {
        self.lock().pump.screen_type()
    }

    /// Keys pressed so far, including ignored ones.
    #[must_use]
    pub fn key_presses(&self) -> u32 {
        self.lock().pump.key_presses()
    }

    /// Driver calls made so far.
    #[must_use]
    pub fn calls(&self) -> u32 {
        self.lock().calls
    }

    fn lock(&self) -> MutexGuard<'_, Link> {
        self.link.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` as one driver call over the link.
    fn call<T>(&self, f: impl FnOnce(&mut Link) -> T) -> Result<T, VirtualPumpError> {
        let mut link = self.lock();
        if link.disconnect_after.is_some_and(|limit| link.calls >= limit) {
            tracing::warn!(calls = link.calls, "virtual pump link down");
            return Err(VirtualPumpError::Disconnected { calls: link.calls });
        }
        link.calls += 1;
        Ok(f(&mut link))
    }
}

impl Default for VirtualPump {
    fn default() -> Self {
        Self::new(&VirtualPumpConfig::default())
    }
}

fn is_top_level(screen: ScreenType) -> bool {
    matches!(
        screen,
        ScreenType::MainMenu | ScreenType::StopMenu | ScreenType::BolusMenu | ScreenType::TbrMenu
    )
}

impl PumpNavigator for VirtualPump {
    fn current_screen(&self) -> impl Future<Output = Result<Screen, PumpScriptError>> + Send {
        async move { self.call(|link| link.pump.render()).map_err(Into::into) }
    }

    fn go_to_screen_of_type(
        &self,
        target: ScreenType,
        _timeout: Duration,
    ) -> impl Future<Output = Result<bool, PumpScriptError>> + Send {
        async move {
            let reached = self.call(|link| {
                for _ in 0..=CAROUSEL_LEN {
                    let screen = link.pump.screen_type();
                    if screen == target {
                        return true;
                    }
                    if link.pump.is_stuck() || !is_top_level(screen) {
                        return false;
                    }
                    link.pump.press(Key::Menu);
                }
                false
            })?;
            tracing::debug!(%target, reached, "go to screen");
            Ok(reached)
        }
    }

    fn enter_sub_menu(
        &self,
        from: ScreenType,
        to: ScreenType,
        key: Key,
        _timeout: Duration,
    ) -> impl Future<Output = Result<bool, PumpScriptError>> + Send {
        async move {
            let reached = self.call(|link| {
                if link.pump.screen_type() != from {
                    return false;
                }
                link.pump.press(key);
                link.pump.screen_type() == to
            })?;
            tracing::debug!(%from, %to, ?key, reached, "enter sub menu");
            Ok(reached)
        }
    }

    fn press_navigation_key(&self) -> impl Future<Output = Result<(), PumpScriptError>> + Send {
        async move {
            self.call(|link| link.pump.press(Key::Menu))
                .map_err(Into::into)
        }
    }

    fn press_confirm_key(&self) -> impl Future<Output = Result<(), PumpScriptError>> + Send {
        async move {
            self.call(|link| link.pump.press(Key::Check))
                .map_err(Into::into)
        }
    }

    fn press(
        &self,
        steps: u32,
        direction: StepDirection,
        per_step_delay: Duration,
    ) -> impl Future<Output = Result<(), PumpScriptError>> + Send {
        async move {
            for step in 0..steps {
                if step > 0 && !per_step_delay.is_zero() {
                    tokio::time::sleep(per_step_delay).await;
                }
                self.call(|link| {
                    if link.dropped_presses > 0 {
                        link.dropped_presses -= 1;
                        tracing::trace!(%direction, "step press swallowed");
                    } else {
                        link.pump.press(direction.key());
                    }
                })?;
            }
            Ok(())
        }
    }

    fn wait_for_screen_update(
        &self,
        _timeout: Duration,
    ) -> impl Future<Output = Result<(), PumpScriptError>> + Send {
        // the simulated display redraws synchronously with each key press
        async move { self.call(|_| ()).map_err(Into::into) }
    }

    fn read_live_number(
        &self,
        kind: AttributeKind,
    ) -> impl Future<Output = Result<i64, PumpScriptError>> + Send {
        async move {
            let value = self.call(|link| match kind {
                AttributeKind::BasalRate => link.pump.live_percentage(),
                _ => None,
            })?;
            Ok(value.map_or(-1, i64::from))
        }
    }

    fn read_live_duration(&self) -> impl Future<Output = Result<i64, PumpScriptError>> + Send {
        async move {
            let value = self.call(|link| link.pump.live_duration())?;
            Ok(value.map_or(-1, i64::from))
        }
    }
}
