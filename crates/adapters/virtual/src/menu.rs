//! The simulated pump's menu state machine.
//!
//! Pure state: key presses go in, rendered screens come out. Timing and
//! locking live in the navigator that wraps it.

use pumpscript_domain::key::Key;
use pumpscript_domain::screen::{AttributeKind, AttributeValue, MenuTime, Screen, ScreenType};
use pumpscript_domain::tbr::{
    CANCEL_PERCENTAGE, DURATION_STEP, MAX_DURATION_MINUTES, MAX_PERCENTAGE, PERCENTAGE_STEP,
};

use crate::config::{FaultConfig, VirtualPumpConfig};

/// Warning number the pump shows after a running TBR is cancelled.
pub const TBR_CANCELLED_WARNING: u8 = 6;

/// Warning number used for an injected, unrelated alert.
pub const OCCLUSION_ERROR: u8 = 4;

const BASE_BASAL_UNITS_PER_HOUR: f64 = 0.85;

/// A temporary basal rate the pump is delivering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningTbr {
    pub percentage: u16,
    pub remaining_minutes: u16,
}

/// Everything the simulated pump remembers.
#[derive(Debug, Clone)]
pub struct PumpState {
    screen: ScreenType,
    warning: Option<u8>,
    editing_percentage: u16,
    editing_duration: u16,
    running: Option<RunningTbr>,
    cancellation_alert: bool,
    faults: FaultConfig,
    key_presses: u32,
}

impl PumpState {
    pub fn new(config: &VirtualPumpConfig) -> Self {
        Self {
            screen: ScreenType::MainMenu,
            warning: None,
            editing_percentage: 0,
            editing_duration: 0,
            running: config.running_tbr.map(|tbr| RunningTbr {
                percentage: tbr.percentage,
                remaining_minutes: tbr.remaining_minutes,
            }),
            cancellation_alert: config.cancellation_alert,
            faults: config.faults.clone(),
            key_presses: 0,
        }
    }

    pub fn screen_type(&self) -> ScreenType {
        self.screen
    }

    pub fn running(&self) -> Option<RunningTbr> {
        self.running
    }

    pub fn key_presses(&self) -> u32 {
        self.key_presses
    }

    /// Whether the display is frozen on its current screen.
    pub fn is_stuck(&self) -> bool {
        self.faults.stuck_on == Some(self.screen)
    }

    /// Value blinking on the percentage screen, or `None` elsewhere.
    pub fn live_percentage(&self) -> Option<u16> {
        (self.screen == ScreenType::TbrSet).then_some(self.editing_percentage)
    }

    /// Value blinking on the duration screen, or `None` elsewhere.
    pub fn live_duration(&self) -> Option<u16> {
        (self.screen == ScreenType::TbrDuration).then_some(self.editing_duration)
    }

    /// Apply one key press.
    pub fn press(&mut self, key: Key) {
        self.key_presses += 1;
        if self.is_stuck() {
            tracing::trace!(screen = %self.screen, ?key, "display frozen, key ignored");
            return;
        }

        let before = self.screen;
        match (self.screen, key) {
            (ScreenType::WarningOrError, Key::Check) => {
                self.warning = None;
                self.screen = ScreenType::MainMenu;
            }
            (ScreenType::WarningOrError, _) => {}
            (ScreenType::TbrMenu, Key::Check) => self.open_set_screen(),
            (ScreenType::TbrSet, Key::Up) => self.step_percentage(true),
            (ScreenType::TbrSet, Key::Down) => self.step_percentage(false),
            (ScreenType::TbrSet, Key::Menu) => self.screen = ScreenType::TbrDuration,
            (ScreenType::TbrDuration, Key::Up) => self.step_duration(true),
            (ScreenType::TbrDuration, Key::Down) => self.step_duration(false),
            (ScreenType::TbrDuration, Key::Menu) => self.screen = ScreenType::TbrSet,
            (ScreenType::TbrSet | ScreenType::TbrDuration, Key::Check) => self.commit(),
            (screen, Key::Menu) => self.screen = next_in_carousel(screen),
            _ => {}
        }
        tracing::trace!(from = %before, to = %self.screen, ?key, "key pressed");
    }

    /// What the display shows right now.
    pub fn render(&self) -> Screen {
        let screen = Screen::new(self.screen);
        match self.screen {
            ScreenType::MainMenu => match self.running {
                Some(tbr) => screen
                    .with_attribute(
                        AttributeKind::BasalRate,
                        AttributeValue::Number(
                            BASE_BASAL_UNITS_PER_HOUR * f64::from(tbr.percentage) / 100.0,
                        ),
                    )
                    .with_attribute(
                        AttributeKind::Tbr,
                        AttributeValue::Number(f64::from(tbr.percentage)),
                    )
                    .with_attribute(
                        AttributeKind::Runtime,
                        AttributeValue::Time(MenuTime::from_minutes(i64::from(
                            tbr.remaining_minutes,
                        ))),
                    ),
                None => screen.with_attribute(
                    AttributeKind::BasalRate,
                    AttributeValue::Number(BASE_BASAL_UNITS_PER_HOUR),
                ),
            },
            ScreenType::TbrSet => screen.with_attribute(
                AttributeKind::BasalRate,
                AttributeValue::Number(f64::from(self.editing_percentage)),
            ),
            ScreenType::TbrDuration => screen.with_attribute(
                AttributeKind::Runtime,
                AttributeValue::Time(MenuTime::from_minutes(i64::from(self.editing_duration))),
            ),
            ScreenType::WarningOrError => screen.with_attribute(
                AttributeKind::WarningCode,
                AttributeValue::Number(f64::from(self.warning.unwrap_or(0))),
            ),
            _ => screen,
        }
    }

    fn open_set_screen(&mut self) {
        let (percentage, duration) = match self.running {
            Some(tbr) => (tbr.percentage, round_up_to_step(tbr.remaining_minutes)),
            None => (to_u16(CANCEL_PERCENTAGE), 0),
        };
        self.editing_percentage = percentage;
        self.editing_duration = duration;
        self.screen = ScreenType::TbrSet;
    }

    fn step_percentage(&mut self, up: bool) {
        self.editing_percentage = step(
            self.editing_percentage,
            to_u16(PERCENTAGE_STEP),
            to_u16(MAX_PERCENTAGE),
            up,
        );
    }

    fn step_duration(&mut self, up: bool) {
        self.editing_duration = step(
            self.editing_duration,
            to_u16(DURATION_STEP),
            to_u16(MAX_DURATION_MINUTES),
            up,
        );
    }

    fn commit(&mut self) {
        if i64::from(self.editing_percentage) == CANCEL_PERCENTAGE {
            let was_running = self.running.take().is_some();
            if was_running && self.cancellation_alert {
                self.raise(TBR_CANCELLED_WARNING);
                return;
            }
        } else {
            let percentage = self
                .editing_percentage
                .saturating_add_signed(self.faults.stored_percentage_offset);
            self.running = Some(RunningTbr {
                percentage,
                remaining_minutes: self
                    .editing_duration
                    .saturating_sub(self.faults.runtime_drift_minutes),
            });
        }

        if self.faults.unexpected_alert {
            self.faults.unexpected_alert = false;
            self.raise(OCCLUSION_ERROR);
        } else {
            self.screen = ScreenType::MainMenu;
        }
    }

    fn raise(&mut self, warning: u8) {
        tracing::debug!(warning, "pump raised an alert");
        self.warning = Some(warning);
        self.screen = ScreenType::WarningOrError;
    }
}

fn next_in_carousel(screen: ScreenType) -> ScreenType {
    match screen {
        ScreenType::MainMenu => ScreenType::StopMenu,
        ScreenType::StopMenu => ScreenType::BolusMenu,
        ScreenType::BolusMenu => ScreenType::TbrMenu,
        _ => ScreenType::MainMenu,
    }
}

fn step(value: u16, size: u16, max: u16, up: bool) -> u16 {
    if up {
        value.saturating_add(size).min(max)
    } else {
        value.saturating_sub(size)
    }
}

fn round_up_to_step(minutes: u16) -> u16 {
    minutes.div_ceil(to_u16(DURATION_STEP)) * to_u16(DURATION_STEP)
}

fn to_u16(value: i64) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
