//! Retry budgets and timings for each phase of a command.
//!
//! Every budget is an attempt count, not a wall-clock deadline: a stuck pump
//! turns into a failure after a bounded number of reads and presses.

use std::time::Duration;

use serde::Deserialize;

/// Budgets and delays injected into every phase of a command.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Attempts per screen transition.
    pub navigation_attempts: u32,
    /// Pause after a failed transition before inspecting the screen, in milliseconds.
    pub navigation_retry_delay_ms: u64,
    /// Driver timeout when cycling top-level menus, in milliseconds.
    pub menu_timeout_ms: u64,
    /// Driver timeout when entering a sub-menu, in milliseconds.
    pub sub_menu_timeout_ms: u64,
    /// How long to wait for the display to redraw, in milliseconds.
    pub screen_update_timeout_ms: u64,
    /// Pause between consecutive step presses, in milliseconds.
    pub step_delay_ms: u64,
    /// Read/press cycles allowed per numeric field.
    pub convergence_attempts: u32,
    /// Confirm presses allowed before the pump must leave the setting screens.
    pub confirm_attempts: u32,
    /// Screen updates allowed while waiting for the home screen.
    pub home_attempts: u32,
    /// Alerts that may be acknowledged while cancelling before giving up.
    pub max_alert_acks: u32,
    /// How far below the requested duration the remaining runtime may be.
    pub runtime_tolerance_minutes: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            navigation_attempts: 5,
            navigation_retry_delay_ms: 500,
            menu_timeout_ms: 3000,
            sub_menu_timeout_ms: 2000,
            screen_update_timeout_ms: 1000,
            step_delay_ms: 500,
            convergence_attempts: 30,
            confirm_attempts: 5,
            home_attempts: 10,
            max_alert_acks: 3,
            runtime_tolerance_minutes: 5,
        }
    }
}

impl EngineConfig {
    /// Retry policy for reaching a top-level menu.
    #[must_use]
    pub fn menu_policy(&self) -> NavigationPolicy {
        self.policy(self.menu_timeout_ms)
    }

    /// Retry policy for entering a sub-menu.
    #[must_use]
    pub fn sub_menu_policy(&self) -> NavigationPolicy {
        self.policy(self.sub_menu_timeout_ms)
    }

    fn policy(&self, transition_timeout_ms: u64) -> NavigationPolicy {
        NavigationPolicy {
            attempts: self.navigation_attempts,
            retry_delay: Duration::from_millis(self.navigation_retry_delay_ms),
            transition_timeout: Duration::from_millis(transition_timeout_ms),
            update_timeout: self.screen_update_timeout(),
        }
    }

    #[must_use]
    pub fn screen_update_timeout(&self) -> Duration {
        Duration::from_millis(self.screen_update_timeout_ms)
    }

    #[must_use]
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// Name of the first attempt budget set to zero, if any.
    ///
    /// A zero budget would fail every command without touching the pump.
    #[must_use]
    pub fn zero_budget(&self) -> Option<&'static str> {
        [
            ("navigation_attempts", self.navigation_attempts),
            ("convergence_attempts", self.convergence_attempts),
            ("confirm_attempts", self.confirm_attempts),
            ("home_attempts", self.home_attempts),
        ]
        .into_iter()
        .find(|(_, budget)| *budget == 0)
        .map(|(name, _)| name)
    }
}

/// Bounded-retry settings for one screen transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationPolicy {
    pub attempts: u32,
    pub retry_delay: Duration,
    pub transition_timeout: Duration,
    pub update_timeout: Duration,
}
