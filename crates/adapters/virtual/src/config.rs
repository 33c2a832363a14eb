//! Virtual pump configuration.

use pumpscript_domain::screen::ScreenType;
use serde::Deserialize;

/// Initial state and injected faults of the simulated pump.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VirtualPumpConfig {
    /// TBR already running when the pump starts.
    pub running_tbr: Option<RunningTbrConfig>,
    /// Whether cancelling a running TBR raises the "TBR cancelled" alert.
    pub cancellation_alert: bool,
    pub faults: FaultConfig,
}

impl Default for VirtualPumpConfig {
    fn default() -> Self {
        Self {
            running_tbr: None,
            cancellation_alert: true,
            faults: FaultConfig::default(),
        }
    }
}

/// A TBR in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RunningTbrConfig {
    pub percentage: u16,
    pub remaining_minutes: u16,
}

/// Misbehaviour to simulate. Everything is off by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FaultConfig {
    /// Screen on which the display freezes and ignores every key.
    pub stuck_on: Option<ScreenType>,
    /// Number of step presses swallowed before the pump reacts again.
    pub dropped_presses: u32,
    /// Raise an unrelated alert right after the next confirm.
    pub unexpected_alert: bool,
    /// Added to the percentage the pump actually stores.
    pub stored_percentage_offset: i16,
    /// Minutes the runtime has already counted down when the home screen shows.
    pub runtime_drift_minutes: u16,
    /// Number of driver calls that succeed before the link drops.
    pub disconnect_after: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_well_behaved_defaults() {
        let config = VirtualPumpConfig::default();
        assert!(config.running_tbr.is_none());
        assert!(config.cancellation_alert);
        assert_eq!(config.faults, FaultConfig::default());
    }

    #[test]
    fn should_deserialize_faults_from_toml() {
        let toml = r#"
            [running_tbr]
            percentage = 150
            remaining_minutes = 45

            [faults]
            stuck_on = "BOLUS_MENU"
            dropped_presses = 2
        "#;
        let config: VirtualPumpConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.running_tbr,
            Some(RunningTbrConfig {
                percentage: 150,
                remaining_minutes: 45,
            })
        );
        assert_eq!(config.faults.stuck_on, Some(ScreenType::BolusMenu));
        assert_eq!(config.faults.dropped_presses, 2);
        assert!(config.cancellation_alert);
    }
}
