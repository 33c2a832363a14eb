//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `pumpscript.toml` in the working directory unless another path
//! is given. Every field has a sensible default so the file is optional.
//! Environment variables take precedence over file values.

use pumpscript_adapter_virtual::VirtualPumpConfig;
use pumpscript_app::config::EngineConfig;
use serde::Deserialize;

/// Default configuration file name.
pub const DEFAULT_PATH: &str = "pumpscript.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Retry budgets and timings of the command engine.
    pub engine: EngineConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Initial state and faults of the simulated pump.
    pub pump: VirtualPumpConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "pumpscript=info,pumpscript_app=info,pumpscript_adapter_virtual=warn"
                .to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is
    /// malformed, or if the result fails validation.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PUMPSCRIPT_STEP_DELAY_MS")
            && let Ok(delay) = val.parse()
        {
            self.engine.step_delay_ms = delay;
        }
        if let Ok(val) = std::env::var("PUMPSCRIPT_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(budget) = self.engine.zero_budget() {
            return Err(ConfigError::Validation(format!(
                "engine.{budget} must be non-zero"
            )));
        }
        if self.engine.runtime_tolerance_minutes < 0 {
            return Err(ConfigError::Validation(
                "engine.runtime_tolerance_minutes must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pumpscript_domain::screen::ScreenType;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.engine, EngineConfig::default());
        assert!(config.logging.filter.contains("pumpscript=info"));
        assert!(config.pump.running_tbr.is_none());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.engine.convergence_attempts, 30);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [engine]
            navigation_attempts = 3
            step_delay_ms = 0

            [logging]
            filter = 'debug'

            [pump]
            cancellation_alert = false

            [pump.running_tbr]
            percentage = 200
            remaining_minutes = 60

            [pump.faults]
            stuck_on = 'TBR_SET'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.engine.navigation_attempts, 3);
        assert_eq!(config.engine.step_delay_ms, 0);
        assert_eq!(config.logging.filter, "debug");
        assert!(!config.pump.cancellation_alert);
        assert_eq!(config.pump.running_tbr.map(|tbr| tbr.percentage), Some(200));
        assert_eq!(config.pump.faults.stuck_on, Some(ScreenType::TbrSet));
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.engine.navigation_attempts, 5);
    }

    #[test]
    fn should_reject_zero_attempt_budget() {
        let mut config = Config::default();
        config.engine.convergence_attempts = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: engine.convergence_attempts must be non-zero"
        );
    }

    #[test]
    fn should_reject_negative_tolerance() {
        let mut config = Config::default();
        config.engine.runtime_tolerance_minutes = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
