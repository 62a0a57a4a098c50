//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{PadkitError, Result};
use crate::keyboard::source::KeyCode;
use crate::keyboard::wait::WaitOptions;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub wait: WaitConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input device configuration
#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    /// Gamepad device paths in slot order (empty = auto-detect)
    #[serde(default)]
    pub gamepad_paths: Vec<String>,

    /// Keyboard device path (empty = auto-detect)
    #[serde(default)]
    pub keyboard_path: String,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// Calibration file configuration
#[derive(Debug, Deserialize, Clone)]
pub struct CalibrationConfig {
    #[serde(default = "default_calibration_path")]
    pub path: String,

    /// Deadzone used when no calibration file exists
    #[serde(default = "default_deadzone")]
    pub default_deadzone: f32,

    /// Key code that re-reads the calibration file
    #[serde(default = "default_reload_key")]
    pub reload_key: u16,
}

/// Wait-for-press configuration
#[derive(Debug, Deserialize, Clone)]
pub struct WaitConfig {
    #[serde(default = "default_wait_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_wait_timeout_ms")]
    pub timeout_ms: u64,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Directory for daily-rotated log files (empty = stdout only)
    #[serde(default)]
    pub dir: String,
}

// Default value functions
fn default_poll_interval_ms() -> u64 { 16 }

fn default_calibration_path() -> String { "calibration.xml".to_string() }
fn default_deadzone() -> f32 { 0.1 }
fn default_reload_key() -> u16 { KeyCode::R.0 }

fn default_wait_poll_interval_ms() -> u64 { 1 }
fn default_wait_timeout_ms() -> u64 { 30_000 }

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            gamepad_paths: Vec::new(),
            keyboard_path: String::new(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            path: default_calibration_path(),
            default_deadzone: default_deadzone(),
            reload_key: default_reload_key(),
        }
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_wait_poll_interval_ms(),
            timeout_ms: default_wait_timeout_ms(),
        }
    }
}

impl WaitConfig {
    /// Wait options for [`wait_for_press`](crate::keyboard::wait::wait_for_press)
    pub fn options(&self) -> WaitOptions {
        WaitOptions {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use padkit::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        if self.input.poll_interval_ms == 0 || self.input.poll_interval_ms > 1000 {
            return Err(invalid("input poll_interval_ms must be between 1 and 1000"));
        }

        if self.input.gamepad_paths.len() > 4 {
            return Err(invalid("at most 4 gamepad_paths can be configured"));
        }

        if self.input.gamepad_paths.iter().any(|p| p.is_empty()) {
            return Err(invalid("gamepad_paths entries cannot be empty"));
        }

        if self.calibration.path.is_empty() {
            return Err(invalid("calibration path cannot be empty"));
        }

        if !(0.0..1.0).contains(&self.calibration.default_deadzone) {
            return Err(invalid("default_deadzone must be in [0.0, 1.0)"));
        }

        if self.calibration.reload_key == 0 {
            return Err(invalid("reload_key must be a non-zero key code"));
        }

        if self.wait.poll_interval_ms == 0 || self.wait.poll_interval_ms > 1000 {
            return Err(invalid("wait poll_interval_ms must be between 1 and 1000"));
        }

        if self.wait.timeout_ms == 0 || self.wait.timeout_ms > 600_000 {
            return Err(invalid("wait timeout_ms must be between 1 and 600000"));
        }

        Ok(())
    }
}

fn invalid(message: &str) -> PadkitError {
    PadkitError::Config(toml::de::Error::custom(message))
}
