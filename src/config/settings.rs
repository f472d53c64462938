//! Configuration settings for chronos.
//!
//! Settings are loaded from `<root>/config.yaml`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::ChronosError;
use crate::features::focus::{require_cycle_length, TimerSettings};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Focus timer settings.
    pub focus: FocusConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    pub default_output: OutputFormat,
    /// Color output setting.
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Focus timer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FocusConfig {
    /// Work stage length in minutes.
    pub work_minutes: u32,
    /// Short break length in minutes.
    pub short_break_minutes: u32,
    /// Long break length in minutes.
    pub long_break_minutes: u32,
    /// Number of work stages before a long break.
    pub pomodoros_per_long_break: u32,
    /// Ring the terminal bell when a stage finishes.
    pub bell: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: OutputFormat::Pretty,
            color: ColorSetting::Auto,
        }
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            pomodoros_per_long_break: 4,
            bell: true,
        }
    }
}

impl FocusConfig {
    /// Convert to engine settings.
    ///
    /// # Errors
    ///
    /// Returns `ChronosError::Config` if any duration or the cycle length is zero.
    pub fn timer_settings(&self) -> Result<TimerSettings, ChronosError> {
        TimerSettings::from_minutes(
            self.work_minutes,
            self.short_break_minutes,
            self.long_break_minutes,
            self.pomodoros_per_long_break,
        )
        .map_err(|e| ChronosError::Config(format!("Invalid focus settings: {e}")))
    }
}

/// Keys accepted by [`Config::set`].
pub const SETTABLE_KEYS: &[&str] = &[
    "general.default_output",
    "general.color",
    "focus.work_minutes",
    "focus.short_break_minutes",
    "focus.long_break_minutes",
    "focus.pomodoros_per_long_break",
    "focus.bell",
];

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, ChronosError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, ChronosError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            ChronosError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            ChronosError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save(&self) -> Result<(), ChronosError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        self.save_to_path(&paths.config_file)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), ChronosError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| ChronosError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            ChronosError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })?;
        tracing::info!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Set a single value by dotted key, e.g. `focus.work_minutes`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an unknown key or a value that does not
    /// parse for that key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ChronosError> {
        let value = value.trim();
        match key {
            "general.default_output" => {
                self.general.default_output = parse_enum(key, value)?;
            }
            "general.color" => self.general.color = parse_enum(key, value)?,
            "focus.work_minutes" => self.focus.work_minutes = parse_positive(key, value)?,
            "focus.short_break_minutes" => {
                self.focus.short_break_minutes = parse_positive(key, value)?;
            }
            "focus.long_break_minutes" => {
                self.focus.long_break_minutes = parse_positive(key, value)?;
            }
            "focus.pomodoros_per_long_break" => {
                let per = parse_positive(key, value)?;
                self.focus.pomodoros_per_long_break = require_cycle_length(per)?.get();
            }
            "focus.bell" => {
                self.focus.bell = value.parse().map_err(|_| {
                    ChronosError::InvalidInput(format!("{key} expects true or false, got '{value}'"))
                })?;
            }
            _ => {
                return Err(ChronosError::InvalidInput(format!(
                    "Unknown config key '{key}'. Valid keys: {}",
                    SETTABLE_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u32, ChronosError> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ChronosError::InvalidInput(format!(
            "{key} expects a whole number greater than zero, got '{value}'"
        ))),
    }
}

fn parse_enum<T: serde::de::DeserializeOwned>(key: &str, value: &str) -> Result<T, ChronosError> {
    serde_yaml::from_str(&value.to_lowercase())
        .map_err(|_| ChronosError::InvalidInput(format!("Invalid value '{value}' for {key}")))
}
