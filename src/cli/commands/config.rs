//! Configuration command implementation.

use std::path::Path;

use colored::Colorize;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::ChronosError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written, or the
/// key or value is invalid.
pub fn config(cmd: ConfigCommands, format: OutputFormat) -> Result<String, ChronosError> {
    let paths = Paths::new()?;
    paths.ensure_dirs()?;
    config_at(&paths.config_file, cmd, format)
}

fn config_at(path: &Path, cmd: ConfigCommands, format: OutputFormat) -> Result<String, ChronosError> {
    match cmd {
        ConfigCommands::Show => {
            let config = Config::load_from_path(path)?;
            show(&config, format)
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_from_path(path)?;
            config.set(&key, &value)?;
            config.focus.timer_settings()?;
            config.save_to_path(path)?;

            match format {
                OutputFormat::Json => to_json(&config),
                OutputFormat::Pretty => Ok(format!("{} {key} = {}", "Set".green(), value.trim())),
            }
        }
        ConfigCommands::Path => Ok(path.display().to_string()),
    }
}

fn show(config: &Config, format: OutputFormat) -> Result<String, ChronosError> {
    match format {
        OutputFormat::Json => to_json(config),
        OutputFormat::Pretty => serde_yaml::to_string(config)
            .map(|yaml| yaml.trim_end().to_string())
            .map_err(|e| ChronosError::Config(format!("Failed to serialize config: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_show_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");

        let output = config_at(&path, ConfigCommands::Show, OutputFormat::Pretty).unwrap();
        assert!(output.contains("work_minutes: 25"));
        assert!(output.contains("default_output: pretty"));
    }

    #[test]
    fn test_set_persists() {
        colored::control::set_override(false);
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");

        let output = config_at(
            &path,
            ConfigCommands::Set {
                key: "focus.long_break_minutes".to_string(),
                value: "20".to_string(),
            },
            OutputFormat::Pretty,
        )
        .unwrap();
        assert_eq!(output, "Set focus.long_break_minutes = 20");

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.focus.long_break_minutes, 20);
    }

    #[test]
    fn test_set_invalid_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");

        let result = config_at(
            &path,
            ConfigCommands::Set {
                key: "focus.work_minutes".to_string(),
                value: "0".to_string(),
            },
            OutputFormat::Pretty,
        );
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");

        let output = config_at(&path, ConfigCommands::Path, OutputFormat::Pretty).unwrap();
        assert!(output.ends_with("config.yaml"));
    }
}
