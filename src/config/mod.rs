//! Configuration management for chronos.
//!
//! This module handles loading and saving configuration from the data root.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{ColorSetting, Config, FocusConfig, GeneralConfig, SETTABLE_KEYS};
