// SPDX-License-Identifier: MPL-2.0
//! Loading and saving of the `settings.toml` preferences file.
//!
//! # Configuration Sections
//!
//! - `[toasts]` - Default lifetime and position of new toasts
//! - `[diagnostics]` - Size of the lifecycle event buffer
//!
//! # Examples
//!
//! ```no_run
//! use mokhtabary_toasts::config::{self, Config};
//! use mokhtabary_toasts::toast::Position;
//!
//! let (mut config, _warning) = config::load();
//! config.toasts.position = Some(Position::Bottom);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::diagnostics::BufferCapacity;
use crate::error::{Error, Result};
use crate::toast::{Position, ToastDuration};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Warning key returned by [`load`] when an existing file could not be parsed.
pub const CONFIG_LOAD_WARNING: &str = "config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// Defaults applied to toasts raised without explicit values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToastsConfig {
    /// Time-to-live of a toast in milliseconds.
    #[serde(
        default = "default_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_ms: Option<u64>,

    /// Position adopted until a toast sets one explicitly.
    #[serde(default = "default_position", skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Default for ToastsConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            position: default_position(),
        }
    }
}

impl ToastsConfig {
    /// Resolved toast lifetime.
    #[must_use]
    pub fn duration(&self) -> ToastDuration {
        self.duration_ms
            .map(ToastDuration::from_millis)
            .unwrap_or_default()
    }

    /// Resolved initial position of the store.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position.unwrap_or_default()
    }
}

/// Diagnostics collection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticsConfig {
    /// Number of lifecycle events kept in memory.
    #[serde(
        default = "default_buffer_capacity",
        skip_serializing_if = "Option::is_none"
    )]
    pub buffer_capacity: Option<usize>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

impl DiagnosticsConfig {
    /// Resolved buffer capacity, clamped to the accepted range.
    #[must_use]
    pub fn capacity(&self) -> BufferCapacity {
        self.buffer_capacity
            .map(BufferCapacity::new)
            .unwrap_or_default()
    }
}

// =============================================================================
// Main Config Struct
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub toasts: ToastsConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

fn default_duration_ms() -> Option<u64> {
    Some(DEFAULT_TOAST_DURATION_MS)
}

fn default_position() -> Option<Position> {
    Some(Position::Top)
}

fn default_buffer_capacity() -> Option<usize> {
    Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
}

// =============================================================================
// Load / Save
// =============================================================================

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(_) => return (Config::default(), Some(CONFIG_LOAD_WARNING.to_string())),
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            toasts: ToastsConfig {
                duration_ms: Some(1_500),
                position: Some(Position::Bottom),
            },
            diagnostics: DiagnosticsConfig {
                buffer_capacity: Some(50),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        assert!(matches!(load_from_path(&config_path), Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_reports_warning_on_invalid_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[toasts\n")
            .expect("failed to write invalid toml");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some(CONFIG_LOAD_WARNING));
    }

    #[test]
    fn load_with_override_missing_file_is_silent_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().join("absent")));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn missing_sections_take_defaults() {
        let config: Config = toml::from_str("[toasts]\nposition = \"bottom\"\n")
            .expect("partial config should parse");

        assert_eq!(config.toasts.position(), Position::Bottom);
        assert_eq!(config.toasts.duration().as_millis(), DEFAULT_TOAST_DURATION_MS);
        assert_eq!(
            config.diagnostics.capacity().value(),
            DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY
        );
    }

    #[test]
    fn oversized_values_are_clamped_on_resolution() {
        let config = Config {
            toasts: ToastsConfig {
                duration_ms: Some(u64::MAX),
                position: None,
            },
            diagnostics: DiagnosticsConfig {
                buffer_capacity: Some(0),
            },
        };

        assert_eq!(config.toasts.duration().as_millis(), MAX_TOAST_DURATION_MS);
        assert_eq!(config.toasts.position(), Position::Top);
        assert_eq!(
            config.diagnostics.capacity().value(),
            MIN_DIAGNOSTICS_BUFFER_CAPACITY
        );
    }
}
