// SPDX-License-Identifier: MPL-2.0
//! Config directory resolution.
//!
//! Paths are resolved in the following priority order:
//! 1. **Explicit override** - `--config-dir` on the command line, or tests
//! 2. **Environment variable** (`MOKHTABARY_CONFIG_DIR`)
//! 3. **Platform default** - via `dirs` crate

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "Mokhtabary";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "MOKHTABARY_CONFIG_DIR";

/// Returns the application config directory path with an optional override.
///
/// Returns `None` if no override is given and the platform config directory
/// cannot be determined.
pub fn config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}
