use std::{env, path::PathBuf};

/// File name of the per-project configuration, looked up in the working directory.
pub const PROJECT_CONFIG: &str = "settings-docgen.toml";

/// Utility struct for locating configuration files
///
/// Follows the XDG Base Directory specification for the user-level file.
pub struct ConfigPaths;

impl ConfigPaths {
    /// Returns the user configuration directory, if one can be determined
    ///
    /// - First checks `XDG_CONFIG_HOME`
    /// - Falls back to `$HOME/.config`
    /// - Appends "settings-docgen" to the base config directory
    pub fn config_dir() -> Option<PathBuf> {
        let config_home = env::var("XDG_CONFIG_HOME")
            .or_else(|_| env::var("HOME").map(|home| format!("{home}/.config")))
            .ok()?;

        Some(PathBuf::from(config_home).join("settings-docgen"))
    }

    /// Returns the path to the user configuration file
    pub fn user_config() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns the path to the project configuration file in the working directory
    pub fn project_config() -> PathBuf {
        PathBuf::from(PROJECT_CONFIG)
    }
}
