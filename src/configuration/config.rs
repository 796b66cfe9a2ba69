use std::path::Path;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error_handling::types::ConfigError;
use crate::surface::registry::LOCATOR_FORMAT;

/// Engine configuration that defines all runtime parameters.
///
/// This structure holds the complete configuration for the engine: the
/// inactivity timeout that auto-stops a quiet session, the locator replays go
/// against, and an optional cap on the keystroke buffer. It uses the `serde`
/// and `toml` derive machinery for file parsing; every field has a default so
/// a partial (or absent) file is valid.
///
/// # Examples
///
/// ```
/// use keyecho::configuration::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.inactivity_timeout_ms, 5000);
/// assert_eq!(config.target_locator, "#output");
/// ```
///
/// # Fields Overview
///
/// - `inactivity_timeout_ms`: quiescence duration after which an active
///   session auto-stops; must be greater than zero
/// - `target_locator`: `#name` locator of the surface replays write into
/// - `max_keystrokes`: upper bound on buffered keystrokes per session,
///   `0` meaning unlimited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Inactivity timeout in milliseconds.
    ///
    /// Specifies how long a session may stay quiet before it is automatically
    /// stopped. Setting this to `0` is rejected by [`validate`](Self::validate);
    /// a session that never times out would be stuck Recording forever.
    #[serde(default = "default_inactivity_timeout_ms")]
    pub inactivity_timeout_ms: u64,

    /// Locator of the replay target surface.
    ///
    /// Must match the `#name` locator format accepted by the surface
    /// registry.
    #[serde(default = "default_target_locator")]
    pub target_locator: String,

    /// Maximum number of keystrokes buffered per session.
    ///
    /// `0` means unlimited. When the cap is reached further keystrokes are
    /// dropped while the session itself stays alive.
    #[serde(default)]
    pub max_keystrokes: usize,
}

fn default_inactivity_timeout_ms() -> u64 {
    5000
}

fn default_target_locator() -> String {
    "#output".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout_ms: default_inactivity_timeout_ms(),
            target_locator: default_target_locator(),
            max_keystrokes: 0,
        }
    }
}

impl EngineConfig {
    /// Loads and validates a configuration from a TOML file.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    /// - [`ConfigError::IoError`] if the file cannot be read
    /// - [`ConfigError::TomlError`] if the file is not valid TOML
    /// - any error produced by [`validate`](Self::validate)
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: EngineConfig =
            toml::from_str(&raw).map_err(|e| ConfigError::TomlError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the field-level constraints.
    ///
    /// # Errors
    /// - [`ConfigError::NotInRange`] if `inactivity_timeout_ms` is zero
    /// - [`ConfigError::BadLocatorFormat`] if `target_locator` does not match
    ///   the `#name` format
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inactivity_timeout_ms == 0 {
            return Err(ConfigError::NotInRange(
                "inactivity_timeout_ms must be greater than 0".to_string(),
            ));
        }
        let locator_format = Regex::new(LOCATOR_FORMAT).expect("locator format regex");
        if !locator_format.is_match(&self.target_locator) {
            return Err(ConfigError::BadLocatorFormat(self.target_locator.clone()));
        }
        Ok(())
    }

    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_millis(self.inactivity_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        config.validate().expect("default config validates");
        assert_eq!(config.inactivity_timeout(), Duration::from_millis(5000));
        assert_eq!(config.max_keystrokes, 0);
    }

    #[test]
    fn from_file_reads_values() {
        let mut file = NamedTempFile::new().expect("create temp config");
        writeln!(
            file,
            "inactivity_timeout_ms = 1200\ntarget_locator = \"#entry\"\nmax_keystrokes = 64"
        )
        .expect("write temp config");

        let config = EngineConfig::from_file(file.path()).expect("load config");
        assert_eq!(config.inactivity_timeout_ms, 1200);
        assert_eq!(config.target_locator, "#entry");
        assert_eq!(config.max_keystrokes, 64);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let mut file = NamedTempFile::new().expect("create temp config");
        writeln!(file, "max_keystrokes = 8").expect("write temp config");

        let config = EngineConfig::from_file(file.path()).expect("load config");
        assert_eq!(config.inactivity_timeout_ms, 5000);
        assert_eq!(config.target_locator, "#output");
        assert_eq!(config.max_keystrokes, 8);
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = EngineConfig {
            inactivity_timeout_ms: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotInRange(_))
        ));
    }

    #[test]
    fn rejects_malformed_locator() {
        let config = EngineConfig {
            target_locator: "output".to_string(),
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BadLocatorFormat(_))
        ));
    }

    #[test]
    fn rejects_invalid_toml() {
        let mut file = NamedTempFile::new().expect("create temp config");
        writeln!(file, "inactivity_timeout_ms = \"soon\"").expect("write temp config");

        assert!(matches!(
            EngineConfig::from_file(file.path()),
            Err(ConfigError::TomlError(_))
        ));
    }
}
