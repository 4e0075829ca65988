//! Play configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for a random-policy game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayConfig {
    /// Seed for X's policy.
    #[serde(default = "default_seed")]
    seed: u64,

    /// True when X moves first.
    #[serde(default = "default_start_x")]
    start_x: bool,

    /// Seed for O's policy. Defaults to `seed + 1`.
    #[serde(default)]
    o_seed: Option<u64>,
}

fn default_seed() -> u64 {
    42
}

fn default_start_x() -> bool {
    true
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            start_x: default_start_x(),
            o_seed: None,
        }
    }
}

impl PlayConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(seed = config.seed, start_x = config.start_x, "Config loaded successfully");
        Ok(config)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, seed: Option<u64>, o_first: bool) -> Self {
        if let Some(seed) = seed {
            self.seed = seed;
        }
        if o_first {
            self.start_x = false;
        }
        self
    }

    /// Seed used for O's policy.
    pub fn effective_o_seed(&self) -> u64 {
        self.o_seed.unwrap_or_else(|| self.seed.wrapping_add(1))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = PlayConfig::default();
        assert_eq!(*config.seed(), 42);
        assert!(*config.start_x());
        assert_eq!(config.effective_o_seed(), 43);
    }

    #[test]
    fn test_from_file_fills_missing_fields() {
        let file = write_config("seed = 7\n");
        let config = PlayConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.seed(), 7);
        assert!(*config.start_x());
        assert_eq!(config.effective_o_seed(), 8);
    }

    #[test]
    fn test_from_file_full() {
        let file = write_config("seed = 1\nstart_x = false\no_seed = 100\n");
        let config = PlayConfig::from_file(file.path()).unwrap();
        assert!(!*config.start_x());
        assert_eq!(config.effective_o_seed(), 100);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = write_config("seed = 1\nstart_x = true\n");
        let config = PlayConfig::from_file(file.path())
            .unwrap()
            .with_overrides(Some(5), true);
        assert_eq!(*config.seed(), 5);
        assert!(!*config.start_x());
    }

    #[test]
    fn test_bad_toml_is_reported() {
        let file = write_config("seed = \"many\"\n");
        let err = PlayConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = PlayConfig::from_file("/nonexistent/play.toml").unwrap_err();
        assert!(err.message.starts_with("Failed to read config file"));
    }
}
