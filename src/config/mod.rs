//! Configuration for the exercise engine and the text oracle.
//!
//! Every field has a serde default, so a config file only needs the values
//! it wants to change and a missing file means "all defaults". The oracle
//! API key is never stored in the file; it is read from the environment
//! variable named by [`OracleConfig::api_key_env`].

pub mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::ConfigError;

/// Default milliseconds between countdown ticks.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Default milliseconds between a phase reaching zero and the step advancing.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 400;

/// Default Gemini model name.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default Gemini REST base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default environment variable holding the API key.
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_settle_delay_ms() -> u64 {
    DEFAULT_SETTLE_DELAY_MS
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

// ============================================================================
// TimingConfig
// ============================================================================

/// Countdown timing parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Milliseconds per countdown tick (100-10000)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Milliseconds to wait after a phase hits zero before advancing (0-5000)
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

impl TimingConfig {
    /// Tick interval as a [`Duration`].
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Settle delay as a [`Duration`].
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Validates the timing values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(100..=10_000).contains(&self.tick_interval_ms) {
            return Err(ConfigError::OutOfRange {
                field: "tick_interval_ms",
                reason: "100-10000",
            });
        }
        if self.settle_delay_ms > 5_000 {
            return Err(ConfigError::OutOfRange {
                field: "settle_delay_ms",
                reason: "0-5000",
            });
        }
        Ok(())
    }
}

// ============================================================================
// OracleConfig
// ============================================================================

/// Settings for the hosted text oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Model name appended to the base URL
    #[serde(default = "default_model")]
    pub model: String,

    /// REST base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request timeout in seconds (1-300)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl OracleConfig {
    /// Reads the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Validates the oracle settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::OutOfRange {
                field: "model",
                reason: "non-empty model name",
            });
        }
        if !(1..=300).contains(&self.timeout_seconds) {
            return Err(ConfigError::OutOfRange {
                field: "timeout_seconds",
                reason: "1-300",
            });
        }
        Ok(())
    }
}

// ============================================================================
// ZenConfig
// ============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZenConfig {
    /// Countdown timing
    #[serde(default)]
    pub timing: TimingConfig,

    /// Text oracle settings
    #[serde(default)]
    pub oracle: OracleConfig,
}

impl ZenConfig {
    /// Default config file location (`~/.zensoul/config.json`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".zensoul").join("config.json"))
    }

    /// Loads configuration from `path`, or from [`ZenConfig::default_path`]
    /// when `path` is `None`.
    ///
    /// A missing file yields the defaults; an unreadable, malformed or
    /// out-of-range file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config: ZenConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        config.validate()?;

        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Validates all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timing.validate()?;
        self.oracle.validate()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    mod timing_config_tests {
        use super::*;

        #[test]
        fn test_default_values() {
            let timing = TimingConfig::default();
            assert_eq!(timing.tick_interval(), Duration::from_millis(1000));
            assert_eq!(timing.settle_delay(), Duration::from_millis(400));
            assert!(timing.validate().is_ok());
        }

        #[test]
        fn test_validate_tick_interval_bounds() {
            let timing = TimingConfig {
                tick_interval_ms: 99,
                ..TimingConfig::default()
            };
            assert!(timing.validate().is_err());

            let timing = TimingConfig {
                tick_interval_ms: 10_000,
                ..TimingConfig::default()
            };
            assert!(timing.validate().is_ok());
        }

        #[test]
        fn test_validate_settle_delay_bounds() {
            let timing = TimingConfig {
                settle_delay_ms: 0,
                ..TimingConfig::default()
            };
            assert!(timing.validate().is_ok());

            let timing = TimingConfig {
                settle_delay_ms: 5_001,
                ..TimingConfig::default()
            };
            assert!(timing.validate().is_err());
        }
    }

    mod oracle_config_tests {
        use super::*;

        #[test]
        fn test_default_values() {
            let oracle = OracleConfig::default();
            assert_eq!(oracle.model, DEFAULT_MODEL);
            assert_eq!(oracle.api_key_env, "GEMINI_API_KEY");
            assert_eq!(oracle.timeout(), Duration::from_secs(30));
        }

        #[test]
        fn test_api_key_from_custom_env_var() {
            let oracle = OracleConfig {
                api_key_env: "ZENSOUL_TEST_KEY_SET".to_string(),
                ..OracleConfig::default()
            };
            std::env::set_var("ZENSOUL_TEST_KEY_SET", "secret");
            assert_eq!(oracle.api_key(), Some("secret".to_string()));
        }

        #[test]
        fn test_api_key_missing() {
            let oracle = OracleConfig {
                api_key_env: "ZENSOUL_TEST_KEY_NEVER_SET".to_string(),
                ..OracleConfig::default()
            };
            assert_eq!(oracle.api_key(), None);
        }

        #[test]
        fn test_validate_timeout() {
            let oracle = OracleConfig {
                timeout_seconds: 0,
                ..OracleConfig::default()
            };
            assert!(oracle.validate().is_err());
        }
    }

    mod zen_config_tests {
        use super::*;

        #[test]
        fn test_partial_file_uses_defaults() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(file, r#"{{"timing": {{"settle_delay_ms": 250}}}}"#).unwrap();

            let config = ZenConfig::load(Some(file.path())).unwrap();
            assert_eq!(config.timing.settle_delay_ms, 250);
            assert_eq!(config.timing.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
            assert_eq!(config.oracle, OracleConfig::default());
        }

        #[test]
        fn test_missing_file_is_default() {
            let dir = tempfile::tempdir().unwrap();
            let config = ZenConfig::load(Some(&dir.path().join("absent.json"))).unwrap();
            assert_eq!(config, ZenConfig::default());
        }

        #[test]
        fn test_malformed_file_is_error() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(file, "not json").unwrap();

            let err = ZenConfig::load(Some(file.path())).unwrap_err();
            assert!(matches!(err, ConfigError::Parse { .. }));
        }

        #[test]
        fn test_out_of_range_file_is_error() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(file, r#"{{"timing": {{"tick_interval_ms": 5}}}}"#).unwrap();

            let err = ZenConfig::load(Some(file.path())).unwrap_err();
            assert!(matches!(err, ConfigError::OutOfRange { .. }));
        }
    }
}
