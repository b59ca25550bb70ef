//! Assertion configuration.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::ConfigError;

/// Configuration of an [`Assertion`](crate::Assertion).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssertConfig {
    /// Stop the test at the first failure instead of recording it.
    pub fatal: bool,

    /// Longest rendering of a single value in failure messages.
    pub max_value_len: usize,

    /// Test logging settings.
    pub logging: LogSettings,
}

impl Default for AssertConfig {
    fn default() -> Self {
        Self {
            fatal: false,
            max_value_len: 1024,
            logging: LogSettings::default(),
        }
    }
}

impl AssertConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_value_len == 0 {
            return Err(ConfigError::invalid_value(
                "max_value_len",
                "must be greater than zero",
            ));
        }
        self.logging.validate()
    }
}

/// Test logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// Whether test logging is installed at all.
    pub enabled: bool,

    /// Filter directive (e.g. "warn", "assay=trace").
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "warn".to_string(),
        }
    }
}

impl LogSettings {
    /// Validates the filter directive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AssertConfig::default();
        assert!(!config.fatal);
        assert_eq!(config.max_value_len, 1024);
        assert!(config.logging.enabled);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_max_value_len_is_invalid() {
        let config = AssertConfig {
            max_value_len: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "max_value_len"
        ));
    }

    #[test]
    fn test_invalid_level() {
        let settings = LogSettings {
            enabled: true,
            level: "assay=notalevel".to_string(),
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AssertConfig = toml::from_str("fatal = true").unwrap();
        assert!(config.fatal);
        assert_eq!(config.max_value_len, 1024);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<AssertConfig, _> = toml::from_str("colour = true");
        assert!(result.is_err());
    }
}
