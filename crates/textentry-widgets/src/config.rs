//! Declarative configuration for text entries.
//!
//! ```yaml
//! multiline: true
//! read_only: false
//! max_length: 140
//! value: "Hello"
//! ```

use crate::text_entry::TextEntry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for entry configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },
}

/// Construction options for a [`TextEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EntryConfig {
    /// Initial value
    pub value: String,
    /// Allow line breaks
    pub multiline: bool,
    /// Start out read-only
    pub read_only: bool,
    /// Maximum length in characters (0 = unlimited)
    pub max_length: usize,
}

impl EntryConfig {
    /// Parse and validate a configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check that the initial value fits the maximum length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let len = self.value.chars().count();
        if self.max_length > 0 && len > self.max_length {
            return Err(ConfigError::InvalidValue {
                field: "value".to_string(),
                message: format!(
                    "{len} characters exceed max_length {}",
                    self.max_length
                ),
            });
        }
        Ok(())
    }
}

impl TextEntry {
    /// Build an entry from configuration. Emits nothing.
    #[must_use]
    pub fn from_config(config: &EntryConfig) -> Self {
        Self::new()
            .multiline(config.multiline)
            .read_only(config.read_only)
            .max_length(config.max_length)
            .value(&config.value)
    }

    /// Snapshot the current settings and value as configuration.
    #[must_use]
    pub fn to_config(&self) -> EntryConfig {
        EntryConfig {
            value: self.get_value().to_string(),
            multiline: self.is_multiline(),
            read_only: !self.is_editable(),
            max_length: self.get_max_length().unwrap_or(0),
        }
    }
}

impl From<&EntryConfig> for TextEntry {
    fn from(config: &EntryConfig) -> Self {
        Self::from_config(config)
    }
}
