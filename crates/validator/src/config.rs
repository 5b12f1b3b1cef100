//! Validator policy configuration
//!
//! [`ValidatorConfig`] holds the knobs that change how built-in validators
//! behave, and builds validators with that policy applied. Every field has a
//! default, so an empty document is a valid configuration.
//!
//! ```json
//! {
//!   "required": { "reject_zero": true },
//!   "string_length": { "mode": "bytes" },
//!   "paths": { "base_dir": "/srv/uploads" }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validators::{LengthMode, PathExists, PathKind, Required, StringLength};

/// Validator configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Presence policy
    pub required: RequiredConfig,

    /// String length counting
    pub string_length: StringLengthConfig,

    /// File system validators
    pub paths: PathConfig,
}

/// Presence policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequiredConfig {
    /// Treat numeric zero as a missing value
    pub reject_zero: bool,
}

/// String length counting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StringLengthConfig {
    /// Count chars or bytes
    pub mode: LengthMode,
}

/// File system validators
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathConfig {
    /// Directory that relative paths are resolved against
    pub base_dir: Option<PathBuf>,
}

/// Failure to load a [`ValidatorConfig`].
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid validator config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ValidatorConfig {
    /// Parses a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    // ------------------------------------------------------------------------
    // Factories
    // ------------------------------------------------------------------------

    /// [`Required`] with the configured zero policy.
    #[must_use]
    pub fn required(&self) -> Required {
        Required {
            reject_zero: self.required.reject_zero,
        }
    }

    /// [`StringLength`] with the configured counting mode.
    #[must_use]
    pub fn string_length(&self, min: usize, max: usize) -> StringLength {
        StringLength::new(min, max).with_mode(self.string_length.mode)
    }

    /// File existence check relative to the configured base directory.
    #[must_use]
    pub fn file_exists(&self) -> PathExists {
        self.path_exists(PathKind::File)
    }

    /// Directory existence check relative to the configured base directory.
    #[must_use]
    pub fn directory_exists(&self) -> PathExists {
        self.path_exists(PathKind::Directory)
    }

    fn path_exists(&self, kind: PathKind) -> PathExists {
        PathExists {
            kind,
            base_dir: self.paths.base_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Validate;
    use crate::member::Value;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(ValidatorConfig::from_json_str("{}").unwrap(), ValidatorConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = ValidatorConfig::from_json_str(r#"{ "string_length": { "mode": "bytes" } }"#).unwrap();
        assert_eq!(config.string_length.mode, LengthMode::Bytes);
        assert!(!config.required.reject_zero);
        assert_eq!(config.paths.base_dir, None);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let error = ValidatorConfig::from_json_str(r#"{ "requried": {} }"#).unwrap_err();
        assert!(matches!(error, SettingsError::Parse(_)));
    }

    #[test]
    fn test_factories_apply_policy() {
        let config = ValidatorConfig::from_json_str(r#"{ "required": { "reject_zero": true } }"#).unwrap();
        assert!(config.required().validate(&Value::Int(0)).is_err());
        assert!(ValidatorConfig::default().required().validate(&Value::Int(0)).is_ok());
    }
}
