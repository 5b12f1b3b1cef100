//! File system path validators
//!
//! [`PathExists`] checks that a text member names an existing file or
//! directory. Relative paths are joined to an optional base directory.

use std::path::{Path, PathBuf};

use crate::foundation::{Validate, ValidationError, ValueRule};
use crate::member::{Value, ValueType};

/// What a [`PathExists`] validator expects to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    File,
    Directory,
}

/// Validates that a path exists. Null and blank text pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathExists {
    pub kind: PathKind,
    pub base_dir: Option<PathBuf>,
}

impl PathExists {
    #[must_use]
    pub fn new(kind: PathKind) -> Self {
        Self {
            kind,
            base_dir: None,
        }
    }

    /// Directory that relative paths are resolved against.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Resolves a raw member value to the path that will be checked.
    #[must_use]
    pub fn resolve(&self, raw: &str) -> PathBuf {
        let path = Path::new(raw.trim());
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Validate for PathExists {
    type Input = Value;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if input.is_blank() {
            return Ok(());
        }
        let Some(raw) = input.as_str() else {
            return Err(ValidationError::type_mismatch(
                ValueType::Text.to_string(),
                input.value_type().map_or_else(String::new, |t| t.to_string()),
            ));
        };

        let path = self.resolve(raw);
        let (exists, code, noun) = match self.kind {
            PathKind::File => (path.is_file(), "file_not_found", "File"),
            PathKind::Directory => (path.is_dir(), "directory_not_found", "Directory"),
        };

        if exists {
            Ok(())
        } else {
            Err(
                ValidationError::new(code, format!("{noun} {} does not exist", path.display()))
                    .with_param("path", path.display().to_string()),
            )
        }
    }
}

impl ValueRule for PathExists {
    fn accepts(&self, value_type: ValueType) -> bool {
        value_type == ValueType::Text
    }
}

/// Validates that a text member names an existing file.
#[must_use]
pub fn file_exists() -> PathExists {
    PathExists::new(PathKind::File)
}

/// Validates that a text member names an existing directory.
#[must_use]
pub fn directory_exists() -> PathExists {
    PathExists::new(PathKind::Directory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_existing_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("report.csv");
        std::fs::write(&file, "id\n").unwrap();

        let file_value = Value::from(file.display().to_string());
        let dir_value = Value::from(dir.path().display().to_string());

        assert!(file_exists().validate(&file_value).is_ok());
        assert!(directory_exists().validate(&dir_value).is_ok());
        assert!(file_exists().validate(&dir_value).is_err());
        assert!(directory_exists().validate(&file_value).is_err());
    }

    #[test]
    fn test_relative_to_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("uploads")).unwrap();

        let rule = directory_exists().with_base_dir(dir.path());
        assert!(rule.validate(&Value::from("uploads")).is_ok());

        let error = rule.validate(&Value::from("missing")).unwrap_err();
        assert_eq!(error.code, "directory_not_found");
        assert_eq!(
            error.param("path").map(PathBuf::from),
            Some(dir.path().join("missing"))
        );
    }

    #[test]
    fn test_blank_passes() {
        assert!(file_exists().validate(&Value::Null).is_ok());
        assert!(file_exists().validate(&Value::from(" ")).is_ok());
    }
}
