//! Error value wrapping a failed validation pass.

use std::fmt;

use super::error::{ValidationError, ValidationErrors};
use crate::member::Record;

/// A non-empty set of validation errors together with a rendering of the
/// object that produced them.
///
/// The exception does not keep the object itself; `subject` is its `Debug`
/// output captured when the exception was built.
///
/// ```rust,ignore
/// let errors = registry.validate(&customer)?;
/// ValidationException::check(errors, &customer)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationException {
    errors: ValidationErrors,
    type_name: &'static str,
    subject: String,
    message: String,
}

impl ValidationException {
    /// Wraps `errors` reported for `object`.
    pub fn new(errors: impl Into<ValidationErrors>, object: &dyn Record) -> Self {
        let type_name = object.record_type().name();
        Self {
            errors: errors.into(),
            type_name,
            subject: format!("{object:#?}"),
            message: format!("{type_name} failed validation"),
        }
    }

    /// `Ok(())` when `errors` is empty, the exception otherwise.
    pub fn check(errors: impl Into<ValidationErrors>, object: &dyn Record) -> Result<(), Self> {
        let errors = errors.into();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self::new(errors, object))
        }
    }

    /// Replaces the headline message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        self.errors.errors()
    }

    #[must_use]
    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }

    /// Type name of the validated object.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// `Debug` rendering of the validated object.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)?;
        for error in &self.errors {
            writeln!(f, "{}", error.description())?;
        }
        write!(f, "\nValidated object:\n{}", self.subject)
    }
}

impl std::error::Error for ValidationException {}
