//! Core validation types and traits
//!
//! This module contains the fundamental building blocks of the validation system:
//!
//! - **Traits**: [`Validate`], [`ValueRule`], [`ValueRuleExt`]
//! - **Errors**: [`ValidationError`], [`ValidationErrors`], [`ValidationException`]
//!
//! # Two error tiers
//!
//! A value that breaks a rule produces a [`ValidationError`], returned as data.
//! A mistake in the rule definitions themselves (unknown member path, rule
//! bound to a member it cannot check, duplicate registration) is reported
//! separately through [`MemberError`](crate::member::MemberError) and
//! [`DefinitionError`](crate::data_type::DefinitionError).
//!
//! ```rust,ignore
//! use tessera_validator::prelude::*;
//!
//! let rule = string_length(2, 5);
//! assert!(rule.validate(&Value::from("abc")).is_ok());
//!
//! let error = rule.validate(&Value::from("a")).unwrap_err();
//! assert_eq!(error.code, "min_length");
//! ```

pub mod error;
pub mod exception;
pub mod traits;

pub use error::{ValidationError, ValidationErrors};
pub use exception::ValidationException;
pub use traits::{Validate, ValueRule, ValueRuleExt};

// ============================================================================
// UTILITIES
// ============================================================================

/// Runs every validator against `value` and collects all failures.
///
/// Validators do not short-circuit each other.
pub fn validate_with_all<'a, V, I>(value: &V::Input, validators: I) -> Result<(), ValidationErrors>
where
    V: Validate + ?Sized + 'a,
    I: IntoIterator<Item = &'a V>,
{
    let errors: ValidationErrors = validators
        .into_iter()
        .filter_map(|validator| validator.validate(value).err())
        .collect();

    errors.into_result(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod core_tests {
    use super::*;
    use crate::member::Value;

    struct AlwaysValid;

    impl Validate for AlwaysValid {
        type Input = Value;

        fn validate(&self, _input: &Self::Input) -> Result<(), ValidationError> {
            Ok(())
        }
    }

    struct AlwaysFails;

    impl Validate for AlwaysFails {
        type Input = Value;

        fn validate(&self, _input: &Self::Input) -> Result<(), ValidationError> {
            Err(ValidationError::new("always_fails", "Always fails"))
        }
    }

    #[test]
    fn test_validate_with_all_success() {
        let result = validate_with_all(&Value::Null, [&AlwaysValid, &AlwaysValid]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_with_all_collects_every_failure() {
        let valid = AlwaysValid;
        let fails = AlwaysFails;
        let validators: &[&dyn Validate<Input = Value>] = &[&fails, &valid, &fails];
        let errors = validate_with_all(&Value::Null, validators.iter().copied()).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
