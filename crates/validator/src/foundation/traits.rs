//! Core traits for the validation system
//!
//! This module defines the fundamental traits that all validators must implement.

use crate::data_type::DefinitionError;
use crate::member::{MemberExpression, Reflect, Value, ValueType};
use crate::validators::MemberValidator;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The core trait that all validators must implement.
///
/// Value rules validate a single [`Value`]; record validators use
/// `Input = dyn Record` and read whatever members they need. Validators never
/// mutate their input.
///
/// # Examples
///
/// ```rust,ignore
/// use tessera_validator::foundation::{Validate, ValidationError};
/// use tessera_validator::member::Value;
///
/// struct NotNegative;
///
/// impl Validate for NotNegative {
///     type Input = Value;
///
///     fn validate(&self, input: &Value) -> Result<(), ValidationError> {
///         match input {
///             Value::Int(v) if *v < 0 => Err(ValidationError::new("negative", "Value is negative")),
///             _ => Ok(()),
///         }
///     }
/// }
/// ```
pub trait Validate {
    /// The type of input being validated.
    type Input: ?Sized;

    /// Validates the input value.
    ///
    /// * `Ok(())` if validation succeeds
    /// * `Err(ValidationError)` if validation fails
    fn validate(&self, input: &Self::Input) -> Result<(), crate::foundation::ValidationError>;

    /// Returns the name of this validator.
    ///
    /// Used for debugging and logging.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<V: Validate + ?Sized> Validate for Box<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), crate::foundation::ValidationError> {
        (**self).validate(input)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

// ============================================================================
// VALUE RULES
// ============================================================================

/// A validator over a single member value.
///
/// [`accepts`](Self::accepts) reports whether the rule can apply to a member
/// of the given declared type. Binding a rule to an incompatible member is a
/// configuration error rather than a validation failure.
pub trait ValueRule: Validate<Input = Value> {
    fn accepts(&self, value_type: ValueType) -> bool;
}

/// Extension methods for binding value rules to members.
pub trait ValueRuleExt: ValueRule + Sized {
    /// Binds the rule to `path` on the record type `T`.
    ///
    /// ```rust,ignore
    /// let rule = range(18, 120).on::<Customer>("age")?;
    /// ```
    fn on<T: Reflect>(self, path: &str) -> Result<MemberValidator<Self>, DefinitionError> {
        MemberValidator::new(MemberExpression::of::<T>(path)?, self)
    }

    /// Binds the rule to an already resolved member expression.
    fn on_member(self, member: MemberExpression) -> Result<MemberValidator<Self>, DefinitionError> {
        MemberValidator::new(member, self)
    }
}

impl<T: ValueRule> ValueRuleExt for T {}

// ============================================================================
// TESTS
// ============================================================================
