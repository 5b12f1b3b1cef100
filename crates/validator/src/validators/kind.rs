//! Type validator

use crate::foundation::{ValidationError, ValueRule};
use crate::member::{Reflect, TypeKey, Value, ValueType};

crate::validator! {
    /// Validates that a `Type` or `Record` value is the expected type or one
    /// of its subtypes. Null passes.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub IsType { expected: TypeKey } for Value;
    rule(self, input) {
        match input {
            Value::Null => true,
            Value::Type(key) | Value::Record(key) => key.is_assignable_to(&self.expected),
            _ => false,
        }
    }
    error(self, input) {
        let actual = match input {
            Value::Type(key) | Value::Record(key) => key.name().to_owned(),
            other => other.value_type().map_or_else(String::new, |t| t.to_string()),
        };
        ValidationError::type_mismatch(self.expected.name(), actual)
    }
    fn is_type(expected: TypeKey);
}

/// [`IsType`] for a reflected record type.
///
/// Subtypes are recognised through their descriptor, so candidate keys must be
/// built with [`TypeKey::record`].
#[must_use]
pub fn is_type_of<T: Reflect>() -> IsType {
    IsType::new(TypeKey::record::<T>())
}

impl ValueRule for IsType {
    fn accepts(&self, value_type: ValueType) -> bool {
        matches!(value_type, ValueType::Type | ValueType::Record(_))
    }
}
