//! Presence validator
//!
//! [`Required`] fails on null, on empty or whitespace-only text and, when
//! configured with [`Required::rejecting_zero`], on numeric zero.
//!
//! ```rust,ignore
//! let rule = required();
//! assert!(rule.validate(&Value::Null).is_err());
//! assert!(rule.validate(&Value::from("  ")).is_err());
//! assert!(rule.validate(&Value::Int(0)).is_ok());
//! ```

use crate::foundation::{ValidationError, ValueRule};
use crate::member::{Value, ValueType};

crate::validator! {
    /// Validates that a member holds a value.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub Required { reject_zero: bool } for Value;
    rule(self, input) { !input.is_blank() && !(self.reject_zero && input.is_zero()) }
    error(self, input) {
        match input {
            Value::Null => ValidationError::required("Value cannot be null"),
            Value::Text(_) => ValidationError::required("Value cannot be empty"),
            _ => ValidationError::required("Value cannot be zero"),
        }
    }
    new() { Self { reject_zero: false } }
    fn required();
}

impl Required {
    /// A `Required` that also treats numeric zero as missing.
    #[must_use]
    pub fn rejecting_zero() -> Self {
        Self { reject_zero: true }
    }
}

impl ValueRule for Required {
    fn accepts(&self, _value_type: ValueType) -> bool {
        true
    }
}
