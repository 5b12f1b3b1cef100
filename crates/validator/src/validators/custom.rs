//! Caller-supplied validators
//!
//! - [`Custom`] wraps a predicate over a member value.
//! - [`RecordCheck`] wraps a predicate over a whole typed record.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use crate::foundation::{Validate, ValidationError, ValueRule};
use crate::member::{Record, Reflect, Value, ValueType, downcast_record};

// ============================================================================
// CUSTOM
// ============================================================================

/// Validates a value with a caller-supplied predicate.
///
/// The predicate also sees `Null`, so it decides how missing values are
/// treated.
pub struct Custom<F> {
    code: Cow<'static, str>,
    message: Cow<'static, str>,
    predicate: F,
}

impl<F> Custom<F>
where
    F: Fn(&Value) -> bool,
{
    pub fn new(message: impl Into<Cow<'static, str>>, predicate: F) -> Self {
        Self {
            code: Cow::Borrowed("custom"),
            message: message.into(),
            predicate,
        }
    }

    /// Replaces the default `custom` error code.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = code.into();
        self
    }
}

impl<F> Validate for Custom<F>
where
    F: Fn(&Value) -> bool,
{
    type Input = Value;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if (self.predicate)(input) {
            Ok(())
        } else {
            Err(ValidationError::new(self.code.clone(), self.message.clone())
                .with_param("actual", input.to_string()))
        }
    }
}

impl<F> ValueRule for Custom<F>
where
    F: Fn(&Value) -> bool,
{
    fn accepts(&self, _value_type: ValueType) -> bool {
        true
    }
}

impl<F> fmt::Debug for Custom<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom")
            .field("code", &self.code)
            .field("message", &self.message)
            .finish()
    }
}

/// Creates a [`Custom`] validator.
pub fn custom<F>(message: impl Into<Cow<'static, str>>, predicate: F) -> Custom<F>
where
    F: Fn(&Value) -> bool,
{
    Custom::new(message, predicate)
}

// ============================================================================
// RECORD CHECK
// ============================================================================

/// Validates a whole record of type `T` with a caller-supplied predicate.
///
/// Applies to `T` and to every type that derives from it.
pub struct RecordCheck<T, F> {
    code: Cow<'static, str>,
    message: Cow<'static, str>,
    predicate: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T, F> RecordCheck<T, F>
where
    T: Reflect,
    F: Fn(&T) -> bool,
{
    pub fn new(message: impl Into<Cow<'static, str>>, predicate: F) -> Self {
        Self {
            code: Cow::Borrowed("custom"),
            message: message.into(),
            predicate,
            _marker: PhantomData,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = code.into();
        self
    }
}

impl<T, F> Validate for RecordCheck<T, F>
where
    T: Reflect,
    F: Fn(&T) -> bool,
{
    type Input = dyn Record;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        let Some(record) = downcast_record::<T>(input) else {
            return Err(ValidationError::type_mismatch(
                T::describe().name(),
                input.record_type().name(),
            ));
        };

        if (self.predicate)(record) {
            Ok(())
        } else {
            Err(ValidationError::new(self.code.clone(), self.message.clone()))
        }
    }
}

impl<T, F> fmt::Debug for RecordCheck<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordCheck")
            .field("code", &self.code)
            .field("message", &self.message)
            .finish()
    }
}

/// Creates a [`RecordCheck`] for records of type `T`.
pub fn record_check<T, F>(message: impl Into<Cow<'static, str>>, predicate: F) -> RecordCheck<T, F>
where
    T: Reflect,
    F: Fn(&T) -> bool,
{
    RecordCheck::new(message, predicate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_custom_predicate() {
        let even = custom("Value must be even", |value| {
            matches!(value, Value::Int(v) if v % 2 == 0)
        });
        assert!(even.validate(&Value::Int(4)).is_ok());

        let error = even.validate(&Value::Int(3)).unwrap_err();
        assert_eq!(error.code, "custom");
        assert_eq!(error.message, "Value must be even");
    }

    #[test]
    fn test_custom_code() {
        let rule = custom("Nope", |_| false).with_code("never");
        assert_eq!(rule.validate(&Value::Null).unwrap_err().code, "never");
    }

    #[derive(Debug, Default)]
    struct Interval {
        start: i64,
        end: i64,
    }

    crate::reflect! {
        Interval { field start, field end }
    }

    #[derive(Debug, Default)]
    struct Other {
        flag: bool,
    }

    crate::reflect! {
        Other { field flag }
    }

    #[test]
    fn test_record_check() {
        let ordered = record_check::<Interval, _>("Interval is reversed", |i| i.start <= i.end);
        assert!(ordered.validate(&Interval { start: 1, end: 2 }).is_ok());
        assert_eq!(
            ordered.validate(&Interval { start: 3, end: 2 }).unwrap_err().message,
            "Interval is reversed"
        );
        assert_eq!(
            ordered.validate(&Other::default()).unwrap_err().code,
            "type_mismatch"
        );
    }
}
