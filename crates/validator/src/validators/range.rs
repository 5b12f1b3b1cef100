//! Inclusive range validator over ordered values

use std::cmp::Ordering;

use crate::foundation::{ValidationError, ValueRule};
use crate::member::{Value, ValueType};

crate::validator! {
    /// Validates that a value lies within `[min, max]`.
    ///
    /// Null passes. Numeric kinds compare across each other, so `range(1, 10)`
    /// applies to `u8` and `f64` members alike.
    #[derive(PartialEq)]
    pub Range { min: Value, max: Value } for Value;
    rule(self, input) {
        input.is_null()
            || (matches!(input.compare(&self.min), Some(Ordering::Greater | Ordering::Equal))
                && matches!(input.compare(&self.max), Some(Ordering::Less | Ordering::Equal)))
    }
    error(self, input) {
        if input.compare(&self.min).is_none() {
            ValidationError::incomparable(input, &self.min)
        } else if input.compare(&self.max).is_none() {
            ValidationError::incomparable(input, &self.max)
        } else {
            ValidationError::out_of_range(&self.min, &self.max, input)
        }
    }
    new(min: impl Into<Value>, max: impl Into<Value>) { Self { min: min.into(), max: max.into() } }
    fn range(min: impl Into<Value>, max: impl Into<Value>);
}

impl ValueRule for Range {
    fn accepts(&self, value_type: ValueType) -> bool {
        [&self.min, &self.max].into_iter().all(|bound| {
            bound
                .value_type()
                .is_some_and(|bound| bound.is_comparable_with(value_type))
        })
    }
}
