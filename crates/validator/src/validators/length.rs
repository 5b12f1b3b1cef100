//! String length validator
//!
//! By default, length is measured in Unicode scalar values (chars). Use
//! [`StringLength::bytes`] for byte-length counting.

use serde::{Deserialize, Serialize};

use crate::foundation::{Validate, ValidationError, ValueRule};
use crate::member::{Value, ValueType};

// ============================================================================
// LENGTH MODE
// ============================================================================

/// How to count string length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthMode {
    /// Count bytes (fastest, ASCII-only correct).
    Bytes,
    /// Count Unicode scalar values (correct for all text).
    #[default]
    Chars,
}

impl LengthMode {
    /// Measures the length of a string according to this mode.
    #[inline]
    #[must_use]
    pub fn measure(self, input: &str) -> usize {
        match self {
            LengthMode::Bytes => input.len(),
            LengthMode::Chars => input.chars().count(),
        }
    }
}

// ============================================================================
// STRING LENGTH
// ============================================================================

/// Validates that a text value has between `min` and `max` characters.
///
/// A bound of [`UNLIMITED`](Self::UNLIMITED) leaves that side open. Null
/// passes only when there is no minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StringLength {
    /// Minimum length (inclusive).
    pub min: usize,
    /// Maximum length (inclusive).
    pub max: usize,
    /// How to count length.
    pub mode: LengthMode,
}

impl StringLength {
    /// Bound value meaning "no limit".
    pub const UNLIMITED: usize = 0;

    /// Creates a length validator (counts Unicode chars).
    #[must_use]
    pub fn new(min: usize, max: usize) -> Self {
        Self {
            min,
            max,
            mode: LengthMode::Chars,
        }
    }

    /// Only a maximum.
    #[must_use]
    pub fn max(max: usize) -> Self {
        Self::new(Self::UNLIMITED, max)
    }

    /// Only a minimum.
    #[must_use]
    pub fn min(min: usize) -> Self {
        Self::new(min, Self::UNLIMITED)
    }

    /// Creates a length validator that counts bytes.
    #[must_use]
    pub fn bytes(min: usize, max: usize) -> Self {
        Self::new(min, max).with_mode(LengthMode::Bytes)
    }

    #[must_use]
    pub fn with_mode(mut self, mode: LengthMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Validate for StringLength {
    type Input = Value;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        let length = match input {
            Value::Null if self.min == Self::UNLIMITED => return Ok(()),
            Value::Null => return Err(ValidationError::min_length(self.min, 0)),
            Value::Text(text) => self.mode.measure(text),
            other => {
                return Err(ValidationError::type_mismatch(
                    ValueType::Text.to_string(),
                    other.value_type().map_or_else(String::new, |t| t.to_string()),
                ));
            }
        };

        if self.max != Self::UNLIMITED && length > self.max {
            return Err(ValidationError::max_length(self.max, length));
        }
        if self.min != Self::UNLIMITED && length < self.min {
            return Err(ValidationError::min_length(self.min, length));
        }
        Ok(())
    }
}

impl ValueRule for StringLength {
    fn accepts(&self, value_type: ValueType) -> bool {
        value_type == ValueType::Text
    }
}

/// Creates a [`StringLength`] validator; `0` leaves a side unbounded.
#[must_use]
pub fn string_length(min: usize, max: usize) -> StringLength {
    StringLength::new(min, max)
}
