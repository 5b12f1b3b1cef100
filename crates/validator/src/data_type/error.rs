//! Errors in validation rule definitions.

use thiserror::Error;

use crate::member::{MemberError, ValueType};
use crate::validators::CompareOperator;

/// A validation rule or data type is defined incorrectly.
///
/// These are programmer mistakes found while building or registering data
/// types, as opposed to [`ValidationError`](crate::foundation::ValidationError)s
/// produced by the data being validated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    #[error(transparent)]
    Member(#[from] MemberError),

    #[error("rule `{rule}` cannot validate member `{path}` of type {value_type}")]
    IncompatibleRule {
        rule: String,
        path: String,
        value_type: ValueType,
    },

    #[error("members `{left}` and `{right}` cannot be compared with `{operator}`")]
    IncompatibleMembers {
        left: String,
        operator: CompareOperator,
        right: String,
    },

    #[error("a data type for `{type_name}` is already registered")]
    DuplicateRegistration { type_name: &'static str },

    #[error("no data type is registered for `{type_name}` or any of its base types")]
    NotRegistered { type_name: &'static str },

    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
