//! Errors raised while resolving or applying member paths.
//!
//! These are configuration errors: a wrong path, a type without a factory, or
//! an assignment of an unconvertible value. They are never produced for a
//! value that merely fails a validation rule.

use thiserror::Error;

use super::value::{ConversionError, ValueType};

/// Failure to resolve or apply a [`MemberExpression`](super::MemberExpression).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemberError {
    #[error("member path for `{type_name}` is empty")]
    EmptyPath { type_name: &'static str },

    #[error("type `{type_name}` has no member named `{member}` (path `{path}`)")]
    NotFound {
        type_name: &'static str,
        member: String,
        path: String,
    },

    #[error("member `{member}` of `{type_name}` is {value_type} and cannot be traversed (path `{path}`)")]
    NotTraversable {
        type_name: &'static str,
        member: &'static str,
        value_type: ValueType,
        path: String,
    },

    #[error("expression rooted at `{expected}` cannot be applied to `{actual}`")]
    RootMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("member `{member}` of `{type_name}` is read-only")]
    ReadOnly {
        type_name: &'static str,
        member: &'static str,
    },

    #[error("type `{type_name}` has no factory and cannot be instantiated while writing `{path}`")]
    NotConstructible { type_name: &'static str, path: String },

    #[error("member `{member}` of `{type_name}` does not hold a record")]
    NotARecord {
        type_name: &'static str,
        member: &'static str,
    },

    #[error("record of type `{actual}` cannot be assigned to `{path}`")]
    RecordMismatch { actual: &'static str, path: String },

    #[error("cannot assign to `{path}`: {source}")]
    Conversion {
        path: String,
        #[source]
        source: ConversionError,
    },
}
