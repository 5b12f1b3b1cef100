//! Primary key presence validator

use crate::foundation::{Validate, ValidationError};
use crate::member::{MemberExpression, Record};

use super::member::read_member;

/// Validates that every primary key member holds a non-blank value.
///
/// Reports a single `null_primary_key` error listing the missing members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyPresent {
    members: Vec<MemberExpression>,
}

impl PrimaryKeyPresent {
    #[must_use]
    pub fn new(members: Vec<MemberExpression>) -> Self {
        Self { members }
    }

    #[must_use]
    pub fn members(&self) -> &[MemberExpression] {
        &self.members
    }
}

impl Validate for PrimaryKeyPresent {
    type Input = dyn Record;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        for member in &self.members {
            if read_member(member, input)?.is_blank() {
                missing.push(member.path());
            }
        }

        let error = match missing.as_slice() {
            [] => return Ok(()),
            [single] => ValidationError::new("null_primary_key", "PrimaryKey contains a null value")
                .with_field((*single).to_owned()),
            _ => ValidationError::new("null_primary_key", "PrimaryKey contains a null value"),
        };
        Err(error.with_param("members", missing.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default)]
    struct Line {
        order: Option<String>,
        number: Option<u32>,
    }

    crate::reflect! {
        Line { field order, field number }
    }

    fn key() -> PrimaryKeyPresent {
        PrimaryKeyPresent::new(vec![
            MemberExpression::of::<Line>("order").unwrap(),
            MemberExpression::of::<Line>("number").unwrap(),
        ])
    }

    #[test]
    fn test_complete_key() {
        let line = Line {
            order: Some("SO-1".into()),
            number: Some(0),
        };
        assert!(key().validate(&line).is_ok());
    }

    #[test]
    fn test_single_missing_member() {
        let line = Line {
            order: Some("  ".into()),
            number: Some(2),
        };
        let error = key().validate(&line).unwrap_err();
        assert_eq!(error.code, "null_primary_key");
        assert_eq!(error.field.as_deref(), Some("order"));
    }

    #[test]
    fn test_all_missing_members() {
        let error = key().validate(&Line::default()).unwrap_err();
        assert_eq!(error.field, None);
        assert_eq!(error.param("members"), Some("order, number"));
    }
}
