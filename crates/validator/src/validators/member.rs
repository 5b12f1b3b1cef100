//! Binding value rules to member paths.

use crate::data_type::DefinitionError;
use crate::foundation::{Validate, ValidationError, ValueRule};
use crate::member::{MemberExpression, Record, Value, short_name};

/// A value rule applied to one member of a record.
///
/// Reads the member once per call and tags any failure with the member path.
///
/// # Examples
///
/// ```rust,ignore
/// let age = MemberValidator::new(MemberExpression::of::<Customer>("age")?, range(18, 120))?;
/// let error = age.validate(&customer).unwrap_err();
/// assert_eq!(error.field.as_deref(), Some("age"));
/// ```
#[derive(Debug, Clone)]
pub struct MemberValidator<V> {
    member: MemberExpression,
    rule: V,
}

impl<V: ValueRule> MemberValidator<V> {
    /// Binds `rule` to `member`.
    ///
    /// Fails with [`DefinitionError::IncompatibleRule`] when the rule cannot
    /// apply to the member's declared type.
    pub fn new(member: MemberExpression, rule: V) -> Result<Self, DefinitionError> {
        let value_type = member.return_type();
        if !rule.accepts(value_type) {
            return Err(DefinitionError::IncompatibleRule {
                rule: short_name(rule.name()).to_owned(),
                path: member.path().to_owned(),
                value_type,
            });
        }
        Ok(Self { member, rule })
    }
}

impl<V> MemberValidator<V> {
    #[must_use]
    pub fn member(&self) -> &MemberExpression {
        &self.member
    }

    #[must_use]
    pub fn rule(&self) -> &V {
        &self.rule
    }
}

impl<V: Validate<Input = Value>> Validate for MemberValidator<V> {
    type Input = dyn Record;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        let value = read_member(&self.member, input)?;
        self.rule
            .validate(&value)
            .map_err(|error| error.with_field(self.member.path().to_owned()))
    }
}

/// Reads a member for validation; resolution failures become a
/// `member_access` error on that member.
pub(crate) fn read_member(member: &MemberExpression, input: &dyn Record) -> Result<Value, ValidationError> {
    member.get_value(input).map_err(|error| {
        ValidationError::new("member_access", error.to_string()).with_field(member.path().to_owned())
    })
}
