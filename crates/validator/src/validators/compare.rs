//! Comparison validators
//!
//! - [`ValueCompare`] compares a member against a fixed value.
//! - [`MemberCompare`] compares two members of the same record.
//!
//! Both skip the check when either side is null.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data_type::DefinitionError;
use crate::foundation::{Validate, ValidationError, ValueRule};
use crate::member::{MemberExpression, Record, Reflect, Value, ValueType};

use super::member::read_member;

// ============================================================================
// COMPARE OPERATOR
// ============================================================================

/// Comparison applied by [`ValueCompare`] and [`MemberCompare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
}

impl CompareOperator {
    /// Applies the operator; `None` when the operands have no common ordering.
    #[must_use]
    pub fn evaluate(self, left: &Value, right: &Value) -> Option<bool> {
        match self {
            Self::Equal => left.equivalent(right),
            Self::NotEqual => left.equivalent(right).map(|equal| !equal),
            Self::GreaterThan => left.compare(right).map(Ordering::is_gt),
            Self::GreaterThanEqual => left.compare(right).map(Ordering::is_ge),
            Self::LessThan => left.compare(right).map(Ordering::is_lt),
            Self::LessThanEqual => left.compare(right).map(Ordering::is_le),
        }
    }

    /// Whether members of the two declared types can be compared.
    ///
    /// Records are never comparable; `Type` members only support equality.
    #[must_use]
    pub fn accepts(self, left: ValueType, right: ValueType) -> bool {
        match self {
            Self::Equal | Self::NotEqual => {
                matches!((left, right), (ValueType::Type, ValueType::Type)) || left.is_comparable_with(right)
            }
            _ => left.is_comparable_with(right),
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanEqual => "<=",
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            Self::Equal => "equal to",
            Self::NotEqual => "different from",
            Self::GreaterThan => "greater than",
            Self::GreaterThanEqual => "greater than or equal to",
            Self::LessThan => "less than",
            Self::LessThanEqual => "less than or equal to",
        }
    }

    fn error(self, actual: &Value, expected: impl fmt::Display) -> ValidationError {
        ValidationError::new(
            "compare",
            format!("Value must be {} {expected}", self.phrase()),
        )
        .with_param("operator", self.symbol())
        .with_param("actual", actual.to_string())
    }
}

impl fmt::Display for CompareOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ============================================================================
// VALUE COMPARE
// ============================================================================

crate::validator! {
    /// Validates `value OP comparand`.
    #[derive(PartialEq)]
    pub ValueCompare { operator: CompareOperator, comparand: Value } for Value;
    rule(self, input) {
        input.is_null() || self.operator.evaluate(input, &self.comparand) == Some(true)
    }
    error(self, input) {
        if self.operator.evaluate(input, &self.comparand).is_none() {
            ValidationError::incomparable(input, &self.comparand)
        } else {
            self.operator
                .error(input, &self.comparand)
                .with_param("comparand", self.comparand.to_string())
        }
    }
    new(operator: CompareOperator, comparand: impl Into<Value>) {
        Self { operator, comparand: comparand.into() }
    }
    fn compare(operator: CompareOperator, comparand: impl Into<Value>);
}

impl ValueRule for ValueCompare {
    fn accepts(&self, value_type: ValueType) -> bool {
        self.comparand
            .value_type()
            .is_some_and(|comparand| self.operator.accepts(value_type, comparand))
    }
}

// ============================================================================
// MEMBER COMPARE
// ============================================================================

/// Validates `member OP other` on the same record.
///
/// ```rust,ignore
/// let orders = MemberCompare::of::<Customer>("max_order", CompareOperator::GreaterThanEqual, "min_order")?;
/// ```
#[derive(Debug, Clone)]
pub struct MemberCompare {
    member: MemberExpression,
    operator: CompareOperator,
    other: MemberExpression,
}

impl MemberCompare {
    /// Both expressions must share a root type (or one root must derive from
    /// the other) and their final members must be comparable.
    pub fn new(
        member: MemberExpression,
        operator: CompareOperator,
        other: MemberExpression,
    ) -> Result<Self, DefinitionError> {
        let related = member.root_type().is_subtype_of(other.root_type())
            || other.root_type().is_subtype_of(member.root_type());

        if !related || !operator.accepts(member.return_type(), other.return_type()) {
            return Err(DefinitionError::IncompatibleMembers {
                left: member.path().to_owned(),
                operator,
                right: other.path().to_owned(),
            });
        }
        Ok(Self {
            member,
            operator,
            other,
        })
    }

    /// Resolves both paths against `T`.
    pub fn of<T: Reflect>(member: &str, operator: CompareOperator, other: &str) -> Result<Self, DefinitionError> {
        Self::new(
            MemberExpression::of::<T>(member)?,
            operator,
            MemberExpression::of::<T>(other)?,
        )
    }

    #[must_use]
    pub fn member(&self) -> &MemberExpression {
        &self.member
    }

    #[must_use]
    pub fn operator(&self) -> CompareOperator {
        self.operator
    }

    #[must_use]
    pub fn other(&self) -> &MemberExpression {
        &self.other
    }
}

impl Validate for MemberCompare {
    type Input = dyn Record;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        let left = read_member(&self.member, input)?;
        let right = read_member(&self.other, input)?;
        if left.is_null() || right.is_null() {
            return Ok(());
        }

        match self.operator.evaluate(&left, &right) {
            Some(true) => Ok(()),
            Some(false) => Err(self
                .operator
                .error(&left, format_args!("{} ({right})", self.other.path()))
                .with_param("other", self.other.path().to_owned())
                .with_param("comparand", right.to_string())
                .with_field(self.member.path().to_owned())),
            None => Err(ValidationError::incomparable(&left, &right).with_field(self.member.path().to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(CompareOperator::Equal, 5, true)]
    #[case(CompareOperator::Equal, 6, false)]
    #[case(CompareOperator::NotEqual, 6, true)]
    #[case(CompareOperator::GreaterThan, 4, true)]
    #[case(CompareOperator::GreaterThan, 5, false)]
    #[case(CompareOperator::GreaterThanEqual, 5, true)]
    #[case(CompareOperator::LessThan, 5, false)]
    #[case(CompareOperator::LessThanEqual, 5, true)]
    fn test_operators(#[case] operator: CompareOperator, #[case] comparand: i32, #[case] valid: bool) {
        assert_eq!(compare(operator, comparand).validate(&Value::Int(5)).is_ok(), valid);
    }

    #[test]
    fn test_null_passes() {
        assert!(compare(CompareOperator::Equal, 1).validate(&Value::Null).is_ok());
    }

    #[test]
    fn test_message() {
        let error = compare(CompareOperator::GreaterThanEqual, 18)
            .validate(&Value::UInt(17))
            .unwrap_err();
        assert_eq!(error.code, "compare");
        assert_eq!(error.message, "Value must be greater than or equal to 18");
        assert_eq!(error.param("operator"), Some(">="));
    }

    #[test]
    fn test_incomparable() {
        let error = compare(CompareOperator::LessThan, "x")
            .validate(&Value::Int(1))
            .unwrap_err();
        assert_eq!(error.code, "incomparable");
    }

    #[test]
    fn test_accepts() {
        assert!(compare(CompareOperator::LessThan, 3).accepts(ValueType::Float));
        assert!(!compare(CompareOperator::LessThan, 3).accepts(ValueType::Text));
        assert!(CompareOperator::Equal.accepts(ValueType::Type, ValueType::Type));
        assert!(!CompareOperator::LessThan.accepts(ValueType::Type, ValueType::Type));
    }

    #[test]
    fn test_records_are_not_comparable() {
        let key = crate::member::TypeKey::record::<Window>();
        assert!(!CompareOperator::Equal.accepts(ValueType::Record(key), ValueType::Record(key)));
        assert!(!CompareOperator::NotEqual.accepts(ValueType::Record(key), ValueType::Record(key)));

        let error = compare(CompareOperator::Equal, Value::Record(key))
            .validate(&Value::Record(key))
            .unwrap_err();
        assert_eq!(error.code, "incomparable");
    }

    #[derive(Debug, Default)]
    struct Window {
        opens: u32,
        closes: u32,
        label: String,
    }

    crate::reflect! {
        Window { field opens, field closes, field label }
    }

    #[derive(Debug, Default)]
    struct Shift {
        day: Option<Window>,
        night: Option<Window>,
    }

    crate::reflect! {
        Shift { record day, record night }
    }

    #[test]
    fn test_member_compare() {
        let rule = MemberCompare::of::<Window>("closes", CompareOperator::GreaterThan, "opens").unwrap();
        assert!(rule.validate(&Window { opens: 9, closes: 17, label: String::new() }).is_ok());

        let error = rule
            .validate(&Window { opens: 9, closes: 8, label: String::new() })
            .unwrap_err();
        assert_eq!(error.field.as_deref(), Some("closes"));
        assert_eq!(error.message, "Value must be greater than opens (9)");
        assert_eq!(error.param("other"), Some("opens"));
    }

    #[test]
    fn test_member_compare_rejects_incompatible_members() {
        let error = MemberCompare::of::<Window>("label", CompareOperator::LessThan, "opens").unwrap_err();
        assert_eq!(
            error,
            DefinitionError::IncompatibleMembers {
                left: "label".into(),
                operator: CompareOperator::LessThan,
                right: "opens".into(),
            }
        );
    }

    #[test]
    fn test_member_compare_rejects_record_members() {
        let error = MemberCompare::of::<Shift>("day", CompareOperator::Equal, "night").unwrap_err();
        assert_eq!(
            error,
            DefinitionError::IncompatibleMembers {
                left: "day".into(),
                operator: CompareOperator::Equal,
                right: "night".into(),
            }
        );
        assert!(MemberCompare::of::<Shift>("day.closes", CompareOperator::Equal, "night.closes").is_ok());
    }
}
