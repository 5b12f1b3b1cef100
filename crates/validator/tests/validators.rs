//! Integration tests for the built-in validators bound to record members.

mod common;

use common::{Address, Customer, Person, valid_person};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tessera_validator::prelude::*;

// ============================================================================
// VALUE RULES ON MEMBERS
// ============================================================================

#[rstest]
#[case::in_range(Some(5), true)]
#[case::lower_bound(Some(1), true)]
#[case::upper_bound(Some(10), true)]
#[case::above(Some(11), false)]
#[case::below(Some(0), false)]
#[case::null(None, true)]
fn range_on_member(#[case] age: Option<i32>, #[case] valid: bool) {
    let rule = range(1, 10).on::<Person>("age").unwrap();
    let person = Person {
        age,
        ..Person::default()
    };
    assert_eq!(rule.validate(&person).is_ok(), valid);
}

#[rstest]
#[case::null(None, false)]
#[case::empty(Some(""), false)]
#[case::blank(Some("   "), false)]
#[case::present(Some("x"), true)]
fn required_on_member(#[case] name: Option<&str>, #[case] valid: bool) {
    let rule = required().on::<Person>("name").unwrap();
    let person = Person {
        name: name.map(str::to_owned),
        ..Person::default()
    };
    assert_eq!(rule.validate(&person).is_ok(), valid);
}

#[test]
fn required_zero_policy() {
    let customer = Customer {
        credit: Some(0),
        ..Customer::default()
    };
    assert!(required().on::<Customer>("credit").unwrap().validate(&customer).is_ok());

    let error = Required::rejecting_zero()
        .on::<Customer>("credit")
        .unwrap()
        .validate(&customer)
        .unwrap_err();
    assert_eq!(error.message, "Value cannot be zero");
    assert_eq!(error.field.as_deref(), Some("credit"));
}

#[test]
fn string_length_through_nested_path() {
    let rule = string_length(2, 5).on::<Person>("address.city").unwrap();

    let mut person = valid_person();
    let error = rule.validate(&person).unwrap_err();
    assert_eq!(error.code, "max_length");
    assert_eq!(error.field.as_deref(), Some("address.city"));

    person.address = Some(Address {
        city: Some("Oslo".into()),
        ..Address::default()
    });
    assert!(rule.validate(&person).is_ok());
}

#[rstest]
#[case("123", true)]
#[case("12a", false)]
fn regex_on_member(#[case] zip: &str, #[case] valid: bool) {
    let rule = matches_regex(r"^\d+$").unwrap().on::<Person>("address.zip").unwrap();
    let person = Person {
        address: Some(Address {
            zip: Some(zip.into()),
            ..Address::default()
        }),
        ..Person::default()
    };
    assert_eq!(rule.validate(&person).is_ok(), valid);
}

#[test]
fn value_compare_on_member() {
    let rule = compare(CompareOperator::LessThanEqual, 1_000)
        .on::<Customer>("max_order")
        .unwrap();

    let customer = Customer {
        max_order: 1_500.0,
        ..Customer::default()
    };
    let error = rule.validate(&customer).unwrap_err();
    assert_eq!(error.message, "Value must be less than or equal to 1000");

    let error = compare(CompareOperator::Equal, "gold")
        .on::<Customer>("max_order")
        .unwrap_err();
    assert!(matches!(error, DefinitionError::IncompatibleRule { .. }));
}

#[test]
fn is_type_on_member() {
    let rule = is_type_of::<Person>().on::<Customer>("segment").unwrap();

    let mut customer = Customer::default();
    assert!(rule.validate(&customer).is_ok());

    customer.segment = Some(TypeKey::record::<Customer>());
    assert!(rule.validate(&customer).is_ok());

    customer.segment = Some(TypeKey::record::<Address>());
    let error = rule.validate(&customer).unwrap_err();
    assert_eq!(error.code, "type_mismatch");
    assert_eq!(error.param("actual"), Some("Address"));
}

#[test]
fn custom_rule_on_member() {
    let rule = custom("Id must be odd", |value| matches!(value, Value::UInt(id) if id % 2 == 1))
        .with_code("odd_id")
        .on::<Person>("id")
        .unwrap();

    assert!(rule.validate(&valid_person()).is_ok());
    let error = rule.validate(&Person::default()).unwrap_err();
    assert_eq!(error.code, "odd_id");
    assert_eq!(error.field.as_deref(), Some("id"));
}

// ============================================================================
// FILE SYSTEM
// ============================================================================

#[test]
fn path_validators_with_base_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("terms.pdf"), b"%PDF").unwrap();
    std::fs::create_dir(dir.path().join("archive")).unwrap();

    let file = file_exists().with_base_dir(dir.path()).on::<Address>("street").unwrap();
    let directory = directory_exists().with_base_dir(dir.path()).on::<Address>("city").unwrap();

    let address = Address {
        street: Some("terms.pdf".into()),
        city: Some("archive".into()),
        ..Address::default()
    };
    assert!(file.validate(&address).is_ok());
    assert!(directory.validate(&address).is_ok());

    let swapped = Address {
        street: Some("archive".into()),
        city: Some("terms.pdf".into()),
        ..Address::default()
    };
    assert_eq!(file.validate(&swapped).unwrap_err().code, "file_not_found");
    assert_eq!(directory.validate(&swapped).unwrap_err().code, "directory_not_found");

    assert!(file.validate(&Address::default()).is_ok());
}

// ============================================================================
// RECORD VALIDATORS
// ============================================================================

#[test]
fn member_compare_across_base_members() {
    let rule = MemberCompare::of::<Customer>("max_order", CompareOperator::GreaterThan, "min_order").unwrap();

    let customer = Customer {
        min_order: 10.0,
        max_order: 10.0,
        ..Customer::default()
    };
    let error = rule.validate(&customer).unwrap_err();
    assert_eq!(error.field.as_deref(), Some("max_order"));
    assert_eq!(error.param("other"), Some("min_order"));
}

#[test]
fn member_compare_skips_null_side() {
    let rule = MemberCompare::of::<Person>("age", CompareOperator::LessThan, "id").unwrap();
    assert!(rule.validate(&Person::default()).is_ok());

    let person = Person {
        id: 5,
        age: Some(30),
        ..Person::default()
    };
    assert!(rule.validate(&person).is_err());
}

#[test]
fn primary_key_present() {
    let rule = PrimaryKeyPresent::new(vec![
        MemberExpression::of::<Person>("name").unwrap(),
        MemberExpression::of::<Person>("address.country.code").unwrap(),
    ]);

    assert!(rule.validate(&valid_person()).is_ok());

    let error = rule.validate(&Person::default()).unwrap_err();
    assert_eq!(error.message, "PrimaryKey contains a null value");
    assert_eq!(error.param("members"), Some("name, address.country.code"));
}
