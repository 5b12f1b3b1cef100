//! Integration tests for data types and the registry.

mod common;

use std::sync::Arc;
use std::thread;

use common::{Customer, Person, valid_person};
use pretty_assertions::assert_eq;
use tessera_validator::prelude::*;

fn person_type() -> DataType {
    DataType::builder::<Person>()
        .rule("name", required())
        .and_then(|b| b.rule("name", string_length(2, 40)))
        .and_then(|b| b.rule("age", range(0, 150)))
        .and_then(|b| b.rule("address.zip", matches_regex(r"[A-Z0-9]{2,8}")?))
        .and_then(|b| b.rule("address.country.code", matches_regex("[A-Z]{2}")?))
        .and_then(|b| b.primary_key("id").map_err(DefinitionError::from))
        .unwrap()
        .build()
}

fn customer_type() -> DataType {
    DataType::builder::<Customer>()
        .rule("credit", range(0, 5_000))
        .and_then(|b| b.compare("max_order", CompareOperator::GreaterThanEqual, "min_order"))
        .unwrap()
        .validator(record_check::<Customer, _>("Customer needs a name or a credit line", |c| {
            c.person.name.is_some() || c.credit.is_some()
        }))
        .build()
}

fn registry() -> DataTypeRegistry {
    common::init_tracing();

    let registry = DataTypeRegistry::new();
    registry.register(person_type()).unwrap();
    registry.register(customer_type()).unwrap();
    registry
}

fn codes(errors: &ValidationErrors) -> Vec<&str> {
    errors.errors().iter().map(|e| e.code.as_ref()).collect()
}

// ============================================================================
// FULL PASS
// ============================================================================

#[test]
fn valid_object_has_no_errors() {
    let errors = registry().validate(&valid_person()).unwrap();
    assert!(errors.is_empty(), "{errors}");
}

#[test]
fn three_violations_give_three_errors() {
    let mut person = valid_person();
    person.name = Some("A".into());
    person.age = Some(200);
    if let Some(address) = person.address.as_mut() {
        address.zip = Some("sw1y".into());
    }

    let errors = registry().validate(&person).unwrap();
    assert_eq!(errors.len(), 3);
    assert_eq!(codes(&errors), ["min_length", "out_of_range", "invalid_format"]);

    let fields: Vec<_> = errors.errors().iter().filter_map(|e| e.field.as_deref()).collect();
    assert_eq!(fields, ["name", "age", "address.zip"]);
}

#[test]
fn one_member_can_break_several_rules() {
    let person = Person {
        name: None,
        ..valid_person()
    };
    let errors = registry().validate(&person).unwrap();
    assert_eq!(codes(&errors), ["required", "min_length"]);
    assert_eq!(errors.for_field("name").count(), 2);
}

#[test]
fn null_intermediates_skip_optional_rules() {
    let person = Person {
        id: 9,
        name: Some("Grace".into()),
        ..Person::default()
    };
    assert!(registry().validate(&person).unwrap().is_empty());
}

// ============================================================================
// INHERITANCE
// ============================================================================

#[test]
fn inherited_validators_run_on_subtype() {
    let customer = Customer {
        person: Person {
            name: Some("X".into()),
            ..valid_person()
        },
        min_order: 50.0,
        max_order: 10.0,
        credit: Some(9_000),
        segment: None,
    };

    let errors = registry().validate(&customer).unwrap();
    assert_eq!(codes(&errors), ["out_of_range", "compare", "min_length"]);
}

#[test]
fn record_check_sees_the_whole_record() {
    let customer = Customer {
        person: Person {
            id: 3,
            ..Person::default()
        },
        ..Customer::default()
    };
    let errors = registry().validate(&customer).unwrap();
    assert_eq!(codes(&errors), ["custom", "required", "min_length"]);
    assert_eq!(errors.errors()[0].message, "Customer needs a name or a credit line");
}

#[test]
fn hierarchy_queries() {
    let registry = registry();
    let person = registry.get_for::<Person>().unwrap();
    let customer = registry.get_for::<Customer>().unwrap();

    assert_eq!(registry.base_data_type(&customer).unwrap().name(), "Person");
    assert!(registry.base_data_type(&person).is_none());
    assert_eq!(registry.sub_data_types(&person).len(), 1);
    assert!(person.is_assignable_from(&customer));
    assert!(!customer.is_assignable_from(&person));

    let chain: Vec<_> = registry
        .base_data_types(Customer::describe())
        .iter()
        .map(|d| d.name())
        .collect();
    assert_eq!(chain, ["Customer", "Person"]);
}

#[test]
fn primary_key_comes_from_nearest_declaring_type() {
    let customer = Customer {
        person: Person {
            id: 42,
            ..Person::default()
        },
        ..Customer::default()
    };
    assert_eq!(
        registry().primary_key_values(&customer).unwrap(),
        vec![Value::UInt(42)]
    );
}

// ============================================================================
// DEFINITION ERRORS
// ============================================================================

#[test]
fn duplicate_registration_is_rejected() {
    let registry = registry();
    let error = registry.register(person_type()).unwrap_err();
    assert_eq!(error, DefinitionError::DuplicateRegistration { type_name: "Person" });
    assert_eq!(registry.len(), 2);
}

#[test]
fn incompatible_rule_is_rejected() {
    let error = DataType::builder::<Person>()
        .rule("age", matches_regex("[0-9]+").unwrap())
        .and_then(|b| b.rule("born", string_length(1, 10)))
        .unwrap_err();
    assert_eq!(
        error,
        DefinitionError::IncompatibleRule {
            rule: "StringLength".into(),
            path: "born".into(),
            value_type: ValueType::DateTime,
        }
    );
}

#[test]
fn unregistered_type_is_an_error() {
    let registry = DataTypeRegistry::new();
    registry.register(customer_type()).unwrap();

    assert!(registry.validate(&Customer::default()).is_ok());
    assert_eq!(
        registry.validate(&valid_person()).unwrap_err(),
        DefinitionError::NotRegistered { type_name: "Person" }
    );
}

// ============================================================================
// EXCEPTION & CONCURRENCY
// ============================================================================

#[test]
fn exception_wraps_failed_pass() {
    let person = Person {
        age: Some(-1),
        ..valid_person()
    };
    let errors = registry().validate(&person).unwrap();
    let exception = ValidationException::check(errors, &person).unwrap_err();

    assert_eq!(exception.type_name(), "Person");
    let rendered = exception.to_string();
    assert!(rendered.starts_with("Person failed validation"));
    assert!(rendered.contains("age: Value must be between 0 and 150"));
    assert!(rendered.contains("Validated object:"));
}

#[test]
fn validates_concurrently() {
    let registry = Arc::new(registry());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let person = Person {
                    age: Some(100 + i * 30),
                    ..valid_person()
                };
                registry.validate(&person).map(|errors| errors.len())
            })
        })
        .collect();

    let counts: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap().unwrap())
        .collect();
    assert_eq!(counts, [0, 0, 1, 1]);
}

#[test]
fn errors_serialize_to_json() {
    let person = Person {
        age: Some(151),
        ..valid_person()
    };
    let errors = registry().validate(&person).unwrap();
    let json = serde_json::to_value(&errors).unwrap();

    assert_eq!(json[0]["code"], "out_of_range");
    assert_eq!(json[0]["field"], "age");
}
