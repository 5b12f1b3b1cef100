// Benchmarks for member path access and full registry validation passes
// Run with: cargo bench -p tessera-validator

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use tessera_validator::prelude::*;

#[derive(Debug, Default)]
struct Address {
    city: Option<String>,
    zip: Option<String>,
}

#[derive(Debug, Default)]
struct Person {
    id: u64,
    name: Option<String>,
    age: Option<i32>,
    address: Option<Address>,
}

#[derive(Debug, Default)]
struct Customer {
    person: Person,
    min_order: f64,
    max_order: f64,
}

tessera_validator::reflect! {
    #[constructible]
    Address { field city, field zip }
}

tessera_validator::reflect! {
    #[constructible]
    Person { field id, field name, field age, record address }
}

tessera_validator::reflect! {
    #[constructible]
    Customer extends person { field min_order, field max_order }
}

fn customer() -> Customer {
    Customer {
        person: Person {
            id: 7,
            name: Some("Grace Hopper".into()),
            age: Some(85),
            address: Some(Address {
                city: Some("Arlington".into()),
                zip: Some("22201".into()),
            }),
        },
        min_order: 10.0,
        max_order: 500.0,
    }
}

fn registry() -> Result<DataTypeRegistry, DefinitionError> {
    let person = DataType::builder::<Person>()
        .rule("name", required())?
        .rule("name", string_length(2, 40))?
        .rule("age", range(0, 150))?
        .rule("address.zip", matches_regex(r"\d{5}")?)?
        .primary_key("id")?
        .validate_primary_key()
        .build();
    let customer = DataType::builder::<Customer>()
        .compare("max_order", CompareOperator::GreaterThanEqual, "min_order")?
        .build();

    let registry = DataTypeRegistry::new();
    registry.register(person)?;
    registry.register(customer)?;
    Ok(registry)
}

fn bench_member_access(c: &mut Criterion) {
    let expr = MemberExpression::of::<Customer>("address.city").unwrap();
    let target = customer();

    c.bench_function("member_get_nested", |b| {
        b.iter(|| black_box(expr.get_value(black_box(&target))));
    });

    c.bench_function("member_set_nested", |b| {
        b.iter(|| {
            let mut target = Customer::default();
            expr.set_value(&mut target, black_box("Oslo")).unwrap();
            black_box(target);
        });
    });

    c.bench_function("member_resolve", |b| {
        b.iter(|| black_box(MemberExpression::of::<Customer>(black_box("address.zip"))));
    });
}

fn bench_registry_validate(c: &mut Criterion) {
    let registry = registry().unwrap();
    let valid = customer();
    let mut invalid = customer();
    invalid.person.name = None;
    invalid.person.age = Some(300);
    invalid.max_order = 1.0;

    c.bench_function("registry_validate_valid", |b| {
        b.iter(|| black_box(registry.validate(black_box(&valid))));
    });

    c.bench_function("registry_validate_invalid", |b| {
        b.iter(|| black_box(registry.validate(black_box(&invalid))));
    });
}

criterion_group!(benches, bench_member_access, bench_registry_validate);
criterion_main!(benches);
