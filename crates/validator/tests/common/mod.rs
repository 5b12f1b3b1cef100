//! Record types shared by the integration tests.

#![allow(dead_code)]

use chrono::NaiveDateTime;
use tessera_validator::member::TypeKey;
use tessera_validator::reflect;

#[derive(Debug, Default)]
pub struct Country {
    pub code: String,
    pub name: Option<String>,
}

#[derive(Debug, Default)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub country: Option<Country>,
}

#[derive(Debug, Default)]
pub struct Person {
    pub id: u64,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub born: Option<NaiveDateTime>,
    pub address: Option<Address>,
}

impl Person {
    pub fn display_name(&self) -> String {
        match (&self.name, self.age) {
            (Some(name), Some(age)) => format!("{name} ({age})"),
            (Some(name), None) => name.clone(),
            _ => format!("#{}", self.id),
        }
    }
}

#[derive(Debug, Default)]
pub struct Customer {
    pub person: Person,
    pub min_order: f64,
    pub max_order: f64,
    pub credit: Option<u32>,
    pub segment: Option<TypeKey>,
}

/// Has no factory, so it cannot be instantiated while writing a path.
#[derive(Debug)]
pub struct Ledger {
    pub balance: i64,
}

#[derive(Debug, Default)]
pub struct Account {
    pub number: Option<String>,
    pub ledger: Option<Ledger>,
}

reflect! {
    #[constructible]
    Country { field code, field name }
}

reflect! {
    #[constructible]
    Address { field street, field city, field zip, record country }
}

reflect! {
    #[constructible]
    Person {
        field id,
        field name,
        field age,
        field born,
        record address,
        property display_name,
    }
}

reflect! {
    #[constructible]
    Customer extends person {
        field min_order,
        field max_order,
        field credit,
        field segment,
    }
}

reflect! {
    Ledger { field balance }
}

reflect! {
    #[constructible]
    Account { field number, record ledger }
}

/// A person that satisfies every rule registered in these tests.
pub fn valid_person() -> Person {
    Person {
        id: 1,
        name: Some("Ada Lovelace".into()),
        age: Some(36),
        born: None,
        address: Some(Address {
            street: Some("12 St James's Square".into()),
            city: Some("London".into()),
            zip: Some("SW1Y4JH".into()),
            country: Some(Country {
                code: "GB".into(),
                name: Some("United Kingdom".into()),
            }),
        }),
    }
}

/// Routes test logs through `tracing-subscriber`; safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
