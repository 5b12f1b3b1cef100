//! # tessera-validator
//!
//! Member-path validation for plain Rust records.
//!
//! Record types publish a runtime descriptor with [`reflect!`]. Dotted member
//! paths such as `"address.country.name"` resolve against those descriptors
//! into [`MemberExpression`](member::MemberExpression)s, which read and write
//! nested values and instantiate missing intermediate records on write.
//! Validators bind to member paths, and a
//! [`DataTypeRegistry`](data_type::DataTypeRegistry) runs every rule of a
//! type and of its registered base types in one pass.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tessera_validator::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct Customer {
//!     name: Option<String>,
//!     age: Option<u8>,
//! }
//!
//! reflect! {
//!     #[constructible]
//!     Customer { field name, field age }
//! }
//!
//! let registry = DataTypeRegistry::new();
//! registry.register(
//!     DataType::builder::<Customer>()
//!         .rule("name", required())?
//!         .rule("age", range(18, 120))?
//!         .build(),
//! )?;
//!
//! let errors = registry.validate(&Customer::default())?;
//! assert_eq!(errors.len(), 1); // name is missing, age is null and skipped
//! ```
//!
//! ## Built-in Validators
//!
//! - **Value rules**: [`Required`](validators::Required), [`Range`](validators::Range),
//!   [`StringLength`](validators::StringLength), [`MatchesRegex`](validators::MatchesRegex),
//!   [`ValueCompare`](validators::ValueCompare), [`IsType`](validators::IsType),
//!   [`PathExists`](validators::PathExists), [`Custom`](validators::Custom)
//! - **Record validators**: [`MemberCompare`](validators::MemberCompare),
//!   [`PrimaryKeyPresent`](validators::PrimaryKeyPresent),
//!   [`RecordCheck`](validators::RecordCheck)

// ValidationError is returned by value from every failed check.
#![allow(clippy::result_large_err)]

pub mod config;
pub mod data_type;
pub mod foundation;
mod macros;
pub mod member;
pub mod prelude;
pub mod validators;

pub use config::ValidatorConfig;
pub use data_type::{DataType, DataTypeRegistry, DefinitionError};
pub use foundation::{Validate, ValidationError, ValidationErrors, ValidationException, ValueRule, ValueRuleExt};
pub use member::{MemberError, MemberExpression, Record, RecordType, Reflect, TypeKey, Value, ValueType};
