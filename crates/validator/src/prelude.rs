//! Prelude module for convenient imports.
//!
//! Provides a single `use tessera_validator::prelude::*;` import that brings
//! in all commonly needed traits, types and validators.
//!
//! # Examples
//!
//! ```rust,ignore
//! use tessera_validator::prelude::*;
//!
//! let name = required().on::<Customer>("name")?;
//! let city = string_length(2, 40).on::<Customer>("address.city")?;
//! ```

// ============================================================================
// FOUNDATION: Core traits and errors
// ============================================================================

pub use crate::foundation::{
    Validate, ValidationError, ValidationErrors, ValidationException, ValueRule, ValueRuleExt,
};

// ============================================================================
// MEMBER: Descriptors, values and paths
// ============================================================================

pub use crate::member::{
    FieldValue, MemberError, MemberExpression, Record, RecordType, Reflect, TypeKey, Value,
    ValueType,
};

// ============================================================================
// DATA TYPES: Per-type rules and the registry
// ============================================================================

pub use crate::data_type::{DataType, DataTypeRegistry, DefinitionError};

// ============================================================================
// VALIDATORS: All built-in validators
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;

// ============================================================================
// CONFIG
// ============================================================================

pub use crate::config::ValidatorConfig;

// ============================================================================
// MACROS
// ============================================================================

pub use crate::{reflect, validator};
