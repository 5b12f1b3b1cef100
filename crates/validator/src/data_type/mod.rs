//! Per-type validation rules
//!
//! A [`DataType`] binds a record type to its validators and primary key
//! members. Data types are collected in a [`DataTypeRegistry`], which runs
//! the validators of a type together with those inherited from registered
//! base types.
//!
//! ```rust,ignore
//! use tessera_validator::prelude::*;
//!
//! let registry = DataTypeRegistry::new();
//! registry.register(
//!     DataType::builder::<Customer>()
//!         .rule("name", required())?
//!         .rule("age", range(18, 120))?
//!         .primary_key("id")?
//!         .validate_primary_key()
//!         .build(),
//! )?;
//!
//! let errors = registry.validate(&customer)?;
//! ```

mod error;
mod registry;

pub use error::DefinitionError;
pub use registry::DataTypeRegistry;

use std::fmt;

use crate::foundation::{Validate, ValidationErrors, ValueRule, validate_with_all};
use crate::member::{MemberError, MemberExpression, Record, RecordType, Reflect, TypeKey, Value};
use crate::validators::{CompareOperator, MemberCompare, MemberValidator, PrimaryKeyPresent};

/// A validator over whole records, as stored in a [`DataType`].
pub type DynValidator = Box<dyn Validate<Input = dyn Record> + Send + Sync>;

// ============================================================================
// DATA TYPE
// ============================================================================

/// A record type together with its validators and primary key members.
pub struct DataType {
    record_type: &'static RecordType,
    validators: Vec<DynValidator>,
    primary_key: Vec<MemberExpression>,
}

impl DataType {
    /// Starts a data type for `T`.
    pub fn builder<T: Reflect>() -> DataTypeBuilder {
        Self::for_record_type(T::describe())
    }

    /// Starts a data type for an already resolved descriptor.
    pub fn for_record_type(record_type: &'static RecordType) -> DataTypeBuilder {
        DataTypeBuilder {
            record_type,
            validators: Vec::new(),
            primary_key: Vec::new(),
            validate_primary_key: false,
        }
    }

    #[must_use]
    pub fn record_type(&self) -> &'static RecordType {
        self.record_type
    }

    #[must_use]
    pub fn key(&self) -> TypeKey {
        self.record_type.key()
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.record_type.name()
    }

    /// Validators declared on this type only.
    #[must_use]
    pub fn validators(&self) -> &[DynValidator] {
        &self.validators
    }

    #[must_use]
    pub fn primary_key(&self) -> &[MemberExpression] {
        &self.primary_key
    }

    /// Whether records of `other` are records of this type too.
    #[must_use]
    pub fn is_assignable_from(&self, other: &DataType) -> bool {
        other.record_type.is_subtype_of(self.record_type)
    }

    /// Runs the validators declared on this type, without inherited ones.
    ///
    /// Every validator runs; the result holds all failures.
    pub fn validate(&self, obj: &dyn Record) -> ValidationErrors {
        validate_with_all(obj, &self.validators).err().unwrap_or_default()
    }

    /// Reads the primary key members of `obj`, in declaration order.
    pub fn primary_key_values(&self, obj: &dyn Record) -> Result<Vec<Value>, MemberError> {
        self.primary_key
            .iter()
            .map(|member| member.get_value(obj))
            .collect()
    }
}

impl fmt::Debug for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataType")
            .field("record_type", &self.name())
            .field("validators", &self.validators.len())
            .field("primary_key", &self.primary_key)
            .finish()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for [`DataType`].
///
/// Member paths are resolved as they are added, so a typo fails here rather
/// than during validation.
#[must_use = "builder does nothing until .build() is called"]
pub struct DataTypeBuilder {
    record_type: &'static RecordType,
    validators: Vec<DynValidator>,
    primary_key: Vec<MemberExpression>,
    validate_primary_key: bool,
}

impl fmt::Debug for DataTypeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTypeBuilder")
            .field("record_type", &self.record_type.name())
            .field("validators", &self.validators.len())
            .field("primary_key", &self.primary_key)
            .finish_non_exhaustive()
    }
}

impl DataTypeBuilder {
    /// Binds a value rule to the member at `path`.
    pub fn rule<R>(mut self, path: &str, rule: R) -> Result<Self, DefinitionError>
    where
        R: ValueRule + Send + Sync + 'static,
    {
        let member = MemberExpression::new(self.record_type, path)?;
        self.validators
            .push(Box::new(MemberValidator::new(member, rule)?));
        Ok(self)
    }

    /// Adds a record validator.
    pub fn validator<V>(mut self, validator: V) -> Self
    where
        V: Validate<Input = dyn Record> + Send + Sync + 'static,
    {
        self.validators.push(Box::new(validator));
        self
    }

    /// Adds a [`MemberCompare`] between two members of this type.
    pub fn compare(mut self, member: &str, operator: CompareOperator, other: &str) -> Result<Self, DefinitionError> {
        let compare = MemberCompare::new(
            MemberExpression::new(self.record_type, member)?,
            operator,
            MemberExpression::new(self.record_type, other)?,
        )?;
        self.validators.push(Box::new(compare));
        Ok(self)
    }

    /// Appends a primary key member.
    pub fn primary_key(mut self, path: &str) -> Result<Self, MemberError> {
        self.primary_key
            .push(MemberExpression::new(self.record_type, path)?);
        Ok(self)
    }

    /// Adds a [`PrimaryKeyPresent`] check over all primary key members.
    pub fn validate_primary_key(mut self) -> Self {
        self.validate_primary_key = true;
        self
    }

    #[must_use]
    pub fn build(mut self) -> DataType {
        if self.validate_primary_key && !self.primary_key.is_empty() {
            self.validators
                .push(Box::new(PrimaryKeyPresent::new(self.primary_key.clone())));
        }
        DataType {
            record_type: self.record_type,
            validators: self.validators,
            primary_key: self.primary_key,
        }
    }
}
