//! Registry of data types keyed by record type.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::{DataType, DefinitionError};
use crate::foundation::ValidationErrors;
use crate::member::{Record, RecordType, Reflect, TypeKey, Value};

/// Thread-safe registry of [`DataType`]s.
///
/// At most one data type is registered per record type. Lookups hand out
/// `Arc`s, so validation can run concurrently with further registrations.
///
/// # Examples
///
/// ```rust,ignore
/// let registry = DataTypeRegistry::new();
/// registry.register(DataType::builder::<Person>().rule("name", required())?.build())?;
/// registry.register(DataType::builder::<Customer>().rule("credit", range(0, 5_000))?.build())?;
///
/// // runs the Customer rules, then the inherited Person rules
/// let errors = registry.validate(&customer)?;
/// ```
pub struct DataTypeRegistry {
    types: DashMap<TypeKey, Arc<DataType>>,
}

impl DataTypeRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: DashMap::new(),
        }
    }

    /// Register a data type.
    ///
    /// Fails with [`DefinitionError::DuplicateRegistration`] if its record
    /// type already has one; the existing entry is kept.
    pub fn register(&self, data_type: DataType) -> Result<Arc<DataType>, DefinitionError> {
        let type_name = data_type.name();
        match self.types.entry(data_type.key()) {
            Entry::Occupied(_) => {
                tracing::warn!(data_type = type_name, "rejected duplicate data type registration");
                Err(DefinitionError::DuplicateRegistration { type_name })
            }
            Entry::Vacant(entry) => {
                let validators = data_type.validators().len();
                let data_type = Arc::new(data_type);
                entry.insert(Arc::clone(&data_type));
                tracing::info!(data_type = type_name, validators, "registered data type");
                Ok(data_type)
            }
        }
    }

    /// Look up the data type registered for exactly `key`.
    #[must_use]
    pub fn get(&self, key: TypeKey) -> Option<Arc<DataType>> {
        self.types.get(&key).map(|entry| Arc::clone(entry.value()))
    }

    /// Look up the data type registered for `T`.
    #[must_use]
    pub fn get_for<T: Reflect>(&self) -> Option<Arc<DataType>> {
        self.get(TypeKey::record::<T>())
    }

    #[must_use]
    pub fn contains(&self, key: TypeKey) -> bool {
        self.types.contains_key(&key)
    }

    /// Number of registered data types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// List all registered record types.
    #[must_use]
    pub fn keys(&self) -> Vec<TypeKey> {
        self.types.iter().map(|entry| *entry.key()).collect()
    }

    /// All registered data types, ordered by name.
    #[must_use]
    pub fn data_types(&self) -> Vec<Arc<DataType>> {
        let mut all: Vec<_> = self
            .types
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        all.sort_by_key(|data_type| data_type.name());
        all
    }

    // ------------------------------------------------------------------------
    // Inheritance
    // ------------------------------------------------------------------------

    /// Registered data types of `record_type` and its base types, starting
    /// with `record_type` itself.
    #[must_use]
    pub fn base_data_types(&self, record_type: &RecordType) -> Vec<Arc<DataType>> {
        self.get(record_type.key())
            .into_iter()
            .chain(record_type.base_types().filter_map(|ty| self.get(ty.key())))
            .collect()
    }

    /// Nearest registered data type among the base types of `data_type`.
    #[must_use]
    pub fn base_data_type(&self, data_type: &DataType) -> Option<Arc<DataType>> {
        data_type
            .record_type()
            .base_types()
            .find_map(|ty| self.get(ty.key()))
    }

    /// Registered data types whose nearest registered base is `data_type`.
    #[must_use]
    pub fn sub_data_types(&self, data_type: &DataType) -> Vec<Arc<DataType>> {
        self.data_types()
            .into_iter()
            .filter(|candidate| {
                self.base_data_type(candidate)
                    .is_some_and(|base| base.key() == data_type.key())
            })
            .collect()
    }

    /// The whole tree of registered data types below `data_type`, depth first.
    #[must_use]
    pub fn sub_data_types_recursive(&self, data_type: &DataType) -> Vec<Arc<DataType>> {
        let mut tree = Vec::new();
        for sub in self.sub_data_types(data_type) {
            let below = self.sub_data_types_recursive(&sub);
            tree.push(sub);
            tree.extend(below);
        }
        tree
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    /// Runs every validator of the record's data type and of its registered
    /// base types, most derived first.
    ///
    /// No validator short-circuits another; the result holds every failure.
    /// Fails only when neither the record type nor any base type is
    /// registered.
    pub fn validate(&self, obj: &dyn Record) -> Result<ValidationErrors, DefinitionError> {
        let record_type = obj.record_type();
        let chain = self.base_data_types(record_type);
        if chain.is_empty() {
            return Err(DefinitionError::NotRegistered {
                type_name: record_type.name(),
            });
        }

        let mut errors = ValidationErrors::new();
        for data_type in &chain {
            errors.extend(data_type.validate(obj));
        }

        tracing::debug!(
            record_type = record_type.name(),
            data_types = chain.len(),
            errors = errors.len(),
            "validated record"
        );
        Ok(errors)
    }

    /// Primary key values of `obj`, read through the nearest registered data
    /// type that declares key members.
    ///
    /// Empty when no data type in the chain declares a primary key.
    pub fn primary_key_values(&self, obj: &dyn Record) -> Result<Vec<Value>, DefinitionError> {
        let record_type = obj.record_type();
        let chain = self.base_data_types(record_type);
        if chain.is_empty() {
            return Err(DefinitionError::NotRegistered {
                type_name: record_type.name(),
            });
        }

        match chain.iter().find(|data_type| !data_type.primary_key().is_empty()) {
            Some(data_type) => Ok(data_type.primary_key_values(obj)?),
            None => Ok(Vec::new()),
        }
    }
}

impl Default for DataTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DataTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTypeRegistry")
            .field("types", &self.data_types())
            .finish()
    }
}
