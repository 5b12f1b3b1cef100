//! Runtime descriptors for host record types.
//!
//! A [`RecordType`] lists the members of a type together with accessor
//! functions, the optional base type it embeds, and an optional factory used to
//! instantiate missing intermediate records when writing through a path.
//!
//! Descriptors are built once per type (usually through [`reflect!`](crate::reflect))
//! and live for the rest of the process.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use super::value::{ConversionError, FieldValue, TypeKey, Value, ValueType};

// ============================================================================
// RECORD TRAITS
// ============================================================================

/// Object-safe view of a reflected record.
///
/// Implemented automatically for every [`Reflect`] type.
pub trait Record: Any + fmt::Debug + Send + Sync {
    /// Descriptor of the concrete runtime type.
    fn record_type(&self) -> &'static RecordType;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Types that publish a [`RecordType`] descriptor.
pub trait Reflect: fmt::Debug + Send + Sync + 'static {
    fn describe() -> &'static RecordType;
}

impl<T: Reflect> Record for T {
    fn record_type(&self) -> &'static RecordType {
        T::describe()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Views `record` as `T`, following the base chain when `T` is one of its
/// base types.
pub fn downcast_record<T: Reflect>(record: &dyn Record) -> Option<&T> {
    upcast(record, TypeKey::record::<T>())?.as_any().downcast_ref()
}

/// Walks the base chain of `record` until it reaches `target`.
pub(crate) fn upcast(mut record: &dyn Record, target: TypeKey) -> Option<&dyn Record> {
    loop {
        let ty = record.record_type();
        if ty.key == target {
            return Some(record);
        }
        record = ty.base.as_ref()?.access.upcast(record.as_any())?;
    }
}

pub(crate) fn upcast_mut(mut record: &mut dyn Record, target: TypeKey) -> Option<&mut dyn Record> {
    loop {
        let ty = record.record_type();
        if ty.key == target {
            return Some(record);
        }
        record = ty.base.as_ref()?.access.upcast_mut(record.as_any_mut())?;
    }
}

// ============================================================================
// RECORD TYPE
// ============================================================================

type Factory = Box<dyn Fn() -> Box<dyn Record> + Send + Sync>;

/// Descriptor of a record type.
pub struct RecordType {
    key: TypeKey,
    base: Option<BaseLink>,
    members: Vec<MemberInfo>,
    factory: Option<Factory>,
}

struct BaseLink {
    key: TypeKey,
    access: Box<dyn BaseAccess>,
}

impl RecordType {
    /// Starts a descriptor for `T`.
    #[must_use]
    pub fn builder<T: Reflect>() -> RecordTypeBuilder<T> {
        RecordTypeBuilder {
            key: TypeKey::record::<T>(),
            base: None,
            members: Vec::new(),
            factory: None,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn key(&self) -> TypeKey {
        self.key
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.key.name()
    }

    /// Directly embedded base type.
    #[must_use]
    pub fn base_type(&self) -> Option<&'static RecordType> {
        self.base.as_ref().and_then(|base| base.key.record_type())
    }

    /// Base types from the nearest to the most distant.
    pub fn base_types(&self) -> impl Iterator<Item = &'static RecordType> + use<> {
        std::iter::successors(self.base_type(), |ty| ty.base_type())
    }

    /// Whether `self` is `other` or derives from it.
    #[must_use]
    pub fn is_subtype_of(&self, other: &RecordType) -> bool {
        self.key.is_assignable_to(&other.key)
    }

    /// Members declared on this type, in declaration order.
    #[must_use]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// Member declared on this type itself.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members.iter().find(|member| member.name == name)
    }

    /// Finds a member on this type or, failing that, on its base types.
    ///
    /// Returns the declaring type along with the member.
    pub fn find_member(&'static self, name: &str) -> Option<(&'static RecordType, &'static MemberInfo)> {
        std::iter::once(self)
            .chain(self.base_types())
            .find_map(|ty| ty.member(name).map(|member| (ty, member)))
    }

    #[must_use]
    pub fn is_constructible(&self) -> bool {
        self.factory.is_some()
    }

    /// Creates a default instance through the registered factory.
    #[must_use]
    pub fn construct(&self) -> Option<Box<dyn Record>> {
        self.factory.as_ref().map(|factory| factory())
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType")
            .field("name", &self.key.name())
            .field("base", &self.base.as_ref().map(|base| base.key.name()))
            .field("members", &self.members)
            .field("constructible", &self.factory.is_some())
            .finish()
    }
}

// ============================================================================
// MEMBER INFO
// ============================================================================

/// How a member is exposed by its host type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A stored field.
    Field,
    /// A computed value, optionally with a setter.
    Property,
}

/// A single member of a [`RecordType`].
pub struct MemberInfo {
    name: &'static str,
    kind: MemberKind,
    value_type: ValueType,
    nullable: bool,
    access: Box<dyn Access>,
}

impl MemberInfo {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Declared type of the member.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        !self.access.writable()
    }

    pub(crate) fn get(&self, owner: &dyn Record) -> Option<Value> {
        self.access.get(owner.as_any())
    }

    pub(crate) fn set(&self, owner: &mut dyn Record, value: Value) -> Result<(), AccessError> {
        self.access.set(owner.as_any_mut(), value)
    }

    pub(crate) fn nested<'a>(&self, owner: &'a dyn Record) -> Option<&'a dyn Record> {
        self.access.nested(owner.as_any())
    }

    pub(crate) fn nested_mut<'a>(&self, owner: &'a mut dyn Record) -> Option<&'a mut dyn Record> {
        self.access.nested_mut(owner.as_any_mut())
    }

    pub(crate) fn attach(&self, owner: &mut dyn Record, record: Box<dyn Record>) -> Result<(), AccessError> {
        self.access.attach(owner.as_any_mut(), record)
    }
}

impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberInfo")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("value_type", &self.value_type)
            .field("nullable", &self.nullable)
            .field("read_only", &self.is_read_only())
            .finish()
    }
}

// ============================================================================
// ACCESSORS
// ============================================================================

/// Failure of a single member access, before path context is attached.
#[derive(Debug)]
pub(crate) enum AccessError {
    WrongOwner,
    ReadOnly,
    NotARecord,
    RecordMismatch { actual: &'static str },
    Conversion(ConversionError),
}

impl From<ConversionError> for AccessError {
    fn from(error: ConversionError) -> Self {
        Self::Conversion(error)
    }
}

trait Access: Send + Sync {
    fn get(&self, owner: &dyn Any) -> Option<Value>;

    fn writable(&self) -> bool {
        true
    }

    fn set(&self, owner: &mut dyn Any, value: Value) -> Result<(), AccessError>;

    fn nested<'a>(&self, _owner: &'a dyn Any) -> Option<&'a dyn Record> {
        None
    }

    fn nested_mut<'a>(&self, _owner: &'a mut dyn Any) -> Option<&'a mut dyn Record> {
        None
    }

    fn attach(&self, _owner: &mut dyn Any, _record: Box<dyn Record>) -> Result<(), AccessError> {
        Err(AccessError::NotARecord)
    }
}

trait BaseAccess: Send + Sync {
    fn upcast<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Record>;

    fn upcast_mut<'a>(&self, owner: &'a mut dyn Any) -> Option<&'a mut dyn Record>;
}

struct FieldAccess<T, F> {
    get: fn(&T) -> &F,
    get_mut: fn(&mut T) -> &mut F,
}

impl<T: Reflect, F: FieldValue> Access for FieldAccess<T, F> {
    fn get(&self, owner: &dyn Any) -> Option<Value> {
        owner.downcast_ref::<T>().map(|owner| (self.get)(owner).to_value())
    }

    fn set(&self, owner: &mut dyn Any, value: Value) -> Result<(), AccessError> {
        let owner = owner.downcast_mut::<T>().ok_or(AccessError::WrongOwner)?;
        *(self.get_mut)(owner) = F::from_value(value)?;
        Ok(())
    }
}

struct PropertyAccess<T, F> {
    get: fn(&T) -> F,
    set: Option<fn(&mut T, F)>,
}

impl<T: Reflect, F: FieldValue> Access for PropertyAccess<T, F> {
    fn get(&self, owner: &dyn Any) -> Option<Value> {
        owner.downcast_ref::<T>().map(|owner| (self.get)(owner).to_value())
    }

    fn writable(&self) -> bool {
        self.set.is_some()
    }

    fn set(&self, owner: &mut dyn Any, value: Value) -> Result<(), AccessError> {
        let set = self.set.ok_or(AccessError::ReadOnly)?;
        let owner = owner.downcast_mut::<T>().ok_or(AccessError::WrongOwner)?;
        set(owner, F::from_value(value)?);
        Ok(())
    }
}

/// Nullable nested record stored as `Option<R>`.
struct RecordAccess<T, R> {
    get: fn(&T) -> &Option<R>,
    get_mut: fn(&mut T) -> &mut Option<R>,
}

impl<T: Reflect, R: Reflect> Access for RecordAccess<T, R> {
    fn get(&self, owner: &dyn Any) -> Option<Value> {
        owner.downcast_ref::<T>().map(|owner| {
            (self.get)(owner)
                .as_ref()
                .map_or(Value::Null, |record| Value::Record(record.record_type().key()))
        })
    }

    fn set(&self, owner: &mut dyn Any, value: Value) -> Result<(), AccessError> {
        let owner = owner.downcast_mut::<T>().ok_or(AccessError::WrongOwner)?;
        match value {
            Value::Null => {
                *(self.get_mut)(owner) = None;
                Ok(())
            }
            other => Err(AccessError::Conversion(ConversionError::Incompatible {
                value: other.to_string(),
                target: ValueType::Record(TypeKey::record::<R>()),
            })),
        }
    }

    fn nested<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Record> {
        let owner = owner.downcast_ref::<T>()?;
        (self.get)(owner).as_ref().map(|record| record as &dyn Record)
    }

    fn nested_mut<'a>(&self, owner: &'a mut dyn Any) -> Option<&'a mut dyn Record> {
        let owner = owner.downcast_mut::<T>()?;
        (self.get_mut)(owner).as_mut().map(|record| record as &mut dyn Record)
    }

    fn attach(&self, owner: &mut dyn Any, record: Box<dyn Record>) -> Result<(), AccessError> {
        let owner = owner.downcast_mut::<T>().ok_or(AccessError::WrongOwner)?;
        let actual = record.record_type().name();
        let record = record
            .into_any()
            .downcast::<R>()
            .map_err(|_| AccessError::RecordMismatch { actual })?;
        *(self.get_mut)(owner) = Some(*record);
        Ok(())
    }
}

/// Nested record stored inline, never null.
struct EmbeddedAccess<T, R> {
    get: fn(&T) -> &R,
    get_mut: fn(&mut T) -> &mut R,
}

impl<T: Reflect, R: Reflect> Access for EmbeddedAccess<T, R> {
    fn get(&self, owner: &dyn Any) -> Option<Value> {
        owner
            .downcast_ref::<T>()
            .map(|owner| Value::Record((self.get)(owner).record_type().key()))
    }

    fn set(&self, _owner: &mut dyn Any, value: Value) -> Result<(), AccessError> {
        let target = ValueType::Record(TypeKey::record::<R>());
        Err(AccessError::Conversion(match value {
            Value::Null => ConversionError::Null { target },
            other => ConversionError::Incompatible {
                value: other.to_string(),
                target,
            },
        }))
    }

    fn nested<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Record> {
        owner
            .downcast_ref::<T>()
            .map(|owner| (self.get)(owner) as &dyn Record)
    }

    fn nested_mut<'a>(&self, owner: &'a mut dyn Any) -> Option<&'a mut dyn Record> {
        owner
            .downcast_mut::<T>()
            .map(|owner| (self.get_mut)(owner) as &mut dyn Record)
    }

    fn attach(&self, owner: &mut dyn Any, record: Box<dyn Record>) -> Result<(), AccessError> {
        let owner = owner.downcast_mut::<T>().ok_or(AccessError::WrongOwner)?;
        let actual = record.record_type().name();
        let record = record
            .into_any()
            .downcast::<R>()
            .map_err(|_| AccessError::RecordMismatch { actual })?;
        *(self.get_mut)(owner) = *record;
        Ok(())
    }
}

struct BaseField<T, B> {
    get: fn(&T) -> &B,
    get_mut: fn(&mut T) -> &mut B,
}

impl<T: Reflect, B: Reflect> BaseAccess for BaseField<T, B> {
    fn upcast<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Record> {
        owner
            .downcast_ref::<T>()
            .map(|owner| (self.get)(owner) as &dyn Record)
    }

    fn upcast_mut<'a>(&self, owner: &'a mut dyn Any) -> Option<&'a mut dyn Record> {
        owner
            .downcast_mut::<T>()
            .map(|owner| (self.get_mut)(owner) as &mut dyn Record)
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for a [`RecordType`]. Created by [`RecordType::builder`].
///
/// Declaring a member twice keeps the last declaration.
pub struct RecordTypeBuilder<T> {
    key: TypeKey,
    base: Option<BaseLink>,
    members: Vec<MemberInfo>,
    factory: Option<Factory>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Reflect> RecordTypeBuilder<T> {
    fn push(mut self, member: MemberInfo) -> Self {
        self.members.retain(|existing| existing.name != member.name);
        self.members.push(member);
        self
    }

    /// Stored field. `Option<F>` fields are nullable.
    pub fn field<F: FieldValue>(
        self,
        name: &'static str,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> Self {
        self.push(MemberInfo {
            name,
            kind: MemberKind::Field,
            value_type: F::value_type(),
            nullable: F::nullable(),
            access: Box::new(FieldAccess { get, get_mut }),
        })
    }

    /// Read-only computed member.
    pub fn property<F: FieldValue>(self, name: &'static str, get: fn(&T) -> F) -> Self {
        self.push(MemberInfo {
            name,
            kind: MemberKind::Property,
            value_type: F::value_type(),
            nullable: F::nullable(),
            access: Box::new(PropertyAccess { get, set: None }),
        })
    }

    /// Computed member with a setter.
    pub fn property_with_setter<F: FieldValue>(
        self,
        name: &'static str,
        get: fn(&T) -> F,
        set: fn(&mut T, F),
    ) -> Self {
        self.push(MemberInfo {
            name,
            kind: MemberKind::Property,
            value_type: F::value_type(),
            nullable: F::nullable(),
            access: Box::new(PropertyAccess { get, set: Some(set) }),
        })
    }

    /// Nullable nested record.
    pub fn record<R: Reflect>(
        self,
        name: &'static str,
        get: fn(&T) -> &Option<R>,
        get_mut: fn(&mut T) -> &mut Option<R>,
    ) -> Self {
        self.push(MemberInfo {
            name,
            kind: MemberKind::Field,
            value_type: ValueType::Record(TypeKey::record::<R>()),
            nullable: true,
            access: Box::new(RecordAccess { get, get_mut }),
        })
    }

    /// Nested record stored inline.
    pub fn embedded<R: Reflect>(
        self,
        name: &'static str,
        get: fn(&T) -> &R,
        get_mut: fn(&mut T) -> &mut R,
    ) -> Self {
        self.push(MemberInfo {
            name,
            kind: MemberKind::Field,
            value_type: ValueType::Record(TypeKey::record::<R>()),
            nullable: false,
            access: Box::new(EmbeddedAccess { get, get_mut }),
        })
    }

    /// Declares `B` as the base type, embedded in `T`.
    ///
    /// Members of `B` resolve on `T`, and validators registered for `B` apply
    /// to `T`.
    pub fn base<B: Reflect>(mut self, get: fn(&T) -> &B, get_mut: fn(&mut T) -> &mut B) -> Self {
        self.base = Some(BaseLink {
            key: TypeKey::record::<B>(),
            access: Box::new(BaseField { get, get_mut }),
        });
        self
    }

    /// Factory used to instantiate `T` when a path writes through a null
    /// member of this type.
    pub fn factory(mut self, make: fn() -> T) -> Self {
        self.factory = Some(Box::new(move || Box::new(make()) as Box<dyn Record>));
        self
    }

    /// Uses `T::default` as the factory.
    pub fn constructible(self) -> Self
    where
        T: Default,
    {
        self.factory(T::default)
    }

    #[must_use]
    pub fn build(self) -> RecordType {
        RecordType {
            key: self.key,
            base: self.base,
            members: self.members,
            factory: self.factory,
        }
    }
}
