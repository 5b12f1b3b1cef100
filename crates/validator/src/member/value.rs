//! Dynamic values read from and written to record members.
//!
//! A [`Value`] is what a [`MemberExpression`](super::MemberExpression) yields
//! when it walks a path. Conversion between value kinds is culture-invariant:
//! numbers parse and print with `.` as the decimal separator and date-times use
//! ISO-8601.

use std::any::{TypeId, type_name};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use super::record::{RecordType, Reflect};

// ============================================================================
// TYPE KEY
// ============================================================================

/// Identity of a runtime type.
///
/// Equality and hashing use the [`TypeId`] only. Keys created for record types
/// also carry the descriptor, which lets [`is_assignable_to`](Self::is_assignable_to)
/// walk the base chain.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
    describe: Option<fn() -> &'static RecordType>,
}

impl TypeKey {
    /// Key for any `'static` type.
    ///
    /// The key carries no descriptor, so it is assignable only to itself even
    /// when `T` is a reflected record. Use [`record`](Self::record) for
    /// reflected types.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: short_name(type_name::<T>()),
            describe: None,
        }
    }

    /// Key for a reflected record type.
    #[must_use]
    pub fn record<T: Reflect>() -> Self {
        Self {
            describe: Some(T::describe),
            ..Self::of::<T>()
        }
    }

    /// The underlying [`TypeId`].
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Short type name without module path.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Descriptor of the type, if it is a reflected record.
    #[must_use]
    pub fn record_type(&self) -> Option<&'static RecordType> {
        self.describe.map(|describe| describe())
    }

    /// Returns `true` when `self` equals `other` or `other` is one of its
    /// base types.
    ///
    /// Base types are only known for keys built with
    /// [`record`](Self::record).
    #[must_use]
    pub fn is_assignable_to(&self, other: &TypeKey) -> bool {
        if self == other {
            return true;
        }
        let mut current = self.record_type().and_then(RecordType::base_type);
        while let Some(ty) = current {
            if ty.key() == *other {
                return true;
            }
            current = ty.base_type();
        }
        false
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// `alloc::string::String` -> `String`, `app::Customer` -> `Customer`.
pub(crate) fn short_name(full: &str) -> &str {
    let head = full.split('<').next().unwrap_or(full);
    head.rsplit("::").next().unwrap_or(head)
}

// ============================================================================
// VALUE TYPE
// ============================================================================

/// Declared type of a record member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bool,
    Int,
    UInt,
    Float,
    Text,
    DateTime,
    /// A [`TypeKey`] stored as data.
    Type,
    /// A nested record of the given type.
    Record(TypeKey),
}

impl ValueType {
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::UInt | Self::Float)
    }

    /// Whether values of this type have a natural ordering.
    #[must_use]
    pub fn is_ordered(self) -> bool {
        !matches!(self, Self::Type | Self::Record(_))
    }

    /// Whether values of `self` and `other` can be ordered against each other.
    #[must_use]
    pub fn is_comparable_with(self, other: ValueType) -> bool {
        (self.is_numeric() && other.is_numeric()) || (self == other && self.is_ordered())
    }

    /// Record key, if this is a record type.
    #[must_use]
    pub fn record_key(self) -> Option<TypeKey> {
        match self {
            Self::Record(key) => Some(key),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::UInt => f.write_str("uint"),
            Self::Float => f.write_str("float"),
            Self::Text => f.write_str("text"),
            Self::DateTime => f.write_str("datetime"),
            Self::Type => f.write_str("type"),
            Self::Record(key) => write!(f, "record `{key}`"),
        }
    }
}

// ============================================================================
// VALUE
// ============================================================================

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Dynamic value of a resolved member.
///
/// A present nested record is represented by its runtime type; walking into it
/// is the job of [`MemberExpression`](super::MemberExpression).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
    Type(TypeKey),
    Record(TypeKey),
}

impl Value {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// `Null`, or text that is empty or whitespace only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Numeric zero of any numeric kind.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Int(v) => *v == 0,
            Self::UInt(v) => *v == 0,
            Self::Float(v) => *v == 0.0,
            _ => false,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Runtime type of the value; `None` for `Null`.
    #[must_use]
    pub fn value_type(&self) -> Option<ValueType> {
        Some(match self {
            Self::Null => return None,
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::UInt(_) => ValueType::UInt,
            Self::Float(_) => ValueType::Float,
            Self::Text(_) => ValueType::Text,
            Self::DateTime(_) => ValueType::DateTime,
            Self::Type(_) => ValueType::Type,
            Self::Record(key) => ValueType::Record(*key),
        })
    }

    /// Natural ordering between two values.
    ///
    /// Numeric kinds compare across each other exactly, text compares
    /// ordinally.
    /// Returns `None` for `Null`, for `Type`/`Record` values and for pairs of
    /// unrelated kinds.
    #[must_use]
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::UInt(a), Self::UInt(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::UInt(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
            (Self::UInt(a), Self::Int(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Float(a), Self::Int(b)) => cmp_integer_float(i128::from(*b), *a).map(Ordering::reverse),
            (Self::Float(a), Self::UInt(b)) => cmp_integer_float(i128::from(*b), *a).map(Ordering::reverse),
            (Self::Int(a), Self::Float(b)) => cmp_integer_float(i128::from(*a), *b),
            (Self::UInt(a), Self::Float(b)) => cmp_integer_float(i128::from(*a), *b),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::DateTime(a), Self::DateTime(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Equality that follows [`compare`](Self::compare) for ordered kinds and
    /// type identity for `Type` values.
    ///
    /// `None` for `Record` values: a record value carries only its runtime
    /// type, not its contents.
    #[must_use]
    pub fn equivalent(&self, other: &Value) -> Option<bool> {
        match (self, other) {
            (Self::Type(a), Self::Type(b)) => Some(a == b),
            _ => self.compare(other).map(Ordering::is_eq),
        }
    }

    /// Converts the value to `target`.
    ///
    /// `Null` converts to `Null` for every target; whether the member accepts
    /// it is decided by the member's [`FieldValue`] type.
    pub fn convert_to(self, target: ValueType) -> Result<Value, ConversionError> {
        let incompatible = |value: &Value| ConversionError::Incompatible {
            value: value.to_string(),
            target,
        };

        let converted = match (self, target) {
            (Self::Null, _) => Self::Null,
            (value @ Self::Bool(_), ValueType::Bool)
            | (value @ Self::Int(_), ValueType::Int)
            | (value @ Self::UInt(_), ValueType::UInt)
            | (value @ Self::Float(_), ValueType::Float)
            | (value @ Self::Text(_), ValueType::Text)
            | (value @ Self::DateTime(_), ValueType::DateTime)
            | (value @ Self::Type(_), ValueType::Type) => value,

            (Self::Record(key), ValueType::Record(expected)) if key.is_assignable_to(&expected) => {
                Self::Record(key)
            }

            (Self::Int(v), ValueType::UInt) => match u64::try_from(v) {
                Ok(v) => Self::UInt(v),
                Err(_) => return Err(incompatible(&Self::Int(v))),
            },
            (Self::UInt(v), ValueType::Int) => match i64::try_from(v) {
                Ok(v) => Self::Int(v),
                Err(_) => return Err(incompatible(&Self::UInt(v))),
            },
            (Self::Int(v), ValueType::Float) => Self::Float(v as f64),
            (Self::UInt(v), ValueType::Float) => Self::Float(v as f64),
            (Self::Float(v), ValueType::Int) if is_integral(v, -TWO_POW_63, TWO_POW_63) => {
                Self::Int(v as i64)
            }
            (Self::Float(v), ValueType::UInt) if is_integral(v, 0.0, TWO_POW_64) => {
                Self::UInt(v as u64)
            }

            (Self::Text(text), ValueType::Bool) => match text.trim().to_ascii_lowercase().as_str() {
                "true" => Self::Bool(true),
                "false" => Self::Bool(false),
                _ => return Err(incompatible(&Self::Text(text))),
            },
            (Self::Text(text), ValueType::Int) => match text.trim().parse() {
                Ok(v) => Self::Int(v),
                Err(_) => return Err(incompatible(&Self::Text(text))),
            },
            (Self::Text(text), ValueType::UInt) => match text.trim().parse() {
                Ok(v) => Self::UInt(v),
                Err(_) => return Err(incompatible(&Self::Text(text))),
            },
            (Self::Text(text), ValueType::Float) => match text.trim().parse() {
                Ok(v) => Self::Float(v),
                Err(_) => return Err(incompatible(&Self::Text(text))),
            },
            (Self::Text(text), ValueType::DateTime) => match parse_date_time(text.trim()) {
                Some(v) => Self::DateTime(v),
                None => return Err(incompatible(&Self::Text(text))),
            },

            (value @ (Self::Bool(_) | Self::Int(_) | Self::UInt(_) | Self::Float(_)), ValueType::Text)
            | (value @ Self::DateTime(_), ValueType::Text) => Self::Text(value.to_string()),

            (value, _) => return Err(incompatible(&value)),
        };
        Ok(converted)
    }
}

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// `v` is a whole number in `min..end`.
fn is_integral(v: f64, min: f64, end: f64) -> bool {
    v.fract() == 0.0 && v >= min && v < end
}

/// Orders an integer from the `i64`/`u64` range against a float without
/// rounding the integer.
fn cmp_integer_float(int: i128, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float >= TWO_POW_64 {
        return Some(Ordering::Less);
    }
    if float < -TWO_POW_63 {
        return Some(Ordering::Greater);
    }
    let whole = float.trunc();
    match int.cmp(&(whole as i128)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(float - whole)),
        ordering => Some(ordering),
    }
}

fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::DateTime(v) => write!(f, "{}", v.format(DATE_TIME_FORMAT)),
            Self::Type(key) => write!(f, "{key}"),
            Self::Record(key) => write!(f, "<{key}>"),
        }
    }
}

// ============================================================================
// CONVERSIONS INTO VALUE
// ============================================================================

macro_rules! impl_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::Int(i64::from(v))
            }
        }
    )*};
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::UInt(u64::from(v))
            }
        }
    )*};
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Self::UInt(v as u64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<TypeKey> for Value {
    fn from(v: TypeKey) -> Self {
        Self::Type(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

// ============================================================================
// CONVERSION ERROR
// ============================================================================

/// A value could not be converted to a member's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("null cannot be assigned to a non-nullable {target} member")]
    Null { target: ValueType },

    #[error("cannot convert `{value}` to {target}")]
    Incompatible { value: String, target: ValueType },
}

// ============================================================================
// FIELD VALUE
// ============================================================================

/// Host field types that can be exposed as record members.
///
/// `Option<T>` marks a member as nullable.
pub trait FieldValue: Sized + Send + Sync + 'static {
    /// Declared member type.
    fn value_type() -> ValueType;

    fn nullable() -> bool {
        false
    }

    fn to_value(&self) -> Value;

    /// Builds the field from a value, converting it first.
    fn from_value(value: Value) -> Result<Self, ConversionError>;
}

fn not_null(value: Value, target: ValueType) -> Result<Value, ConversionError> {
    match value.convert_to(target)? {
        Value::Null => Err(ConversionError::Null { target }),
        value => Ok(value),
    }
}

macro_rules! impl_field_value {
    ($($t:ty => $kind:ident($wide:ty)),* $(,)?) => {$(
        impl FieldValue for $t {
            fn value_type() -> ValueType {
                ValueType::$kind
            }

            fn to_value(&self) -> Value {
                Value::$kind(<$wide>::from(*self))
            }

            fn from_value(value: Value) -> Result<Self, ConversionError> {
                match not_null(value, ValueType::$kind)? {
                    Value::$kind(v) => <$t>::try_from(v).map_err(|_| ConversionError::Incompatible {
                        value: v.to_string(),
                        target: ValueType::$kind,
                    }),
                    other => Err(ConversionError::Incompatible {
                        value: other.to_string(),
                        target: ValueType::$kind,
                    }),
                }
            }
        }
    )*};
}

impl_field_value! {
    i8 => Int(i64),
    i16 => Int(i64),
    i32 => Int(i64),
    i64 => Int(i64),
    u8 => UInt(u64),
    u16 => UInt(u64),
    u32 => UInt(u64),
    u64 => UInt(u64),
}

impl FieldValue for usize {
    fn value_type() -> ValueType {
        ValueType::UInt
    }

    fn to_value(&self) -> Value {
        Value::UInt(*self as u64)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        u64::from_value(value).and_then(|v| {
            usize::try_from(v).map_err(|_| ConversionError::Incompatible {
                value: v.to_string(),
                target: ValueType::UInt,
            })
        })
    }
}

impl FieldValue for f64 {
    fn value_type() -> ValueType {
        ValueType::Float
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match not_null(value, ValueType::Float)? {
            Value::Float(v) => Ok(v),
            other => Err(ConversionError::Incompatible {
                value: other.to_string(),
                target: ValueType::Float,
            }),
        }
    }
}

impl FieldValue for f32 {
    fn value_type() -> ValueType {
        ValueType::Float
    }

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        f64::from_value(value).map(|v| v as f32)
    }
}

impl FieldValue for bool {
    fn value_type() -> ValueType {
        ValueType::Bool
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match not_null(value, ValueType::Bool)? {
            Value::Bool(v) => Ok(v),
            other => Err(ConversionError::Incompatible {
                value: other.to_string(),
                target: ValueType::Bool,
            }),
        }
    }
}

impl FieldValue for String {
    fn value_type() -> ValueType {
        ValueType::Text
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match not_null(value, ValueType::Text)? {
            Value::Text(v) => Ok(v),
            other => Err(ConversionError::Incompatible {
                value: other.to_string(),
                target: ValueType::Text,
            }),
        }
    }
}

impl FieldValue for NaiveDateTime {
    fn value_type() -> ValueType {
        ValueType::DateTime
    }

    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match not_null(value, ValueType::DateTime)? {
            Value::DateTime(v) => Ok(v),
            other => Err(ConversionError::Incompatible {
                value: other.to_string(),
                target: ValueType::DateTime,
            }),
        }
    }
}

impl FieldValue for TypeKey {
    fn value_type() -> ValueType {
        ValueType::Type
    }

    fn to_value(&self) -> Value {
        Value::Type(*self)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match not_null(value, ValueType::Type)? {
            Value::Type(v) => Ok(v),
            other => Err(ConversionError::Incompatible {
                value: other.to_string(),
                target: ValueType::Type,
            }),
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn value_type() -> ValueType {
        T::value_type()
    }

    fn nullable() -> bool {
        true
    }

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldValue::to_value)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
