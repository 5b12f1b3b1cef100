//! Record reflection and member paths
//!
//! - **Descriptors**: [`Record`], [`Reflect`], [`RecordType`], [`MemberInfo`]
//! - **Values**: [`Value`], [`ValueType`], [`TypeKey`], [`FieldValue`]
//! - **Paths**: [`MemberExpression`]
//!
//! Host types opt in with the [`reflect!`](crate::reflect) macro or by
//! implementing [`Reflect`] with a hand-built [`RecordType`].

mod error;
mod expression;
mod record;
mod value;

pub use error::MemberError;
pub use expression::MemberExpression;
pub use record::{
    MemberInfo, MemberKind, Record, RecordType, RecordTypeBuilder, Reflect, downcast_record,
};
pub use value::{ConversionError, FieldValue, TypeKey, Value, ValueType};

pub(crate) use value::short_name;
