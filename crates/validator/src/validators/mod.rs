//! Built-in validators
//!
//! Value rules check one member value and are bound to a member path with
//! [`ValueRuleExt::on`](crate::foundation::ValueRuleExt::on). Record
//! validators read the members they need from the whole record.
//!
//! # Categories
//!
//! - **Value rules**: presence, string length, range, comparison, regex,
//!   type, file system paths, custom predicates
//! - **Record validators**: member comparison, primary key presence,
//!   custom record checks
//!
//! # Examples
//!
//! ```rust,ignore
//! use tessera_validator::prelude::*;
//!
//! let name = required().on::<Customer>("name")?;
//! let city = string_length(2, 40).on::<Customer>("address.city")?;
//! let orders = MemberCompare::of::<Customer>("max_order", CompareOperator::GreaterThanEqual, "min_order")?;
//! ```

// Binding
pub mod member;

// Value rules
pub mod compare;
pub mod custom;
pub mod kind;
pub mod length;
pub mod path;
pub mod pattern;
pub mod range;
pub mod required;

// Record validators
pub mod primary_key;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use member::MemberValidator;

pub use compare::{CompareOperator, MemberCompare, ValueCompare, compare};
pub use custom::{Custom, RecordCheck, custom, record_check};
pub use kind::{IsType, is_type, is_type_of};
pub use length::{LengthMode, StringLength, string_length};
pub use path::{PathExists, PathKind, directory_exists, file_exists};
pub use pattern::{MatchesRegex, matches_regex};
pub use primary_key::PrimaryKeyPresent;
pub use range::{Range, range};
pub use required::{Required, required};
