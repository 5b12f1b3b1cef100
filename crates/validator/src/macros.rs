//! Macros for declaring record descriptors and validators with minimal
//! boilerplate.
//!
//! # Available Macros
//!
//! - [`reflect!`]: Publish a [`RecordType`](crate::member::RecordType) for a struct
//! - [`validator!`]: Create a complete validator (struct + Validate impl + factory fn)
//!
//! # Examples
//!
//! ```rust,ignore
//! use tessera_validator::reflect;
//!
//! #[derive(Debug, Default)]
//! struct Address {
//!     city: Option<String>,
//! }
//!
//! #[derive(Debug, Default)]
//! struct Customer {
//!     name: String,
//!     address: Option<Address>,
//! }
//!
//! reflect! {
//!     #[constructible]
//!     Address { field city }
//! }
//!
//! reflect! {
//!     #[constructible]
//!     Customer { field name, record address }
//! }
//! ```

// ============================================================================
// REFLECT MACRO
// ============================================================================

/// Implements [`Reflect`](crate::member::Reflect) for a struct.
///
/// Member kinds:
///
/// - `field name`: stored field of any [`FieldValue`](crate::member::FieldValue) type
/// - `record name`: nullable nested record (`Option<R>`)
/// - `embedded name`: nested record stored inline
/// - `property name`: read-only member computed by the method `name(&self)`
///
/// `extends base_field` declares the embedded base type. Each `#[flag]` calls
/// the builder method of the same name, e.g. `#[constructible]` registers
/// `Default::default` as the factory.
///
/// ```rust,ignore
/// reflect! {
///     #[constructible]
///     Employee extends person {
///         field salary,
///         property seniority,
///     }
/// }
/// ```
#[macro_export]
macro_rules! reflect {
    (@member $builder:ident, field $member:ident) => {
        $builder.field(stringify!($member), |t| &t.$member, |t| &mut t.$member)
    };
    (@member $builder:ident, record $member:ident) => {
        $builder.record(stringify!($member), |t| &t.$member, |t| &mut t.$member)
    };
    (@member $builder:ident, embedded $member:ident) => {
        $builder.embedded(stringify!($member), |t| &t.$member, |t| &mut t.$member)
    };
    (@member $builder:ident, property $member:ident) => {
        $builder.property(stringify!($member), |t| t.$member())
    };

    (
        $(#[$flag:ident])*
        $ty:ident $(extends $base:ident)? {
            $($kind:ident $member:ident),* $(,)?
        }
    ) => {
        impl $crate::member::Reflect for $ty {
            fn describe() -> &'static $crate::member::RecordType {
                static DESCRIPTOR: ::std::sync::LazyLock<$crate::member::RecordType> =
                    ::std::sync::LazyLock::new(|| {
                        let builder = $crate::member::RecordType::builder::<$ty>();
                        $(let builder = builder.base(|t| &t.$base, |t| &mut t.$base);)?
                        $(let builder = builder.$flag();)*
                        $(let builder = $crate::reflect!(@member builder, $kind $member);)*
                        builder.build()
                    });
                &DESCRIPTOR
            }
        }
    };
}

// ============================================================================
// VALIDATOR MACRO
// ============================================================================

/// Creates a complete validator: struct definition, `Validate` implementation,
/// constructor, and factory function.
///
/// `#[derive(Debug, Clone)]` is always applied. Add extra derives via `#[derive(...)]`.
///
/// # Variants
///
/// **Struct with fields** (auto `new` from all fields):
/// ```rust,ignore
/// validator! {
///     pub IsType { expected: TypeKey } for Value;
///     rule(self, input) { ... }
///     error(self, input) { ValidationError::new("type_mismatch", "...") }
///     fn is_type(expected: TypeKey);
/// }
/// ```
///
/// **Custom constructor** (overrides auto `new`):
/// ```rust,ignore
/// validator! {
///     pub Range { min: Value, max: Value } for Value;
///     rule(self, input) { ... }
///     error(self, input) { ... }
///     new(min: impl Into<Value>, max: impl Into<Value>) { Self { min: min.into(), max: max.into() } }
///     fn range(min: impl Into<Value>, max: impl Into<Value>);
/// }
/// ```
///
/// **Fallible constructor**: `new(..) -> ErrorType { .. }` and
/// `fn factory(..) -> ErrorType;` wrap both in `Result`.
#[macro_export]
macro_rules! validator {
    // ── Variant 3a: Struct with fields + custom new + factory fn ─────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        new($($narg:ident: $naty:ty),* $(,)?) $new_body:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $crate::validator! {
            $(#[$meta])*
            $vis $name { $($field: $fty),+ } for $input;
            rule($self_, $inp) $rule
            error($self2, $einp) $err
            new($($narg: $naty),*) $new_body
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    // ── Variant 3b: Struct with fields + custom new, no factory ──────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        new($($narg:ident: $naty:ty),* $(,)?) $new_body:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        #[allow(clippy::new_without_default)]
        impl $name {
            #[must_use]
            pub fn new($($narg: $naty),*) -> Self $new_body
        }

        impl $crate::foundation::Validate for $name {
            type Input = $input;

            #[allow(unused_variables)]
            fn validate(&$self_, $inp: &Self::Input) -> Result<(), $crate::foundation::ValidationError> {
                if $rule {
                    Ok(())
                } else {
                    let $einp = $inp;
                    Err($err)
                }
            }
        }
    };

    // ── Variant 3c: Struct with fields + fallible new + fallible factory ─
    //
    // For validators whose constructor can fail (returns Result).
    // The type after `->` is the error type; the macro wraps it in Result.
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        new($($narg:ident: $naty:ty),* $(,)?) -> $ety:ty $new_body:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?) -> $efty:ty;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            pub fn new($($narg: $naty),*) -> ::std::result::Result<Self, $ety> $new_body
        }

        impl $crate::foundation::Validate for $name {
            type Input = $input;

            #[allow(unused_variables)]
            fn validate(&$self_, $inp: &Self::Input) -> ::std::result::Result<(), $crate::foundation::ValidationError> {
                if $rule {
                    Ok(())
                } else {
                    let $einp = $inp;
                    Err($err)
                }
            }
        }

        $vis fn $factory($($farg: $faty),*) -> ::std::result::Result<$name, $efty> {
            $name::new($($farg),*)
        }
    };

    // ── Variant 2a: Struct with fields + auto new + factory fn ───────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $crate::validator! {
            $(#[$meta])*
            $vis $name { $($field: $fty),+ } for $input;
            rule($self_, $inp) $rule
            error($self2, $einp) $err
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    // ── Variant 2b: Struct with fields + auto new, no factory ────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }

        impl $crate::foundation::Validate for $name {
            type Input = $input;

            #[allow(unused_variables)]
            fn validate(&$self_, $inp: &Self::Input) -> Result<(), $crate::foundation::ValidationError> {
                if $rule {
                    Ok(())
                } else {
                    let $einp = $inp;
                    Err($err)
                }
            }
        }
    };
}
