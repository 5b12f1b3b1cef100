//! Dotted member paths over reflected records.

use std::fmt;

use super::error::MemberError;
use super::record::{AccessError, MemberInfo, Record, RecordType, Reflect, upcast, upcast_mut};
use super::value::{Value, ValueType};

/// A dotted member path (`"address.country.name"`) resolved against a root
/// record type.
///
/// Resolution happens once, in [`new`](Self::new); applying the expression to
/// an object only walks the cached steps.
///
/// # Examples
///
/// ```rust,ignore
/// let city = MemberExpression::of::<Customer>("address.city")?;
///
/// let mut customer = Customer::default();
/// assert_eq!(city.get_value(&customer)?, Value::Null);
///
/// city.set_value(&mut customer, "Oslo")?; // instantiates `address`
/// assert_eq!(city.get_value(&customer)?, Value::from("Oslo"));
/// ```
#[derive(Clone)]
pub struct MemberExpression {
    root: &'static RecordType,
    path: String,
    steps: Vec<Step>,
}

#[derive(Clone, Copy)]
struct Step {
    owner: &'static RecordType,
    member: &'static MemberInfo,
}

impl MemberExpression {
    /// Resolves `path` against `root`.
    ///
    /// Segments are separated by `.` and trimmed. Members declared on base
    /// types are found through the base chain.
    pub fn new(root: &'static RecordType, path: &str) -> Result<Self, MemberError> {
        if path.trim().is_empty() {
            return Err(MemberError::EmptyPath {
                type_name: root.name(),
            });
        }

        let segments: Vec<&str> = path.split('.').map(str::trim).collect();
        let mut steps = Vec::with_capacity(segments.len());
        let mut current = root;

        for (index, segment) in segments.iter().enumerate() {
            let (owner, member) =
                current
                    .find_member(segment)
                    .ok_or_else(|| MemberError::NotFound {
                        type_name: current.name(),
                        member: (*segment).to_owned(),
                        path: path.to_owned(),
                    })?;
            steps.push(Step { owner, member });

            if index + 1 < segments.len() {
                current = member
                    .value_type()
                    .record_key()
                    .and_then(|key| key.record_type())
                    .ok_or_else(|| MemberError::NotTraversable {
                        type_name: owner.name(),
                        member: member.name(),
                        value_type: member.value_type(),
                        path: path.to_owned(),
                    })?;
            }
        }

        Ok(Self {
            root,
            path: segments.join("."),
            steps,
        })
    }

    /// Resolves `path` against the descriptor of `T`.
    pub fn of<T: Reflect>(path: &str) -> Result<Self, MemberError> {
        Self::new(T::describe(), path)
    }

    /// Normalized path, segments joined by `.` without surrounding whitespace.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn root_type(&self) -> &'static RecordType {
        self.root
    }

    /// Members along the path, root side first.
    pub fn members(&self) -> impl Iterator<Item = &'static MemberInfo> + '_ {
        self.steps.iter().map(|step| step.member)
    }

    #[must_use]
    pub fn final_member(&self) -> &'static MemberInfo {
        self.last_step().member
    }

    /// Declared type of the final member.
    #[must_use]
    pub fn return_type(&self) -> ValueType {
        self.final_member().value_type()
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.final_member().is_read_only()
    }

    fn last_step(&self) -> &Step {
        // `new` never produces an empty step list.
        &self.steps[self.steps.len() - 1]
    }

    // ------------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------------

    /// Value of every member along the path.
    ///
    /// Once an intermediate record is null, every following entry is
    /// [`Value::Null`].
    pub fn get_values(&self, obj: &dyn Record) -> Result<Vec<Value>, MemberError> {
        let mut values = Vec::with_capacity(self.steps.len());
        let mut current = Some(self.enter(obj)?);

        for step in &self.steps {
            let Some(container) = current else {
                values.push(Value::Null);
                continue;
            };
            let owner = self.owner(container, step)?;
            values.push(step.member.get(owner).ok_or_else(|| self.root_mismatch(owner))?);
            current = step.member.nested(owner);
        }

        Ok(values)
    }

    /// Value of the final member, or [`Value::Null`] when any intermediate
    /// record on the path is null.
    pub fn get_value(&self, obj: &dyn Record) -> Result<Value, MemberError> {
        let mut current = self.enter(obj)?;
        let (last, intermediate) = self.split_steps();

        for step in intermediate {
            let owner = self.owner(current, step)?;
            match step.member.nested(owner) {
                Some(next) => current = next,
                None => return Ok(Value::Null),
            }
        }

        let owner = self.owner(current, last)?;
        last.member.get(owner).ok_or_else(|| self.root_mismatch(owner))
    }

    // ------------------------------------------------------------------------
    // Writing
    // ------------------------------------------------------------------------

    /// Assigns `value` to the final member.
    ///
    /// Null intermediate records are instantiated through their type's factory
    /// and attached before the walk continues. The value is converted to the
    /// member's declared type first.
    pub fn set_value(&self, obj: &mut dyn Record, value: impl Into<Value>) -> Result<(), MemberError> {
        let (last, intermediate) = self.split_steps();
        let container = self.materialize(obj, intermediate)?;
        let owner = self.owner_mut(container, last)?;
        last.member
            .set(owner, value.into())
            .map_err(|error| self.access_error(last, error))
    }

    /// Assigns a whole record to the final member, which must be a record
    /// member.
    pub fn set_record(&self, obj: &mut dyn Record, record: Box<dyn Record>) -> Result<(), MemberError> {
        let (last, intermediate) = self.split_steps();
        let container = self.materialize(obj, intermediate)?;
        let owner = self.owner_mut(container, last)?;
        last.member
            .attach(owner, record)
            .map_err(|error| self.access_error(last, error))
    }

    fn materialize<'a>(&self, obj: &'a mut dyn Record, steps: &[Step]) -> Result<&'a mut dyn Record, MemberError> {
        let mut current = self.enter_mut(obj)?;

        for step in steps {
            let owner = self.owner_mut(current, step)?;
            if step.member.nested(owner).is_none() {
                let record = self.instantiate(step)?;
                tracing::debug!(
                    path = %self.path,
                    member = step.member.name(),
                    record_type = record.record_type().name(),
                    "instantiated null intermediate record"
                );
                step.member
                    .attach(owner, record)
                    .map_err(|error| self.access_error(step, error))?;
            }
            current = step
                .member
                .nested_mut(owner)
                .ok_or_else(|| MemberError::NotARecord {
                    type_name: step.owner.name(),
                    member: step.member.name(),
                })?;
        }

        Ok(current)
    }

    fn instantiate(&self, step: &Step) -> Result<Box<dyn Record>, MemberError> {
        let ty = step
            .member
            .value_type()
            .record_key()
            .and_then(|key| key.record_type())
            .ok_or(MemberError::NotARecord {
                type_name: step.owner.name(),
                member: step.member.name(),
            })?;

        ty.construct().ok_or_else(|| MemberError::NotConstructible {
            type_name: ty.name(),
            path: self.path.clone(),
        })
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn split_steps(&self) -> (&Step, &[Step]) {
        let last = self.steps.len() - 1;
        (&self.steps[last], &self.steps[..last])
    }

    fn enter<'a>(&self, obj: &'a dyn Record) -> Result<&'a dyn Record, MemberError> {
        let actual = obj.record_type().name();
        upcast(obj, self.root.key()).ok_or(MemberError::RootMismatch {
            expected: self.root.name(),
            actual,
        })
    }

    fn enter_mut<'a>(&self, obj: &'a mut dyn Record) -> Result<&'a mut dyn Record, MemberError> {
        let actual = obj.record_type().name();
        upcast_mut(obj, self.root.key()).ok_or(MemberError::RootMismatch {
            expected: self.root.name(),
            actual,
        })
    }

    fn owner<'a>(&self, container: &'a dyn Record, step: &Step) -> Result<&'a dyn Record, MemberError> {
        let actual = container.record_type().name();
        upcast(container, step.owner.key()).ok_or(MemberError::RootMismatch {
            expected: step.owner.name(),
            actual,
        })
    }

    fn owner_mut<'a>(&self, container: &'a mut dyn Record, step: &Step) -> Result<&'a mut dyn Record, MemberError> {
        let actual = container.record_type().name();
        upcast_mut(container, step.owner.key()).ok_or(MemberError::RootMismatch {
            expected: step.owner.name(),
            actual,
        })
    }

    fn root_mismatch(&self, owner: &dyn Record) -> MemberError {
        MemberError::RootMismatch {
            expected: self.root.name(),
            actual: owner.record_type().name(),
        }
    }

    fn access_error(&self, step: &Step, error: AccessError) -> MemberError {
        match error {
            AccessError::WrongOwner => MemberError::RootMismatch {
                expected: step.owner.name(),
                actual: self.root.name(),
            },
            AccessError::ReadOnly => MemberError::ReadOnly {
                type_name: step.owner.name(),
                member: step.member.name(),
            },
            AccessError::NotARecord => MemberError::NotARecord {
                type_name: step.owner.name(),
                member: step.member.name(),
            },
            AccessError::RecordMismatch { actual } => MemberError::RecordMismatch {
                actual,
                path: self.path.clone(),
            },
            AccessError::Conversion(source) => MemberError::Conversion {
                path: self.path.clone(),
                source,
            },
        }
    }
}

impl PartialEq for MemberExpression {
    fn eq(&self, other: &Self) -> bool {
        self.root.key() == other.root.key() && self.path == other.path
    }
}

impl Eq for MemberExpression {}

impl fmt::Display for MemberExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl fmt::Debug for MemberExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberExpression")
            .field("root", &self.root.name())
            .field("path", &self.path)
            .field("return_type", &self.return_type())
            .finish()
    }
}
