//! `ValueContainer`: owned value vs. reference indirection (spec §3),
//! grounded on the teacher's `values/value_container.rs` enum of the same
//! shape and the same `Value`/`Reference` 2x2 dispatch for equality and
//! `Display`.

use std::cmp::Ordering;
use std::fmt;

use crate::error::CantusError;
use crate::references::reference::Reference;
use crate::traits::{Identity, StructuralEq, ValueEq};
use crate::values::comparator;
use crate::values::value::Value;

#[derive(Debug, Clone)]
pub enum ValueContainer {
    Value(Value),
    Reference(Reference),
}

impl ValueContainer {
    pub fn new_value(value: Value) -> Self {
        ValueContainer::Value(value)
    }

    pub fn new_reference(reference: Reference) -> Self {
        ValueContainer::Reference(reference)
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, ValueContainer::Reference(_))
    }

    /// Resolves to an owned `Value`, following any `Reference` chain.
    /// Returns `None` only if resolution hits the cycle guard.
    pub fn to_value(&self) -> Option<Value> {
        match self {
            ValueContainer::Value(v) => Some(v.clone()),
            ValueContainer::Reference(r) => r.resolve().ok(),
        }
    }

    pub fn try_to_value(&self) -> Result<Value, CantusError> {
        match self {
            ValueContainer::Value(v) => Ok(v.clone()),
            ValueContainer::Reference(r) => r.resolve(),
        }
    }

    /// Returns the underlying `Reference` if this container already holds
    /// one, without materializing a new one for an owned `Value`.
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            ValueContainer::Reference(r) => Some(r),
            ValueContainer::Value(_) => None,
        }
    }

    /// Coerces this container into a `Reference`, wrapping an owned value
    /// in a fresh one-off cell if necessary (spec §4.3: by-reference
    /// operator arguments).
    pub fn into_reference(self) -> Reference {
        match self {
            ValueContainer::Reference(r) => r,
            ValueContainer::Value(v) => Reference::new(v),
        }
    }

    pub fn deep_copy(&self) -> ValueContainer {
        match self {
            ValueContainer::Value(v) => ValueContainer::Value(v.deep_copy()),
            ValueContainer::Reference(r) => {
                let copied = r.resolve().unwrap_or_else(|_| Value::SystemMessage(
                    crate::values::core_values::SystemMessage::defer(""),
                ));
                ValueContainer::Reference(Reference::new(copied.deep_copy()))
            }
        }
    }
}

impl PartialEq for ValueContainer {
    fn eq(&self, other: &Self) -> bool {
        comparator::compare(self, other) == Ordering::Equal
    }
}

impl StructuralEq for ValueContainer {
    fn structural_eq(&self, other: &Self) -> bool {
        match (self.to_value(), other.to_value()) {
            (Some(a), Some(b)) => a.structural_eq(&b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl ValueEq for ValueContainer {
    fn value_eq(&self, other: &Self) -> bool {
        comparator::compare(self, other) == Ordering::Equal
    }
}

impl Identity for ValueContainer {
    fn identical(&self, other: &Self) -> bool {
        match (self, other) {
            (ValueContainer::Reference(a), ValueContainer::Reference(b)) => a.identical(b),
            (ValueContainer::Value(a), ValueContainer::Value(b)) => a.structural_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for ValueContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueContainer::Value(v) => write!(f, "{v}"),
            ValueContainer::Reference(r) => write!(f, "{r}"),
        }
    }
}

impl From<Value> for ValueContainer {
    fn from(value: Value) -> Self {
        ValueContainer::Value(value)
    }
}

impl From<Reference> for ValueContainer {
    fn from(reference: Reference) -> Self {
        ValueContainer::Reference(reference)
    }
}
