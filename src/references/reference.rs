//! `Reference` (spec §3): indirection to a `Value` supporting multi-level
//! dereferencing and an optional linked-list node pointer, grounded on the
//! teacher's `Rc<RefCell<..>>`-backed `Reference::ValueReference` node.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{CantusError, EvaluatorError};
use crate::values::value::Value;
use crate::values::value_container::ValueContainer;

/// Bound on reference-chain length before `resolve` gives up, defending
/// against cycles that legal operations should never produce (spec §9).
const MAX_RESOLUTION_DEPTH: usize = 1000;

/// Marks a reference as having been produced by traversing a `LinkedList`,
/// so diagnostics and `LinkedList`-aware operators can recover which list
/// and position it came from (spec §3: "optional linked-list node
/// pointer").
#[derive(Debug, Clone, PartialEq)]
pub struct ListNodeHandle {
    pub list_name: Option<String>,
    pub index: usize,
}

#[derive(Clone)]
pub struct Reference {
    cell: Rc<RefCell<ValueContainer>>,
    list_node: Option<ListNodeHandle>,
}

impl Reference {
    pub fn new(value: Value) -> Self {
        Reference { cell: Rc::new(RefCell::new(ValueContainer::Value(value))), list_node: None }
    }

    pub fn from_container(container: ValueContainer) -> Self {
        Reference { cell: Rc::new(RefCell::new(container)), list_node: None }
    }

    pub fn with_list_node(mut self, handle: ListNodeHandle) -> Self {
        self.list_node = Some(handle);
        self
    }

    pub fn list_node(&self) -> Option<&ListNodeHandle> {
        self.list_node.as_ref()
    }

    /// Replaces the target in place, so every `Reference` clone pointing at
    /// this cell observes the update (assignment semantics, spec §4.3.1).
    pub fn set(&self, container: ValueContainer) {
        *self.cell.borrow_mut() = container;
    }

    pub fn get(&self) -> ValueContainer {
        self.cell.borrow().clone()
    }

    /// Follows the chain until a non-`Reference` target and returns the
    /// underlying primitive (spec §3, spec §8 property 2).
    pub fn resolve(&self) -> Result<Value, CantusError> {
        let mut current = self.get();
        for _ in 0..MAX_RESOLUTION_DEPTH {
            match current {
                ValueContainer::Value(value) => return Ok(value),
                ValueContainer::Reference(next) => current = next.get(),
            }
        }
        Err(EvaluatorError::ReferenceCycle.into())
    }

    /// Returns the non-`Reference` `Value` node wrapped back into a
    /// `ValueContainer` (spec §3: "`resolve_obj()` returns the non-Reference
    /// Value node").
    pub fn resolve_obj(&self) -> Result<ValueContainer, CantusError> {
        self.resolve().map(ValueContainer::Value)
    }

    /// Returns the deepest `Reference` that directly owns a non-`Reference`
    /// target (spec §3).
    pub fn resolve_ref(&self) -> Result<Reference, CantusError> {
        let mut current = self.clone();
        for _ in 0..MAX_RESOLUTION_DEPTH {
            match current.get() {
                ValueContainer::Value(_) => return Ok(current),
                ValueContainer::Reference(next) => current = next,
            }
        }
        Err(EvaluatorError::ReferenceCycle.into())
    }

    pub fn identical(&self, other: &Reference) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reference").field("target", &self.cell.borrow()).finish()
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cell.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigdecimal::BigDecimal;

    #[test]
    fn resolves_multi_level_chain() {
        let leaf = Reference::new(Value::Number(BigDecimal::from(5)));
        let middle = Reference::from_container(ValueContainer::Reference(leaf.clone()));
        let top = Reference::from_container(ValueContainer::Reference(middle));
        assert_eq!(top.resolve().unwrap(), Value::Number(BigDecimal::from(5)));
    }

    #[test]
    fn assignment_through_one_clone_is_visible_through_another() {
        let r1 = Reference::new(Value::Number(BigDecimal::from(1)));
        let r2 = r1.clone();
        r1.set(ValueContainer::Value(Value::Number(BigDecimal::from(2))));
        assert_eq!(r2.resolve().unwrap(), Value::Number(BigDecimal::from(2)));
    }

    #[test]
    fn detects_self_referential_cycle() {
        let r = Reference::new(Value::Number(BigDecimal::zero()));
        r.set(ValueContainer::Reference(r.clone()));
        assert!(r.resolve().is_err());
    }
}
