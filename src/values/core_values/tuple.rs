//! `Value::Tuple` (spec §3: "ordered, fixed-length sequence of
//! references"), grounded on the teacher's array-of-`ValueContainer`
//! storage in `values/core_values/array.rs`.

use std::fmt;

use crate::error::{CantusError, EvaluatorError};
use crate::values::value_container::ValueContainer;

#[derive(Debug, Clone, PartialEq)]
pub struct Tuple(pub Vec<ValueContainer>);

impl Tuple {
    pub fn new(elements: Vec<ValueContainer>) -> Self {
        Tuple(elements)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: i64) -> Result<&ValueContainer, CantusError> {
        let resolved = resolve_index(index, self.0.len());
        self.0.get(resolved).ok_or_else(|| {
            EvaluatorError::IndexOutOfRange { index, len: self.0.len() }.into()
        })
    }
}

/// Negative indices count from the end, matching the indexing convention
/// brackets use elsewhere in the value system (`Matrix`, `LinkedList`).
fn resolve_index(index: i64, len: usize) -> usize {
    if index < 0 {
        (len as i64 + index).max(-1) as usize
    } else {
        index as usize
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, element) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, ")")
    }
}
