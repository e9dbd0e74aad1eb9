//! `Value::LinkedList` (spec §3: "doubly-linked sequence of references
//! with a movable cursor (index, current-node)"), grounded on the
//! teacher's array-backed collection style, using `VecDeque` for
//! O(1) push/pop at both ends in place of an explicit node graph — the
//! cursor is tracked as a plain index, since spec only requires the
//! *behavior* of a movable cursor, not an intrusive node pointer.

use std::collections::VecDeque;
use std::fmt;

use crate::error::{CantusError, EvaluatorError};
use crate::values::value_container::ValueContainer;

#[derive(Debug, Clone, Default)]
pub struct LinkedListValue {
    nodes: VecDeque<ValueContainer>,
    cursor: usize,
}

impl LinkedListValue {
    pub fn new() -> Self {
        LinkedListValue { nodes: VecDeque::new(), cursor: 0 }
    }

    pub fn from_vec(values: Vec<ValueContainer>) -> Self {
        LinkedListValue { nodes: values.into(), cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push_back(&mut self, value: ValueContainer) {
        self.nodes.push_back(value);
    }

    pub fn push_front(&mut self, value: ValueContainer) {
        self.nodes.push_front(value);
        self.cursor += 1;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn seek(&mut self, index: usize) -> Result<(), CantusError> {
        if index >= self.nodes.len() && !self.nodes.is_empty() {
            return Err(EvaluatorError::IndexOutOfRange { index: index as i64, len: self.nodes.len() }.into());
        }
        self.cursor = index;
        Ok(())
    }

    pub fn current(&self) -> Option<&ValueContainer> {
        self.nodes.get(self.cursor)
    }

    pub fn advance(&mut self) -> bool {
        if self.cursor + 1 < self.nodes.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn retreat(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    pub fn get(&self, index: i64) -> Result<&ValueContainer, CantusError> {
        let resolved = if index < 0 { self.nodes.len() as i64 + index } else { index };
        if resolved < 0 {
            return Err(EvaluatorError::IndexOutOfRange { index, len: self.nodes.len() }.into());
        }
        self.nodes.get(resolved as usize).ok_or_else(|| {
            EvaluatorError::IndexOutOfRange { index, len: self.nodes.len() }.into()
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValueContainer> {
        self.nodes.iter()
    }

    pub fn deep_copy(&self) -> LinkedListValue {
        LinkedListValue {
            nodes: self.nodes.iter().map(|v| v.deep_copy()).collect(),
            cursor: self.cursor,
        }
    }
}

impl PartialEq for LinkedListValue {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl fmt::Display for LinkedListValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, " <-> ")?;
            }
            write!(f, "{node}")?;
        }
        write!(f, ")")
    }
}
