//! `Value::Set` (spec §3: "key→optional-value ordered mapping sorted by
//! the cross-type comparator; keys unique"), grounded on the teacher's
//! `values/core_values/map.rs` key/value pair storage, generalized to
//! keep insertion order by comparator rank instead of hash order.

use std::fmt;

use crate::values::comparator;
use crate::values::value_container::ValueContainer;

#[derive(Debug, Clone, Default)]
pub struct SetValue {
    entries: Vec<(ValueContainer, Option<ValueContainer>)>,
}

impl SetValue {
    pub fn new() -> Self {
        SetValue { entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ValueContainer, Option<ValueContainer>)> {
        self.entries.iter()
    }

    fn position(&self, key: &ValueContainer) -> Result<usize, usize> {
        self.entries.binary_search_by(|(existing, _)| comparator::compare(existing, key))
    }

    pub fn contains(&self, key: &ValueContainer) -> bool {
        self.position(key).is_ok()
    }

    pub fn get(&self, key: &ValueContainer) -> Option<&Option<ValueContainer>> {
        self.position(key).ok().map(|i| &self.entries[i].1)
    }

    /// Inserts or overwrites `key`, keeping entries sorted by the
    /// cross-type comparator (spec §4.2). Returns the previous value bound
    /// to `key`, if any.
    pub fn insert(&mut self, key: ValueContainer, value: Option<ValueContainer>) -> Option<Option<ValueContainer>> {
        match self.position(&key) {
            Ok(i) => {
                let previous = std::mem::replace(&mut self.entries[i].1, value);
                Some(previous)
            }
            Err(i) => {
                self.entries.insert(i, (key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &ValueContainer) -> Option<Option<ValueContainer>> {
        self.position(key).ok().map(|i| self.entries.remove(i).1)
    }

    /// Set union: every key of `self` and `other`, keys from `other`
    /// overwriting on collision (spec §8: `{1,2,3} + {3,4}` = `{1,2,3,4}`).
    pub fn union(&self, other: &SetValue) -> SetValue {
        let mut result = self.clone();
        for (key, value) in other.entries.iter() {
            result.insert(key.clone(), value.clone());
        }
        result
    }

    pub fn intersection(&self, other: &SetValue) -> SetValue {
        let mut result = SetValue::new();
        for (key, value) in self.entries.iter() {
            if other.contains(key) {
                result.insert(key.clone(), value.clone());
            }
        }
        result
    }

    pub fn deep_copy(&self) -> SetValue {
        let entries = self
            .entries
            .iter()
            .map(|(k, v)| (k.deep_copy(), v.as_ref().map(|v| v.deep_copy())))
            .collect();
        SetValue { entries }
    }

    pub fn difference(&self, other: &SetValue) -> SetValue {
        let mut result = SetValue::new();
        for (key, value) in self.entries.iter() {
            if !other.contains(key) {
                result.insert(key.clone(), value.clone());
            }
        }
        result
    }
}

impl PartialEq for SetValue {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|((k1, v1), (k2, v2))| comparator::compare(k1, k2) == std::cmp::Ordering::Equal && v1 == v2)
    }
}

impl fmt::Display for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            match value {
                Some(value) => write!(f, "{key}:{value}")?,
                None => write!(f, "{key}")?,
            }
        }
        write!(f, "}}")
    }
}

impl FromIterator<ValueContainer> for SetValue {
    fn from_iter<I: IntoIterator<Item = ValueContainer>>(iter: I) -> Self {
        let mut set = SetValue::new();
        for key in iter {
            set.insert(key, None);
        }
        set
    }
}
