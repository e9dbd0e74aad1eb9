//! `Value::HashSet` (spec §3: "same mapping semantics as `Set` but
//! unordered, hash-based"), grounded on the teacher's `HashMap`-backed
//! collections. Keys are bucketed by their canonical `Display` text
//! rather than a structural `Hash` impl spanning every `Value` variant —
//! recorded as an engineering simplification in DESIGN.md, since the
//! comparator (spec §4.2) is the authority for *ordering*, not hashing.

use std::collections::HashMap;
use std::fmt;

use crate::values::value_container::ValueContainer;

#[derive(Debug, Clone, Default)]
pub struct HashSetValue {
    entries: HashMap<String, (ValueContainer, Option<ValueContainer>)>,
}

impl HashSetValue {
    pub fn new() -> Self {
        HashSetValue { entries: HashMap::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &ValueContainer) -> bool {
        self.entries.contains_key(&key.to_string())
    }

    pub fn get(&self, key: &ValueContainer) -> Option<&Option<ValueContainer>> {
        self.entries.get(&key.to_string()).map(|(_, v)| v)
    }

    pub fn insert(&mut self, key: ValueContainer, value: Option<ValueContainer>) -> Option<Option<ValueContainer>> {
        self.entries.insert(key.to_string(), (key, value)).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &ValueContainer) -> Option<Option<ValueContainer>> {
        self.entries.remove(&key.to_string()).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ValueContainer, Option<ValueContainer>)> {
        self.entries.values()
    }

    pub fn deep_copy(&self) -> HashSetValue {
        let entries = self
            .entries
            .iter()
            .map(|(text, (k, v))| (text.clone(), (k.deep_copy(), v.as_ref().map(|v| v.deep_copy()))))
            .collect();
        HashSetValue { entries }
    }

    pub fn union(&self, other: &HashSetValue) -> HashSetValue {
        let mut result = self.clone();
        for (key, value) in other.entries.values() {
            result.insert(key.clone(), value.clone());
        }
        result
    }
}

impl PartialEq for HashSetValue {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.keys().all(|k| other.entries.contains_key(k))
    }
}

impl fmt::Display for HashSetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.entries.values().enumerate() {
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
