//! The flat variable table keyed by fully-qualified name (spec §4.6),
//! grounded on the teacher's `precompiler/scope.rs::variable_ids_by_name`,
//! generalized from compile-time `usize` ids to runtime `Variable`
//! entries carrying modifiers.

use std::collections::HashMap;

use crate::error::{CantusError, EvaluatorError};
use crate::references::reference::Reference;
use crate::scope::scope_name::ScopeName;

/// Visibility/sharing tags a variable or function declaration carries
/// (spec §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modifiers {
    pub private: bool,
    pub static_: bool,
    pub internal: bool,
}

impl Default for Modifiers {
    fn default() -> Self {
        Modifiers { private: false, static_: false, internal: false }
    }
}

impl Modifiers {
    pub fn public() -> Self {
        Modifiers::default()
    }

    pub fn with_private(mut self) -> Self {
        self.private = true;
        self
    }

    pub fn with_static(mut self) -> Self {
        self.static_ = true;
        self
    }

    pub fn with_internal(mut self) -> Self {
        self.internal = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Variable {
    pub reference: Reference,
    pub modifiers: Modifiers,
    pub declaring_scope: ScopeName,
}

impl Variable {
    /// Visibility check for `private` (spec §4.6: "visible only from the
    /// defining scope or its descendants").
    fn is_visible_from(&self, observer: &ScopeName) -> bool {
        !self.modifiers.private || observer.is_descendant_of_or_eq(&self.declaring_scope)
    }
}

#[derive(Debug, Default)]
pub struct VarStore {
    vars: HashMap<String, Variable>,
}

impl VarStore {
    pub fn new() -> Self {
        VarStore::default()
    }

    pub fn define(&mut self, scope: &ScopeName, name: &str, reference: Reference, modifiers: Modifiers) {
        let key = scope.qualify(name);
        self.vars.insert(key, Variable { reference, modifiers, declaring_scope: scope.clone() });
    }

    /// Resolution per spec §4.6: walk `current` upward to root, then
    /// through `imported` scopes in insertion order.
    pub fn lookup(&self, current: &ScopeName, name: &str, imported: &[ScopeName]) -> Option<&Variable> {
        for ancestor in current.ancestors_inclusive() {
            if let Some(found) = self.lookup_in(&ancestor, name, current) {
                return Some(found);
            }
        }
        for scope in imported {
            if let Some(found) = self.lookup_in(scope, name, current) {
                return Some(found);
            }
        }
        None
    }

    fn lookup_in(&self, scope: &ScopeName, name: &str, observer: &ScopeName) -> Option<&Variable> {
        self.vars.get(&scope.qualify(name)).filter(|v| v.is_visible_from(observer))
    }

    pub fn has(&self, current: &ScopeName, name: &str, imported: &[ScopeName]) -> bool {
        self.lookup(current, name, imported).is_some()
    }

    pub fn get_reference(
        &self,
        current: &ScopeName,
        name: &str,
        imported: &[ScopeName],
    ) -> Result<Reference, CantusError> {
        self.lookup(current, name, imported)
            .map(|v| v.reference.clone())
            .ok_or_else(|| EvaluatorError::UndefinedIdentifier(name.to_string()).into())
    }

    pub fn unset(&mut self, scope: &ScopeName, name: &str) {
        self.vars.remove(&scope.qualify(name));
    }

    /// Names visible in `scope`, excluding `internal` declarations (spec
    /// §4.6: "internal (not surfaced to user listings)").
    pub fn list_visible(&self, scope: &ScopeName) -> Vec<&str> {
        let prefix = format!("{}::", scope.as_str());
        self.vars
            .iter()
            .filter(|(key, variable)| key.starts_with(&prefix) && !variable.modifiers.internal)
            .map(|(key, _)| &key[prefix.len()..])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigdecimal::BigDecimal;
    use crate::values::value::Value;

    #[test]
    fn private_variable_is_hidden_from_sibling_scope() {
        let mut store = VarStore::new();
        let root = ScopeName::root("cantus");
        let scope_a = root.child("a");
        let scope_b = root.child("b");
        store.define(
            &scope_a,
            "secret",
            Reference::new(Value::Number(BigDecimal::from(1))),
            Modifiers::default().with_private(),
        );
        assert!(store.lookup(&scope_a, "secret", &[]).is_some());
        assert!(store.lookup(&scope_b, "secret", &[]).is_none());
    }

    #[test]
    fn lookup_walks_up_to_root() {
        let mut store = VarStore::new();
        let root = ScopeName::root("cantus");
        let child = root.child("fn_call");
        store.define(&root, "pi", Reference::new(Value::Number(BigDecimal::from(3))), Modifiers::public());
        assert!(store.lookup(&child, "pi", &[]).is_some());
    }
}
