//! Dotted scope names (spec §4.6: "A scope is a dotted name. The root
//! scope is a fixed identifier"), grounded on the teacher's
//! `precompiler/scope.rs::PrecompilerScope`, generalized from a realm
//! index to an owned dotted path.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeName(String);

impl ScopeName {
    pub fn root(name: &str) -> Self {
        ScopeName(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn child(&self, segment: &str) -> Self {
        ScopeName(format!("{}.{}", self.0, segment))
    }

    pub fn parent(&self) -> Option<Self> {
        self.0.rsplit_once('.').map(|(prefix, _)| ScopeName(prefix.to_string()))
    }

    /// This scope, then each ancestor up to (and including) the root,
    /// matching spec §4.6's "walks the current scope upward until root".
    pub fn ancestors_inclusive(&self) -> impl Iterator<Item = ScopeName> + '_ {
        std::iter::successors(Some(self.clone()), |s| s.parent())
    }

    pub fn is_root(&self) -> bool {
        !self.0.contains('.')
    }

    /// True if `self` is `ancestor` or nested under it — the visibility
    /// test for `private` variables (spec §4.6).
    pub fn is_descendant_of_or_eq(&self, ancestor: &ScopeName) -> bool {
        self.0 == ancestor.0 || self.0.starts_with(&format!("{}.", ancestor.0))
    }

    /// Fully-qualified variable store key for a name declared in this
    /// scope.
    pub fn qualify(&self, name: &str) -> String {
        format!("{}::{name}", self.0)
    }
}

impl fmt::Display for ScopeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_and_parent_round_trip() {
        let root = ScopeName::root("cantus");
        let child = root.child("foo").child("bar");
        assert_eq!(child.as_str(), "cantus.foo.bar");
        assert_eq!(child.parent().unwrap().as_str(), "cantus.foo");
    }

    #[test]
    fn descendant_check() {
        let root = ScopeName::root("cantus");
        let child = root.child("foo");
        assert!(child.is_descendant_of_or_eq(&root));
        assert!(!root.is_descendant_of_or_eq(&child));
    }
}
