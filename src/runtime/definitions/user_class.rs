//! User-defined classes (spec §4.6: "`(name, declared fields with
//! defaults, declared methods, parent classes, constructor lambda)`.
//! Multiple inheritance is allowed; field and method resolution is
//! left-to-right, depth-first, first-seen-wins"), grounded on the
//! teacher's pointer-registration pattern in `runtime/memory.rs`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::runtime::definitions::user_function::UserFunction;
use crate::scope::scope_name::ScopeName;
use crate::scope::var_store::Modifiers;
use crate::values::core_values::lambda::Lambda;

#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: String,
    /// Unevaluated default-value expression text.
    pub default: Option<String>,
    pub modifiers: Modifiers,
}

pub struct UserClass {
    pub name: String,
    pub fields: Vec<FieldDecl>,
    pub methods: HashMap<String, Rc<UserFunction>>,
    pub parents: Vec<Rc<UserClass>>,
    pub constructor: Option<Lambda>,
    pub declaring_scope: ScopeName,
    /// Disposed-flags of every instance ever constructed (spec §5:
    /// "append-only during instance construction, delete-on-dispose" — a
    /// dropped/disposed instance simply fails to upgrade or reads `true`).
    live_instances: RefCell<Vec<Weak<RefCell<bool>>>>,
    /// Backs the auto-generated `instanceid` method (spec §4.6): bumped
    /// once per constructed instance, never reused even after dispose.
    next_instance_id: RefCell<u64>,
}

impl UserClass {
    pub fn new(
        name: String,
        fields: Vec<FieldDecl>,
        methods: HashMap<String, Rc<UserFunction>>,
        parents: Vec<Rc<UserClass>>,
        constructor: Option<Lambda>,
        declaring_scope: ScopeName,
    ) -> Self {
        UserClass {
            name,
            fields,
            methods,
            parents,
            constructor,
            declaring_scope,
            live_instances: RefCell::new(Vec::new()),
            next_instance_id: RefCell::new(0),
        }
    }

    pub fn register_instance(&self, handle: Weak<RefCell<bool>>) {
        self.live_instances.borrow_mut().push(handle);
    }

    /// Hands out the next `instanceid` value for a newly constructed
    /// instance of this class. Monotonic per class, 1-based, never reused.
    pub fn next_instance_id(&self) -> u64 {
        let mut counter = self.next_instance_id.borrow_mut();
        *counter += 1;
        *counter
    }

    pub fn live_instance_count(&self) -> usize {
        self.live_instances.borrow().iter().filter(|w| w.upgrade().map(|d| !*d.borrow()).unwrap_or(false)).count()
    }

    /// Left-to-right, depth-first, first-seen-wins field resolution across
    /// `self` then `parents` (spec §4.6).
    pub fn resolve_field(&self, name: &str) -> Option<&FieldDecl> {
        if let Some(field) = self.fields.iter().find(|f| f.name == name) {
            return Some(field);
        }
        self.parents.iter().find_map(|parent| parent.resolve_field(name))
    }

    pub fn is_static_field(&self, name: &str) -> bool {
        self.resolve_field(name).map(|f| f.modifiers.static_).unwrap_or(false)
    }

    /// Same left-to-right, depth-first, first-seen-wins resolution for
    /// methods.
    pub fn resolve_method(&self, name: &str) -> Option<Rc<UserFunction>> {
        if let Some(method) = self.methods.get(name) {
            return Some(Rc::clone(method));
        }
        self.parents.iter().find_map(|parent| parent.resolve_method(name))
    }

    /// All field names reachable from this class, in resolution order,
    /// used to initialize a fresh instance's field map.
    pub fn all_field_names(&self) -> Vec<String> {
        let mut seen = Vec::new();
        self.collect_field_names(&mut seen);
        seen
    }

    fn collect_field_names(&self, seen: &mut Vec<String>) {
        for field in &self.fields {
            if !seen.contains(&field.name) {
                seen.push(field.name.clone());
            }
        }
        for parent in &self.parents {
            parent.collect_field_names(seen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple_inheritance_is_first_seen_wins() {
        let base_a = Rc::new(UserClass::new(
            "A".into(),
            vec![FieldDecl { name: "x".into(), default: Some("1".into()), modifiers: Modifiers::public() }],
            HashMap::new(),
            vec![],
            None,
            ScopeName::root("cantus"),
        ));
        let base_b = Rc::new(UserClass::new(
            "B".into(),
            vec![FieldDecl { name: "x".into(), default: Some("2".into()), modifiers: Modifiers::public() }],
            HashMap::new(),
            vec![],
            None,
            ScopeName::root("cantus"),
        ));
        let child = UserClass::new(
            "C".into(),
            vec![],
            HashMap::new(),
            vec![base_a, base_b],
            None,
            ScopeName::root("cantus"),
        );
        assert_eq!(child.resolve_field("x").unwrap().default.as_deref(), Some("1"));
    }
}
