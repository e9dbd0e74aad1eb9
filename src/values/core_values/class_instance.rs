//! `Value::ClassInstance` (spec §3: "a strong reference to its UserClass,
//! a per-instance inner scope name, a field map name→Reference"),
//! grounded on the teacher's pointer-registration pattern in
//! `runtime/memory.rs::Memory::register_reference` for the live-instance
//! bookkeeping, generalized from a flat pointer table to a per-class
//! `Vec<Weak<..>>` registry (spec §5: "append-only during construction,
//! delete-on-dispose").

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{CantusError, EvaluatorError};
use crate::references::reference::Reference;
use crate::runtime::definitions::user_class::UserClass;
use crate::values::core_values::lambda::Lambda;
use crate::values::value::Value;

/// Reserved field name the auto-generated `instanceid` method is installed
/// under (spec §4.6); a zero-arg `Lambda::Flat` whose body is the numeric
/// id literal, so it calls the same way any other zero-arg method would.
const INSTANCE_ID_FIELD: &str = "instanceid";

#[derive(Clone)]
pub struct ClassInstance {
    pub class: Rc<UserClass>,
    pub inner_scope: String,
    pub fields: HashMap<String, Reference>,
    /// Shared with the entry this instance registered into
    /// `UserClass::live_instances` at construction time; `dispose` flips it
    /// and every further operation checks it first.
    disposed: Rc<RefCell<bool>>,
}

impl ClassInstance {
    /// Constructs a live instance and installs its auto-generated
    /// `instanceid` method (spec §4.6: "each instance ... installs an
    /// auto-generated `instanceid` method"). The id comes from the owning
    /// class's own counter, so it is unique per instance of that class
    /// even across dispose/reconstruct cycles.
    pub fn new(class: Rc<UserClass>, inner_scope: String, mut fields: HashMap<String, Reference>) -> Self {
        let disposed = Rc::new(RefCell::new(false));
        class.register_instance(Rc::downgrade(&disposed));
        let id = class.next_instance_id();
        let instanceid = Lambda::Flat { args: Vec::new(), body: id.to_string() };
        fields.insert(INSTANCE_ID_FIELD.to_string(), Reference::new(Value::Lambda(instanceid)));
        ClassInstance { class, inner_scope, fields, disposed }
    }

    pub fn is_disposed(&self) -> bool {
        *self.disposed.borrow()
    }

    pub fn field(&self, name: &str) -> Result<&Reference, CantusError> {
        self.ensure_alive()?;
        self.fields
            .get(name)
            .ok_or_else(|| EvaluatorError::UndefinedIdentifier(name.to_string()).into())
    }

    pub fn ensure_alive(&self) -> Result<(), CantusError> {
        if self.is_disposed() {
            return Err(EvaluatorError::DisposedClassInstance(self.class.name.clone()).into());
        }
        Ok(())
    }

    /// Clears every field binding and marks the instance disposed (spec §3
    /// lifecycle: "disposal clears all field bindings ... further
    /// operations on a disposed instance fail").
    pub fn dispose(&mut self) {
        self.fields.clear();
        *self.disposed.borrow_mut() = true;
    }

    /// Deep copy per spec §3 invariant: `static` fields keep sharing their
    /// `Reference` (the class-level cell), every other field gets an
    /// independent `Reference` over a deep-copied value. The copy is a
    /// fresh instance registered with the same `UserClass`.
    pub fn deep_copy(&self) -> ClassInstance {
        let fields = self
            .fields
            .iter()
            .map(|(name, reference)| {
                let copied = if self.class.is_static_field(name) {
                    reference.clone()
                } else {
                    Reference::new(reference.resolve().map(|v| v.deep_copy()).unwrap_or(
                        crate::values::value::Value::SystemMessage(
                            crate::values::core_values::SystemMessage::defer(""),
                        ),
                    ))
                };
                (name.clone(), copied)
            })
            .collect();
        ClassInstance::new(Rc::clone(&self.class), self.inner_scope.clone(), fields)
    }
}

impl fmt::Debug for ClassInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInstance")
            .field("class", &self.class.name)
            .field("inner_scope", &self.inner_scope)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

impl PartialEq for ClassInstance {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.disposed, &other.disposed)
    }
}

impl fmt::Display for ClassInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} instance @ {}>", self.class.name, self.inner_scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::definitions::user_class::UserClass;
    use crate::scope::scope_name::ScopeName;
    use std::collections::HashMap;

    fn empty_class(name: &str) -> Rc<UserClass> {
        Rc::new(UserClass::new(name.to_string(), Vec::new(), HashMap::new(), Vec::new(), None, ScopeName::root("cantus")))
    }

    #[test]
    fn construction_installs_an_instanceid_method() {
        let class = empty_class("Widget");
        let instance = ClassInstance::new(Rc::clone(&class), "cantus.Widget#1".to_string(), HashMap::new());
        let reference = instance.field(INSTANCE_ID_FIELD).expect("instanceid should be installed");
        assert!(matches!(reference.resolve().unwrap(), Value::Lambda(Lambda::Flat { ref args, .. }) if args.is_empty()));
    }

    #[test]
    fn each_instance_gets_a_distinct_instanceid() {
        let class = empty_class("Widget");
        let a = ClassInstance::new(Rc::clone(&class), "cantus.Widget#1".to_string(), HashMap::new());
        let b = ClassInstance::new(Rc::clone(&class), "cantus.Widget#2".to_string(), HashMap::new());
        let id_of = |instance: &ClassInstance| match instance.field(INSTANCE_ID_FIELD).unwrap().resolve().unwrap() {
            Value::Lambda(Lambda::Flat { body, .. }) => body,
            other => panic!("expected a flat lambda, got {other:?}"),
        };
        assert_ne!(id_of(&a), id_of(&b));
    }

    #[test]
    fn deep_copy_gets_its_own_instanceid_rather_than_inheriting_the_original() {
        let class = empty_class("Widget");
        let original = ClassInstance::new(Rc::clone(&class), "cantus.Widget#1".to_string(), HashMap::new());
        let copy = original.deep_copy();
        let id_of = |instance: &ClassInstance| match instance.field(INSTANCE_ID_FIELD).unwrap().resolve().unwrap() {
            Value::Lambda(Lambda::Flat { body, .. }) => body,
            other => panic!("expected a flat lambda, got {other:?}"),
        };
        assert_ne!(id_of(&original), id_of(&copy));
    }
}
