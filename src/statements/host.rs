//! The capability surface statement handlers need from the evaluator
//! that owns them (spec §4.6), kept as a trait so `statements::` stays
//! decoupled from `runtime::evaluator::Evaluator`'s concrete fields —
//! the same seam `context.rs`'s `Internals` trait draws between the core
//! and its host.

use std::rc::Rc;

use crate::error::CantusError;
use crate::references::reference::Reference;
use crate::runtime::definitions::user_class::UserClass;
use crate::runtime::definitions::user_function::UserFunction;
use crate::scope::scope_name::ScopeName;
use crate::scope::var_store::Modifiers;
use crate::values::value_container::ValueContainer;

pub trait StatementHost {
    /// Evaluates a single expression string in the current scope (spec
    /// §4.4). `condition_mode` disables `=`'s assignment defer so `if
    /// x = 5:` compares rather than assigns.
    fn eval_expr(&mut self, text: &str, condition_mode: bool) -> Result<ValueContainer, CantusError>;

    fn current_scope(&self) -> ScopeName;

    /// The outermost scope every other scope descends from (spec §3's
    /// "global (root scope)" variable lifetime binds here, not against
    /// whatever scope happens to be current).
    fn root_scope(&self) -> ScopeName;

    /// Enters a fresh child scope of the current one, returning its name
    /// (spec §4.6); body statements execute against it until
    /// `pop_scope` restores the parent.
    fn push_scope(&mut self, name: Option<&str>) -> ScopeName;

    fn pop_scope(&mut self);

    fn declare_variable(&mut self, name: &str, value: ValueContainer, modifiers: Modifiers) -> Reference;

    /// Like `declare_variable`, but binds against an explicit scope
    /// rather than the current one (used by `global` to bind at
    /// `root_scope()`).
    fn declare_variable_in(&mut self, scope: &ScopeName, name: &str, value: ValueContainer, modifiers: Modifiers) -> Reference;

    fn has_variable(&self, name: &str) -> bool;

    fn get_variable(&self, name: &str) -> Result<Reference, CantusError>;

    fn unset_variable(&mut self, name: &str);

    fn define_user_function(&mut self, function: UserFunction);

    fn define_user_class(&mut self, class: Rc<UserClass>);

    fn lookup_user_class(&self, name: &str) -> Option<Rc<UserClass>>;

    /// Checked once per loop iteration (spec §4.5 "Loop limit"); errors
    /// with `EvaluatorError::LoopLimitExceeded` once the configured cap is
    /// exceeded.
    fn tick_loop_iteration(&mut self) -> Result<(), CantusError>;

    fn import(&mut self, scope_name: &str) -> Result<(), CantusError>;

    fn unimport(&mut self, scope_name: &str);

    fn load(&mut self, path: &str, auto_import: bool) -> Result<(), CantusError>;

    /// True once `stop_all` has been requested (spec §5 cancellation);
    /// checked at statement entry and loop iterations.
    fn is_cancelled(&self) -> bool;
}
