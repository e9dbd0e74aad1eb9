//! The capability boundary between the core runtime and its host,
//! grounded on the teacher's `runtime/global_context.rs::GlobalContext`
//! (which bundles `CryptoTrait`/`TimeTrait` the same way): a small set of
//! traits injected into the evaluator rather than reached for as process
//! globals, so sub-evaluators and tests can swap in fakes.
//!
//! `Internals` stands in for spec §1's "hundreds of math/string/collection
//! builtins" standard library, which is deliberately out of scope for this
//! crate — the core only needs to know how to *call into* it.

use std::sync::Arc;

use crate::error::{CantusError, EvaluatorError};
use crate::values::value_container::ValueContainer;

/// External collaborator invoked by name for builtin functions the core
/// itself does not implement (string/math/collection standard library).
pub trait Internals: Send + Sync {
    /// Calls a named internal function with already-evaluated arguments.
    /// Returns `Err(EvaluatorError::UndefinedIdentifier)` if no such
    /// internal function is registered.
    fn call(
        &self,
        name: &str,
        args: &[ValueContainer],
    ) -> Result<ValueContainer, CantusError>;

    /// Returns true if a function with the given name is a registered
    /// internal (used by the expression evaluator to disambiguate implicit
    /// multiplication, spec §4.4 step 2).
    fn has_function(&self, name: &str) -> bool;
}

/// No-op `Internals` used by unit tests that never call into the builtin
/// library.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullInternals;

impl Internals for NullInternals {
    fn call(
        &self,
        name: &str,
        _args: &[ValueContainer],
    ) -> Result<ValueContainer, CantusError> {
        Err(EvaluatorError::UndefinedIdentifier(name.to_string()).into())
    }

    fn has_function(&self, _name: &str) -> bool {
        false
    }
}

/// Host-provided capabilities shared by an evaluator and every sub-evaluator
/// spawned from it.
#[derive(Clone)]
pub struct Context {
    pub internals: Arc<dyn Internals>,
}

impl Context {
    pub fn new(internals: Arc<dyn Internals>) -> Self {
        Context { internals }
    }

    /// A context with no builtin standard library attached; useful for
    /// tests exercising only the core arithmetic/control-flow machinery.
    pub fn native() -> Self {
        Context::new(Arc::new(NullInternals))
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::native()
    }
}
