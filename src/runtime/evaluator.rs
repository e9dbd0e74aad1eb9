//! `Evaluator` (spec §6): the public facade over expression evaluation,
//! statement execution, scoping, and user function/class definitions.
//! Grounded on the teacher's `runtime/execution_context.rs`
//! `ExecutionContext`, generalized from a bytecode VM's call-stack frame
//! to a scope-tree-walking interpreter that spawns a fresh `Evaluator` per
//! sub-evaluation instead of pushing VM frames.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

use log::{debug, trace};

use crate::bigdecimal::BigDecimal;
use crate::config::EvaluatorConfig;
use crate::context::Context;
use crate::error::{CantusError, EvaluatorError, LoadError};
use crate::operators::operator::{ExecContext, OperatorTable};
use crate::parser::expr_evaluator::{ExprEvaluator, IdentifierResolver};
use crate::references::reference::Reference;
use crate::runtime::definitions::user_class::UserClass;
use crate::runtime::definitions::user_function::UserFunction;
use crate::scope::scope_name::ScopeName;
use crate::scope::var_store::{Modifiers, VarStore};
use crate::statements::host::StatementHost;
use crate::statements::{self, exec_code::StatementResult};
use crate::values::value::Value;
use crate::values::value_container::ValueContainer;

/// Shared state every sub-evaluator of the same root evaluator points at
/// (spec §4.7: "the variable table is shared across sub-evaluators of the
/// same root").
struct Shared {
    vars: RefCell<VarStore>,
    functions: RefCell<HashMap<String, Rc<UserFunction>>>,
    classes: RefCell<HashMap<String, Rc<UserClass>>>,
    imported: RefCell<Vec<ScopeName>>,
    loop_iterations: Cell<u64>,
    anonymous_scopes: Cell<u64>,
    cancelled: Arc<AtomicBool>,
    table: OperatorTable,
    config: EvaluatorConfig,
    context: Context,
    async_tasks: crate::runtime::async_task::AsyncRegistry,
}

/// A single evaluation frame: its own current scope over shared state
/// (spec §6). Cloning an `Evaluator` produces a sibling frame pointed at
/// the same shared state but free to move its own `scope` independently,
/// which is how `sub_evaluator`/function calls work.
#[derive(Clone)]
pub struct Evaluator {
    shared: Rc<Shared>,
    scope: ScopeName,
}

impl Evaluator {
    pub fn new(config: EvaluatorConfig, context: Context) -> Self {
        let scope = ScopeName::root(&config.root_scope_name);
        let cancelled = Arc::new(AtomicBool::new(false));
        let shared = Shared {
            vars: RefCell::new(VarStore::new()),
            functions: RefCell::new(HashMap::new()),
            classes: RefCell::new(HashMap::new()),
            imported: RefCell::new(Vec::new()),
            loop_iterations: Cell::new(0),
            anonymous_scopes: Cell::new(0),
            cancelled,
            table: OperatorTable::standard(),
            config,
            context,
            async_tasks: crate::runtime::async_task::AsyncRegistry::new(),
        };
        Evaluator { shared: Rc::new(shared), scope }
    }

    pub fn parent_scope(&self) -> Option<ScopeName> {
        self.scope.parent()
    }

    /// A fresh evaluator sharing this one's vars/functions/classes/
    /// cancellation flag but scoped to a named child (spec §4.6: function
    /// and lambda execution "creates a sub-evaluator, sets the current
    /// scope to a fresh child of the declaring scope").
    pub fn sub_evaluator(&self, declaring_scope: &ScopeName) -> Evaluator {
        Evaluator { shared: Rc::clone(&self.shared), scope: declaring_scope.clone() }
    }

    pub fn sub_scope(&self, name: &str) -> ScopeName {
        self.scope.child(name)
    }

    fn exec_ctx(&self) -> ExecContext<'_> {
        ExecContext { config: &self.shared.config, condition_mode: false }
    }

    /// Runs a full script: statements, blocks, and control flow (spec §6
    /// `eval`).
    pub fn eval(&mut self, source: &str) -> Result<ValueContainer, CantusError> {
        trace!("eval in scope {}", self.scope);
        let result: StatementResult = statements::run_script(source, self)?;
        Ok(result.value)
    }

    /// Evaluates a single expression with no statement-level machinery
    /// (spec §6 `eval_expr_raw`).
    pub fn eval_expr_raw(&self, source: &str) -> Result<ValueContainer, CantusError> {
        let ctx = ExecContext { config: &self.shared.config, condition_mode: false };
        ExprEvaluator::new(&self.shared.table, ctx).eval(source, self)
    }

    /// Schedules `source` for async evaluation (spec §4.7 `$( … )` /
    /// `ExecuteAsync`), returning the task id immediately; panics if not
    /// called from within a running `tokio::task::LocalSet`.
    pub fn eval_async(&self, source: &str) -> crate::runtime::async_task::TaskId {
        let mut sub = self.clone();
        let source = source.to_string();
        self.shared.async_tasks.spawn(async move { sub.eval(&source) })
    }

    /// Polls a task scheduled by `eval_async`, returning `None` while it
    /// is still running.
    pub fn poll_async(&self, id: crate::runtime::async_task::TaskId) -> Option<Result<ValueContainer, CantusError>> {
        self.shared.async_tasks.poll_result(id)
    }

    pub fn set_variable(&mut self, name: &str, value: ValueContainer) -> Result<(), CantusError> {
        let imported = self.shared.imported.borrow();
        if let Some(variable) = self.shared.vars.borrow().lookup(&self.scope, name, &imported) {
            variable.reference.set(value);
            return Ok(());
        }
        drop(imported);
        self.declare_variable(name, value, Modifiers::public());
        Ok(())
    }

    pub fn get_variable_ref(&self, name: &str) -> Result<Reference, CantusError> {
        let imported = self.shared.imported.borrow();
        self.shared.vars.borrow().get_reference(&self.scope, name, &imported)
    }

    fn call_internal(&self, name: &str, args: &[ValueContainer]) -> Result<ValueContainer, CantusError> {
        self.shared.context.internals.call(name, args)
    }

    /// Calls a user-defined function: binds arguments in a fresh child
    /// scope of its declaring scope and runs its body (spec §4.6).
    pub fn call_user_function(&self, function: &UserFunction, positional: Vec<ValueContainer>, keyword: &HashMap<String, ValueContainer>) -> Result<ValueContainer, CantusError> {
        let mut callee = self.sub_evaluator(&function.declaring_scope);
        let call_scope = callee.sub_scope(&function.name);
        callee.scope = call_scope;
        let bound = function.bind_arguments(positional, keyword, |text| callee.eval_expr_raw(text))?;
        for (name, value) in bound {
            callee.declare_variable(&name, value, Modifiers::public());
        }
        debug!("calling user function '{}' in scope {}", function.name, callee.scope);
        let result = callee.eval(&function.body)?;
        Ok(result)
    }

    /// Calls a lambda (spec §4.7): `Bound` resolves to the named
    /// `UserFunction` and defers to `call_user_function`; `Flat` binds
    /// its argument names positionally in a fresh anonymous child scope
    /// and evaluates its body expression.
    ///
    /// `parser::expr_evaluator`'s call syntax and its `*`-applied-to-a-
    /// `Lambda` special case both route through `IdentifierResolver::call`
    /// and `call_lambda_value` below, which land here.
    pub fn call_lambda(&self, lambda: &crate::values::core_values::lambda::Lambda, positional: Vec<ValueContainer>) -> Result<ValueContainer, CantusError> {
        match lambda {
            crate::values::core_values::lambda::Lambda::Bound { name, .. } => {
                let function = self.shared.functions.borrow().get(name).cloned().ok_or_else(|| EvaluatorError::UndefinedIdentifier(name.clone()))?;
                self.call_user_function(&function, positional, &HashMap::new())
            }
            crate::values::core_values::lambda::Lambda::Flat { args, body } => {
                let mut callee = self.clone();
                let counter = self.shared.anonymous_scopes.get();
                self.shared.anonymous_scopes.set(counter + 1);
                callee.scope = self.scope.child(&format!("__lambda{counter}"));
                for (name, value) in args.iter().zip(positional) {
                    callee.declare_variable(name, value, Modifiers::public());
                }
                debug!("calling lambda in scope {}", callee.scope);
                callee.eval(body)
            }
        }
    }
}

impl StatementHost for Evaluator {
    fn eval_expr(&mut self, text: &str, condition_mode: bool) -> Result<ValueContainer, CantusError> {
        let ctx = ExecContext { config: &self.shared.config, condition_mode };
        ExprEvaluator::new(&self.shared.table, ctx).eval(text, self)
    }

    fn current_scope(&self) -> ScopeName {
        self.scope.clone()
    }

    fn root_scope(&self) -> ScopeName {
        ScopeName::root(&self.shared.config.root_scope_name)
    }

    fn push_scope(&mut self, name: Option<&str>) -> ScopeName {
        let next = match name {
            Some(name) => self.scope.child(name),
            None => {
                let counter = self.shared.anonymous_scopes.get();
                self.shared.anonymous_scopes.set(counter + 1);
                self.scope.child(&format!("__block{counter}"))
            }
        };
        self.scope = next.clone();
        next
    }

    fn pop_scope(&mut self) {
        if let Some(parent) = self.scope.parent() {
            self.scope = parent;
        }
    }

    fn declare_variable(&mut self, name: &str, value: ValueContainer, modifiers: Modifiers) -> Reference {
        let reference = value.into_reference();
        self.shared.vars.borrow_mut().define(&self.scope, name, reference.clone(), modifiers);
        reference
    }

    fn declare_variable_in(&mut self, scope: &ScopeName, name: &str, value: ValueContainer, modifiers: Modifiers) -> Reference {
        let reference = value.into_reference();
        self.shared.vars.borrow_mut().define(scope, name, reference.clone(), modifiers);
        reference
    }

    fn has_variable(&self, name: &str) -> bool {
        let imported = self.shared.imported.borrow();
        self.shared.vars.borrow().has(&self.scope, name, &imported)
    }

    fn get_variable(&self, name: &str) -> Result<Reference, CantusError> {
        self.get_variable_ref(name)
    }

    fn unset_variable(&mut self, name: &str) {
        self.shared.vars.borrow_mut().unset(&self.scope, name);
    }

    fn define_user_function(&mut self, function: UserFunction) {
        self.shared.functions.borrow_mut().insert(function.name.clone(), Rc::new(function));
    }

    fn define_user_class(&mut self, class: Rc<UserClass>) {
        self.shared.classes.borrow_mut().insert(class.name.clone(), class);
    }

    fn lookup_user_class(&self, name: &str) -> Option<Rc<UserClass>> {
        self.shared.classes.borrow().get(name).cloned()
    }

    fn tick_loop_iteration(&mut self) -> Result<(), CantusError> {
        if !self.shared.config.loop_limit_enabled {
            return Ok(());
        }
        let next = self.shared.loop_iterations.get() + 1;
        self.shared.loop_iterations.set(next);
        if next > self.shared.config.max_loop_iterations {
            return Err(EvaluatorError::LoopLimitExceeded(self.shared.config.max_loop_iterations).into());
        }
        Ok(())
    }

    fn import(&mut self, scope_name: &str) -> Result<(), CantusError> {
        self.shared.imported.borrow_mut().push(ScopeName::root(scope_name));
        Ok(())
    }

    fn unimport(&mut self, scope_name: &str) {
        self.shared.imported.borrow_mut().retain(|s| s.as_str() != scope_name);
    }

    /// Reads and evaluates `path` as a Cantus package (spec §6 `load`),
    /// optionally auto-importing its root scope afterward.
    fn load(&mut self, path: &str, auto_import: bool) -> Result<(), CantusError> {
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io { path: path.to_string(), source })?;
        let package_scope = ScopeName::root(path.trim_end_matches(".cantus"));
        let mut package_evaluator = self.sub_evaluator(&package_scope);
        package_evaluator.eval(&source).map_err(|_| LoadError::Evaluation(path.to_string()))?;
        if auto_import {
            self.import(package_scope.as_str())?;
        }
        Ok(())
    }

    fn is_cancelled(&self) -> bool {
        self.shared.cancelled.load(AtomicOrdering::Relaxed)
    }
}

impl IdentifierResolver for Evaluator {
    /// Resolves a bare identifier to its existing `Reference`, or
    /// auto-vivifies one holding `undefined` in the current scope on
    /// first reference (spec §4.3's `:=` "declares-and-assigns
    /// unconditionally" is the only declaration primitive the grammar
    /// requires; `let`/`global` exist to attach non-default modifiers or
    /// force root-scope binding, not to gate whether a bare name is
    /// usable — resolved here, recorded in DESIGN.md). Falls back to a
    /// zero-argument internal function call when no variable of that name
    /// exists but a builtin of that name does.
    fn resolve(&self, name: &str) -> Result<ValueContainer, CantusError> {
        let imported = self.shared.imported.borrow();
        if let Some(variable) = self.shared.vars.borrow().lookup(&self.scope, name, &imported) {
            return Ok(ValueContainer::new_reference(variable.reference.clone()));
        }
        drop(imported);

        if self.shared.context.internals.has_function(name) {
            return self.call_internal(name, &[]);
        }

        let reference = Reference::new(Value::Number(BigDecimal::undefined()));
        self.shared.vars.borrow_mut().define(&self.scope, name, reference.clone(), Modifiers::public());
        Ok(ValueContainer::new_reference(reference))
    }

    /// Invokes `name` as a call (spec §4.6/§4.7): a user-defined function
    /// first, then a host builtin, then a variable bound to a `Lambda`.
    fn call(&self, name: &str, args: Vec<ValueContainer>) -> Result<ValueContainer, CantusError> {
        if let Some(function) = self.shared.functions.borrow().get(name).cloned() {
            return self.call_user_function(&function, args, &HashMap::new());
        }
        if self.shared.context.internals.has_function(name) {
            return self.call_internal(name, &args);
        }
        let imported = self.shared.imported.borrow();
        let variable = self.shared.vars.borrow().lookup(&self.scope, name, &imported).cloned();
        drop(imported);
        if let Some(variable) = variable {
            if let Value::Lambda(lambda) = variable.reference.resolve()? {
                return self.call_lambda(&lambda, args);
            }
        }
        Err(EvaluatorError::UndefinedIdentifier(name.to_string()).into())
    }

    /// Invokes a `Lambda` value directly rather than by name (spec §8:
    /// `` `x => x*x` * 7 `` applies the lambda through `*` itself).
    fn call_lambda_value(&self, lambda: &crate::values::core_values::lambda::Lambda, args: Vec<ValueContainer>) -> Result<ValueContainer, CantusError> {
        self.call_lambda(lambda, args)
    }
}
