//! The operator registrar (spec §4.3): signs, precedence, arity,
//! by-reference flag, assignment flag, bound to an executor function.
//! Grounded on the teacher's `global/operators/{unary,binary}.rs`
//! registrar shape, generalized from a fixed bytecode instruction set to
//! a table driven by textual signs and precedence buckets.

use crate::config::EvaluatorConfig;
use crate::error::CantusError;
use crate::operators::precedence::Precedence;
use crate::operators::{assignment, binary, unary};
use crate::values::value_container::ValueContainer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    UnaryBefore,
    UnaryAfter,
    Binary,
}

/// Result of invoking an operator executor (spec §4.3: "may return
/// `SystemMessage::defer`").
pub enum OperatorOutcome {
    Value(ValueContainer),
    Defer,
}

/// Per-evaluation context threaded through every executor call: the
/// division-precision knob and the `condition_mode` flag the `=` defer
/// decision needs (spec §4.3.1, spec §4.4).
pub struct ExecContext<'a> {
    pub config: &'a EvaluatorConfig,
    pub condition_mode: bool,
}

pub type BinaryExecutor = fn(&ValueContainer, &ValueContainer, &ExecContext) -> Result<OperatorOutcome, CantusError>;
pub type UnaryExecutor = fn(&ValueContainer, &ExecContext) -> Result<OperatorOutcome, CantusError>;

#[derive(Clone, Copy)]
pub enum Executor {
    Binary(BinaryExecutor),
    Unary(UnaryExecutor),
}

#[derive(Clone, Copy)]
pub struct OperatorDef {
    pub sign: &'static str,
    pub precedence: Precedence,
    pub arity: Arity,
    /// Arguments pass as `Reference` rather than auto-resolved `Value`
    /// (spec §4.3, spec §4.4 step 4).
    pub by_reference: bool,
    /// LHS must be a reference-like target (spec §4.3.1).
    pub assignment: bool,
    pub executor: Executor,
}

pub struct OperatorTable {
    defs: Vec<OperatorDef>,
}

impl OperatorTable {
    /// The standard Cantus operator set (spec §4.3).
    pub fn standard() -> Self {
        let mut defs = Vec::new();
        defs.extend(assignment::register());
        defs.extend(binary::register());
        defs.extend(unary::register());
        OperatorTable { defs }
    }

    /// Every registered sign, longest first (spec §4.4 step 2: "longest
    /// match first, max sign length 8").
    pub fn signs_longest_first(&self) -> Vec<&'static str> {
        let mut signs: Vec<&'static str> = self.defs.iter().map(|d| d.sign).collect();
        signs.sort_by_key(|s| std::cmp::Reverse(s.len()));
        signs.dedup();
        signs
    }

    pub fn lookup(&self, sign: &str, precedence: Precedence) -> Option<&OperatorDef> {
        self.defs.iter().find(|d| d.sign == sign && d.precedence == precedence)
    }

    /// Every binding registered for `sign`, ordered from the highest
    /// precedence to the lowest — used by the defer protocol (spec §4.4
    /// step 5) to retry at successively lower buckets.
    pub fn bindings_for_sign(&self, sign: &str) -> Vec<&OperatorDef> {
        let mut found: Vec<&OperatorDef> = self.defs.iter().filter(|d| d.sign == sign).collect();
        found.sort_by(|a, b| b.precedence.cmp(&a.precedence));
        found
    }

    pub fn at_precedence(&self, precedence: Precedence) -> impl Iterator<Item = &OperatorDef> {
        self.defs.iter().filter(move |d| d.precedence == precedence)
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        OperatorTable::standard()
    }
}
