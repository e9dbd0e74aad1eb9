//! Control-flow signaling between statements (spec §4.5 "ExecCode"),
//! grounded on the teacher's `ExecutionLoopState` control-flow codes in
//! `runtime/execution/execution_loop.rs`, generalized from a bytecode
//! dispatch loop's resume/jump states to the handful of codes a
//! block/statement interpreter needs.

use crate::values::value_container::ValueContainer;

/// What a statement's evaluation requests of its enclosing constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecCode {
    /// Continue running the next statement normally.
    Resume,
    /// `return`: propagates up through any number of nesting levels until
    /// the enclosing function call absorbs it.
    Return,
    /// `continue`: advances the nearest enclosing loop to its next
    /// iteration.
    Continue,
    /// `break`: exits the nearest enclosing loop.
    Break,
    /// Exits exactly one enclosing construct without being a loop
    /// `break` (spec §4.5: used by `switch`/`case` to prevent
    /// fall-through into the next block without leaking past the
    /// `switch` itself).
    BreakLevel,
}

/// The result every statement handler returns (spec §4.5).
#[derive(Debug, Clone)]
pub struct StatementResult {
    pub value: ValueContainer,
    pub code: ExecCode,
}

impl StatementResult {
    pub fn resume(value: ValueContainer) -> Self {
        StatementResult { value, code: ExecCode::Resume }
    }

    pub fn with_code(value: ValueContainer, code: ExecCode) -> Self {
        StatementResult { value, code }
    }

    /// True if this result should stop a straight-line sequence of
    /// statements from continuing to the next one in its own block (every
    /// non-`Resume` code does, since all of them are some form of early
    /// exit).
    pub fn interrupts_sequence(&self) -> bool {
        self.code != ExecCode::Resume
    }
}
