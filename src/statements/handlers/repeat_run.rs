//! `repeat`/`run` (spec §4.5 lists both as block-level flow without
//! further elaboration). Resolved here (recorded in DESIGN.md): `repeat
//! <count>:` runs its body a fixed number of times with no loop
//! variable, and `run:` is an unconditional once-only grouping — useful
//! for scoping a sequence of statements without introducing a new scope
//! the way `namespace` does.

use crate::error::{CantusError, MathError};
use crate::statements::block::Block;
use crate::statements::exec_code::{ExecCode, StatementResult};
use crate::statements::handlers::header_body;
use crate::statements::host::StatementHost;
use crate::statements::{exec_blocks, undefined_value};
use crate::values::value::Value;
use crate::values::value_container::ValueContainer;

pub fn exec_repeat(header_rest: &str, body: &[Block], host: &mut dyn StatementHost) -> Result<StatementResult, CantusError> {
    let count_value = host.eval_expr(header_body(header_rest), false)?.try_to_value()?;
    let count = match count_value {
        Value::Number(n) => n.to_f64().max(0.0) as u64,
        _ => return Err(MathError::Undefined.into()),
    };
    for _ in 0..count {
        host.tick_loop_iteration()?;
        let result = exec_blocks(body, host)?;
        match result.code {
            ExecCode::Break => break,
            ExecCode::Continue | ExecCode::Resume => {}
            ExecCode::Return | ExecCode::BreakLevel => return Ok(result),
        }
    }
    Ok(StatementResult::resume(ValueContainer::new_value(undefined_value())))
}

pub fn exec_run(body: &[Block], host: &mut dyn StatementHost) -> Result<StatementResult, CantusError> {
    exec_blocks(body, host)
}
