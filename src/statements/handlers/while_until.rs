//! `while`/`until` (spec §4.5), grounded on the teacher's loop-opcode
//! handling in `runtime/execution/execution_loop.rs`; `until` is `while`
//! with the condition negated.

use crate::error::CantusError;
use crate::statements::block::Block;
use crate::statements::exec_code::{ExecCode, StatementResult};
use crate::statements::handlers::header_body;
use crate::statements::host::StatementHost;
use crate::statements::{exec_blocks, undefined_value};
use crate::values::value_container::ValueContainer;

fn run(header_rest: &str, body: &[Block], host: &mut dyn StatementHost, negate: bool) -> Result<StatementResult, CantusError> {
    let condition_text = header_body(header_rest);
    loop {
        host.tick_loop_iteration()?;
        let truthy = host.eval_expr(condition_text, true)?.try_to_value()?.is_truthy();
        if truthy == negate {
            break;
        }
        let result = exec_blocks(body, host)?;
        match result.code {
            ExecCode::Break => break,
            ExecCode::Continue | ExecCode::Resume => {}
            ExecCode::Return | ExecCode::BreakLevel => return Ok(result),
        }
    }
    Ok(StatementResult::resume(ValueContainer::new_value(undefined_value())))
}

pub fn exec_while(header_rest: &str, body: &[Block], host: &mut dyn StatementHost) -> Result<StatementResult, CantusError> {
    run(header_rest, body, host, false)
}

/// `until <cond>:` loops while the condition is false.
pub fn exec_until(header_rest: &str, body: &[Block], host: &mut dyn StatementHost) -> Result<StatementResult, CantusError> {
    run(header_rest, body, host, true)
}
