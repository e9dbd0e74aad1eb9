//! `with <expr> as <name>:` (spec §4.5), grounded on the teacher's
//! scope-scoped resource blocks in `runtime/execution/execution_loop.rs`.

use crate::error::{CantusError, MathError};
use crate::scope::var_store::Modifiers;
use crate::statements::block::Block;
use crate::statements::exec_code::StatementResult;
use crate::statements::handlers::header_body;
use crate::statements::host::StatementHost;
use crate::statements::exec_blocks;

pub fn exec(header_rest: &str, body: &[Block], host: &mut dyn StatementHost) -> Result<StatementResult, CantusError> {
    let header = header_body(header_rest);
    let (expr_part, name_part) = header.split_once(" as ").ok_or(CantusError::from(MathError::Undefined))?;
    let bound_name = name_part.trim();

    let value = host.eval_expr(expr_part.trim(), false)?;
    host.push_scope(None);
    host.declare_variable(bound_name, value, Modifiers::public());
    let result = exec_blocks(body, host);
    host.pop_scope();
    result
}
