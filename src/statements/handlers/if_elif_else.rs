//! `if`/`elif`/`else` (spec §4.5), grounded on the teacher's
//! condition-dispatch opcode handling in `runtime/execution/execution_loop.rs`.

use crate::error::CantusError;
use crate::statements::block::Block;
use crate::statements::exec_code::StatementResult;
use crate::statements::handlers::header_body;
use crate::statements::host::StatementHost;
use crate::statements::keyword_table;
use crate::statements::{exec_blocks, undefined_value};
use crate::values::value_container::ValueContainer;

pub fn exec(block: &Block, host: &mut dyn StatementHost) -> Result<StatementResult, CantusError> {
    let (_, rest) = keyword_table::leading_keyword(&block.header.text).expect("dispatched as 'if'");
    let condition = host.eval_expr(header_body(rest), true)?.try_to_value()?;
    if condition.is_truthy() {
        return exec_blocks(&block.body, host);
    }

    for continuation in &block.continuations {
        let (def, crest) = keyword_table::leading_keyword(&continuation.header.text).expect("aux keyword");
        match def.word {
            "elif" => {
                let condition = host.eval_expr(header_body(crest), true)?.try_to_value()?;
                if condition.is_truthy() {
                    return exec_blocks(&continuation.body, host);
                }
            }
            "else" => return exec_blocks(&continuation.body, host),
            _ => {}
        }
    }

    Ok(StatementResult::resume(ValueContainer::new_value(undefined_value())))
}
