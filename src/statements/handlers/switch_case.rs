//! `switch <expr>: case <value>: ...` (spec §4.5), grounded on the
//! teacher's dispatch-table opcode handling in
//! `runtime/execution/execution_loop.rs`.

use std::cmp::Ordering;

use crate::error::CantusError;
use crate::scope::var_store::Modifiers;
use crate::statements::block::Block;
use crate::statements::exec_code::StatementResult;
use crate::statements::handlers::header_body;
use crate::statements::host::StatementHost;
use crate::statements::{exec_blocks, undefined_value, keyword_table};
use crate::values::comparator;
use crate::values::value_container::ValueContainer;

const SWITCH_BINDING: &str = "__switch";

pub fn exec(header_rest: &str, cases: &[Block], host: &mut dyn StatementHost) -> Result<StatementResult, CantusError> {
    let switch_value = host.eval_expr(header_body(header_rest), false)?;

    host.push_scope(None);
    host.declare_variable(SWITCH_BINDING, switch_value.clone(), Modifiers::default().with_internal());

    for case in cases {
        let Some((def, rest)) = keyword_table::leading_keyword(&case.header.text) else {
            continue;
        };
        if def.word != "case" {
            continue;
        }
        let case_value = host.eval_expr(header_body(rest), false)?;
        if comparator::compare(&switch_value, &case_value) == Ordering::Equal {
            let result = exec_blocks(&case.body, host);
            host.pop_scope();
            return result;
        }
    }

    host.pop_scope();
    Ok(StatementResult::resume(ValueContainer::new_value(undefined_value())))
}
