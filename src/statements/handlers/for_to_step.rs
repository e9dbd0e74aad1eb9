//! `for <var> = <start> to <end> step <step>:` (spec §4.5), grounded on
//! the teacher's numeric range-loop handling in
//! `runtime/execution/execution_loop.rs`.

use std::cmp::Ordering;

use crate::bigdecimal::BigDecimal;
use crate::error::{CantusError, MathError};
use crate::scope::var_store::Modifiers;
use crate::statements::block::Block;
use crate::statements::exec_code::{ExecCode, StatementResult};
use crate::statements::handlers::header_body;
use crate::statements::host::StatementHost;
use crate::statements::{exec_blocks, undefined_value};
use crate::values::value::Value;
use crate::values::value_container::ValueContainer;

fn as_number(host: &mut dyn StatementHost, expr: &str) -> Result<BigDecimal, CantusError> {
    match host.eval_expr(expr.trim(), false)?.try_to_value()? {
        Value::Number(n) => Ok(n),
        _ => Err(MathError::Undefined.into()),
    }
}

pub fn exec(header_rest: &str, body: &[Block], host: &mut dyn StatementHost) -> Result<StatementResult, CantusError> {
    let header = header_body(header_rest);
    let (var_part, rest) = header.split_once('=').ok_or(CantusError::from(MathError::Undefined))?;
    let var_name = var_part.trim();

    let (range_part, step_part) = match rest.find(" step ") {
        Some(pos) => (&rest[..pos], Some(&rest[pos + " step ".len()..])),
        None => (rest, None),
    };
    let (start_part, end_part) = range_part.split_once(" to ").ok_or(CantusError::from(MathError::Undefined))?;

    let start = as_number(host, start_part)?;
    let end = as_number(host, end_part)?;
    let step = match step_part {
        Some(text) => as_number(host, text)?,
        None => BigDecimal::one(),
    };
    if step.is_zero() {
        return Err(MathError::StepCannotBeZero.into());
    }

    let ascending = step.compare(&BigDecimal::zero()) == Ordering::Greater;
    let mut counter = start;

    loop {
        let reached_end = if ascending {
            counter.compare(&end) == Ordering::Greater
        } else {
            counter.compare(&end) == Ordering::Less
        };
        if reached_end {
            break;
        }

        host.tick_loop_iteration()?;
        host.declare_variable(var_name, ValueContainer::new_value(Value::Number(counter.clone())), Modifiers::public());

        let result = exec_blocks(body, host)?;
        match result.code {
            ExecCode::Break => break,
            ExecCode::Continue | ExecCode::Resume => {}
            ExecCode::Return | ExecCode::BreakLevel => return Ok(result),
        }

        counter = counter.checked_add(&step);
    }

    Ok(StatementResult::resume(ValueContainer::new_value(undefined_value())))
}
