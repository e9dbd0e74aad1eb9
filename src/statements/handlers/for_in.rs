//! `for <var[, var2]> in <expr>:` (spec §4.5), grounded on the teacher's
//! iterator-protocol loop handling in `runtime/execution/execution_loop.rs`,
//! generalized across every container value instead of just arrays.

use crate::error::{CantusError, MathError};
use crate::scope::var_store::Modifiers;
use crate::statements::block::Block;
use crate::statements::exec_code::{ExecCode, StatementResult};
use crate::statements::handlers::header_body;
use crate::statements::host::StatementHost;
use crate::statements::{exec_blocks, undefined_value};
use crate::values::core_values::matrix::MatrixRow;
use crate::values::value::Value;
use crate::values::value_container::ValueContainer;

/// One step of iteration: either a single bound item, or a key/value pair
/// for containers that carry both (`Set`, `HashSet`).
enum Item {
    One(ValueContainer),
    Pair(ValueContainer, ValueContainer),
}

fn items_of(value: Value) -> Result<Vec<Item>, CantusError> {
    let items = match value {
        Value::Tuple(t) => {
            let mut items = Vec::with_capacity(t.len());
            for i in 0..t.len() as i64 {
                items.push(Item::One(t.get(i)?.clone()));
            }
            items
        }
        Value::Matrix(m) => m
            .rows
            .into_iter()
            .map(|row| match row {
                MatrixRow::Scalar(cell) => Item::One(cell),
                MatrixRow::Nested(nested) => Item::One(ValueContainer::new_value(Value::Matrix(nested))),
            })
            .collect(),
        Value::Text(text) => text
            .0
            .chars()
            .map(|c| Item::One(ValueContainer::new_value(Value::Text(crate::values::core_values::text::Text::new(c.to_string())))))
            .collect(),
        Value::Set(set) => set
            .iter()
            .map(|(key, value)| match value {
                Some(value) => Item::Pair(key.clone(), value.clone()),
                None => Item::One(key.clone()),
            })
            .collect(),
        Value::HashSet(set) => set
            .iter()
            .map(|(key, value)| match value {
                Some(value) => Item::Pair(key.clone(), value.clone()),
                None => Item::One(key.clone()),
            })
            .collect(),
        Value::LinkedList(list) => list.iter().map(|v| Item::One(v.clone())).collect(),
        _ => return Err(MathError::Undefined.into()),
    };
    Ok(items)
}

pub fn exec(header_rest: &str, body: &[Block], host: &mut dyn StatementHost) -> Result<StatementResult, CantusError> {
    let header = header_body(header_rest);
    let Some(in_pos) = header.find(" in ") else {
        return Err(MathError::Undefined.into());
    };
    let (binders, source_expr) = header.split_at(in_pos);
    let source_expr = &source_expr[" in ".len()..];
    let names: Vec<&str> = binders.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
    let (name1, name2) = match names.as_slice() {
        [a] => (*a, None),
        [a, b] => (*a, Some(*b)),
        _ => return Err(MathError::Undefined.into()),
    };

    let source = host.eval_expr(source_expr.trim(), false)?.try_to_value()?;
    let items = items_of(source)?;

    for item in items {
        host.tick_loop_iteration()?;
        match (&item, name2) {
            (Item::One(value), None) => {
                host.declare_variable(name1, value.clone(), Modifiers::public());
            }
            (Item::Pair(key, value), Some(second)) => {
                host.declare_variable(name1, key.clone(), Modifiers::public());
                host.declare_variable(second, value.clone(), Modifiers::public());
            }
            (Item::One(value), Some(second)) => {
                host.declare_variable(name1, value.clone(), Modifiers::public());
                host.declare_variable(second, ValueContainer::new_value(undefined_value()), Modifiers::public());
            }
            (Item::Pair(key, _), None) => {
                host.declare_variable(name1, key.clone(), Modifiers::public());
            }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_value_items_pair_with_undefined_second_binder() {
        let v = ValueContainer::new_value(Value::Boolean(true));
        match (&Item::One(v), Some("b")) {
            (Item::One(_), Some(_)) => {}
            _ => panic!("expected One arm"),
        }
    }
}
