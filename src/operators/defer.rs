//! The defer-and-retry helper (spec §4.4 step 5): when an executor
//! returns `OperatorOutcome::Defer`, the evaluator retries the same sign
//! at the next lower precedence bucket that also binds it. Grounded on
//! the teacher's retry-at-fallback-instruction pattern in
//! `runtime/execution/instructions.rs`.

use crate::error::{CantusError, SyntaxError};
use crate::operators::operator::{ExecContext, Executor, OperatorDef, OperatorOutcome, OperatorTable};
use crate::operators::precedence::Precedence;
use crate::values::value_container::ValueContainer;

/// Runs `sign`'s binding at `precedence`, retrying at progressively lower
/// precedence bindings of the same sign while the executor defers. Errors
/// if a defer has nowhere lower to land (spec §9: a sign registered only
/// once can never legally defer).
pub fn run_binary(
    table: &OperatorTable,
    sign: &str,
    precedence: Precedence,
    lhs: &ValueContainer,
    rhs: &ValueContainer,
    ctx: &ExecContext,
) -> Result<ValueContainer, CantusError> {
    let bindings = table.bindings_for_sign(sign);
    let mut candidates: Vec<&OperatorDef> = bindings
        .into_iter()
        .filter(|d| d.precedence <= precedence)
        .collect();
    candidates.sort_by(|a, b| b.precedence.cmp(&a.precedence));

    for def in candidates {
        let Executor::Binary(executor) = def.executor else {
            continue;
        };
        match executor(lhs, rhs, ctx)? {
            OperatorOutcome::Value(result) => return Ok(result),
            OperatorOutcome::Defer => continue,
        }
    }
    Err(SyntaxError::DeferWithNoLowerBinding { sign: sign.to_string() }.into())
}

pub fn run_unary(
    table: &OperatorTable,
    sign: &str,
    precedence: Precedence,
    operand: &ValueContainer,
    ctx: &ExecContext,
) -> Result<ValueContainer, CantusError> {
    let bindings = table.bindings_for_sign(sign);
    let mut candidates: Vec<&OperatorDef> = bindings
        .into_iter()
        .filter(|d| d.precedence <= precedence)
        .collect();
    candidates.sort_by(|a, b| b.precedence.cmp(&a.precedence));

    for def in candidates {
        let Executor::Unary(executor) = def.executor else {
            continue;
        };
        match executor(operand, ctx)? {
            OperatorOutcome::Value(result) => return Ok(result),
            OperatorOutcome::Defer => continue,
        }
    }
    Err(SyntaxError::DeferWithNoLowerBinding { sign: sign.to_string() }.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigdecimal::BigDecimal;
    use crate::config::EvaluatorConfig;
    use crate::references::reference::Reference;
    use crate::values::value::Value;

    #[test]
    fn equals_defers_from_comparison_to_assignment() {
        let table = OperatorTable::standard();
        let config = EvaluatorConfig::default();
        let ctx = ExecContext { config: &config, condition_mode: false };
        let reference = Reference::new(Value::Number(BigDecimal::from(1)));
        let lhs = ValueContainer::new_reference(reference.clone());
        let rhs = ValueContainer::new_value(Value::Number(BigDecimal::from(9)));
        let result = run_binary(&table, "=", Precedence::Comparison, &lhs, &rhs, &ctx).unwrap();
        assert_eq!(result.try_to_value().unwrap(), Value::Number(BigDecimal::from(9)));
        assert_eq!(reference.resolve().unwrap(), Value::Number(BigDecimal::from(9)));
    }

    #[test]
    fn equals_in_condition_mode_compares() {
        let table = OperatorTable::standard();
        let config = EvaluatorConfig::default();
        let ctx = ExecContext { config: &config, condition_mode: true };
        let reference = Reference::new(Value::Number(BigDecimal::from(5)));
        let lhs = ValueContainer::new_reference(reference);
        let rhs = ValueContainer::new_value(Value::Number(BigDecimal::from(5)));
        let result = run_binary(&table, "=", Precedence::Comparison, &lhs, &rhs, &ctx).unwrap();
        assert_eq!(result.try_to_value().unwrap(), Value::Boolean(true));
    }
}
