//! Assignment operators (spec §4.3.1, spec §4.4 step 5): the `=` sign's
//! dual registration at `Comparison` (equality, deferring to `Assignment`
//! when the LHS is reference-like and not in a condition) and at
//! `Assignment` itself (the actual store-back), plus `:=`, the compound
//! `+=`/`-=`/`*=`/`/=` family, and `++`/`--`. Grounded on the teacher's
//! `global/operators/binary.rs` assignment-operator entries, generalized
//! from a single fixed opcode to the defer-and-retry dispatch spec §4.4
//! needs because Cantus resolves `=` from source text rather than a
//! pre-disambiguated bytecode instruction.

use crate::error::CantusError;
use crate::operators::operator::{Arity, ExecContext, Executor, OperatorDef, OperatorOutcome};
use crate::operators::precedence::Precedence;
use crate::values::value::Value;
use crate::values::value_container::ValueContainer;

fn ok(value: Value) -> Result<OperatorOutcome, CantusError> {
    Ok(OperatorOutcome::Value(ValueContainer::new_value(value)))
}

/// `=` at `Comparison`: equality check, unless the LHS is a live reference
/// and this isn't a condition evaluation, in which case it's almost
/// certainly an assignment — defer down to the `Assignment` binding
/// (spec §4.3.1: "this is how `=` switches between equality and
/// assignment").
fn equals_or_defer(a: &ValueContainer, b: &ValueContainer, ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    if !ctx.condition_mode && a.is_reference() {
        return Ok(OperatorOutcome::Defer);
    }
    let (x, y) = (a.try_to_value()?, b.try_to_value()?);
    ok(Value::Boolean(x.compare_op(&y) == std::cmp::Ordering::Equal))
}

/// `=` at `Assignment`: the store-back the defer from `Comparison` lands
/// on. Requires the LHS to already be a `Reference` (spec §4.3.1).
fn store(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    let value = b.try_to_value()?;
    match a.as_reference() {
        Some(reference) => {
            reference.set(ValueContainer::new_value(value.deep_copy()));
            Ok(OperatorOutcome::Value(a.clone()))
        }
        None => ok(value),
    }
}

/// `:=` declares-and-assigns unconditionally; unlike `=` it never needs to
/// defer since it never reads as equality.
fn declare_assign(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    let value = b.try_to_value()?.deep_copy();
    match a.as_reference() {
        Some(reference) => {
            reference.set(ValueContainer::new_value(value));
            Ok(OperatorOutcome::Value(a.clone()))
        }
        None => ok(value),
    }
}

fn compound(a: &ValueContainer, b: &ValueContainer, combine: impl Fn(&Value, &Value) -> Result<Value, CantusError>) -> Result<OperatorOutcome, CantusError> {
    let reference = a.as_reference().cloned().unwrap_or_else(|| a.clone().into_reference());
    let current = reference.resolve()?;
    let rhs = b.try_to_value()?;
    let updated = combine(&current, &rhs)?;
    reference.set(ValueContainer::new_value(updated));
    Ok(OperatorOutcome::Value(ValueContainer::new_reference(reference)))
}

fn add_assign(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    compound(a, b, |x, y| x.add(y))
}

fn sub_assign(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    compound(a, b, |x, y| x.sub(y))
}

fn mul_assign(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    compound(a, b, |x, y| x.mul(y))
}

fn div_assign(a: &ValueContainer, b: &ValueContainer, ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    let precision = ctx.config.division_precision;
    compound(a, b, move |x, y| x.div(y, precision))
}

fn step_one(a: &ValueContainer, ctx: &ExecContext, delta: i64) -> Result<OperatorOutcome, CantusError> {
    let step = ValueContainer::new_value(Value::Number(crate::bigdecimal::BigDecimal::from(delta)));
    add_assign(a, &step, ctx)
}

fn increment(a: &ValueContainer, ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    step_one(a, ctx, 1)
}

fn decrement(a: &ValueContainer, ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    step_one(a, ctx, -1)
}

type BinaryExecutorFn = fn(&ValueContainer, &ValueContainer, &ExecContext) -> Result<OperatorOutcome, CantusError>;
type UnaryExecutorFn = fn(&ValueContainer, &ExecContext) -> Result<OperatorOutcome, CantusError>;

fn binary_def(sign: &'static str, precedence: Precedence, by_reference: bool, assignment: bool, executor: BinaryExecutorFn) -> OperatorDef {
    OperatorDef { sign, precedence, arity: Arity::Binary, by_reference, assignment, executor: Executor::Binary(executor) }
}

fn unary_def(sign: &'static str, by_reference: bool, executor: UnaryExecutorFn) -> OperatorDef {
    OperatorDef {
        sign,
        precedence: Precedence::Assignment,
        arity: Arity::UnaryAfter,
        by_reference,
        assignment: true,
        executor: Executor::Unary(executor),
    }
}

/// Registers `=`'s two bindings plus every other assignment-family
/// operator (spec §4.3, spec §4.4 step 5).
pub fn register() -> Vec<OperatorDef> {
    use Precedence::*;
    vec![
        binary_def("=", Comparison, true, false, equals_or_defer),
        binary_def("=", Assignment, true, true, store),
        binary_def(":=", Assignment, true, true, declare_assign),
        binary_def("+=", Assignment, true, true, add_assign),
        binary_def("-=", Assignment, true, true, sub_assign),
        binary_def("*=", Assignment, true, true, mul_assign),
        binary_def("/=", Assignment, true, true, div_assign),
        unary_def("++", true, increment),
        unary_def("--", true, decrement),
    ]
}
