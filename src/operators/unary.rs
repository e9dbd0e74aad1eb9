//! Unary operator executors (spec §4.3 `fact_pct`/`not` buckets plus
//! `ref`/`deref`), grounded on the teacher's `global/operators/unary.rs`
//! prefix/postfix split.

use crate::bigdecimal::BigDecimal;
use crate::error::{CantusError, MathError};
use crate::operators::operator::{Arity, ExecContext, Executor, OperatorDef, OperatorOutcome};
use crate::operators::precedence::Precedence;
use crate::values::value::Value;
use crate::values::value_container::ValueContainer;

fn ok(value: Value) -> Result<OperatorOutcome, CantusError> {
    Ok(OperatorOutcome::Value(ValueContainer::new_value(value)))
}

fn negate(a: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    ok(a.try_to_value()?.neg()?)
}

fn not(a: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    ok(a.try_to_value()?.logical_not())
}

/// `!` postfix factorial (spec §4.3 `fact_pct`), defined for non-negative
/// integral `Number`s via the standard product recurrence.
fn factorial(a: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    match a.try_to_value()? {
        Value::Number(n) if !n.is_negative() => {
            let limit = n.to_f64() as u64;
            let mut product = BigDecimal::one();
            for i in 1..=limit {
                product = product.checked_mul(&BigDecimal::from(i as i64));
            }
            ok(Value::Number(product))
        }
        _ => Err(MathError::Undefined.into()),
    }
}

/// `%` postfix percent (spec §4.3 `fact_pct`): `n%` == `n / 100`.
fn percent(a: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    match a.try_to_value()? {
        Value::Number(n) => ok(Value::Number(n.checked_div(&BigDecimal::from(100), 50))),
        _ => Err(MathError::Undefined.into()),
    }
}

/// `ref` prefix: forces its argument to a `Reference` container rather
/// than an auto-resolved `Value` (spec §4.4 step 4).
fn make_ref(a: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    Ok(OperatorOutcome::Value(ValueContainer::new_reference(a.clone().into_reference())))
}

/// `deref` prefix: the inverse, forcing resolution to an owned `Value`.
fn deref(a: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    ok(a.try_to_value()?)
}

fn def(sign: &'static str, precedence: Precedence, arity: Arity, by_reference: bool, executor: UnaryExecutorFn) -> OperatorDef {
    OperatorDef {
        sign,
        precedence,
        arity,
        by_reference,
        assignment: false,
        executor: Executor::Unary(executor),
    }
}

type UnaryExecutorFn = fn(&ValueContainer, &ExecContext) -> Result<OperatorOutcome, CantusError>;

/// Registers every unary operator named in spec §4.3. Unary `-` binds at
/// `AddSub` rather than `FactPct`/`Exponent` (spec leaves its exact bucket
/// unspecified) so `-2^2` reads as `-(2^2)`: the `Exponent` pass reduces
/// `2^2` to `4` before the later `AddSub` pass ever sees the leading `-`,
/// matching the convention most scripting languages use; recorded as an
/// Open Question resolution in DESIGN.md.
pub fn register() -> Vec<OperatorDef> {
    use Precedence::*;
    vec![
        def("-", AddSub, Arity::UnaryBefore, false, negate),
        def("not", Not, Arity::UnaryBefore, false, not),
        def("!", FactPct, Arity::UnaryAfter, false, factorial),
        def("%", FactPct, Arity::UnaryAfter, false, percent),
        def("ref", FactPct, Arity::UnaryBefore, true, make_ref),
        def("deref", FactPct, Arity::UnaryBefore, true, deref),
    ]
}
