//! Binary operator executors (spec §4.3), grounded on the teacher's
//! `global/operators/binary.rs` arithmetic/logical/bitwise split — same
//! three families, retargeted from bytecode dispatch to textual signs.

use std::cmp::Ordering;

use crate::error::{CantusError, MathError};
use crate::operators::matrix_ops;
use crate::operators::operator::{Arity, Executor, ExecContext, OperatorDef, OperatorOutcome};
use crate::operators::precedence::Precedence;
use crate::values::value::Value;
use crate::values::value_container::ValueContainer;

fn values(a: &ValueContainer, b: &ValueContainer) -> Result<(Value, Value), CantusError> {
    Ok((a.try_to_value()?, b.try_to_value()?))
}

fn ok(value: Value) -> Result<OperatorOutcome, CantusError> {
    Ok(OperatorOutcome::Value(ValueContainer::new_value(value)))
}

fn add(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    let (x, y) = values(a, b)?;
    if let (Value::Matrix(m), Value::Matrix(n)) = (&x, &y) {
        return ok(matrix_ops::add(m, n)?);
    }
    ok(x.add(&y)?)
}

fn sub(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    let (x, y) = values(a, b)?;
    ok(x.sub(&y)?)
}

fn mul(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    let (x, y) = values(a, b)?;
    if let (Value::Matrix(m), Value::Matrix(n)) = (&x, &y) {
        return ok(matrix_ops::multiply(m, n)?);
    }
    ok(x.mul(&y)?)
}

fn div(a: &ValueContainer, b: &ValueContainer, ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    let (x, y) = values(a, b)?;
    ok(x.div(&y, ctx.config.division_precision)?)
}

fn int_div(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    let (x, y) = values(a, b)?;
    match (x, y) {
        (Value::Number(x), Value::Number(y)) => ok(Value::Number(x.checked_int_div(&y)?)),
        _ => Err(MathError::Undefined.into()),
    }
}

fn modulo(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    let (x, y) = values(a, b)?;
    ok(x.rem(&y)?)
}

fn pow(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    let (x, y) = values(a, b)?;
    if let (Value::Matrix(m), Value::Number(n)) = (&x, &y) {
        let exponent = n.to_f64();
        if exponent == -1.0 {
            return ok(matrix_ops::inverse(m)?);
        }
    }
    ok(x.pow(&y)?)
}

fn logical_and(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    let (x, y) = values(a, b)?;
    ok(x.logical_and(&y))
}

fn logical_or(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    let (x, y) = values(a, b)?;
    ok(x.logical_or(&y))
}

fn bitwise_numeric(a: &ValueContainer, b: &ValueContainer, op: impl Fn(i64, i64) -> i64) -> Result<OperatorOutcome, CantusError> {
    let (x, y) = values(a, b)?;
    match (x, y) {
        (Value::Number(x), Value::Number(y)) => {
            let result = op(x.to_f64() as i64, y.to_f64() as i64);
            ok(Value::Number(crate::bigdecimal::BigDecimal::from(result)))
        }
        _ => Err(MathError::Undefined.into()),
    }
}

fn bitwise_and(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    bitwise_numeric(a, b, |x, y| x & y)
}

fn bitwise_or(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    bitwise_numeric(a, b, |x, y| x | y)
}

fn bitwise_xor(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    bitwise_numeric(a, b, |x, y| x ^ y)
}

fn shift_left(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    bitwise_numeric(a, b, |x, y| x << y)
}

fn shift_right(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    bitwise_numeric(a, b, |x, y| x >> y)
}

fn concat(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    let (x, y) = values(a, b)?;
    match (x, y) {
        (Value::Text(mut t), Value::Text(u)) => {
            t.push(&u);
            ok(Value::Text(t))
        }
        (Value::LinkedList(mut l), Value::LinkedList(m)) => {
            for node in m.iter() {
                l.push_back(node.clone());
            }
            ok(Value::LinkedList(l))
        }
        _ => Err(MathError::Undefined.into()),
    }
}

fn choose(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    let (x, y) = values(a, b)?;
    match (x, y) {
        (Value::Number(n), Value::Number(k)) => {
            let n = n.to_f64() as u64;
            let k = k.to_f64() as u64;
            ok(Value::Number(crate::bigdecimal::BigDecimal::from(binomial(n, k) as i64)))
        }
        _ => Err(MathError::Undefined.into()),
    }
}

fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u64 = 1;
    for i in 0..k {
        result = result * (n - i) / (i + 1);
    }
    result
}

fn comparison(a: &ValueContainer, b: &ValueContainer, test: impl Fn(Ordering) -> bool) -> Result<OperatorOutcome, CantusError> {
    let (x, y) = values(a, b)?;
    ok(Value::Boolean(test(x.compare_op(&y))))
}

fn not_equal(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    comparison(a, b, |o| o != Ordering::Equal)
}

fn less_than(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    comparison(a, b, |o| o == Ordering::Less)
}

fn greater_than(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    comparison(a, b, |o| o == Ordering::Greater)
}

fn less_or_equal(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    comparison(a, b, |o| o != Ordering::Greater)
}

fn greater_or_equal(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    comparison(a, b, |o| o != Ordering::Less)
}

fn scientific_exponent(a: &ValueContainer, b: &ValueContainer, _ctx: &ExecContext) -> Result<OperatorOutcome, CantusError> {
    // `E` operator (spec §6: "decimal with optional exponent via E
    // (operator, not syntax)") — `3E2` == `3 * 10^2`.
    let (x, y) = values(a, b)?;
    match (x, y) {
        (Value::Number(mantissa), Value::Number(exponent)) => {
            let ten = crate::bigdecimal::BigDecimal::from(10);
            ok(Value::Number(mantissa.checked_mul(&ten.pow(exponent.to_f64() as u32))))
        }
        _ => Err(MathError::Undefined.into()),
    }
}

fn def(sign: &'static str, precedence: Precedence, executor: BinaryExecutorFn) -> OperatorDef {
    OperatorDef {
        sign,
        precedence,
        arity: Arity::Binary,
        by_reference: false,
        assignment: false,
        executor: Executor::Binary(executor),
    }
}

type BinaryExecutorFn = fn(&ValueContainer, &ValueContainer, &ExecContext) -> Result<OperatorOutcome, CantusError>;

/// Registers every non-assignment binary operator named in spec §4.3's
/// precedence table. `=`'s equality half is registered here too, at
/// `Comparison`; its assignment half lives in `assignment::register`.
pub fn register() -> Vec<OperatorDef> {
    use Precedence::*;
    vec![
        def("!=", Comparison, not_equal),
        def("<=", Comparison, less_or_equal),
        def(">=", Comparison, greater_or_equal),
        def("<", Comparison, less_than),
        def(">", Comparison, greater_than),
        def("<<", BitshiftConcatFrac, shift_left),
        def(">>", BitshiftConcatFrac, shift_right),
        def("&", BitshiftConcatFrac, concat),
        def("\\", BitshiftConcatFrac, int_div),
        def("+", AddSub, add),
        def("-", AddSub, sub),
        def("*", MulDiv, mul),
        def("/", MulDiv, div),
        def("mod", MulDiv, modulo),
        def("choose", MulDiv, choose),
        def("||", MulDiv, logical_or),
        def("&&", MulDiv, logical_and),
        def("^^", MulDiv, bitwise_xor),
        def("^", Exponent, pow),
        def("E", FactPct, scientific_exponent),
        def("|", BitshiftConcatFrac, bitwise_or),
        def("and", And, logical_and),
        def("or", Or, logical_or),
        def("bitand", BitshiftConcatFrac, bitwise_and),
    ]
}
