//! `Value`: the tagged union of every runtime type (spec §3), grounded on
//! the teacher's `values/value.rs` enum-of-core-values shape.

use std::fmt;

use crate::bigdecimal::BigDecimal;
use crate::error::{CantusError, MathError};
use crate::traits::{Identity, StructuralEq, ValueEq};
use crate::values::comparator;
use crate::values::core_values::{
    ClassInstance, Complex, DateTimeValue, HashSetValue, Lambda, LinkedListValue, Matrix, Scalar, SetValue,
    SystemMessage, Text,
};
use crate::values::core_values::tuple::Tuple;
use crate::values::value_container::ValueContainer;

#[derive(Debug, Clone)]
pub enum Value {
    Number(BigDecimal),
    Complex(Complex),
    Boolean(bool),
    Text(Text),
    Identifier(String),
    DateTime(DateTimeValue),
    Tuple(Tuple),
    Matrix(Matrix),
    Set(SetValue),
    HashSet(HashSetValue),
    LinkedList(LinkedListValue),
    Lambda(Lambda),
    ClassInstance(ClassInstance),
    SystemMessage(SystemMessage),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Complex(_) => "complex",
            Value::Boolean(_) => "boolean",
            Value::Text(_) => "text",
            Value::Identifier(_) => "identifier",
            Value::DateTime(_) => "datetime",
            Value::Tuple(_) => "tuple",
            Value::Matrix(_) => "matrix",
            Value::Set(_) => "set",
            Value::HashSet(_) => "hashset",
            Value::LinkedList(_) => "linkedlist",
            Value::Lambda(_) => "lambda",
            Value::ClassInstance(_) => "classinstance",
            Value::SystemMessage(_) => "systemmessage",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Number(n) => !n.is_zero() && !n.is_undefined(),
            Value::Text(t) => !t.is_empty(),
            Value::Tuple(t) => !t.is_empty(),
            Value::Matrix(m) => m.height() != 0,
            Value::Set(s) => !s.is_empty(),
            Value::HashSet(s) => !s.is_empty(),
            Value::LinkedList(l) => !l.is_empty(),
            _ => true,
        }
    }

    /// Deep copy per spec §3 invariant: shares no mutable state with the
    /// source, except `static` class fields (handled inside
    /// `ClassInstance::deep_copy`, which consults the owning `UserClass`).
    pub fn deep_copy(&self) -> Value {
        match self {
            Value::Number(n) => Value::Number(n.clone()),
            Value::Complex(c) => Value::Complex(*c),
            Value::Boolean(b) => Value::Boolean(*b),
            Value::Text(t) => Value::Text(t.clone()),
            Value::Identifier(i) => Value::Identifier(i.clone()),
            Value::DateTime(d) => Value::DateTime(d.clone()),
            Value::Tuple(t) => Value::Tuple(Tuple::new(t.0.iter().map(ValueContainer::deep_copy).collect())),
            Value::Matrix(m) => Value::Matrix(m.deep_copy()),
            Value::Set(s) => Value::Set(s.deep_copy()),
            Value::HashSet(s) => Value::HashSet(s.deep_copy()),
            Value::LinkedList(l) => Value::LinkedList(l.deep_copy()),
            Value::Lambda(l) => Value::Lambda(l.clone()),
            Value::ClassInstance(c) => Value::ClassInstance(c.deep_copy()),
            Value::SystemMessage(m) => Value::SystemMessage(m.clone()),
        }
    }

    /// Numeric/textual/collection addition (spec §4.3 `add_sub` bucket):
    /// `BigDecimal`/`Complex` addition, `Text`/`Tuple` concatenation, and
    /// `Set`/`HashSet` union (spec §8: `{1,2,3} + {3,4}` = `{1,2,3,4}`).
    pub fn add(&self, other: &Value) -> Result<Value, CantusError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.checked_add(b))),
            (Value::Complex(a), Value::Complex(b)) => Ok(Value::Complex(*a + *b)),
            (Value::Complex(a), Value::Number(b)) => Ok(Value::Complex(*a + Complex::new(b.to_f64(), 0.0))),
            (Value::Number(a), Value::Complex(b)) => Ok(Value::Complex(Complex::new(a.to_f64(), 0.0) + *b)),
            (Value::Text(a), Value::Text(b)) => {
                let mut result = a.clone();
                result.push(b);
                Ok(Value::Text(result))
            }
            (Value::Tuple(a), Value::Tuple(b)) => {
                let mut elements = a.0.clone();
                elements.extend(b.0.clone());
                Ok(Value::Tuple(Tuple::new(elements)))
            }
            (Value::Matrix(a), Value::Matrix(b)) => matrix_elementwise(a, b, |x, y| x.add(y)),
            (Value::Set(a), Value::Set(b)) => Ok(Value::Set(a.union(b))),
            (Value::HashSet(a), Value::HashSet(b)) => Ok(Value::HashSet(a.union(b))),
            _ => Err(MathError::Undefined.into()),
        }
    }

    pub fn sub(&self, other: &Value) -> Result<Value, CantusError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.checked_sub(b))),
            (Value::Complex(a), Value::Complex(b)) => Ok(Value::Complex(*a - *b)),
            (Value::Matrix(a), Value::Matrix(b)) => matrix_elementwise(a, b, |x, y| x.sub(y)),
            (Value::Set(a), Value::Set(b)) => Ok(Value::Set(a.difference(b))),
            _ => Err(MathError::Undefined.into()),
        }
    }

    /// Multiplication; `Matrix * Matrix` dispatches to
    /// `operators::matrix_ops::multiply` (spec §4.3.2) from the caller,
    /// since that algorithm needs more than elementwise combination.
    pub fn mul(&self, other: &Value) -> Result<Value, CantusError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.checked_mul(b))),
            (Value::Complex(a), Value::Complex(b)) => Ok(Value::Complex(*a * *b)),
            (Value::Complex(a), Value::Number(b)) => Ok(Value::Complex(*a * Complex::new(b.to_f64(), 0.0))),
            (Value::Number(a), Value::Complex(b)) => Ok(Value::Complex(Complex::new(a.to_f64(), 0.0) * *b)),
            (Value::Set(a), Value::Set(b)) => Ok(Value::Set(a.intersection(b))),
            _ => Err(MathError::Undefined.into()),
        }
    }

    pub fn div(&self, other: &Value, precision: u32) -> Result<Value, CantusError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.checked_div(b, precision))),
            (Value::Complex(a), Value::Complex(b)) => Ok(Value::Complex(*a / *b)),
            _ => Err(MathError::Undefined.into()),
        }
    }

    pub fn rem(&self, other: &Value) -> Result<Value, CantusError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.checked_rem(b)?)),
            _ => Err(MathError::Undefined.into()),
        }
    }

    pub fn pow(&self, other: &Value) -> Result<Value, CantusError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) if !b.is_negative() => {
                let exponent = b.to_f64() as u32;
                Ok(Value::Number(a.pow(exponent)))
            }
            (Value::Number(a), Value::Number(b)) => {
                let exponent = (-b.to_f64()) as u32;
                Ok(Value::Number(BigDecimal::from(1).checked_div(&a.pow(exponent), 50)))
            }
            _ => Err(MathError::Undefined.into()),
        }
    }

    pub fn neg(&self) -> Result<Value, CantusError> {
        match self {
            Value::Number(n) => Ok(Value::Number(-n.clone())),
            Value::Complex(c) => Ok(Value::Complex(-*c)),
            _ => Err(MathError::Undefined.into()),
        }
    }

    pub fn logical_not(&self) -> Value {
        Value::Boolean(!self.is_truthy())
    }

    pub fn logical_and(&self, other: &Value) -> Value {
        Value::Boolean(self.is_truthy() && other.is_truthy())
    }

    pub fn logical_or(&self, other: &Value) -> Value {
        Value::Boolean(self.is_truthy() || other.is_truthy())
    }

    pub fn compare_op(&self, other: &Value) -> std::cmp::Ordering {
        comparator::compare_values(self, other)
    }
}

/// Cellwise combinator backing `Value::add`/`sub`'s `Matrix`/`Matrix` arms.
/// Operates on the `Scalar`-promoted grid (spec §4.3.2: "element type is
/// promoted across {BigDecimal, Complex}") rather than a `BigDecimal`-only
/// one, so e.g. `m1 - m2` stays defined when either matrix holds `Complex`
/// cells.
fn matrix_elementwise(a: &Matrix, b: &Matrix, op: impl Fn(&Scalar, &Scalar) -> Scalar) -> Result<Value, CantusError> {
    let (ga, gb) = (a.normalize().to_scalar_grid()?, b.normalize().to_scalar_grid()?);
    if ga.len() != gb.len() || ga.first().map(|r| r.len()) != gb.first().map(|r| r.len()) {
        return Err(MathError::IncompatibleMatrixDimensions {
            lhs: (ga.len(), ga.first().map(|r| r.len()).unwrap_or(0)),
            rhs: (gb.len(), gb.first().map(|r| r.len()).unwrap_or(0)),
        }
        .into());
    }
    let rows = ga
        .into_iter()
        .zip(gb)
        .map(|(row_a, row_b)| row_a.iter().zip(row_b.iter()).map(|(x, y)| op(x, y)).collect())
        .collect();
    Ok(Value::Matrix(Matrix::from_scalar_grid(rows)))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        comparator::compare_values(self, other) == std::cmp::Ordering::Equal
    }
}

impl StructuralEq for Value {
    fn structural_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Complex(a), Value::Complex(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Identifier(a), Value::Identifier(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Matrix(a), Value::Matrix(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::HashSet(a), Value::HashSet(b)) => a == b,
            (Value::LinkedList(a), Value::LinkedList(b)) => a == b,
            (Value::Lambda(a), Value::Lambda(b)) => a == b,
            (Value::ClassInstance(a), Value::ClassInstance(b)) => a == b,
            (Value::SystemMessage(a), Value::SystemMessage(b)) => a == b,
            _ => false,
        }
    }
}

impl ValueEq for Value {
    fn value_eq(&self, other: &Self) -> bool {
        comparator::compare_values(self, other) == std::cmp::Ordering::Equal
    }
}

impl Identity for Value {
    fn identical(&self, other: &Self) -> bool {
        self.structural_eq(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Complex(c) => write!(f, "{c}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Text(t) => write!(f, "{t}"),
            Value::Identifier(i) => write!(f, "{i}"),
            Value::DateTime(d) => write!(f, "{d}"),
            Value::Tuple(t) => write!(f, "{t}"),
            Value::Matrix(m) => write!(f, "{m}"),
            Value::Set(s) => write!(f, "{s}"),
            Value::HashSet(s) => write!(f, "{s}"),
            Value::LinkedList(l) => write!(f, "{l}"),
            Value::Lambda(l) => write!(f, "{l}"),
            Value::ClassInstance(c) => write!(f, "{c}"),
            Value::SystemMessage(m) => write!(f, "{m}"),
        }
    }
}

impl From<BigDecimal> for Value {
    fn from(value: BigDecimal) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Text> for Value {
    fn from(value: Text) -> Self {
        Value::Text(value)
    }
}
