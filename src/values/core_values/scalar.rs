//! The promoted element type matrix algorithms operate over (spec
//! §4.3.2: "element type is promoted across {BigDecimal, Complex}"),
//! grounded on `value.rs`'s own `Value::add`/`sub`/`mul`/`div` promotion
//! pattern (`Complex` absorbs `Number` into itself, `Number`/`Number`
//! stays a plain decimal).

use crate::bigdecimal::BigDecimal;
use crate::values::core_values::complex::Complex;
use crate::values::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Number(BigDecimal),
    Complex(Complex),
}

impl Scalar {
    pub fn zero() -> Self {
        Scalar::Number(BigDecimal::zero())
    }

    pub fn one() -> Self {
        Scalar::Number(BigDecimal::one())
    }

    pub fn from_value(value: Value) -> Option<Scalar> {
        match value {
            Value::Number(n) => Some(Scalar::Number(n)),
            Value::Complex(c) => Some(Scalar::Complex(c)),
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Scalar::Number(n) => Value::Number(n),
            Scalar::Complex(c) => Value::Complex(c),
        }
    }

    fn as_complex(&self) -> Complex {
        match self {
            Scalar::Number(n) => Complex::new(n.to_f64(), 0.0),
            Scalar::Complex(c) => *c,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Scalar::Number(n) => n.is_zero(),
            Scalar::Complex(c) => c.re == 0.0 && c.im == 0.0,
        }
    }

    pub fn add(&self, other: &Scalar) -> Scalar {
        match (self, other) {
            (Scalar::Number(a), Scalar::Number(b)) => Scalar::Number(a.checked_add(b)),
            _ => Scalar::Complex(self.as_complex() + other.as_complex()),
        }
    }

    pub fn sub(&self, other: &Scalar) -> Scalar {
        match (self, other) {
            (Scalar::Number(a), Scalar::Number(b)) => Scalar::Number(a.checked_sub(b)),
            _ => Scalar::Complex(self.as_complex() - other.as_complex()),
        }
    }

    pub fn mul(&self, other: &Scalar) -> Scalar {
        match (self, other) {
            (Scalar::Number(a), Scalar::Number(b)) => Scalar::Number(a.checked_mul(b)),
            _ => Scalar::Complex(self.as_complex() * other.as_complex()),
        }
    }

    pub fn div(&self, other: &Scalar, precision: u32) -> Scalar {
        match (self, other) {
            (Scalar::Number(a), Scalar::Number(b)) => Scalar::Number(a.checked_div(b, precision)),
            _ => Scalar::Complex(self.as_complex() / other.as_complex()),
        }
    }

    /// Truncate/round cleanup (spec §4.3.2's post-Gauss-Jordan rounding)
    /// only applies to the arbitrary-precision `Number` case; `Complex`
    /// already carries fixed `f64` precision.
    pub fn cleanup(&self, truncate_digits: u32, round_digits: u32) -> Scalar {
        match self {
            Scalar::Number(n) => Scalar::Number(n.truncate_to_digits(truncate_digits).round_to_sig_figs(round_digits)),
            Scalar::Complex(c) => Scalar::Complex(*c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_times_number_stays_a_number() {
        let a = Scalar::Number(BigDecimal::from(2));
        let b = Scalar::Number(BigDecimal::from(3));
        assert_eq!(a.mul(&b), Scalar::Number(BigDecimal::from(6)));
    }

    #[test]
    fn complex_absorbs_number_under_multiplication() {
        let a = Scalar::Complex(Complex::new(0.0, 1.0));
        let b = Scalar::Number(BigDecimal::from(2));
        assert_eq!(a.mul(&b), Scalar::Complex(Complex::new(0.0, 2.0)));
    }
}
