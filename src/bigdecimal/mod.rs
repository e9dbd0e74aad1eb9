//! Arbitrary-precision signed decimal (spec §4.1), grounded on the
//! teacher's `values/core_values/decimal/mod.rs` — same reach for
//! `num-bigint`/`num-traits` to back an arbitrary-precision numeric core
//! value, and (in `parse.rs`) the same reach for the `bigdecimal` crate
//! to turn decimal literal text into a `(bigint, exponent)` pair. The
//! outer `(mantissa, exponent, undefined, sig_figs)` shape is its own
//! struct rather than the teacher's `ExtendedBigDecimal`, since spec
//! §4.1 specifies that representation explicitly and needs an explicit
//! `undefined` sentinel that still participates in the same comparator
//! bucket as finite values.

mod parse;
mod sig_figs;

pub use parse::ParseDigits;
pub use sig_figs::infer_sig_figs;

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use crate::error::{CantusError, MathError, SyntaxError};

/// `(mantissa: big-integer, exponent: i32, undefined: bool, sig_figs: i32)`
/// per spec §4.1. The represented value is `mantissa * 10^exponent` unless
/// `undefined` is set, in which case the numeric fields are meaningless.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BigDecimal {
    mantissa: BigInt,
    exponent: i32,
    undefined: bool,
    sig_figs: Option<u32>,
}

impl BigDecimal {
    pub fn undefined() -> Self {
        BigDecimal {
            mantissa: BigInt::zero(),
            exponent: 0,
            undefined: true,
            sig_figs: None,
        }
    }

    pub fn zero() -> Self {
        BigDecimal::from_bigint(BigInt::zero())
    }

    pub fn one() -> Self {
        BigDecimal::from_bigint(BigInt::from(1))
    }

    pub fn from_bigint(mantissa: BigInt) -> Self {
        BigDecimal { mantissa, exponent: 0, undefined: false, sig_figs: None }
    }

    pub fn new(mantissa: BigInt, exponent: i32) -> Self {
        BigDecimal { mantissa, exponent, undefined: false, sig_figs: None }
    }

    pub fn with_sig_figs(mut self, sig_figs: Option<u32>) -> Self {
        self.sig_figs = sig_figs;
        self
    }

    pub fn is_undefined(&self) -> bool {
        self.undefined
    }

    pub fn sig_figs(&self) -> Option<u32> {
        self.sig_figs
    }

    pub fn is_zero(&self) -> bool {
        !self.undefined && self.mantissa.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        !self.undefined && self.mantissa.is_negative()
    }

    /// Parses a `BigDecimal` literal per spec §4.1: `0x...` hex, a literal
    /// double-zero (`00...`) prefix as octal, plain decimal (optionally
    /// with a fractional part), and the literals `null`/`undefined`. A
    /// single leading zero (`012`) is plain decimal, not octal.
    pub fn parse(text: &str) -> Result<Self, CantusError> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("null") || trimmed.eq_ignore_ascii_case("undefined") {
            return Ok(BigDecimal::undefined());
        }

        let (sign, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
            let value = BigInt::parse_bytes(hex.as_bytes(), 16)
                .ok_or_else(|| SyntaxError::InvalidNumberLiteral(text.to_string()))?;
            return Ok(BigDecimal::from_bigint(value * sign));
        }

        if body.len() > 2 && body.starts_with("00") && body.chars().all(|c| c.is_ascii_digit()) {
            let value = BigInt::parse_bytes(body.as_bytes(), 8)
                .ok_or_else(|| SyntaxError::InvalidNumberLiteral(text.to_string()))?;
            return Ok(BigDecimal::from_bigint(value * sign));
        }

        let digits = ParseDigits::parse(body)
            .ok_or_else(|| SyntaxError::InvalidNumberLiteral(text.to_string()))?;
        let mantissa = digits.mantissa() * sign;
        Ok(BigDecimal::new(mantissa, digits.exponent()))
    }

    /// Parses a literal and additionally infers its significant-figure
    /// count from the source text (spec §4.1).
    pub fn parse_with_sig_figs(text: &str) -> Result<Self, CantusError> {
        let value = BigDecimal::parse(text)?;
        if value.undefined {
            return Ok(value);
        }
        Ok(value.with_sig_figs(infer_sig_figs(text)))
    }

    fn normalized(&self) -> (BigInt, i32) {
        let mut mantissa = self.mantissa.clone();
        let mut exponent = self.exponent;
        if mantissa.is_zero() {
            return (mantissa, 0);
        }
        while (&mantissa % 10).is_zero() {
            mantissa /= 10;
            exponent += 1;
        }
        (mantissa, exponent)
    }

    /// Normalizes trailing zeros out of the mantissa, so equal values with
    /// different textual exponents compare and hash identically.
    pub fn normalize(&self) -> Self {
        if self.undefined {
            return self.clone();
        }
        let (mantissa, exponent) = self.normalized();
        BigDecimal { mantissa, exponent, undefined: false, sig_figs: self.sig_figs }
    }

    fn aligned(a: &BigDecimal, b: &BigDecimal) -> (BigInt, BigInt, i32) {
        let exponent = a.exponent.min(b.exponent);
        let a_scaled = &a.mantissa * BigInt::from(10).pow((a.exponent - exponent) as u32);
        let b_scaled = &b.mantissa * BigInt::from(10).pow((b.exponent - exponent) as u32);
        (a_scaled, b_scaled, exponent)
    }

    fn propagated_sig_figs(a: &BigDecimal, b: &BigDecimal) -> Option<u32> {
        match (a.sig_figs, b.sig_figs) {
            (Some(x), Some(y)) => Some(x.min(y)),
            _ => None,
        }
    }

    pub fn checked_add(&self, other: &BigDecimal) -> BigDecimal {
        if self.undefined || other.undefined {
            return BigDecimal::undefined();
        }
        let (a, b, exponent) = Self::aligned(self, other);
        BigDecimal::new(a + b, exponent).with_sig_figs(Self::propagated_sig_figs(self, other))
    }

    pub fn checked_sub(&self, other: &BigDecimal) -> BigDecimal {
        self.checked_add(&other.clone().neg())
    }

    pub fn checked_mul(&self, other: &BigDecimal) -> BigDecimal {
        if self.undefined || other.undefined {
            return BigDecimal::undefined();
        }
        BigDecimal::new(&self.mantissa * &other.mantissa, self.exponent + other.exponent)
            .with_sig_figs(Self::propagated_sig_figs(self, other))
    }

    /// Division with a bounded precision floor (spec §4.1, "division uses a
    /// bounded precision (configurable, >=50 significant digits)"). Division
    /// by zero yields the `undefined` sentinel rather than an error; callers
    /// that need a hard `MathError::DivisionByZero` should check
    /// `other.is_zero()` first (used by the integer-division operators).
    pub fn checked_div(&self, other: &BigDecimal, precision: u32) -> BigDecimal {
        if self.undefined || other.undefined || other.is_zero() {
            return BigDecimal::undefined();
        }
        if self.is_zero() {
            return BigDecimal::zero();
        }
        let precision = precision.max(50);
        // scale the numerator up so the integer quotient carries `precision`
        // significant digits, then carry the remaining scale as exponent.
        let scale = precision as i32 + 2;
        let scaled_numerator = &self.mantissa * BigInt::from(10).pow(scale as u32);
        let quotient = &scaled_numerator / &other.mantissa;
        let exponent = self.exponent - other.exponent - scale;
        BigDecimal::new(quotient, exponent)
            .round_to_sig_figs(precision)
            .with_sig_figs(Self::propagated_sig_figs(self, other))
    }

    /// Divides treating both operands as integers, producing the
    /// `MathError::DivisionByZero` spec §4.1 calls for in integer paths
    /// where the result is not representable.
    pub fn checked_int_div(&self, other: &BigDecimal) -> Result<BigDecimal, CantusError> {
        if other.is_zero() {
            return Err(MathError::DivisionByZero.into());
        }
        let (a, b, _) = Self::aligned(self, other);
        Ok(BigDecimal::from_bigint(a / b))
    }

    pub fn checked_rem(&self, other: &BigDecimal) -> Result<BigDecimal, CantusError> {
        if other.is_zero() {
            return Err(MathError::DivisionByZero.into());
        }
        let (a, b, exponent) = Self::aligned(self, other);
        Ok(BigDecimal::new(a % b, exponent))
    }

    /// Rounds to `digits` significant digits using round-half-even, the
    /// ecosystem default the `bigdecimal` crate itself uses — spec §9 leaves
    /// last-digit rounding unspecified, so this choice is recorded as an
    /// Open Question resolution in DESIGN.md.
    pub fn round_to_sig_figs(&self, digits: u32) -> BigDecimal {
        if self.undefined || self.mantissa.is_zero() {
            return self.clone();
        }
        let num_digits = self.mantissa.abs().to_string().len() as u32;
        if num_digits <= digits {
            return self.clone();
        }
        let drop = num_digits - digits;
        let divisor = BigInt::from(10).pow(drop);
        let half = &divisor / 2;
        let negative = self.mantissa.is_negative();
        let abs_mantissa = self.mantissa.abs();
        let remainder = &abs_mantissa % &divisor;
        let mut truncated = &abs_mantissa / &divisor;
        let round_up = match remainder.cmp(&half) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => (&truncated % 2) != BigInt::zero(),
        };
        if round_up {
            truncated += 1;
        }
        let mantissa = if negative { -truncated } else { truncated };
        BigDecimal::new(mantissa, self.exponent + drop as i32)
    }

    /// Truncates to `digits` total digits (used by RREF cleanup, spec
    /// §4.3.2: "truncate each cell to 19 digits").
    pub fn truncate_to_digits(&self, digits: u32) -> BigDecimal {
        if self.undefined || self.mantissa.is_zero() {
            return self.clone();
        }
        let num_digits = self.mantissa.abs().to_string().len() as u32;
        if num_digits <= digits {
            return self.clone();
        }
        let drop = num_digits - digits;
        let divisor = BigInt::from(10).pow(drop);
        BigDecimal::new(&self.mantissa / &divisor, self.exponent + drop as i32)
    }

    pub fn pow(&self, exponent: u32) -> BigDecimal {
        if self.undefined {
            return BigDecimal::undefined();
        }
        BigDecimal::new(self.mantissa.pow(exponent), self.exponent * exponent as i32)
    }

    pub fn abs(&self) -> BigDecimal {
        if self.undefined {
            return self.clone();
        }
        BigDecimal::new(self.mantissa.abs(), self.exponent).with_sig_figs(self.sig_figs)
    }

    pub fn to_f64(&self) -> f64 {
        if self.undefined {
            return f64::NAN;
        }
        let mantissa = self.mantissa.to_f64().unwrap_or(f64::NAN);
        mantissa * 10f64.powi(self.exponent)
    }

    pub fn sqrt(&self, precision: u32) -> BigDecimal {
        if self.undefined || self.is_negative() {
            return BigDecimal::undefined();
        }
        if self.is_zero() {
            return BigDecimal::zero();
        }
        // Newton's method seeded from an f64 approximation; sufficient for
        // the magnitude/norm use sites, which round for display anyway.
        let approx = self.to_f64().sqrt();
        let mut guess = BigDecimal::parse(&format!("{approx:.17}")).unwrap_or_else(|_| self.clone());
        let two = BigDecimal::from_bigint(BigInt::from(2));
        for _ in 0..20 {
            let next = guess.checked_add(&self.checked_div(&guess, precision)).checked_div(&two, precision);
            if next.approx_eq(&guess, precision) {
                guess = next;
                break;
            }
            guess = next;
        }
        guess.round_to_sig_figs(precision)
    }

    fn approx_eq(&self, other: &BigDecimal, precision: u32) -> bool {
        let diff = self.checked_sub(other).abs();
        let scale = BigDecimal::new(BigInt::from(1), -(precision as i32));
        diff.compare(&scale) != Ordering::Greater
    }

    /// Total-order comparison per spec §4.1: comparison with `undefined`
    /// always yields "unequal, less", keeping the ordering total.
    pub fn compare(&self, other: &BigDecimal) -> Ordering {
        match (self.undefined, other.undefined) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => {
                let (a, b, _) = Self::aligned(self, other);
                a.cmp(&b)
            }
        }
    }
}

impl PartialEq for BigDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}
impl Eq for BigDecimal {}

impl PartialOrd for BigDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}
impl Ord for BigDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl std::hash::Hash for BigDecimal {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        if self.undefined {
            "undefined".hash(state);
        } else {
            let normalized = self.normalize();
            normalized.mantissa.hash(state);
            normalized.exponent.hash(state);
        }
    }
}

impl Add for BigDecimal {
    type Output = BigDecimal;
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(&rhs)
    }
}
impl Sub for BigDecimal {
    type Output = BigDecimal;
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(&rhs)
    }
}
impl Mul for BigDecimal {
    type Output = BigDecimal;
    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(&rhs)
    }
}
impl Div for BigDecimal {
    type Output = BigDecimal;
    fn div(self, rhs: Self) -> Self::Output {
        self.checked_div(&rhs, MIN_DISPLAY_PRECISION)
    }
}
impl Neg for BigDecimal {
    type Output = BigDecimal;
    fn neg(self) -> Self::Output {
        if self.undefined {
            return self;
        }
        BigDecimal::new(-self.mantissa, self.exponent).with_sig_figs(self.sig_figs)
    }
}

const MIN_DISPLAY_PRECISION: u32 = 50;

impl fmt::Display for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.undefined {
            return write!(f, "undefined");
        }
        let (mantissa, exponent) = self.normalized();
        if exponent >= 0 {
            write!(f, "{}", mantissa * BigInt::from(10).pow(exponent as u32))
        } else {
            let digits = mantissa.abs().to_string();
            let point = (-exponent) as usize;
            let sign = if mantissa.is_negative() { "-" } else { "" };
            if digits.len() <= point {
                let padded = "0".repeat(point - digits.len() + 1) + &digits;
                let (int_part, frac_part) = padded.split_at(padded.len() - point);
                write!(f, "{sign}{int_part}.{frac_part}")
            } else {
                let (int_part, frac_part) = digits.split_at(digits.len() - point);
                write!(f, "{sign}{int_part}.{frac_part}")
            }
        }
    }
}

impl From<i64> for BigDecimal {
    fn from(value: i64) -> Self {
        BigDecimal::from_bigint(BigInt::from(value))
    }
}

impl From<f64> for BigDecimal {
    fn from(value: f64) -> Self {
        if !value.is_finite() {
            return BigDecimal::undefined();
        }
        BigDecimal::parse(&format!("{value}")).unwrap_or_else(|_| BigDecimal::undefined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_hex_and_octal() {
        assert_eq!(BigDecimal::parse("14").unwrap().to_string(), "14");
        assert_eq!(BigDecimal::parse("0x1A").unwrap().to_string(), "26");
        assert_eq!(BigDecimal::parse("0755").unwrap().to_string(), "493");
        assert!(BigDecimal::parse("null").unwrap().is_undefined());
        assert!(BigDecimal::parse("undefined").unwrap().is_undefined());
    }

    #[test]
    fn arithmetic_basic() {
        let a = BigDecimal::parse("2").unwrap();
        let b = BigDecimal::parse("3.5").unwrap();
        assert_eq!((a.clone() + b.clone()).to_string(), "5.5");
        assert_eq!((b.clone() - a.clone()).to_string(), "1.5");
        assert_eq!((a.clone() * b.clone()).to_string(), "7.0");
    }

    #[test]
    fn undefined_compares_less_and_unequal() {
        let undefined = BigDecimal::undefined();
        let zero = BigDecimal::zero();
        assert_eq!(undefined.compare(&zero), Ordering::Less);
        assert_eq!(zero.compare(&undefined), Ordering::Greater);
        assert_ne!(undefined, zero);
    }

    #[test]
    fn division_by_zero_is_undefined() {
        let a = BigDecimal::parse("1").unwrap();
        let zero = BigDecimal::zero();
        assert!(a.checked_div(&zero, 50).is_undefined());
    }

    #[test]
    fn integer_division_by_zero_is_math_error() {
        let a = BigDecimal::parse("1").unwrap();
        let zero = BigDecimal::zero();
        assert!(a.checked_int_div(&zero).is_err());
    }

    #[test]
    fn normalize_removes_trailing_zeros() {
        let a = BigDecimal::new(BigInt::from(1200), -2);
        assert_eq!(a.normalize().to_string(), "12");
    }
}
