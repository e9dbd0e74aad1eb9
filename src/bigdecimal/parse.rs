//! Plain decimal-literal parsing helper split out of `mod.rs` so the
//! mantissa/exponent extraction can be unit tested independently of the
//! `0x`/octal/`undefined` literal dispatch. Delegates the actual digit
//! parsing to the `bigdecimal` crate, the same crate the teacher's own
//! `values/core_values/decimal/mod.rs` calls `BigDecimal::from_str` on to
//! turn decimal literal text into a `(bigint, exponent)` pair.

use std::str::FromStr;

use bigdecimal::BigDecimal as ExternalBigDecimal;
use num_bigint::BigInt;

/// Digits extracted from a plain decimal literal, as `mantissa * 10^exponent`.
pub struct ParseDigits {
    mantissa: BigInt,
    exponent: i32,
}

impl ParseDigits {
    pub fn mantissa(&self) -> BigInt {
        self.mantissa.clone()
    }

    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Parses an unsigned decimal body such as `"3.14"` or `"1000"`. Returns
    /// `None` if the body contains anything other than digits and at most
    /// one decimal point.
    pub fn parse(body: &str) -> Option<ParseDigits> {
        if body.is_empty() || body.starts_with('.') || body.ends_with('.') || body.matches('.').count() > 1 {
            return None;
        }
        if !body.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
            return None;
        }
        let parsed = ExternalBigDecimal::from_str(body).ok()?;
        let (mantissa, scale) = parsed.as_bigint_and_exponent();
        Some(ParseDigits { mantissa, exponent: -(scale as i32) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer() {
        let digits = ParseDigits::parse("42").unwrap();
        assert_eq!(digits.mantissa(), BigInt::from(42));
        assert_eq!(digits.exponent(), 0);
    }

    #[test]
    fn parses_fraction() {
        let digits = ParseDigits::parse("3.14").unwrap();
        assert_eq!(digits.mantissa(), BigInt::from(314));
        assert_eq!(digits.exponent(), -2);
    }

    #[test]
    fn rejects_malformed_body() {
        assert!(ParseDigits::parse("3.14.15").is_none());
        assert!(ParseDigits::parse("abc").is_none());
        assert!(ParseDigits::parse("3.").is_none());
    }
}
