//! Exact decimal numbers
//!
//! [`Decimal`] is an arbitrary-precision base-10 number that keeps the digits
//! and scale it was written with: `100.50` reads back as `100.50`, and a
//! 55-digit literal keeps all 55 digits.
//!
//! ## Text form
//!
//! `Display` writes a valid JSON number literal:
//! - positional notation while the value needs at most a few leading zeros
//!   (`19.99`, `0.000125`, `1500`)
//! - `<digits>e<exp>` otherwise (`1e100`, `125e-20`)
//!
//! Parsing that text gives back the same digits and scale.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Write};
use std::ops::Add;
use std::str::FromStr;
use thiserror::Error;

/// Newtype struct name that marks a decimal inside a serde data stream
///
/// The wire crate's value serializer turns it back into an exact decimal.
/// Every other serializer sees a plain digit string.
pub const DECIMAL_TOKEN: &str = "$jsonfield::Decimal";

/// Leading fractional zeros written out before switching to an exponent
const MAX_POSITIONAL_ZEROS: u64 = 6;

/// Text that is not a decimal number literal
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid decimal literal: {0:?}")]
pub struct ParseDecimalError(String);

/// Exact decimal: an unbounded integer mantissa and a base-10 scale
///
/// The value is `digits * 10^-scale`. Equality and ordering compare numeric
/// value, so `1.50 == 1.5`, while [`scale`](Decimal::scale) and `Display`
/// keep the written form.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Decimal(BigDecimal);

impl Decimal {
    /// `mantissa * 10^-scale`
    pub fn new(mantissa: i64, scale: i64) -> Self {
        Self::from_parts(BigInt::from(mantissa), scale)
    }

    /// Build from an unbounded mantissa and a scale
    pub fn from_parts(digits: BigInt, scale: i64) -> Self {
        Decimal(BigDecimal::new(digits, scale))
    }

    /// Mantissa and scale as written
    pub fn to_parts(&self) -> (BigInt, i64) {
        self.0.as_bigint_and_exponent()
    }

    /// Number of digits after the decimal point; negative for `e+N` forms
    pub fn scale(&self) -> i64 {
        self.to_parts().1
    }

    /// Borrow the underlying arbitrary-precision number
    pub fn as_big_decimal(&self) -> &BigDecimal {
        &self.0
    }

    /// Unwrap into the underlying arbitrary-precision number
    pub fn into_big_decimal(self) -> BigDecimal {
        self.0
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    /// Parse `[+-]digits[.digits][(e|E)[+-]digits]` without rounding
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseDecimalError(s.to_string());

        let (mantissa, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
            Some(i) => (&s[..i], s[i + 1..].parse::<i64>().map_err(|_| invalid())?),
            None => (s, 0),
        };

        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let (negative, int_digits) = match int_part.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, int_part.strip_prefix('+').unwrap_or(int_part)),
        };

        if int_digits.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_digits
            .bytes()
            .chain(frac_part.bytes())
            .all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let mut text = String::with_capacity(int_digits.len() + frac_part.len());
        text.push_str(int_digits);
        text.push_str(frac_part);
        let mut digits = BigInt::from_str(&text).map_err(|_| invalid())?;
        if negative {
            digits = -digits;
        }

        let frac_len = i64::try_from(frac_part.len()).map_err(|_| invalid())?;
        let scale = frac_len.checked_sub(exponent).ok_or_else(invalid)?;
        Ok(Decimal::from_parts(digits, scale))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (digits, scale) = self.to_parts();
        let text = digits.to_string();
        let (sign, magnitude) = match text.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", text.as_str()),
        };
        f.write_str(sign)?;

        if scale <= 0 {
            f.write_str(magnitude)?;
            if scale < 0 {
                write!(f, "e{}", scale.unsigned_abs())?;
            }
            return Ok(());
        }

        let scale = scale.unsigned_abs();
        let len = magnitude.len() as u64;
        if scale < len {
            let (whole, frac) = magnitude.split_at((len - scale) as usize);
            write!(f, "{}.{}", whole, frac)
        } else if scale - len <= MAX_POSITIONAL_ZEROS {
            f.write_str("0.")?;
            for _ in 0..(scale - len) {
                f.write_char('0')?;
            }
            f.write_str(magnitude)
        } else {
            write!(f, "{}e-{}", magnitude, scale)
        }
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({})", self)
    }
}

impl Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 + rhs.0)
    }
}

impl From<i64> for Decimal {
    fn from(i: i64) -> Self {
        Decimal::new(i, 0)
    }
}

impl From<u64> for Decimal {
    fn from(u: u64) -> Self {
        Decimal::from_parts(BigInt::from(u), 0)
    }
}

impl From<BigDecimal> for Decimal {
    fn from(d: BigDecimal) -> Self {
        Decimal(d)
    }
}

impl From<Decimal> for BigDecimal {
    fn from(d: Decimal) -> Self {
        d.0
    }
}

/// The shortest decimal that reads back as the same float
impl TryFrom<f64> for Decimal {
    type Error = ParseDecimalError;

    fn try_from(f: f64) -> Result<Self, Self::Error> {
        f.to_string().parse()
    }
}

// ============================================================================
// Serde
// ============================================================================

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_newtype_struct(DECIMAL_TOKEN, &self.to_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_newtype_struct(DECIMAL_TOKEN, DecimalVisitor)
    }
}

struct DecimalVisitor;

impl<'de> Visitor<'de> for DecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal number or a string of decimal digits")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
        Decimal::try_from(v).map_err(E::custom)
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(self, d: D) -> Result<Decimal, D::Error> {
        d.deserialize_any(DecimalVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    // === Parsing ===

    #[test]
    fn test_parse_keeps_digits_and_scale() {
        let d = dec("100.50");
        assert_eq!(d.to_parts(), (BigInt::from(10050), 2));
        assert_eq!(d.to_string(), "100.50");
    }

    #[test]
    fn test_parse_beyond_float_precision() {
        let text = "0.3000000000000000444089209850062616169452667236328125";
        let d = dec(text);
        assert_eq!(d.scale(), 52);
        assert_eq!(d.to_string(), text);
    }

    #[test]
    fn test_parse_exponent_adjusts_scale() {
        assert_eq!(dec("1.5e3").to_parts(), (BigInt::from(15), -2));
        assert_eq!(dec("15E-3").to_parts(), (BigInt::from(15), 3));
        assert_eq!(dec("2e+2"), dec("200"));
    }

    #[test]
    fn test_parse_huge_exponents() {
        assert_eq!(dec("0e100"), dec("0"));
        assert_eq!(dec("1.000e66").scale(), -63);
        assert_eq!(dec("1e-400").scale(), 400);
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        for bad in ["", "-", ".", "e5", "1e", "1.2.3", "12a", "NaN", "inf", "1e99999999999999999999"] {
            assert!(bad.parse::<Decimal>().is_err(), "{:?} should not parse", bad);
        }
        assert!("1e-9223372036854775808".parse::<Decimal>().is_err());
    }

    #[test]
    fn test_parse_sign() {
        assert_eq!(dec("-7.25").to_parts(), (BigInt::from(-725), 2));
        assert_eq!(dec("+7.25"), dec("7.25"));
    }

    // === Display ===

    #[test]
    fn test_display_positional() {
        assert_eq!(Decimal::new(1999, 2).to_string(), "19.99");
        assert_eq!(Decimal::new(-5, 1).to_string(), "-0.5");
        assert_eq!(Decimal::new(125, 6).to_string(), "0.000125");
        assert_eq!(Decimal::new(0, 3).to_string(), "0.000");
        assert_eq!(Decimal::new(42, 0).to_string(), "42");
    }

    #[test]
    fn test_display_exponent_forms() {
        assert_eq!(Decimal::new(1, -100).to_string(), "1e100");
        assert_eq!(Decimal::new(-125, 20).to_string(), "-125e-20");
    }

    #[test]
    fn test_display_parses_back_identically() {
        for text in ["0.1", "100.50", "1e100", "125e-20", "-0.000125", "1000e63"] {
            let d = dec(text);
            assert_eq!(dec(&d.to_string()).to_parts(), d.to_parts());
        }
    }

    // === Arithmetic and comparison ===

    #[test]
    fn test_sum_is_exact() {
        let sum = dec("0.1") + dec("0.2");
        assert_eq!(sum, dec("0.3"));
        assert_eq!(sum.to_string(), "0.3");
    }

    #[test]
    fn test_equality_ignores_trailing_zeros() {
        assert_eq!(dec("1.50"), dec("1.5"));
        assert_eq!(dec("1000e63"), dec("1e66"));
        assert!(dec("0.1") < dec("0.11"));
    }

    #[test]
    fn test_from_float_is_shortest_repr() {
        assert_eq!(Decimal::try_from(0.1).unwrap().to_string(), "0.1");
        assert!(Decimal::try_from(f64::NAN).is_err());
    }

    // === Serde ===

    #[test]
    fn test_serializes_as_digit_string_elsewhere() {
        let json = serde_json::to_string(&dec("19.99")).unwrap();
        assert_eq!(json, r#""19.99""#);
    }

    #[test]
    fn test_deserializes_from_string_or_number() {
        let from_text: Decimal = serde_json::from_str(r#""19.99""#).unwrap();
        let from_int: Decimal = serde_json::from_str("42").unwrap();
        assert_eq!(from_text, dec("19.99"));
        assert_eq!(from_int, dec("42"));
    }
}
