// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Arbitrary-precision decimals.
//!
//! A [`Decimal`] wraps a normalised [`BigDecimal`] and has two byte forms:
//!
//! - **Comparable**: what a `Value` stores. Lexicographic byte order equals
//!   numeric order, so comparisons and storage keys never decode it.
//! - **Serialized big-decimal**: the CQL wire form, a 4-byte big-endian scale
//!   followed by the unscaled value as minimal big-endian two's complement.
//!
//! # Comparable layout
//!
//! ```text
//! zero:      02
//! positive:  03 | exponent (8 bytes, sign bit flipped) | digits ('0'..'9') | 00
//! negative:  01 | bitwise complement of the positive tail of |x|
//! ```
//!
//! The number is normalised as `0.d1 d2 .. dn x 10^exponent` with `d1 != 0`
//! and `dn != 0`, which makes the encoding unique.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::Zero;
use std::fmt;
use std::str::FromStr;

const NEGATIVE: u8 = 0x01;
const ZERO: u8 = 0x02;
const POSITIVE: u8 = 0x03;
const TERMINATOR: u8 = 0x00;
const EXPONENT_BIAS: u64 = 1 << 63;

/// Decimal decoding/parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecimalError {
    #[error("invalid decimal literal: {0:?}")]
    Parse(String),
    #[error("invalid comparable decimal: {0}")]
    InvalidComparable(&'static str),
    #[error("invalid serialized big-decimal: {0}")]
    InvalidSerialized(&'static str),
}

/// Normalised arbitrary-precision decimal.
///
/// The unscaled value never has trailing zeros, and `digits - scale` always
/// fits in an `i64`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal(BigDecimal);

impl Decimal {
    /// Zero.
    pub fn zero() -> Self {
        Self(BigDecimal::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// `unscaled x 10^-scale`; `unscaled` must carry no trailing zeros.
    fn from_normalized(unscaled: BigInt, scale: i64) -> Option<Self> {
        if unscaled.is_zero() {
            return Some(Self::zero());
        }
        let digits = unscaled.magnitude().to_string().len() as i64;
        digits.checked_sub(scale)?;
        Some(Self(BigDecimal::new(unscaled, scale)))
    }

    /// Encode to the byte-comparable form.
    pub fn encode_comparable(&self) -> Vec<u8> {
        if self.is_zero() {
            return vec![ZERO];
        }
        let (unscaled, scale) = self.0.as_bigint_and_exponent();
        let negative = unscaled.sign() == Sign::Minus;
        let digits = unscaled.magnitude().to_string();
        let exponent = digits.len() as i64 - scale;

        let mut out = Vec::with_capacity(1 + 8 + digits.len() + 1);
        out.push(if negative { NEGATIVE } else { POSITIVE });
        out.extend_from_slice(&((exponent as u64) ^ EXPONENT_BIAS).to_be_bytes());
        out.extend_from_slice(digits.as_bytes());
        out.push(TERMINATOR);
        if negative {
            for byte in &mut out[1..] {
                *byte = !*byte;
            }
        }
        out
    }

    /// Decode the byte-comparable form.
    pub fn decode_comparable(bytes: &[u8]) -> Result<Self, DecimalError> {
        let (&header, tail) = bytes
            .split_first()
            .ok_or(DecimalError::InvalidComparable("empty"))?;
        let negative = match header {
            ZERO if tail.is_empty() => return Ok(Self::zero()),
            ZERO => return Err(DecimalError::InvalidComparable("trailing bytes after zero")),
            NEGATIVE => true,
            POSITIVE => false,
            _ => return Err(DecimalError::InvalidComparable("bad sign byte")),
        };
        // exponent + at least one digit + terminator
        if tail.len() < 8 + 2 {
            return Err(DecimalError::InvalidComparable("too short"));
        }
        let tail: Vec<u8> = if negative {
            tail.iter().map(|b| !b).collect()
        } else {
            tail.to_vec()
        };

        let mut exp_bytes = [0u8; 8];
        exp_bytes.copy_from_slice(&tail[..8]);
        let exponent = (u64::from_be_bytes(exp_bytes) ^ EXPONENT_BIAS) as i64;

        let (&terminator, digits) = tail[8..]
            .split_last()
            .ok_or(DecimalError::InvalidComparable("too short"))?;
        if terminator != TERMINATOR {
            return Err(DecimalError::InvalidComparable("missing terminator"));
        }
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(DecimalError::InvalidComparable("bad digit"));
        }
        if digits.first() == Some(&b'0') || digits.last() == Some(&b'0') {
            return Err(DecimalError::InvalidComparable("not normalised"));
        }
        let magnitude = BigInt::parse_bytes(digits, 10)
            .ok_or(DecimalError::InvalidComparable("bad digit"))?;
        let unscaled = if negative { -magnitude } else { magnitude };
        let scale = (digits.len() as i64)
            .checked_sub(exponent)
            .ok_or(DecimalError::InvalidComparable("exponent out of range"))?;
        Ok(Self(BigDecimal::new(unscaled, scale)))
    }

    /// Encode to the serialized big-decimal wire form.
    ///
    /// The second element is `true` when the scale does not fit in 32 bits;
    /// the scale is then clamped and the output no longer equals `self`.
    pub fn encode_serialized_big_decimal(&self) -> (Vec<u8>, bool) {
        let (unscaled, scale) = self.0.as_bigint_and_exponent();
        let (scale, out_of_range) = match i32::try_from(scale) {
            Ok(scale) => (scale, false),
            Err(_) if scale < 0 => (i32::MIN, true),
            Err(_) => (i32::MAX, true),
        };

        let unscaled = unscaled.to_signed_bytes_be();
        let mut out = Vec::with_capacity(4 + unscaled.len());
        out.extend_from_slice(&scale.to_be_bytes());
        out.extend_from_slice(&unscaled);
        (out, out_of_range)
    }

    /// Decode the serialized big-decimal wire form.
    pub fn decode_serialized_big_decimal(bytes: &[u8]) -> Result<Self, DecimalError> {
        if bytes.len() < 5 {
            return Err(DecimalError::InvalidSerialized("too short"));
        }
        let scale = i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let unscaled = BigInt::from_signed_bytes_be(&bytes[4..]);
        Ok(Self(BigDecimal::new(unscaled, i64::from(scale)).normalized()))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    /// Parse `[+-]digits[.digits][(e|E)[+-]digits]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DecimalError::Parse(s.to_string());

        // The exponent is applied here so an out-of-range result is an error.
        let (mantissa, exp) = match s.find(['e', 'E']) {
            Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
            None => (s, None),
        };
        let body = mantissa.strip_prefix(['+', '-']).unwrap_or(mantissa);
        if !body.bytes().any(|b| b.is_ascii_digit())
            || !body.bytes().all(|b| b.is_ascii_digit() || b == b'.')
            || body.matches('.').count() > 1
        {
            return Err(err());
        }
        let exp: i64 = match exp {
            Some(text) => text.parse().map_err(|_| err())?,
            None => 0,
        };

        let mantissa = BigDecimal::from_str(mantissa).map_err(|_| err())?.normalized();
        let (unscaled, scale) = mantissa.into_bigint_and_exponent();
        if unscaled.is_zero() {
            return Ok(Self::zero());
        }
        let scale = scale.checked_sub(exp).ok_or_else(err)?;
        Self::from_normalized(unscaled, scale).ok_or_else(err)
    }
}

impl From<i64> for Decimal {
    fn from(v: i64) -> Self {
        Self(BigDecimal::from(v).normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("valid decimal")
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(dec("123.450").to_string(), "123.45");
        assert_eq!(dec("-0.00100").to_string(), "-0.001");
        assert_eq!(dec("+7").to_string(), "7");
        assert_eq!(dec("0.000").to_string(), "0");
        assert_eq!(dec("-0").to_string(), "0");
        assert_eq!(dec(".5").to_string(), "0.5");
        assert_eq!(dec("5.").to_string(), "5");
        assert_eq!(dec("1.25E-2").to_string(), "0.0125");
        assert_eq!(dec("1.5e3"), dec("1500"));
        assert_eq!(dec("0e-9223372036854775808"), Decimal::zero());
    }

    #[test]
    fn test_display_parses_back() {
        for s in ["1500", "1.2e100", "-3e-50", "-1200", "9e300", "4.5e-7"] {
            let d = dec(s);
            assert_eq!(dec(&d.to_string()), d, "{} displayed as {}", s, d);
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in [
            "", "-", ".", "1.2.3", "abc", "1e", "1e+", "1 2", "0x10", "1_0", "e5", "1e99999999999999999999",
        ] {
            assert!(bad.parse::<Decimal>().is_err(), "{:?} should not parse", bad);
        }
    }

    #[test]
    fn test_parse_rejects_exponent_overflow() {
        // scale 2 - i64::MIN does not fit
        assert!(".05e-9223372036854775808".parse::<Decimal>().is_err());
        // scale fits but the normalised exponent 1 + i64::MAX does not
        assert!("1e9223372036854775807".parse::<Decimal>().is_err());

        let edge = dec("5e-9223372036854775807");
        let bytes = edge.encode_comparable();
        assert_eq!(Decimal::decode_comparable(&bytes).expect("decode"), edge);
    }

    #[test]
    fn test_comparable_roundtrip() {
        for s in ["0", "1", "-1", "123.456", "-0.0001", "9e300", "-9e-300"] {
            let d = dec(s);
            let bytes = d.encode_comparable();
            assert_eq!(Decimal::decode_comparable(&bytes).expect("decode"), d);
        }
    }

    #[test]
    fn test_comparable_layout() {
        // 12.5 = 0.125 x 10^2
        let mut expected = vec![POSITIVE];
        expected.extend_from_slice(&(2u64 ^ EXPONENT_BIAS).to_be_bytes());
        expected.extend_from_slice(b"125");
        expected.push(TERMINATOR);
        assert_eq!(dec("12.5").encode_comparable(), expected);

        let negative = dec("-12.5").encode_comparable();
        assert_eq!(negative[0], NEGATIVE);
        let tail: Vec<u8> = negative[1..].iter().map(|b| !b).collect();
        assert_eq!(tail, expected[1..]);

        assert_eq!(Decimal::zero().encode_comparable(), vec![ZERO]);
    }

    #[test]
    fn test_comparable_order() {
        let ordered = [
            "-1e10", "-100", "-10.5", "-10", "-1", "-0.5", "-0.05", "0", "0.05", "0.5", "1", "1.05",
            "10", "10.5", "100", "1e10",
        ];
        let encoded: Vec<Vec<u8>> = ordered.iter().map(|s| dec(s).encode_comparable()).collect();
        for pair in encoded.windows(2) {
            assert!(pair[0] < pair[1], "{:?} !< {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_decode_comparable_rejects_malformed() {
        assert!(Decimal::decode_comparable(&[]).is_err());
        assert!(Decimal::decode_comparable(&[ZERO, 0]).is_err());
        assert!(Decimal::decode_comparable(&[0x7F]).is_err());
        assert!(Decimal::decode_comparable(&[POSITIVE, 1, 2]).is_err());

        let mut bytes = dec("12").encode_comparable();
        let last = bytes.len() - 1;
        bytes[last] = b'5';
        assert!(Decimal::decode_comparable(&bytes).is_err());

        // trailing zero digit is not normalised
        let mut bytes = vec![POSITIVE];
        bytes.extend_from_slice(&(2u64 ^ EXPONENT_BIAS).to_be_bytes());
        bytes.extend_from_slice(b"10");
        bytes.push(TERMINATOR);
        assert_eq!(
            Decimal::decode_comparable(&bytes),
            Err(DecimalError::InvalidComparable("not normalised"))
        );
    }

    #[test]
    fn test_serialized_big_decimal_known_vectors() {
        // 123.45 -> scale 2, unscaled 12345 = 0x3039
        let (bytes, overflow) = dec("123.45").encode_serialized_big_decimal();
        assert!(!overflow);
        assert_eq!(bytes, vec![0, 0, 0, 2, 0x30, 0x39]);

        // -1 -> scale 0, unscaled 0xFF
        let (bytes, _) = dec("-1").encode_serialized_big_decimal();
        assert_eq!(bytes, vec![0, 0, 0, 0, 0xFF]);

        // 128 -> needs a sign byte
        let (bytes, _) = dec("128").encode_serialized_big_decimal();
        assert_eq!(bytes, vec![0, 0, 0, 0, 0x00, 0x80]);

        // -128 -> single byte
        let (bytes, _) = dec("-128").encode_serialized_big_decimal();
        assert_eq!(bytes, vec![0, 0, 0, 0, 0x80]);

        // -256
        let (bytes, _) = dec("-256").encode_serialized_big_decimal();
        assert_eq!(bytes, vec![0, 0, 0, 0, 0xFF, 0x00]);

        // 1500 normalises to 15 x 10^2 -> scale -2
        let (bytes, _) = dec("1500").encode_serialized_big_decimal();
        assert_eq!(bytes, vec![0xFF, 0xFF, 0xFF, 0xFE, 0x0F]);

        let (bytes, _) = Decimal::zero().encode_serialized_big_decimal();
        assert_eq!(bytes, vec![0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_serialized_big_decimal_roundtrip() {
        for s in [
            "0",
            "1",
            "-1",
            "3.14159",
            "-2.5e-7",
            "123456789012345678901234567890.123456789",
            "-99999999999999999999999999999999999999",
            "4294967296",
            "-4294967296",
        ] {
            let d = dec(s);
            let (bytes, overflow) = d.encode_serialized_big_decimal();
            assert!(!overflow);
            assert_eq!(Decimal::decode_serialized_big_decimal(&bytes).expect("decode"), d, "{}", s);
        }
    }

    #[test]
    fn test_decode_non_minimal_big_decimal() {
        // 00 00 01 00 with scale 1 -> 25.6
        let d = Decimal::decode_serialized_big_decimal(&[0, 0, 0, 1, 0, 0, 1, 0]).expect("decode");
        assert_eq!(d.to_string(), "25.6");
        // trailing zeros in the unscaled value normalise away: 1500 scale 3 -> 1.5
        let d = Decimal::decode_serialized_big_decimal(&[0, 0, 0, 3, 0x05, 0xDC]).expect("decode");
        assert_eq!(d.to_string(), "1.5");
        assert_eq!(d.encode_serialized_big_decimal().0, vec![0, 0, 0, 1, 0x0F]);
    }

    #[test]
    fn test_big_decimal_scale_overflow_is_flagged() {
        let d = dec("1e-3000000000");
        let (bytes, overflow) = d.encode_serialized_big_decimal();
        assert!(overflow);
        assert_eq!(bytes, vec![0x7F, 0xFF, 0xFF, 0xFF, 0x01]);

        let d = dec("1e3000000000");
        let (bytes, overflow) = d.encode_serialized_big_decimal();
        assert!(overflow);
        assert_eq!(&bytes[..4], &i32::MIN.to_be_bytes());
    }

    #[test]
    fn test_decode_big_decimal_too_short() {
        assert!(Decimal::decode_serialized_big_decimal(&[0, 0, 0, 1]).is_err());
    }

    #[test]
    fn test_from_i64() {
        assert_eq!(Decimal::from(0).to_string(), "0");
        assert_eq!(Decimal::from(0), Decimal::zero());
        assert_eq!(Decimal::from(-1200), dec("-1200"));
        assert_eq!(Decimal::from(i64::MIN), dec(&i64::MIN.to_string()));
    }
}
