//! Decimal-string numerics for order fields.
//!
//! Every 256-bit quantity in the protocol wire format (amounts, token ids,
//! salts, nonces, fee amounts) travels as a decimal string. This module
//! provides the [`TokenAmount`] newtype that enforces that representation,
//! plus the parsing primitives used to normalize user-supplied numeric
//! strings: plain decimal, exponential notation, and fixed-point
//! human-readable amounts.

use alloy_primitives::{I256, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Errors from parsing or converting numeric strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum NumericError {
    /// The input was empty.
    #[error("empty numeric string")]
    Empty,
    /// The input contained characters other than decimal digits.
    #[error("'{0}' is not a decimal integer string")]
    NotDecimal(String),
    /// A negative value was supplied where an unsigned one is required.
    #[error("'{0}' is negative")]
    Negative(String),
    /// The value does not fit in the target integer width.
    #[error("'{0}' overflows the target integer width")]
    Overflow(String),
    /// The value has a fractional component that cannot be represented.
    #[error("'{0}' has a fractional component")]
    Fractional(String),
    /// The exponent of an exponential-notation value could not be parsed.
    #[error("'{0}' has a malformed exponent")]
    MalformedExponent(String),
}

/// A 256-bit unsigned quantity that serializes as a decimal string.
///
/// Used for every numeric order field on the wire: asset amounts, token ids,
/// fees, salts, nonces, and expiration timestamps. Serializing as `"123"`
/// rather than `123` avoids precision loss in consumers whose JSON number
/// type cannot represent the full range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(U256);

impl TokenAmount {
    /// Zero.
    pub const ZERO: Self = Self(U256::ZERO);

    /// One. Used for single-unit NFT amounts and MultiAsset placeholders.
    pub const ONE: Self = Self(U256::ONE);

    /// Wraps a raw [`U256`].
    #[must_use]
    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    /// Returns the inner [`U256`].
    #[must_use]
    pub const fn inner(&self) -> U256 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parses a numeric string, accepting exponential notation
    /// (`"1.5e18"`) in addition to plain decimal digits.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError`] for empty, non-numeric, negative,
    /// fractional, or overflowing input.
    pub fn parse(s: &str) -> Result<Self, NumericError> {
        parse_u256(s).map(Self)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TokenAmount {
    type Err = NumericError;

    /// Strict decimal parsing; exponential notation is rejected here.
    /// Use [`TokenAmount::parse`] for lenient user input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_plain_decimal(s).map(Self)
    }
}

impl From<u64> for TokenAmount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u128> for TokenAmount {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for TokenAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<TokenAmount> for U256 {
    fn from(value: TokenAmount) -> Self {
        value.0
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses an unsigned 256-bit integer from a decimal string, normalizing
/// exponential notation first.
///
/// # Errors
///
/// Returns [`NumericError`] for empty, non-numeric, negative, fractional,
/// or overflowing input.
pub fn parse_u256(s: &str) -> Result<U256, NumericError> {
    let trimmed = s.trim();
    if trimmed.contains(['e', 'E']) {
        let normalized = normalize_exponential(trimmed)?;
        parse_plain_decimal(&normalized)
    } else {
        parse_plain_decimal(trimmed)
    }
}

/// Parses a signed 256-bit integer from a decimal string, normalizing
/// exponential notation first.
///
/// # Errors
///
/// Returns [`NumericError`] for malformed or out-of-range input.
pub fn parse_i256(s: &str) -> Result<I256, NumericError> {
    let trimmed = s.trim();
    let normalized = if trimmed.contains(['e', 'E']) {
        normalize_exponential(trimmed)?
    } else {
        trimmed.to_owned()
    };
    let (negative, digits) = match normalized.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, normalized.as_str()),
    };
    let magnitude = parse_plain_decimal(digits)?;
    if negative {
        // |I256::MIN| = 2^255
        let min_magnitude = U256::ONE << 255;
        if magnitude > min_magnitude {
            return Err(NumericError::Overflow(s.to_owned()));
        }
        Ok(I256::from_raw(magnitude.wrapping_neg()))
    } else {
        if magnitude.bit(255) {
            return Err(NumericError::Overflow(s.to_owned()));
        }
        Ok(I256::from_raw(magnitude))
    }
}

/// Expands exponential notation (`"1.5e3"`, `"2E18"`, `"-4e2"`) into a plain
/// decimal integer string.
///
/// # Errors
///
/// Returns [`NumericError::Fractional`] when the value is not an integer
/// (e.g. `"1.5e0"` or `"1e-2"`), and [`NumericError::MalformedExponent`]
/// when the exponent is unparseable.
pub fn normalize_exponential(s: &str) -> Result<String, NumericError> {
    let trimmed = s.trim();
    let Some(split_at) = trimmed.find(['e', 'E']) else {
        return Ok(trimmed.to_owned());
    };
    let (mantissa, exp_str) = trimmed.split_at(split_at);
    let exponent: i64 = exp_str[1..]
        .parse()
        .map_err(|_| NumericError::MalformedExponent(s.to_owned()))?;

    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(NumericError::Empty);
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(NumericError::NotDecimal(s.to_owned()));
    }

    let mut digits = format!("{int_part}{frac_part}");
    // Shifting the decimal point right by `exponent` must consume the
    // fractional digits exactly, or the value is not an integer.
    let shift = exponent.saturating_sub(i64::try_from(frac_part.len()).unwrap_or(i64::MAX));
    if shift >= 0 {
        for _ in 0..shift {
            digits.push('0');
        }
    } else {
        let cut = usize::try_from(-shift).map_err(|_| NumericError::Fractional(s.to_owned()))?;
        if cut > digits.len() || !digits[digits.len() - cut..].bytes().all(|b| b == b'0') {
            return Err(NumericError::Fractional(s.to_owned()));
        }
        digits.truncate(digits.len() - cut);
    }

    let stripped = digits.trim_start_matches('0');
    let stripped = if stripped.is_empty() { "0" } else { stripped };
    if stripped == "0" {
        Ok("0".to_owned())
    } else {
        Ok(format!("{sign}{stripped}"))
    }
}

/// Converts a human-readable fixed-point amount (`"1.5"`) into base units
/// (`1500000000000000000` for 18 decimals).
///
/// The human side is parsed with [`rust_decimal`], which bounds it to 28
/// significant digits; the scaled result is a full [`U256`].
///
/// # Errors
///
/// Returns [`NumericError`] for malformed input, negative amounts, or
/// amounts with more fractional digits than `decimals`.
pub fn to_base_units(amount: &str, decimals: u8) -> Result<U256, NumericError> {
    let parsed =
        Decimal::from_str(amount.trim()).map_err(|_| NumericError::NotDecimal(amount.to_owned()))?;
    if parsed.is_sign_negative() {
        return Err(NumericError::Negative(amount.to_owned()));
    }
    let parsed = parsed.normalize();
    let scale = parsed.scale();
    if scale > u32::from(decimals) {
        return Err(NumericError::Fractional(amount.to_owned()));
    }
    let mantissa = U256::from(parsed.mantissa().unsigned_abs());
    let shift = u32::from(decimals) - scale;
    mantissa
        .checked_mul(U256::from(10u8).pow(U256::from(shift)))
        .ok_or_else(|| NumericError::Overflow(amount.to_owned()))
}

/// Formats a base-unit value as a human-readable fixed-point string
/// (`1500000000000000000` with 18 decimals → `"1.5"`).
#[must_use]
pub fn from_base_units(value: U256, decimals: u8) -> String {
    let raw = value.to_string();
    if decimals == 0 {
        return raw;
    }
    let decimals = usize::from(decimals);
    let padded = if raw.len() <= decimals {
        format!("{raw:0>width$}", width = decimals + 1)
    } else {
        raw
    };
    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        int_part.to_owned()
    } else {
        format!("{int_part}.{frac_part}")
    }
}

fn parse_plain_decimal(s: &str) -> Result<U256, NumericError> {
    if s.is_empty() {
        return Err(NumericError::Empty);
    }
    if s.starts_with('-') {
        return Err(NumericError::Negative(s.to_owned()));
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NumericError::NotDecimal(s.to_owned()));
    }
    U256::from_str_radix(s, 10).map_err(|_| NumericError::Overflow(s.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_amount_serializes_as_decimal_string() {
        let amount = TokenAmount::from(1_000_000u64);
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"1000000\"");
    }

    #[test]
    fn token_amount_rejects_hex_and_floats() {
        assert!(serde_json::from_str::<TokenAmount>("\"0x10\"").is_err());
        assert!(serde_json::from_str::<TokenAmount>("\"1.5\"").is_err());
        assert!(serde_json::from_str::<TokenAmount>("\"-1\"").is_err());
        assert!(serde_json::from_str::<TokenAmount>("\"\"").is_err());
    }

    #[test]
    fn token_amount_roundtrip() {
        let original = TokenAmount::parse(
            "16067189784881358057906593238688655078558518561185118904709866293383414615588",
        )
        .unwrap();
        let json = serde_json::to_string(&original).unwrap();
        let back: TokenAmount = serde_json::from_str(&json).unwrap();
        assert_eq!(original, back);
    }

    #[test]
    fn normalize_exponential_expands() {
        assert_eq!(normalize_exponential("1.5e3").unwrap(), "1500");
        assert_eq!(normalize_exponential("2E18").unwrap(), "2000000000000000000");
        assert_eq!(normalize_exponential("1.50e2").unwrap(), "150");
        assert_eq!(normalize_exponential("-4e2").unwrap(), "-400");
        assert_eq!(normalize_exponential("0e5").unwrap(), "0");
        assert_eq!(normalize_exponential("123").unwrap(), "123");
    }

    #[test]
    fn normalize_exponential_rejects_fractions() {
        assert!(matches!(
            normalize_exponential("1.5e0"),
            Err(NumericError::Fractional(_))
        ));
        assert!(matches!(
            normalize_exponential("1e-2"),
            Err(NumericError::Fractional(_))
        ));
        assert!(matches!(
            normalize_exponential("1.23e1"),
            Err(NumericError::Fractional(_))
        ));
    }

    #[test]
    fn parse_u256_accepts_exponential() {
        assert_eq!(parse_u256("1.5e18").unwrap(), U256::from(1_500_000_000_000_000_000u64));
        assert_eq!(parse_u256("42").unwrap(), U256::from(42u64));
    }

    #[test]
    fn parse_u256_rejects_negative() {
        assert!(matches!(parse_u256("-42"), Err(NumericError::Negative(_))));
    }

    #[test]
    fn parse_i256_signs() {
        assert_eq!(parse_i256("-42").unwrap(), I256::try_from(-42i64).unwrap());
        assert_eq!(parse_i256("42").unwrap(), I256::try_from(42i64).unwrap());
        assert_eq!(
            parse_i256("-1.5e2").unwrap(),
            I256::try_from(-150i64).unwrap()
        );
    }

    #[test]
    fn fixed_point_conversion() {
        assert_eq!(
            to_base_units("1.5", 18).unwrap(),
            U256::from(1_500_000_000_000_000_000u64)
        );
        assert_eq!(to_base_units("0.000001", 6).unwrap(), U256::from(1u64));
        assert!(matches!(
            to_base_units("0.0000001", 6),
            Err(NumericError::Fractional(_))
        ));
        assert!(matches!(
            to_base_units("-1", 6),
            Err(NumericError::Negative(_))
        ));
    }

    #[test]
    fn fixed_point_formatting() {
        assert_eq!(
            from_base_units(U256::from(1_500_000_000_000_000_000u64), 18),
            "1.5"
        );
        assert_eq!(from_base_units(U256::from(1u64), 6), "0.000001");
        assert_eq!(from_base_units(U256::from(5_000_000u64), 6), "5");
        assert_eq!(from_base_units(U256::from(42u64), 0), "42");
    }
}
