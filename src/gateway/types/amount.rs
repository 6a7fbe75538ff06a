//! Integer amounts accepted at the API boundary
//!
//! Prices and quantities reach the gateway either as JSON numbers or as
//! strings of decimal digits. [`StrictUint`] accepts both and rejects
//! everything else at the Serde layer, so the decoded request only ever
//! holds plain `u64` values.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

/// Non-negative integer that may be written as `5` or `"5"`.
///
/// Rejected formats:
/// - negative numbers (`-1`, `"-1"`)
/// - fractions and exponents (`1.5`, `"1.5"`, `"1e3"`)
/// - empty or blank strings
/// - a leading `+`
/// - values above `u64::MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrictUint(u64);

impl StrictUint {
    pub fn get(self) -> u64 {
        self.0
    }

    /// Parse the string form. Surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Result<Self, String> {
        let digits = s.trim();
        if digits.is_empty() {
            return Err("amount cannot be empty".to_string());
        }
        if digits.starts_with('-') {
            return Err(format!("amount cannot be negative: {}", s));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("amount must be a whole number: {}", s));
        }
        digits
            .parse::<u64>()
            .map(StrictUint)
            .map_err(|_| format!("amount is too large: {}", s))
    }
}

struct StrictUintVisitor;

impl<'de> Visitor<'de> for StrictUintVisitor {
    type Value = StrictUint;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative integer or a string of decimal digits")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<StrictUint, E> {
        Ok(StrictUint(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<StrictUint, E> {
        u64::try_from(v)
            .map(StrictUint)
            .map_err(|_| E::custom(format!("amount cannot be negative: {}", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<StrictUint, E> {
        // serde_json hands integers past u64::MAX over as f64
        if v.fract() == 0.0 && v >= u64::MAX as f64 {
            return Err(E::custom(format!("amount is too large: {}", v)));
        }
        Err(E::custom(format!("amount must be a whole number: {}", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<StrictUint, E> {
        StrictUint::parse(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for StrictUint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(StrictUintVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_number() {
        let v: StrictUint = serde_json::from_str("100").unwrap();
        assert_eq!(v.get(), 100);
    }

    #[test]
    fn test_accepts_digit_string() {
        let v: StrictUint = serde_json::from_str(r#""100""#).unwrap();
        assert_eq!(v.get(), 100);
    }

    #[test]
    fn test_accepts_padded_string() {
        let v: StrictUint = serde_json::from_str(r#"" 42 ""#).unwrap();
        assert_eq!(v.get(), 42);
    }

    #[test]
    fn test_accepts_zero() {
        // Zero is a valid price; quantity rules live in the order validator
        let v: StrictUint = serde_json::from_str("0").unwrap();
        assert_eq!(v.get(), 0);
    }

    #[test]
    fn test_rejects_negative_number() {
        let err = serde_json::from_str::<StrictUint>("-5").unwrap_err();
        assert!(err.to_string().contains("cannot be negative"));
    }

    #[test]
    fn test_rejects_negative_string() {
        let err = serde_json::from_str::<StrictUint>(r#""-5""#).unwrap_err();
        assert!(err.to_string().contains("cannot be negative"));
    }

    #[test]
    fn test_rejects_fraction() {
        let err = serde_json::from_str::<StrictUint>("1.5").unwrap_err();
        assert!(err.to_string().contains("whole number"));
        let err = serde_json::from_str::<StrictUint>(r#""1.5""#).unwrap_err();
        assert!(err.to_string().contains("whole number"));
    }

    #[test]
    fn test_rejects_plus_sign_and_exponent() {
        assert!(serde_json::from_str::<StrictUint>(r#""+5""#).is_err());
        assert!(serde_json::from_str::<StrictUint>(r#""1e3""#).is_err());
    }

    #[test]
    fn test_rejects_empty() {
        let err = serde_json::from_str::<StrictUint>(r#""  ""#).unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_rejects_overflow() {
        let err = serde_json::from_str::<StrictUint>(r#""18446744073709551616""#).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_rejects_overflow_number() {
        let err = serde_json::from_str::<StrictUint>("18446744073709551616").unwrap_err();
        assert!(err.to_string().contains("too large"), "{}", err);

        let err = serde_json::from_str::<StrictUint>("1e3").unwrap_err();
        assert!(err.to_string().contains("whole number"), "{}", err);
    }

    #[test]
    fn test_rejects_wrong_type() {
        let err = serde_json::from_str::<StrictUint>("true").unwrap_err();
        assert!(err.to_string().contains("non-negative integer"));
    }
}
