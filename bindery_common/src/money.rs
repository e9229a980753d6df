use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign},
};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sqlx::Type;
use thiserror::Error;

//--------------------------------------       Money         ---------------------------------------------------------
/// A currency amount in minor units (cents).
///
/// Stored in the database as a plain integer, and exchanged as decimal text ("12.34") at the API boundaries, since
/// that is how the upstream marketplaces represent amounts.
#[derive(Debug, Clone, Copy, Default, Type, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[sqlx(transparent)]
pub struct Money(i64);

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented as a money amount: {0}")]
pub struct MoneyConversionError(String);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Parses a decimal string ("12.34", "12.5", or "12") into a money amount. Negative amounts are rejected, since
    /// no upstream legitimately reports one.
    pub fn from_decimal_str(amount: &str) -> Result<Self, MoneyConversionError> {
        let amount = amount.trim();
        if amount.is_empty() {
            return Err(MoneyConversionError("empty string".to_string()));
        }
        if amount.starts_with('-') {
            return Err(MoneyConversionError(format!("negative amount: {amount}")));
        }
        let mut parts = amount.split('.');
        let whole = parts
            .next()
            .unwrap_or_default()
            .parse::<i64>()
            .map_err(|e| MoneyConversionError(format!("invalid amount: {amount}. {e}")))?;
        let cents = match parts.next() {
            None => 0,
            Some(frac) if !frac.is_empty() && frac.len() <= 2 => {
                let f = frac.parse::<i64>().map_err(|e| MoneyConversionError(format!("invalid amount: {amount}. {e}")))?;
                if frac.len() == 1 {
                    f * 10
                } else {
                    f
                }
            },
            Some(frac) => return Err(MoneyConversionError(format!("invalid fractional part: {frac}"))),
        };
        if parts.next().is_some() {
            return Err(MoneyConversionError(format!("invalid amount: {amount}")));
        }
        Ok(Self(whole * 100 + cents))
    }

    /// Converts a floating point amount of whole currency units, rounding to the nearest cent.
    pub fn from_f64(amount: f64) -> Result<Self, MoneyConversionError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(MoneyConversionError(format!("invalid amount: {amount}")));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self((amount * 100.0).round() as i64))
    }

    /// Applies a rate given in basis points, rounding half-up to the nearest cent.
    pub fn apply_rate_bps(&self, rate_bps: i64) -> Self {
        Self((self.0 * rate_bps + 5_000) / 10_000)
    }
}

impl From<i64> for Money {
    fn from(cents: i64) -> Self {
        Self(cents)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}{}.{:02}", (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MoneyVisitor;

        impl de::Visitor<'_> for MoneyVisitor {
            type Value = Money;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a decimal amount as a string or a number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
                Money::from_decimal_str(v).map_err(E::custom)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
                Money::from_f64(v).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
                Money::from_f64(v as f64).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
                Money::from_f64(v as f64).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(MoneyVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::Money;

    #[test]
    fn parses_decimal_strings() {
        assert_eq!(Money::from_decimal_str("12.34").unwrap().value(), 1234);
        assert_eq!(Money::from_decimal_str("12.5").unwrap().value(), 1250);
        assert_eq!(Money::from_decimal_str("12").unwrap().value(), 1200);
        assert_eq!(Money::from_decimal_str("0.00").unwrap().value(), 0);
        assert_eq!(Money::from_decimal_str(" 7.09 ").unwrap().value(), 709);
    }

    #[test]
    fn rejects_bad_amounts() {
        assert!(Money::from_decimal_str("-1.00").is_err());
        assert!(Money::from_decimal_str("").is_err());
        assert!(Money::from_decimal_str("12.345").is_err());
        assert!(Money::from_decimal_str("1.2.3").is_err());
        assert!(Money::from_decimal_str("abc").is_err());
        assert!(Money::from_f64(-0.5).is_err());
        assert!(Money::from_f64(f64::NAN).is_err());
    }

    #[test]
    fn displays_as_decimal_text() {
        assert_eq!(Money::from_cents(1234).to_string(), "12.34");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn negative_amounts_keep_their_sign() {
        assert_eq!(Money::from_cents(-50).to_string(), "-0.50");
        assert_eq!(Money::from_cents(-1234).to_string(), "-12.34");
        assert_eq!(Money::from_cents(-100).to_string(), "-1.00");
    }

    #[test]
    fn serde_accepts_strings_and_numbers() {
        let m: Money = serde_json::from_str("\"12.34\"").unwrap();
        assert_eq!(m.value(), 1234);
        let m: Money = serde_json::from_str("12.34").unwrap();
        assert_eq!(m.value(), 1234);
        let m: Money = serde_json::from_str("12").unwrap();
        assert_eq!(m.value(), 1200);
        assert_eq!(serde_json::to_string(&Money::from_cents(709)).unwrap(), "\"7.09\"");
    }

    #[test]
    fn rate_application_rounds_half_up() {
        // 10% royalty rate
        assert_eq!(Money::from_cents(3000).apply_rate_bps(1000).value(), 300);
        assert_eq!(Money::from_cents(500).apply_rate_bps(1000).value(), 50);
        // 0.5 of a cent rounds up, 0.4 rounds down
        assert_eq!(Money::from_cents(5).apply_rate_bps(1000).value(), 1);
        assert_eq!(Money::from_cents(4).apply_rate_bps(1000).value(), 0);
    }
}
