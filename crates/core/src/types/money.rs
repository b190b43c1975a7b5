//! Monetary amounts with decimal arithmetic.
//!
//! Prices arrive from the backend in two shapes: a bare JSON number (`49`,
//! `49.99`) or a currency-prefixed string (`"$49"`). [`Money`] normalizes
//! both into a single [`Decimal`] representation at the deserialization
//! boundary, so nothing deeper in the call stack branches on the wire shape.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`Money`] value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// No digits remained after stripping non-numeric characters.
    #[error("no numeric value in {0:?}")]
    Unparsable(String),
}

/// A monetary amount in the base currency (USD).
///
/// Stored as a [`Decimal`] in the currency's standard unit (dollars, not
/// cents). Display conversion into other currencies is a pure function of a
/// rate table (see [`crate::types::currency`]) and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a money value from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Parse a money value from a possibly currency-prefixed string.
    ///
    /// Strips every character except ASCII digits and the decimal point
    /// before parsing, so `"$49"`, `"49.99"` and `" 1,299 "` all work.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Unparsable`] if no parseable number remains.
    pub fn parse_lenient(input: &str) -> Result<Self, MoneyError> {
        let cleaned: String = input
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();

        Decimal::from_str(&cleaned)
            .map(Self)
            .map_err(|_| MoneyError::Unparsable(input.to_string()))
    }

    /// Total for a cart line: price multiplied by quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0 * Decimal::from(quantity)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Money {
    /// Base-currency rendering, e.g. `$49.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // The backend stores prices as plain decimal strings ("9.99").
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl Visitor<'_> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a price string like \"$49\"")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Money(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Money(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // Round-trip through the shortest decimal rendering of the float,
        // which is the literal the backend serialized in the first place.
        Decimal::from_str(&v.to_string())
            .map(Money)
            .map_err(|_| E::invalid_value(de::Unexpected::Float(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Money::parse_lenient(v).map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_lenient_prefixed() {
        assert_eq!(Money::parse_lenient("$49").unwrap(), Money::new(dec("49")));
        assert_eq!(
            Money::parse_lenient("$1,299.50").unwrap(),
            Money::new(dec("1299.50"))
        );
    }

    #[test]
    fn test_parse_lenient_plain() {
        assert_eq!(
            Money::parse_lenient("49.99").unwrap(),
            Money::new(dec("49.99"))
        );
    }

    #[test]
    fn test_parse_lenient_garbage() {
        assert!(matches!(
            Money::parse_lenient("free"),
            Err(MoneyError::Unparsable(_))
        ));
        assert!(Money::parse_lenient("").is_err());
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let from_number: Money = serde_json::from_str("49").unwrap();
        let from_float: Money = serde_json::from_str("49.0").unwrap();
        let from_string: Money = serde_json::from_str("\"$49\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_float.amount(), dec("49"));
    }

    #[test]
    fn test_times() {
        let price = Money::new(dec("49"));
        assert_eq!(price.times(2), dec("98"));
        assert_eq!(price.times(0), Decimal::ZERO);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(dec("49")).to_string(), "$49.00");
        assert_eq!(Money::new(dec("9.9")).to_string(), "$9.90");
    }
}
