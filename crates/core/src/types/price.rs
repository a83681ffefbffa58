//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are currency-agnostic: the storefront sells in a single currency,
//! so only the amount is stored. On the wire a price is a plain JSON number.

use core::fmt;
use core::ops::Mul;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is zero or negative.
    #[error("price must be positive (got {0})")]
    NotPositive(Decimal),

    /// The amount is above [`MAX_PRICE_UNITS`].
    #[error("price must be at most {MAX_PRICE_UNITS} (got {0})")]
    TooLarge(Decimal),
}

/// Largest accepted unit price, in whole currency units.
pub const MAX_PRICE_UNITS: u32 = 1_000_000_000;

/// A unit price.
///
/// ## Constraints
///
/// - Amount must be strictly positive
/// - Amount must not exceed [`MAX_PRICE_UNITS`]
///
/// ## Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use seko_core::Price;
///
/// let price = Price::new(Decimal::from(160)).unwrap();
/// assert_eq!(price * 3, Decimal::from(480));
/// assert!(Price::new(Decimal::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "PriceRepr", into = "PriceRepr")]
pub struct Price(Decimal);

impl Price {
    /// Create a price from a positive amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotPositive`] if `amount <= 0` and
    /// [`PriceError::TooLarge`] above [`MAX_PRICE_UNITS`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive(amount));
        }
        if amount > Decimal::from(MAX_PRICE_UNITS) {
            return Err(PriceError::TooLarge(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of currency units.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotPositive`] if `units` is zero and
    /// [`PriceError::TooLarge`] above [`MAX_PRICE_UNITS`].
    pub fn from_units(units: u32) -> Result<Self, PriceError> {
        Self::new(Decimal::from(units))
    }

    /// Get the underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

/// Line total. Saturates at `Decimal::MAX` instead of overflowing.
impl Mul<u32> for Price {
    type Output = Decimal;

    fn mul(self, quantity: u32) -> Decimal {
        self.0
            .checked_mul(Decimal::from(quantity))
            .unwrap_or(Decimal::MAX)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct PriceRepr(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl TryFrom<PriceRepr> for Price {
    type Error = PriceError;

    fn try_from(repr: PriceRepr) -> Result<Self, Self::Error> {
        Self::new(repr.0)
    }
}

impl From<Price> for PriceRepr {
    fn from(price: Price) -> Self {
        Self(price.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive() {
        assert_eq!(
            Price::new(Decimal::ZERO),
            Err(PriceError::NotPositive(Decimal::ZERO))
        );
        assert!(Price::new(Decimal::from(-5)).is_err());
    }

    #[test]
    fn test_rejects_amounts_above_cap() {
        assert!(Price::from_units(MAX_PRICE_UNITS).is_ok());
        let too_much = Decimal::from(MAX_PRICE_UNITS) + Decimal::ONE;
        assert_eq!(Price::new(too_much), Err(PriceError::TooLarge(too_much)));
        assert!(Price::new(Decimal::MAX / Decimal::TWO).is_err());
        assert!(serde_json::from_str::<Price>("1e15").is_err());
    }

    #[test]
    fn test_largest_line_total_does_not_overflow() {
        let price = Price::from_units(MAX_PRICE_UNITS).unwrap();
        assert_eq!(
            price * u32::MAX,
            Decimal::from(MAX_PRICE_UNITS) * Decimal::from(u32::MAX)
        );
    }

    #[test]
    fn test_multiply_by_quantity() {
        let price = Price::from_units(175).unwrap();
        assert_eq!(price * 2, Decimal::from(350));
        assert_eq!(price * 0, Decimal::ZERO);
    }

    #[test]
    fn test_display() {
        let price = Price::new(Decimal::new(1999, 2)).unwrap();
        assert_eq!(price.to_string(), "$19.99");
    }

    #[test]
    fn test_serializes_as_number() {
        let price = Price::from_units(170).unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "170.0");
        let parsed: Price = serde_json::from_str("160").unwrap();
        assert_eq!(parsed.amount(), Decimal::from(160));
    }

    #[test]
    fn test_deserialize_rejects_zero() {
        assert!(serde_json::from_str::<Price>("0").is_err());
    }
}
