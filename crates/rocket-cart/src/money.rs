//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation so cart totals never drift the
//! way summed floating-point prices do.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Brazilian real, the storefront's currency.
    #[default]
    BRL,
    USD,
}

impl Currency {
    /// Get the currency code (e.g., "BRL").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BRL => "BRL",
            Currency::USD => "USD",
        }
    }

    /// Get the currency symbol (e.g., "R$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BRL => "R$",
            Currency::USD => "$",
        }
    }

    fn separators(&self) -> (char, char) {
        match self {
            Currency::BRL => ('.', ','),
            Currency::USD => (',', '.'),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount as sent by the API.
    ///
    /// ```
    /// use rocket_cart::money::{Money, Currency};
    /// let price = Money::from_decimal(179.9, Currency::BRL);
    /// assert_eq!(price.amount_cents, 17990);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * 100.0).round() as i64, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Try to add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Sum an iterator of Money values, returning None on currency mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }

    /// Format as a display string (e.g., "R$ 1.179,90").
    pub fn display(&self) -> String {
        let (group_sep, decimal_sep) = self.currency.separators();
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let cents = self.amount_cents.unsigned_abs();

        let whole = (cents / 100).to_string();
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(group_sep);
            }
            grouped.push(ch);
        }

        let space = if self.currency == Currency::BRL { " " } else { "" };
        format!(
            "{sign}{}{space}{grouped}{decimal_sep}{:02}",
            self.currency.symbol(),
            cents % 100
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(139.9, Currency::BRL).amount_cents, 13990);
        assert_eq!(Money::from_decimal(0.1 + 0.2, Currency::BRL).amount_cents, 30);
    }

    #[test]
    fn test_money_display_brl() {
        assert_eq!(Money::new(17990, Currency::BRL).display(), "R$ 179,90");
        assert_eq!(Money::new(117990, Currency::BRL).display(), "R$ 1.179,90");
        assert_eq!(Money::new(5, Currency::BRL).display(), "R$ 0,05");
    }

    #[test]
    fn test_money_display_usd() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(123456789, Currency::USD).display(), "$1,234,567.89");
        assert_eq!(Money::new(-150, Currency::USD).display(), "-$1.50");
    }

    #[test]
    fn test_money_multiply_and_sum() {
        let price = Money::new(1000, Currency::BRL);
        let line = price.try_multiply(3).unwrap();
        assert_eq!(line.amount_cents, 3000);

        let total = Money::try_sum([price, line].iter(), Currency::BRL).unwrap();
        assert_eq!(total.amount_cents, 4000);
    }

    #[test]
    fn test_money_currency_mismatch() {
        let brl = Money::new(1000, Currency::BRL);
        let usd = Money::new(1000, Currency::USD);
        assert!(brl.try_add(&usd).is_none());
        assert!(Money::try_sum([brl, usd].iter(), Currency::BRL).is_none());
    }

    #[test]
    fn test_money_overflow() {
        let big = Money::new(i64::MAX, Currency::BRL);
        assert!(big.try_multiply(2).is_none());
    }
}
