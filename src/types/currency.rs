//! Money value type for the transaction engine
//!
//! Amounts and balances are carried as a dollars/cents pair with the sign
//! held in a separate flag, matching the ledger records the engine reads.

use super::error::PaymentError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dollars/cents money value with a separate sign flag
///
/// `cents` is always in `0..=99` and `dollars` is never negative; the sign of
/// the whole value lives in `is_negative`. Zero is never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyValue {
    dollars: i64,
    cents: u8,
    is_negative: bool,
}

impl CurrencyValue {
    pub const ZERO: CurrencyValue = CurrencyValue {
        dollars: 0,
        cents: 0,
        is_negative: false,
    };

    /// Create a value from its parts
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if `cents` is above 99 or `dollars` is negative.
    pub fn new(dollars: i64, cents: u8, is_negative: bool) -> Result<Self, PaymentError> {
        if cents > 99 {
            return Err(PaymentError::invalid_amount(
                &format!("{}.{}", dollars, cents),
                "cents must be between 0 and 99",
            ));
        }
        if dollars < 0 {
            return Err(PaymentError::invalid_amount(
                &format!("{}.{:02}", dollars, cents),
                "dollars must not be negative; use the sign flag",
            ));
        }

        Ok(Self {
            dollars,
            cents,
            is_negative: is_negative && (dollars != 0 || cents != 0),
        })
    }

    /// Create a value from a signed number of cents
    ///
    /// Cents of 100 or more carry into dollars, so `from_cents(250)` is `$2.50`.
    pub fn from_cents(total_cents: i64) -> Self {
        let magnitude = total_cents.unsigned_abs();
        Self {
            dollars: (magnitude / 100) as i64,
            cents: (magnitude % 100) as u8,
            is_negative: total_cents < 0,
        }
    }

    pub fn dollars(&self) -> i64 {
        self.dollars
    }

    pub fn cents(&self) -> u8 {
        self.cents
    }

    pub fn is_negative(&self) -> bool {
        self.is_negative
    }

    /// Balance used by the accept/decline rules
    ///
    /// Computed as `dollars + cents / 100` with integer division, so the
    /// sub-dollar part never contributes and the sign flag is not consulted.
    /// Ledgers compared on this value treat `$10.99` and `$10.00` alike.
    pub fn whole_dollars(&self) -> i64 {
        self.dollars + i64::from(self.cents) / 100
    }

    /// Convert to a two-decimal `Decimal`
    pub fn to_decimal(&self) -> Decimal {
        let cents = Decimal::from(self.dollars) * Decimal::ONE_HUNDRED + Decimal::from(self.cents);
        let value = cents / Decimal::ONE_HUNDRED;
        if self.is_negative {
            -value
        } else {
            value
        }
    }
}

impl TryFrom<Decimal> for CurrencyValue {
    type Error = PaymentError;

    /// Convert a decimal with at most two fractional digits
    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value.normalize().scale() > 2 {
            return Err(PaymentError::invalid_amount(
                &value.to_string(),
                "more than two decimal places",
            ));
        }

        let total_cents = (value * Decimal::ONE_HUNDRED)
            .to_i64()
            .ok_or_else(|| PaymentError::invalid_amount(&value.to_string(), "amount out of range"))?;

        Ok(Self::from_cents(total_cents))
    }
}

impl fmt::Display for CurrencyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars, self.cents)
    }
}
