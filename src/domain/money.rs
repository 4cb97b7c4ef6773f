//! Monetary amounts held as integer cents.
//!
//! Prices are stored in the database as `BIGINT` cents and every total the
//! service reports is an exact integer sum, never a float aggregation.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("amount is out of range")]
pub struct AmountOutOfRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn zero() -> Self {
        Money(0)
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn try_add(self, rhs: Money) -> Result<Money, AmountOutOfRange> {
        self.0.checked_add(rhs.0).map(Money).ok_or(AmountOutOfRange)
    }

    /// Line total: unit price times quantity.
    pub fn try_mul(self, quantity: i32) -> Result<Money, AmountOutOfRange> {
        self.0.checked_mul(i64::from(quantity)).map(Money).ok_or(AmountOutOfRange)
    }

    pub fn try_sum<I>(amounts: I) -> Result<Money, AmountOutOfRange>
    where
        I: IntoIterator<Item = Money>
    {
        amounts.into_iter().try_fold(Money::zero(), Money::try_add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}
