//! Monetary amounts in integer minor units.
//!
//! Share capital, prices, and fees are carried as euro cents so every
//! arithmetic step stays exact. All operations are checked; overflow is a
//! caller-visible error, never a wrap.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A euro amount in cents.
///
/// The inner value may be negative while intermediate arithmetic runs;
/// entity constructors reject negative capital and prices at the edges.
///
/// # Examples
/// ```
/// use engine::domain::Money;
///
/// let price = Money::from_cents(1_500);
/// assert_eq!(price.cents(), 1_500);
/// assert_eq!(price.to_string(), "15.00");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Build an amount from cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Build an amount from whole euros, failing on overflow.
    ///
    /// # Examples
    /// ```
    /// use engine::domain::Money;
    ///
    /// assert_eq!(Money::from_euros(10), Some(Money::from_cents(1_000)));
    /// assert_eq!(Money::from_euros(i64::MAX), None);
    /// ```
    pub const fn from_euros(euros: i64) -> Option<Self> {
        match euros.checked_mul(100) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// The amount in cents.
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Whether the amount is strictly negative.
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Whether the amount is zero.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Checked subtraction.
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Multiply a per-unit amount by a unit count, failing on overflow.
    ///
    /// # Examples
    /// ```
    /// use engine::domain::Money;
    ///
    /// let unit_price = Money::from_cents(1_500);
    /// assert_eq!(unit_price.checked_mul_count(200), Some(Money::from_cents(300_000)));
    /// ```
    pub fn checked_mul_count(self, count: u64) -> Option<Self> {
        let count = i64::try_from(count).ok()?;
        self.0.checked_mul(count).map(Self)
    }
}

impl fmt::Display for Money {
    #[expect(
        clippy::integer_division,
        clippy::integer_division_remainder_used,
        reason = "cents split exactly into euros and a two-digit remainder"
    )]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let euros = abs / 100;
        let rem = abs % 100;
        write!(f, "{sign}{euros}.{rem:02}")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, "0.00")]
    #[case(1, "0.01")]
    #[case(1_000_000, "10000.00")]
    #[case(-2_905, "-29.05")]
    fn display_renders_euros_and_cents(#[case] cents: i64, #[case] rendered: &str) {
        assert_eq!(Money::from_cents(cents).to_string(), rendered);
    }

    #[rstest]
    fn checked_mul_count_detects_overflow() {
        let unit = Money::from_cents(i64::MAX);
        assert_eq!(unit.checked_mul_count(2), None);
        assert_eq!(unit.checked_mul_count(u64::MAX), None);
    }

    #[rstest]
    fn checked_arithmetic_round_trips() {
        let a = Money::from_cents(1_000);
        let b = Money::from_cents(250);
        let sum = a.checked_add(b).expect("no overflow");
        assert_eq!(sum.checked_sub(b), Some(a));
    }
}
