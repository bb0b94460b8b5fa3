//! Capitalization arithmetic.
//!
//! Pure predicates over a company and its shareholder set. No I/O; the
//! rule engine and the calculator build on these.

use serde::Serialize;

use super::company::Company;
use super::money::Money;
use super::shareholder::{Shareholder, ShareholderId};

/// A supposedly-derived value cannot be computed exactly.
///
/// Carries the exact numbers involved so the operator can adjust the
/// capital or the share count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ArithmeticInconsistency {
    /// Share capital does not divide evenly over the share count.
    #[error(
        "share capital of {share_capital} does not divide into {total_shares} shares \
         to an exact cent"
    )]
    InexactNominalValue {
        /// Authorized share capital.
        share_capital: Money,
        /// Authorized share count.
        total_shares: u64,
    },
    /// A derived amount overflows the supported currency range.
    #[error("derived amount for {share_count} shares at {unit_amount} per share overflows")]
    AmountOverflow {
        /// Per-unit amount entering the multiplication.
        unit_amount: Money,
        /// Unit count entering the multiplication.
        share_count: u64,
    },
}

/// Per-share nominal value: share capital divided by total shares.
///
/// Fails when the division is not exact to the cent — a fractional
/// nominal value is a hard error, never silently rounded.
///
/// # Examples
/// ```
/// use engine::domain::{Company, CompanyDraft, CompanyId, LegalForm, Money};
/// use engine::domain::captable::nominal_value;
///
/// let company = Company::new(CompanyDraft {
///     id: CompanyId::random(),
///     legal_name: "Horizon Conseil".to_owned(),
///     legal_form: LegalForm::Sas,
///     registered_address: "4 rue des Lilas, 75011 Paris".to_owned(),
///     share_capital: Money::from_cents(1_000_000),
///     total_shares: 1_000,
///     president_name: None,
/// })?;
/// assert_eq!(nominal_value(&company), Ok(Money::from_cents(1_000)));
/// # Ok::<(), engine::domain::CompanyValidationError>(())
/// ```
pub fn nominal_value(company: &Company) -> Result<Money, ArithmeticInconsistency> {
    exact_per_share(company.share_capital(), company.total_shares())
}

/// Per-share value of an arbitrary capital figure over a share count,
/// with the same exactness requirement as [`nominal_value`].
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "exact division guarded by an explicit remainder check"
)]
pub fn exact_per_share(capital: Money, shares: u64) -> Result<Money, ArithmeticInconsistency> {
    let inexact = ArithmeticInconsistency::InexactNominalValue {
        share_capital: capital,
        total_shares: shares,
    };
    let Ok(shares_i64) = i64::try_from(shares) else {
        return Err(inexact);
    };
    if shares_i64 == 0 || capital.cents() % shares_i64 != 0 {
        return Err(inexact);
    }
    Ok(Money::from_cents(capital.cents() / shares_i64))
}

/// Sum of the share counts currently allocated to holders of record.
pub fn allocated_shares(shareholders: &[Shareholder]) -> u64 {
    shareholders
        .iter()
        .fold(0_u64, |sum, holder| sum.saturating_add(holder.share_count()))
}

/// Shares still available for allocation: the authorized total minus the
/// shares held by everyone except `excluding`.
///
/// Passing the transferor as `excluding` yields the pool a transfer may
/// draw from (the transferor's own holding plus the treasury remainder).
/// An over-allocated persisted ledger yields zero rather than wrapping;
/// the rule engine reports the inconsistency through the availability
/// numbers it cites.
pub fn available_shares(
    company: &Company,
    shareholders: &[Shareholder],
    excluding: Option<&ShareholderId>,
) -> u64 {
    let allocated_to_others = shareholders
        .iter()
        .filter(|holder| excluding.is_none_or(|id| holder.id() != *id))
        .fold(0_u64, |sum, holder| sum.saturating_add(holder.share_count()));
    company.total_shares().saturating_sub(allocated_to_others)
}
