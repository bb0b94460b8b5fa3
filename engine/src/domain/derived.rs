//! Derived-value calculator.
//!
//! Populates the computed figures that must stay internally consistent
//! rather than independently entered: ownership percentages (carried as
//! basis points so they stay exact), contribution amounts, and the
//! expected totals the arithmetic rules compare against. Share counts
//! remain the source of truth; percentages are display-derived and are
//! never compared for equality.

use serde::{Deserialize, Serialize};

use super::captable::{self, ArithmeticInconsistency};
use super::company::Company;
use super::money::Money;
use super::shareholder::{Shareholder, ShareholderId};

/// Ownership of `share_count` out of `total_shares` in basis points
/// (hundredths of a percent), rounded half-up.
///
/// # Examples
/// ```
/// use engine::domain::derived::ownership_basis_points;
///
/// assert_eq!(ownership_basis_points(1_000, 1_000), 10_000);
/// assert_eq!(ownership_basis_points(1, 3), 3_333);
/// ```
#[expect(
    clippy::integer_division,
    reason = "half-up rounding over an exact integer quotient"
)]
pub fn ownership_basis_points(share_count: u64, total_shares: u64) -> u64 {
    if total_shares == 0 {
        return 0;
    }
    let numerator = u128::from(share_count) * 10_000 + u128::from(total_shares) / 2;
    let points = numerator / u128::from(total_shares);
    u64::try_from(points).unwrap_or(u64::MAX)
}

/// Contribution amount of a holding: share count times nominal value.
pub fn contribution_amount(
    share_count: u64,
    nominal_value: Money,
) -> Result<Money, ArithmeticInconsistency> {
    nominal_value
        .checked_mul_count(share_count)
        .ok_or(ArithmeticInconsistency::AmountOverflow {
            unit_amount: nominal_value,
            share_count,
        })
}

/// Expected total of a priced share movement: unit price times count.
///
/// The declared total in the deed is legally binding; a mismatch with
/// this expected figure is a blocking rule, never a silent recompute.
pub fn expected_total_price(
    unit_price: Money,
    share_count: u64,
) -> Result<Money, ArithmeticInconsistency> {
    unit_price
        .checked_mul_count(share_count)
        .ok_or(ArithmeticInconsistency::AmountOverflow {
            unit_amount: unit_price,
            share_count,
        })
}

/// One shareholder's standing in the cap table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareholderStanding {
    /// Holder of record.
    pub shareholder_id: ShareholderId,
    /// Holder name as it appears in documents.
    pub full_name: String,
    /// Held share count (source of truth).
    pub share_count: u64,
    /// Ownership in basis points, display-derived.
    pub ownership_basis_points: u64,
    /// Share count times nominal value.
    pub contribution_amount: Money,
}

/// Consistent snapshot of a company's capitalization.
///
/// # Examples
/// ```
/// use engine::domain::{Company, CompanyDraft, CompanyId, LegalForm, Money};
/// use engine::domain::derived::CapTable;
///
/// let company = Company::new(CompanyDraft {
///     id: CompanyId::random(),
///     legal_name: "Horizon Conseil".to_owned(),
///     legal_form: LegalForm::Sas,
///     registered_address: "4 rue des Lilas, 75011 Paris".to_owned(),
///     share_capital: Money::from_cents(1_000_000),
///     total_shares: 1_000,
///     president_name: None,
/// }).expect("valid company");
/// let table = CapTable::build(&company, &[]).expect("consistent table");
/// assert_eq!(table.nominal_value, Money::from_cents(1_000));
/// assert_eq!(table.treasury_shares, 1_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapTable {
    /// Exact per-share nominal value.
    pub nominal_value: Money,
    /// Shares allocated to holders of record.
    pub allocated_shares: u64,
    /// Authorized shares not yet held by anyone.
    pub treasury_shares: u64,
    /// Per-holder standings, in the order the ledger lists them.
    pub standings: Vec<ShareholderStanding>,
}

impl CapTable {
    /// Build the derived standings for a company and its holders.
    pub fn build(
        company: &Company,
        shareholders: &[Shareholder],
    ) -> Result<Self, ArithmeticInconsistency> {
        let nominal = captable::nominal_value(company)?;
        let allocated = captable::allocated_shares(shareholders);
        let standings = shareholders
            .iter()
            .map(|holder| {
                Ok(ShareholderStanding {
                    shareholder_id: holder.id(),
                    full_name: holder.full_name().to_owned(),
                    share_count: holder.share_count(),
                    ownership_basis_points: ownership_basis_points(
                        holder.share_count(),
                        company.total_shares(),
                    ),
                    contribution_amount: contribution_amount(holder.share_count(), nominal)?,
                })
            })
            .collect::<Result<Vec<_>, ArithmeticInconsistency>>()?;

        Ok(Self {
            nominal_value: nominal,
            allocated_shares: allocated,
            treasury_shares: company.total_shares().saturating_sub(allocated),
            standings,
        })
    }

    /// Look up one holder's standing.
    pub fn standing_of(&self, id: &ShareholderId) -> Option<&ShareholderStanding> {
        self.standings
            .iter()
            .find(|standing| standing.shareholder_id == *id)
    }
}
