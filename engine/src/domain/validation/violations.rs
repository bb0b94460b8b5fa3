//! Rule violations and advisory warnings.
//!
//! Every blocking violation names its rule and the numeric values that
//! broke it, so the operator always gets actionable feedback rather than
//! a generic message.

use serde::Serialize;

use crate::domain::captable::ArithmeticInconsistency;
use crate::domain::money::Money;
use crate::domain::shareholder::ShareholderId;

/// A blocking rule failure. Generation never proceeds past one of these.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case", tag = "rule")]
pub enum RuleViolation {
    /// The act already produced a document and is immutable.
    #[error("act state: a document was already generated from this act; corrections require a new act")]
    ActAlreadyGenerated,
    /// The company no longer accepts acts.
    #[error("company state: the company is archived and accepts no further acts")]
    CompanyArchived,
    /// The recorded capital does not divide evenly over the share count.
    #[error(
        "nominal value: share capital of {share_capital} does not divide into \
         {total_shares} shares to an exact cent"
    )]
    NominalValueInexact {
        /// Capital figure entering the division.
        share_capital: Money,
        /// Share count entering the division.
        total_shares: u64,
    },
    /// The act requires an appointed president and the company has none.
    #[error("required party: the company has no appointed president")]
    MissingPresident,
    /// A shareholder the act references is not on the ledger.
    #[error("required party: shareholder {shareholder_id} is not on the ledger")]
    MissingShareholder {
        /// The dangling reference.
        shareholder_id: ShareholderId,
    },
    /// A mandatory act field is absent, blank, or zero.
    #[error("required field: {field} is missing or empty")]
    MissingRequiredField {
        /// Placeholder-level field name.
        field: &'static str,
    },
    /// More shares requested than the ledger has available.
    #[error(
        "share availability: requested {requested} shares, only {available} available of \
         {total_shares} total, {allocated} already allocated"
    )]
    ShareAvailability {
        /// Shares the act asks for.
        requested: u64,
        /// Shares currently available to it.
        available: u64,
        /// Authorized share count.
        total_shares: u64,
        /// Shares already allocated to holders of record.
        allocated: u64,
    },
    /// A holder parting with more shares than they hold.
    #[error("share availability: holder of record holds {held} shares, cannot part with {requested}")]
    TransferorInsufficientShares {
        /// Shares the holder holds.
        held: u64,
        /// Shares the act moves.
        requested: u64,
    },
    /// Incorporation statutes leaving authorized shares unsubscribed.
    #[error(
        "share availability: statutes subscribe {allocated} of {total_shares} authorized \
         shares; all shares must be subscribed at incorporation"
    )]
    IncompleteSubscription {
        /// Shares subscribed by the founding allocations.
        allocated: u64,
        /// Authorized share count.
        total_shares: u64,
    },
    /// A founding contribution that does not match its subscription.
    #[error(
        "contribution arithmetic: {full_name} subscribes {share_count} shares worth \
         {expected}, declared contribution is {declared}"
    )]
    FoundingContributionMismatch {
        /// Founder named in the statutes.
        full_name: String,
        /// Shares subscribed.
        share_count: u64,
        /// Share count times nominal value.
        expected: Money,
        /// Contribution written in the statutes.
        declared: Money,
    },
    /// The act's declared prior capital disagrees with the ledger.
    #[error(
        "prior capital: act declares {declared}, the ledger records {recorded}"
    )]
    PriorCapitalMismatch {
        /// Capital figure written in the act.
        declared: Money,
        /// Capital recorded for the company.
        recorded: Money,
    },
    /// Capital after a reduction dropping below the legal floor.
    #[error("capital floor: capital after reduction must stay at or above 0.01, got {new_capital}")]
    CapitalFloor {
        /// Capital the act would leave.
        new_capital: Money,
    },
    /// A reduction exceeding the prior capital.
    #[error(
        "reduction ceiling: reduction of {reduction_amount} exceeds prior capital of \
         {prior_capital}"
    )]
    ReductionCeiling {
        /// Amount removed by the act.
        reduction_amount: Money,
        /// Capital before the act.
        prior_capital: Money,
    },
    /// Buyback figures that do not multiply out to the reduction amount.
    #[error(
        "repurchase arithmetic: {repurchased_share_count} shares at {unit_price} come to \
         {computed}, the act reduces capital by {declared}"
    )]
    RepurchaseArithmetic {
        /// Shares repurchased and cancelled.
        repurchased_share_count: u64,
        /// Price per share.
        unit_price: Money,
        /// Count times unit price.
        computed: Money,
        /// Reduction amount declared by the act.
        declared: Money,
    },
    /// A par-value reduction that does not lower the nominal value.
    #[error(
        "nominal-value monotonicity: new nominal value {new_nominal_value} must be below \
         the prior {prior_nominal_value}"
    )]
    NominalValueNotLowered {
        /// Nominal value the act sets.
        new_nominal_value: Money,
        /// Nominal value currently recorded.
        prior_nominal_value: Money,
    },
    /// Par-value figures that do not multiply out to the new capital.
    #[error(
        "par-value arithmetic: {total_shares} shares at nominal {new_nominal_value} come \
         to {computed}, the act declares a capital of {declared}"
    )]
    ParValueArithmetic {
        /// Nominal value the act sets.
        new_nominal_value: Money,
        /// Authorized share count, unchanged by the method.
        total_shares: u64,
        /// Share count times the new nominal value.
        computed: Money,
        /// Capital declared by the act.
        declared: Money,
    },
    /// Capital-increase figures that do not multiply out.
    #[error(
        "increase arithmetic: issuing {issued_share_count} shares at nominal \
         {nominal_value} raises capital by {expected}, the act declares {declared}"
    )]
    IncreaseArithmetic {
        /// Shares issued by the act.
        issued_share_count: u64,
        /// Nominal value recorded for the company.
        nominal_value: Money,
        /// Issued count times nominal value.
        expected: Money,
        /// Increase declared by the act.
        declared: Money,
    },
    /// A declared transfer total that disagrees with price times count.
    #[error(
        "transfer price arithmetic: {share_count} shares at {unit_price} come to \
         {computed}, the deed declares {declared}"
    )]
    TransferPriceMismatch {
        /// Shares sold.
        share_count: u64,
        /// Price per share.
        unit_price: Money,
        /// Count times unit price.
        computed: Money,
        /// Total written in the deed; legally binding.
        declared: Money,
    },
    /// An extraordinary resolution short of the two-thirds supermajority.
    #[error(
        "supermajority: resolution carried {votes_for} of {total_cast} votes cast, \
         a two-thirds supermajority requires {required}"
    )]
    Supermajority {
        /// Votes in favour.
        votes_for: u64,
        /// Total votes cast.
        total_cast: u64,
        /// Smallest passing count.
        required: u64,
    },
    /// A ballot whose votes do not account for every allocated share.
    #[error(
        "vote completeness: ballot counts {total_votes} votes but {allocated_shares} \
         shares are allocated; every share votes exactly once"
    )]
    VoteCompleteness {
        /// Votes cast across all columns.
        total_votes: u64,
        /// Shares allocated to holders of record.
        allocated_shares: u64,
    },
    /// A derived figure that cannot be computed exactly.
    #[error("arithmetic: {0}")]
    Arithmetic(#[from] ArithmeticInconsistency),
}

impl RuleViolation {
    /// Stable rule identifier for structured error payloads.
    pub const fn rule_name(&self) -> &'static str {
        match self {
            Self::ActAlreadyGenerated => "act_state",
            Self::CompanyArchived => "company_state",
            Self::NominalValueInexact { .. } => "nominal_value_exactness",
            Self::MissingPresident
            | Self::MissingShareholder { .. }
            | Self::MissingRequiredField { .. } => "required_party_presence",
            Self::ShareAvailability { .. }
            | Self::TransferorInsufficientShares { .. }
            | Self::IncompleteSubscription { .. } => "share_availability",
            Self::FoundingContributionMismatch { .. } => "contribution_arithmetic",
            Self::PriorCapitalMismatch { .. } => "prior_capital",
            Self::CapitalFloor { .. } => "capital_floor",
            Self::ReductionCeiling { .. } => "reduction_ceiling",
            Self::RepurchaseArithmetic { .. } => "repurchase_arithmetic",
            Self::NominalValueNotLowered { .. } => "nominal_value_monotonicity",
            Self::ParValueArithmetic { .. } => "par_value_arithmetic",
            Self::IncreaseArithmetic { .. } => "increase_arithmetic",
            Self::TransferPriceMismatch { .. } => "transfer_price_arithmetic",
            Self::Supermajority { .. } => "supermajority",
            Self::VoteCompleteness { .. } => "vote_completeness",
            Self::Arithmetic(_) => "arithmetic_consistency",
        }
    }
}

/// An advisory finding. Surfaced to the operator, never blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case", tag = "rule")]
pub enum RuleWarning {
    /// Loss-motivated reductions open a creditor opposition window.
    #[error(
        "creditor opposition: creditors may oppose a loss-motivated reduction within the \
         statutory notice period"
    )]
    CreditorOppositionNotice,
    /// A par-value reduction leaving an unusually small nominal value.
    #[error("unusual nominal value: {new_nominal_value} falls below 1.00")]
    UnusualNominalValue {
        /// Nominal value after the reduction.
        new_nominal_value: Money,
    },
    /// A price far from the nominal value in either direction.
    #[error(
        "off-market price: unit price {unit_price} deviates from nominal value \
         {nominal_value} by more than a factor of {factor}"
    )]
    OffMarketPrice {
        /// Price per share in the act.
        unit_price: Money,
        /// Nominal value recorded for the company.
        nominal_value: Money,
        /// Deviation factor triggering the warning.
        factor: u32,
    },
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn availability_message_cites_every_number() {
        let violation = RuleViolation::ShareAvailability {
            requested: 120,
            available: 80,
            total_shares: 1_000,
            allocated: 920,
        };
        let message = violation.to_string();
        assert!(message.contains("120"));
        assert!(message.contains("80"));
        assert!(message.contains("1000"));
        assert!(message.contains("920"));
        assert_eq!(violation.rule_name(), "share_availability");
    }

    #[rstest]
    fn price_mismatch_names_both_totals() {
        let violation = RuleViolation::TransferPriceMismatch {
            share_count: 200,
            unit_price: Money::from_cents(1_500),
            computed: Money::from_cents(300_000),
            declared: Money::from_cents(290_000),
        };
        let message = violation.to_string();
        assert!(message.contains("3000.00"));
        assert!(message.contains("2900.00"));
    }
}
