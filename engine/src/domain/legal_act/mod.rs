//! Legal acts: discrete corporate events subject to validation.
//!
//! An act is created as a draft, validated against the rule catalog, and
//! once a document has been generated from it becomes immutable.
//! Corrections require a new act so the audit history is preserved.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::company::CompanyId;

mod payload;

pub use payload::{
    ActPayload, ActType, FoundingAllocation, MeetingVote, ProfitAllocation, ReductionMethod,
};

/// Stable legal-act identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActId(Uuid);

impl ActId {
    /// Wrap an existing UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`ActId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ActId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle state of a legal act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActStatus {
    /// Editable, not yet checked against the rule catalog.
    Draft,
    /// Passed the rule catalog; a document may be generated.
    Validated,
    /// Failed a blocking rule; may be edited and resubmitted.
    Rejected,
    /// A document artifact exists; the act is immutable.
    Generated,
}

impl ActStatus {
    /// Whether the state machine permits moving to `next`.
    ///
    /// Draft and rejected acts may be (re)validated or rejected again;
    /// only validated acts may become generated; generated acts are
    /// terminal.
    pub const fn allows_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft | Self::Rejected, Self::Validated | Self::Rejected)
                | (Self::Validated, Self::Generated | Self::Rejected)
        )
    }
}

impl fmt::Display for ActStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Draft => "draft",
            Self::Validated => "validated",
            Self::Rejected => "rejected",
            Self::Generated => "generated",
        };
        f.write_str(label)
    }
}

/// Error raised on a state transition the act lifecycle forbids.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("legal act may not move from {from} to {to}")]
pub struct InvalidActTransition {
    /// State the act was in.
    pub from: ActStatus,
    /// State the caller asked for.
    pub to: ActStatus,
}

/// A proposed or executed legal event for one company.
///
/// # Examples
/// ```
/// use chrono::{NaiveDate, Utc};
/// use engine::domain::{ActPayload, ActStatus, ActType, CompanyId, LegalAct, Money};
///
/// let act = LegalAct::draft(
///     CompanyId::random(),
///     ActPayload::FundsDepositAttestation {
///         deposited_amount: Money::from_cents(500_000),
///         depositary_name: "Banque de l'Ouest".to_owned(),
///         deposit_date: NaiveDate::from_ymd_opt(2026, 1, 12).expect("valid date"),
///     },
///     Utc::now(),
/// );
/// assert_eq!(act.status(), ActStatus::Draft);
/// assert_eq!(act.act_type(), ActType::FundsDepositAttestation);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalAct {
    id: ActId,
    company_id: CompanyId,
    status: ActStatus,
    created_at: DateTime<Utc>,
    payload: ActPayload,
}

impl LegalAct {
    /// Create a new draft act.
    pub fn draft(company_id: CompanyId, payload: ActPayload, created_at: DateTime<Utc>) -> Self {
        Self {
            id: ActId::random(),
            company_id,
            status: ActStatus::Draft,
            created_at,
            payload,
        }
    }

    /// Rebuild a persisted act from its stored fields.
    pub const fn from_parts(
        id: ActId,
        company_id: CompanyId,
        status: ActStatus,
        created_at: DateTime<Utc>,
        payload: ActPayload,
    ) -> Self {
        Self {
            id,
            company_id,
            status,
            created_at,
            payload,
        }
    }

    /// Returns the act id.
    pub const fn id(&self) -> ActId {
        self.id
    }

    /// Returns the company the act belongs to.
    pub const fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Returns the lifecycle status.
    pub const fn status(&self) -> ActStatus {
        self.status
    }

    /// Returns the creation timestamp.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the type-specific payload.
    pub const fn payload(&self) -> &ActPayload {
        &self.payload
    }

    /// Returns the discriminant of the payload.
    pub const fn act_type(&self) -> ActType {
        self.payload.act_type()
    }

    /// Move the act to a new lifecycle state.
    pub fn transition(&mut self, next: ActStatus) -> Result<(), InvalidActTransition> {
        if !self.status.allows_transition_to(next) {
            return Err(InvalidActTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::NaiveDate;
    use rstest::rstest;

    use super::*;
    use crate::domain::Money;

    fn deposit_act() -> LegalAct {
        LegalAct::draft(
            CompanyId::random(),
            ActPayload::FundsDepositAttestation {
                deposited_amount: Money::from_cents(500_000),
                depositary_name: "Banque de l'Ouest".to_owned(),
                deposit_date: NaiveDate::from_ymd_opt(2026, 1, 12).expect("valid date"),
            },
            Utc::now(),
        )
    }

    #[rstest]
    fn draft_validates_then_generates() {
        let mut act = deposit_act();
        act.transition(ActStatus::Validated).expect("draft may validate");
        act.transition(ActStatus::Generated).expect("validated may generate");
        assert_eq!(act.status(), ActStatus::Generated);
    }

    #[rstest]
    fn rejected_act_may_be_resubmitted() {
        let mut act = deposit_act();
        act.transition(ActStatus::Rejected).expect("draft may reject");
        act.transition(ActStatus::Validated).expect("rejected may revalidate");
        assert_eq!(act.status(), ActStatus::Validated);
    }

    #[rstest]
    #[case(ActStatus::Draft)]
    #[case(ActStatus::Validated)]
    #[case(ActStatus::Rejected)]
    #[case(ActStatus::Generated)]
    fn generated_acts_are_terminal(#[case] next: ActStatus) {
        let mut act = deposit_act();
        act.transition(ActStatus::Validated).expect("draft may validate");
        act.transition(ActStatus::Generated).expect("validated may generate");
        let err = act.transition(next).expect_err("generated is immutable");
        assert_eq!(err.from, ActStatus::Generated);
    }

    #[rstest]
    fn draft_may_not_skip_to_generated() {
        let mut act = deposit_act();
        let err = act
            .transition(ActStatus::Generated)
            .expect_err("draft must validate first");
        assert_eq!(err.to, ActStatus::Generated);
    }
}
