//! Act payload variants.
//!
//! One variant per act type, each declaring only its relevant fields as
//! required. This turns "is this field present" checks into exhaustive
//! matches in the rule engine and the mapper.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::money::Money;
use crate::domain::shareholder::ShareholderId;

/// Discriminant of an [`ActPayload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActType {
    /// Founding statutes with the initial share allocation.
    IncorporationStatutes,
    /// Capital increase by issuance of new shares.
    CapitalIncrease,
    /// Capital reduction by buyback or par-value decrease.
    CapitalReduction,
    /// Sale of existing shares to a transferee.
    ShareTransfer,
    /// Annual ordinary general meeting minutes.
    OrdinaryMeeting,
    /// Accounting engagement letter.
    MissionLetter,
    /// Share movement order backing a transfer.
    TransferOrder,
    /// Attestation that incorporation funds were deposited.
    FundsDepositAttestation,
}

impl ActType {
    /// Stable snake_case identifier used in file names and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IncorporationStatutes => "statuts_constitutifs",
            Self::CapitalIncrease => "augmentation_capital",
            Self::CapitalReduction => "reduction_capital",
            Self::ShareTransfer => "cession_actions",
            Self::OrdinaryMeeting => "pv_assemblee_ordinaire",
            Self::MissionLetter => "lettre_mission",
            Self::TransferOrder => "ordre_mouvement",
            Self::FundsDepositAttestation => "attestation_depot_fonds",
        }
    }
}

impl fmt::Display for ActType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One founding shareholder line of incorporation statutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundingAllocation {
    /// Holder of record.
    pub full_name: String,
    /// Shares subscribed at incorporation.
    pub share_count: u64,
    /// Cash contribution backing the subscription.
    pub contribution: Money,
}

/// Ballot of a shareholder assembly. Every share carries one vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingVote {
    /// Votes in favour of the resolution.
    pub votes_for: u64,
    /// Votes against the resolution.
    pub votes_against: u64,
    /// Abstentions recorded at the assembly.
    pub votes_abstain: u64,
}

impl MeetingVote {
    /// Total votes cast at the assembly, abstentions included.
    pub const fn total_cast(self) -> u64 {
        self.votes_for
            .saturating_add(self.votes_against)
            .saturating_add(self.votes_abstain)
    }
}

/// How a capital reduction is carried out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "method")]
pub enum ReductionMethod {
    /// The company buys back and cancels shares from one holder.
    ShareBuyback {
        /// Shares repurchased and cancelled.
        repurchased_share_count: u64,
        /// Price paid per share.
        unit_price: Money,
        /// Holder selling back to the company.
        seller_id: ShareholderId,
    },
    /// The per-share nominal value is lowered, share count unchanged.
    ParValue {
        /// Nominal value after the reduction.
        new_nominal_value: Money,
    },
}

/// Allocation of the yearly result voted at an ordinary meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitAllocation {
    /// Distribute as dividends.
    Dividendes,
    /// Carry forward.
    ReportANouveau,
    /// Book to reserves.
    Reserves,
}

/// Type-specific content of a legal act.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "act_type")]
pub enum ActPayload {
    /// Founding statutes with the initial allocation table.
    IncorporationStatutes {
        /// Founding shareholders and their subscriptions.
        allocations: Vec<FoundingAllocation>,
        /// First appointed president.
        president_name: String,
        /// Date the statutes are signed.
        signature_date: NaiveDate,
    },
    /// Extraordinary decision issuing new shares.
    CapitalIncrease {
        /// Capital before the increase, as recorded in the statutes.
        prior_capital: Money,
        /// Capital after the increase.
        new_capital: Money,
        /// Newly issued shares.
        issued_share_count: u64,
        /// Subscriber receiving the issued shares.
        subscriber_name: String,
        /// Assembly ballot deciding the increase.
        vote: MeetingVote,
        /// Date of the deciding assembly.
        decision_date: NaiveDate,
    },
    /// Extraordinary decision reducing the capital.
    CapitalReduction {
        /// Capital before the reduction.
        prior_capital: Money,
        /// Capital after the reduction.
        new_capital: Money,
        /// Reduction mechanism.
        method: ReductionMethod,
        /// Whether the reduction is motivated by losses.
        motivated_by_losses: bool,
        /// Assembly ballot deciding the reduction.
        vote: MeetingVote,
        /// Date of the deciding assembly.
        decision_date: NaiveDate,
    },
    /// Sale of existing shares.
    ShareTransfer {
        /// Holder selling the shares.
        transferor_id: ShareholderId,
        /// Buyer, possibly not yet a shareholder of record.
        transferee_name: String,
        /// Shares sold.
        share_count: u64,
        /// Price per share.
        unit_price: Money,
        /// Total price as declared in the deed. Legally binding, never
        /// recomputed.
        declared_total_price: Money,
        /// Date of the transfer.
        transfer_date: NaiveDate,
    },
    /// Ordinary general meeting minutes.
    OrdinaryMeeting {
        /// Date of the assembly.
        meeting_date: NaiveDate,
        /// Ballot on the result allocation resolution.
        vote: MeetingVote,
        /// Voted allocation of the yearly result.
        profit_allocation: ProfitAllocation,
        /// Amount distributed when the allocation is dividends.
        distributed_amount: Option<Money>,
    },
    /// Accounting engagement letter.
    MissionLetter {
        /// Scope of the accounting engagement.
        engagement_description: String,
        /// Annual fee agreed with the client.
        annual_fee: Money,
        /// First day of the engagement.
        start_date: NaiveDate,
    },
    /// Share movement order backing a transfer.
    TransferOrder {
        /// Holder moving the shares out.
        transferor_id: ShareholderId,
        /// Recipient of the shares.
        transferee_name: String,
        /// Shares moved.
        share_count: u64,
        /// Date of the movement.
        transfer_date: NaiveDate,
    },
    /// Attestation that incorporation funds were deposited.
    FundsDepositAttestation {
        /// Amount deposited with the depositary.
        deposited_amount: Money,
        /// Bank or notary holding the funds.
        depositary_name: String,
        /// Date of the deposit.
        deposit_date: NaiveDate,
    },
}

impl ActPayload {
    /// Returns the discriminant of this payload.
    pub const fn act_type(&self) -> ActType {
        match self {
            Self::IncorporationStatutes { .. } => ActType::IncorporationStatutes,
            Self::CapitalIncrease { .. } => ActType::CapitalIncrease,
            Self::CapitalReduction { .. } => ActType::CapitalReduction,
            Self::ShareTransfer { .. } => ActType::ShareTransfer,
            Self::OrdinaryMeeting { .. } => ActType::OrdinaryMeeting,
            Self::MissionLetter { .. } => ActType::MissionLetter,
            Self::TransferOrder { .. } => ActType::TransferOrder,
            Self::FundsDepositAttestation { .. } => ActType::FundsDepositAttestation,
        }
    }

    /// The assembly ballot carried by the payload, when the act type is
    /// decided in assembly.
    pub const fn vote(&self) -> Option<MeetingVote> {
        match self {
            Self::CapitalIncrease { vote, .. }
            | Self::CapitalReduction { vote, .. }
            | Self::OrdinaryMeeting { vote, .. } => Some(*vote),
            _ => None,
        }
    }
}
