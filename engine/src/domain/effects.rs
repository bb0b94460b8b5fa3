//! Ledger effects of an executed act.
//!
//! Translates a validated act into the concrete mutations its commit
//! applies: the capital figures to record and the shareholder rows to
//! upsert. Computed from the same snapshot whose version the commit
//! checks, so an interleaved write can never smuggle in stale counts.

use super::captable::ArithmeticInconsistency;
use super::company::{Company, CompanyValidationError};
use super::legal_act::{ActPayload, LegalAct, ReductionMethod};
use super::money::Money;
use super::shareholder::{
    Shareholder, ShareholderDraft, ShareholderId, ShareholderValidationError,
};

/// New capital figures recorded by a capital-change act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapitalUpdate {
    /// Share capital after the act.
    pub share_capital: Money,
    /// Authorized share count after the act.
    pub total_shares: u64,
}

/// Mutations a committed act applies to the persisted ledger.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LedgerEffects {
    /// Capital figures to record, when the act changes them.
    pub capital_update: Option<CapitalUpdate>,
    /// President name to record on the company, when the act appoints one.
    pub president_name: Option<String>,
    /// Shareholder rows to insert or update.
    pub shareholder_upserts: Vec<Shareholder>,
}

impl LedgerEffects {
    /// Whether the act leaves the ledger untouched (document-only acts).
    pub fn is_empty(&self) -> bool {
        self.capital_update.is_none()
            && self.president_name.is_none()
            && self.shareholder_upserts.is_empty()
    }
}

/// Failures while deriving effects from a validated act.
///
/// These point at gaps in the validation catalog or at a ledger row that
/// vanished between validation and derivation; the orchestrator maps
/// them back into the §7 taxonomy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EffectsError {
    /// A shareholder the act references is not on the ledger.
    #[error("shareholder {shareholder_id} referenced by the act is not on the ledger")]
    MissingShareholder {
        /// The dangling reference.
        shareholder_id: ShareholderId,
    },
    /// A derived amount could not be computed exactly.
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticInconsistency),
    /// The post-act capital figures break a company invariant.
    #[error("post-act capital figures are inconsistent: {0}")]
    Capital(#[from] CompanyValidationError),
    /// A counterparty row could not be constructed.
    #[error("counterparty row could not be constructed: {0}")]
    Counterparty(#[from] ShareholderValidationError),
}

/// Derive the ledger mutations of a validated act.
///
/// Document-only acts (meetings, mission letters, deposit attestations)
/// yield empty effects.
pub fn effects_of(
    act: &LegalAct,
    company: &Company,
    shareholders: &[Shareholder],
) -> Result<LedgerEffects, EffectsError> {
    match act.payload() {
        ActPayload::IncorporationStatutes {
            allocations,
            president_name,
            ..
        } => incorporation_effects(company, allocations, president_name),
        ActPayload::CapitalIncrease {
            new_capital,
            issued_share_count,
            subscriber_name,
            ..
        } => increase_effects(
            company,
            shareholders,
            *new_capital,
            *issued_share_count,
            subscriber_name,
        ),
        ActPayload::CapitalReduction {
            new_capital,
            method,
            ..
        } => reduction_effects(company, shareholders, *new_capital, method),
        ActPayload::ShareTransfer {
            transferor_id,
            transferee_name,
            share_count,
            ..
        }
        | ActPayload::TransferOrder {
            transferor_id,
            transferee_name,
            share_count,
            ..
        } => transfer_effects(company, shareholders, transferor_id, transferee_name, *share_count),
        ActPayload::OrdinaryMeeting { .. }
        | ActPayload::MissionLetter { .. }
        | ActPayload::FundsDepositAttestation { .. } => Ok(LedgerEffects::default()),
    }
}

fn incorporation_effects(
    company: &Company,
    allocations: &[super::legal_act::FoundingAllocation],
    president_name: &str,
) -> Result<LedgerEffects, EffectsError> {
    let upserts = allocations
        .iter()
        .map(|allocation| {
            Shareholder::new(ShareholderDraft {
                id: ShareholderId::random(),
                company_id: company.id(),
                full_name: allocation.full_name.clone(),
                share_count: allocation.share_count,
                is_president: allocation.full_name.trim() == president_name.trim(),
                is_general_manager: false,
            })
            .map_err(EffectsError::from)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LedgerEffects {
        capital_update: None,
        president_name: Some(president_name.to_owned()),
        shareholder_upserts: upserts,
    })
}

fn increase_effects(
    company: &Company,
    shareholders: &[Shareholder],
    new_capital: Money,
    issued_share_count: u64,
    subscriber_name: &str,
) -> Result<LedgerEffects, EffectsError> {
    let new_total = company.total_shares().saturating_add(issued_share_count);
    let subscriber = match find_by_name(shareholders, subscriber_name) {
        Some(existing) => {
            let mut updated = existing.clone();
            updated.set_share_count(existing.share_count().saturating_add(issued_share_count));
            updated
        }
        None => Shareholder::new(ShareholderDraft {
            id: ShareholderId::random(),
            company_id: company.id(),
            full_name: subscriber_name.to_owned(),
            share_count: issued_share_count,
            is_president: false,
            is_general_manager: false,
        })?,
    };

    Ok(LedgerEffects {
        capital_update: Some(CapitalUpdate {
            share_capital: new_capital,
            total_shares: new_total,
        }),
        president_name: None,
        shareholder_upserts: vec![subscriber],
    })
}

fn reduction_effects(
    company: &Company,
    shareholders: &[Shareholder],
    new_capital: Money,
    method: &ReductionMethod,
) -> Result<LedgerEffects, EffectsError> {
    match method {
        ReductionMethod::ShareBuyback {
            repurchased_share_count,
            seller_id,
            ..
        } => {
            let seller = find_by_id(shareholders, seller_id)
                .ok_or(EffectsError::MissingShareholder {
                    shareholder_id: *seller_id,
                })?;
            let mut updated = seller.clone();
            updated.set_share_count(
                seller.share_count().saturating_sub(*repurchased_share_count),
            );
            Ok(LedgerEffects {
                capital_update: Some(CapitalUpdate {
                    share_capital: new_capital,
                    total_shares: company
                        .total_shares()
                        .saturating_sub(*repurchased_share_count),
                }),
                president_name: None,
                shareholder_upserts: vec![updated],
            })
        }
        ReductionMethod::ParValue { .. } => Ok(LedgerEffects {
            capital_update: Some(CapitalUpdate {
                share_capital: new_capital,
                total_shares: company.total_shares(),
            }),
            president_name: None,
            shareholder_upserts: Vec::new(),
        }),
    }
}

fn transfer_effects(
    company: &Company,
    shareholders: &[Shareholder],
    transferor_id: &ShareholderId,
    transferee_name: &str,
    share_count: u64,
) -> Result<LedgerEffects, EffectsError> {
    let transferor =
        find_by_id(shareholders, transferor_id).ok_or(EffectsError::MissingShareholder {
            shareholder_id: *transferor_id,
        })?;
    let mut departing = transferor.clone();
    departing.set_share_count(transferor.share_count().saturating_sub(share_count));

    let receiving = match find_by_name(shareholders, transferee_name) {
        Some(existing) if existing.id() != *transferor_id => {
            let mut updated = existing.clone();
            updated.set_share_count(existing.share_count().saturating_add(share_count));
            updated
        }
        _ => Shareholder::new(ShareholderDraft {
            id: ShareholderId::random(),
            company_id: company.id(),
            full_name: transferee_name.to_owned(),
            share_count,
            is_president: false,
            is_general_manager: false,
        })?,
    };

    Ok(LedgerEffects {
        capital_update: None,
        president_name: None,
        shareholder_upserts: vec![departing, receiving],
    })
}

fn find_by_id<'a>(
    shareholders: &'a [Shareholder],
    id: &ShareholderId,
) -> Option<&'a Shareholder> {
    shareholders.iter().find(|holder| holder.id() == *id)
}

fn find_by_name<'a>(shareholders: &'a [Shareholder], name: &str) -> Option<&'a Shareholder> {
    shareholders
        .iter()
        .find(|holder| holder.full_name().trim() == name.trim())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::{NaiveDate, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::company::{CompanyDraft, CompanyId, LegalForm};
    use crate::domain::legal_act::FoundingAllocation;

    fn company() -> Company {
        Company::new(CompanyDraft {
            id: CompanyId::random(),
            legal_name: "Horizon Conseil".to_owned(),
            legal_form: LegalForm::Sas,
            registered_address: "4 rue des Lilas, 75011 Paris".to_owned(),
            share_capital: Money::from_cents(1_000_000),
            total_shares: 1_000,
            president_name: Some("Claire Fontaine".to_owned()),
        })
        .expect("valid company")
    }

    fn holder(company_id: CompanyId, name: &str, share_count: u64) -> Shareholder {
        Shareholder::new(ShareholderDraft {
            id: ShareholderId::random(),
            company_id,
            full_name: name.to_owned(),
            share_count,
            is_president: false,
            is_general_manager: false,
        })
        .expect("valid shareholder")
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 12).expect("valid date")
    }

    #[rstest]
    fn incorporation_creates_founders_and_flags_president() {
        let subject = company();
        let act = LegalAct::draft(
            subject.id(),
            ActPayload::IncorporationStatutes {
                allocations: vec![
                    FoundingAllocation {
                        full_name: "Claire Fontaine".to_owned(),
                        share_count: 600,
                        contribution: Money::from_cents(600_000),
                    },
                    FoundingAllocation {
                        full_name: "Marc Aubry".to_owned(),
                        share_count: 400,
                        contribution: Money::from_cents(400_000),
                    },
                ],
                president_name: "Claire Fontaine".to_owned(),
                signature_date: date(),
            },
            Utc::now(),
        );

        let effects = effects_of(&act, &subject, &[]).expect("effects derived");
        assert_eq!(effects.president_name.as_deref(), Some("Claire Fontaine"));
        assert_eq!(effects.shareholder_upserts.len(), 2);
        let presidents: Vec<_> = effects
            .shareholder_upserts
            .iter()
            .filter(|h| h.is_president())
            .collect();
        assert_eq!(presidents.len(), 1);
        assert_eq!(presidents.first().map(|h| h.full_name()), Some("Claire Fontaine"));
    }

    #[rstest]
    fn transfer_moves_shares_to_new_transferee() {
        let subject = company();
        let transferor = holder(subject.id(), "Claire Fontaine", 1_000);
        let act = LegalAct::draft(
            subject.id(),
            ActPayload::ShareTransfer {
                transferor_id: transferor.id(),
                transferee_name: "Marc Aubry".to_owned(),
                share_count: 200,
                unit_price: Money::from_cents(1_500),
                declared_total_price: Money::from_cents(300_000),
                transfer_date: date(),
            },
            Utc::now(),
        );

        let effects =
            effects_of(&act, &subject, std::slice::from_ref(&transferor)).expect("effects derived");
        assert!(effects.capital_update.is_none());
        let counts: Vec<_> = effects
            .shareholder_upserts
            .iter()
            .map(|h| (h.full_name().to_owned(), h.share_count()))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("Claire Fontaine".to_owned(), 800),
                ("Marc Aubry".to_owned(), 200),
            ]
        );
    }

    #[rstest]
    fn buyback_cancels_shares_and_lowers_capital() {
        let subject = company();
        let seller = holder(subject.id(), "Claire Fontaine", 1_000);
        let act = LegalAct::draft(
            subject.id(),
            ActPayload::CapitalReduction {
                prior_capital: Money::from_cents(1_000_000),
                new_capital: Money::from_cents(800_000),
                method: ReductionMethod::ShareBuyback {
                    repurchased_share_count: 200,
                    unit_price: Money::from_cents(1_000),
                    seller_id: seller.id(),
                },
                motivated_by_losses: false,
                vote: crate::domain::MeetingVote {
                    votes_for: 1_000,
                    votes_against: 0,
                    votes_abstain: 0,
                },
                decision_date: date(),
            },
            Utc::now(),
        );

        let effects =
            effects_of(&act, &subject, std::slice::from_ref(&seller)).expect("effects derived");
        assert_eq!(
            effects.capital_update,
            Some(CapitalUpdate {
                share_capital: Money::from_cents(800_000),
                total_shares: 800,
            })
        );
        assert_eq!(
            effects.shareholder_upserts.first().map(|h| h.share_count()),
            Some(800)
        );
    }

    #[rstest]
    fn document_only_acts_touch_nothing() {
        let subject = company();
        let act = LegalAct::draft(
            subject.id(),
            ActPayload::MissionLetter {
                engagement_description: "Tenue comptable annuelle".to_owned(),
                annual_fee: Money::from_cents(480_000),
                start_date: date(),
            },
            Utc::now(),
        );
        let effects = effects_of(&act, &subject, &[]).expect("effects derived");
        assert!(effects.is_empty());
    }
}
