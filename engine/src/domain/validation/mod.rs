//! Validation rule engine.
//!
//! Each act type owns a rule set evaluated in a fixed catalog order:
//! structural preconditions first (act state, company state, nominal
//! exactness, required parties), then the act's arithmetic, availability,
//! and vote rules. The first blocking failure short-circuits further
//! blocking evaluation and is the sole violation returned; advisory
//! rules always run to completion, so a rejected act still surfaces
//! every warning the operator should see.

use serde::Serialize;

use super::captable;
use super::company::Company;
use super::legal_act::{ActPayload, ActStatus, LegalAct};
use super::shareholder::Shareholder;

mod capital;
mod incorporation;
mod meeting;
mod transfer;
mod violations;

pub use violations::{RuleViolation, RuleWarning};

/// Price deviation factor beyond which a transfer or buyback price is
/// flagged as off-market.
pub const OFF_MARKET_FACTOR: u32 = 10;

/// Result of running the rule catalog over one act.
///
/// `blocking` carries at most one violation per pass: callers fix it and
/// re-validate rather than assuming an exhaustive report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
    blocking: Vec<RuleViolation>,
    advisory: Vec<RuleWarning>,
}

impl ValidationOutcome {
    /// Blocking violations found in this pass.
    pub fn blocking(&self) -> &[RuleViolation] {
        self.blocking.as_slice()
    }

    /// Advisory warnings found in this pass.
    pub fn advisory(&self) -> &[RuleWarning] {
        self.advisory.as_slice()
    }

    /// Whether generation must not proceed.
    pub fn is_blocked(&self) -> bool {
        !self.blocking.is_empty()
    }

    /// Split the outcome into its violation and warning lists.
    pub fn into_parts(self) -> (Vec<RuleViolation>, Vec<RuleWarning>) {
        (self.blocking, self.advisory)
    }
}

/// Run the full rule catalog for an act against its company context.
///
/// # Examples
/// ```
/// use chrono::{NaiveDate, Utc};
/// use engine::domain::validation::validate;
/// use engine::domain::{
///     ActPayload, Company, CompanyDraft, CompanyId, LegalAct, LegalForm, Money,
/// };
///
/// let company = Company::new(CompanyDraft {
///     id: CompanyId::random(),
///     legal_name: "Horizon Conseil".to_owned(),
///     legal_form: LegalForm::Sasu,
///     registered_address: "4 rue des Lilas, 75011 Paris".to_owned(),
///     share_capital: Money::from_cents(500_000),
///     total_shares: 500,
///     president_name: Some("Claire Fontaine".to_owned()),
/// }).expect("valid company");
/// let act = LegalAct::draft(
///     company.id(),
///     ActPayload::FundsDepositAttestation {
///         deposited_amount: Money::from_cents(500_000),
///         depositary_name: "Banque de l'Ouest".to_owned(),
///         deposit_date: NaiveDate::from_ymd_opt(2026, 1, 12).expect("valid date"),
///     },
///     Utc::now(),
/// );
/// let outcome = validate(&act, &company, &[]);
/// assert!(!outcome.is_blocked());
/// ```
pub fn validate(
    act: &LegalAct,
    company: &Company,
    shareholders: &[Shareholder],
) -> ValidationOutcome {
    let blocking = first_blocking(act, company, shareholders);
    let advisory = advisories(act, company);
    ValidationOutcome {
        blocking: blocking.into_iter().collect(),
        advisory,
    }
}

fn first_blocking(
    act: &LegalAct,
    company: &Company,
    shareholders: &[Shareholder],
) -> Option<RuleViolation> {
    structural_rules(act, company, shareholders)
        .or_else(|| act_rules(act, company, shareholders))
}

/// Rules 1–4 of the catalog, shared by every act type.
fn structural_rules(
    act: &LegalAct,
    company: &Company,
    shareholders: &[Shareholder],
) -> Option<RuleViolation> {
    if act.status() == ActStatus::Generated {
        return Some(RuleViolation::ActAlreadyGenerated);
    }
    if company.is_archived() {
        return Some(RuleViolation::CompanyArchived);
    }
    if captable::nominal_value(company).is_err() {
        return Some(RuleViolation::NominalValueInexact {
            share_capital: company.share_capital(),
            total_shares: company.total_shares(),
        });
    }
    required_parties(act, company, shareholders)
}

#[expect(
    clippy::cognitive_complexity,
    reason = "one flat presence checklist per act variant reads better than eight helpers"
)]
fn required_parties(
    act: &LegalAct,
    company: &Company,
    shareholders: &[Shareholder],
) -> Option<RuleViolation> {
    let missing = |field: &'static str| Some(RuleViolation::MissingRequiredField { field });
    match act.payload() {
        ActPayload::IncorporationStatutes {
            allocations,
            president_name,
            ..
        } => {
            if allocations.is_empty() {
                return missing("allocations");
            }
            if allocations.iter().any(|a| a.full_name.trim().is_empty()) {
                return missing("allocation.full_name");
            }
            if allocations.iter().any(|a| a.share_count == 0) {
                return missing("allocation.share_count");
            }
            if president_name.trim().is_empty() {
                return missing("president_name");
            }
            None
        }
        ActPayload::CapitalIncrease {
            subscriber_name,
            issued_share_count,
            ..
        } => {
            appointed_president(company)
                .or_else(|| {
                    subscriber_name
                        .trim()
                        .is_empty()
                        .then(|| RuleViolation::MissingRequiredField {
                            field: "subscriber_name",
                        })
                })
                .or_else(|| {
                    (*issued_share_count == 0).then(|| RuleViolation::MissingRequiredField {
                        field: "issued_share_count",
                    })
                })
        }
        ActPayload::CapitalReduction { method, .. } => appointed_president(company).or_else(|| {
            match method {
                super::legal_act::ReductionMethod::ShareBuyback { seller_id, .. } => {
                    on_ledger(shareholders, seller_id)
                }
                super::legal_act::ReductionMethod::ParValue { .. } => None,
            }
        }),
        ActPayload::ShareTransfer {
            transferor_id,
            transferee_name,
            share_count,
            ..
        } => on_ledger(shareholders, transferor_id)
            .or_else(|| {
                transferee_name
                    .trim()
                    .is_empty()
                    .then(|| RuleViolation::MissingRequiredField {
                        field: "transferee_name",
                    })
            })
            .or_else(|| {
                (*share_count == 0).then(|| RuleViolation::MissingRequiredField {
                    field: "share_count",
                })
            }),
        ActPayload::TransferOrder {
            transferor_id,
            transferee_name,
            share_count,
            ..
        } => appointed_president(company)
            .or_else(|| on_ledger(shareholders, transferor_id))
            .or_else(|| {
                transferee_name
                    .trim()
                    .is_empty()
                    .then(|| RuleViolation::MissingRequiredField {
                        field: "transferee_name",
                    })
            })
            .or_else(|| {
                (*share_count == 0).then(|| RuleViolation::MissingRequiredField {
                    field: "share_count",
                })
            }),
        ActPayload::OrdinaryMeeting {
            profit_allocation,
            distributed_amount,
            ..
        } => appointed_president(company).or_else(|| {
            let dividends =
                *profit_allocation == super::legal_act::ProfitAllocation::Dividendes;
            (dividends && distributed_amount.is_none()).then(|| {
                RuleViolation::MissingRequiredField {
                    field: "distributed_amount",
                }
            })
        }),
        ActPayload::MissionLetter {
            engagement_description,
            annual_fee,
            ..
        } => appointed_president(company)
            .or_else(|| {
                engagement_description.trim().is_empty().then(|| {
                    RuleViolation::MissingRequiredField {
                        field: "engagement_description",
                    }
                })
            })
            .or_else(|| {
                (annual_fee.cents() <= 0).then(|| RuleViolation::MissingRequiredField {
                    field: "annual_fee",
                })
            }),
        ActPayload::FundsDepositAttestation {
            deposited_amount,
            depositary_name,
            ..
        } => {
            if deposited_amount.cents() <= 0 {
                return missing("deposited_amount");
            }
            if depositary_name.trim().is_empty() {
                return missing("depositary_name");
            }
            None
        }
    }
}

fn appointed_president(company: &Company) -> Option<RuleViolation> {
    match company.president_name() {
        Some(name) if !name.trim().is_empty() => None,
        _ => Some(RuleViolation::MissingPresident),
    }
}

fn on_ledger(
    shareholders: &[Shareholder],
    id: &super::shareholder::ShareholderId,
) -> Option<RuleViolation> {
    if shareholders.iter().any(|holder| holder.id() == *id) {
        None
    } else {
        Some(RuleViolation::MissingShareholder {
            shareholder_id: *id,
        })
    }
}

/// Act-specific rules, in catalog order per act type.
fn act_rules(
    act: &LegalAct,
    company: &Company,
    shareholders: &[Shareholder],
) -> Option<RuleViolation> {
    match act.payload() {
        ActPayload::IncorporationStatutes { allocations, .. } => {
            incorporation::rules(company, shareholders, allocations)
        }
        ActPayload::CapitalIncrease {
            prior_capital,
            new_capital,
            issued_share_count,
            vote,
            ..
        } => capital::increase_rules(
            company,
            shareholders,
            *prior_capital,
            *new_capital,
            *issued_share_count,
            *vote,
        ),
        ActPayload::CapitalReduction {
            prior_capital,
            new_capital,
            method,
            vote,
            ..
        } => capital::reduction_rules(
            company,
            shareholders,
            *prior_capital,
            *new_capital,
            method,
            *vote,
        ),
        ActPayload::ShareTransfer {
            transferor_id,
            share_count,
            unit_price,
            declared_total_price,
            ..
        } => transfer::transfer_rules(
            company,
            shareholders,
            transferor_id,
            *share_count,
            Some((*unit_price, *declared_total_price)),
        ),
        ActPayload::TransferOrder {
            transferor_id,
            share_count,
            ..
        } => transfer::transfer_rules(company, shareholders, transferor_id, *share_count, None),
        ActPayload::OrdinaryMeeting { vote, .. } => {
            meeting::meeting_rules(shareholders, *vote)
        }
        ActPayload::MissionLetter { .. } | ActPayload::FundsDepositAttestation { .. } => None,
    }
}

/// Advisory rules. Always evaluated in full, blocking failures or not.
fn advisories(act: &LegalAct, company: &Company) -> Vec<RuleWarning> {
    let mut warnings = Vec::new();
    match act.payload() {
        ActPayload::CapitalReduction {
            motivated_by_losses,
            method,
            ..
        } => {
            if *motivated_by_losses {
                warnings.push(RuleWarning::CreditorOppositionNotice);
            }
            match method {
                super::legal_act::ReductionMethod::ParValue { new_nominal_value } => {
                    if new_nominal_value.cents() < 100 {
                        warnings.push(RuleWarning::UnusualNominalValue {
                            new_nominal_value: *new_nominal_value,
                        });
                    }
                }
                super::legal_act::ReductionMethod::ShareBuyback { unit_price, .. } => {
                    if let Some(warning) = transfer::off_market_warning(company, *unit_price) {
                        warnings.push(warning);
                    }
                }
            }
        }
        ActPayload::ShareTransfer { unit_price, .. } => {
            if let Some(warning) = transfer::off_market_warning(company, *unit_price) {
                warnings.push(warning);
            }
        }
        _ => {}
    }
    warnings
}
