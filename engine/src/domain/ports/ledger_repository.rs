//! Persistence port for the capitalization ledger.
//!
//! The ledger is the only shared mutable state in the engine. Reads hand
//! out versioned snapshots; every mutating commit names the snapshot
//! version it was computed from and fails with a conflict when the store
//! has advanced, so two acts can never both spend the same shares.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::company::{Company, CompanyId};
use crate::domain::document::GeneratedDocument;
use crate::domain::effects::LedgerEffects;
use crate::domain::legal_act::{ActId, ActStatus, LegalAct};
use crate::domain::shareholder::{Shareholder, ShareholderId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ledger repository adapters.
    pub enum LedgerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "ledger repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "ledger repository query failed: {message}",
        /// The expected snapshot version no longer matches the store.
        Conflict { message: String } =>
            "ledger version conflict: {message}",
    }
}

/// Consistent read of one company's ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSnapshot {
    /// The company row.
    pub company: Company,
    /// Every shareholder of record, zero-count holders included.
    pub shareholders: Vec<Shareholder>,
    /// Monotonic version the store bumps on every committed mutation.
    pub version: u64,
}

/// One transactional generation commit: ledger effects, the document
/// record, and the act's terminal status, applied atomically.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRequest {
    /// Act being executed.
    pub act_id: ActId,
    /// Ledger mutations derived from the validated act.
    pub effects: LedgerEffects,
    /// Document record to insert.
    pub document: GeneratedDocument,
    /// Snapshot version the effects were computed from.
    pub expected_version: u64,
}

/// Port for loading and mutating the persisted ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Find a legal act by id.
    async fn find_act(&self, act_id: &ActId) -> Result<Option<LegalAct>, LedgerRepositoryError>;

    /// Load the versioned ledger snapshot of a company.
    async fn load_ledger(
        &self,
        company_id: &CompanyId,
    ) -> Result<Option<LedgerSnapshot>, LedgerRepositoryError>;

    /// Persist an act lifecycle transition.
    async fn update_act_status(
        &self,
        act_id: &ActId,
        status: ActStatus,
    ) -> Result<(), LedgerRepositoryError>;

    /// Apply a generation commit if the snapshot version still matches.
    async fn commit_generation(
        &self,
        request: &CommitRequest,
    ) -> Result<(), LedgerRepositoryError>;

    /// Atomically clear the prior president flag, set the new one, and
    /// record the president name on the company.
    async fn commit_president_appointment(
        &self,
        company_id: &CompanyId,
        shareholder_id: &ShareholderId,
        expected_version: u64,
    ) -> Result<(), LedgerRepositoryError>;
}

#[derive(Debug, Default)]
struct LedgerState {
    companies: HashMap<CompanyId, (Company, Vec<Shareholder>, u64)>,
    acts: HashMap<ActId, LegalAct>,
    documents: Vec<GeneratedDocument>,
}

/// In-memory ledger adapter for tests and examples.
///
/// Implements the same version discipline a transactional store would:
/// every commit checks the expected version and bumps it on success.
#[derive(Debug, Default)]
pub struct InMemoryLedgerRepository {
    state: Mutex<LedgerState>,
}

impl InMemoryLedgerRepository {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a company and its shareholders at version zero.
    pub fn seed_company(&self, company: Company, shareholders: Vec<Shareholder>) {
        if let Ok(mut state) = self.state.lock() {
            state
                .companies
                .insert(company.id(), (company, shareholders, 0));
        }
    }

    /// Seed a legal act.
    pub fn seed_act(&self, act: LegalAct) {
        if let Ok(mut state) = self.state.lock() {
            state.acts.insert(act.id(), act);
        }
    }

    /// Current status of a stored act.
    pub fn act_status(&self, act_id: &ActId) -> Option<ActStatus> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.acts.get(act_id).map(LegalAct::status))
    }

    /// Current snapshot of a stored company.
    pub fn snapshot(&self, company_id: &CompanyId) -> Option<LedgerSnapshot> {
        self.state.lock().ok().and_then(|state| {
            state
                .companies
                .get(company_id)
                .map(|(company, shareholders, version)| LedgerSnapshot {
                    company: company.clone(),
                    shareholders: shareholders.clone(),
                    version: *version,
                })
        })
    }

    /// Document records inserted so far.
    pub fn documents(&self) -> Vec<GeneratedDocument> {
        self.state
            .lock()
            .map(|state| state.documents.clone())
            .unwrap_or_default()
    }

    fn locked(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, LedgerState>, LedgerRepositoryError> {
        self.state
            .lock()
            .map_err(|_| LedgerRepositoryError::connection("ledger mutex poisoned"))
    }
}

#[async_trait]
impl LedgerRepository for InMemoryLedgerRepository {
    async fn find_act(&self, act_id: &ActId) -> Result<Option<LegalAct>, LedgerRepositoryError> {
        Ok(self.locked()?.acts.get(act_id).cloned())
    }

    async fn load_ledger(
        &self,
        company_id: &CompanyId,
    ) -> Result<Option<LedgerSnapshot>, LedgerRepositoryError> {
        Ok(self.locked()?.companies.get(company_id).map(
            |(company, shareholders, version)| LedgerSnapshot {
                company: company.clone(),
                shareholders: shareholders.clone(),
                version: *version,
            },
        ))
    }

    async fn update_act_status(
        &self,
        act_id: &ActId,
        status: ActStatus,
    ) -> Result<(), LedgerRepositoryError> {
        let mut state = self.locked()?;
        let act = state
            .acts
            .get_mut(act_id)
            .ok_or_else(|| LedgerRepositoryError::query(format!("act {act_id} not stored")))?;
        act.transition(status)
            .map_err(|err| LedgerRepositoryError::query(err.to_string()))
    }

    async fn commit_generation(
        &self,
        request: &CommitRequest,
    ) -> Result<(), LedgerRepositoryError> {
        let mut state = self.locked()?;

        let company_id = {
            let act = state.acts.get(&request.act_id).ok_or_else(|| {
                LedgerRepositoryError::query(format!("act {} not stored", request.act_id))
            })?;
            act.company_id()
        };

        {
            let (company, shareholders, version) =
                state.companies.get_mut(&company_id).ok_or_else(|| {
                    LedgerRepositoryError::query(format!("company {company_id} not stored"))
                })?;
            if *version != request.expected_version {
                return Err(LedgerRepositoryError::conflict(format!(
                    "expected version {}, store is at {version}",
                    request.expected_version
                )));
            }

            if let Some(update) = request.effects.capital_update {
                company
                    .apply_capital_change(update.share_capital, update.total_shares)
                    .map_err(|err| LedgerRepositoryError::query(err.to_string()))?;
            }
            if let Some(name) = &request.effects.president_name {
                company.set_president_name(name.clone());
            }
            for upsert in &request.effects.shareholder_upserts {
                match shareholders
                    .iter_mut()
                    .find(|holder| holder.id() == upsert.id())
                {
                    Some(existing) => *existing = upsert.clone(),
                    None => shareholders.push(upsert.clone()),
                }
            }
            *version = version.saturating_add(1);
        }

        let act = state.acts.get_mut(&request.act_id).ok_or_else(|| {
            LedgerRepositoryError::query(format!("act {} not stored", request.act_id))
        })?;
        act.transition(ActStatus::Generated)
            .map_err(|err| LedgerRepositoryError::query(err.to_string()))?;

        state.documents.push(request.document.clone());
        Ok(())
    }

    async fn commit_president_appointment(
        &self,
        company_id: &CompanyId,
        shareholder_id: &ShareholderId,
        expected_version: u64,
    ) -> Result<(), LedgerRepositoryError> {
        let mut state = self.locked()?;
        let (company, shareholders, version) =
            state.companies.get_mut(company_id).ok_or_else(|| {
                LedgerRepositoryError::query(format!("company {company_id} not stored"))
            })?;
        if *version != expected_version {
            return Err(LedgerRepositoryError::conflict(format!(
                "expected version {expected_version}, store is at {version}"
            )));
        }

        let appointee_name = shareholders
            .iter()
            .find(|holder| holder.id() == *shareholder_id)
            .map(|holder| holder.full_name().to_owned())
            .ok_or_else(|| {
                LedgerRepositoryError::query(format!(
                    "shareholder {shareholder_id} not on the ledger"
                ))
            })?;

        for holder in shareholders.iter_mut() {
            holder.set_president(holder.id() == *shareholder_id);
        }
        company.set_president_name(appointee_name);
        *version = version.saturating_add(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::{NaiveDate, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::company::{CompanyDraft, LegalForm};
    use crate::domain::legal_act::ActPayload;
    use crate::domain::money::Money;
    use crate::domain::shareholder::ShareholderDraft;

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

    #[rstest]
    #[tokio::test]
    async fn stale_version_is_rejected() {
        let repo = InMemoryLedgerRepository::new();
        let subject = company();
        let a = holder(subject.id(), "Amélie Durand", 1_000);
        repo.seed_company(subject.clone(), vec![a.clone()]);

        repo.commit_president_appointment(&subject.id(), &a.id(), 0)
            .await
            .expect("first appointment succeeds");

        let err = repo
            .commit_president_appointment(&subject.id(), &a.id(), 0)
            .await
            .expect_err("stale version rejected");
        assert!(matches!(err, LedgerRepositoryError::Conflict { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn appointment_clears_the_previous_president_flag() {
        let repo = InMemoryLedgerRepository::new();
        let subject = company();
        let mut a = holder(subject.id(), "Amélie Durand", 600);
        a.set_president(true);
        let b = holder(subject.id(), "Bruno Lemaire", 400);
        repo.seed_company(subject.clone(), vec![a, b.clone()]);

        repo.commit_president_appointment(&subject.id(), &b.id(), 0)
            .await
            .expect("appointment succeeds");

        let snapshot = repo.snapshot(&subject.id()).expect("company stored");
        let presidents: Vec<_> = snapshot
            .shareholders
            .iter()
            .filter(|holder| holder.is_president())
            .collect();
        assert_eq!(presidents.len(), 1);
        assert_eq!(
            presidents.first().map(|holder| holder.full_name()),
            Some("Bruno Lemaire")
        );
        assert_eq!(snapshot.company.president_name(), Some("Bruno Lemaire"));
        assert_eq!(snapshot.version, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn update_act_status_enforces_the_state_machine() {
        let repo = InMemoryLedgerRepository::new();
        let subject = company();
        let act = LegalAct::draft(
            subject.id(),
            ActPayload::FundsDepositAttestation {
                deposited_amount: Money::from_cents(500_000),
                depositary_name: "Banque de l'Ouest".to_owned(),
                deposit_date: NaiveDate::from_ymd_opt(2026, 1, 12).expect("valid date"),
            },
            Utc::now(),
        );
        repo.seed_act(act.clone());

        let err = repo
            .update_act_status(&act.id(), ActStatus::Generated)
            .await
            .expect_err("draft cannot jump to generated");
        assert!(matches!(err, LedgerRepositoryError::Query { .. }));

        repo.update_act_status(&act.id(), ActStatus::Validated)
            .await
            .expect("draft may validate");
        assert_eq!(repo.act_status(&act.id()), Some(ActStatus::Validated));
    }
}
