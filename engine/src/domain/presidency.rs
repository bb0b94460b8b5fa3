//! Presidency domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::company::CompanyId;
use crate::domain::error::{GenerationError, InfrastructureError};
use crate::domain::ports::{LedgerRepository, LedgerRepositoryError, PresidencyCommand};
use crate::domain::shareholder::ShareholderId;

/// Service implementing the presidency driving port.
#[derive(Clone)]
pub struct PresidencyService<L> {
    ledger: Arc<L>,
}

impl<L> PresidencyService<L> {
    /// Create a new presidency service over the ledger port.
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl<L> PresidencyCommand for PresidencyService<L>
where
    L: LedgerRepository,
{
    async fn appoint_president(
        &self,
        company_id: &CompanyId,
        shareholder_id: &ShareholderId,
    ) -> Result<(), GenerationError> {
        let snapshot = self
            .ledger
            .load_ledger(company_id)
            .await
            .map_err(map_ledger_error)?
            .ok_or_else(|| GenerationError::NotFound {
                entity: "company",
                id: company_id.to_string(),
            })?;

        if !snapshot
            .shareholders
            .iter()
            .any(|holder| holder.id() == *shareholder_id)
        {
            return Err(GenerationError::NotFound {
                entity: "shareholder",
                id: shareholder_id.to_string(),
            });
        }

        self.ledger
            .commit_president_appointment(company_id, shareholder_id, snapshot.version)
            .await
            .map_err(map_ledger_error)
    }
}

fn map_ledger_error(error: LedgerRepositoryError) -> GenerationError {
    match error {
        LedgerRepositoryError::Conflict { .. } => GenerationError::ConcurrentModification,
        LedgerRepositoryError::Connection { message } | LedgerRepositoryError::Query { message } => {
            GenerationError::Infrastructure(InfrastructureError::Persistence { message })
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::company::{Company, CompanyDraft, LegalForm};
    use crate::domain::money::Money;
    use crate::domain::ports::InMemoryLedgerRepository;
    use crate::domain::shareholder::{Shareholder, ShareholderDraft};

    fn company() -> Company {
        Company::new(CompanyDraft {
            id: CompanyId::random(),
            legal_name: "Horizon Conseil".to_owned(),
            legal_form: LegalForm::Sas,
            registered_address: "4 rue des Lilas, 75011 Paris".to_owned(),
            share_capital: Money::from_cents(1_000_000),
            total_shares: 1_000,
            president_name: Some("Amélie Durand".to_owned()),
        })
        .expect("valid company")
    }

    fn holder(company_id: CompanyId, name: &str, is_president: bool) -> Shareholder {
        Shareholder::new(ShareholderDraft {
            id: ShareholderId::random(),
            company_id,
            full_name: name.to_owned(),
            share_count: 500,
            is_president,
            is_general_manager: false,
        })
        .expect("valid shareholder")
    }

    #[rstest]
    #[tokio::test]
    async fn appointment_replaces_the_prior_president() {
        let ledger = Arc::new(InMemoryLedgerRepository::new());
        let subject = company();
        let a = holder(subject.id(), "Amélie Durand", true);
        let b = holder(subject.id(), "Bruno Lemaire", false);
        ledger.seed_company(subject.clone(), vec![a, b.clone()]);

        let service = PresidencyService::new(Arc::clone(&ledger));
        service
            .appoint_president(&subject.id(), &b.id())
            .await
            .expect("appointment succeeds");

        let snapshot = ledger.snapshot(&subject.id()).expect("company stored");
        let presidents: Vec<_> = snapshot
            .shareholders
            .iter()
            .filter(|h| h.is_president())
            .map(|h| h.full_name().to_owned())
            .collect();
        assert_eq!(presidents, vec!["Bruno Lemaire".to_owned()]);
        assert_eq!(snapshot.company.president_name(), Some("Bruno Lemaire"));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_shareholder_is_not_found() {
        let ledger = Arc::new(InMemoryLedgerRepository::new());
        let subject = company();
        ledger.seed_company(subject.clone(), Vec::new());

        let service = PresidencyService::new(Arc::clone(&ledger));
        let err = service
            .appoint_president(&subject.id(), &ShareholderId::random())
            .await
            .expect_err("unknown shareholder rejected");
        assert!(matches!(err, GenerationError::NotFound { entity: "shareholder", .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_company_is_not_found() {
        let ledger = Arc::new(InMemoryLedgerRepository::new());
        let service = PresidencyService::new(Arc::clone(&ledger));
        let err = service
            .appoint_president(&CompanyId::random(), &ShareholderId::random())
            .await
            .expect_err("unknown company rejected");
        assert!(matches!(err, GenerationError::NotFound { entity: "company", .. }));
    }
}
