//! Generation orchestration service.
//!
//! The single write path of the engine: load the act and a versioned
//! ledger snapshot, run the rule catalog, derive the computed values and
//! ledger effects, map and render the document, store the artifact, and
//! commit everything against the snapshot version. Side effects happen
//! only after validation and computation succeed; a commit that loses
//! the version race compensates by deleting the stored artifact.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::captable::ArithmeticInconsistency;
use crate::domain::company::CompanyValidationError;
use crate::domain::derived::CapTable;
use crate::domain::document::{DocumentId, GeneratedDocument};
use crate::domain::effects::{self, EffectsError};
use crate::domain::error::{GenerationError, InfrastructureError};
use crate::domain::firm::FirmProfile;
use crate::domain::legal_act::{ActId, ActStatus, LegalAct};
use crate::domain::mapper;
use crate::domain::ports::{
    CommitRequest, DocumentStore, DocumentStoreError, GenerationCommand, IdentityProvider,
    IdentityProviderError, LedgerRepository, LedgerRepositoryError, LedgerSnapshot,
    TemplateRenderer, TemplateRendererError,
};
use crate::domain::validation::{self, ValidationOutcome};

/// Orchestrator implementing the generation driving port.
#[derive(Clone)]
pub struct GenerationService<L, R, S, I> {
    ledger: Arc<L>,
    renderer: Arc<R>,
    store: Arc<S>,
    identity: Arc<I>,
    clock: Arc<dyn Clock>,
    firm: FirmProfile,
}

impl<L, R, S, I> GenerationService<L, R, S, I> {
    /// Create a new generation service over its collaborator ports.
    ///
    /// The firm profile is injected here, never read from ambient state,
    /// so one process can serve several firms.
    pub fn new(
        ledger: Arc<L>,
        renderer: Arc<R>,
        store: Arc<S>,
        identity: Arc<I>,
        clock: Arc<dyn Clock>,
        firm: FirmProfile,
    ) -> Self {
        Self {
            ledger,
            renderer,
            store,
            identity,
            clock,
            firm,
        }
    }
}

impl<L, R, S, I> GenerationService<L, R, S, I>
where
    L: LedgerRepository,
    R: TemplateRenderer,
    S: DocumentStore,
    I: IdentityProvider,
{
    async fn load_act(&self, act_id: &ActId) -> Result<LegalAct, GenerationError> {
        self.ledger
            .find_act(act_id)
            .await
            .map_err(map_ledger_error)?
            .ok_or_else(|| GenerationError::NotFound {
                entity: "legal act",
                id: act_id.to_string(),
            })
    }

    async fn load_snapshot(&self, act: &LegalAct) -> Result<LedgerSnapshot, GenerationError> {
        self.ledger
            .load_ledger(&act.company_id())
            .await
            .map_err(map_ledger_error)?
            .ok_or_else(|| GenerationError::NotFound {
                entity: "company",
                id: act.company_id().to_string(),
            })
    }

    /// Persist the validation verdict on the act's lifecycle state.
    async fn record_verdict(
        &self,
        act: &LegalAct,
        outcome: &ValidationOutcome,
    ) -> Result<(), GenerationError> {
        if outcome.is_blocked() {
            // The rejection itself is what the caller needs; a failed
            // status write must not mask the validation verdict.
            if let Err(error) = self
                .ledger
                .update_act_status(&act.id(), ActStatus::Rejected)
                .await
            {
                tracing::warn!(act_id = %act.id(), %error, "failed to persist rejected status");
            }
            return Ok(());
        }
        if act.status() != ActStatus::Validated {
            self.ledger
                .update_act_status(&act.id(), ActStatus::Validated)
                .await
                .map_err(map_ledger_error)?;
        }
        Ok(())
    }
}

#[async_trait]
impl<L, R, S, I> GenerationCommand for GenerationService<L, R, S, I>
where
    L: LedgerRepository,
    R: TemplateRenderer,
    S: DocumentStore,
    I: IdentityProvider,
{
    async fn generate(&self, act_id: &ActId) -> Result<GeneratedDocument, GenerationError> {
        let act = self.load_act(act_id).await?;
        let snapshot = self.load_snapshot(&act).await?;

        let outcome = validation::validate(&act, &snapshot.company, &snapshot.shareholders);
        self.record_verdict(&act, &outcome).await?;
        if outcome.is_blocked() {
            let (blocking, advisory) = outcome.into_parts();
            return Err(GenerationError::ValidationFailed { blocking, advisory });
        }

        let cap_table = CapTable::build(&snapshot.company, &snapshot.shareholders)
            .map_err(GenerationError::Arithmetic)?;
        let ledger_effects = effects::effects_of(&act, &snapshot.company, &snapshot.shareholders)
            .map_err(map_effects_error)?;
        let fields =
            mapper::map(&act, &snapshot.company, &cap_table, &self.firm).map_err(|error| {
                tracing::error!(
                    act_id = %act.id(),
                    placeholder = %error.placeholder,
                    "validation catalog gap: mapper could not resolve a placeholder"
                );
                GenerationError::IncompleteMapping(error)
            })?;

        let template = mapper::template_name(act.act_type());
        let bytes = self
            .renderer
            .render(template, &fields)
            .await
            .map_err(map_renderer_error)?;
        let actor = self
            .identity
            .current_actor()
            .await
            .map_err(map_identity_error)?;

        let generated_at = self.clock.utc();
        let file_name = format!(
            "{template}_{}_{}.docx",
            generated_at.format("%Y%m%d"),
            act.id()
        );
        let path = format!("documents/{}/{file_name}", act.company_id());
        let locator = self
            .store
            .put(&path, &bytes, mapper::content_type())
            .await
            .map_err(map_store_error)?;

        let document = GeneratedDocument {
            id: DocumentId::random(),
            act_id: act.id(),
            file_name,
            content_type: mapper::content_type().to_owned(),
            byte_length: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
            storage_locator: locator.clone(),
            generated_at,
            generated_by: actor.display_name,
        };

        let request = CommitRequest {
            act_id: act.id(),
            effects: ledger_effects,
            document: document.clone(),
            expected_version: snapshot.version,
        };
        if let Err(commit_error) = self.ledger.commit_generation(&request).await {
            // Compensating action: the artifact is orphaned once the
            // commit is refused. A failed delete is logged, never masks
            // the commit error.
            if let Err(delete_error) = self.store.delete(&locator).await {
                tracing::warn!(
                    %locator,
                    error = %delete_error,
                    "failed to delete orphaned artifact after commit failure"
                );
            }
            return Err(map_ledger_error(commit_error));
        }

        tracing::info!(
            act_id = %act.id(),
            company_id = %act.company_id(),
            template,
            locator = %document.storage_locator,
            "document generated"
        );
        Ok(document)
    }

    async fn validate(&self, act_id: &ActId) -> Result<ValidationOutcome, GenerationError> {
        let act = self.load_act(act_id).await?;
        let snapshot = self.load_snapshot(&act).await?;

        let outcome = validation::validate(&act, &snapshot.company, &snapshot.shareholders);
        if !outcome.is_blocked() {
            // Derived-value pass: surfaces overflow and exactness issues
            // the way generation would, still without writing anything.
            CapTable::build(&snapshot.company, &snapshot.shareholders)
                .map_err(GenerationError::Arithmetic)?;
        }
        Ok(outcome)
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

fn map_effects_error(error: EffectsError) -> GenerationError {
    match error {
        EffectsError::MissingShareholder { shareholder_id } => GenerationError::NotFound {
            entity: "shareholder",
            id: shareholder_id.to_string(),
        },
        EffectsError::Arithmetic(inconsistency) => GenerationError::Arithmetic(inconsistency),
        EffectsError::Capital(CompanyValidationError::InexactNominalValue {
            share_capital,
            total_shares,
        }) => GenerationError::Arithmetic(ArithmeticInconsistency::InexactNominalValue {
            share_capital,
            total_shares,
        }),
        EffectsError::Capital(other) => {
            tracing::error!(error = %other, "ledger effects derivation failed post-validation");
            GenerationError::Infrastructure(InfrastructureError::Persistence {
                message: format!("ledger effects inconsistent: {other}"),
            })
        }
        EffectsError::Counterparty(invalid) => {
            tracing::error!(error = %invalid, "counterparty derivation failed post-validation");
            GenerationError::Infrastructure(InfrastructureError::Persistence {
                message: format!("counterparty row could not be constructed: {invalid}"),
            })
        }
    }
}

fn map_renderer_error(error: TemplateRendererError) -> GenerationError {
    GenerationError::Infrastructure(InfrastructureError::Rendering {
        message: error.to_string(),
    })
}

fn map_store_error(error: DocumentStoreError) -> GenerationError {
    GenerationError::Infrastructure(InfrastructureError::Storage {
        message: error.to_string(),
    })
}

fn map_identity_error(error: IdentityProviderError) -> GenerationError {
    GenerationError::Infrastructure(InfrastructureError::Identity {
        message: error.to_string(),
    })
}

#[cfg(test)]
#[path = "generation_tests.rs"]
mod tests;
