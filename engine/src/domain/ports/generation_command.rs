//! Driving port for document generation.

use async_trait::async_trait;

use crate::domain::document::GeneratedDocument;
use crate::domain::error::GenerationError;
use crate::domain::legal_act::ActId;
use crate::domain::validation::ValidationOutcome;

/// Entry point exposed to inbound adapters.
#[async_trait]
pub trait GenerationCommand: Send + Sync {
    /// Validate an act, render its document, persist the artifact and
    /// the ledger effects, and return the document record.
    async fn generate(&self, act_id: &ActId) -> Result<GeneratedDocument, GenerationError>;

    /// Dry run: the full rule catalog and derived-value pass with no
    /// write and no rendering. Used by interactive forms to surface
    /// warnings before commit.
    async fn validate(&self, act_id: &ActId) -> Result<ValidationOutcome, GenerationError>;
}
