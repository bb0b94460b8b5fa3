//! Driving port for president appointments.

use async_trait::async_trait;

use crate::domain::company::CompanyId;
use crate::domain::error::GenerationError;
use crate::domain::shareholder::ShareholderId;

/// Explicit presidency operation.
///
/// Replaces implicit flag propagation: the prior president is cleared
/// and the new one set inside the same persistence transaction as the
/// invariant check, so at most one president exists at any time.
#[async_trait]
pub trait PresidencyCommand: Send + Sync {
    /// Appoint a shareholder of record as president.
    async fn appoint_president(
        &self,
        company_id: &CompanyId,
        shareholder_id: &ShareholderId,
    ) -> Result<(), GenerationError>;
}
