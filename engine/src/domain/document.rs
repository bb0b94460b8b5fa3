//! Generated document artifact references.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::legal_act::ActId;

/// Stable document identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generate a new random [`DocumentId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Reference to a rendered binary artifact.
///
/// Created exactly once per successful generation and never mutated;
/// the artifact itself lives with the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    /// Document identifier.
    pub id: DocumentId,
    /// The act this document was generated from.
    pub act_id: ActId,
    /// File name under which the artifact was stored.
    pub file_name: String,
    /// MIME content type of the artifact.
    pub content_type: String,
    /// Artifact size in bytes.
    pub byte_length: u64,
    /// Locator returned by the storage collaborator.
    pub storage_locator: String,
    /// When the document was generated.
    pub generated_at: DateTime<Utc>,
    /// Acting user recorded for audit attribution.
    pub generated_by: String,
}
