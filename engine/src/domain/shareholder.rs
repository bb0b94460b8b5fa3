//! Shareholder of record.
//!
//! A shareholder holds shares in exactly one company. Ownership
//! percentages and contribution amounts are derived from the share count
//! by the calculator, never stored here.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::company::CompanyId;

/// Stable shareholder identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareholderId(Uuid);

impl ShareholderId {
    /// Wrap an existing UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`ShareholderId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ShareholderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validation errors raised by [`Shareholder::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareholderValidationError {
    EmptyFullName,
}

impl fmt::Display for ShareholderValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFullName => write!(f, "shareholder full name must not be blank"),
        }
    }
}

impl std::error::Error for ShareholderValidationError {}

/// Input payload for [`Shareholder::new`].
#[derive(Debug, Clone)]
pub struct ShareholderDraft {
    pub id: ShareholderId,
    pub company_id: CompanyId,
    pub full_name: String,
    pub share_count: u64,
    pub is_president: bool,
    pub is_general_manager: bool,
}

/// A holder of record of some of a company's shares.
///
/// A zero share count is legal: holders are kept on the ledger after
/// transferring out so acts naming them as counterparty stay resolvable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shareholder {
    id: ShareholderId,
    company_id: CompanyId,
    full_name: String,
    share_count: u64,
    is_president: bool,
    is_general_manager: bool,
}

impl Shareholder {
    /// Creates a validated shareholder.
    pub fn new(draft: ShareholderDraft) -> Result<Self, ShareholderValidationError> {
        if draft.full_name.trim().is_empty() {
            return Err(ShareholderValidationError::EmptyFullName);
        }
        Ok(Self {
            id: draft.id,
            company_id: draft.company_id,
            full_name: draft.full_name,
            share_count: draft.share_count,
            is_president: draft.is_president,
            is_general_manager: draft.is_general_manager,
        })
    }

    /// Returns the shareholder id.
    pub const fn id(&self) -> ShareholderId {
        self.id
    }

    /// Returns the owning company id.
    pub const fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Returns the full name of the holder of record.
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// Returns the held share count.
    pub const fn share_count(&self) -> u64 {
        self.share_count
    }

    /// Whether this holder is the appointed president.
    pub const fn is_president(&self) -> bool {
        self.is_president
    }

    /// Whether this holder is a general manager.
    pub const fn is_general_manager(&self) -> bool {
        self.is_general_manager
    }

    /// Replace the held share count after a committed allocation act.
    pub const fn set_share_count(&mut self, share_count: u64) {
        self.share_count = share_count;
    }

    /// Set or clear the president flag. Only the presidency operation
    /// may call this, inside the same commit that clears the previous
    /// holder's flag.
    pub const fn set_president(&mut self, is_president: bool) {
        self.is_president = is_president;
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn rejects_blank_name() {
        let err = Shareholder::new(ShareholderDraft {
            id: ShareholderId::random(),
            company_id: CompanyId::random(),
            full_name: "  ".to_owned(),
            share_count: 10,
            is_president: false,
            is_general_manager: false,
        })
        .expect_err("blank name rejected");
        assert_eq!(err, ShareholderValidationError::EmptyFullName);
    }

    #[rstest]
    fn accepts_zero_share_count() {
        let holder = Shareholder::new(ShareholderDraft {
            id: ShareholderId::random(),
            company_id: CompanyId::random(),
            full_name: "Claire Fontaine".to_owned(),
            share_count: 0,
            is_president: true,
            is_general_manager: false,
        })
        .expect("zero count is legal");
        assert_eq!(holder.share_count(), 0);
        assert!(holder.is_president());
    }
}
