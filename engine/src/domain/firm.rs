//! Accounting firm identity.
//!
//! The firm whose letterhead and signatory appear on generated
//! documents. Always an explicitly injected value, never ambient state,
//! so the engine serves any firm without code change.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors raised by [`FirmProfile::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FirmProfileValidationError {
    EmptyFirmName,
    EmptyFirmAddress,
    EmptySignatoryName,
}

impl fmt::Display for FirmProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFirmName => write!(f, "firm name must not be blank"),
            Self::EmptyFirmAddress => write!(f, "firm address must not be blank"),
            Self::EmptySignatoryName => write!(f, "firm signatory name must not be blank"),
        }
    }
}

impl std::error::Error for FirmProfileValidationError {}

/// Identity of the accounting firm operating the engine.
///
/// # Examples
/// ```
/// use engine::domain::FirmProfile;
///
/// let firm = FirmProfile::new(
///     "Cabinet Verdier & Associés",
///     "18 avenue de la République, 69003 Lyon",
///     "Pauline Verdier",
/// )?;
/// assert_eq!(firm.signatory_name(), "Pauline Verdier");
/// # Ok::<(), engine::domain::FirmProfileValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmProfile {
    firm_name: String,
    firm_address: String,
    signatory_name: String,
}

impl FirmProfile {
    /// Creates a validated firm profile.
    pub fn new(
        firm_name: impl Into<String>,
        firm_address: impl Into<String>,
        signatory_name: impl Into<String>,
    ) -> Result<Self, FirmProfileValidationError> {
        let firm_name = firm_name.into();
        let firm_address = firm_address.into();
        let signatory_name = signatory_name.into();
        if firm_name.trim().is_empty() {
            return Err(FirmProfileValidationError::EmptyFirmName);
        }
        if firm_address.trim().is_empty() {
            return Err(FirmProfileValidationError::EmptyFirmAddress);
        }
        if signatory_name.trim().is_empty() {
            return Err(FirmProfileValidationError::EmptySignatoryName);
        }
        Ok(Self {
            firm_name,
            firm_address,
            signatory_name,
        })
    }

    /// Returns the firm's trading name.
    pub fn firm_name(&self) -> &str {
        self.firm_name.as_str()
    }

    /// Returns the firm's office address.
    pub fn firm_address(&self) -> &str {
        self.firm_address.as_str()
    }

    /// Returns the partner signing engagement letters.
    pub fn signatory_name(&self) -> &str {
        self.signatory_name.as_str()
    }
}
