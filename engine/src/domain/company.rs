//! Client company aggregate.
//!
//! A company carries the authorized capital figures every other rule in
//! the engine is checked against. Construction enforces the nominal-value
//! exactness invariant: the share capital must divide evenly over the
//! total share count, to the cent.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::Money;

/// Stable company identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(Uuid);

impl CompanyId {
    /// Wrap an existing UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`CompanyId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Legal form of a managed company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalForm {
    /// Société par actions simplifiée.
    Sas,
    /// Société par actions simplifiée unipersonnelle.
    Sasu,
    /// Société à responsabilité limitée.
    Sarl,
    /// Entreprise unipersonnelle à responsabilité limitée.
    Eurl,
}

impl LegalForm {
    /// Full French denomination used in generated documents.
    pub const fn denomination(self) -> &'static str {
        match self {
            Self::Sas => "société par actions simplifiée",
            Self::Sasu => "société par actions simplifiée unipersonnelle",
            Self::Sarl => "société à responsabilité limitée",
            Self::Eurl => "entreprise unipersonnelle à responsabilité limitée",
        }
    }

    /// Short form acronym.
    pub const fn acronym(self) -> &'static str {
        match self {
            Self::Sas => "SAS",
            Self::Sasu => "SASU",
            Self::Sarl => "SARL",
            Self::Eurl => "EURL",
        }
    }
}

impl fmt::Display for LegalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.acronym())
    }
}

/// Validation errors raised by [`Company::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyValidationError {
    EmptyLegalName,
    EmptyRegisteredAddress,
    ZeroTotalShares,
    NegativeShareCapital { share_capital: Money },
    InexactNominalValue { share_capital: Money, total_shares: u64 },
}

impl fmt::Display for CompanyValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLegalName => write!(f, "company legal name must not be blank"),
            Self::EmptyRegisteredAddress => {
                write!(f, "company registered address must not be blank")
            }
            Self::ZeroTotalShares => write!(f, "company must have at least one share"),
            Self::NegativeShareCapital { share_capital } => {
                write!(f, "company share capital must not be negative (got {share_capital})")
            }
            Self::InexactNominalValue {
                share_capital,
                total_shares,
            } => write!(
                f,
                "share capital of {share_capital} does not divide evenly over {total_shares} shares"
            ),
        }
    }
}

impl std::error::Error for CompanyValidationError {}

/// Input payload for [`Company::new`].
#[derive(Debug, Clone)]
pub struct CompanyDraft {
    pub id: CompanyId,
    pub legal_name: String,
    pub legal_form: LegalForm,
    pub registered_address: String,
    pub share_capital: Money,
    pub total_shares: u64,
    pub president_name: Option<String>,
}

/// A client legal entity under management.
///
/// ## Invariants
/// - `share_capital` divides evenly over `total_shares` (exact per-share
///   nominal value to the cent).
/// - `total_shares` is positive.
///
/// Companies are archived, never deleted; capital figures change only
/// through a validated capital-change act.
///
/// # Examples
/// ```
/// use engine::domain::{Company, CompanyDraft, CompanyId, LegalForm, Money};
///
/// let company = Company::new(CompanyDraft {
///     id: CompanyId::random(),
///     legal_name: "Horizon Conseil".to_owned(),
///     legal_form: LegalForm::Sas,
///     registered_address: "4 rue des Lilas, 75011 Paris".to_owned(),
///     share_capital: Money::from_cents(1_000_000),
///     total_shares: 1_000,
///     president_name: Some("Claire Fontaine".to_owned()),
/// })?;
/// assert_eq!(company.total_shares(), 1_000);
/// # Ok::<(), engine::domain::CompanyValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    id: CompanyId,
    legal_name: String,
    legal_form: LegalForm,
    registered_address: String,
    share_capital: Money,
    total_shares: u64,
    president_name: Option<String>,
    archived: bool,
}

impl Company {
    /// Creates a validated company.
    pub fn new(draft: CompanyDraft) -> Result<Self, CompanyValidationError> {
        if draft.legal_name.trim().is_empty() {
            return Err(CompanyValidationError::EmptyLegalName);
        }
        if draft.registered_address.trim().is_empty() {
            return Err(CompanyValidationError::EmptyRegisteredAddress);
        }
        if draft.total_shares == 0 {
            return Err(CompanyValidationError::ZeroTotalShares);
        }
        if draft.share_capital.is_negative() {
            return Err(CompanyValidationError::NegativeShareCapital {
                share_capital: draft.share_capital,
            });
        }
        if !divides_evenly(draft.share_capital, draft.total_shares) {
            return Err(CompanyValidationError::InexactNominalValue {
                share_capital: draft.share_capital,
                total_shares: draft.total_shares,
            });
        }

        Ok(Self {
            id: draft.id,
            legal_name: draft.legal_name,
            legal_form: draft.legal_form,
            registered_address: draft.registered_address,
            share_capital: draft.share_capital,
            total_shares: draft.total_shares,
            president_name: draft.president_name,
            archived: false,
        })
    }

    /// Returns the company id.
    pub const fn id(&self) -> CompanyId {
        self.id
    }

    /// Returns the legal name.
    pub fn legal_name(&self) -> &str {
        self.legal_name.as_str()
    }

    /// Returns the legal form.
    pub const fn legal_form(&self) -> LegalForm {
        self.legal_form
    }

    /// Returns the registered address.
    pub fn registered_address(&self) -> &str {
        self.registered_address.as_str()
    }

    /// Returns the authorized share capital.
    pub const fn share_capital(&self) -> Money {
        self.share_capital
    }

    /// Returns the authorized total share count.
    pub const fn total_shares(&self) -> u64 {
        self.total_shares
    }

    /// Returns the appointed president's name, if any.
    pub fn president_name(&self) -> Option<&str> {
        self.president_name.as_deref()
    }

    /// Whether the company has been archived.
    pub const fn is_archived(&self) -> bool {
        self.archived
    }

    /// Archive the company. Archived companies accept no further acts.
    pub const fn archive(&mut self) {
        self.archived = true;
    }

    /// Record a new president name after an appointment commits.
    pub fn set_president_name(&mut self, name: impl Into<String>) {
        self.president_name = Some(name.into());
    }

    /// Apply committed capital figures from an executed capital-change
    /// act. The new figures must satisfy the exactness invariant.
    pub fn apply_capital_change(
        &mut self,
        share_capital: Money,
        total_shares: u64,
    ) -> Result<(), CompanyValidationError> {
        if total_shares == 0 {
            return Err(CompanyValidationError::ZeroTotalShares);
        }
        if share_capital.is_negative() {
            return Err(CompanyValidationError::NegativeShareCapital { share_capital });
        }
        if !divides_evenly(share_capital, total_shares) {
            return Err(CompanyValidationError::InexactNominalValue {
                share_capital,
                total_shares,
            });
        }
        self.share_capital = share_capital;
        self.total_shares = total_shares;
        Ok(())
    }
}

#[expect(
    clippy::integer_division_remainder_used,
    reason = "exactness is precisely the remainder being zero"
)]
fn divides_evenly(amount: Money, shares: u64) -> bool {
    let Ok(shares) = i64::try_from(shares) else {
        return false;
    };
    shares != 0 && amount.cents() % shares == 0
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    fn draft() -> CompanyDraft {
        CompanyDraft {
            id: CompanyId::random(),
            legal_name: "Horizon Conseil".to_owned(),
            legal_form: LegalForm::Sas,
            registered_address: "4 rue des Lilas, 75011 Paris".to_owned(),
            share_capital: Money::from_cents(1_000_000),
            total_shares: 1_000,
            president_name: Some("Claire Fontaine".to_owned()),
        }
    }

    #[rstest]
    fn accepts_exact_nominal_value() {
        let company = Company::new(draft()).expect("valid company");
        assert_eq!(company.share_capital(), Money::from_cents(1_000_000));
        assert!(!company.is_archived());
    }

    #[rstest]
    fn rejects_inexact_nominal_value() {
        let mut input = draft();
        input.share_capital = Money::from_cents(1_000_001);
        let err = Company::new(input).expect_err("inexact capital rejected");
        assert_eq!(
            err,
            CompanyValidationError::InexactNominalValue {
                share_capital: Money::from_cents(1_000_001),
                total_shares: 1_000,
            }
        );
    }

    #[rstest]
    #[case("", "4 rue des Lilas, 75011 Paris")]
    #[case("   ", "4 rue des Lilas, 75011 Paris")]
    fn rejects_blank_legal_name(#[case] name: &str, #[case] address: &str) {
        let mut input = draft();
        input.legal_name = name.to_owned();
        input.registered_address = address.to_owned();
        let err = Company::new(input).expect_err("blank name rejected");
        assert_eq!(err, CompanyValidationError::EmptyLegalName);
    }

    #[rstest]
    fn rejects_zero_shares() {
        let mut input = draft();
        input.total_shares = 0;
        let err = Company::new(input).expect_err("zero shares rejected");
        assert_eq!(err, CompanyValidationError::ZeroTotalShares);
    }

    #[rstest]
    fn capital_change_keeps_invariant() {
        let mut company = Company::new(draft()).expect("valid company");
        company
            .apply_capital_change(Money::from_cents(800_000), 800)
            .expect("exact change accepted");
        assert_eq!(company.total_shares(), 800);

        let err = company
            .apply_capital_change(Money::from_cents(800_001), 800)
            .expect_err("inexact change rejected");
        assert!(matches!(err, CompanyValidationError::InexactNominalValue { .. }));
    }
}
