//! Document data mapper.
//!
//! Transforms a validated `{Company, Shareholder[], LegalAct}` triple
//! into the flat placeholder map of the act's template. Pure functions,
//! no I/O. The mapper never invents a default for a legally required
//! field: anything it cannot resolve was missed by the validation
//! catalog and surfaces as [`IncompleteMappingError`].

use std::collections::BTreeMap;

use crate::domain::company::Company;
use crate::domain::derived::CapTable;
use crate::domain::firm::FirmProfile;
use crate::domain::legal_act::{ActType, LegalAct};

mod acts;
mod format;

pub use format::{
    ParseAmountError, ParseDateError, format_basis_points, format_count, format_eur,
    format_long_date, parse_eur, parse_long_date,
};

/// Flat placeholder map handed to the template renderer.
///
/// A `BTreeMap` keeps placeholder order deterministic, so two runs over
/// the same act produce byte-identical field sets.
pub type FieldMap = BTreeMap<String, String>;

/// A placeholder the mapper cannot resolve from a validated act.
///
/// By construction this is a gap in the validation catalog, not operator
/// error; the orchestrator logs it at error severity and surfaces a
/// generic failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("document template placeholder '{placeholder}' cannot be resolved from the validated act")]
pub struct IncompleteMappingError {
    /// The unresolvable placeholder.
    pub placeholder: String,
}

impl IncompleteMappingError {
    pub(crate) fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }
}

/// Template document name for an act type.
pub const fn template_name(act_type: ActType) -> &'static str {
    act_type.as_str()
}

/// Content type of every rendered artifact.
pub const fn content_type() -> &'static str {
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
}

/// Map a validated act onto its template's placeholder contract.
///
/// The cap table must come from the same shareholder snapshot the act
/// was validated against.
pub fn map(
    act: &LegalAct,
    company: &Company,
    cap_table: &CapTable,
    firm: &FirmProfile,
) -> Result<FieldMap, IncompleteMappingError> {
    let mut fields = FieldMap::new();
    common_fields(&mut fields, company, cap_table, firm);
    acts::act_fields(&mut fields, act, company, cap_table)?;
    Ok(fields)
}

fn common_fields(
    fields: &mut FieldMap,
    company: &Company,
    cap_table: &CapTable,
    firm: &FirmProfile,
) {
    fields.insert(
        "societe_denomination".to_owned(),
        company.legal_name().to_owned(),
    );
    fields.insert(
        "societe_forme".to_owned(),
        company.legal_form().denomination().to_owned(),
    );
    fields.insert(
        "societe_forme_sigle".to_owned(),
        company.legal_form().acronym().to_owned(),
    );
    fields.insert(
        "societe_siege".to_owned(),
        company.registered_address().to_owned(),
    );
    fields.insert(
        "societe_capital".to_owned(),
        format_eur(company.share_capital()),
    );
    fields.insert(
        "societe_nombre_actions".to_owned(),
        format_count(company.total_shares()),
    );
    fields.insert(
        "valeur_nominale".to_owned(),
        format_eur(cap_table.nominal_value),
    );
    fields.insert("cabinet_nom".to_owned(), firm.firm_name().to_owned());
    fields.insert("cabinet_adresse".to_owned(), firm.firm_address().to_owned());
    fields.insert(
        "cabinet_signataire".to_owned(),
        firm.signatory_name().to_owned(),
    );
}

#[cfg(test)]
mod tests;
