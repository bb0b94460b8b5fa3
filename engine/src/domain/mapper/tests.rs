//! Mapper coverage: placeholder contracts, determinism, and the
//! round-trip property on formatted values.

use chrono::{NaiveDate, Utc};
use rstest::rstest;

use super::*;
use crate::domain::company::{CompanyDraft, CompanyId, LegalForm};
use crate::domain::firm::FirmProfile;
use crate::domain::legal_act::{
    ActPayload, FoundingAllocation, MeetingVote, ProfitAllocation,
};
use crate::domain::money::Money;
use crate::domain::shareholder::{Shareholder, ShareholderDraft, ShareholderId};

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

fn firm() -> FirmProfile {
    FirmProfile::new(
        "Cabinet Verdier & Associés",
        "18 avenue de la République, 69003 Lyon",
        "Pauline Verdier",
    )
    .expect("valid firm profile")
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

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 12).expect("valid date")
}

#[rstest]
fn statutes_map_carries_the_allocation_table() {
    let subject = company();
    let table = CapTable::build(&subject, &[]).expect("consistent table");
    let act = LegalAct::draft(
        subject.id(),
        ActPayload::IncorporationStatutes {
            allocations: vec![
                FoundingAllocation {
                    full_name: "Claire Fontaine".to_owned(),
                    share_count: 600,
                    contribution: Money::from_cents(600_000),
                },
                FoundingAllocation {
                    full_name: "Marc Aubry".to_owned(),
                    share_count: 400,
                    contribution: Money::from_cents(400_000),
                },
            ],
            president_name: "Claire Fontaine".to_owned(),
            signature_date: date(),
        },
        Utc::now(),
    );

    let fields = map(&act, &subject, &table, &firm()).expect("complete mapping");

    assert_eq!(
        fields.get("societe_denomination").map(String::as_str),
        Some("Horizon Conseil")
    );
    assert_eq!(
        fields.get("societe_capital").map(String::as_str),
        Some("10\u{a0}000,00\u{a0}€")
    );
    assert_eq!(
        fields.get("valeur_nominale").map(String::as_str),
        Some("10,00\u{a0}€")
    );
    assert_eq!(
        fields.get("associe_1_nom").map(String::as_str),
        Some("Claire Fontaine")
    );
    assert_eq!(
        fields.get("associe_1_pourcentage").map(String::as_str),
        Some("60,00\u{a0}%")
    );
    assert_eq!(
        fields.get("associe_2_apport").map(String::as_str),
        Some("4\u{a0}000,00\u{a0}€")
    );
    assert_eq!(
        fields.get("date_signature").map(String::as_str),
        Some("12 janvier 2026")
    );
    assert_eq!(
        fields.get("cabinet_nom").map(String::as_str),
        Some("Cabinet Verdier & Associés")
    );
}

#[rstest]
fn transfer_map_round_trips_amounts_and_dates() {
    let subject = company();
    let transferor = holder(subject.id(), "Claire Fontaine", 1_000);
    let table = CapTable::build(&subject, std::slice::from_ref(&transferor))
        .expect("consistent table");
    let act = LegalAct::draft(
        subject.id(),
        ActPayload::ShareTransfer {
            transferor_id: transferor.id(),
            transferee_name: "Marc Aubry".to_owned(),
            share_count: 200,
            unit_price: Money::from_cents(1_500),
            declared_total_price: Money::from_cents(300_000),
            transfer_date: date(),
        },
        Utc::now(),
    );

    let fields = map(&act, &subject, &table, &firm()).expect("complete mapping");

    let formatted_total = fields.get("prix_total").expect("prix_total present");
    assert_eq!(parse_eur(formatted_total), Ok(Money::from_cents(300_000)));

    let formatted_date = fields.get("date_cession").expect("date_cession present");
    assert_eq!(parse_long_date(formatted_date), Ok(date()));
}

#[rstest]
fn mapping_is_deterministic() {
    let subject = company();
    let transferor = holder(subject.id(), "Claire Fontaine", 1_000);
    let table = CapTable::build(&subject, std::slice::from_ref(&transferor))
        .expect("consistent table");
    let act = LegalAct::draft(
        subject.id(),
        ActPayload::ShareTransfer {
            transferor_id: transferor.id(),
            transferee_name: "Marc Aubry".to_owned(),
            share_count: 200,
            unit_price: Money::from_cents(1_500),
            declared_total_price: Money::from_cents(300_000),
            transfer_date: date(),
        },
        Utc::now(),
    );

    let first = map(&act, &subject, &table, &firm()).expect("complete mapping");
    let second = map(&act, &subject, &table, &firm()).expect("complete mapping");
    assert_eq!(first, second);
}

#[rstest]
fn dividends_without_an_amount_expose_a_catalog_gap() {
    // The validation catalog requires the amount; mapping an act that
    // skipped validation must fail rather than invent a default.
    let subject = company();
    let owner = holder(subject.id(), "Claire Fontaine", 1_000);
    let table =
        CapTable::build(&subject, std::slice::from_ref(&owner)).expect("consistent table");
    let act = LegalAct::draft(
        subject.id(),
        ActPayload::OrdinaryMeeting {
            meeting_date: date(),
            vote: MeetingVote {
                votes_for: 1_000,
                votes_against: 0,
                votes_abstain: 0,
            },
            profit_allocation: ProfitAllocation::Dividendes,
            distributed_amount: None,
        },
        Utc::now(),
    );

    let err = map(&act, &subject, &table, &firm()).expect_err("gap surfaces");
    assert_eq!(err, IncompleteMappingError::new("montant_distribue"));
}

#[rstest]
fn missing_president_exposes_a_catalog_gap() {
    let subject = Company::new(CompanyDraft {
        id: CompanyId::random(),
        legal_name: "Horizon Conseil".to_owned(),
        legal_form: LegalForm::Sas,
        registered_address: "4 rue des Lilas, 75011 Paris".to_owned(),
        share_capital: Money::from_cents(1_000_000),
        total_shares: 1_000,
        president_name: None,
    })
    .expect("valid company");
    let table = CapTable::build(&subject, &[]).expect("consistent table");
    let act = LegalAct::draft(
        subject.id(),
        ActPayload::MissionLetter {
            engagement_description: "Tenue comptable annuelle".to_owned(),
            annual_fee: Money::from_cents(480_000),
            start_date: date(),
        },
        Utc::now(),
    );

    let err = map(&act, &subject, &table, &firm()).expect_err("gap surfaces");
    assert_eq!(err, IncompleteMappingError::new("president_nom"));
}

#[rstest]
fn template_names_follow_the_act_type() {
    use crate::domain::legal_act::ActType;

    assert_eq!(template_name(ActType::ShareTransfer), "cession_actions");
    assert_eq!(
        template_name(ActType::FundsDepositAttestation),
        "attestation_depot_fonds"
    );
    assert!(content_type().contains("officedocument"));
}
