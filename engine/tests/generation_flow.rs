//! End-to-end generation flow over the public crate surface: statutes,
//! then a transfer, then meeting minutes, against one in-memory ledger.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use mockable::DefaultClock;

use engine::domain::ports::{
    FixtureDocumentStore, FixtureIdentityProvider, FixtureTemplateRenderer,
    InMemoryLedgerRepository,
};
use engine::domain::{
    ActPayload, ActStatus, Company, CompanyDraft, CompanyId, FirmProfile, FoundingAllocation,
    LegalAct, LegalForm, MeetingVote, Money, ProfitAllocation,
};
use engine::{GenerationCommand, GenerationService};

fn firm() -> FirmProfile {
    FirmProfile::new(
        "Cabinet Verdier & Associés",
        "18 avenue de la République, 69003 Lyon",
        "Pauline Verdier",
    )
    .expect("valid firm profile")
}

fn service(
    ledger: &Arc<InMemoryLedgerRepository>,
) -> GenerationService<
    InMemoryLedgerRepository,
    FixtureTemplateRenderer,
    FixtureDocumentStore,
    FixtureIdentityProvider,
> {
    GenerationService::new(
        Arc::clone(ledger),
        Arc::new(FixtureTemplateRenderer),
        Arc::new(FixtureDocumentStore),
        Arc::new(FixtureIdentityProvider),
        Arc::new(DefaultClock),
        firm(),
    )
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).expect("valid date")
}

#[tokio::test]
async fn a_company_lifecycle_generates_three_documents() {
    let ledger = Arc::new(InMemoryLedgerRepository::new());
    let company = Company::new(CompanyDraft {
        id: CompanyId::random(),
        legal_name: "Horizon Conseil".to_owned(),
        legal_form: LegalForm::Sas,
        registered_address: "4 rue des Lilas, 75011 Paris".to_owned(),
        share_capital: Money::from_cents(1_000_000),
        total_shares: 1_000,
        president_name: Some("Claire Fontaine".to_owned()),
    })
    .expect("valid company");
    ledger.seed_company(company.clone(), Vec::new());
    let subject = service(&ledger);

    // Incorporation statutes allocate the full share count.
    let statutes = LegalAct::draft(
        company.id(),
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
            signature_date: date(2),
        },
        Utc::now(),
    );
    ledger.seed_act(statutes.clone());
    let statutes_doc = subject
        .generate(&statutes.id())
        .await
        .expect("statutes generate");
    assert!(statutes_doc.file_name.starts_with("statuts_constitutifs_"));

    let snapshot = ledger.snapshot(&company.id()).expect("company stored");
    assert_eq!(snapshot.version, 1);
    assert_eq!(snapshot.shareholders.len(), 2);

    // Claire sells 100 shares to a newcomer.
    let claire_id = snapshot
        .shareholders
        .iter()
        .find(|holder| holder.full_name() == "Claire Fontaine")
        .map(engine::domain::Shareholder::id)
        .expect("claire on the ledger");
    let transfer = LegalAct::draft(
        company.id(),
        ActPayload::ShareTransfer {
            transferor_id: claire_id,
            transferee_name: "Nadia Kaci".to_owned(),
            share_count: 100,
            unit_price: Money::from_cents(1_200),
            declared_total_price: Money::from_cents(120_000),
            transfer_date: date(9),
        },
        Utc::now(),
    );
    ledger.seed_act(transfer.clone());
    subject
        .generate(&transfer.id())
        .await
        .expect("transfer generates");

    let snapshot = ledger.snapshot(&company.id()).expect("company stored");
    assert_eq!(snapshot.version, 2);
    let counts: Vec<_> = snapshot
        .shareholders
        .iter()
        .map(|holder| (holder.full_name().to_owned(), holder.share_count()))
        .collect();
    assert!(counts.contains(&("Claire Fontaine".to_owned(), 500)));
    assert!(counts.contains(&("Nadia Kaci".to_owned(), 100)));

    // Annual meeting: every allocated share votes.
    let meeting = LegalAct::draft(
        company.id(),
        ActPayload::OrdinaryMeeting {
            meeting_date: date(30),
            vote: MeetingVote {
                votes_for: 900,
                votes_against: 100,
                votes_abstain: 0,
            },
            profit_allocation: ProfitAllocation::ReportANouveau,
            distributed_amount: None,
        },
        Utc::now(),
    );
    ledger.seed_act(meeting.clone());
    subject
        .generate(&meeting.id())
        .await
        .expect("meeting generates");
    assert_eq!(ledger.act_status(&meeting.id()), Some(ActStatus::Generated));

    assert_eq!(ledger.documents().len(), 3);

    // A second generation of the same act is blocked by the state rule.
    let error = subject
        .generate(&meeting.id())
        .await
        .expect_err("generated acts are immutable");
    assert!(error.to_string().contains("act state"));
}
