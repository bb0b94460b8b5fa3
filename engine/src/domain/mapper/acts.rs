//! Per-act placeholder mapping.

use crate::domain::company::Company;
use crate::domain::derived::CapTable;
use crate::domain::legal_act::{
    ActPayload, FoundingAllocation, LegalAct, MeetingVote, ProfitAllocation, ReductionMethod,
};

use super::format::{format_basis_points, format_count, format_eur, format_long_date};
use super::{FieldMap, IncompleteMappingError};

pub(super) fn act_fields(
    fields: &mut FieldMap,
    act: &LegalAct,
    company: &Company,
    cap_table: &CapTable,
) -> Result<(), IncompleteMappingError> {
    match act.payload() {
        ActPayload::IncorporationStatutes {
            allocations,
            president_name,
            signature_date,
        } => {
            statutes_fields(fields, company, allocations)?;
            fields.insert("president_nom".to_owned(), president_name.clone());
            fields.insert(
                "date_signature".to_owned(),
                format_long_date(*signature_date),
            );
            Ok(())
        }
        ActPayload::CapitalIncrease {
            prior_capital,
            new_capital,
            issued_share_count,
            subscriber_name,
            vote,
            decision_date,
        } => {
            president_field(fields, company)?;
            fields.insert("capital_avant".to_owned(), format_eur(*prior_capital));
            fields.insert("capital_apres".to_owned(), format_eur(*new_capital));
            fields.insert(
                "actions_emises".to_owned(),
                format_count(*issued_share_count),
            );
            fields.insert("souscripteur_nom".to_owned(), subscriber_name.clone());
            fields.insert(
                "date_decision".to_owned(),
                format_long_date(*decision_date),
            );
            vote_fields(fields, *vote);
            Ok(())
        }
        ActPayload::CapitalReduction {
            prior_capital,
            new_capital,
            method,
            motivated_by_losses,
            vote,
            decision_date,
        } => {
            president_field(fields, company)?;
            fields.insert("capital_avant".to_owned(), format_eur(*prior_capital));
            fields.insert("capital_apres".to_owned(), format_eur(*new_capital));
            let reduction = prior_capital
                .checked_sub(*new_capital)
                .ok_or_else(|| IncompleteMappingError::new("montant_reduction"))?;
            fields.insert("montant_reduction".to_owned(), format_eur(reduction));
            fields.insert(
                "motif_reduction".to_owned(),
                if *motivated_by_losses {
                    "réduction motivée par des pertes".to_owned()
                } else {
                    "réduction non motivée par des pertes".to_owned()
                },
            );
            fields.insert(
                "date_decision".to_owned(),
                format_long_date(*decision_date),
            );
            reduction_method_fields(fields, method);
            vote_fields(fields, *vote);
            Ok(())
        }
        ActPayload::ShareTransfer {
            transferor_id,
            transferee_name,
            share_count,
            unit_price,
            declared_total_price,
            transfer_date,
        } => {
            let transferor = cap_table
                .standing_of(transferor_id)
                .ok_or_else(|| IncompleteMappingError::new("cedant_nom"))?;
            fields.insert("cedant_nom".to_owned(), transferor.full_name.clone());
            fields.insert("cessionnaire_nom".to_owned(), transferee_name.clone());
            fields.insert(
                "nombre_actions_cedees".to_owned(),
                format_count(*share_count),
            );
            fields.insert("prix_unitaire".to_owned(), format_eur(*unit_price));
            fields.insert("prix_total".to_owned(), format_eur(*declared_total_price));
            fields.insert("date_cession".to_owned(), format_long_date(*transfer_date));
            Ok(())
        }
        ActPayload::OrdinaryMeeting {
            meeting_date,
            vote,
            profit_allocation,
            distributed_amount,
        } => {
            president_field(fields, company)?;
            fields.insert(
                "date_assemblee".to_owned(),
                format_long_date(*meeting_date),
            );
            fields.insert(
                "affectation_resultat".to_owned(),
                profit_allocation_phrase(*profit_allocation).to_owned(),
            );
            if *profit_allocation == ProfitAllocation::Dividendes {
                let amount = distributed_amount
                    .ok_or_else(|| IncompleteMappingError::new("montant_distribue"))?;
                fields.insert("montant_distribue".to_owned(), format_eur(amount));
            }
            vote_fields(fields, *vote);
            Ok(())
        }
        ActPayload::MissionLetter {
            engagement_description,
            annual_fee,
            start_date,
        } => {
            president_field(fields, company)?;
            fields.insert(
                "description_mission".to_owned(),
                engagement_description.clone(),
            );
            fields.insert("honoraires_annuels".to_owned(), format_eur(*annual_fee));
            fields.insert("date_debut".to_owned(), format_long_date(*start_date));
            Ok(())
        }
        ActPayload::TransferOrder {
            transferor_id,
            transferee_name,
            share_count,
            transfer_date,
        } => {
            president_field(fields, company)?;
            let transferor = cap_table
                .standing_of(transferor_id)
                .ok_or_else(|| IncompleteMappingError::new("donneur_ordre_nom"))?;
            fields.insert("donneur_ordre_nom".to_owned(), transferor.full_name.clone());
            fields.insert("beneficiaire_nom".to_owned(), transferee_name.clone());
            fields.insert("nombre_actions".to_owned(), format_count(*share_count));
            fields.insert(
                "date_mouvement".to_owned(),
                format_long_date(*transfer_date),
            );
            Ok(())
        }
        ActPayload::FundsDepositAttestation {
            deposited_amount,
            depositary_name,
            deposit_date,
        } => {
            fields.insert("montant_depose".to_owned(), format_eur(*deposited_amount));
            fields.insert("depositaire_nom".to_owned(), depositary_name.clone());
            fields.insert("date_depot".to_owned(), format_long_date(*deposit_date));
            Ok(())
        }
    }
}

fn statutes_fields(
    fields: &mut FieldMap,
    company: &Company,
    allocations: &[FoundingAllocation],
) -> Result<(), IncompleteMappingError> {
    fields.insert(
        "nombre_associes".to_owned(),
        format_count(u64::try_from(allocations.len()).unwrap_or(u64::MAX)),
    );
    for (index, allocation) in allocations.iter().enumerate() {
        let position = index.saturating_add(1);
        if allocation.full_name.trim().is_empty() {
            return Err(IncompleteMappingError::new(format!(
                "associe_{position}_nom"
            )));
        }
        fields.insert(
            format!("associe_{position}_nom"),
            allocation.full_name.clone(),
        );
        fields.insert(
            format!("associe_{position}_actions"),
            format_count(allocation.share_count),
        );
        fields.insert(
            format!("associe_{position}_apport"),
            format_eur(allocation.contribution),
        );
        fields.insert(
            format!("associe_{position}_pourcentage"),
            format_basis_points(crate::domain::derived::ownership_basis_points(
                allocation.share_count,
                company.total_shares(),
            )),
        );
    }
    Ok(())
}

fn reduction_method_fields(fields: &mut FieldMap, method: &ReductionMethod) {
    match method {
        ReductionMethod::ShareBuyback {
            repurchased_share_count,
            unit_price,
            ..
        } => {
            fields.insert(
                "methode_reduction".to_owned(),
                "rachat d'actions suivi de leur annulation".to_owned(),
            );
            fields.insert(
                "actions_rachetees".to_owned(),
                format_count(*repurchased_share_count),
            );
            fields.insert("prix_rachat_unitaire".to_owned(), format_eur(*unit_price));
        }
        ReductionMethod::ParValue { new_nominal_value } => {
            fields.insert(
                "methode_reduction".to_owned(),
                "diminution de la valeur nominale des actions".to_owned(),
            );
            fields.insert(
                "valeur_nominale_nouvelle".to_owned(),
                format_eur(*new_nominal_value),
            );
        }
    }
}

fn vote_fields(fields: &mut FieldMap, vote: MeetingVote) {
    fields.insert("votes_pour".to_owned(), format_count(vote.votes_for));
    fields.insert("votes_contre".to_owned(), format_count(vote.votes_against));
    fields.insert(
        "votes_abstention".to_owned(),
        format_count(vote.votes_abstain),
    );
    fields.insert("total_voix".to_owned(), format_count(vote.total_cast()));
}

fn president_field(fields: &mut FieldMap, company: &Company) -> Result<(), IncompleteMappingError> {
    let name = company
        .president_name()
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| IncompleteMappingError::new("president_nom"))?;
    fields.insert("president_nom".to_owned(), name.to_owned());
    Ok(())
}

const fn profit_allocation_phrase(allocation: ProfitAllocation) -> &'static str {
    match allocation {
        ProfitAllocation::Dividendes => "distribution de dividendes aux associés",
        ProfitAllocation::ReportANouveau => "affectation du résultat en report à nouveau",
        ProfitAllocation::Reserves => "affectation du résultat aux réserves",
    }
}
