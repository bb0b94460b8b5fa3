//! Capital-change rules: increases and reductions.

use crate::domain::captable::{self, ArithmeticInconsistency};
use crate::domain::company::Company;
use crate::domain::derived;
use crate::domain::legal_act::{MeetingVote, ReductionMethod};
use crate::domain::money::Money;
use crate::domain::shareholder::Shareholder;

use super::violations::RuleViolation;

pub(super) fn increase_rules(
    company: &Company,
    shareholders: &[Shareholder],
    prior_capital: Money,
    new_capital: Money,
    issued_share_count: u64,
    vote: MeetingVote,
) -> Option<RuleViolation> {
    if prior_capital != company.share_capital() {
        return Some(RuleViolation::PriorCapitalMismatch {
            declared: prior_capital,
            recorded: company.share_capital(),
        });
    }

    // Structural rules already proved the division exact.
    let nominal_value = match captable::nominal_value(company) {
        Ok(value) => value,
        Err(inconsistency) => return Some(RuleViolation::Arithmetic(inconsistency)),
    };
    let expected = match derived::contribution_amount(issued_share_count, nominal_value) {
        Ok(value) => value,
        Err(inconsistency) => return Some(RuleViolation::Arithmetic(inconsistency)),
    };
    let declared = match new_capital.checked_sub(prior_capital) {
        Some(value) => value,
        None => {
            return Some(RuleViolation::Arithmetic(
                ArithmeticInconsistency::AmountOverflow {
                    unit_amount: nominal_value,
                    share_count: issued_share_count,
                },
            ));
        }
    };
    if declared != expected {
        return Some(RuleViolation::IncreaseArithmetic {
            issued_share_count,
            nominal_value,
            expected,
            declared,
        });
    }

    let new_total = company.total_shares().saturating_add(issued_share_count);
    if captable::exact_per_share(new_capital, new_total).is_err() {
        return Some(RuleViolation::NominalValueInexact {
            share_capital: new_capital,
            total_shares: new_total,
        });
    }

    supermajority(vote).or_else(|| vote_completeness(vote, captable::allocated_shares(shareholders)))
}

pub(super) fn reduction_rules(
    company: &Company,
    shareholders: &[Shareholder],
    prior_capital: Money,
    new_capital: Money,
    method: &ReductionMethod,
    vote: MeetingVote,
) -> Option<RuleViolation> {
    if prior_capital != company.share_capital() {
        return Some(RuleViolation::PriorCapitalMismatch {
            declared: prior_capital,
            recorded: company.share_capital(),
        });
    }

    // A negative post-reduction capital means the reduction overshoots
    // the prior capital; cite the ceiling with both amounts. A zero
    // capital trips the legal floor instead.
    if new_capital.is_negative() {
        let reduction_amount = prior_capital
            .checked_sub(new_capital)
            .unwrap_or(prior_capital);
        return Some(RuleViolation::ReductionCeiling {
            reduction_amount,
            prior_capital,
        });
    }
    if new_capital.cents() < 1 {
        return Some(RuleViolation::CapitalFloor { new_capital });
    }

    // Both figures are non-negative here, so the difference cannot
    // overflow; a reduction that grows the capital fails the method
    // arithmetic below.
    let reduction_amount = prior_capital
        .checked_sub(new_capital)
        .unwrap_or(Money::ZERO);

    if let Some(violation) = method_rules(company, shareholders, new_capital, reduction_amount, method)
    {
        return Some(violation);
    }

    supermajority(vote).or_else(|| vote_completeness(vote, captable::allocated_shares(shareholders)))
}

fn method_rules(
    company: &Company,
    shareholders: &[Shareholder],
    new_capital: Money,
    reduction_amount: Money,
    method: &ReductionMethod,
) -> Option<RuleViolation> {
    match method {
        ReductionMethod::ShareBuyback {
            repurchased_share_count,
            unit_price,
            seller_id,
        } => {
            let computed = match derived::expected_total_price(*unit_price, *repurchased_share_count)
            {
                Ok(value) => value,
                Err(inconsistency) => return Some(RuleViolation::Arithmetic(inconsistency)),
            };
            if computed != reduction_amount {
                return Some(RuleViolation::RepurchaseArithmetic {
                    repurchased_share_count: *repurchased_share_count,
                    unit_price: *unit_price,
                    computed,
                    declared: reduction_amount,
                });
            }

            let held = shareholders
                .iter()
                .find(|holder| holder.id() == *seller_id)
                .map_or(0, Shareholder::share_count);
            if *repurchased_share_count > held {
                return Some(RuleViolation::TransferorInsufficientShares {
                    held,
                    requested: *repurchased_share_count,
                });
            }

            let new_total = company
                .total_shares()
                .saturating_sub(*repurchased_share_count);
            if captable::exact_per_share(new_capital, new_total).is_err() {
                return Some(RuleViolation::NominalValueInexact {
                    share_capital: new_capital,
                    total_shares: new_total,
                });
            }
            None
        }
        ReductionMethod::ParValue { new_nominal_value } => {
            let prior_nominal_value = match captable::nominal_value(company) {
                Ok(value) => value,
                Err(inconsistency) => return Some(RuleViolation::Arithmetic(inconsistency)),
            };
            if *new_nominal_value >= prior_nominal_value {
                return Some(RuleViolation::NominalValueNotLowered {
                    new_nominal_value: *new_nominal_value,
                    prior_nominal_value,
                });
            }
            let computed = match derived::contribution_amount(
                company.total_shares(),
                *new_nominal_value,
            ) {
                Ok(value) => value,
                Err(inconsistency) => return Some(RuleViolation::Arithmetic(inconsistency)),
            };
            if computed != new_capital {
                return Some(RuleViolation::ParValueArithmetic {
                    new_nominal_value: *new_nominal_value,
                    total_shares: company.total_shares(),
                    computed,
                    declared: new_capital,
                });
            }
            None
        }
    }
}

/// Extraordinary decisions carry on a two-thirds supermajority of the
/// votes cast.
pub(super) fn supermajority(vote: MeetingVote) -> Option<RuleViolation> {
    let total_cast = vote.total_cast();
    if u128::from(vote.votes_for) * 3 >= u128::from(total_cast) * 2 {
        return None;
    }
    Some(RuleViolation::Supermajority {
        votes_for: vote.votes_for,
        total_cast,
        required: required_two_thirds(total_cast),
    })
}

/// Every allocated share votes exactly once.
pub(super) fn vote_completeness(
    vote: MeetingVote,
    allocated_shares: u64,
) -> Option<RuleViolation> {
    let total_votes = vote.total_cast();
    if total_votes == allocated_shares {
        return None;
    }
    Some(RuleViolation::VoteCompleteness {
        total_votes,
        allocated_shares,
    })
}

#[expect(
    clippy::integer_division,
    reason = "ceiling division for the smallest passing vote count"
)]
fn required_two_thirds(total_cast: u64) -> u64 {
    let required = (u128::from(total_cast) * 2 + 2) / 3;
    u64::try_from(required).unwrap_or(u64::MAX)
}
