//! Incorporation-statutes rules.

use crate::domain::captable;
use crate::domain::company::Company;
use crate::domain::derived;
use crate::domain::legal_act::FoundingAllocation;
use crate::domain::shareholder::Shareholder;

use super::violations::RuleViolation;

/// Subscription and contribution arithmetic for founding statutes.
///
/// All authorized shares must be subscribed, the subscriptions must fit
/// inside the authorized total, and each founder's declared contribution
/// must equal their share count times the nominal value.
pub(super) fn rules(
    company: &Company,
    shareholders: &[Shareholder],
    allocations: &[FoundingAllocation],
) -> Option<RuleViolation> {
    let requested = allocations
        .iter()
        .fold(0_u64, |sum, allocation| sum.saturating_add(allocation.share_count));
    let available = captable::available_shares(company, shareholders, None);
    if requested > available {
        return Some(RuleViolation::ShareAvailability {
            requested,
            available,
            total_shares: company.total_shares(),
            allocated: company.total_shares().saturating_sub(available),
        });
    }
    if requested < available {
        return Some(RuleViolation::IncompleteSubscription {
            allocated: requested,
            total_shares: company.total_shares(),
        });
    }

    // Structural rules already proved the division exact.
    let nominal_value = match captable::nominal_value(company) {
        Ok(value) => value,
        Err(inconsistency) => return Some(RuleViolation::Arithmetic(inconsistency)),
    };
    for allocation in allocations {
        let expected = match derived::contribution_amount(allocation.share_count, nominal_value) {
            Ok(value) => value,
            Err(inconsistency) => return Some(RuleViolation::Arithmetic(inconsistency)),
        };
        if expected != allocation.contribution {
            return Some(RuleViolation::FoundingContributionMismatch {
                full_name: allocation.full_name.clone(),
                share_count: allocation.share_count,
                expected,
                declared: allocation.contribution,
            });
        }
    }

    None
}
