//! Share movement rules: transfers, transfer orders, and the shared
//! availability arithmetic.

use crate::domain::captable;
use crate::domain::company::Company;
use crate::domain::derived;
use crate::domain::money::Money;
use crate::domain::shareholder::{Shareholder, ShareholderId};

use super::violations::{RuleViolation, RuleWarning};
use super::OFF_MARKET_FACTOR;

/// Availability, holding, and price rules for a share movement.
///
/// `pricing` carries `(unit_price, declared_total)` for priced deeds and
/// `None` for movement orders, which record no price.
pub(super) fn transfer_rules(
    company: &Company,
    shareholders: &[Shareholder],
    transferor_id: &ShareholderId,
    share_count: u64,
    pricing: Option<(Money, Money)>,
) -> Option<RuleViolation> {
    let available = captable::available_shares(company, shareholders, Some(transferor_id));
    if share_count > available {
        return Some(RuleViolation::ShareAvailability {
            requested: share_count,
            available,
            total_shares: company.total_shares(),
            allocated: company.total_shares().saturating_sub(available),
        });
    }

    let held = shareholders
        .iter()
        .find(|holder| holder.id() == *transferor_id)
        .map_or(0, Shareholder::share_count);
    if share_count > held {
        return Some(RuleViolation::TransferorInsufficientShares {
            held,
            requested: share_count,
        });
    }

    if let Some((unit_price, declared_total)) = pricing {
        let computed = match derived::expected_total_price(unit_price, share_count) {
            Ok(value) => value,
            Err(inconsistency) => return Some(RuleViolation::Arithmetic(inconsistency)),
        };
        if computed != declared_total {
            return Some(RuleViolation::TransferPriceMismatch {
                share_count,
                unit_price,
                computed,
                declared: declared_total,
            });
        }
    }

    None
}

/// Advisory check: a unit price more than [`OFF_MARKET_FACTOR`] times
/// above or below the nominal value.
pub(super) fn off_market_warning(company: &Company, unit_price: Money) -> Option<RuleWarning> {
    let nominal_value = captable::nominal_value(company).ok()?;
    if nominal_value.cents() <= 0 || unit_price.cents() <= 0 {
        return None;
    }

    let factor = i64::from(OFF_MARKET_FACTOR);
    let far_above = nominal_value
        .cents()
        .checked_mul(factor)
        .is_some_and(|ceiling| unit_price.cents() > ceiling);
    let far_below = unit_price
        .cents()
        .checked_mul(factor)
        .is_some_and(|floor| floor < nominal_value.cents());

    (far_above || far_below).then_some(RuleWarning::OffMarketPrice {
        unit_price,
        nominal_value,
        factor: OFF_MARKET_FACTOR,
    })
}
