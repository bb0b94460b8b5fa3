//! French formatting for document fields.
//!
//! Amounts and dates are rendered in the long local-language forms legal
//! documents use, with parsers alongside so a formatted value recovers
//! the exact minor-unit amount or calendar date it came from.

use chrono::{Datelike, NaiveDate};

use crate::domain::money::Money;

/// Non-breaking space used as the French thousands separator.
const NBSP: char = '\u{a0}';

/// French month names, January first.
const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// A formatted amount that does not parse back to cents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{input}' is not a French-formatted euro amount")]
pub struct ParseAmountError {
    /// The rejected input.
    pub input: String,
}

/// A formatted date that does not parse back to a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{input}' is not a long-form French date")]
pub struct ParseDateError {
    /// The rejected input.
    pub input: String,
}

/// Render an amount in the French convention: `10 000,00 €`.
///
/// # Examples
/// ```
/// use engine::domain::Money;
/// use engine::domain::mapper::format_eur;
///
/// assert_eq!(format_eur(Money::from_cents(1_000_000)), "10\u{a0}000,00\u{a0}€");
/// ```
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "cents split exactly into euros and a two-digit remainder"
)]
pub fn format_eur(amount: Money) -> String {
    let sign = if amount.cents() < 0 { "-" } else { "" };
    let abs = amount.cents().unsigned_abs();
    let euros = abs / 100;
    let cents = abs % 100;
    format!("{sign}{},{cents:02}{NBSP}€", group_thousands(euros))
}

/// Render a share or vote count with French thousands grouping.
pub fn format_count(count: u64) -> String {
    group_thousands(count)
}

/// Render basis points as a percentage: `3 333` becomes `33,33 %`.
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "basis points split exactly into percent and a two-digit remainder"
)]
pub fn format_basis_points(basis_points: u64) -> String {
    let percent = basis_points / 100;
    let rem = basis_points % 100;
    format!("{},{rem:02}{NBSP}%", group_thousands(percent))
}

/// Render a date in the long French form: `12 janvier 2026`.
pub fn format_long_date(date: NaiveDate) -> String {
    let month = usize::try_from(date.month0())
        .ok()
        .and_then(|index| MONTHS.get(index).copied())
        .unwrap_or("janvier");
    format!("{} {month} {}", date.day(), date.year())
}

/// Parse an amount rendered by [`format_eur`] back to exact cents.
///
/// # Examples
/// ```
/// use engine::domain::Money;
/// use engine::domain::mapper::{format_eur, parse_eur};
///
/// let amount = Money::from_cents(123_456_789);
/// assert_eq!(parse_eur(&format_eur(amount)), Ok(amount));
/// ```
pub fn parse_eur(input: &str) -> Result<Money, ParseAmountError> {
    let error = || ParseAmountError {
        input: input.to_owned(),
    };
    let cleaned: String = input
        .trim()
        .trim_end_matches('€')
        .chars()
        .filter(|c| *c != NBSP && *c != ' ' && *c != '\u{202f}')
        .collect();
    let (euros_part, cents_part) = cleaned.split_once(',').ok_or_else(error)?;
    if cents_part.len() != 2 {
        return Err(error());
    }
    let negative = euros_part.starts_with('-');
    let euros_digits = euros_part.strip_prefix('-').unwrap_or(euros_part);
    let euros: i64 = euros_digits.parse().map_err(|_| error())?;
    let cents: i64 = cents_part.parse().map_err(|_| error())?;
    let magnitude = euros
        .checked_mul(100)
        .and_then(|value| value.checked_add(cents))
        .ok_or_else(error)?;
    let signed = if negative { -magnitude } else { magnitude };
    Ok(Money::from_cents(signed))
}

/// Parse a date rendered by [`format_long_date`].
pub fn parse_long_date(input: &str) -> Result<NaiveDate, ParseDateError> {
    let error = || ParseDateError {
        input: input.to_owned(),
    };
    let mut parts = input.split_whitespace();
    let day: u32 = parts.next().ok_or_else(error)?.parse().map_err(|_| error())?;
    let month_name = parts.next().ok_or_else(error)?;
    let year: i32 = parts.next().ok_or_else(error)?.parse().map_err(|_| error())?;
    if parts.next().is_some() {
        return Err(error());
    }
    let month = MONTHS
        .iter()
        .position(|name| *name == month_name)
        .ok_or_else(error)?;
    let month = u32::try_from(month).map_err(|_| error())?.saturating_add(1);
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(error)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (index + 3 - offset) % 3 == 0 {
            grouped.push(NBSP);
        }
        grouped.push(digit);
    }
    grouped
}
