//! Parsing of amounts and `KEY=AMOUNT` arguments typed by a user.

use itax_core::{DeductionCode, DeductionSet, IncomeHead, OtherIncome};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

/// Error returned when a string cannot be parsed as an amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Errors for `KEY=AMOUNT` arguments.
#[derive(Debug, Error)]
pub enum ParseArgError {
    #[error("expected KEY=AMOUNT, got '{0}'")]
    MissingSeparator(String),

    #[error(transparent)]
    Amount(#[from] ParseAmountError),

    #[error("unknown income head '{0}' (expected one of: house_property, ltcg, stcg, business, interest, dividend, casual)")]
    UnknownIncomeHead(String),
}

/// Strips whitespace, a rupee prefix, and digit-group separators, so both
/// Indian (`7,50,000`) and western (`750,000`) grouping are accepted.
fn normalize_amount(s: &str) -> String {
    let trimmed = s.trim();
    let unprefixed = ["₹", "INR", "Rs.", "Rs"]
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .unwrap_or(trimmed);
    unprefixed
        .chars()
        .filter(|c| !matches!(c, ',' | '_') && !c.is_whitespace())
        .collect()
}

/// Parses a rupee amount. Empty input is zero.
///
/// Negative amounts parse successfully; rejecting them is the job of
/// request validation, which can name the offending field.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|source| ParseAmountError {
        input: s.to_string(),
        source,
    })
}

/// A raw `KEY=AMOUNT` pair; the key is interpreted later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAmount {
    pub key: String,
    pub amount: Decimal,
}

pub fn parse_key_amount(s: &str) -> Result<KeyAmount, ParseArgError> {
    let (key, amount) = s
        .split_once('=')
        .ok_or_else(|| ParseArgError::MissingSeparator(s.to_string()))?;
    Ok(KeyAmount {
        key: key.trim().to_string(),
        amount: parse_amount(amount)?,
    })
}

/// Builds a deduction set from claims. Repeated sections are summed.
/// Unknown section codes are skipped with a warning.
pub fn deductions_from_claims(claims: &[KeyAmount]) -> DeductionSet {
    let mut set = DeductionSet::new();
    for claim in claims {
        match DeductionCode::parse(&claim.key) {
            Some(code) => {
                let total = set.get(code).unwrap_or(Decimal::ZERO) + claim.amount;
                set.set(code, total);
            }
            None => warn!(code = %claim.key, "unrecognised deduction code ignored"),
        }
    }
    set
}

/// Builds other-income amounts from `HEAD=AMOUNT` pairs. Repeated heads are
/// summed; unknown heads are an error since dropping income would understate
/// tax.
pub fn other_income_from_pairs(pairs: &[KeyAmount]) -> Result<OtherIncome, ParseArgError> {
    let mut other = OtherIncome::default();
    for pair in pairs {
        let head = IncomeHead::parse(&pair.key)
            .ok_or_else(|| ParseArgError::UnknownIncomeHead(pair.key.clone()))?;
        other.set(head, other.get(head) + pair.amount);
    }
    Ok(other)
}
