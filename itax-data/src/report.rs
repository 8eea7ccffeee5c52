//! Human-readable and JSON renderings of calculation results.

use std::fmt::Write;

use itax_core::calculations::common::round_half_up;
use itax_core::{Regime, RegimeComparison, TaxBreakdown};
use rust_decimal::Decimal;
use serde::Serialize;

const LABEL_WIDTH: usize = 30;
const AMOUNT_WIDTH: usize = 18;

/// Formats a rupee amount with Indian digit grouping, e.g. `₹12,34,567.89`.
///
/// The last three integer digits form one group and every group above it
/// has two digits.
pub fn format_inr(value: Decimal) -> String {
    let rounded = format!("{:.2}", round_half_up(value.abs()));
    let (whole, paise) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let digits: Vec<char> = whole.chars().collect();
    let split = digits.len().saturating_sub(3);
    let (upper, last_three) = digits.split_at(split);

    let mut grouped = String::new();
    for (i, c) in upper.iter().enumerate() {
        if i > 0 && (upper.len() - i) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    if !upper.is_empty() {
        grouped.push(',');
    }
    grouped.extend(last_three);

    let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
    format!("{sign}₹{grouped}.{paise}")
}

/// Formats a fraction as a percentage with two decimals.
pub fn format_percent(rate: Decimal) -> String {
    format!("{:.2}%", round_half_up(rate * Decimal::ONE_HUNDRED))
}

/// The rows shared by single and side-by-side reports.
fn rows(b: &TaxBreakdown) -> Vec<(&'static str, String)> {
    vec![
        ("Gross total income", format_inr(b.gross_total_income)),
        ("Less: deductions", format_inr(b.total_deductions)),
        ("Taxable income", format_inr(b.taxable_income)),
        ("Tax on taxable income", format_inr(b.base_tax)),
        ("Less: rebate u/s 87A", format_inr(b.rebate)),
        ("Tax after rebate", format_inr(b.tax_after_rebate)),
        ("Add: surcharge", format_inr(b.surcharge)),
        ("Add: health & education cess", format_inr(b.cess)),
        ("Total tax payable", format_inr(b.total_payable)),
        ("Effective rate", format_percent(b.effective_rate())),
    ]
}

pub fn render_breakdown(b: &TaxBreakdown) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", b.regime.display_name(), b.age_bracket.display_name());
    for (label, value) in rows(b) {
        let _ = writeln!(out, "  {label:<LABEL_WIDTH$}{value:>AMOUNT_WIDTH$}");
    }
    out
}

pub fn render_comparison(c: &RegimeComparison) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}",
        c.new_regime.age_bracket.display_name(),
        Regime::New.display_name(),
        Regime::Old.display_name(),
    );
    for ((label, new), (_, old)) in rows(&c.new_regime).into_iter().zip(rows(&c.old_regime)) {
        let _ = writeln!(out, "  {label:<LABEL_WIDTH$}{new:>AMOUNT_WIDTH$}{old:>AMOUNT_WIDTH$}");
    }
    out.push('\n');
    if c.saving().is_zero() {
        let _ = writeln!(
            out,
            "Both regimes give the same liability; {} recommended.",
            c.recommended().display_name()
        );
    } else {
        let _ = writeln!(
            out,
            "Recommended: {} (saves {})",
            c.recommended().display_name(),
            format_inr(c.saving())
        );
    }
    out
}

/// Renders each result under a `Row N` heading, numbered from 1 like the
/// rows of the CSV they came from.
pub fn render_batch<T>(
    items: &[T],
    render: impl Fn(&T) -> String,
) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("Row {}\n{}", i + 1, render(item)))
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct BreakdownReport<'a> {
    #[serde(flatten)]
    pub breakdown: &'a TaxBreakdown,
    pub effective_rate: Decimal,
}

impl<'a> From<&'a TaxBreakdown> for BreakdownReport<'a> {
    fn from(breakdown: &'a TaxBreakdown) -> Self {
        Self {
            breakdown,
            effective_rate: breakdown.effective_rate(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ComparisonReport<'a> {
    pub new_regime: BreakdownReport<'a>,
    pub old_regime: BreakdownReport<'a>,
    pub recommended: Regime,
    pub saving: Decimal,
}

impl<'a> From<&'a RegimeComparison> for ComparisonReport<'a> {
    fn from(c: &'a RegimeComparison) -> Self {
        Self {
            new_regime: (&c.new_regime).into(),
            old_regime: (&c.old_regime).into(),
            recommended: c.recommended(),
            saving: c.saving(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchEntry<R> {
    pub row: usize,
    #[serde(flatten)]
    pub report: R,
}

/// A JSON array with one entry per input row, each tagged with its 1-based
/// row number.
pub fn batch_json<'a, T, R>(items: &'a [T]) -> serde_json::Result<String>
where
    R: Serialize + From<&'a T>,
{
    let entries: Vec<BatchEntry<R>> = items
        .iter()
        .enumerate()
        .map(|(i, item)| BatchEntry {
            row: i + 1,
            report: R::from(item),
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}

pub fn breakdown_json(b: &TaxBreakdown) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&BreakdownReport::from(b))
}

pub fn comparison_json(c: &RegimeComparison) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ComparisonReport::from(c))
}
