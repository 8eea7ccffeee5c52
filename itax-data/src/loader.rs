//! CSV loader for batches of tax profiles.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Only
//! `regime` and `gross_income` are required; every other column may be
//! omitted entirely or left empty.
//!
//! | Column           | Required | Notes                                        |
//! |------------------|----------|----------------------------------------------|
//! | `regime`         | yes      | `new` or `old`                               |
//! | `age_bracket`    | no       | `below60` (default), `senior`, `super-senior` |
//! | `gross_income`   | yes      | salary and other regime-neutral income       |
//! | `house_property` | no       | counted under the old regime only            |
//! | `ltcg`, `stcg`   | no       | capital gains, old regime only               |
//! | `business`       | no       | business or profession, old regime only      |
//! | `interest`       | no       | old regime only                              |
//! | `dividend`       | no       | old regime only                              |
//! | `casual`         | no       | old regime only                              |
//! | `ded_80c` ...    | no       | one column per deduction section             |
//!
//! Deduction columns are `ded_80c`, `ded_80d`, `ded_80ccd_1b`, `ded_24b`,
//! `ded_80e`, `ded_80g`, `ded_80tta` and `ded_80ttb`. Amounts may use digit
//! grouping (`"7,50,000"`) when the cell is quoted.
//!
//! ### Example
//!
//! ```csv
//! regime,age_bracket,gross_income,interest,ded_80c,ded_80d
//! new,,1200000,,,
//! old,senior,1100000,40000,150000,50000
//! ```

use std::fs;
use std::path::Path;

use itax_core::{
    AgeBracket, DeductionCode, DeductionSet, IncomeHead, IncomeProfile, OtherIncome, Regime,
    TaxError, TaxRequest,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::parse::parse_amount;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    regime: String,
    #[serde(default)]
    age_bracket: Option<String>,
    #[serde(deserialize_with = "required_amount")]
    gross_income: Decimal,

    #[serde(default, deserialize_with = "optional_amount")]
    house_property: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_amount")]
    ltcg: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_amount")]
    stcg: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_amount")]
    business: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_amount")]
    interest: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_amount")]
    dividend: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_amount")]
    casual: Option<Decimal>,

    #[serde(default, deserialize_with = "optional_amount")]
    ded_80c: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_amount")]
    ded_80d: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_amount")]
    ded_80ccd_1b: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_amount")]
    ded_24b: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_amount")]
    ded_80e: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_amount")]
    ded_80g: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_amount")]
    ded_80tta: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_amount")]
    ded_80ttb: Option<Decimal>,
}

fn optional_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_amount(&s).map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn required_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.trim().is_empty() {
        return Err(serde::de::Error::custom("amount is required"));
    }
    parse_amount(&s).map_err(serde::de::Error::custom)
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, malformed amount, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A row parsed but does not describe a valid request. `row` is 1-based
    /// and excludes the header.
    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: TaxError,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn convert_row(row: CsvRow) -> Result<TaxRequest, TaxError> {
    let regime: Regime = row.regime.parse()?;
    let age_bracket: AgeBracket = match row.age_bracket.as_deref().map(str::trim) {
        None | Some("") => AgeBracket::default(),
        Some(s) => s.parse()?,
    };

    let other_income = [
        (IncomeHead::HouseProperty, row.house_property),
        (IncomeHead::LongTermCapitalGains, row.ltcg),
        (IncomeHead::ShortTermCapitalGains, row.stcg),
        (IncomeHead::BusinessProfession, row.business),
        (IncomeHead::Interest, row.interest),
        (IncomeHead::Dividend, row.dividend),
        (IncomeHead::Casual, row.casual),
    ]
    .into_iter()
    .fold(OtherIncome::default(), |acc, (head, amount)| {
        acc.with(head, amount.unwrap_or(Decimal::ZERO))
    });

    let deductions = [
        (DeductionCode::Section80C, row.ded_80c),
        (DeductionCode::Section80D, row.ded_80d),
        (DeductionCode::Section80Ccd1B, row.ded_80ccd_1b),
        (DeductionCode::Section24B, row.ded_24b),
        (DeductionCode::Section80E, row.ded_80e),
        (DeductionCode::Section80G, row.ded_80g),
        (DeductionCode::Section80Tta, row.ded_80tta),
        (DeductionCode::Section80Ttb, row.ded_80ttb),
    ]
    .into_iter()
    .filter_map(|(code, amount)| amount.map(|a| (code, a)))
    .fold(DeductionSet::new(), |set, (code, amount)| set.with(code, amount));

    let profile = IncomeProfile::new(row.gross_income)
        .with_age(age_bracket)
        .with_other_income(other_income);
    let request = TaxRequest::new(profile, regime).with_deductions(deductions);
    request.validate()?;
    Ok(request)
}

/// Parse CSV text and return one [`TaxRequest`] per data row, in file order.
///
/// Every request is validated, so a row with a negative amount or an
/// unrecognised regime fails here with its row number rather than later.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] if the CSV is structurally invalid or an amount
///   cannot be read.
/// * [`CsvLoadError::InvalidRow`] if a row names an unknown regime or age
///   bracket, or contains a negative amount.
pub fn load_from_str(input: &str) -> Result<Vec<TaxRequest>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let requests = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row).map_err(|source| CsvLoadError::InvalidRow {
                row: idx + 1,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(rows = requests.len(), "profiles loaded");
    Ok(requests)
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<TaxRequest>, CsvLoadError> {
    let contents = fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
