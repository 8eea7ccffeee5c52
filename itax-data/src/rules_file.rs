//! Loading and saving [`TaxRules`] as TOML.
//!
//! Amounts are plain integers and rates are quoted decimals so nothing
//! passes through a float:
//!
//! ```toml
//! financial_year = "2024-25"
//! cess_rate = "0.04"
//!
//! [new_regime]
//! standard_deduction = 50000
//!
//! [[new_regime.slabs]]
//! floor = 0
//! ceiling = 300000
//! rate = "0"
//! ```
//!
//! See `rules/fy2024-25.toml` for a complete file.

use std::fs;
use std::path::Path;

use itax_core::{RulesError, TaxRules};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RulesFileError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed rules file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialise rules: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("inconsistent rules: {0}")]
    Invalid(#[from] RulesError),
}

/// Parses and validates a rule set.
pub fn from_toml_str(input: &str) -> Result<TaxRules, RulesFileError> {
    let rules: TaxRules = toml::from_str(input)?;
    rules.validate()?;
    Ok(rules)
}

pub fn to_toml_string(rules: &TaxRules) -> Result<String, RulesFileError> {
    Ok(toml::to_string_pretty(rules)?)
}

pub fn load(path: &Path) -> Result<TaxRules, RulesFileError> {
    let contents = fs::read_to_string(path).map_err(|source| RulesFileError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let rules = from_toml_str(&contents)?;
    info!(
        path = %path.display(),
        financial_year = %rules.financial_year,
        "tax rules loaded"
    );
    Ok(rules)
}
