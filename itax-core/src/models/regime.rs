use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TaxError;

/// The two alternative computation schemes a taxpayer may opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// Simplified slabs, standard deduction only.
    #[default]
    New,
    /// Age-dependent slabs with itemised deductions.
    Old,
}

impl Regime {
    pub const ALL: [Regime; 2] = [Regime::New, Regime::Old];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Old => "old",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::New => "New Tax Regime",
            Self::Old => "Old Tax Regime",
        }
    }
}

impl FromStr for Regime {
    type Err = TaxError;

    /// Accepts `new`/`old` in any case, optionally followed by `regime` or
    /// `tax regime` (so `"New Tax Regime"` parses too).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let key = normalized
            .trim_end_matches("regime")
            .trim_end()
            .trim_end_matches("tax")
            .trim();
        match key {
            "new" => Ok(Self::New),
            "old" => Ok(Self::Old),
            _ => Err(TaxError::UnsupportedRegime(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
