//! Chapter VI-A style deductions honoured by the Old regime.
//!
//! Every recognised section is a [`DeductionCode`] carrying a [`CapRule`];
//! claims are held in a closed [`DeductionSet`] record with one optional
//! field per section.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::AgeBracket;

/// How the statutory ceiling of a deduction is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapRule {
    /// A fixed amount regardless of the taxpayer.
    Fixed(Decimal),
    /// No fixed ceiling; the claim is bounded only by gross total income.
    IncomeBounded,
    /// Ceiling depends on whether the taxpayer is a senior citizen. A zero
    /// ceiling means the section is unavailable to that bracket.
    AgeConditional { general: Decimal, senior: Decimal },
}

impl CapRule {
    /// Resolves the ceiling for a taxpayer.
    pub fn cap(
        &self,
        gross_total_income: Decimal,
        age: AgeBracket,
    ) -> Decimal {
        match *self {
            CapRule::Fixed(amount) => amount,
            CapRule::IncomeBounded => gross_total_income,
            CapRule::AgeConditional { general, senior } => {
                if age.is_senior() {
                    senior
                } else {
                    general
                }
            }
        }
    }
}

/// Deduction sections recognised by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeductionCode {
    /// Investments: PPF, ELSS, EPF, life insurance, home-loan principal.
    Section80C,
    /// Health insurance premium.
    Section80D,
    /// Additional NPS contribution.
    Section80Ccd1B,
    /// Interest on a self-occupied home loan.
    Section24B,
    /// Interest on an education loan.
    Section80E,
    /// Donations.
    Section80G,
    /// Savings-account interest, non-seniors.
    Section80Tta,
    /// Deposit interest, seniors only.
    Section80Ttb,
}

impl DeductionCode {
    pub const ALL: [DeductionCode; 8] = [
        DeductionCode::Section80C,
        DeductionCode::Section80D,
        DeductionCode::Section80Ccd1B,
        DeductionCode::Section24B,
        DeductionCode::Section80E,
        DeductionCode::Section80G,
        DeductionCode::Section80Tta,
        DeductionCode::Section80Ttb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Section80C => "80C",
            Self::Section80D => "80D",
            Self::Section80Ccd1B => "80CCD(1B)",
            Self::Section24B => "24(b)",
            Self::Section80E => "80E",
            Self::Section80G => "80G",
            Self::Section80Tta => "80TTA",
            Self::Section80Ttb => "80TTB",
        }
    }

    /// Parses a section code, tolerating case, whitespace, a `sec`/`section`
    /// prefix and optional parentheses (`80ccd1b`, `Section 24(b)`).
    ///
    /// Returns `None` for codes the calculator does not know; callers treat
    /// those as ignorable rather than as errors.
    pub fn parse(s: &str) -> Option<Self> {
        let mut key: String = s
            .to_uppercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        for prefix in ["SECTION", "SEC", "US", "S"] {
            if let Some(rest) = key.strip_prefix(prefix) {
                if rest.starts_with(|c: char| c.is_ascii_digit()) {
                    key = rest.to_string();
                    break;
                }
            }
        }
        match key.as_str() {
            "80C" => Some(Self::Section80C),
            "80D" => Some(Self::Section80D),
            "80CCD1B" => Some(Self::Section80Ccd1B),
            "24B" => Some(Self::Section24B),
            "80E" => Some(Self::Section80E),
            "80G" => Some(Self::Section80G),
            "80TTA" => Some(Self::Section80Tta),
            "80TTB" => Some(Self::Section80Ttb),
            _ => None,
        }
    }

    pub fn cap_rule(&self) -> CapRule {
        match self {
            Self::Section80C => CapRule::Fixed(dec!(150000)),
            Self::Section80D => CapRule::AgeConditional {
                general: dec!(25000),
                senior: dec!(50000),
            },
            Self::Section80Ccd1B => CapRule::Fixed(dec!(50000)),
            Self::Section24B => CapRule::Fixed(dec!(200000)),
            Self::Section80E | Self::Section80G => CapRule::IncomeBounded,
            Self::Section80Tta => CapRule::AgeConditional {
                general: dec!(10000),
                senior: Decimal::ZERO,
            },
            Self::Section80Ttb => CapRule::AgeConditional {
                general: Decimal::ZERO,
                senior: dec!(50000),
            },
        }
    }
}

impl fmt::Display for DeductionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claimed deduction amounts, one optional field per recognised section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionSet {
    pub section_80c: Option<Decimal>,
    pub section_80d: Option<Decimal>,
    pub section_80ccd_1b: Option<Decimal>,
    pub section_24b: Option<Decimal>,
    pub section_80e: Option<Decimal>,
    pub section_80g: Option<Decimal>,
    pub section_80tta: Option<Decimal>,
    pub section_80ttb: Option<Decimal>,
}

impl DeductionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(
        mut self,
        code: DeductionCode,
        amount: Decimal,
    ) -> Self {
        self.set(code, amount);
        self
    }

    pub fn get(
        &self,
        code: DeductionCode,
    ) -> Option<Decimal> {
        *self.slot(code)
    }

    pub fn set(
        &mut self,
        code: DeductionCode,
        amount: Decimal,
    ) {
        *self.slot_mut(code) = Some(amount);
    }

    pub fn clear(
        &mut self,
        code: DeductionCode,
    ) {
        *self.slot_mut(code) = None;
    }

    /// Claimed sections in declaration order, skipping unclaimed ones.
    pub fn claims(&self) -> impl Iterator<Item = (DeductionCode, Decimal)> + '_ {
        DeductionCode::ALL
            .into_iter()
            .filter_map(|code| self.get(code).map(|amount| (code, amount)))
    }

    pub fn is_empty(&self) -> bool {
        self.claims().next().is_none()
    }

    fn slot(
        &self,
        code: DeductionCode,
    ) -> &Option<Decimal> {
        match code {
            DeductionCode::Section80C => &self.section_80c,
            DeductionCode::Section80D => &self.section_80d,
            DeductionCode::Section80Ccd1B => &self.section_80ccd_1b,
            DeductionCode::Section24B => &self.section_24b,
            DeductionCode::Section80E => &self.section_80e,
            DeductionCode::Section80G => &self.section_80g,
            DeductionCode::Section80Tta => &self.section_80tta,
            DeductionCode::Section80Ttb => &self.section_80ttb,
        }
    }

    fn slot_mut(
        &mut self,
        code: DeductionCode,
    ) -> &mut Option<Decimal> {
        match code {
            DeductionCode::Section80C => &mut self.section_80c,
            DeductionCode::Section80D => &mut self.section_80d,
            DeductionCode::Section80Ccd1B => &mut self.section_80ccd_1b,
            DeductionCode::Section24B => &mut self.section_24b,
            DeductionCode::Section80E => &mut self.section_80e,
            DeductionCode::Section80G => &mut self.section_80g,
            DeductionCode::Section80Tta => &mut self.section_80tta,
            DeductionCode::Section80Ttb => &mut self.section_80ttb,
        }
    }
}
