//! Statutory tables for one financial year.
//!
//! Every number the calculators use lives here so a different year can be
//! loaded from configuration without touching code.
//! [`TaxRules::fy_2024_25`] is the built-in table set.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AgeBracket, Regime, SurchargeBand, TaxSlab};

/// Problems found when validating a rule table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("{table}: slab table is empty")]
    EmptySlabTable { table: String },

    #[error("{table}: first slab must start at 0, found {floor}")]
    NonZeroFirstFloor { table: String, floor: Decimal },

    #[error("{table}: slab {index} starts at {floor} but the previous slab ends at {expected}")]
    GapInSlabs {
        table: String,
        index: usize,
        floor: Decimal,
        expected: Decimal,
    },

    #[error("{table}: only the last slab may be open-ended (slab {index} has no ceiling)")]
    OpenSlabNotLast { table: String, index: usize },

    #[error("{table}: rate {rate} is outside 0..=1")]
    RateOutOfRange { table: String, rate: Decimal },

    #[error("{table}: surcharge bands must be in strictly ascending order")]
    UnorderedSurchargeBands { table: String },
}

/// Which income figure is compared against a rebate's income limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebateBasis {
    /// Income before the standard deduction and itemised deductions.
    #[default]
    GrossTotalIncome,
    /// Income after deductions.
    TaxableIncome,
}

/// Section 87A rebate parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebateRule {
    /// Inclusive income ceiling for eligibility.
    pub income_limit: Decimal,
    pub max_rebate: Decimal,
    #[serde(default)]
    pub basis: RebateBasis,
}

/// Everything needed to tax income under one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeRules {
    /// Flat deduction from gross total income before slabs are applied.
    #[serde(default)]
    pub standard_deduction: Decimal,
    /// Slab table for taxpayers below 60, and for everyone when no
    /// age-specific table is configured.
    pub slabs: Vec<TaxSlab>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub senior_slabs: Option<Vec<TaxSlab>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_senior_slabs: Option<Vec<TaxSlab>>,
    pub rebate: RebateRule,
    #[serde(default)]
    pub surcharge: Vec<SurchargeBand>,
}

impl RegimeRules {
    pub fn slabs_for(
        &self,
        age: AgeBracket,
    ) -> &[TaxSlab] {
        let specific = match age {
            AgeBracket::Below60 => None,
            AgeBracket::Senior60To80 => self.senior_slabs.as_deref(),
            AgeBracket::SuperSenior80Plus => self.super_senior_slabs.as_deref(),
        };
        specific.unwrap_or(&self.slabs)
    }

    fn validate(
        &self,
        name: &str,
    ) -> Result<(), RulesError> {
        validate_slabs(&format!("{name}.slabs"), &self.slabs)?;
        if let Some(slabs) = &self.senior_slabs {
            validate_slabs(&format!("{name}.senior_slabs"), slabs)?;
        }
        if let Some(slabs) = &self.super_senior_slabs {
            validate_slabs(&format!("{name}.super_senior_slabs"), slabs)?;
        }
        validate_surcharge(&format!("{name}.surcharge"), &self.surcharge)
    }
}

/// The complete rule set for a financial year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRules {
    /// Label such as `"2024-25"`.
    pub financial_year: String,
    /// Health and education cess levied on tax plus surcharge.
    pub cess_rate: Decimal,
    pub new_regime: RegimeRules,
    pub old_regime: RegimeRules,
}

impl Default for TaxRules {
    fn default() -> Self {
        Self::fy_2024_25()
    }
}

impl TaxRules {
    /// Tables for FY 2024-25 (AY 2025-26), resident individuals.
    pub fn fy_2024_25() -> Self {
        let surcharge = |top_rate: Decimal| {
            vec![
                SurchargeBand {
                    above: dec!(5000000),
                    rate: dec!(0.10),
                },
                SurchargeBand {
                    above: dec!(10000000),
                    rate: dec!(0.15),
                },
                SurchargeBand {
                    above: dec!(20000000),
                    rate: dec!(0.25),
                },
                SurchargeBand {
                    above: dec!(50000000),
                    rate: top_rate,
                },
            ]
        };

        Self {
            financial_year: "2024-25".to_string(),
            cess_rate: dec!(0.04),
            new_regime: RegimeRules {
                standard_deduction: dec!(50000),
                slabs: slab_table(&[
                    (dec!(0), dec!(0)),
                    (dec!(300000), dec!(0.05)),
                    (dec!(600000), dec!(0.10)),
                    (dec!(900000), dec!(0.15)),
                    (dec!(1200000), dec!(0.20)),
                    (dec!(1500000), dec!(0.30)),
                ]),
                senior_slabs: None,
                super_senior_slabs: None,
                rebate: RebateRule {
                    income_limit: dec!(700000),
                    max_rebate: dec!(25000),
                    basis: RebateBasis::GrossTotalIncome,
                },
                surcharge: surcharge(dec!(0.25)),
            },
            old_regime: RegimeRules {
                standard_deduction: Decimal::ZERO,
                slabs: slab_table(&[
                    (dec!(0), dec!(0)),
                    (dec!(250000), dec!(0.05)),
                    (dec!(500000), dec!(0.20)),
                    (dec!(1000000), dec!(0.30)),
                ]),
                senior_slabs: Some(slab_table(&[
                    (dec!(0), dec!(0)),
                    (dec!(300000), dec!(0.05)),
                    (dec!(500000), dec!(0.20)),
                    (dec!(1000000), dec!(0.30)),
                ])),
                super_senior_slabs: Some(slab_table(&[
                    (dec!(0), dec!(0)),
                    (dec!(500000), dec!(0.20)),
                    (dec!(1000000), dec!(0.30)),
                ])),
                rebate: RebateRule {
                    income_limit: dec!(500000),
                    max_rebate: dec!(12500),
                    basis: RebateBasis::GrossTotalIncome,
                },
                surcharge: surcharge(dec!(0.37)),
            },
        }
    }

    pub fn regime(
        &self,
        regime: Regime,
    ) -> &RegimeRules {
        match regime {
            Regime::New => &self.new_regime,
            Regime::Old => &self.old_regime,
        }
    }

    /// Checks that every slab table is ordered, contiguous and starts at
    /// zero, that rates are fractions, and that surcharge bands ascend.
    pub fn validate(&self) -> Result<(), RulesError> {
        self.new_regime.validate("new_regime")?;
        self.old_regime.validate("old_regime")?;
        check_rate("cess_rate", self.cess_rate)
    }
}

/// Builds a contiguous table from `(floor, rate)` pairs; each slab ends
/// where the next begins and the last is open-ended.
fn slab_table(steps: &[(Decimal, Decimal)]) -> Vec<TaxSlab> {
    steps
        .iter()
        .enumerate()
        .map(|(i, &(floor, rate))| {
            let ceiling = steps.get(i + 1).map(|&(next, _)| next);
            TaxSlab::new(floor, ceiling, rate)
        })
        .collect()
}

fn check_rate(
    table: &str,
    rate: Decimal,
) -> Result<(), RulesError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(RulesError::RateOutOfRange {
            table: table.to_string(),
            rate,
        });
    }
    Ok(())
}

fn validate_slabs(
    table: &str,
    slabs: &[TaxSlab],
) -> Result<(), RulesError> {
    let first = slabs.first().ok_or_else(|| RulesError::EmptySlabTable {
        table: table.to_string(),
    })?;
    if first.floor != Decimal::ZERO {
        return Err(RulesError::NonZeroFirstFloor {
            table: table.to_string(),
            floor: first.floor,
        });
    }

    for (index, slab) in slabs.iter().enumerate() {
        check_rate(table, slab.rate)?;

        let is_last = index + 1 == slabs.len();
        match (slab.ceiling, is_last) {
            (None, false) => {
                return Err(RulesError::OpenSlabNotLast {
                    table: table.to_string(),
                    index,
                });
            }
            (Some(ceiling), false) => {
                let next = &slabs[index + 1];
                if next.floor != ceiling || ceiling <= slab.floor {
                    return Err(RulesError::GapInSlabs {
                        table: table.to_string(),
                        index: index + 1,
                        floor: next.floor,
                        expected: ceiling,
                    });
                }
            }
            (_, true) => {}
        }
    }
    Ok(())
}

fn validate_surcharge(
    table: &str,
    bands: &[SurchargeBand],
) -> Result<(), RulesError> {
    for band in bands {
        check_rate(table, band.rate)?;
    }
    if bands.windows(2).any(|pair| pair[0].above >= pair[1].above) {
        return Err(RulesError::UnorderedSurchargeBands {
            table: table.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn built_in_rules_are_valid() {
        assert_eq!(TaxRules::fy_2024_25().validate(), Ok(()));
    }

    #[test]
    fn slab_table_chains_ceilings() {
        let slabs = slab_table(&[
            (dec!(0), dec!(0)),
            (dec!(100), dec!(0.1)),
            (dec!(200), dec!(0.2)),
        ]);

        assert_eq!(
            slabs,
            vec![
                TaxSlab::new(dec!(0), Some(dec!(100)), dec!(0)),
                TaxSlab::new(dec!(100), Some(dec!(200)), dec!(0.1)),
                TaxSlab::new(dec!(200), None, dec!(0.2)),
            ]
        );
    }

    #[test]
    fn new_regime_uses_one_table_for_every_age() {
        let rules = TaxRules::fy_2024_25();

        for age in AgeBracket::ALL {
            assert_eq!(rules.new_regime.slabs_for(age), rules.new_regime.slabs.as_slice());
        }
    }

    #[test]
    fn old_regime_zero_bracket_depends_on_age() {
        let rules = TaxRules::fy_2024_25();
        let zero_ceiling = |age| rules.old_regime.slabs_for(age)[0].ceiling;

        assert_eq!(zero_ceiling(AgeBracket::Below60), Some(dec!(250000)));
        assert_eq!(zero_ceiling(AgeBracket::Senior60To80), Some(dec!(300000)));
        assert_eq!(zero_ceiling(AgeBracket::SuperSenior80Plus), Some(dec!(500000)));
    }

    #[test]
    fn validate_rejects_empty_table() {
        let mut rules = TaxRules::fy_2024_25();
        rules.new_regime.slabs.clear();

        assert_eq!(
            rules.validate(),
            Err(RulesError::EmptySlabTable {
                table: "new_regime.slabs".to_string()
            })
        );
    }

    #[test]
    fn validate_rejects_non_zero_start() {
        let mut rules = TaxRules::fy_2024_25();
        rules.old_regime.slabs[0].floor = dec!(1);

        assert_eq!(
            rules.validate(),
            Err(RulesError::NonZeroFirstFloor {
                table: "old_regime.slabs".to_string(),
                floor: dec!(1),
            })
        );
    }

    #[test]
    fn validate_rejects_gap_between_slabs() {
        let mut rules = TaxRules::fy_2024_25();
        rules.new_regime.slabs[2].floor = dec!(650000);

        assert_eq!(
            rules.validate(),
            Err(RulesError::GapInSlabs {
                table: "new_regime.slabs".to_string(),
                index: 2,
                floor: dec!(650000),
                expected: dec!(600000),
            })
        );
    }

    #[test]
    fn validate_rejects_open_slab_in_the_middle() {
        let mut rules = TaxRules::fy_2024_25();
        if let Some(slabs) = rules.old_regime.senior_slabs.as_mut() {
            slabs[1].ceiling = None;
        }

        assert_eq!(
            rules.validate(),
            Err(RulesError::OpenSlabNotLast {
                table: "old_regime.senior_slabs".to_string(),
                index: 1,
            })
        );
    }

    #[test]
    fn validate_rejects_percentage_written_as_whole_number() {
        let mut rules = TaxRules::fy_2024_25();
        rules.cess_rate = dec!(4);

        assert_eq!(
            rules.validate(),
            Err(RulesError::RateOutOfRange {
                table: "cess_rate".to_string(),
                rate: dec!(4),
            })
        );
    }

    #[test]
    fn validate_rejects_descending_surcharge_bands() {
        let mut rules = TaxRules::fy_2024_25();
        rules.old_regime.surcharge.swap(0, 1);

        assert_eq!(
            rules.validate(),
            Err(RulesError::UnorderedSurchargeBands {
                table: "old_regime.surcharge".to_string()
            })
        );
    }
}
