mod age_bracket;
mod deduction;
mod income;
mod regime;
mod tax_breakdown;
mod tax_request;
mod tax_rules;
mod tax_slab;

pub use age_bracket::AgeBracket;
pub use deduction::{CapRule, DeductionCode, DeductionSet};
pub use income::{IncomeHead, IncomeProfile, OtherIncome};
pub use regime::Regime;
pub use tax_breakdown::{RegimeComparison, TaxBreakdown};
pub use tax_request::TaxRequest;
pub use tax_rules::{RebateBasis, RebateRule, RegimeRules, RulesError, TaxRules};
pub use tax_slab::{SurchargeBand, TaxSlab};
