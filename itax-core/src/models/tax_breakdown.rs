use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AgeBracket, Regime};

/// The itemised result of one calculation.
///
/// Every amount is non-negative and rounded to two decimals, and
/// `total_payable == tax_after_rebate + surcharge + cess` where
/// `tax_after_rebate == base_tax - rebate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub regime: Regime,
    pub age_bracket: AgeBracket,
    pub gross_total_income: Decimal,
    /// Standard deduction (New) or capped itemised deductions (Old).
    pub total_deductions: Decimal,
    pub taxable_income: Decimal,
    /// Slab tax before the section 87A rebate.
    pub base_tax: Decimal,
    pub rebate: Decimal,
    pub tax_after_rebate: Decimal,
    pub surcharge: Decimal,
    pub cess: Decimal,
    pub total_payable: Decimal,
}

impl TaxBreakdown {
    /// Total payable as a fraction of gross total income, rounded to four
    /// decimal places. Zero when there is no income.
    pub fn effective_rate(&self) -> Decimal {
        if self.gross_total_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.total_payable / self.gross_total_income).round_dp(4)
    }
}

/// Both regimes computed for the same profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub new_regime: TaxBreakdown,
    pub old_regime: TaxBreakdown,
}

impl RegimeComparison {
    /// The regime with the lower total; New wins a tie.
    pub fn recommended(&self) -> Regime {
        if self.old_regime.total_payable < self.new_regime.total_payable {
            Regime::Old
        } else {
            Regime::New
        }
    }

    /// How much the recommended regime saves over the other.
    pub fn saving(&self) -> Decimal {
        (self.new_regime.total_payable - self.old_regime.total_payable).abs()
    }

    pub fn get(
        &self,
        regime: Regime,
    ) -> &TaxBreakdown {
        match regime {
            Regime::New => &self.new_regime,
            Regime::Old => &self.old_regime,
        }
    }
}
