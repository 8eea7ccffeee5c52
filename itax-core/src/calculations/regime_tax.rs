//! Slab tax and section 87A rebate for each regime.
//!
//! | Step | New regime | Old regime |
//! |------|------------|------------|
//! | Deductions | Standard deduction only | Capped itemised deductions |
//! | Taxable income | GTI − deductions, floored at 0 | GTI − deductions, floored at 0 |
//! | Slab tax | Single table | Table chosen by age bracket |
//! | Rebate | min(tax, 25,000) if GTI ≤ 7,00,000 | min(tax, 12,500) if GTI ≤ 5,00,000 |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use itax_core::TaxRules;
//! use itax_core::calculations::RegimeTaxCalculator;
//!
//! let rules = TaxRules::fy_2024_25();
//! let result = RegimeTaxCalculator::new(&rules).new_regime(dec!(1200000));
//!
//! assert_eq!(result.taxable_income, dec!(1150000));
//! assert_eq!(result.tax_before_rebate, dec!(82500));
//! assert_eq!(result.rebate, dec!(0));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{non_negative, round_half_up};
use crate::{
    AgeBracket, DeductionCode, DeductionSet, RebateBasis, RebateRule, Regime, RegimeRules,
    TaxRequest, TaxRules, TaxSlab,
};

/// Output of the regime stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegimeTax {
    pub gross_total_income: Decimal,
    /// Deductions actually allowed, never more than gross total income.
    pub total_deductions: Decimal,
    pub taxable_income: Decimal,
    pub tax_before_rebate: Decimal,
    pub rebate: Decimal,
    /// `tax_before_rebate - rebate`, never negative.
    pub tax_payable: Decimal,
}

/// Tax on `taxable_income` under a progressive slab table, unrounded.
///
/// Each slab contributes `rate × (portion of income inside the slab)`, which
/// is the cumulative "full lower brackets plus marginal excess" figure.
pub fn slab_tax(
    slabs: &[TaxSlab],
    taxable_income: Decimal,
) -> Decimal {
    slabs
        .iter()
        .map(|slab| slab.portion_of(taxable_income) * slab.rate)
        .sum()
}

/// Section 87A rebate: `min(tax, max_rebate)` when the income selected by
/// the rule's basis is within the limit, otherwise zero.
pub fn section_87a_rebate(
    rule: &RebateRule,
    gross_total_income: Decimal,
    taxable_income: Decimal,
    tax: Decimal,
) -> Decimal {
    let income = match rule.basis {
        RebateBasis::GrossTotalIncome => gross_total_income,
        RebateBasis::TaxableIncome => taxable_income,
    };
    if income <= rule.income_limit {
        non_negative(tax.min(rule.max_rebate))
    } else {
        Decimal::ZERO
    }
}

/// Computes regime tax (after rebate) from a rule set.
#[derive(Debug, Clone)]
pub struct RegimeTaxCalculator<'a> {
    rules: &'a TaxRules,
}

impl<'a> RegimeTaxCalculator<'a> {
    pub fn new(rules: &'a TaxRules) -> Self {
        Self { rules }
    }

    /// Dispatches on the request's regime. The request is assumed to have
    /// passed [`TaxRequest::validate`].
    pub fn calculate(
        &self,
        request: &TaxRequest,
    ) -> RegimeTax {
        let gross_total_income = request.gross_total_income();
        match request.regime {
            Regime::New => self.new_regime(gross_total_income),
            Regime::Old => {
                self.old_regime(gross_total_income, request.age_bracket(), &request.deductions)
            }
        }
    }

    /// New regime: standard deduction, single slab table, 87A rebate.
    /// Itemised deductions and age do not apply.
    pub fn new_regime(
        &self,
        gross_total_income: Decimal,
    ) -> RegimeTax {
        let rules = &self.rules.new_regime;
        self.compute(
            Regime::New,
            rules,
            rules.slabs_for(AgeBracket::Below60),
            gross_total_income,
            rules.standard_deduction,
        )
    }

    /// Old regime: capped itemised deductions, age-dependent slab table,
    /// 87A rebate.
    pub fn old_regime(
        &self,
        gross_total_income: Decimal,
        age: AgeBracket,
        deductions: &DeductionSet,
    ) -> RegimeTax {
        let rules = &self.rules.old_regime;
        let itemised = self.aggregate_deductions(gross_total_income, age, deductions);
        self.compute(
            Regime::Old,
            rules,
            rules.slabs_for(age),
            gross_total_income,
            rules.standard_deduction + itemised,
        )
    }

    /// Sum of `min(claimed, cap)` over every claimed section.
    ///
    /// A section whose cap resolves to zero for this age bracket (80TTA for
    /// seniors, 80TTB below 60) contributes nothing.
    pub fn aggregate_deductions(
        &self,
        gross_total_income: Decimal,
        age: AgeBracket,
        deductions: &DeductionSet,
    ) -> Decimal {
        if deductions.get(DeductionCode::Section80Tta).is_some()
            && deductions.get(DeductionCode::Section80Ttb).is_some()
        {
            warn!(
                age = %age,
                "both 80TTA and 80TTB claimed; only the one available to this age bracket is allowed"
            );
        }

        deductions
            .claims()
            .map(|(code, claimed)| {
                let cap = code.cap_rule().cap(gross_total_income, age);
                let allowed = non_negative(claimed.min(cap));
                if cap.is_zero() && claimed > Decimal::ZERO {
                    warn!(
                        section = %code,
                        age = %age,
                        %claimed,
                        "deduction not available for age bracket; ignored"
                    );
                } else if allowed < claimed {
                    debug!(section = %code, %claimed, %cap, "deduction capped");
                }
                allowed
            })
            .sum()
    }

    fn compute(
        &self,
        regime: Regime,
        rules: &RegimeRules,
        slabs: &[TaxSlab],
        gross_total_income: Decimal,
        deductions: Decimal,
    ) -> RegimeTax {
        let gross_total_income = round_half_up(gross_total_income);
        let total_deductions = round_half_up(deductions).min(gross_total_income);
        let taxable_income = non_negative(gross_total_income - total_deductions);

        let tax_before_rebate = round_half_up(slab_tax(slabs, taxable_income));
        let rebate = section_87a_rebate(
            &rules.rebate,
            gross_total_income,
            taxable_income,
            tax_before_rebate,
        );
        let tax_payable = non_negative(tax_before_rebate - rebate);

        debug!(
            regime = regime.as_str(),
            %gross_total_income,
            %total_deductions,
            %taxable_income,
            %tax_before_rebate,
            %rebate,
            "regime tax computed"
        );

        RegimeTax {
            gross_total_income,
            total_deductions,
            taxable_income,
            tax_before_rebate,
            rebate,
            tax_payable,
        }
    }
}
