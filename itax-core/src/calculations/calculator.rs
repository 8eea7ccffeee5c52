//! Orchestrates the regime, surcharge and cess stages into a [`TaxBreakdown`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use itax_core::{IncomeProfile, Regime, TaxCalculator, TaxRequest, TaxRules};
//!
//! let rules = TaxRules::fy_2024_25();
//! let request = TaxRequest::new(IncomeProfile::new(dec!(1200000)), Regime::New);
//!
//! let breakdown = TaxCalculator::new(&rules).calculate(&request).unwrap();
//!
//! assert_eq!(breakdown.taxable_income, dec!(1150000));
//! assert_eq!(breakdown.base_tax, dec!(82500));
//! assert_eq!(breakdown.cess, dec!(3300));
//! assert_eq!(breakdown.total_payable, dec!(85800));
//! ```

use tracing::{debug, info};

use crate::calculations::{cess, surcharge, RegimeTaxCalculator};
use crate::{Regime, RegimeComparison, TaxBreakdown, TaxError, TaxRequest, TaxRules};

/// Stateless entry point for complete liability calculations.
#[derive(Debug, Clone)]
pub struct TaxCalculator<'a> {
    rules: &'a TaxRules,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(rules: &'a TaxRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &TaxRules {
        self.rules
    }

    /// Validates the request and runs regime tax → surcharge → cess.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidInput`] if any amount in the request is
    /// negative. Nothing fails after validation.
    pub fn calculate(
        &self,
        request: &TaxRequest,
    ) -> Result<TaxBreakdown, TaxError> {
        request.validate()?;

        let regime_tax = RegimeTaxCalculator::new(self.rules).calculate(request);
        let regime_rules = self.rules.regime(request.regime);

        let surcharge = surcharge::surcharge(
            &regime_rules.surcharge,
            regime_tax.tax_payable,
            regime_tax.gross_total_income,
        );
        let cess = cess::cess(regime_tax.tax_payable + surcharge, self.rules.cess_rate);
        let total_payable = regime_tax.tax_payable + surcharge + cess;

        debug!(%surcharge, %cess, %total_payable, "liability assembled");

        Ok(TaxBreakdown {
            regime: request.regime,
            age_bracket: request.age_bracket(),
            gross_total_income: regime_tax.gross_total_income,
            total_deductions: regime_tax.total_deductions,
            taxable_income: regime_tax.taxable_income,
            base_tax: regime_tax.tax_before_rebate,
            rebate: regime_tax.rebate,
            tax_after_rebate: regime_tax.tax_payable,
            surcharge,
            cess,
            total_payable,
        })
    }

    /// Computes the same profile under both regimes.
    ///
    /// Each breakdown comes from its own request; neither depends on the
    /// other or on the regime set in `request`.
    pub fn compare(
        &self,
        request: &TaxRequest,
    ) -> Result<RegimeComparison, TaxError> {
        let comparison = RegimeComparison {
            new_regime: self.calculate(&request.with_regime(Regime::New))?,
            old_regime: self.calculate(&request.with_regime(Regime::Old))?,
        };
        info!(
            recommended = comparison.recommended().as_str(),
            saving = %comparison.saving(),
            "regimes compared"
        );
        Ok(comparison)
    }
}
