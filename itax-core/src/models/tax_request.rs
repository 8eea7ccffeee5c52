use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AgeBracket, DeductionSet, IncomeHead, IncomeProfile, Regime, TaxError};

/// One calculation request as handed over by an input surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRequest {
    pub profile: IncomeProfile,
    pub regime: Regime,
    /// Only honoured under the Old regime.
    #[serde(default)]
    pub deductions: DeductionSet,
}

impl TaxRequest {
    pub fn new(
        profile: IncomeProfile,
        regime: Regime,
    ) -> Self {
        Self {
            profile,
            regime,
            deductions: DeductionSet::default(),
        }
    }

    pub fn with_deductions(
        mut self,
        deductions: DeductionSet,
    ) -> Self {
        self.deductions = deductions;
        self
    }

    /// The same request under the other regime.
    pub fn with_regime(
        &self,
        regime: Regime,
    ) -> Self {
        Self {
            regime,
            ..self.clone()
        }
    }

    pub fn age_bracket(&self) -> AgeBracket {
        self.profile.age_bracket
    }

    /// Gross total income for this request's regime.
    ///
    /// Other income heads are only collected by the Old regime's input
    /// surface, so the New regime taxes `gross_income` alone.
    pub fn gross_total_income(&self) -> Decimal {
        match self.regime {
            Regime::New => self.profile.gross_income,
            Regime::Old => self.profile.gross_income + self.profile.other_income.total(),
        }
    }

    /// Rejects negative amounts anywhere in the request, naming the field.
    pub fn validate(&self) -> Result<(), TaxError> {
        if self.profile.gross_income < Decimal::ZERO {
            return Err(TaxError::negative("gross_income", self.profile.gross_income));
        }
        for head in IncomeHead::ALL {
            let amount = self.profile.other_income.get(head);
            if amount < Decimal::ZERO {
                return Err(TaxError::negative(format!("other_income.{head}"), amount));
            }
        }
        for (code, amount) in self.deductions.claims() {
            if amount < Decimal::ZERO {
                return Err(TaxError::negative(format!("deductions.{code}"), amount));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{DeductionCode, OtherIncome};

    fn old_request() -> TaxRequest {
        let profile = IncomeProfile::new(dec!(600000))
            .with_other_income(OtherIncome::default().with(IncomeHead::Interest, dec!(20000)));
        TaxRequest::new(profile, Regime::Old)
    }

    #[test]
    fn old_regime_gross_total_income_includes_other_heads() {
        assert_eq!(old_request().gross_total_income(), dec!(620000));
    }

    #[test]
    fn new_regime_gross_total_income_is_gross_income_only() {
        let request = old_request().with_regime(Regime::New);

        assert_eq!(request.gross_total_income(), dec!(600000));
    }

    #[test]
    fn with_regime_leaves_original_untouched() {
        let original = old_request();
        let switched = original.with_regime(Regime::New);

        assert_eq!(original.regime, Regime::Old);
        assert_eq!(switched.regime, Regime::New);
        assert_eq!(switched.profile, original.profile);
    }

    #[test]
    fn validate_accepts_zero_amounts() {
        let request = TaxRequest::new(IncomeProfile::new(dec!(0)), Regime::New)
            .with_deductions(DeductionSet::new().with(DeductionCode::Section80C, dec!(0)));

        assert_eq!(request.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_negative_gross_income() {
        let request = TaxRequest::new(IncomeProfile::new(dec!(-1)), Regime::New);

        assert_eq!(
            request.validate(),
            Err(TaxError::InvalidInput {
                field: "gross_income".to_string(),
                reason: "-1 must not be negative".to_string(),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_other_income() {
        let mut request = old_request();
        request.profile.other_income.set(IncomeHead::ShortTermCapitalGains, dec!(-5000));

        assert_eq!(
            request.validate(),
            Err(TaxError::InvalidInput {
                field: "other_income.stcg".to_string(),
                reason: "-5000 must not be negative".to_string(),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_deduction_even_under_new_regime() {
        let request = TaxRequest::new(IncomeProfile::new(dec!(100000)), Regime::New)
            .with_deductions(DeductionSet::new().with(DeductionCode::Section80Ccd1B, dec!(-0.01)));

        assert_eq!(
            request.validate(),
            Err(TaxError::InvalidInput {
                field: "deductions.80CCD(1B)".to_string(),
                reason: "-0.01 must not be negative".to_string(),
            })
        );
    }
}
