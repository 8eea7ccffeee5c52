//! Surcharge on post-rebate tax for high incomes.
//!
//! The rate is a step function of gross total income applied flatly to the
//! whole tax amount. There is no marginal relief at band boundaries.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::apply_rate;
use crate::SurchargeBand;

/// Rate of the highest band whose threshold income strictly exceeds.
pub fn surcharge_rate(
    bands: &[SurchargeBand],
    gross_total_income: Decimal,
) -> Decimal {
    bands
        .iter()
        .take_while(|band| gross_total_income > band.above)
        .last()
        .map_or(Decimal::ZERO, |band| band.rate)
}

/// Surcharge on `tax`, rounded to paise.
pub fn surcharge(
    bands: &[SurchargeBand],
    tax: Decimal,
    gross_total_income: Decimal,
) -> Decimal {
    let rate = surcharge_rate(bands, gross_total_income);
    let amount = apply_rate(tax, rate);
    debug!(%gross_total_income, %rate, %amount, "surcharge computed");
    amount
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{Regime, TaxRules};

    fn bands(regime: Regime) -> Vec<SurchargeBand> {
        TaxRules::fy_2024_25().regime(regime).surcharge.clone()
    }

    #[test]
    fn no_surcharge_up_to_fifty_lakh() {
        for regime in Regime::ALL {
            assert_eq!(surcharge_rate(&bands(regime), dec!(0)), dec!(0));
            assert_eq!(surcharge_rate(&bands(regime), dec!(5000000)), dec!(0));
        }
    }

    #[test]
    fn rates_step_at_each_threshold() {
        let old = bands(Regime::Old);

        assert_eq!(surcharge_rate(&old, dec!(5000000.01)), dec!(0.10));
        assert_eq!(surcharge_rate(&old, dec!(10000000)), dec!(0.10));
        assert_eq!(surcharge_rate(&old, dec!(10000001)), dec!(0.15));
        assert_eq!(surcharge_rate(&old, dec!(20000000)), dec!(0.15));
        assert_eq!(surcharge_rate(&old, dec!(20000001)), dec!(0.25));
        assert_eq!(surcharge_rate(&old, dec!(50000000)), dec!(0.25));
        assert_eq!(surcharge_rate(&old, dec!(50000001)), dec!(0.37));
    }

    #[test]
    fn new_regime_top_rate_capped_at_25_percent() {
        let new = bands(Regime::New);

        assert_eq!(surcharge_rate(&new, dec!(50000001)), dec!(0.25));
        assert_eq!(surcharge_rate(&new, dec!(900000000)), dec!(0.25));
    }

    #[test]
    fn surcharge_is_flat_percentage_of_tax() {
        let old = bands(Regime::Old);

        assert_eq!(surcharge(&old, dec!(500000), dec!(6000000)), dec!(50000));
    }

    #[test]
    fn surcharge_without_bands_is_zero() {
        assert_eq!(surcharge(&[], dec!(500000), dec!(60000000)), dec!(0));
    }
}
