//! Rounding and clamping shared by every calculator stage.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to paise (two decimal places), midpoint away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(20804.105)), dec!(20804.11));
/// assert_eq!(round_half_up(dec!(20804.104)), dec!(20804.10));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps negative amounts to zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-50000)), dec!(0));
/// assert_eq!(non_negative(dec!(12.5)), dec!(12.5));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// `amount × rate`, rounded to paise.
pub fn apply_rate(
    amount: Decimal,
    rate: Decimal,
) -> Decimal {
    round_half_up(amount * rate)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(1000.005)), dec!(1000.01));
    }

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(1000.0049)), dec!(1000.00));
    }

    #[test]
    fn round_half_up_keeps_whole_rupees() {
        assert_eq!(round_half_up(dec!(85800)), dec!(85800));
    }

    // =========================================================================
    // non_negative tests
    // =========================================================================

    #[test]
    fn non_negative_clamps_below_zero() {
        assert_eq!(non_negative(dec!(-0.01)), dec!(0));
    }

    #[test]
    fn non_negative_passes_positive_through() {
        assert_eq!(non_negative(dec!(700000)), dec!(700000));
    }

    // =========================================================================
    // apply_rate tests
    // =========================================================================

    #[test]
    fn apply_rate_rounds_product() {
        // 20000.10 × 0.04 = 800.004
        assert_eq!(apply_rate(dec!(20000.10), dec!(0.04)), dec!(800.00));
        // 333.375 × 0.10 = 33.3375
        assert_eq!(apply_rate(dec!(333.375), dec!(0.10)), dec!(33.34));
    }

    #[test]
    fn apply_rate_zero_rate_is_zero() {
        assert_eq!(apply_rate(dec!(123456.78), dec!(0)), dec!(0));
    }
}
