use rust_decimal::Decimal;

use crate::calculations::common::apply_rate;

/// Health and education cess on tax plus surcharge.
pub fn cess(
    tax_plus_surcharge: Decimal,
    rate: Decimal,
) -> Decimal {
    apply_rate(tax_plus_surcharge, rate)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn four_percent_of_tax_plus_surcharge() {
        assert_eq!(cess(dec!(82500), dec!(0.04)), dec!(3300));
        assert_eq!(cess(dec!(550000), dec!(0.04)), dec!(22000));
    }

    #[test]
    fn zero_tax_zero_cess() {
        assert_eq!(cess(dec!(0), dec!(0.04)), dec!(0));
    }
}
