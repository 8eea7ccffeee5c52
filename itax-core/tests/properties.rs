//! Invariants checked over a sweep of incomes, regimes, ages and deductions.

use itax_core::calculations::regime_tax::slab_tax;
use itax_core::{
    AgeBracket, DeductionCode, DeductionSet, IncomeHead, IncomeProfile, OtherIncome, Regime,
    TaxBreakdown, TaxCalculator, TaxRequest, TaxRules,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Incomes from zero to six crore, dense around the rebate and surcharge
/// thresholds.
fn income_grid() -> Vec<Decimal> {
    let mut incomes: Vec<Decimal> = (0..=200).map(|i| Decimal::from(i * 25_000)).collect();
    for threshold in [
        dec!(250000),
        dec!(300000),
        dec!(500000),
        dec!(700000),
        dec!(5000000),
        dec!(10000000),
        dec!(20000000),
        dec!(50000000),
    ] {
        incomes.extend([threshold - dec!(0.01), threshold, threshold + dec!(0.01)]);
    }
    incomes.extend((1..=12).map(|i| Decimal::from(i * 5_000_000)));
    incomes.sort();
    incomes.dedup();
    incomes
}

fn deduction_sets() -> Vec<DeductionSet> {
    vec![
        DeductionSet::new(),
        DeductionSet::new().with(DeductionCode::Section80C, dec!(200000)),
        DeductionSet::new()
            .with(DeductionCode::Section80C, dec!(150000))
            .with(DeductionCode::Section80D, dec!(60000))
            .with(DeductionCode::Section24B, dec!(200000))
            .with(DeductionCode::Section80E, dec!(75000))
            .with(DeductionCode::Section80Tta, dec!(10000))
            .with(DeductionCode::Section80Ttb, dec!(50000)),
    ]
}

fn each_request(mut check: impl FnMut(&TaxRequest, &[Decimal])) {
    let incomes = income_grid();
    for regime in Regime::ALL {
        for age in AgeBracket::ALL {
            for deductions in deduction_sets() {
                let profile = IncomeProfile::new(Decimal::ZERO).with_age(age);
                let request = TaxRequest::new(profile, regime).with_deductions(deductions);
                check(&request, &incomes);
            }
        }
    }
}

fn at_income(
    request: &TaxRequest,
    income: Decimal,
) -> TaxRequest {
    let mut request = request.clone();
    request.profile.gross_income = income;
    request
}

fn assert_breakdown_consistent(b: &TaxBreakdown) {
    for amount in [
        b.gross_total_income,
        b.total_deductions,
        b.taxable_income,
        b.base_tax,
        b.rebate,
        b.tax_after_rebate,
        b.surcharge,
        b.cess,
        b.total_payable,
    ] {
        assert!(amount >= Decimal::ZERO, "negative amount in {b:?}");
        assert_eq!(amount.round_dp(2), amount, "unrounded amount in {b:?}");
    }
    assert_eq!(b.tax_after_rebate, b.base_tax - b.rebate, "{b:?}");
    assert_eq!(b.total_payable, b.tax_after_rebate + b.surcharge + b.cess, "{b:?}");
    assert_eq!(b.taxable_income, b.gross_total_income - b.total_deductions, "{b:?}");
}

#[test]
fn every_breakdown_is_non_negative_and_sums_up() {
    let rules = TaxRules::fy_2024_25();
    let calculator = TaxCalculator::new(&rules);

    each_request(|request, incomes| {
        for &income in incomes {
            let breakdown = calculator.calculate(&at_income(request, income)).unwrap();
            assert_breakdown_consistent(&breakdown);
        }
    });
}

#[test]
fn total_payable_never_decreases_with_income() {
    let rules = TaxRules::fy_2024_25();
    let calculator = TaxCalculator::new(&rules);

    each_request(|request, incomes| {
        let mut previous = Decimal::ZERO;
        for &income in incomes {
            let total = calculator.calculate(&at_income(request, income)).unwrap().total_payable;
            assert!(
                total >= previous,
                "{:?}/{:?}: total fell from {previous} to {total} at income {income}",
                request.regime,
                request.age_bracket(),
            );
            previous = total;
        }
    });
}

#[test]
fn rebate_never_exceeds_cap_or_tax() {
    let rules = TaxRules::fy_2024_25();
    let calculator = TaxCalculator::new(&rules);

    each_request(|request, incomes| {
        let cap = rules.regime(request.regime).rebate.max_rebate;
        for &income in incomes {
            let b = calculator.calculate(&at_income(request, income)).unwrap();
            assert!(b.rebate <= cap, "{b:?}");
            assert!(b.rebate <= b.base_tax, "{b:?}");
        }
    });
}

#[test]
fn no_tax_inside_zero_bracket() {
    let rules = TaxRules::fy_2024_25();

    let new_slabs = &rules.new_regime.slabs;
    for income in [dec!(0), dec!(1), dec!(150000), dec!(299999.99), dec!(300000)] {
        assert_eq!(slab_tax(new_slabs, income), Decimal::ZERO);
    }

    for (age, ceiling) in [
        (AgeBracket::Below60, dec!(250000)),
        (AgeBracket::Senior60To80, dec!(300000)),
        (AgeBracket::SuperSenior80Plus, dec!(500000)),
    ] {
        let slabs = rules.old_regime.slabs_for(age);
        assert_eq!(slab_tax(slabs, ceiling), Decimal::ZERO, "{age:?}");
        assert!(slab_tax(slabs, ceiling + dec!(1)) > Decimal::ZERO, "{age:?}");
    }
}

#[test]
fn new_regime_ignores_deductions_and_other_income() {
    let rules = TaxRules::fy_2024_25();
    let calculator = TaxCalculator::new(&rules);
    let plain = TaxRequest::new(IncomeProfile::new(dec!(1800000)), Regime::New);
    let mut decorated = plain
        .clone()
        .with_deductions(DeductionSet::new().with(DeductionCode::Section80C, dec!(150000)));
    decorated.profile.other_income = OtherIncome::default().with(IncomeHead::Interest, dec!(90000));

    assert_eq!(
        calculator.calculate(&plain).unwrap(),
        calculator.calculate(&decorated).unwrap()
    );
}
