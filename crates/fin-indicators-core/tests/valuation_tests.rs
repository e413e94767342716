use fin_indicators_core::valuation::wacc;
use fin_indicators_core::FinIndicatorsError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// WACC formula
// ===========================================================================

#[test]
fn test_wacc_concrete_case() {
    // (500/800 * 0.1 + 300/800 * 0.05 * 0.75) = 0.0625 + 0.0140625
    let rate = wacc::wacc(dec!(500), dec!(300), dec!(0.1), dec!(0.05), dec!(0.25));
    assert!(
        (rate * dec!(100) - dec!(7.66)).abs() < dec!(0.01),
        "Expected WACC ~7.66%, got {}",
        rate * dec!(100)
    );
}

#[test]
fn test_wacc_zero_capital() {
    for (ke, kd, t) in [
        (dec!(0.1), dec!(0.05), dec!(0.3)),
        (Decimal::ONE, Decimal::ONE, Decimal::ONE),
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
    ] {
        assert_eq!(wacc::wacc(Decimal::ZERO, Decimal::ZERO, ke, kd, t), Decimal::ZERO);
    }
}

#[test]
fn test_wacc_is_convex_combination_without_tax() {
    let structures = [
        (dec!(1), dec!(0)),
        (dec!(0), dec!(1)),
        (dec!(600), dec!(400)),
        (dec!(1), dec!(3)),
        (dec!(0.35), dec!(0.65)),
    ];
    let costs = [
        (dec!(0.10), dec!(0.05)),
        (dec!(0.04), dec!(0.09)),
        (dec!(0.12), dec!(0.12)),
    ];
    for (equity, debt) in structures {
        for (ke, kd) in costs {
            let rate = wacc::wacc(equity, debt, ke, kd, Decimal::ZERO);
            let lo = ke.min(kd);
            let hi = ke.max(kd);
            assert!(
                rate >= lo && rate <= hi,
                "WACC {rate} outside [{lo}, {hi}] for E={equity}, D={debt}"
            );
        }
    }
}

#[test]
fn test_wacc_stays_within_unit_interval() {
    for t in [dec!(0), dec!(0.25), dec!(1)] {
        for (ke, kd) in [(dec!(1), dec!(1)), (dec!(0), dec!(0)), (dec!(0.3), dec!(0.9))] {
            let rate = wacc::wacc(dec!(7), dec!(3), ke, kd, t);
            assert!(rate >= Decimal::ZERO && rate <= Decimal::ONE, "{rate}");
        }
    }
}

#[test]
fn test_tax_shield_lowers_wacc() {
    let without = wacc::wacc(dec!(60), dec!(40), dec!(0.1), dec!(0.06), Decimal::ZERO);
    let with = wacc::wacc(dec!(60), dec!(40), dec!(0.1), dec!(0.06), dec!(0.3));
    assert!(with < without);
}

// ===========================================================================
// Validated entry points
// ===========================================================================

#[test]
fn test_compute_wacc_rejects_out_of_range_rates() {
    let result = wacc::compute_wacc(dec!(1), dec!(1), dec!(1.5), dec!(0.05), dec!(0.3));
    match result.unwrap_err() {
        FinIndicatorsError::InvalidInput { field, .. } => assert_eq!(field, "cost_of_equity"),
        e => panic!("Expected InvalidInput, got {e:?}"),
    }
}

#[test]
fn test_compute_wacc_matches_formula() {
    let checked = wacc::compute_wacc(dec!(500), dec!(300), dec!(0.1), dec!(0.05), dec!(0.25)).unwrap();
    let raw = wacc::wacc(dec!(500), dec!(300), dec!(0.1), dec!(0.05), dec!(0.25));
    assert_eq!(checked, raw);
}

#[test]
fn test_calculate_wacc_envelope() {
    let input = wacc::WaccInput {
        equity: dec!(500),
        debt: dec!(300),
        cost_of_equity: dec!(0.1),
        cost_of_debt: dec!(0.05),
        tax_rate: dec!(0.25),
    };
    let result = wacc::calculate_wacc(&input).unwrap();
    assert_eq!(result.result.wacc_pct, dec!(7.66));
    assert_eq!(result.result.equity_weight, dec!(0.625));
    assert_eq!(result.result.debt_weight, dec!(0.375));
    assert_eq!(result.result.after_tax_cost_of_debt, dec!(0.0375));
    assert!(result.methodology.contains("WACC"));
    assert_eq!(result.assumptions["equity"], serde_json::json!("500"));
}

#[test]
fn test_equity_weight_mode_matches_amount_mode() {
    let by_weight =
        wacc::WaccInput::from_equity_weight(dec!(0.625), dec!(0.1), dec!(0.05), dec!(0.25)).unwrap();
    let weighted = wacc::calculate_wacc(&by_weight).unwrap().result.wacc;
    let amounts = wacc::wacc(dec!(500), dec!(300), dec!(0.1), dec!(0.05), dec!(0.25));
    assert_eq!(weighted, amounts);
}
