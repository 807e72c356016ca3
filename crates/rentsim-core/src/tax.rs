use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

/// One marginal bracket: the portion of income above the previous bracket's
/// upper bound and at most `upper` is taxed at `rate`. `None` = unbounded.
struct Bracket {
    upper: Option<Decimal>,
    rate: Decimal,
}

const BRACKETS: [Bracket; 7] = [
    Bracket { upper: Some(dec!(1_950_000)), rate: dec!(0.05) },
    Bracket { upper: Some(dec!(3_300_000)), rate: dec!(0.10) },
    Bracket { upper: Some(dec!(6_950_000)), rate: dec!(0.20) },
    Bracket { upper: Some(dec!(9_000_000)), rate: dec!(0.23) },
    Bracket { upper: Some(dec!(18_000_000)), rate: dec!(0.33) },
    Bracket { upper: Some(dec!(40_000_000)), rate: dec!(0.40) },
    Bracket { upper: None, rate: dec!(0.45) },
];

/// Flat resident surtax applied to the full taxable base.
const RESIDENT_TAX_RATE: Decimal = dec!(0.10);

/// Combined income + resident tax on a taxable income amount.
///
/// Income tax accumulates marginally across the bracket table (each rate
/// applies only to the excess over the bracket's lower bound), then the flat
/// 10% resident tax on the whole base is added. Non-positive income owes
/// nothing.
pub fn progressive_tax(taxable_income: Money) -> Money {
    if taxable_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut income_tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;

    for bracket in &BRACKETS {
        match bracket.upper {
            Some(upper) if taxable_income > upper => {
                income_tax += (upper - lower) * bracket.rate;
                lower = upper;
            }
            _ => {
                income_tax += (taxable_income - lower) * bracket.rate;
                break;
            }
        }
    }

    income_tax + taxable_income * RESIDENT_TAX_RATE
}

/// Combined tax as a percentage of the taxable base; zero for non-positive
/// income (division guard).
pub fn effective_rate(taxable_income: Money) -> Rate {
    if taxable_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    progressive_tax(taxable_income) / taxable_income * dec!(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_income_owes_nothing() {
        assert_eq!(progressive_tax(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(progressive_tax(dec!(-1_000_000)), Decimal::ZERO);
    }

    #[test]
    fn test_first_bracket_only() {
        // 1,000,000 * 5% + 1,000,000 * 10% = 50,000 + 100,000
        assert_eq!(progressive_tax(dec!(1_000_000)), dec!(150_000));
    }

    #[test]
    fn test_exactly_at_first_boundary() {
        // 1,950,000 * 5% = 97,500; resident 195,000
        assert_eq!(progressive_tax(dec!(1_950_000)), dec!(292_500));
    }

    #[test]
    fn test_five_million_regression_vector() {
        // 97,500 + 135,000 + 1,700,000 * 20% = 572,500; resident 500,000
        assert_eq!(progressive_tax(dec!(5_000_000)), dec!(1_072_500));
    }

    #[test]
    fn test_top_bracket() {
        // Marginal spans: 1.95M, 1.35M, 3.65M, 2.05M, 9M, 22M, then 10M @ 45%
        // = 13,204,000 + 4,500,000 = 17,704,000; resident 5,000,000
        assert_eq!(progressive_tax(dec!(50_000_000)), dec!(22_704_000));
    }

    #[test]
    fn test_continuity_across_bracket_boundary() {
        // Just above a boundary, the increment is the new marginal rate plus
        // the resident surtax: 50,000 * (10% + 10%) = 10,000
        let below = progressive_tax(dec!(1_950_000));
        let above = progressive_tax(dec!(2_000_000));
        assert_eq!(above - below, dec!(10_000));
    }

    #[test]
    fn test_monotonic_non_decreasing() {
        let samples = [
            dec!(0),
            dec!(100_000),
            dec!(1_950_000),
            dec!(1_950_001),
            dec!(3_300_000),
            dec!(6_950_000),
            dec!(9_000_000),
            dec!(18_000_000),
            dec!(40_000_000),
            dec!(90_000_000),
        ];
        for pair in samples.windows(2) {
            assert!(progressive_tax(pair[0]) <= progressive_tax(pair[1]));
        }
    }

    #[test]
    fn test_effective_rate() {
        // 1,072,500 / 5,000,000 * 100 = 21.45
        assert_eq!(effective_rate(dec!(5_000_000)), dec!(21.45));
        assert_eq!(effective_rate(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(effective_rate(dec!(-500)), Decimal::ZERO);
    }
}
