use std::collections::BTreeMap;
use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::depreciation::{component_depreciation, DepreciableAsset};
use crate::error::RentSimError;
use crate::loan::detailed::{self, LoanYear};
use crate::tax;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::RentSimResult;

use super::{LoanSpec, SimulationParameters, YearlyResult};

fn validate(params: &SimulationParameters) -> RentSimResult<()> {
    if params.period_years == 0 {
        return Err(RentSimError::InvalidInput {
            field: "period_years".into(),
            reason: "Projection period must be at least 1 year".into(),
        });
    }
    if params.occupancy_pct < Decimal::ZERO || params.occupancy_pct > dec!(100) {
        return Err(RentSimError::InvalidInput {
            field: "occupancy_pct".into(),
            reason: format!("Occupancy must be 0-100, got {}", params.occupancy_pct),
        });
    }
    for (field, value) in [
        ("management_fee_pct", params.management_fee_pct),
        ("repair_reserve_pct", params.repair_reserve_pct),
    ] {
        if value < Decimal::ZERO {
            return Err(RentSimError::InvalidInput {
                field: field.into(),
                reason: "Expense ratio must not be negative".into(),
            });
        }
    }
    Ok(())
}

/// Interest, principal repaid, and end-of-year balance for one projected year.
fn loan_figures(
    loan: &LoanSpec,
    detailed_years: &BTreeMap<i32, LoanYear>,
    year: i32,
    balance_carried: Money,
) -> (Money, Money, Money) {
    match loan {
        LoanSpec::None => (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        LoanSpec::Simple {
            annual_rate_pct,
            annual_payment,
            ..
        } => {
            let interest = balance_carried * *annual_rate_pct / dec!(100);
            // The principal portion is the payment remainder even when it
            // overshoots the balance; only the balance itself is floored.
            let principal = *annual_payment - interest;
            let end_balance = (balance_carried - principal).max(Decimal::ZERO);
            (interest, principal, end_balance)
        }
        LoanSpec::Detailed { .. } => detailed_years
            .get(&year)
            .map(|ly| (ly.interest, ly.principal, ly.end_balance))
            .unwrap_or((Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)),
    }
}

fn resolve_depreciation(
    components: &[DepreciableAsset],
    manual: Money,
    year_offset: u32,
    warnings: &mut Vec<String>,
) -> Money {
    let from_components = component_depreciation(components, year_offset);
    if from_components > Decimal::ZERO {
        return from_components;
    }
    if manual > Decimal::ZERO && year_offset == 0 {
        warnings.push(
            "No depreciable components configured; using the flat manual depreciation amount"
                .to_string(),
        );
    }
    manual
}

fn resolve_tax(manual_rate_pct: Option<Rate>, base: Money) -> Money {
    let owed = match manual_rate_pct {
        Some(rate) => base * rate / dec!(100),
        None => tax::progressive_tax(base),
    };
    owed.max(Decimal::ZERO)
}

/// Run the projection over the configured horizon.
///
/// Detailed-mode loans are amortised once up front and their per-year totals
/// are authoritative for interest, principal, and balance. Simple mode
/// recomputes interest yearly against the carried balance. Depreciation comes
/// from the configured components, falling back to the flat manual amount
/// when none are set.
pub fn project(
    params: &SimulationParameters,
) -> RentSimResult<ComputationOutput<Vec<YearlyResult>>> {
    let start = Instant::now();
    validate(params)?;

    let mut warnings = Vec::new();

    let detailed_years = match &params.loan {
        LoanSpec::Detailed { loan, rates } => {
            if rates.is_empty() {
                return Err(RentSimError::Configuration(
                    "detailed loan mode requires a non-empty interest-rate schedule".to_string(),
                ));
            }
            detailed::yearly_totals(loan, rates, params.start_year, params.period_years)?
        }
        _ => BTreeMap::new(),
    };

    let components = params.components();
    let full_rent = params.rent_roll.annual();

    let mut balance = match &params.loan {
        LoanSpec::Simple { balance, .. } => *balance,
        _ => Decimal::ZERO,
    };

    let mut results = Vec::with_capacity(params.period_years as usize);
    for offset in 0..params.period_years {
        let year = params.start_year + offset as i32;

        let rent_income = full_rent * params.occupancy_pct / dec!(100);
        let total_income = rent_income + params.other_income;

        let management_fee = rent_income * params.management_fee_pct / dec!(100);
        let repair_cost = rent_income * params.repair_reserve_pct / dec!(100);

        let (interest, principal, end_balance) =
            loan_figures(&params.loan, &detailed_years, year, balance);

        let depreciation =
            resolve_depreciation(&components, params.manual_depreciation, offset, &mut warnings);

        let total_expenses = management_fee
            + repair_cost
            + params.property_tax
            + params.insurance
            + interest
            + depreciation
            + params.other_expenses;

        let taxable_income = total_income - total_expenses;
        let tax = resolve_tax(
            params.manual_tax_rate_pct,
            taxable_income + params.other_taxable_income,
        );

        // Depreciation is a non-cash expense: add it back before deducting
        // tax and principal repayment.
        let cash_flow = total_income - (total_expenses - depreciation) - tax - principal;

        results.push(YearlyResult {
            year,
            rent_income,
            other_income: params.other_income,
            total_income,
            management_fee,
            repair_cost,
            property_tax: params.property_tax,
            insurance: params.insurance,
            interest,
            depreciation,
            other_expenses: params.other_expenses,
            total_expenses,
            taxable_income,
            tax,
            cash_flow,
            loan_balance: end_balance,
        });

        balance = end_balance;
    }

    Ok(with_metadata(
        "Multi-Year Property Cash-Flow Projection",
        params,
        warnings,
        start.elapsed().as_micros() as u64,
        results,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depreciation::DepreciationMethod;
    use crate::loan::detailed::{DetailedLoan, FirstInterestPolicy};
    use crate::loan::schedule::{RateSchedule, RateWindow};
    use crate::loan::RepaymentMethod;
    use crate::projection::{RentRoll, SimulationKind};
    use chrono::NaiveDate;

    fn base_params() -> SimulationParameters {
        SimulationParameters {
            kind: SimulationKind::Standalone,
            start_year: 2026,
            period_years: 3,
            occupancy_pct: dec!(95),
            management_fee_pct: dec!(5),
            repair_reserve_pct: dec!(5),
            property_tax: dec!(500_000),
            insurance: dec!(100_000),
            other_income: Decimal::ZERO,
            other_expenses: Decimal::ZERO,
            other_taxable_income: Decimal::ZERO,
            manual_tax_rate_pct: None,
            rent_roll: RentRoll::Annual(dec!(12_000_000)),
            loan: LoanSpec::Simple {
                balance: dec!(30_000_000),
                annual_rate_pct: dec!(2.0),
                annual_payment: dec!(1_500_000),
            },
            building: Some(DepreciableAsset {
                cost: dec!(20_000_000),
                useful_life_years: 20,
                method: DepreciationMethod::StraightLine,
                salvage: Decimal::ZERO,
            }),
            fixtures: None,
            improvements: None,
            manual_depreciation: Decimal::ZERO,
        }
    }

    #[test]
    fn test_reference_scenario_first_year() {
        let output = project(&base_params()).unwrap();
        let y1 = &output.result[0];

        assert_eq!(y1.year, 2026);
        assert_eq!(y1.rent_income, dec!(11_400_000));
        assert_eq!(y1.management_fee, dec!(570_000));
        assert_eq!(y1.repair_cost, dec!(570_000));
        assert_eq!(y1.interest, dec!(600_000));
        assert_eq!(y1.depreciation, dec!(1_000_000));
        assert_eq!(y1.total_expenses, dec!(3_340_000));
        assert_eq!(y1.taxable_income, dec!(8_060_000));
        assert_eq!(y1.tax, dec!(2_023_800));
        // 11.4M - (3.34M - 1M) - 2,023,800 - 900,000
        assert_eq!(y1.cash_flow, dec!(6_136_200));
        assert_eq!(y1.loan_balance, dec!(29_100_000));
    }

    #[test]
    fn test_simple_loan_interest_declines_with_balance() {
        let output = project(&base_params()).unwrap();
        // Year two interest accrues on the reduced balance: 29.1M * 2%.
        assert_eq!(output.result[1].interest, dec!(582_000));
        assert!(output.result[1].loan_balance < output.result[0].loan_balance);
    }

    #[test]
    fn test_period_length_and_years() {
        let output = project(&base_params()).unwrap();
        assert_eq!(output.result.len(), 3);
        assert_eq!(output.result[2].year, 2028);
    }

    #[test]
    fn test_monthly_room_rents_annualised() {
        let mut params = base_params();
        params.rent_roll = RentRoll::MonthlyRooms(vec![dec!(80_000); 5]);
        params.occupancy_pct = dec!(100);
        let output = project(&params).unwrap();
        // 5 rooms * 80,000 * 12 months
        assert_eq!(output.result[0].rent_income, dec!(4_800_000));
    }

    #[test]
    fn test_manual_tax_rate_overrides_table() {
        let mut params = base_params();
        params.manual_tax_rate_pct = Some(dec!(30));
        let output = project(&params).unwrap();
        let y1 = &output.result[0];
        assert_eq!(y1.tax, y1.taxable_income * dec!(0.30));
    }

    #[test]
    fn test_loss_year_owes_no_tax() {
        let mut params = base_params();
        params.rent_roll = RentRoll::Annual(dec!(1_000_000));
        let output = project(&params).unwrap();
        let y1 = &output.result[0];
        assert!(y1.taxable_income < Decimal::ZERO);
        assert_eq!(y1.tax, Decimal::ZERO);
    }

    #[test]
    fn test_other_taxable_income_raises_bracket() {
        let mut params = base_params();
        params.other_taxable_income = dec!(10_000_000);
        let with_other = project(&params).unwrap();
        let without = project(&base_params()).unwrap();
        assert!(with_other.result[0].tax > without.result[0].tax);
    }

    #[test]
    fn test_manual_depreciation_fallback_warns_once() {
        let mut params = base_params();
        params.building = None;
        params.manual_depreciation = dec!(800_000);
        let output = project(&params).unwrap();
        assert_eq!(output.result[0].depreciation, dec!(800_000));
        assert_eq!(output.warnings.len(), 1);
    }

    #[test]
    fn test_detailed_mode_balance_is_authoritative() {
        let mut params = base_params();
        params.loan = LoanSpec::Detailed {
            loan: DetailedLoan {
                principal: dec!(30_000_000),
                origination: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
                payment_day: 27,
                repayment_start: "2026-02".parse().unwrap(),
                grace_period_end: None,
                first_interest: FirstInterestPolicy::Ignore,
                method: RepaymentMethod::EqualInstallment,
                term_years: 35,
            },
            rates: RateSchedule::new(vec![RateWindow {
                from: "2026-01".parse().unwrap(),
                to: None,
                annual_rate_pct: dec!(2.0),
            }]),
        };
        let output = project(&params).unwrap();
        let y1 = &output.result[0];
        // Eleven installments fall in 2026; the balance reflects them.
        assert!(y1.interest > Decimal::ZERO);
        assert!(y1.loan_balance < dec!(30_000_000));
        assert!(y1.loan_balance > dec!(29_000_000));
        assert!(output.result[1].loan_balance < y1.loan_balance);
    }

    #[test]
    fn test_detailed_mode_requires_rates() {
        let mut params = base_params();
        params.loan = LoanSpec::Detailed {
            loan: DetailedLoan {
                principal: dec!(30_000_000),
                origination: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
                payment_day: 27,
                repayment_start: "2026-02".parse().unwrap(),
                grace_period_end: None,
                first_interest: FirstInterestPolicy::Ignore,
                method: RepaymentMethod::EqualInstallment,
                term_years: 35,
            },
            rates: RateSchedule::default(),
        };
        assert!(matches!(
            project(&params),
            Err(RentSimError::Configuration(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_occupancy() {
        let mut params = base_params();
        params.occupancy_pct = dec!(120);
        assert!(project(&params).is_err());

        let mut params = base_params();
        params.period_years = 0;
        assert!(project(&params).is_err());
    }
}
