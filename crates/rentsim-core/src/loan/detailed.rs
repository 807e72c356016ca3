//! Detailed-mode loan amortisation: a month-by-month balance walk honouring
//! the origination date, payment day, grace period, and a piecewise interest
//! rate schedule, aggregated into calendar-year totals.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::schedule::RateSchedule;
use super::RepaymentMethod;
use crate::error::RentSimError;
use crate::types::{round_currency, Money, YearMonth};
use crate::RentSimResult;

const DAYS_PER_YEAR: Decimal = dec!(365);

/// How interest accrued between origination and the first scheduled payment
/// is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstInterestPolicy {
    /// Folded into the first payment year's totals.
    PayUpfront,
    /// Settled at the end of the origination month; folded into the
    /// origination year's totals.
    PayAtMonthEnd,
    /// Not charged at all.
    Ignore,
}

/// A detailed-mode loan description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedLoan {
    pub principal: Money,
    pub origination: NaiveDate,
    /// Day of month each installment falls due (1-31, clamped to month end).
    pub payment_day: u32,
    pub repayment_start: YearMonth,
    /// Interest-only until this month's payment date; absent = no grace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace_period_end: Option<YearMonth>,
    pub first_interest: FirstInterestPolicy,
    pub method: RepaymentMethod,
    pub term_years: u32,
}

/// One row of the month-indexed repayment table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyInstallment {
    pub date: NaiveDate,
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    /// Outstanding balance after this installment.
    pub balance: Money,
}

/// Aggregated repayment figures for one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanYear {
    pub principal: Money,
    pub interest: Money,
    pub payment: Money,
    pub end_balance: Money,
}

fn validate(loan: &DetailedLoan) -> RentSimResult<()> {
    if loan.principal < Decimal::ZERO {
        return Err(RentSimError::InvalidInput {
            field: "principal".into(),
            reason: "Loan principal must not be negative".into(),
        });
    }
    if loan.term_years == 0 {
        return Err(RentSimError::InvalidInput {
            field: "term_years".into(),
            reason: "Repayment term must be at least 1 year".into(),
        });
    }
    if !(1..=31).contains(&loan.payment_day) {
        return Err(RentSimError::InvalidInput {
            field: "payment_day".into(),
            reason: format!("Payment day must be 1-31, got {}", loan.payment_day),
        });
    }
    Ok(())
}

/// Build the full-term month table.
///
/// Per month: resolve the active rate, then either charge interest only
/// (grace period) or apply the repayment method. The equal-installment
/// payment is re-derived every month from the remaining balance and the
/// remaining month count, which lets the schedule track mid-term rate
/// changes at the cost of a slight payment drift. Every monetary step is
/// rounded to whole units (half up) before the balance carries forward.
pub fn monthly_schedule(
    loan: &DetailedLoan,
    rates: &RateSchedule,
) -> RentSimResult<Vec<MonthlyInstallment>> {
    validate(loan)?;
    rates.validate()?;

    let total_months = loan.term_years * 12;
    let grace_end = loan
        .grace_period_end
        .map(|ym| ym.date_on(loan.payment_day));

    // Equal-principal portion is fixed once against the original principal.
    let monthly_principal = loan.principal / Decimal::from(total_months);

    let mut balance = loan.principal;
    let mut rows = Vec::with_capacity(total_months as usize);

    for month_idx in 0..total_months {
        let month = loan.repayment_start.plus_months(month_idx);
        let due = month.date_on(loan.payment_day);
        let monthly_rate = rates.rate_for(month) / dec!(100) / dec!(12);

        let in_grace = grace_end.map(|end| due < end).unwrap_or(false);

        let (payment, principal, interest) = if in_grace {
            let interest = round_currency(balance * monthly_rate);
            (interest, Decimal::ZERO, interest)
        } else {
            match loan.method {
                RepaymentMethod::EqualInstallment => {
                    if monthly_rate.is_zero() {
                        let payment = loan.principal / Decimal::from(total_months);
                        (payment, payment, Decimal::ZERO)
                    } else {
                        let remaining = (total_months - month_idx) as i64;
                        let compound = (Decimal::ONE + monthly_rate).powi(remaining);
                        let payment = round_currency(
                            balance * monthly_rate * compound / (compound - Decimal::ONE),
                        );
                        let interest = round_currency(balance * monthly_rate);
                        (payment, payment - interest, interest)
                    }
                }
                RepaymentMethod::EqualPrincipal => {
                    let principal = round_currency(monthly_principal);
                    let interest = round_currency(balance * monthly_rate);
                    (principal + interest, principal, interest)
                }
            }
        };

        balance -= principal;
        rows.push(MonthlyInstallment {
            date: due,
            payment,
            principal,
            interest,
            balance,
        });
    }

    Ok(rows)
}

/// Simple daily interest accrued between origination and the first scheduled
/// payment, at the rate active in the origination month. Zero when the first
/// payment does not postdate origination.
pub fn first_period_interest(loan: &DetailedLoan, rates: &RateSchedule) -> Money {
    let first_due = loan.repayment_start.date_on(loan.payment_day);
    let days = (first_due - loan.origination).num_days();
    if days <= 0 {
        return Decimal::ZERO;
    }
    let daily_rate = rates.rate_for(YearMonth::from_date(loan.origination)) / dec!(100) / DAYS_PER_YEAR;
    round_currency(loan.principal * daily_rate * Decimal::from(days))
}

/// Aggregate the month table into calendar-year totals for the requested
/// horizon. A year with no modeled months (a pre-repayment year) reports the
/// full principal as its balance. The first-period interest is folded into
/// the horizon's first year (pay upfront), the origination year (pay at
/// month end), or discarded.
pub fn yearly_totals(
    loan: &DetailedLoan,
    rates: &RateSchedule,
    start_year: i32,
    period_years: u32,
) -> RentSimResult<BTreeMap<i32, LoanYear>> {
    let rows = monthly_schedule(loan, rates)?;

    let first_interest = match loan.first_interest {
        FirstInterestPolicy::Ignore => Decimal::ZERO,
        _ => first_period_interest(loan, rates),
    };

    let mut years = BTreeMap::new();
    for year in start_year..start_year + period_years as i32 {
        let in_year: Vec<&MonthlyInstallment> =
            rows.iter().filter(|r| r.date.year() == year).collect();

        let principal: Money = in_year.iter().map(|r| r.principal).sum();
        let mut interest: Money = in_year.iter().map(|r| r.interest).sum();
        let mut payment: Money = in_year.iter().map(|r| r.payment).sum();

        let settles_here = match loan.first_interest {
            FirstInterestPolicy::PayUpfront => year == start_year,
            FirstInterestPolicy::PayAtMonthEnd => year == loan.origination.year(),
            FirstInterestPolicy::Ignore => false,
        };
        if settles_here {
            interest += first_interest;
            payment += first_interest;
        }

        let end_balance = in_year
            .last()
            .map(|r| r.balance)
            .unwrap_or(loan.principal);

        years.insert(
            year,
            LoanYear {
                principal,
                interest,
                payment,
                end_balance,
            },
        );
    }

    Ok(years)
}
