//! Simple-mode loan figures: a single annual payment amount derived either
//! from the closed-form annuity formula (equal installment) or from the
//! first twelve months of a declining-balance walk (equal principal).
//!
//! Non-positive principal or term yields zero rather than an error; callers
//! treat "no loan" as a valid configuration.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use super::RepaymentMethod;
use crate::types::{Money, Rate};

/// Equal-installment monthly payment on monthly compounding:
/// `P * r * (1+r)^n / ((1+r)^n - 1)` with `r` the monthly rate and `n` the
/// number of months. At 0% the principal is split evenly.
pub fn monthly_payment_equal_installment(
    principal: Money,
    annual_rate_pct: Rate,
    term_years: u32,
) -> Money {
    if principal <= Decimal::ZERO || term_years == 0 {
        return Decimal::ZERO;
    }

    let months = term_years * 12;
    if annual_rate_pct.is_zero() {
        return principal / Decimal::from(months);
    }

    let monthly_rate = annual_rate_pct / dec!(100) / dec!(12);
    let compound = (Decimal::ONE + monthly_rate).powi(months as i64);

    principal * monthly_rate * compound / (compound - Decimal::ONE)
}

/// Equal-installment annual payment: monthly payment x 12.
pub fn annual_payment_equal_installment(
    principal: Money,
    annual_rate_pct: Rate,
    term_years: u32,
) -> Money {
    monthly_payment_equal_installment(principal, annual_rate_pct, term_years) * dec!(12)
}

/// First-year annual payment under equal-principal repayment. Interest is
/// recomputed each month against the declining balance, so only the first
/// twelve months are walked; later years fall as the balance does, which
/// simple mode does not track.
pub fn first_year_payment_equal_principal(
    principal: Money,
    annual_rate_pct: Rate,
    term_years: u32,
) -> Money {
    if principal <= Decimal::ZERO || term_years == 0 {
        return Decimal::ZERO;
    }

    let months = Decimal::from(term_years * 12);
    let monthly_principal = principal / months;
    let monthly_rate = annual_rate_pct / dec!(100) / dec!(12);

    let mut remaining = principal;
    let mut total = Decimal::ZERO;
    for _ in 0..12 {
        total += monthly_principal + remaining * monthly_rate;
        remaining -= monthly_principal;
    }

    total
}

/// Initial-year annual payment for the given repayment method.
pub fn annual_payment(
    principal: Money,
    annual_rate_pct: Rate,
    term_years: u32,
    method: RepaymentMethod,
) -> Money {
    match method {
        RepaymentMethod::EqualInstallment => {
            annual_payment_equal_installment(principal, annual_rate_pct, term_years)
        }
        RepaymentMethod::EqualPrincipal => {
            first_year_payment_equal_principal(principal, annual_rate_pct, term_years)
        }
    }
}
