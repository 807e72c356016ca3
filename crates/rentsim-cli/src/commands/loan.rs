use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use rentsim_core::loan::detailed::{self, DetailedLoan};
use rentsim_core::loan::schedule::RateSchedule;
use rentsim_core::loan::{simple, RepaymentMethod};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MethodArg {
    EqualInstallment,
    EqualPrincipal,
}

impl From<MethodArg> for RepaymentMethod {
    fn from(m: MethodArg) -> Self {
        match m {
            MethodArg::EqualInstallment => RepaymentMethod::EqualInstallment,
            MethodArg::EqualPrincipal => RepaymentMethod::EqualPrincipal,
        }
    }
}

/// Arguments for the simple-mode annual payment figure
#[derive(Args)]
pub struct LoanPaymentArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate as a percentage (2.0 = 2.0%)
    #[arg(long)]
    pub annual_rate: Decimal,

    /// Repayment term in years
    #[arg(long)]
    pub term_years: u32,

    /// Repayment method
    #[arg(long, default_value = "equal-installment")]
    pub method: MethodArg,
}

/// Arguments for the detailed amortisation schedule
#[derive(Args)]
pub struct LoanScheduleArgs {
    /// Path to JSON input file describing the loan and rate schedule
    #[arg(long)]
    pub input: Option<String>,

    /// Aggregate into calendar years starting here instead of listing months
    #[arg(long)]
    pub start_year: Option<i32>,

    /// Number of years to aggregate (requires --start-year)
    #[arg(long)]
    pub period_years: Option<u32>,
}

#[derive(Deserialize)]
struct LoanScheduleRequest {
    loan: DetailedLoan,
    rates: RateSchedule,
}

pub fn run_loan_payment(args: LoanPaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let method: RepaymentMethod = args.method.into();
    let annual = simple::annual_payment(args.principal, args.annual_rate, args.term_years, method);
    let monthly = match method {
        RepaymentMethod::EqualInstallment => Some(simple::monthly_payment_equal_installment(
            args.principal,
            args.annual_rate,
            args.term_years,
        )),
        RepaymentMethod::EqualPrincipal => None,
    };

    Ok(json!({
        "result": {
            "annual_payment": annual.round_dp(2).to_string(),
            "monthly_payment": monthly.map(|m| m.round_dp(2).to_string()),
        }
    }))
}

pub fn run_loan_schedule(args: LoanScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: LoanScheduleRequest = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file (or piped JSON) is required for loan-schedule".into());
    };

    match (args.start_year, args.period_years) {
        (Some(start_year), Some(period_years)) => {
            let totals =
                detailed::yearly_totals(&request.loan, &request.rates, start_year, period_years)?;
            let rows: Vec<Value> = totals
                .iter()
                .map(|(year, ly)| {
                    json!({
                        "year": year,
                        "principal": ly.principal.to_string(),
                        "interest": ly.interest.to_string(),
                        "payment": ly.payment.to_string(),
                        "end_balance": ly.end_balance.to_string(),
                    })
                })
                .collect();
            Ok(Value::Array(rows))
        }
        (None, None) => {
            let rows = detailed::monthly_schedule(&request.loan, &request.rates)?;
            Ok(serde_json::to_value(rows)?)
        }
        _ => Err("--start-year and --period-years must be given together".into()),
    }
}
