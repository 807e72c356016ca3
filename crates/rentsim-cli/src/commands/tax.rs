use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use rentsim_core::tax;

use crate::input;

/// Arguments for the progressive tax calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct TaxArgs {
    /// Taxable income for the year
    #[arg(long)]
    pub taxable_income: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Deserialize)]
struct TaxRequest {
    taxable_income: Decimal,
}

pub fn run_tax(args: TaxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: TaxRequest = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        TaxRequest {
            taxable_income: args
                .taxable_income
                .ok_or("--taxable-income is required (or provide --input)")?,
        }
    };

    let total_tax = tax::progressive_tax(request.taxable_income);
    let effective = tax::effective_rate(request.taxable_income);

    Ok(json!({
        "result": {
            "taxable_income": request.taxable_income.to_string(),
            "total_tax": total_tax.to_string(),
            "effective_rate_pct": effective.round_dp(2).to_string(),
        }
    }))
}
