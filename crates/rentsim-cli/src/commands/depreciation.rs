use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use rentsim_core::depreciation::useful_life::{estimate_useful_life, LifeBasis, StructureType};
use rentsim_core::depreciation::{depreciation_schedule, DepreciableAsset, DepreciationMethod};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DepreciationMethodArg {
    StraightLine,
    DecliningBalance,
}

impl From<DepreciationMethodArg> for DepreciationMethod {
    fn from(m: DepreciationMethodArg) -> Self {
        match m {
            DepreciationMethodArg::StraightLine => DepreciationMethod::StraightLine,
            DepreciationMethodArg::DecliningBalance => DepreciationMethod::DecliningBalance,
        }
    }
}

/// Arguments for the year-by-year depreciation register
#[derive(Args)]
pub struct DepreciationArgs {
    /// Acquisition cost of the asset
    #[arg(long)]
    pub cost: Decimal,

    /// Depreciable life in years
    #[arg(long)]
    pub useful_life: u32,

    /// Depreciation method
    #[arg(long, default_value = "straight-line")]
    pub method: DepreciationMethodArg,

    /// Salvage value retained at the end of the life
    #[arg(long, default_value = "0")]
    pub salvage: Decimal,

    /// First year of the register
    #[arg(long)]
    pub start_year: i32,

    /// Number of years to tabulate (defaults to the useful life)
    #[arg(long)]
    pub years: Option<u32>,
}

/// Arguments for the useful-life estimate
#[derive(Args)]
pub struct UsefulLifeArgs {
    /// Construction (completion) date, e.g. 2016-03-01
    #[arg(long)]
    pub construction: NaiveDate,

    /// Acquisition date, e.g. 2026-01-10
    #[arg(long)]
    pub acquisition: NaiveDate,

    /// Building structure: rc, heavy-steel, light-steel, light-steel-thick,
    /// light-steel-thin, or wood
    #[arg(long)]
    pub structure: StructureType,
}

pub fn run_depreciation(args: DepreciationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let asset = DepreciableAsset {
        cost: args.cost,
        useful_life_years: args.useful_life,
        method: args.method.into(),
        salvage: args.salvage,
    };
    let years = args.years.unwrap_or(args.useful_life);
    let records = depreciation_schedule(&asset, args.start_year, years)?;
    Ok(serde_json::to_value(records)?)
}

pub fn run_useful_life(args: UsefulLifeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (years, basis) = estimate_useful_life(args.construction, args.acquisition, args.structure)?;

    Ok(json!({
        "result": {
            "useful_life_years": years,
            "basis": match basis {
                LifeBasis::New => "new",
                LifeBasis::UsedSimplified => "used-simplified",
            },
            "legal_life_years": args.structure.legal_life(),
        }
    }))
}
