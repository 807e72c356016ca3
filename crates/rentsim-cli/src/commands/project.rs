use clap::Args;
use serde_json::Value;

use rentsim_core::projection::{project, SimulationParameters};

use crate::input;

/// Arguments for the cash-flow projection
#[derive(Args)]
pub struct ProjectArgs {
    /// Path to JSON input file with the simulation parameters
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params: SimulationParameters = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file (or piped JSON) is required for project".into());
    };

    let output = project(&params)?;
    Ok(serde_json::to_value(output)?)
}
