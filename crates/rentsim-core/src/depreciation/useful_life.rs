//! Statutory useful-life estimation for used buildings.
//!
//! A new building takes the statutory life for its structure type. A used
//! building takes the simplified remaining-life formula: remaining statutory
//! life plus 20% of the elapsed years, floored, never less than two years.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use chrono::NaiveDate;

use crate::error::RentSimError;
use crate::RentSimResult;

/// Building structure classification with its statutory life in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructureType {
    ReinforcedConcrete,
    HeavySteel,
    LightSteelThick,
    LightSteelThin,
    LightSteel,
    Wood,
}

impl StructureType {
    pub fn legal_life(self) -> u32 {
        match self {
            StructureType::ReinforcedConcrete => 47,
            StructureType::HeavySteel => 34,
            StructureType::LightSteelThick => 27,
            StructureType::LightSteelThin => 19,
            StructureType::LightSteel => 27,
            StructureType::Wood => 22,
        }
    }
}

impl FromStr for StructureType {
    type Err = RentSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reinforced-concrete" | "rc" => Ok(StructureType::ReinforcedConcrete),
            "heavy-steel" => Ok(StructureType::HeavySteel),
            "light-steel-thick" => Ok(StructureType::LightSteelThick),
            "light-steel-thin" => Ok(StructureType::LightSteelThin),
            "light-steel" => Ok(StructureType::LightSteel),
            "wood" => Ok(StructureType::Wood),
            other => Err(RentSimError::InvalidInput {
                field: "structure".into(),
                reason: format!("Unrecognized structure type: {other}"),
            }),
        }
    }
}

/// Which formula produced the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeBasis {
    /// Less than a full year elapsed: statutory life as-is.
    New,
    /// Simplified used-asset formula.
    UsedSimplified,
}

/// Estimates never drop below two years regardless of age.
pub const MINIMUM_LIFE_YEARS: u32 = 2;

/// Estimate the depreciable life of a building acquired on
/// `acquisition`, built on `construction`.
pub fn estimate_useful_life(
    construction: NaiveDate,
    acquisition: NaiveDate,
    structure: StructureType,
) -> RentSimResult<(u32, LifeBasis)> {
    if acquisition < construction {
        return Err(RentSimError::InvalidInput {
            field: "acquisition".into(),
            reason: "Acquisition date precedes construction date".into(),
        });
    }

    // Whole years only: leap days must not tip an exact anniversary into
    // the next year, so truncate before classifying.
    let elapsed_years = (acquisition - construction).num_days() / 365;

    if elapsed_years < 1 {
        return Ok((structure.legal_life(), LifeBasis::New));
    }

    let legal = Decimal::from(structure.legal_life());
    let elapsed = Decimal::from(elapsed_years);

    let estimate = if elapsed >= legal {
        // Fully past statutory life: 20% of it.
        legal * dec!(0.2)
    } else {
        (legal - elapsed) + elapsed * dec!(0.2)
    };

    let years = estimate
        .floor()
        .to_u32()
        .unwrap_or(MINIMUM_LIFE_YEARS)
        .max(MINIMUM_LIFE_YEARS);

    Ok((years, LifeBasis::UsedSimplified))
}
