//! Depreciation of the building and its separable components, plus the
//! useful-life estimator for used assets.

pub mod useful_life;

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RentSimError;
use crate::types::Money;
use crate::RentSimResult;

/// Depreciation method for a single asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepreciationMethod {
    StraightLine,
    DecliningBalance,
}

/// One depreciable asset: the building itself, attached fixtures, or a
/// capital improvement, each with its own cost, life, and method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciableAsset {
    pub cost: Money,
    pub useful_life_years: u32,
    pub method: DepreciationMethod,
    pub salvage: Money,
}

impl DepreciableAsset {
    /// An asset with no cost or no life contributes nothing.
    pub fn is_empty(&self) -> bool {
        self.cost <= Decimal::ZERO || self.useful_life_years == 0
    }
}

/// Decay factor used by the declining-balance projection below.
const DECLINING_DECAY: Decimal = dec!(0.9);

/// The charge an asset contributes in year `year_offset` (0-based) of a
/// projection.
///
/// Straight line: `(cost - salvage) / life`, identical every projected year.
/// Declining balance: a double-rate first-year charge decaying 10% per year,
/// a forward-only approximation that needs no book-value state. Neither
/// variant tracks book value; exhaustion belongs to the register in
/// [`depreciation_schedule`].
pub fn projected_charge(asset: &DepreciableAsset, year_offset: u32) -> Money {
    if asset.is_empty() {
        return Decimal::ZERO;
    }

    let life = Decimal::from(asset.useful_life_years);
    match asset.method {
        DepreciationMethod::StraightLine => (asset.cost - asset.salvage) / life,
        DepreciationMethod::DecliningBalance => {
            let first_year = asset.cost * dec!(2) / life;
            first_year * DECLINING_DECAY.powi(year_offset as i64)
        }
    }
}

/// Combined charge of several components in one projection year.
pub fn component_depreciation(assets: &[DepreciableAsset], year_offset: u32) -> Money {
    assets
        .iter()
        .map(|asset| projected_charge(asset, year_offset))
        .sum()
}

/// One row of a book-value depreciation register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepreciationRecord {
    pub year: i32,
    pub opening: Money,
    pub charge: Money,
    pub closing: Money,
}

fn validate(asset: &DepreciableAsset) -> RentSimResult<()> {
    if asset.cost <= Decimal::ZERO {
        return Err(RentSimError::InvalidInput {
            field: "cost".into(),
            reason: "Asset cost must be positive".into(),
        });
    }
    if asset.useful_life_years == 0 {
        return Err(RentSimError::InvalidInput {
            field: "useful_life_years".into(),
            reason: "Useful life must be at least 1 year".into(),
        });
    }
    if asset.salvage < Decimal::ZERO || asset.salvage > asset.cost {
        return Err(RentSimError::InvalidInput {
            field: "salvage".into(),
            reason: "Salvage value must lie between zero and cost".into(),
        });
    }
    Ok(())
}

/// Year-by-year register tracking book value. The charge never takes the
/// closing value below salvage; once the asset is written down the charge
/// stays at zero for the rest of the horizon.
pub fn depreciation_schedule(
    asset: &DepreciableAsset,
    start_year: i32,
    years: u32,
) -> RentSimResult<Vec<DepreciationRecord>> {
    validate(asset)?;

    let life = Decimal::from(asset.useful_life_years);
    let straight_line_charge = (asset.cost - asset.salvage) / life;
    let declining_rate = dec!(2) / life;

    let mut opening = asset.cost;
    let mut records = Vec::with_capacity(years as usize);

    for year in start_year..start_year + years as i32 {
        let raw_charge = match asset.method {
            DepreciationMethod::StraightLine => straight_line_charge,
            DepreciationMethod::DecliningBalance => opening * declining_rate,
        };
        // Clip the final charge so book value lands exactly on salvage.
        let charge = raw_charge.min(opening - asset.salvage).max(Decimal::ZERO);
        let closing = opening - charge;

        records.push(DepreciationRecord {
            year,
            opening,
            charge,
            closing,
        });
        opening = closing;
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_line(cost: Decimal, life: u32) -> DepreciableAsset {
        DepreciableAsset {
            cost,
            useful_life_years: life,
            method: DepreciationMethod::StraightLine,
            salvage: Decimal::ZERO,
        }
    }

    #[test]
    fn test_straight_line_schedule_writes_down_to_zero() {
        let asset = straight_line(dec!(10_000_000), 10);
        let records = depreciation_schedule(&asset, 2026, 12).unwrap();

        assert_eq!(records.len(), 12);
        for record in &records[..10] {
            assert_eq!(record.charge, dec!(1_000_000));
        }
        assert_eq!(records[9].closing, Decimal::ZERO);
        // Fully written down: later years charge nothing.
        assert_eq!(records[10].charge, Decimal::ZERO);
        assert_eq!(records[11].closing, Decimal::ZERO);
    }

    #[test]
    fn test_straight_line_respects_salvage() {
        let asset = DepreciableAsset {
            cost: dec!(10_000_000),
            useful_life_years: 10,
            method: DepreciationMethod::StraightLine,
            salvage: dec!(1_000_000),
        };
        let records = depreciation_schedule(&asset, 2026, 10).unwrap();
        assert_eq!(records[0].charge, dec!(900_000));
        assert_eq!(records[9].closing, dec!(1_000_000));
    }

    #[test]
    fn test_declining_balance_register() {
        let asset = DepreciableAsset {
            cost: dec!(10_000_000),
            useful_life_years: 10,
            method: DepreciationMethod::DecliningBalance,
            salvage: Decimal::ZERO,
        };
        let records = depreciation_schedule(&asset, 2026, 3).unwrap();

        // 20% of opening book value each year.
        assert_eq!(records[0].charge, dec!(2_000_000));
        assert_eq!(records[0].closing, dec!(8_000_000));
        assert_eq!(records[1].charge, dec!(1_600_000));
        assert_eq!(records[2].charge, dec!(1_280_000));
    }

    #[test]
    fn test_projected_charge_straight_line_is_flat() {
        // The projector-side charge is stateless: it does not track book
        // value, so the figure repeats for every requested year.
        let asset = straight_line(dec!(20_000_000), 20);
        assert_eq!(projected_charge(&asset, 0), dec!(1_000_000));
        assert_eq!(projected_charge(&asset, 19), dec!(1_000_000));
        assert_eq!(projected_charge(&asset, 30), dec!(1_000_000));
    }

    #[test]
    fn test_projected_charge_declining_balance_decays() {
        let asset = DepreciableAsset {
            cost: dec!(10_000_000),
            useful_life_years: 10,
            method: DepreciationMethod::DecliningBalance,
            salvage: Decimal::ZERO,
        };
        // 2M first year, then a 10% geometric decay.
        assert_eq!(projected_charge(&asset, 0), dec!(2_000_000));
        assert_eq!(projected_charge(&asset, 1), dec!(1_800_000));
        assert_eq!(projected_charge(&asset, 2), dec!(1_620_000));
    }

    #[test]
    fn test_component_sum() {
        let components = [
            straight_line(dec!(20_000_000), 20),
            straight_line(dec!(3_000_000), 15),
            straight_line(dec!(1_500_000), 10),
        ];
        let total = component_depreciation(&components, 0);
        assert_eq!(total, dec!(1_350_000));
    }

    #[test]
    fn test_empty_asset_contributes_nothing() {
        let asset = straight_line(Decimal::ZERO, 20);
        assert!(asset.is_empty());
        assert_eq!(projected_charge(&asset, 0), Decimal::ZERO);
    }

    #[test]
    fn test_schedule_rejects_bad_inputs() {
        assert!(depreciation_schedule(&straight_line(Decimal::ZERO, 10), 2026, 5).is_err());
        assert!(depreciation_schedule(&straight_line(dec!(1_000), 0), 2026, 5).is_err());

        let bad_salvage = DepreciableAsset {
            cost: dec!(1_000),
            useful_life_years: 5,
            method: DepreciationMethod::StraightLine,
            salvage: dec!(2_000),
        };
        assert!(depreciation_schedule(&bad_salvage, 2026, 5).is_err());
    }
}
