//! Year-by-year cash-flow projection for a rental property: income, operating
//! costs, loan service, depreciation, tax, and after-everything cash flow.

pub mod engine;

pub use engine::project;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::depreciation::DepreciableAsset;
use crate::loan::detailed::DetailedLoan;
use crate::loan::schedule::RateSchedule;
use crate::loan::{simple, RepaymentMethod};
use crate::types::{Money, Rate};

/// Whether the simulation is tied to a concrete property record or entered
/// free-standing. A classification label only: it travels through the
/// assumptions envelope and stored rows for external editors, and the engine
/// computes both kinds identically (the rent roll carries the per-room vs
/// annual distinction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationKind {
    PropertyBased,
    Standalone,
}

/// Gross rent, either as an annual figure or as per-room monthly rents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RentRoll {
    Annual(Money),
    MonthlyRooms(Vec<Money>),
}

impl RentRoll {
    /// Full-occupancy annual rent.
    pub fn annual(&self) -> Money {
        match self {
            RentRoll::Annual(amount) => *amount,
            RentRoll::MonthlyRooms(rooms) => {
                rooms.iter().copied().sum::<Money>() * Decimal::from(12)
            }
        }
    }
}

/// Debt service model for the projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LoanSpec {
    /// No borrowing.
    None,
    /// Flat annual payment against a balance at a single rate. Interest is
    /// recomputed yearly; the principal portion is whatever remains of the
    /// payment.
    Simple {
        balance: Money,
        annual_rate_pct: Rate,
        annual_payment: Money,
    },
    /// Full month-by-month amortisation.
    Detailed {
        loan: DetailedLoan,
        rates: RateSchedule,
    },
}

impl LoanSpec {
    /// Build a simple spec from loan terms, deriving the annual payment for
    /// the chosen repayment method.
    pub fn simple_from_terms(
        principal: Money,
        annual_rate_pct: Rate,
        term_years: u32,
        method: RepaymentMethod,
    ) -> Self {
        LoanSpec::Simple {
            balance: principal,
            annual_rate_pct,
            annual_payment: simple::annual_payment(principal, annual_rate_pct, term_years, method),
        }
    }
}

/// Everything the projection needs for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub kind: SimulationKind,
    pub start_year: i32,
    pub period_years: u32,
    /// Expected occupancy as a percentage of full rent.
    pub occupancy_pct: Rate,
    /// Management fee as a percentage of collected rent.
    pub management_fee_pct: Rate,
    /// Repair reserve as a percentage of collected rent.
    pub repair_reserve_pct: Rate,
    pub property_tax: Money,
    pub insurance: Money,
    pub other_income: Money,
    pub other_expenses: Money,
    /// Taxable income from outside the property, stacked under the property
    /// result when the progressive table applies.
    pub other_taxable_income: Money,
    /// Overrides the progressive table with a flat rate when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_tax_rate_pct: Option<Rate>,
    pub rent_roll: RentRoll,
    pub loan: LoanSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building: Option<DepreciableAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixtures: Option<DepreciableAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvements: Option<DepreciableAsset>,
    /// Flat annual charge used when no component assets are configured.
    pub manual_depreciation: Money,
}

impl SimulationParameters {
    /// The configured depreciable components, skipping absent ones.
    pub fn components(&self) -> Vec<DepreciableAsset> {
        [
            self.building.clone(),
            self.fixtures.clone(),
            self.improvements.clone(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// One projected year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyResult {
    pub year: i32,
    pub rent_income: Money,
    pub other_income: Money,
    pub total_income: Money,
    pub management_fee: Money,
    pub repair_cost: Money,
    pub property_tax: Money,
    pub insurance: Money,
    pub interest: Money,
    pub depreciation: Money,
    pub other_expenses: Money,
    pub total_expenses: Money,
    pub taxable_income: Money,
    pub tax: Money,
    /// Income less cash expenses, tax, and principal repayment. Depreciation
    /// is added back since it is not a cash outflow.
    pub cash_flow: Money,
    pub loan_balance: Money,
}
