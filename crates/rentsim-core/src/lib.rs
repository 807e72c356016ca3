//! Rental-property financial simulation: progressive tax, loan amortisation,
//! depreciation, and multi-year cash-flow projection, all on exact decimal
//! arithmetic. Domain areas are feature-gated; the default `full` feature
//! enables everything.

pub mod error;
pub mod types;

#[cfg(feature = "tax")]
pub mod tax;

#[cfg(feature = "loan")]
pub mod loan;

#[cfg(feature = "depreciation")]
pub mod depreciation;

#[cfg(feature = "projection")]
pub mod projection;

#[cfg(feature = "store")]
pub mod store;

pub use error::RentSimError;
pub use types::*;

/// Standard result type for all rentsim operations
pub type RentSimResult<T> = Result<T, RentSimError>;
