pub mod depreciation;
pub mod loan;
pub mod project;
pub mod tax;
