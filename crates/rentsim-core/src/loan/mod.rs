pub mod detailed;
pub mod schedule;
pub mod simple;

use serde::{Deserialize, Serialize};

/// Loan repayment scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepaymentMethod {
    /// Constant total payment per period; the principal/interest mix shifts
    /// over the term.
    EqualInstallment,
    /// Constant principal portion per period; the total payment declines as
    /// interest shrinks.
    EqualPrincipal,
}
