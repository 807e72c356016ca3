use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RentSimError;
use crate::types::{Rate, YearMonth};
use crate::RentSimResult;

/// One entry of a piecewise interest-rate schedule. A window with no `to`
/// runs to the end of the term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateWindow {
    pub from: YearMonth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<YearMonth>,
    /// Annual rate as a percentage (2.5 = 2.5%).
    pub annual_rate_pct: Rate,
}

impl RateWindow {
    fn contains(&self, month: YearMonth) -> bool {
        match self.to {
            Some(to) => self.from <= month && month <= to,
            None => self.from <= month,
        }
    }
}

/// An ordered list of rate windows, matched in list order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateSchedule {
    pub windows: Vec<RateWindow>,
}

impl RateSchedule {
    pub fn new(windows: Vec<RateWindow>) -> Self {
        RateSchedule { windows }
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// The rate active in `month`: the first window containing it wins.
    /// A month outside every window takes the named fallback.
    pub fn rate_for(&self, month: YearMonth) -> Rate {
        self.windows
            .iter()
            .find(|w| w.contains(month))
            .map(|w| w.annual_rate_pct)
            .unwrap_or_else(|| self.fallback_rate())
    }

    /// Fallback for unmatched months: the earliest (first-listed) entry's
    /// rate, or zero when the schedule has no entries at all.
    fn fallback_rate(&self) -> Rate {
        self.windows
            .first()
            .map(|w| w.annual_rate_pct)
            .unwrap_or(Decimal::ZERO)
    }

    /// Reject windows that end before they start.
    pub fn validate(&self) -> RentSimResult<()> {
        for (i, w) in self.windows.iter().enumerate() {
            if let Some(to) = w.to {
                if to < w.from {
                    return Err(RentSimError::InvalidInput {
                        field: format!("windows[{i}]"),
                        reason: format!("window ends {to} before it starts {}", w.from),
                    });
                }
            }
        }
        Ok(())
    }
}
