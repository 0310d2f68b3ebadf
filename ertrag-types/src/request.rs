use serde::{Deserialize, Serialize};

use crate::EarningsEvent;

/// Earnings lookup for one company and one financial year.
///
/// Also serves as the cache key: two requests are the same entry iff symbol and
/// year are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EarningsRequest {
    /// Company ticker.
    pub symbol: String,
    /// Calendar year.
    pub year: i32,
}

impl EarningsRequest {
    /// Convenience constructor.
    #[must_use]
    pub fn new(symbol: impl Into<String>, year: i32) -> Self {
        Self {
            symbol: symbol.into(),
            year,
        }
    }

    /// Short human label, used in errors and logs.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("earnings for {} in {}", self.symbol, self.year)
    }
}

/// Earnings events returned by a connector, in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsResponse {
    /// Events ordered by report date.
    pub earnings: Vec<EarningsEvent>,
}

impl EarningsResponse {
    /// Wrap a list of events.
    #[must_use]
    pub const fn new(earnings: Vec<EarningsEvent>) -> Self {
        Self { earnings }
    }

    /// True when no events were produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.earnings.is_empty()
    }
}
