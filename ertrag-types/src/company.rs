use core::fmt;

use serde::{Deserialize, Serialize};

/// A listed company selectable for analysis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Company {
    /// Exchange ticker, e.g. `"SAP"`.
    pub symbol: String,
    /// Display name, e.g. `"SAP SE"`.
    pub name: String,
}

impl Company {
    /// Convenience constructor.
    #[must_use]
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}
