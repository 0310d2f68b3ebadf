//! Re-export of foundational types from `ertrag-types`.
// Consolidated re-exports so downstream crates can depend on `ertrag-core` only

pub use ertrag_types::{
    CacheConfig, Company, ConnectorKey, EarningsEvent, EarningsRequest, EarningsResponse,
    ErtragConfig, ErtragError, PRICE_SCALE, ReportType, Sentiment, YearRange, percent_change,
    round_price,
};

pub use chrono::NaiveDate;
pub use rust_decimal::{Decimal, RoundingStrategy};
