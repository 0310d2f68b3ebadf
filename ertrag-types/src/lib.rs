//! Ertrag data model, error type and configuration primitives shared by every crate in the workspace.
#![warn(missing_docs)]

mod company;
mod config;
mod connector;
mod error;
mod event;
mod request;

pub use company::Company;
pub use config::{CacheConfig, ErtragConfig, YearRange};
pub use connector::ConnectorKey;
pub use error::ErtragError;
pub use event::{EarningsEvent, PRICE_SCALE, ReportType, Sentiment, percent_change, round_price};
pub use request::{EarningsRequest, EarningsResponse};
