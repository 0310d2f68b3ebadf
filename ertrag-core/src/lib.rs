//! ertrag-core
//!
//! Core traits and pure helpers shared across the ertrag ecosystem.
//!
//! - `types`: the data model re-exported from `ertrag-types`.
//! - `connector`: the `EarningsConnector` trait every data source implements.
//! - `middleware`: the `Middleware` trait used to wrap connectors.
//! - `analytics`: price-change derivations over a single `EarningsEvent`.
//! - `companies`: the fixed DAX 40 registry offered for selection.
//! - `export`, `table`, `chart`: view models consumed by a UI (CSV text, table
//!   rows, bar-chart series).
//!
//! Async runtime
//! -------------
//! Connectors are `async-trait` objects and are expected to run under a Tokio 1.x
//! runtime; everything else in this crate is synchronous.
#![warn(missing_docs)]

/// Price-change derivations over a single earnings event.
pub mod analytics;
/// Bar-chart series built from a list of events.
pub mod chart;
/// Fixed registry of selectable companies.
pub mod companies;
/// Connector trait implemented by earnings data sources.
pub mod connector;
/// CSV export of earnings events.
pub mod export;
/// Middleware trait implemented by connector wrappers.
pub mod middleware;
/// Formatted table rows for display.
pub mod table;
pub mod types;

pub use connector::EarningsConnector;
pub use middleware::Middleware;
pub use types::*;
