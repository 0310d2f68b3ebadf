//! Ertrag analyzes how a company's share price reacted on its earnings days.
//!
//! Overview
//! - Fetches the earnings reports of a company for a financial year from one or
//!   more connectors implementing `ertrag_core::EarningsConnector`.
//! - Tries providers in registration order with a per-provider timeout and
//!   normalizes failures into one `ErtragError`.
//! - Keeps an explicit `(symbol, year)` cache with a five-minute staleness window;
//!   `refetch` bypasses it.
//! - `EarningsSession` models the loading/failed/empty/loaded lifecycle and
//!   produces the table rows, bar charts and CSV export for a loaded year.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use ertrag::{Ertrag, companies};
//! use ertrag_mock::MockConnector;
//!
//! let ertrag = Ertrag::builder()
//!     .with_connector(Arc::new(MockConnector::new()))
//!     .build()?;
//!
//! let sap = companies::by_symbol("SAP").unwrap();
//! let session = ertrag.analyze(&sap, 2023).await;
//! for row in session.table() {
//!     println!("{} {} {}", row.report_date, row.report_type, row.price_change);
//! }
//! if let Some(export) = session.export_csv()? {
//!     std::fs::write(&export.file_name, export.content)?;
//! }
//! ```
//!
//! See `ertrag/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
pub mod session;

pub use crate::core::{CAPABILITY, Ertrag, ErtragBuilder, collapse_errors, tag_err};
pub use session::{EarningsSession, SessionState};

pub use ertrag_middleware::{CacheMiddleware, CachingConnector, ConnectorBuilder, EarningsCache};

// Re-export core types for convenience
pub use ertrag_core::{
    CacheConfig, Company, ConnectorKey, EarningsConnector, EarningsEvent, EarningsRequest,
    EarningsResponse, ErtragConfig, ErtragError, Middleware, ReportType, Sentiment, YearRange,
    analytics, chart, companies, export, table,
};
