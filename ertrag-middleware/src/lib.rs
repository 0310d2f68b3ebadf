//! ertrag-middleware
//!
//! Connector wrappers for ertrag: an explicit earnings cache with a staleness
//! window, the caching connector built on it, and a builder that layers
//! middleware around a raw connector.
#![warn(missing_docs)]

mod builder;
mod cache;

pub use crate::builder::ConnectorBuilder;
pub use crate::cache::{CacheMiddleware, CachingConnector, EarningsCache};
