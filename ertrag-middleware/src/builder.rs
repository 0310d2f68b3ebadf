//! Builder for composing connectors with middleware layers.
//!
//! Layers are stored outermost-first: the last layer added receives requests
//! first. `build()` applies them in reverse so that `layers[0]` ends up wrapping
//! everything else.

use std::sync::Arc;

use ertrag_core::{CacheConfig, EarningsConnector, Middleware};

use crate::cache::{CacheMiddleware, CachingConnector};

/// Generic middleware builder for composing a connector with layered wrappers.
pub struct ConnectorBuilder {
    raw: Arc<dyn EarningsConnector>,
    layers: Vec<Box<dyn Middleware>>,
}

impl ConnectorBuilder {
    /// Create a new builder from a raw, unwrapped connector.
    #[must_use]
    pub fn new(raw: Arc<dyn EarningsConnector>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace the caching layer.
    ///
    /// A zero TTL in `cfg` still installs the layer, but it never stores anything.
    #[must_use]
    pub fn with_cache(mut self, cfg: &CacheConfig) -> Self {
        self.layers.retain(|m| m.name() != CachingConnector::LAYER_NAME);
        self.layers
            .insert(0, Box::new(CacheMiddleware::new(cfg.clone())));
        self
    }

    /// Remove the caching layer if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != CachingConnector::LAYER_NAME);
        self
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Names and configuration of the current layers, outermost first, followed
    /// by the raw connector.
    #[must_use]
    pub fn describe(&self) -> Vec<(String, serde_json::Value)> {
        let mut out: Vec<(String, serde_json::Value)> = self
            .layers
            .iter()
            .map(|l| (l.name().to_string(), l.config_json()))
            .collect();
        out.push((
            "RawConnector".to_string(),
            serde_json::json!({ "name": self.raw.name() }),
        ));
        out
    }

    /// Build the wrapped connector.
    #[must_use]
    pub fn build(self) -> Arc<dyn EarningsConnector> {
        let mut acc: Arc<dyn EarningsConnector> = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }
}
