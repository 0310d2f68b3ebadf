use std::sync::Arc;

use async_trait::async_trait;
use ertrag_core::{
    CacheConfig, EarningsConnector, EarningsRequest, EarningsResponse, ErtragError, Middleware,
};
use moka::future::Cache;

/// Explicit `(symbol, year)` cache of earnings responses.
///
/// Entries expire after the configured staleness window. A zero window disables
/// the cache entirely: lookups always miss and inserts are dropped. Clones share
/// the same underlying store.
#[derive(Clone)]
pub struct EarningsCache {
    inner: Option<Cache<EarningsRequest, Arc<EarningsResponse>>>,
    cfg: CacheConfig,
}

impl EarningsCache {
    /// Build a cache from `cfg`.
    #[must_use]
    pub fn new(cfg: &CacheConfig) -> Self {
        let inner = cfg.ttl().map(|ttl| {
            Cache::builder()
                .max_capacity(cfg.max_entries.max(1))
                .time_to_live(ttl)
                .build()
        });
        Self {
            inner,
            cfg: cfg.clone(),
        }
    }

    /// A cache that never stores anything.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            inner: None,
            cfg: CacheConfig {
                ttl_ms: 0,
                ..CacheConfig::default()
            },
        }
    }

    /// False when the staleness window is zero.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Configuration this cache was built from.
    #[must_use]
    pub const fn config(&self) -> &CacheConfig {
        &self.cfg
    }

    /// Fresh entry for `req`, if any.
    pub async fn get(&self, req: &EarningsRequest) -> Option<EarningsResponse> {
        let store = self.inner.as_ref()?;
        let hit = store.get(req).await;
        #[cfg(feature = "tracing")]
        tracing::debug!(symbol = %req.symbol, year = req.year, hit = hit.is_some(), "earnings cache lookup");
        hit.map(|v| (*v).clone())
    }

    /// Store `resp` under `req`, replacing any previous entry.
    pub async fn insert(&self, req: EarningsRequest, resp: EarningsResponse) {
        if let Some(store) = &self.inner {
            store.insert(req, Arc::new(resp)).await;
        }
    }

    /// Drop the entry for `req`.
    pub async fn invalidate(&self, req: &EarningsRequest) {
        if let Some(store) = &self.inner {
            store.invalidate(req).await;
        }
    }

    /// Drop every entry.
    pub fn invalidate_all(&self) {
        if let Some(store) = &self.inner {
            store.invalidate_all();
        }
    }

    /// Number of live entries, after flushing pending maintenance.
    pub async fn entry_count(&self) -> u64 {
        match &self.inner {
            Some(store) => {
                store.run_pending_tasks().await;
                store.entry_count()
            }
            None => 0,
        }
    }
}

impl std::fmt::Debug for EarningsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EarningsCache")
            .field("enabled", &self.is_enabled())
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

/// Declarative wrapper that applies caching when building a connector stack.
pub struct CacheMiddleware {
    cfg: CacheConfig,
}

impl CacheMiddleware {
    /// Caching layer configured by `cfg`.
    #[must_use]
    pub const fn new(cfg: CacheConfig) -> Self {
        Self { cfg }
    }
}

impl Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn EarningsConnector>) -> Arc<dyn EarningsConnector> {
        let Self { cfg } = *self;
        Arc::new(CachingConnector::new(inner, &cfg))
    }

    fn name(&self) -> &'static str {
        CachingConnector::LAYER_NAME
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "ttl_ms": self.cfg.ttl_ms,
            "max_entries": self.cfg.max_entries,
        })
    }
}

/// Connector wrapper that answers repeated requests from an [`EarningsCache`].
///
/// Only successful responses are stored; errors always pass through.
pub struct CachingConnector {
    inner: Arc<dyn EarningsConnector>,
    cache: EarningsCache,
}

impl CachingConnector {
    /// Layer name used by [`CacheMiddleware`] and the builder.
    pub const LAYER_NAME: &'static str = "CachingMiddleware";

    /// Wrap `inner` with a fresh cache built from `cfg`.
    #[must_use]
    pub fn new(inner: Arc<dyn EarningsConnector>, cfg: &CacheConfig) -> Self {
        Self::with_cache(inner, EarningsCache::new(cfg))
    }

    /// Wrap `inner` with an existing, possibly shared, cache.
    #[must_use]
    pub const fn with_cache(inner: Arc<dyn EarningsConnector>, cache: EarningsCache) -> Self {
        Self { inner, cache }
    }

    /// The cache backing this wrapper.
    #[must_use]
    pub const fn cache(&self) -> &EarningsCache {
        &self.cache
    }
}

#[async_trait]
impl EarningsConnector for CachingConnector {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    async fn earnings(&self, req: &EarningsRequest) -> Result<EarningsResponse, ErtragError> {
        if let Some(hit) = self.cache.get(req).await {
            return Ok(hit);
        }
        let resp = self.inner.earnings(req).await?;
        self.cache.insert(req.clone(), resp.clone()).await;
        Ok(resp)
    }
}
