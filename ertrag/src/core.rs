use std::sync::Arc;
use std::time::Duration;

use ertrag_core::{
    CacheConfig, Company, ConnectorKey, EarningsConnector, EarningsRequest, EarningsResponse, ErtragConfig,
    ErtragError, YearRange,
};
use ertrag_middleware::EarningsCache;

use crate::session::EarningsSession;

/// Capability label used in timeout errors and logs.
pub const CAPABILITY: &str = "earnings";

/// Orchestrator that serves earnings lookups from a cache and a list of providers.
pub struct Ertrag {
    pub(crate) connectors: Vec<Arc<dyn EarningsConnector>>,
    pub(crate) cfg: ErtragConfig,
    pub(crate) cache: EarningsCache,
}

/// Builder for constructing an `Ertrag` orchestrator with custom configuration.
pub struct ErtragBuilder {
    connectors: Vec<Arc<dyn EarningsConnector>>,
    cfg: ErtragConfig,
}

impl Default for ErtragBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ErtragBuilder {
    /// Create a new builder with the default configuration.
    ///
    /// Defaults: no connectors, years `2000..=current year`, a five-minute cache
    /// and a 5s provider timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: ErtragConfig::default(),
        }
    }

    /// Register a provider connector.
    ///
    /// Providers are tried in registration order until one succeeds. Duplicates
    /// are not deduplicated.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn EarningsConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the cache configuration. A zero TTL disables caching.
    #[must_use]
    pub fn cache(mut self, cfg: CacheConfig) -> Self {
        self.cfg.cache = Some(cfg);
        self
    }

    /// Disable the orchestrator-owned cache.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.cfg.cache = None;
        self
    }

    /// Set the per-provider request timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Restrict the years callers may request.
    #[must_use]
    pub const fn years(mut self, years: YearRange) -> Self {
        self.cfg.years = years;
        self
    }

    /// Build the `Ertrag` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered via [`with_connector`]
    /// or the year range is empty.
    ///
    /// [`with_connector`]: Self::with_connector
    pub fn build(self) -> Result<Ertrag, ErtragError> {
        if self.connectors.is_empty() {
            return Err(ErtragError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        let years = self.cfg.years;
        if years.min > years.max {
            return Err(ErtragError::invalid_arg(format!(
                "empty year range {}..={}",
                years.min, years.max
            )));
        }
        let cache = self
            .cfg
            .cache
            .as_ref()
            .map_or_else(EarningsCache::disabled, EarningsCache::new);
        Ok(Ertrag {
            connectors: self.connectors,
            cfg: self.cfg,
            cache,
        })
    }
}

/// Attach the connector name to errors that do not already carry provenance.
pub fn tag_err(connector: &str, e: ErtragError) -> ErtragError {
    match e {
        e @ (ErtragError::NotFound { .. }
        | ErtragError::ProviderTimeout { .. }
        | ErtragError::Connector { .. }
        | ErtragError::AllProvidersTimedOut { .. }
        | ErtragError::AllProvidersFailed(_)) => e,
        other => ErtragError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Collapse per-provider failures into one error.
///
/// Nested `AllProvidersFailed` lists are flattened first. All timeouts become `AllProvidersTimedOut`, all not-found become a single
/// `NotFound { what }`, anything else is returned as `AllProvidersFailed`.
#[must_use]
pub fn collapse_errors(errors: Vec<ErtragError>, not_found_what: &str) -> ErtragError {
    let errors: Vec<ErtragError> = errors.into_iter().flat_map(ErtragError::flatten).collect();
    if !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, ErtragError::ProviderTimeout { .. }))
    {
        return ErtragError::AllProvidersTimedOut {
            capability: CAPABILITY.to_string(),
        };
    }
    if !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, ErtragError::NotFound { .. }))
    {
        return ErtragError::not_found(not_found_what);
    }
    ErtragError::AllProvidersFailed(errors)
}

impl Ertrag {
    /// Start building a new `Ertrag` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use ertrag::Ertrag;
    /// use ertrag_mock::MockConnector;
    ///
    /// let ertrag = Ertrag::builder()
    ///     .with_connector(Arc::new(MockConnector::new()))
    ///     .provider_timeout(std::time::Duration::from_secs(3))
    ///     .build()?;
    /// let resp = ertrag.earnings("SAP", 2023).await?;
    /// ```
    #[must_use]
    pub fn builder() -> ErtragBuilder {
        ErtragBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ErtragConfig {
        &self.cfg
    }

    /// The orchestrator-owned earnings cache.
    #[must_use]
    pub const fn cache(&self) -> &EarningsCache {
        &self.cache
    }

    /// Keys of the registered connectors, in fallback order.
    #[must_use]
    pub fn connector_keys(&self) -> Vec<ConnectorKey> {
        self.connectors.iter().map(|c| c.key()).collect()
    }

    fn validate(&self, req: &EarningsRequest) -> Result<(), ErtragError> {
        if req.symbol.trim().is_empty() {
            return Err(ErtragError::invalid_arg("symbol must not be empty"));
        }
        let years = self.cfg.years;
        if !years.contains(req.year) {
            return Err(ErtragError::invalid_arg(format!(
                "year {} outside {}..={}",
                req.year, years.min, years.max
            )));
        }
        Ok(())
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "ertrag::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, ErtragError>
    where
        Fut: core::future::Future<Output = Result<T, ErtragError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(ErtragError::provider_timeout(connector_name, CAPABILITY)))
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "ertrag::core::fetch_with_fallback",
            skip(self),
            fields(symbol = %req.symbol, year = req.year),
        )
    )]
    async fn fetch_with_fallback(
        &self,
        req: &EarningsRequest,
    ) -> Result<EarningsResponse, ErtragError> {
        let mut errors: Vec<ErtragError> = Vec::new();
        for c in &self.connectors {
            let key = c.key();
            match Self::provider_call_with_timeout(
                key.as_str(),
                self.cfg.provider_timeout,
                c.earnings(req),
            )
            .await
            {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(connector = key.as_str(), error = %e, "provider failed; trying next");
                    errors.push(tag_err(key.as_str(), e));
                }
            }
        }
        Err(collapse_errors(errors, &req.describe()))
    }

    /// Earnings events of `symbol` for `year`.
    ///
    /// Served from the cache while the entry is fresh; otherwise providers are
    /// tried in order and the first success is cached.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty symbol or a year outside the configured
    /// range, and the collapsed provider error when every provider fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "ertrag::earnings", skip(self))
    )]
    pub async fn earnings(&self, symbol: &str, year: i32) -> Result<EarningsResponse, ErtragError> {
        let req = EarningsRequest::new(symbol, year);
        self.validate(&req)?;
        if let Some(hit) = self.cache.get(&req).await {
            return Ok(hit);
        }
        let resp = self.fetch_with_fallback(&req).await?;
        self.cache.insert(req, resp.clone()).await;
        Ok(resp)
    }

    /// Drop any cached entry for `symbol`/`year` and fetch again.
    ///
    /// # Errors
    /// Same as [`earnings`](Self::earnings).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "ertrag::refetch", skip(self))
    )]
    pub async fn refetch(&self, symbol: &str, year: i32) -> Result<EarningsResponse, ErtragError> {
        let req = EarningsRequest::new(symbol, year);
        self.validate(&req)?;
        self.cache.invalidate(&req).await;
        let resp = self.fetch_with_fallback(&req).await?;
        self.cache.insert(req, resp.clone()).await;
        Ok(resp)
    }

    /// Fetch several `(symbol, year)` pairs concurrently.
    ///
    /// Returns `(successes, failures)`, each paired with its request. A failing
    /// request never fails the batch.
    pub async fn earnings_batch(
        &self,
        reqs: &[EarningsRequest],
    ) -> (
        Vec<(EarningsRequest, EarningsResponse)>,
        Vec<(EarningsRequest, ErtragError)>,
    ) {
        if reqs.is_empty() {
            return (vec![], vec![]);
        }

        let tasks = reqs.iter().map(|req| async move {
            let res = self.earnings(&req.symbol, req.year).await;
            (req.clone(), res)
        });
        let results = futures::future::join_all(tasks).await;

        let mut ok: Vec<(EarningsRequest, EarningsResponse)> = Vec::new();
        let mut failures: Vec<(EarningsRequest, ErtragError)> = Vec::new();
        for (req, res) in results {
            match res {
                Ok(resp) => ok.push((req, resp)),
                Err(e) => failures.push((req, e)),
            }
        }
        (ok, failures)
    }

    /// Open an analysis session for `company` in `year` and load it.
    pub async fn analyze(&self, company: &Company, year: i32) -> EarningsSession<'_> {
        let mut session = EarningsSession::new(self, company.clone(), year);
        session.load().await;
        session
    }
}
