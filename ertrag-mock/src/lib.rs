//! Mock ertrag connectors.
//!
//! - [`MockConnector`] serves synthetic earnings from [`generate`], with an injectable
//!   RNG seed, clock and simulated network latency.
//! - [`DynamicMockConnector`] defers every call to a test-side controller.
#![warn(missing_docs)]

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use ertrag_core::{EarningsConnector, EarningsRequest, EarningsResponse, ErtragError};
use rand::SeedableRng;
use rand::rngs::StdRng;

mod clock;
mod dynamic;
mod generator;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};
pub use generator::{MAX_DAY_OFFSET, QUARTER_ANCHORS, base_price, generate, generate_now};

/// Mock connector backed by the synthetic earnings generator.
///
/// Two symbols are reserved to exercise failure paths: `FAIL` rejects the fetch and
/// `TIMEOUT` stalls long enough for any sensible provider timeout to fire.
pub struct MockConnector {
    rng: Mutex<StdRng>,
    clock: Arc<dyn Clock>,
    latency: Duration,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Connector name reported to the orchestrator.
    pub const NAME: &'static str = "ertrag-mock";

    /// Simulated round trip of a fetch.
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

    /// How long a `TIMEOUT` fetch stalls.
    pub const STALL: Duration = Duration::from_secs(60);

    /// Entropy-seeded RNG, system clock and the default latency.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Deterministic RNG: the same seed and clock yield the same sequence of responses.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            clock: Arc::new(SystemClock),
            latency: Self::DEFAULT_LATENCY,
        }
    }

    /// Replace the clock that decides which reports are already published.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Set the simulated latency.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Answer immediately.
    #[must_use]
    pub const fn without_latency(self) -> Self {
        self.with_latency(Duration::ZERO)
    }

    async fn maybe_fail_or_timeout(symbol: &str) -> Result<(), ErtragError> {
        match symbol {
            "FAIL" => Err(ErtragError::connector(
                Self::NAME,
                "forced failure: earnings",
            )),
            "TIMEOUT" => {
                tokio::time::sleep(Self::STALL).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl EarningsConnector for MockConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "ertrag_mock::earnings",
            skip(self),
            fields(symbol = %req.symbol, year = req.year),
        )
    )]
    async fn earnings(&self, req: &EarningsRequest) -> Result<EarningsResponse, ErtragError> {
        Self::maybe_fail_or_timeout(&req.symbol).await?;
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let today = self.clock.today();
        let earnings = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            generate(&mut *rng, &req.symbol, req.year, today)
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(count = earnings.len(), %today, "generated earnings");
        Ok(EarningsResponse::new(earnings))
    }
}
