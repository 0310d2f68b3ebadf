// Shared fixtures so tests can `use helpers::*;`
#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use chrono::NaiveDate;
use ertrag::{EarningsConnector, EarningsRequest, EarningsResponse, ErtragError, YearRange};
use ertrag_mock::{FixedClock, MockConnector};

pub const SAP: &str = "SAP";
pub const BMW: &str = "BMW";

/// Date the mock considers "today" in these tests.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

pub fn years() -> YearRange {
    YearRange::new(2000, 2025)
}

/// Deterministic, instant mock.
pub fn mock(seed: u64) -> MockConnector {
    MockConnector::with_seed(seed)
        .with_clock(FixedClock(today()))
        .without_latency()
}

/// Forwards to `inner` and counts calls.
pub struct CountingConnector {
    name: &'static str,
    inner: Arc<dyn EarningsConnector>,
    count: Arc<AtomicUsize>,
}

impl CountingConnector {
    pub fn wrap(
        name: &'static str,
        inner: Arc<dyn EarningsConnector>,
    ) -> (Arc<Self>, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::new(Self {
            name,
            inner,
            count: count.clone(),
        });
        (c, count)
    }
}

#[async_trait::async_trait]
impl EarningsConnector for CountingConnector {
    fn name(&self) -> &'static str {
        self.name
    }
    fn vendor(&self) -> &'static str {
        "test"
    }
    async fn earnings(&self, req: &EarningsRequest) -> Result<EarningsResponse, ErtragError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.inner.earnings(req).await
    }
}

pub fn calls(count: &AtomicUsize) -> usize {
    count.load(Ordering::SeqCst)
}
