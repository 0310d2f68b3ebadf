use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ertrag_core::{
    EarningsConnector, EarningsEvent, EarningsRequest, EarningsResponse, ErtragError,
};

/// Instruction for how a call should behave for a given request.
#[derive(Clone)]
pub enum MockBehavior {
    /// Return the provided events immediately.
    Return(Vec<EarningsEvent>),
    /// Fail immediately with the provided error.
    Fail(ErtragError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<EarningsRequest, MockBehavior>,
    fallback: Option<MockBehavior>,
    calls: Vec<EarningsRequest>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for one `(symbol, year)` request.
    pub async fn set_behavior(&self, req: EarningsRequest, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(req, behavior);
    }

    /// Set the behavior for requests without a specific rule.
    pub async fn set_fallback_behavior(&self, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.fallback = Some(behavior);
    }

    /// Requests received so far, in arrival order.
    pub async fn calls(&self) -> Vec<EarningsRequest> {
        let guard = self.state.lock().await;
        guard.calls.clone()
    }

    /// Number of requests received so far.
    pub async fn call_count(&self) -> usize {
        let guard = self.state.lock().await;
        guard.calls.len()
    }

    /// Clear all configured behaviors and the call log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.fallback = None;
        guard.calls.clear();
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Requests without a rule and without a fallback fail with `NotFound`.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a connector named `name` together with its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<Self>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let connector = Arc::new(Self {
            name,
            state: Arc::clone(&state),
        });
        (connector, DynamicMockController { state })
    }
}

#[async_trait]
impl EarningsConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    async fn earnings(&self, req: &EarningsRequest) -> Result<EarningsResponse, ErtragError> {
        // Resolve the behavior without holding the lock across the hang
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push(req.clone());
            guard
                .rules
                .get(req)
                .or(guard.fallback.as_ref())
                .cloned()
        };
        match behavior {
            Some(MockBehavior::Return(events)) => Ok(EarningsResponse::new(events)),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Err(ErtragError::not_found(req.describe())),
        }
    }
}
