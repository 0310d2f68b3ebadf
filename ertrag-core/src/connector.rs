use async_trait::async_trait;

use crate::{ConnectorKey, EarningsRequest, EarningsResponse, ErtragError};

/// A source of earnings events.
///
/// Implementors must be cheap to share behind an `Arc` and safe to call from
/// multiple tasks. A connector reports failures through `ErtragError`; an empty
/// response is a success, not a `NotFound`.
#[async_trait]
pub trait EarningsConnector: Send + Sync {
    /// Stable connector name, used in logs and error attribution.
    fn name(&self) -> &'static str;

    /// Vendor or origin of the data.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Typed key derived from [`EarningsConnector::name`].
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Fetch the earnings events of `req.symbol` for `req.year`, oldest first.
    async fn earnings(&self, req: &EarningsRequest) -> Result<EarningsResponse, ErtragError>;
}
