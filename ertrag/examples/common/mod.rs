use std::sync::Arc;

use ertrag::EarningsConnector;
use ertrag_mock::MockConnector;

/// Install a `tracing` subscriber driven by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[must_use]
pub fn get_connector() -> Arc<dyn EarningsConnector> {
    if std::env::var("ERTRAG_EXAMPLES_FAST").is_ok() {
        println!("--- (Using instant mock connector) ---");
        Arc::new(MockConnector::new().without_latency())
    } else {
        Arc::new(MockConnector::new())
    }
}
