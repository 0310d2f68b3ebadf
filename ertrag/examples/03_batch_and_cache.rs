mod common;
use std::time::{Duration, Instant};

use ertrag::{CacheConfig, EarningsRequest, Ertrag, companies};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    let ertrag = Ertrag::builder()
        .with_connector(common::get_connector())
        .cache(CacheConfig::default().with_ttl(Duration::from_secs(60)))
        .provider_timeout(Duration::from_secs(3))
        .build()?;

    let mut reqs: Vec<EarningsRequest> = companies::dax40()
        .into_iter()
        .take(5)
        .map(|c| EarningsRequest::new(c.symbol, 2022))
        .collect();
    reqs.push(EarningsRequest::new("FAIL", 2022));
    reqs.push(EarningsRequest::new("TIMEOUT", 2022));

    let started = Instant::now();
    let (ok, failures) = ertrag.earnings_batch(&reqs).await;
    println!("first batch took {:?}", started.elapsed());
    for (req, resp) in &ok {
        println!("{}: {} reports", req.symbol, resp.earnings.len());
    }
    for (req, err) in &failures {
        eprintln!("- {} -> {err}", req.describe());
    }

    let started = Instant::now();
    let _ = ertrag.earnings_batch(&reqs[..5]).await;
    println!(
        "cached batch took {:?} ({} entries)",
        started.elapsed(),
        ertrag.cache().entry_count().await
    );

    Ok(())
}
