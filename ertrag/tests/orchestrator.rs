mod helpers;

use std::sync::Arc;
use std::time::Duration;

use ertrag::{ConnectorKey, EarningsRequest, Ertrag, ErtragError, ReportType};
use ertrag_mock::{DynamicMockConnector, MockBehavior};
use helpers::*;

#[test]
fn build_requires_a_connector() {
    let err = Ertrag::builder().build().err().unwrap();
    assert!(matches!(err, ErtragError::InvalidArg(_)));
}

#[test]
fn build_rejects_empty_year_range() {
    let err = Ertrag::builder()
        .with_connector(Arc::new(mock(1)))
        .years(ertrag::YearRange::new(2025, 2000))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, ErtragError::InvalidArg(_)));
}

#[test]
fn defaults_match_documented_config() {
    let ertrag = Ertrag::builder()
        .with_connector(Arc::new(mock(1)))
        .build()
        .unwrap();
    assert_eq!(ertrag.config().provider_timeout, Duration::from_secs(5));
    assert_eq!(ertrag.config().years.min, 2000);
    assert!(ertrag.cache().is_enabled());
    assert_eq!(
        ertrag.connector_keys(),
        vec![ConnectorKey::new(ertrag_mock::MockConnector::NAME)]
    );
}

#[tokio::test]
async fn completed_year_has_four_reports() {
    let ertrag = Ertrag::builder()
        .with_connector(Arc::new(mock(4)))
        .years(years())
        .build()
        .unwrap();
    let resp = ertrag.earnings(SAP, 2020).await.unwrap();
    assert_eq!(resp.earnings.len(), 4);
    assert_eq!(resp.earnings[3].report_type(), ReportType::Annual);
}

#[tokio::test]
async fn out_of_range_year_and_blank_symbol_are_rejected() {
    let (raw, count) = CountingConnector::wrap("c", Arc::new(mock(1)));
    let ertrag = Ertrag::builder()
        .with_connector(raw)
        .years(years())
        .build()
        .unwrap();

    for (symbol, year) in [(SAP, 1999), (SAP, 2026), ("  ", 2020), ("", 2020)] {
        let err = ertrag.earnings(symbol, year).await.unwrap_err();
        assert!(matches!(err, ErtragError::InvalidArg(_)), "{symbol:?} {year}");
    }
    assert_eq!(calls(&count), 0, "validation happens before any provider call");
}

#[tokio::test]
async fn falls_back_to_next_provider() {
    let (failing, ctrl) = DynamicMockConnector::new_with_controller("down");
    ctrl.set_fallback_behavior(MockBehavior::Fail(ErtragError::connector("down", "503")))
        .await;
    let ertrag = Ertrag::builder()
        .with_connector(failing)
        .with_connector(Arc::new(mock(9)))
        .years(years())
        .build()
        .unwrap();

    let resp = ertrag.earnings(BMW, 2021).await.unwrap();
    assert_eq!(resp.earnings.len(), 4);
    assert_eq!(ctrl.call_count().await, 1);
}

#[tokio::test]
async fn all_not_found_collapses_to_not_found() {
    let (a, _) = DynamicMockConnector::new_with_controller("a");
    let (b, _) = DynamicMockConnector::new_with_controller("b");
    let ertrag = Ertrag::builder()
        .with_connector(a)
        .with_connector(b)
        .years(years())
        .build()
        .unwrap();

    let err = ertrag.earnings(SAP, 2020).await.unwrap_err();
    assert_eq!(err, ErtragError::not_found("earnings for SAP in 2020"));
    assert!(!err.is_retryable());
}

#[tokio::test(start_paused = true)]
async fn all_timeouts_collapse_to_all_providers_timed_out() {
    let (a, ca) = DynamicMockConnector::new_with_controller("a");
    let (b, cb) = DynamicMockConnector::new_with_controller("b");
    ca.set_fallback_behavior(MockBehavior::Hang).await;
    cb.set_fallback_behavior(MockBehavior::Hang).await;
    let ertrag = Ertrag::builder()
        .with_connector(a)
        .with_connector(b)
        .provider_timeout(Duration::from_millis(50))
        .years(years())
        .build()
        .unwrap();

    let err = ertrag.earnings(SAP, 2020).await.unwrap_err();
    assert_eq!(
        err,
        ErtragError::AllProvidersTimedOut {
            capability: ertrag::CAPABILITY.to_string()
        }
    );
    assert!(err.is_retryable());
}

#[tokio::test(start_paused = true)]
async fn mock_timeout_symbol_hits_provider_timeout() {
    let ertrag = Ertrag::builder()
        .with_connector(Arc::new(mock(1)))
        .provider_timeout(Duration::from_secs(5))
        .years(years())
        .build()
        .unwrap();
    let err = ertrag.earnings("TIMEOUT", 2020).await.unwrap_err();
    assert!(matches!(err, ErtragError::AllProvidersTimedOut { .. }));
}

#[tokio::test]
async fn mixed_failures_are_aggregated_in_order() {
    let (a, ca) = DynamicMockConnector::new_with_controller("a");
    ca.set_fallback_behavior(MockBehavior::Fail(ErtragError::Data("boom".into())))
        .await;
    let (b, _) = DynamicMockConnector::new_with_controller("b");
    let ertrag = Ertrag::builder()
        .with_connector(a)
        .with_connector(b)
        .years(years())
        .build()
        .unwrap();

    match ertrag.earnings(SAP, 2020).await.unwrap_err() {
        ErtragError::AllProvidersFailed(errors) => {
            assert_eq!(
                errors,
                vec![
                    ErtragError::connector("a", "data issue: boom"),
                    ErtragError::not_found("earnings for SAP in 2020"),
                ]
            );
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn batch_reports_successes_and_failures() {
    let ertrag = Ertrag::builder()
        .with_connector(Arc::new(mock(2)))
        .years(years())
        .build()
        .unwrap();
    let reqs = [
        EarningsRequest::new(SAP, 2020),
        EarningsRequest::new("FAIL", 2020),
        EarningsRequest::new(BMW, 1990),
        EarningsRequest::new(BMW, 2019),
    ];

    let (ok, failures) = ertrag.earnings_batch(&reqs).await;
    let ok_reqs: Vec<_> = ok.iter().map(|(r, _)| r.clone()).collect();
    let failed_reqs: Vec<_> = failures.iter().map(|(r, _)| r.clone()).collect();
    assert_eq!(ok_reqs, vec![reqs[0].clone(), reqs[3].clone()]);
    assert_eq!(failed_reqs, vec![reqs[1].clone(), reqs[2].clone()]);
    assert!(matches!(failures[1].1, ErtragError::InvalidArg(_)));

    let (ok, failures) = ertrag.earnings_batch(&[]).await;
    assert!(ok.is_empty() && failures.is_empty());
}
