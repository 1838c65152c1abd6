use std::time::Duration;

use sipmon_common::{config::ProbeConfig, target::parse_commas};
use sipmon_core::{BatchSummary, ProbeStatus, SipProber, UuidSource, run_batch};
use sipmon_integration_tests::{Reply, Responder};

#[tokio::test]
async fn results_follow_input_order_and_skip_blanks() {
    let responder = Responder::spawn(Reply::Echo, 2).await.unwrap();
    let cfg = ProbeConfig::new("127.0.0.1", 5097)
        .unwrap()
        .with_dst_port(responder.port())
        .with_timeout(Duration::from_millis(500));
    let targets = parse_commas("127.0.0.1, ,not-an-ip,127.0.0.1").unwrap();

    let mut prober = SipProber::new(&cfg, UuidSource);
    let mut results = Vec::new();
    let summary = run_batch(&targets, &mut prober, |r| results.push(r.clone())).await;
    let requests = responder.requests().await.unwrap();

    let statuses: Vec<ProbeStatus> = results.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![ProbeStatus::Ok, ProbeStatus::DialError, ProbeStatus::Ok]
    );
    assert_eq!(results[1].target, "not-an-ip");
    assert_eq!(requests.len(), 2);
    assert_ne!(requests[0], requests[1], "identifiers must not be reused");
    assert_eq!(
        summary,
        BatchSummary {
            total: 3,
            reachable: 2,
            failed: 1
        }
    );
}

#[tokio::test]
async fn every_probe_gets_fresh_identifiers() {
    let responder = Responder::spawn(Reply::Echo, 3).await.unwrap();
    let cfg = ProbeConfig::new("127.0.0.1", 5096)
        .unwrap()
        .with_dst_port(responder.port())
        .with_timeout(Duration::from_millis(500));
    let targets = parse_commas("127.0.0.1,127.0.0.1,127.0.0.1").unwrap();

    let mut prober = SipProber::new(&cfg, UuidSource);
    run_batch(&targets, &mut prober, |_| {}).await;
    let requests = responder.requests().await.unwrap();

    let call_ids: std::collections::HashSet<String> = requests
        .iter()
        .map(|r| sipmon_protocols::parse_response(r).call_id)
        .collect();
    assert_eq!(call_ids.len(), 3);
}
