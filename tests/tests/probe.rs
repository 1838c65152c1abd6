use std::time::Duration;

use sipmon_common::config::ProbeConfig;
use sipmon_core::{IdSource, ProbeStatus, probe};
use sipmon_integration_tests::{Reply, Responder, closed_port};
use sipmon_protocols::parse_response;

struct FixedIds {
    call_id: &'static str,
}

impl IdSource for FixedIds {
    fn call_id(&mut self) -> String {
        self.call_id.to_string()
    }

    fn branch(&mut self) -> String {
        "z9hG4bK-integration".to_string()
    }
}

fn config(dst_port: u16) -> ProbeConfig {
    ProbeConfig::new("127.0.0.1", 5098)
        .unwrap()
        .with_dst_port(dst_port)
        .with_timeout(Duration::from_millis(300))
        .with_users("monitor-a", "kamailio")
}

#[tokio::test]
async fn echoed_call_id_is_ok() {
    let responder = Responder::spawn(Reply::Echo, 1).await.unwrap();
    let mut ids = FixedIds { call_id: "X" };

    let result = probe("127.0.0.1", &config(responder.port()), &mut ids).await;

    assert_eq!(result.status, ProbeStatus::Ok);
    assert_eq!(result.to_string(), "127.0.0.1 - 200 OK (Call-ID OK)");
}

#[tokio::test]
async fn request_on_the_wire_carries_generated_identifiers() {
    let responder = Responder::spawn(Reply::Echo, 1).await.unwrap();
    let mut ids = FixedIds { call_id: "wire-check" };
    let port = responder.port();

    probe("127.0.0.1", &config(port), &mut ids).await;
    let requests = responder.requests().await.unwrap();

    let text = String::from_utf8(requests[0].clone()).unwrap();
    assert!(text.starts_with(&format!("OPTIONS sip:127.0.0.1:{port} SIP/2.0\r\n")));
    assert!(text.contains(";branch=z9hG4bK-integration\r\n"));
    assert!(text.contains("From: <sip:monitor-a@127.0.0.1>;tag=monitor\r\n"));
    assert!(text.contains("To: <sip:kamailio@127.0.0.1>\r\n"));
    assert!(text.ends_with("Content-Length: 0\r\n\r\n"));
    assert_eq!(parse_response(&requests[0]).call_id, "wire-check");
}

#[tokio::test]
async fn foreign_call_id_is_a_mismatch() {
    let responder = Responder::spawn(Reply::CallId("Y".to_string()), 1).await.unwrap();
    let mut ids = FixedIds { call_id: "X" };

    let result = probe("127.0.0.1", &config(responder.port()), &mut ids).await;

    assert_eq!(result.status, ProbeStatus::CallIdMismatch);
    assert!(result.detail.contains('X'));
    assert!(result.detail.contains('Y'));
    assert_eq!(
        result.to_string(),
        "127.0.0.1 - 200 OK (Call-ID mismatch: expected X got Y)"
    );
}

#[tokio::test]
async fn busy_here_is_unexpected() {
    let responder = Responder::spawn(Reply::Status("SIP/2.0 486 Busy Here".to_string()), 1)
        .await
        .unwrap();
    let mut ids = FixedIds { call_id: "X" };

    let result = probe("127.0.0.1", &config(responder.port()), &mut ids).await;

    assert_eq!(result.status, ProbeStatus::Unexpected);
    assert!(result.detail.contains("SIP/2.0 486 Busy Here"));
}

#[tokio::test]
async fn non_sip_reply_has_no_status_line() {
    let responder = Responder::spawn(Reply::Raw(b"PONG\r\n".to_vec()), 1).await.unwrap();
    let mut ids = FixedIds { call_id: "X" };

    let result = probe("127.0.0.1", &config(responder.port()), &mut ids).await;

    assert_eq!(result.status, ProbeStatus::NoStatusLine);
    assert_eq!(result.to_string(), "127.0.0.1 - no SIP status line");
}

#[tokio::test]
async fn silence_is_a_timeout() {
    let responder = Responder::spawn(Reply::Silent, 1).await.unwrap();
    let mut ids = FixedIds { call_id: "X" };

    let result = probe("127.0.0.1", &config(responder.port()), &mut ids).await;

    assert_eq!(result.status, ProbeStatus::Timeout);
    assert!(result.detail.is_empty());
    assert_eq!(result.to_string(), "127.0.0.1 - TIMEOUT");
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn refused_port_is_a_read_error() {
    let port = closed_port().await.unwrap();
    let mut ids = FixedIds { call_id: "X" };

    let result = probe("127.0.0.1", &config(port), &mut ids).await;

    assert_eq!(result.status, ProbeStatus::ReadError);
    assert!(result.to_string().starts_with("127.0.0.1 - ERROR read: "));
}

#[tokio::test]
async fn source_port_in_use_still_probes() {
    let responder = Responder::spawn(Reply::Echo, 1).await.unwrap();
    let squatter = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let taken = squatter.local_addr().unwrap().port();
    let cfg = ProbeConfig::new("127.0.0.1", taken)
        .unwrap()
        .with_dst_port(responder.port())
        .with_timeout(Duration::from_millis(300));
    let mut ids = FixedIds { call_id: "X" };

    let result = probe("127.0.0.1", &cfg, &mut ids).await;

    assert_eq!(result.status, ProbeStatus::Ok);
}
