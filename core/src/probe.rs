//! One OPTIONS transaction against one target, from identifier generation
//! to a classified [`ProbeResult`].

use std::fmt;
use std::io;
use std::time::Duration;

use async_trait::async_trait;
use sipmon_common::config::ProbeConfig;
use sipmon_protocols::{OptionsRequest, ParsedResponse, parse_response};
use tokio::net::UdpSocket;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info};

use crate::ids::IdSource;
use crate::network::bind::{self, DialError};

/// Large enough for any UDP datagram.
pub const RECV_BUFFER_SIZE: usize = 65_535;

const OK_PREFIX: &str = "SIP/2.0 200";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeStatus {
    /// 200 carrying the Call-ID that was sent.
    Ok,
    /// 200 carrying some other Call-ID.
    CallIdMismatch,
    Timeout,
    DialError,
    WriteError,
    ReadError,
    NoStatusLine,
    Unexpected,
}

impl ProbeStatus {
    /// The target answered the probe with a 200, whatever the Call-ID.
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeStatus::Ok | ProbeStatus::CallIdMismatch)
    }
}

/// Outcome of a single probe, printed as `<target> - <description>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub target: String,
    pub status: ProbeStatus,
    pub detail: String,
}

impl ProbeResult {
    pub fn new(target: impl Into<String>, status: ProbeStatus, detail: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            status,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - ", self.target)?;
        match self.status {
            ProbeStatus::Ok => write!(f, "200 OK (Call-ID OK)"),
            ProbeStatus::CallIdMismatch => write!(f, "200 OK (Call-ID mismatch: {})", self.detail),
            ProbeStatus::Timeout => write!(f, "TIMEOUT"),
            ProbeStatus::DialError => write!(f, "ERROR dial: {}", self.detail),
            ProbeStatus::WriteError => write!(f, "ERROR write: {}", self.detail),
            ProbeStatus::ReadError => write!(f, "ERROR read: {}", self.detail),
            ProbeStatus::NoStatusLine => write!(f, "no SIP status line"),
            ProbeStatus::Unexpected => write!(f, "unexpected: {}", self.detail),
        }
    }
}

/// How the send/receive half of a probe ended.
#[derive(Debug)]
pub enum Exchange {
    Responded(Vec<u8>),
    TimedOut,
    WriteFailed(io::Error),
    ReadFailed(io::Error),
}

/// Anything able to turn a target into a result. The batch driver only
/// talks to this.
#[async_trait]
pub trait Prober {
    async fn probe(&mut self, target: &str) -> ProbeResult;
}

/// The real thing: SIP OPTIONS over UDP.
pub struct SipProber<'a, I> {
    cfg: &'a ProbeConfig,
    ids: I,
}

impl<'a, I: IdSource> SipProber<'a, I> {
    pub fn new(cfg: &'a ProbeConfig, ids: I) -> Self {
        Self { cfg, ids }
    }
}

#[async_trait]
impl<'a, I: IdSource + Send> Prober for SipProber<'a, I> {
    async fn probe(&mut self, target: &str) -> ProbeResult {
        probe(target, self.cfg, &mut self.ids).await
    }
}

/// Runs one full OPTIONS transaction against `target`.
///
/// Never fails: every problem ends up in the returned result. The socket is
/// dropped before returning, whatever happened.
pub async fn probe<I>(target: &str, cfg: &ProbeConfig, ids: &mut I) -> ProbeResult
where
    I: IdSource + ?Sized,
{
    let call_id: String = ids.call_id();
    let branch: String = ids.branch();
    let payload: Vec<u8> = OptionsRequest {
        dst_ip: target,
        dst_port: cfg.dst_port,
        src_ip: &cfg.src_ip,
        src_port: cfg.src_port,
        call_id: &call_id,
        branch: &branch,
        from_user: &cfg.sip_user,
        to_user: &cfg.to_user,
    }
    .to_bytes();

    let socket: UdpSocket = match open_socket(target, cfg).await {
        Ok(socket) => socket,
        Err(e) => {
            let result = ProbeResult::new(target, ProbeStatus::DialError, e.to_string());
            info!(dst = target, status = ?result.status, "probe finished");
            return result;
        }
    };

    debug!(dst = target, %call_id, bytes = payload.len(), "sending OPTIONS");
    let outcome: Exchange = exchange(&socket, &payload, cfg.timeout).await;
    drop(socket);

    let result: ProbeResult = classify(target, &call_id, outcome);
    info!(dst = target, status = ?result.status, "probe finished");
    result
}

async fn open_socket(target: &str, cfg: &ProbeConfig) -> Result<UdpSocket, DialError> {
    let dst = bind::destination(target, cfg.dst_port)?;
    bind::dial(dst, &bind::bind_plan(&cfg.src_ip, cfg.src_port)).await
}

/// Writes `payload` and waits for one datagram. Both steps share a single
/// deadline fixed before the write.
pub async fn exchange(socket: &UdpSocket, payload: &[u8], timeout: Duration) -> Exchange {
    let deadline: Instant = Instant::now() + timeout;

    match timeout_at(deadline, socket.send(payload)).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => return Exchange::WriteFailed(e),
        Err(_elapsed) => return Exchange::WriteFailed(io::ErrorKind::TimedOut.into()),
    }

    let mut buf: Vec<u8> = vec![0u8; RECV_BUFFER_SIZE];
    match timeout_at(deadline, socket.recv(&mut buf)).await {
        Ok(Ok(len)) => {
            buf.truncate(len);
            debug!(bytes = len, "datagram received");
            Exchange::Responded(buf)
        }
        Ok(Err(e)) => Exchange::ReadFailed(e),
        Err(_elapsed) => Exchange::TimedOut,
    }
}

/// Maps the end of an exchange to a result.
pub fn classify(target: &str, expected_call_id: &str, exchange: Exchange) -> ProbeResult {
    match exchange {
        Exchange::Responded(payload) => classify_response(target, expected_call_id, &payload),
        Exchange::TimedOut => ProbeResult::new(target, ProbeStatus::Timeout, ""),
        Exchange::WriteFailed(e) => ProbeResult::new(target, ProbeStatus::WriteError, e.to_string()),
        Exchange::ReadFailed(e) => ProbeResult::new(target, ProbeStatus::ReadError, e.to_string()),
    }
}

/// Classifies a received datagram against the Call-ID that was sent.
pub fn classify_response(target: &str, expected_call_id: &str, payload: &[u8]) -> ProbeResult {
    let ParsedResponse { status, call_id } = parse_response(payload);

    if status.is_empty() {
        return ProbeResult::new(target, ProbeStatus::NoStatusLine, "");
    }
    if !status.starts_with(OK_PREFIX) {
        return ProbeResult::new(target, ProbeStatus::Unexpected, status);
    }
    if call_id == expected_call_id {
        ProbeResult::new(target, ProbeStatus::Ok, status)
    } else {
        ProbeResult::new(
            target,
            ProbeStatus::CallIdMismatch,
            format!("expected {expected_call_id} got {call_id}"),
        )
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
