//! Opens the UDP socket a probe talks through.
//!
//! Binding walks an ordered list of [`BindAttempt`]s: the exact source
//! address first, then any interface on the same source port, then whatever
//! the OS hands out. The first attempt that binds and connects wins.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use thiserror::Error;
use tokio::net::UdpSocket;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DialError {
    #[error("invalid destination address {0:?}")]
    InvalidDestination(String),
    /// Cause reported by the final, unbound attempt.
    #[error(transparent)]
    Exhausted(io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindAttempt {
    /// Bind to exactly this source address and port.
    Exact(SocketAddr),
    /// Bind to all interfaces, keeping the source port.
    Wildcard(u16),
    /// No explicit binding.
    Ephemeral,
}

impl BindAttempt {
    /// Local address to bind for a given destination.
    ///
    /// The wildcard follows the destination's address family.
    pub fn local_addr(&self, dst: &SocketAddr) -> SocketAddr {
        match *self {
            BindAttempt::Exact(addr) => addr,
            BindAttempt::Wildcard(port) => SocketAddr::new(unspecified_for(dst), port),
            BindAttempt::Ephemeral => SocketAddr::new(unspecified_for(dst), 0),
        }
    }
}

/// Ordered bind attempts. The unbound attempt is always last, so a plan is
/// never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindPlan {
    preferred: Vec<BindAttempt>,
}

impl BindPlan {
    /// Every attempt in the order they are tried.
    pub fn attempts(&self) -> Vec<BindAttempt> {
        let mut attempts: Vec<BindAttempt> = self.preferred.clone();
        attempts.push(BindAttempt::Ephemeral);
        attempts
    }
}

/// Builds the ordered attempt list for a source address.
///
/// The exact attempt is only included when `src_ip` parses.
pub fn bind_plan(src_ip: &str, src_port: u16) -> BindPlan {
    let mut preferred: Vec<BindAttempt> = Vec::with_capacity(2);
    if let Ok(ip) = src_ip.trim().parse::<IpAddr>() {
        preferred.push(BindAttempt::Exact(SocketAddr::new(ip, src_port)));
    }
    preferred.push(BindAttempt::Wildcard(src_port));
    BindPlan { preferred }
}

pub fn destination(dst_ip: &str, dst_port: u16) -> Result<SocketAddr, DialError> {
    dst_ip
        .trim()
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, dst_port))
        .map_err(|_| DialError::InvalidDestination(dst_ip.to_string()))
}

/// Returns a socket bound per the first successful attempt and connected to `dst`.
pub async fn dial(dst: SocketAddr, plan: &BindPlan) -> Result<UdpSocket, DialError> {
    for attempt in &plan.preferred {
        let local: SocketAddr = attempt.local_addr(&dst);
        match bind_and_connect(local, dst).await {
            Ok(socket) => {
                debug!(?attempt, %local, %dst, "probe socket ready");
                return Ok(socket);
            }
            Err(e) => {
                debug!(?attempt, %local, %dst, error = %e, "bind attempt failed");
            }
        }
    }

    let local: SocketAddr = BindAttempt::Ephemeral.local_addr(&dst);
    let socket: UdpSocket = bind_and_connect(local, dst)
        .await
        .map_err(DialError::Exhausted)?;
    debug!(attempt = ?BindAttempt::Ephemeral, %local, %dst, "probe socket ready");
    Ok(socket)
}

async fn bind_and_connect(local: SocketAddr, dst: SocketAddr) -> io::Result<UdpSocket> {
    let socket: UdpSocket = UdpSocket::bind(local).await?;
    socket.connect(dst).await?;
    Ok(socket)
}

fn unspecified_for(dst: &SocketAddr) -> IpAddr {
    match dst {
        SocketAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        SocketAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
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
