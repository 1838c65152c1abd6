use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_DST_PORT: u16 = 5060;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_USER: &str = "SIPMonitor";

/// Read-only settings shared by every probe of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Source address written into Via/From/Contact and tried first when binding.
    ///
    /// Kept as text: an address that does not parse is still sent on the wire,
    /// the binder just skips the exact bind for it.
    pub src_ip: String,
    pub src_port: u16,
    /// UDP port of the SIP server on every target.
    pub dst_port: u16,
    /// How long to wait for a reply after the request is written.
    pub timeout: Duration,
    /// User part of the From and Contact URIs.
    pub sip_user: String,
    /// User part of the To URI.
    pub to_user: String,
}

impl ProbeConfig {
    pub fn new(src_ip: impl Into<String>, src_port: u16) -> Result<Self, ConfigError> {
        let src_ip: String = src_ip.into();
        if src_ip.trim().is_empty() {
            return Err(ConfigError::MissingFlag("src-ip"));
        }
        if src_port == 0 {
            return Err(ConfigError::MissingFlag("src-port"));
        }

        Ok(Self {
            src_ip,
            src_port,
            dst_port: DEFAULT_DST_PORT,
            timeout: DEFAULT_TIMEOUT,
            sip_user: DEFAULT_USER.to_string(),
            to_user: DEFAULT_USER.to_string(),
        })
    }

    pub fn with_dst_port(mut self, dst_port: u16) -> Self {
        self.dst_port = dst_port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_users(mut self, sip_user: impl Into<String>, to_user: impl Into<String>) -> Self {
        self.sip_user = sip_user.into();
        self.to_user = to_user.into();
        self
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
