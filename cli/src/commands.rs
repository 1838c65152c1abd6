use std::ffi::OsString;
use std::time::Duration;

use clap::Parser;
use sipmon_common::{
    config::{DEFAULT_USER, ProbeConfig},
    error::ConfigError,
    target::{self, TargetList},
};

/// Long flags that may also be written with a single dash (`-src-ip`).
const SINGLE_DASH_FLAGS: &[&str] = &[
    "src-ip", "src-port", "kam-port", "ips", "timeout", "sip-user", "to-user", "help",
];

#[derive(Parser, Debug)]
#[command(name = "sip-options-once")]
#[command(about = "Send one SIP OPTIONS to each host and report how it answered.")]
pub struct CommandLine {
    /// Source IP for the UDP packets (required)
    #[arg(long = "src-ip", value_name = "IP")]
    pub src_ip: Option<String>,
    /// Source UDP port (required)
    #[arg(long = "src-port", value_name = "PORT", value_parser = clap::value_parser!(u16).range(1..))]
    pub src_port: Option<u16>,
    /// Destination port (Kamailio/SBC)
    #[arg(long = "kam-port", value_name = "PORT", default_value_t = 5060)]
    pub kam_port: u16,
    /// Comma-separated list of destination IPs (required)
    #[arg(long = "ips", value_name = "IP,IP,...")]
    pub ips: Option<String>,
    /// Seconds to wait for each response
    #[arg(long = "timeout", value_name = "SECONDS", default_value_t = 2)]
    pub timeout: u64,
    /// SIP user for From/Contact
    #[arg(long = "sip-user", default_value = DEFAULT_USER)]
    pub sip_user: String,
    /// SIP user for To
    #[arg(long = "to-user", default_value = DEFAULT_USER)]
    pub to_user: String,
}

impl CommandLine {
    pub fn parse_args() -> Result<Self, clap::Error> {
        Self::try_parse_from(normalize_flags(std::env::args_os()))
    }

    /// Checks the required flags and splits the result into the shared probe
    /// settings and the target list.
    pub fn into_settings(self) -> Result<(ProbeConfig, TargetList), ConfigError> {
        let src_ip: String = self
            .src_ip
            .filter(|ip| !ip.trim().is_empty())
            .ok_or(ConfigError::MissingFlag("src-ip"))?;
        let src_port: u16 = self.src_port.ok_or(ConfigError::MissingFlag("src-port"))?;
        let ips: String = self
            .ips
            .filter(|ips| !ips.is_empty())
            .ok_or(ConfigError::MissingFlag("ips"))?;

        let targets: TargetList = target::parse_commas(&ips)?;
        let cfg: ProbeConfig = ProbeConfig::new(src_ip, src_port)?
            .with_dst_port(self.kam_port)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_users(self.sip_user, self.to_user);

        Ok((cfg, targets))
    }
}

/// Rewrites `-name` and `-name=value` into their `--` form for known flags.
/// Everything else passes through untouched.
pub fn normalize_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg: OsString| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(rest) = text.strip_prefix('-') else {
                return arg;
            };
            if rest.starts_with('-') {
                return arg;
            }
            let name: &str = rest.split('=').next().unwrap_or(rest);
            if SINGLE_DASH_FLAGS.contains(&name) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
