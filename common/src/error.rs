use thiserror::Error;

/// Errors that abort the run before any probe is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required flag -{0}")]
    MissingFlag(&'static str),
    #[error("empty IP list in -ips")]
    EmptyTargets,
}
