//! Probing engine: one SIP OPTIONS transaction per target, run one target
//! at a time.

pub mod batch;
pub mod ids;
pub mod network;
pub mod probe;

pub use batch::{BatchSummary, run_batch};
pub use ids::{IdSource, UuidSource};
pub use probe::{ProbeResult, ProbeStatus, Prober, SipProber, probe};
