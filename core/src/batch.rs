use sipmon_common::target::TargetList;
use tracing::info;

use crate::probe::{ProbeResult, Prober};

/// Tally of a finished batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    /// Targets that answered with a 200.
    pub reachable: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, result: &ProbeResult) {
        self.total += 1;
        if result.status.is_reachable() {
            self.reachable += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Probes every target in order, one at a time, handing each result to
/// `on_result` as soon as it is known.
pub async fn run_batch<P, F>(targets: &TargetList, prober: &mut P, mut on_result: F) -> BatchSummary
where
    P: Prober + ?Sized,
    F: FnMut(&ProbeResult),
{
    let mut summary = BatchSummary::default();
    for target in targets.iter() {
        let result: ProbeResult = prober.probe(target).await;
        summary.record(&result);
        on_result(&result);
    }

    info!(
        total = summary.total,
        reachable = summary.reachable,
        failed = summary.failed,
        "batch complete"
    );
    summary
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
