use crate::models::{CombinedSummary, PackingRun, ReconcileOutcome};

impl CombinedSummary {
    /// Total the packed and loose weight of a session's runs, in run order.
    pub fn from_runs(runs: Vec<PackingRun>) -> Self {
        let (total_packed, total_loose) = runs.iter().fold((0.0, 0.0), |(packed, loose), run| {
            (packed + run.packed_weight(), loose + run.loose_weight())
        });

        Self {
            runs,
            total_packed,
            total_loose,
        }
    }

    /// Runs that stopped at the iteration cap.
    pub fn non_converged(&self) -> Vec<&PackingRun> {
        self.runs
            .iter()
            .filter(|r| r.outcome == ReconcileOutcome::IterationCap)
            .collect()
    }

    pub fn total_target(&self) -> f64 {
        self.runs.iter().map(|r| r.target_weight).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
