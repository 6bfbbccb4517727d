mod plan;
mod report;

pub use plan::{AllocationResult, CombinedSummary, PackingRun, ReconcileOutcome, RejectedVariation};
pub use report::{Category, RawRow, Variation};
