use serde::Serialize;

use crate::error::PackError;
use crate::models::Variation;

/// Packets to pack for one variation in a packing run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationResult {
    /// Weight per packet in kg. Also the selection key during reconciliation.
    pub weight: f64,

    pub pouch_size: Option<String>,

    pub asin: Option<String>,

    /// Always even: packets are dispensed in pairs.
    pub packets: u32,

    /// `packets * weight`, in kg.
    pub packed_weight: f64,
}

impl AllocationResult {
    pub fn new(variation: &Variation, packets: u32) -> Self {
        Self {
            weight: variation.weight,
            pouch_size: variation.pouch_size.clone(),
            asin: variation.asin.clone(),
            packets,
            packed_weight: packets as f64 * variation.weight,
        }
    }

    /// Change the packet count and refresh the packed weight.
    pub fn set_packets(&mut self, packets: u32) {
        self.packets = packets;
        self.packed_weight = packets as f64 * self.weight;
    }
}

/// A variation left out of allocation because its packet weight is unusable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedVariation {
    pub weight: f64,
    pub pouch_size: Option<String>,
    pub asin: Option<String>,
    /// Display text of the error that rejected it.
    pub reason: String,
}

impl RejectedVariation {
    pub fn new(variation: &Variation, error: &PackError) -> Self {
        Self {
            weight: variation.weight,
            pouch_size: variation.pouch_size.clone(),
            asin: variation.asin.clone(),
            reason: error.to_string(),
        }
    }
}

/// How reconciliation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileOutcome {
    /// Packed weight is at or under target and within tolerance.
    Converged,
    /// A move was required but no variation could take it.
    NoLegalMove,
    /// The iteration bound was hit first; the result is best-effort.
    IterationCap,
    /// The category sold nothing, so there was no mix to allocate from.
    Degenerate,
}

impl ReconcileOutcome {
    pub fn is_converged(self) -> bool {
        matches!(self, ReconcileOutcome::Converged)
    }

    pub fn label(self) -> &'static str {
        match self {
            ReconcileOutcome::Converged => "converged",
            ReconcileOutcome::NoLegalMove => "no legal move",
            ReconcileOutcome::IterationCap => "iteration cap reached",
            ReconcileOutcome::Degenerate => "no sales history",
        }
    }
}

/// The allocation for one category and one target weight.
#[derive(Debug, Clone, Serialize)]
pub struct PackingRun {
    /// Category name.
    pub item: String,

    /// Requested weight in kg.
    pub target_weight: f64,

    pub results: Vec<AllocationResult>,

    pub rejected: Vec<RejectedVariation>,

    pub outcome: ReconcileOutcome,

    /// Reconciliation moves applied.
    pub iterations: usize,
}

impl PackingRun {
    /// Total weight in packets, in kg.
    pub fn packed_weight(&self) -> f64 {
        self.results.iter().map(|r| r.packed_weight).sum()
    }

    /// Weight left unpacked (negative if over-packed).
    pub fn loose_weight(&self) -> f64 {
        self.target_weight - self.packed_weight()
    }

    pub fn total_packets(&self) -> u32 {
        self.results.iter().map(|r| r.packets).sum()
    }
}

/// Totals across every run of a session.
#[derive(Debug, Clone, Serialize)]
pub struct CombinedSummary {
    pub runs: Vec<PackingRun>,
    pub total_packed: f64,
    pub total_loose: f64,
}
