use tracing::{debug, trace};

use crate::error::{PackError, Result};
use crate::models::{AllocationResult, ReconcileOutcome};
use crate::planner::allocation::packet_limit;
use crate::planner::constants::{DEFAULT_TOLERANCE, PACKET_STEP, WEIGHT_EPSILON};

/// Settings for a packing run.
#[derive(Debug, Clone)]
pub struct PlanConfig {
    /// Accepted shortfall as a fraction of the target.
    pub tolerance: f64,
    /// Packet multiple used for rounding and for every move. Must be even.
    pub step: u32,
    /// Overrides the bound derived from the allocation.
    pub max_iterations: Option<usize>,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            step: PACKET_STEP,
            max_iterations: None,
        }
    }
}

impl PlanConfig {
    pub fn validate(&self) -> Result<()> {
        validate_tolerance(self.tolerance).map_err(PackError::InvalidInput)?;
        if self.step == 0 || self.step % 2 != 0 {
            return Err(PackError::InvalidInput(format!(
                "packet step must be a positive even number, got {}",
                self.step
            )));
        }
        Ok(())
    }
}

/// A tolerance is a fraction in `[0, 1)`.
pub fn validate_tolerance(tolerance: f64) -> std::result::Result<f64, String> {
    if tolerance.is_finite() && (0.0..1.0).contains(&tolerance) {
        Ok(tolerance)
    } else {
        Err(format!(
            "tolerance must be a fraction in [0, 1), got {}",
            tolerance
        ))
    }
}

/// Outcome of a reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    pub outcome: ReconcileOutcome,
    /// Moves applied.
    pub iterations: usize,
}

/// Which way the next move goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    Trim,
    TopUp,
}

pub fn packed_weight(results: &[AllocationResult]) -> f64 {
    results.iter().map(|r| r.packed_weight).sum()
}

/// Index of the variation to trim: heaviest packet weight among those that
/// still hold a full step. First wins on ties.
fn trim_candidate(results: &[AllocationResult], step: u32) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (idx, r) in results.iter().enumerate() {
        if r.packets < step {
            continue;
        }
        if best.is_none_or(|b| r.weight > results[b].weight) {
            best = Some(idx);
        }
    }
    best
}

/// Index of the variation to top up: lightest packet weight among those
/// with room for another step. First wins on ties.
fn top_up_candidate(results: &[AllocationResult], step: u32) -> Option<usize> {
    let ceiling = packet_limit(step) - step;
    let mut best: Option<usize> = None;
    for (idx, r) in results.iter().enumerate() {
        if r.packets > ceiling {
            continue;
        }
        if best.is_none_or(|b| r.weight < results[b].weight) {
            best = Some(idx);
        }
    }
    best
}

/// Bound on moves for one run.
///
/// Enough to trim every initial pair and then climb from empty to the
/// target with the lightest packet, twice over.
pub fn iteration_bound(results: &[AllocationResult], target: f64, config: &PlanConfig) -> usize {
    if let Some(max) = config.max_iterations {
        return max;
    }

    let step = config.step.max(1);
    let initial_moves: usize = results.iter().map(|r| (r.packets / step) as usize).sum();

    let min_weight = results
        .iter()
        .map(|r| r.weight)
        .fold(f64::INFINITY, f64::min);
    let climb_moves = if min_weight.is_finite() && min_weight > 0.0 {
        (target / (step as f64 * min_weight)).ceil().min(usize::MAX as f64 / 4.0) as usize
    } else {
        0
    };

    initial_moves
        .saturating_add(climb_moves)
        .saturating_add(results.len() + 1)
        .saturating_mul(2)
}

/// Nudge packet counts until the packed weight sits at or under the target
/// and within tolerance.
///
/// Over-packing is always trimmed from the heaviest variation; under-packing
/// is only topped up (lightest variation first) when the shortfall exceeds
/// the tolerance. Every move is exactly `config.step` packets, so counts stay
/// even and never go below zero.
pub fn reconcile(
    results: &mut [AllocationResult],
    target: f64,
    config: &PlanConfig,
) -> Reconciliation {
    let step = config.step.max(1);
    let bound = iteration_bound(results, target, config);
    let mut iterations = 0usize;

    let outcome = loop {
        let packed = packed_weight(results);
        let deviation = (target - packed) / target;

        let next = if packed > target + WEIGHT_EPSILON {
            Move::Trim
        } else if deviation > config.tolerance {
            Move::TopUp
        } else {
            break ReconcileOutcome::Converged;
        };

        if iterations >= bound {
            break ReconcileOutcome::IterationCap;
        }

        let candidate = match next {
            Move::Trim => trim_candidate(results, step),
            Move::TopUp => top_up_candidate(results, step),
        };
        let Some(idx) = candidate else {
            break ReconcileOutcome::NoLegalMove;
        };

        let result = &mut results[idx];
        let packets = match next {
            Move::Trim => result.packets - step,
            Move::TopUp => result.packets + step,
        };
        trace!(
            ?next,
            weight = result.weight,
            from = result.packets,
            to = packets,
            packed,
            deviation,
            "reconcile move"
        );
        result.set_packets(packets);
        iterations += 1;
    };

    debug!(
        outcome = outcome.label(),
        iterations,
        packed = packed_weight(results),
        target,
        "reconciliation finished"
    );

    Reconciliation {
        outcome,
        iterations,
    }
}
