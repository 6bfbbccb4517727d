use tracing::warn;

use crate::error::{PackError, Result};
use crate::models::{AllocationResult, Category, RejectedVariation, Variation};

/// Unreconciled allocation for one category.
#[derive(Debug, Clone, Default)]
pub struct Allocation {
    pub results: Vec<AllocationResult>,
    pub rejected: Vec<RejectedVariation>,
}

/// Largest packet count that is still a multiple of `step`.
pub fn packet_limit(step: u32) -> u32 {
    let step = step.max(1);
    u32::MAX - u32::MAX % step
}

/// Round to the nearest multiple of `step`, ties to even.
///
/// Negative inputs clamp to zero. Returns `None` when the rounded count does
/// not fit under [`packet_limit`].
pub fn round_to_step(raw: f64, step: u32) -> Option<u32> {
    let step = step.max(1);
    let rounded = (raw / step as f64).round_ties_even() * step as f64;
    if rounded.is_nan() || rounded <= 0.0 {
        Some(0)
    } else if rounded <= packet_limit(step) as f64 {
        Some(rounded as u32)
    } else {
        None
    }
}

pub fn validate_target(target: f64) -> Result<()> {
    if target.is_finite() && target > 0.0 {
        Ok(())
    } else {
        Err(PackError::InvalidTarget(target))
    }
}

/// Initial packet count for one variation.
///
/// Packets = contribution share of the target divided by the packet weight,
/// rounded to a multiple of `step`. A variation without a contribution gets
/// none.
pub fn allocate_variation(
    category: &str,
    variation: &Variation,
    target: f64,
    step: u32,
) -> Result<AllocationResult> {
    if !(variation.weight.is_finite() && variation.weight > 0.0) {
        return Err(PackError::InvalidVariation {
            category: category.to_string(),
            weight: variation.weight,
        });
    }

    let packets = match variation.contribution {
        Some(pct) => {
            let raw = pct / 100.0 * target / variation.weight;
            round_to_step(raw, step).ok_or_else(|| PackError::TooManyPackets {
                category: category.to_string(),
                weight: variation.weight,
                packets: raw,
            })?
        }
        None => 0,
    };

    Ok(AllocationResult::new(variation, packets))
}

/// Allocate a target weight across a category's variations.
///
/// Variations with an unusable packet weight are left out and reported in
/// `rejected`; the rest keep table order. A count too large to represent
/// fails the whole run.
pub fn allocate(category: &Category, target: f64, step: u32) -> Result<Allocation> {
    validate_target(target)?;

    let mut allocation = Allocation::default();
    for variation in &category.variations {
        match allocate_variation(&category.name, variation, target, step) {
            Ok(result) => allocation.results.push(result),
            Err(e @ PackError::InvalidVariation { .. }) => {
                warn!(category = %category.name, "rejecting variation: {}", e);
                allocation.rejected.push(RejectedVariation::new(variation, &e));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(allocation)
}
