pub mod allocation;
pub mod constants;
pub mod reconcile;
pub mod session;
pub mod summary;

pub use allocation::{allocate, allocate_variation, packet_limit, round_to_step, Allocation};
pub use constants::*;
pub use reconcile::{
    iteration_bound, packed_weight, reconcile, validate_tolerance, PlanConfig, Reconciliation,
};
pub use session::{plan_category, plan_session, PackRequest};
