pub mod cli;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod planner;
pub mod report;
pub mod state;

pub use error::{PackError, Result};
pub use models::{AllocationResult, Category, CombinedSummary, PackingRun, Variation};
