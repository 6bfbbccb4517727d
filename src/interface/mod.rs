pub mod export;
pub mod prompts;
pub mod render;

pub use export::{write_summary_csv, write_summary_json};
pub use prompts::{collect_pack_requests, parse_target_weight, prompt_target_weight};
pub use render::{display_categories, display_history, display_packing_run, display_summary};
