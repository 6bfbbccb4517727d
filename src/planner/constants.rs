/// Maximum accepted shortfall, as a fraction of the target weight.
pub const DEFAULT_TOLERANCE: f64 = 0.05;

/// Packets are dispensed in pairs; every count and adjustment is a multiple
/// of this.
pub const PACKET_STEP: u32 = 2;

/// Decimal places kept on contribution percentages.
pub const CONTRIBUTION_DECIMALS: i32 = 2;

/// Slack when comparing packed weight to target, in kg.
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// Minimum Jaro-Winkler score for a fuzzy category match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

// ─────────────────────────────────────────────────────────────────────────────
// Interactive defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Target weight offered when prompting, in kg.
pub const DEFAULT_TARGET_WEIGHT: f64 = 100.0;

/// Smallest target weight accepted when prompting, in kg.
pub const MIN_TARGET_WEIGHT: f64 = 1.0;

/// Upload history entries shown by default.
pub const HISTORY_DISPLAY_LIMIT: usize = 5;
