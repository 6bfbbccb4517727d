use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::planner::constants::{DEFAULT_TOLERANCE, HISTORY_DISPLAY_LIMIT};
use crate::planner::{validate_tolerance, PackRequest};

/// Packing Plan — split a target weight across pouch sizes by sales mix.
#[derive(Parser, Debug)]
#[command(name = "packing_plan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding the latest uploaded report and upload history.
    #[arg(short, long, default_value = ".packing_plan", global = true)]
    pub store: PathBuf,

    /// Read this report directly instead of the uploaded one.
    #[arg(short, long, global = true)]
    pub report: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload a new sales report (.csv, .xlsx or .xls).
    Upload {
        /// Report file to publish.
        file: PathBuf,
    },

    /// Show recent uploads.
    History {
        /// Number of uploads to show.
        #[arg(long, default_value_t = HISTORY_DISPLAY_LIMIT)]
        limit: usize,
    },

    /// List items in the current report.
    Categories,

    /// Plan packets for one or more items.
    Plan {
        /// Item and target weight as NAME=KG. Repeat for several items.
        /// Prompts interactively when omitted.
        #[arg(short, long = "item", value_parser = parse_pack_request)]
        items: Vec<PackRequest>,

        /// Accepted shortfall as a fraction of the target.
        #[arg(long, default_value_t = DEFAULT_TOLERANCE, value_parser = parse_tolerance)]
        tolerance: f64,

        /// Cap on reconciliation adjustments per item.
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Write the combined plan as CSV.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the combined plan as JSON.
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan {
            items: Vec::new(),
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: None,
            csv: None,
            json: None,
        }
    }
}

/// Parse `NAME=KG`. The last `=` splits, so names may contain `=`.
pub fn parse_pack_request(s: &str) -> Result<PackRequest, String> {
    let (name, weight) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=KG, got '{}'", s))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing item name in '{}'", s));
    }

    let weight: f64 = weight
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a weight in kg", weight.trim()))?;

    Ok(PackRequest::new(name, weight))
}

fn parse_tolerance(s: &str) -> Result<f64, String> {
    let tolerance: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s.trim()))?;
    validate_tolerance(tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pack_request() {
        let req = parse_pack_request("Roasted Makhana = 250").unwrap();
        assert_eq!(req.item, "Roasted Makhana");
        assert_eq!(req.target_weight, 250.0);

        let req = parse_pack_request("A=B=12.5").unwrap();
        assert_eq!(req.item, "A=B");

        assert!(parse_pack_request("Makhana").is_err());
        assert!(parse_pack_request("=10").is_err());
        assert!(parse_pack_request("Makhana=lots").is_err());
    }

    #[test]
    fn test_cli_parses_plan_items() {
        let cli = Cli::try_parse_from([
            "packing_plan",
            "plan",
            "--item",
            "Makhana=100",
            "-i",
            "Chana=40",
            "--tolerance",
            "0.1",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Plan {
                items, tolerance, ..
            }) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[1].item, "Chana");
                assert_eq!(tolerance, 0.1);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_bad_tolerance() {
        for bad in ["NaN", "-0.1", "1", "inf", "lots"] {
            let parsed = Cli::try_parse_from(["packing_plan", "plan", "--tolerance", bad]);
            assert!(parsed.is_err(), "accepted tolerance {}", bad);
        }
    }

    #[test]
    fn test_cli_global_store() {
        let cli = Cli::try_parse_from(["packing_plan", "history", "--store", "/tmp/plans"]).unwrap();
        assert_eq!(cli.store, PathBuf::from("/tmp/plans"));
        assert!(matches!(cli.command, Some(Command::History { limit: 5 })));
    }
}
