use std::path::{Path, PathBuf};

use clap::Parser;

use packing_plan_rs::cli::{Cli, Command};
use packing_plan_rs::error::Result;
use packing_plan_rs::interface::{
    collect_pack_requests, display_categories, display_history, display_packing_run,
    display_summary, write_summary_csv, write_summary_json,
};
use packing_plan_rs::logging;
use packing_plan_rs::models::CombinedSummary;
use packing_plan_rs::planner::{plan_session, PackRequest, PlanConfig};
use packing_plan_rs::report::{parse_report, ParsedReport};
use packing_plan_rs::state::{FileReportProvider, FileReportStore, ReportProvider};

fn main() {
    logging::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let store = FileReportStore::new(&cli.store);
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Upload { file } => cmd_upload(&store, &file),
        Command::History { limit } => cmd_history(&store, limit),
        Command::Categories => {
            let report = load_report(&store, cli.report.as_ref())?;
            display_categories(&report);
            Ok(())
        }
        Command::Plan {
            items,
            tolerance,
            max_iterations,
            csv,
            json,
        } => {
            let config = PlanConfig {
                tolerance,
                max_iterations,
                ..Default::default()
            };
            config.validate()?;
            let report = load_report(&store, cli.report.as_ref())?;
            cmd_plan(&report, items, &config, csv.as_deref(), json.as_deref())
        }
    }
}

/// Parse the report from `--report` if given, otherwise the uploaded one.
fn load_report(store: &FileReportStore, report: Option<&PathBuf>) -> Result<ParsedReport> {
    let rows = match report {
        Some(path) => FileReportProvider::new(path).current_report()?,
        None => store.current_report()?,
    };
    Ok(parse_report(&rows))
}

/// Publish a report into the store.
fn cmd_upload(store: &FileReportStore, file: &Path) -> Result<()> {
    let record = store.publish(file)?;
    println!(
        "Packing plan uploaded successfully (version {}, {}).",
        record.version,
        record.uploaded_at.format("%d-%m-%Y %H:%M:%S")
    );
    println!("Stored as {}", store.root().join(&record.stored_as).display());
    Ok(())
}

/// Show the most recent uploads, newest first.
fn cmd_history(store: &FileReportStore, limit: usize) -> Result<()> {
    let records = store.recent(limit)?;
    display_history(&records);
    Ok(())
}

/// Plan packets for the requested items and show the combined summary.
fn cmd_plan(
    report: &ParsedReport,
    mut requests: Vec<PackRequest>,
    config: &PlanConfig,
    csv: Option<&Path>,
    json: Option<&Path>,
) -> Result<()> {
    if report.categories.is_empty() {
        println!("No items found in the packing plan.");
        return Ok(());
    }

    if requests.is_empty() {
        requests = collect_pack_requests(report)?;
    }
    if requests.is_empty() {
        println!("No items selected.");
        return Ok(());
    }

    let mut runs = Vec::with_capacity(requests.len());
    for (item, run) in plan_session(report, &requests, config) {
        match run {
            Ok(run) => {
                display_packing_run(&run);
                runs.push(run);
            }
            Err(e) => eprintln!("Skipping {}: {}", item, e),
        }
    }

    let summary = CombinedSummary::from_runs(runs);
    display_summary(&summary);

    for stuck in summary.non_converged() {
        eprintln!(
            "Warning: {} stopped at the adjustment cap; loose weight is {:.2} kg.",
            stuck.item,
            stuck.loose_weight()
        );
    }

    if let Some(path) = csv {
        write_summary_csv(&summary, path)?;
        println!("Wrote packing plan CSV to {}", path.display());
    }
    if let Some(path) = json {
        write_summary_json(&summary, path)?;
        println!("Wrote packing plan JSON to {}", path.display());
    }

    Ok(())
}
