use crate::models::{CombinedSummary, PackingRun, ReconcileOutcome};
use crate::report::ParsedReport;
use crate::state::UploadRecord;

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

/// Display one packing run as a table.
pub fn display_packing_run(run: &PackingRun) {
    println!();
    println!("=== Item: {} ===", run.item);
    println!(
        "Target: {} kg | Packed: {:.2} kg | Loose: {:.2} kg",
        run.target_weight,
        run.packed_weight(),
        run.loose_weight()
    );
    println!();

    if run.results.is_empty() {
        println!("  (no usable variations)");
    } else {
        println!(
            "  {:>10} | {:<12} | {:<14} | {:>8} | {:>11}",
            "Variation", "Pouch Size", "ASIN", "Packets", "Packed (kg)"
        );
        for r in &run.results {
            println!(
                "  {:>10} | {:<12} | {:<14} | {:>8} | {:>11.2}",
                r.weight,
                or_dash(&r.pouch_size),
                or_dash(&r.asin),
                r.packets,
                r.packed_weight
            );
        }
    }

    for rejected in &run.rejected {
        println!(
            "  skipped variation {} kg ({}): {}",
            rejected.weight,
            or_dash(&rejected.asin),
            rejected.reason
        );
    }

    match run.outcome {
        ReconcileOutcome::Converged => {}
        ReconcileOutcome::Degenerate => {
            println!("  Note: no sales recorded for this item, nothing allocated.");
        }
        outcome => {
            println!(
                "  Warning: plan did not converge ({} after {} adjustments).",
                outcome.label(),
                run.iterations
            );
        }
    }
}

/// Display the combined totals line.
pub fn display_summary(summary: &CombinedSummary) {
    if summary.is_empty() {
        println!("No items planned.");
        return;
    }

    println!();
    println!("--- Summary ---");
    println!("Items: {}", summary.runs.len());
    println!("Total target: {:.2} kg", summary.total_target());
    println!(
        "TOTAL PACKED: {:.2} kg | TOTAL LOOSE: {:.2} kg",
        summary.total_packed, summary.total_loose
    );
    println!();
}

/// Display the categories found in a report.
pub fn display_categories(report: &ParsedReport) {
    if report.categories.is_empty() {
        println!("No items found in the packing plan.");
        return;
    }

    let width = report
        .categories
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(10);

    println!();
    println!("=== Items ({}) ===", report.categories.len());
    println!();
    for category in &report.categories {
        println!(
            "  {:<width$}  {:>10.2} kg sold  {:>3} variations",
            category.name,
            category.total_weight_sold,
            category.variations.len(),
            width = width
        );
    }

    if !report.skipped.is_empty() {
        println!();
        println!("{} rows skipped:", report.skipped.len());
        for e in &report.skipped {
            println!("  {}", e);
        }
    }
    println!();
}

/// Display upload history, in the order given.
pub fn display_history(records: &[UploadRecord]) {
    if records.is_empty() {
        println!("No uploads yet.");
        return;
    }

    println!();
    println!("=== Upload History ===");
    for record in records {
        println!(
            "  v{:<3} {}  {}",
            record.version,
            record.uploaded_at.format("%d-%m-%Y %H:%M:%S"),
            record.source
        );
    }
    println!();
}
