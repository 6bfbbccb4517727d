use std::fs;
use std::path::Path;

use chrono::Local;

use crate::error::Result;
use crate::models::CombinedSummary;

/// Round a float to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Write one CSV row per allocated variation, plus a totals row.
pub fn write_summary_csv(summary: &CombinedSummary, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "item",
        "target_kg",
        "variation_kg",
        "pouch_size",
        "asin",
        "packets",
        "packed_kg",
    ])?;

    for run in &summary.runs {
        for r in &run.results {
            wtr.write_record([
                run.item.clone(),
                run.target_weight.to_string(),
                r.weight.to_string(),
                r.pouch_size.clone().unwrap_or_default(),
                r.asin.clone().unwrap_or_default(),
                r.packets.to_string(),
                format!("{:.2}", r.packed_weight),
            ])?;
        }
    }

    wtr.write_record([
        "TOTAL".to_string(),
        format!("{:.2}", summary.total_target()),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        format!("{:.2}", summary.total_packed),
    ])?;

    wtr.flush()?;
    Ok(())
}

/// Write the session summary as JSON for the report renderer.
pub fn write_summary_json(summary: &CombinedSummary, path: &Path) -> Result<()> {
    let json = serde_json::json!({
        "date": Local::now().format("%d-%m-%Y").to_string(),
        "items": summary.runs.iter().map(|run| {
            serde_json::json!({
                "item": run.item,
                "target_weight": run.target_weight,
                "packed_weight": truncate(run.packed_weight(), 2),
                "loose_weight": truncate(run.loose_weight(), 2),
                "outcome": run.outcome,
                "variations": run.results,
            })
        }).collect::<Vec<_>>(),
        "total_packed": truncate(summary.total_packed, 2),
        "total_loose": truncate(summary.total_loose, 2),
    });

    fs::write(path, serde_json::to_string_pretty(&json)?)?;
    Ok(())
}
