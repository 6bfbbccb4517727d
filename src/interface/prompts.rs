use dialoguer::{Input, MultiSelect};

use crate::error::{PackError, Result};
use crate::planner::constants::{DEFAULT_TARGET_WEIGHT, MIN_TARGET_WEIGHT};
use crate::planner::PackRequest;
use crate::report::ParsedReport;

/// Parse a target weight typed by the user.
pub fn parse_target_weight(input: &str) -> Result<f64> {
    let weight: f64 = input
        .trim()
        .parse()
        .map_err(|_| PackError::InvalidInput(format!("'{}' is not a number", input.trim())))?;

    if !weight.is_finite() || weight < MIN_TARGET_WEIGHT {
        return Err(PackError::InvalidInput(format!(
            "Target weight must be at least {} kg",
            MIN_TARGET_WEIGHT
        )));
    }

    Ok(weight)
}

/// Prompt for the weight to pack for one item.
pub fn prompt_target_weight(item: &str) -> Result<f64> {
    loop {
        let input: String = Input::new()
            .with_prompt(format!("Enter weight to pack for {} (kg)", item))
            .default(DEFAULT_TARGET_WEIGHT.to_string())
            .interact_text()?;

        match parse_target_weight(&input) {
            Ok(weight) => return Ok(weight),
            Err(e) => println!("{}", e),
        }
    }
}

/// Prompt for the items to pack.
pub fn prompt_items(report: &ParsedReport) -> Result<Vec<String>> {
    let names = report.category_names();
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let selection = MultiSelect::new()
        .with_prompt("Select items to pack (space to toggle, enter to confirm)")
        .items(&names)
        .interact()?;

    Ok(selection.into_iter().map(|i| names[i].to_string()).collect())
}

/// Collect items and target weights interactively.
pub fn collect_pack_requests(report: &ParsedReport) -> Result<Vec<PackRequest>> {
    let items = prompt_items(report)?;

    let mut requests = Vec::with_capacity(items.len());
    for item in items {
        let weight = prompt_target_weight(&item)?;
        requests.push(PackRequest::new(item, weight));
    }

    Ok(requests)
}
