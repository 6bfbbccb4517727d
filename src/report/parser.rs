use strsim::jaro_winkler;
use tracing::warn;

use crate::error::PackError;
use crate::models::{Category, RawRow, Variation};
use crate::planner::constants::{CONTRIBUTION_DECIMALS, FUZZY_MATCH_THRESHOLD};

/// A parsed sales report: categories in table order plus the rows that were
/// skipped along the way.
#[derive(Debug, Default)]
pub struct ParsedReport {
    pub categories: Vec<Category>,
    pub skipped: Vec<PackError>,
}

impl ParsedReport {
    /// Look up a category by its exact name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Look up a category by a user-typed name.
    ///
    /// Tries an exact match, then a case-insensitive one, then the closest
    /// Jaro-Winkler match above the fuzzy threshold.
    pub fn find_category(&self, query: &str) -> Option<&Category> {
        let query = query.trim();
        if let Some(category) = self.category(query) {
            return Some(category);
        }

        let lowered = query.to_lowercase();
        if let Some(category) = self
            .categories
            .iter()
            .find(|c| c.name.to_lowercase() == lowered)
        {
            return Some(category);
        }

        self.categories
            .iter()
            .map(|c| (c, jaro_winkler(&c.name.to_lowercase(), &lowered)))
            .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(c, _)| c)
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Whether a row label is a packet weight rather than a category name.
///
/// After dropping at most one `.`, the label must be non-empty and made of
/// ASCII digits only. Signs, exponents and whitespace make it a name.
pub fn is_numeric_label(label: &str) -> bool {
    let stripped = label.replacen('.', "", 1);
    !stripped.is_empty() && stripped.bytes().all(|b| b.is_ascii_digit())
}

/// Round to the number of decimals used for contribution percentages.
pub fn round_contribution(value: f64) -> f64 {
    let factor = 10_f64.powi(CONTRIBUTION_DECIMALS);
    (value * factor).round() / factor
}

/// A row after the tagging pass.
#[derive(Debug)]
enum Tagged<'a> {
    Category {
        name: &'a str,
    },
    Variation {
        parent: usize,
        weight: f64,
        units: f64,
        row: &'a RawRow,
    },
}

/// Stage 1: classify every row and bind each variation to its category.
///
/// `parent` is an index into the categories seen so far. Row-local failures
/// are returned alongside and never stop the scan.
fn tag_rows(rows: &[RawRow]) -> (Vec<Tagged<'_>>, Vec<PackError>) {
    let mut tagged = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();
    let mut category_count = 0usize;

    for row in rows {
        if !is_numeric_label(&row.label) {
            tagged.push(Tagged::Category { name: &row.label });
            category_count += 1;
            continue;
        }

        match tag_variation(row, category_count) {
            Ok(t) => tagged.push(t),
            Err(e) => {
                warn!(line = row.line, label = %row.label, "skipping row: {}", e);
                skipped.push(e);
            }
        }
    }

    (tagged, skipped)
}

fn tag_variation(row: &RawRow, category_count: usize) -> Result<Tagged<'_>, PackError> {
    let malformed = |reason: String| PackError::MalformedRow {
        line: row.line,
        reason,
    };

    if category_count == 0 {
        return Err(malformed(format!(
            "variation '{}' appears before any category",
            row.label
        )));
    }

    let weight: f64 = row
        .label
        .parse()
        .map_err(|_| malformed(format!("'{}' is not a packet weight", row.label)))?;

    let units_text = row
        .units
        .as_deref()
        .ok_or_else(|| malformed("units sold is empty".to_string()))?;

    let units: f64 = units_text
        .parse()
        .ok()
        .filter(|u: &f64| u.is_finite())
        .ok_or_else(|| malformed(format!("units sold '{}' is not a number", units_text)))?;

    Ok(Tagged::Variation {
        parent: category_count - 1,
        weight,
        units,
        row,
    })
}

/// Stage 2: group variations under their categories and total the weight
/// sold.
fn build_categories(tagged: &[Tagged<'_>]) -> Vec<Category> {
    let mut categories: Vec<Category> = tagged
        .iter()
        .filter_map(|t| match t {
            Tagged::Category { name } => Some(Category {
                name: name.to_string(),
                total_weight_sold: 0.0,
                variations: Vec::new(),
            }),
            Tagged::Variation { .. } => None,
        })
        .collect();

    for t in tagged {
        if let Tagged::Variation {
            parent,
            weight,
            units,
            row,
        } = t
        {
            categories[*parent].variations.push(Variation {
                weight: *weight,
                units_sold: *units,
                weight_sold: weight * units,
                pouch_size: row.pouch_size.clone(),
                asin: row.asin.clone(),
                contribution: None,
            });
        }
    }

    categories
        .into_iter()
        .map(|c| Category {
            total_weight_sold: c.variations.iter().map(|v| v.weight_sold).sum(),
            ..c
        })
        .collect()
}

/// Stage 3: derive each variation's share of its category's weight sold.
fn with_contributions(category: Category) -> Category {
    let total = category.total_weight_sold;
    let variations = category
        .variations
        .into_iter()
        .map(|v| Variation {
            contribution: (total != 0.0).then(|| round_contribution(v.weight_sold / total * 100.0)),
            ..v
        })
        .collect();

    Category {
        variations,
        ..category
    }
}

/// Parse a flat sales report into categories with contribution shares.
pub fn parse_report(rows: &[RawRow]) -> ParsedReport {
    let (tagged, skipped) = tag_rows(rows);

    let categories = build_categories(&tagged)
        .into_iter()
        .map(with_contributions)
        .collect();

    ParsedReport {
        categories,
        skipped,
    }
}
