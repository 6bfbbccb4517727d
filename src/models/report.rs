use serde::{Deserialize, Serialize};

/// One data row of the sales report, as read from the table.
///
/// Values are kept as text; the report parser decides whether the label is
/// a category name or a packet weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    /// 1-based data row number (header excluded).
    pub line: usize,

    /// `Row Labels`: a category name or a packet weight in kg.
    pub label: String,

    /// `Sum of Units Ordered`, blank cells as `None`.
    pub units: Option<String>,

    pub pouch_size: Option<String>,

    pub asin: Option<String>,
}

impl RawRow {
    pub fn new(line: usize, label: &str, units: Option<&str>) -> Self {
        Self {
            line,
            label: label.trim().to_string(),
            units: units.map(|u| u.trim().to_string()),
            pouch_size: None,
            asin: None,
        }
    }

    /// Attach pouch size and ASIN columns.
    pub fn with_details(mut self, pouch_size: Option<&str>, asin: Option<&str>) -> Self {
        self.pouch_size = non_blank(pouch_size);
        self.asin = non_blank(asin);
        self
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// One packet-size option within a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    /// Weight per packet in kg.
    pub weight: f64,

    /// Historical units sold.
    pub units_sold: f64,

    /// `weight * units_sold`, in kg.
    pub weight_sold: f64,

    pub pouch_size: Option<String>,

    pub asin: Option<String>,

    /// Share of the category's weight sold, in percent (2 decimals).
    /// `None` when the category sold nothing.
    pub contribution: Option<f64>,
}

/// A product family and its packet-size variations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,

    /// Sum of the variations' weight sold, in kg.
    pub total_weight_sold: f64,

    pub variations: Vec<Variation>,
}

impl Category {
    /// A category with no weight sold has no usable sales mix.
    pub fn is_degenerate(&self) -> bool {
        self.total_weight_sold == 0.0
    }

    /// Sum of contribution percentages (0 when degenerate).
    pub fn contribution_total(&self) -> f64 {
        self.variations.iter().filter_map(|v| v.contribution).sum()
    }
}
