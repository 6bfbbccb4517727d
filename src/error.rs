use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("Malformed row {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("Invalid variation in {category}: weight per packet must be positive, got {weight}")]
    InvalidVariation { category: String, weight: f64 },

    #[error("Too many packets for {weight} kg in {category}: {packets:.0} needed")]
    TooManyPackets {
        category: String,
        weight: f64,
        packets: f64,
    },

    #[error("Invalid target weight: {0} (must be a positive number of kg)")]
    InvalidTarget(f64),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Unsupported file format: {0} (expected .csv, .xlsx or .xls)")]
    UnsupportedFormat(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("No packing plan uploaded yet")]
    NoReport,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PackError>;
