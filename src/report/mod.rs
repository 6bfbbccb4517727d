pub mod parser;
pub mod reader;

pub use parser::{is_numeric_label, parse_report, round_contribution, ParsedReport};
pub use reader::{read_csv, read_table, read_workbook, rows_from_records};
