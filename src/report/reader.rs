use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;

use crate::error::{PackError, Result};
use crate::models::RawRow;

pub const LABEL_COLUMN: &str = "Row Labels";
pub const UNITS_COLUMN: &str = "Sum of Units Ordered";
pub const POUCH_SIZE_COLUMN: &str = "Pouch Size";
pub const ASIN_COLUMN: &str = "ASIN";

/// Column positions resolved from a header row.
struct ColumnMap {
    label: usize,
    units: usize,
    pouch_size: Option<usize>,
    asin: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &[String]) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        Ok(Self {
            label: find(LABEL_COLUMN)
                .ok_or_else(|| PackError::MissingColumn(LABEL_COLUMN.to_string()))?,
            units: find(UNITS_COLUMN)
                .ok_or_else(|| PackError::MissingColumn(UNITS_COLUMN.to_string()))?,
            pouch_size: find(POUCH_SIZE_COLUMN),
            asin: find(ASIN_COLUMN),
        })
    }

    fn row(&self, line: usize, cells: &[String]) -> RawRow {
        let cell = |idx: usize| cells.get(idx).map(String::as_str);
        let units = cell(self.units).filter(|u| !u.trim().is_empty());

        RawRow::new(line, cell(self.label).unwrap_or(""), units)
            .with_details(self.pouch_size.and_then(cell), self.asin.and_then(cell))
    }
}

/// Build raw rows from a header row and data records.
///
/// Completely blank records are skipped but still count toward line numbers.
pub fn rows_from_records<I>(headers: &[String], records: I) -> Result<Vec<RawRow>>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let columns = ColumnMap::from_headers(headers)?;

    let rows = records
        .into_iter()
        .enumerate()
        .filter(|(_, cells)| cells.iter().any(|c| !c.trim().is_empty()))
        .map(|(idx, cells)| columns.row(idx + 1, &cells))
        .collect();

    Ok(rows)
}

/// Read a CSV report from any reader.
pub fn read_csv<R: Read>(source: R) -> Result<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect());
    }

    rows_from_records(&headers, records)
}

/// Read the first worksheet of an Excel workbook.
pub fn read_workbook(path: &Path) -> Result<Vec<RawRow>> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| PackError::Spreadsheet(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| PackError::Spreadsheet("workbook has no worksheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| PackError::Spreadsheet(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| PackError::Spreadsheet("worksheet has no header row".to_string()))?
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let records = rows.map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>());

    rows_from_records(&headers, records)
}

/// Read a report table, choosing the format from the file extension.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => read_csv(File::open(path)?),
        "xlsx" | "xls" => read_workbook(path),
        _ => Err(PackError::UnsupportedFormat(ext)),
    }
}
