use std::path::PathBuf;

use packing_plan_rs::error::PackError;
use packing_plan_rs::report::{parse_report, read_csv, read_table};

/// Same table as `fixtures/sales_report.xlsx`, numbers stored as numbers
/// in the workbook.
const SALES_REPORT_CSV: &str = "\
Row Labels,Sum of Units Ordered,Pouch Size,ASIN
Roasted Makhana,,,
0.25,40,Small,B0MAK025
0.5,10,Medium,
,,,
1,4,Large,B0MAK1000
Grand Total,,,
";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_workbook_matches_csv() {
    let from_workbook = read_table(fixture("sales_report.xlsx")).unwrap();
    let from_csv = read_csv(SALES_REPORT_CSV.as_bytes()).unwrap();

    assert_eq!(from_workbook, from_csv);
}

#[test]
fn test_workbook_numeric_labels_are_variations() {
    let rows = read_table(fixture("sales_report.xlsx")).unwrap();
    assert_eq!(rows[3].label, "1");
    assert_eq!(rows[3].line, 5);

    let report = parse_report(&rows);
    assert!(report.skipped.is_empty());
    assert_eq!(report.category_names(), vec!["Roasted Makhana", "Grand Total"]);

    let makhana = report.category("Roasted Makhana").unwrap();
    assert_eq!(makhana.variations.len(), 3);
    assert_eq!(makhana.total_weight_sold, 19.0);
    assert_eq!(makhana.variations[2].asin.as_deref(), Some("B0MAK1000"));
}

#[test]
fn test_workbook_without_header_row() {
    let err = read_table(fixture("empty_sheet.xlsx")).unwrap_err();
    assert!(matches!(err, PackError::Spreadsheet(ref msg) if msg.contains("no header row")));
}
