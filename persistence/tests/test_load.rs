//! FILENAME: tests/test_load.rs
//! Integration tests for dataset loading and export.

use chrono::NaiveDate;
use dataset::{Dataset, Transaction};
use persistence::{load, write_csv, PersistenceError};
use rust_xlsxwriter::Workbook;
use std::path::Path;

// ============================================================================
// FIXTURES
// ============================================================================

const HEADERS: [&str; 10] = [
    "Order Date",
    "Region",
    "State",
    "Category",
    "Sub-Category",
    "Product Name",
    "Sales",
    "Quantity",
    "Profit",
    "Discount",
];

/// Writes a small XLSX workbook with the canonical schema. The first data
/// row carries a textual date, the second a raw Excel serial, so both
/// normalization paths get exercised.
fn write_fixture_xlsx(path: &Path) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }

    // Row 1: date as text
    worksheet.write_string(1, 0, "2023-01-01").unwrap();
    worksheet.write_string(1, 1, "West").unwrap();
    worksheet.write_string(1, 2, "California").unwrap();
    worksheet.write_string(1, 3, "Furniture").unwrap();
    worksheet.write_string(1, 4, "Chairs").unwrap();
    worksheet.write_string(1, 5, "Desk Chair").unwrap();
    worksheet.write_number(1, 6, 100.0).unwrap();
    worksheet.write_number(1, 7, 2.0).unwrap();
    worksheet.write_number(1, 8, 10.0).unwrap();
    worksheet.write_number(1, 9, 0.1).unwrap();

    // Row 2: date as Excel serial (44928 = 2023-01-02)
    worksheet.write_number(2, 0, 44928.0).unwrap();
    worksheet.write_string(2, 1, "East").unwrap();
    worksheet.write_string(2, 2, "New York").unwrap();
    worksheet.write_string(2, 3, "Technology").unwrap();
    worksheet.write_string(2, 4, "Phones").unwrap();
    worksheet.write_string(2, 5, "Smartphone").unwrap();
    worksheet.write_number(2, 6, 200.0).unwrap();
    worksheet.write_number(2, 7, 1.0).unwrap();
    worksheet.write_number(2, 8, 20.0).unwrap();
    worksheet.write_number(2, 9, 0.0).unwrap();

    workbook.save(path).unwrap();
}

fn sample_dataset() -> Dataset {
    let row = |day: u32, region: &str, product: &str, sales: f64, profit: f64| Transaction {
        order_date: NaiveDate::from_ymd_opt(2023, 1, day).unwrap(),
        region: region.to_string(),
        state: "California".to_string(),
        category: "Furniture".to_string(),
        sub_category: "Chairs".to_string(),
        product_name: product.to_string(),
        sales,
        quantity: 3,
        profit,
        discount: 0.2,
    };
    Dataset::new(vec![
        row(1, "West", "Desk Chair", 261.96, 41.91),
        row(2, "East", "Folding Chair", 73.94, -11.53),
    ])
}

// ============================================================================
// XLSX LOADING
// ============================================================================

#[test]
fn test_load_xlsx_normalizes_dates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales.xlsx");
    write_fixture_xlsx(&path);

    let ds = load(&path).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(
        ds.rows()[0].order_date,
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
    );
    assert_eq!(
        ds.rows()[1].order_date,
        NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
    );
    assert_eq!(ds.rows()[1].sales, 200.0);
    assert_eq!(ds.rows()[0].quantity, 2);
}

#[test]
fn test_load_missing_file_is_an_access_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does_not_exist.xlsx");

    match load(&path) {
        Err(PersistenceError::Io(_)) => {}
        other => panic!("expected an IO error, got {other:?}"),
    }
}

#[test]
fn test_load_missing_column_is_a_schema_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad_schema.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    // Header row lacks everything past "Region"
    worksheet.write_string(0, 0, "Order Date").unwrap();
    worksheet.write_string(0, 1, "Region").unwrap();
    workbook.save(&path).unwrap();

    let err = load(&path).unwrap_err();
    assert!(err.is_schema_error(), "got {err:?}");
    assert!(matches!(err, PersistenceError::MissingColumn("State")));
}

#[test]
fn test_load_bad_date_cell_reports_position() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad_cell.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }
    worksheet.write_string(1, 0, "not a date").unwrap();
    worksheet.write_string(1, 1, "West").unwrap();
    worksheet.write_number(1, 6, 1.0).unwrap();
    worksheet.write_number(1, 7, 1.0).unwrap();
    worksheet.write_number(1, 8, 1.0).unwrap();
    worksheet.write_number(1, 9, 0.0).unwrap();
    workbook.save(&path).unwrap();

    match load(&path).unwrap_err() {
        PersistenceError::InvalidCell { row, column, .. } => {
            assert_eq!(row, 2);
            assert_eq!(column, "Order Date");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ============================================================================
// CSV ROUND TRIP
// ============================================================================

#[test]
fn test_csv_export_round_trips_exactly() {
    let original = sample_dataset();

    let bytes = write_csv(&original).unwrap();
    let reloaded = persistence::read_csv(bytes.as_slice()).unwrap();

    assert_eq!(reloaded, original);
}

#[test]
fn test_csv_file_load_through_dispatcher() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales.csv");

    let bytes = write_csv(&sample_dataset()).unwrap();
    std::fs::write(&path, bytes).unwrap();

    let ds = load(&path).unwrap();
    assert_eq!(ds, sample_dataset());
}
