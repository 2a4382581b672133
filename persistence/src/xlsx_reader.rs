// FILENAME: persistence/src/xlsx_reader.rs

use crate::error::PersistenceError;
use crate::schema::{excel_serial_to_date, parse_date_text, parse_number_text, ColumnMap};
use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::NaiveDate;
use dataset::{Dataset, Transaction};
use std::path::Path;

pub fn load_xlsx(path: &Path) -> Result<Dataset, PersistenceError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    let first_sheet = sheet_names.first().ok_or_else(|| {
        PersistenceError::InvalidFormat("Workbook contains no sheets".to_string())
    })?;

    let range = workbook
        .worksheet_range(first_sheet)
        .map_err(|e| PersistenceError::InvalidFormat(e.to_string()))?;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| PersistenceError::InvalidFormat("Worksheet is empty".to_string()))?;
    let headers: Vec<String> = header_row.iter().map(cell_text).collect();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut transactions = Vec::new();

    for (i, row) in rows.enumerate() {
        // 1-based row number in the sheet, past the header
        let row_number = i + 2;

        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }

        transactions.push(Transaction {
            order_date: read_date(row, columns.order_date, "Order Date", row_number)?,
            region: read_text(row, columns.region),
            state: read_text(row, columns.state),
            category: read_text(row, columns.category),
            sub_category: read_text(row, columns.sub_category),
            product_name: read_text(row, columns.product_name),
            sales: read_number(row, columns.sales, "Sales", row_number)?,
            quantity: read_count(row, columns.quantity, "Quantity", row_number)?,
            profit: read_number(row, columns.profit, "Profit", row_number)?,
            discount: read_number(row, columns.discount, "Discount", row_number)?,
        });
    }

    Ok(Dataset::new(transactions))
}

/// Display text of a cell, used for headers and categorical columns.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => format!("{}", f),
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => format!("{:?}", e),
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

fn read_text(row: &[Data], index: usize) -> String {
    row.get(index).map(cell_text).unwrap_or_default()
}

/// Normalizes the order-date column to a calendar date. Accepts native
/// Excel datetimes, raw serial numbers, and the textual formats the
/// source data uses.
fn read_date(
    row: &[Data],
    index: usize,
    column: &'static str,
    row_number: usize,
) -> Result<NaiveDate, PersistenceError> {
    let cell = row.get(index).unwrap_or(&Data::Empty);

    let parsed = match cell {
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64()),
        Data::Float(f) => excel_serial_to_date(*f),
        Data::Int(i) => excel_serial_to_date(*i as f64),
        Data::String(s) => parse_date_text(s),
        Data::DateTimeIso(s) => parse_date_text(s),
        _ => None,
    };

    parsed.ok_or_else(|| PersistenceError::InvalidCell {
        row: row_number,
        column,
        detail: format!("not a date: {:?}", cell_text(cell)),
    })
}

fn read_number(
    row: &[Data],
    index: usize,
    column: &'static str,
    row_number: usize,
) -> Result<f64, PersistenceError> {
    let cell = row.get(index).unwrap_or(&Data::Empty);

    let parsed = match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => parse_number_text(s),
        _ => None,
    };

    parsed.ok_or_else(|| PersistenceError::InvalidCell {
        row: row_number,
        column,
        detail: format!("not a number: {:?}", cell_text(cell)),
    })
}

fn read_count(
    row: &[Data],
    index: usize,
    column: &'static str,
    row_number: usize,
) -> Result<i64, PersistenceError> {
    let cell = row.get(index).unwrap_or(&Data::Empty);

    let parsed = match cell {
        Data::Int(i) => Some(*i),
        Data::Float(f) if f.fract() == 0.0 => Some(*f as i64),
        Data::String(s) => crate::schema::parse_count_text(s),
        _ => None,
    };

    parsed.ok_or_else(|| PersistenceError::InvalidCell {
        row: row_number,
        column,
        detail: format!("not a whole number: {:?}", cell_text(cell)),
    })
}
