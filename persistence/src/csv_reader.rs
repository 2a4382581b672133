// FILENAME: persistence/src/csv_reader.rs

use crate::error::PersistenceError;
use crate::schema::{parse_count_text, parse_date_text, parse_number_text, ColumnMap};
use dataset::{Dataset, Transaction};
use std::fs::File;
use std::io;
use std::path::Path;

pub fn load_csv(path: &Path) -> Result<Dataset, PersistenceError> {
    let file = File::open(path)?;
    read_csv(file)
}

/// Parses a dataset from CSV with the canonical header row. The format
/// mirrors what `write_csv` produces, so an exported working dataset
/// loads back unchanged.
pub fn read_csv<R: io::Read>(input: R) -> Result<Dataset, PersistenceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut transactions = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        // 1-based row number, past the header
        let row_number = i + 2;
        let field = |index: usize| record.get(index).unwrap_or("");

        let invalid = |column: &'static str, value: &str| PersistenceError::InvalidCell {
            row: row_number,
            column,
            detail: format!("cannot parse {:?}", value),
        };

        let date_text = field(columns.order_date);
        let sales_text = field(columns.sales);
        let quantity_text = field(columns.quantity);
        let profit_text = field(columns.profit);
        let discount_text = field(columns.discount);

        transactions.push(Transaction {
            order_date: parse_date_text(date_text)
                .ok_or_else(|| invalid("Order Date", date_text))?,
            region: field(columns.region).to_string(),
            state: field(columns.state).to_string(),
            category: field(columns.category).to_string(),
            sub_category: field(columns.sub_category).to_string(),
            product_name: field(columns.product_name).to_string(),
            sales: parse_number_text(sales_text).ok_or_else(|| invalid("Sales", sales_text))?,
            quantity: parse_count_text(quantity_text)
                .ok_or_else(|| invalid("Quantity", quantity_text))?,
            profit: parse_number_text(profit_text)
                .ok_or_else(|| invalid("Profit", profit_text))?,
            discount: parse_number_text(discount_text)
                .ok_or_else(|| invalid("Discount", discount_text))?,
        });
    }

    Ok(Dataset::new(transactions))
}
