// FILENAME: persistence/src/csv_writer.rs

use crate::error::PersistenceError;
use dataset::{Dataset, COLUMNS};

/// Default filename offered for the working-dataset download.
pub const EXPORT_FILE_NAME: &str = "filtered_superstore_data.csv";

/// Serializes a dataset to UTF-8, comma-delimited CSV with a header row
/// and no index column. Dates are written as `%Y-%m-%d`; numerics use
/// their shortest round-trip representation, so `read_csv` restores the
/// exact values.
pub fn write_csv(dataset: &Dataset) -> Result<Vec<u8>, PersistenceError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(COLUMNS)?;

    for t in dataset {
        writer.write_record(&[
            t.order_date.format("%Y-%m-%d").to_string(),
            t.region.clone(),
            t.state.clone(),
            t.category.clone(),
            t.sub_category.clone(),
            t.product_name.clone(),
            t.sales.to_string(),
            t.quantity.to_string(),
            t.profit.to_string(),
            t.discount.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| PersistenceError::Csv(e.into_error().into()))
}
