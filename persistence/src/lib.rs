//! FILENAME: persistence/src/lib.rs
//! Storeboard Persistence Module
//!
//! Handles loading the sales dataset from XLSX or CSV files and exporting
//! the working dataset back to CSV. Loading is a pure function of the
//! path; memoization lives in `dataset::DatasetCache`.

mod csv_reader;
mod csv_writer;
mod error;
mod schema;
mod xlsx_reader;

pub use csv_reader::{load_csv, read_csv};
pub use csv_writer::{write_csv, EXPORT_FILE_NAME};
pub use error::PersistenceError;
pub use xlsx_reader::load_xlsx;

use dataset::Dataset;
use std::path::Path;

/// Loads the source dataset, picking the reader by file extension.
///
/// The spreadsheet readers validate the schema: every required column
/// must be present in the header row, and the order-date column is
/// normalized to a calendar date. A missing or unreadable file fails
/// with an access error before any parsing starts.
pub fn load(path: &Path) -> Result<Dataset, PersistenceError> {
    // Surface missing/unreadable files as access errors rather than
    // format errors from deep inside a reader.
    std::fs::metadata(path)?;

    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("csv") => load_csv(path),
        _ => load_xlsx(path),
    }
}
