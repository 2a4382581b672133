//! FILENAME: persistence/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XLSX read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("Required column missing: {0}")]
    MissingColumn(&'static str),

    #[error("Row {row}, column {column}: {detail}")]
    InvalidCell {
        row: usize,
        column: &'static str,
        detail: String,
    },
}

impl PersistenceError {
    /// True for errors caused by the file's shape rather than by access to
    /// it (the schema-error half of the load failure taxonomy).
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            PersistenceError::InvalidFormat(_)
                | PersistenceError::MissingColumn(_)
                | PersistenceError::InvalidCell { .. }
        )
    }
}
