//! FILENAME: persistence/src/schema.rs
//! Header mapping and cell parsing shared by the XLSX and CSV readers.

use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::error::PersistenceError;

// ============================================================================
// COLUMN MAP
// ============================================================================

/// Positions of the required columns within a header row.
///
/// Extra columns in the source file are ignored; a missing required column
/// fails the load.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMap {
    pub order_date: usize,
    pub region: usize,
    pub state: usize,
    pub category: usize,
    pub sub_category: usize,
    pub product_name: usize,
    pub sales: usize,
    pub quantity: usize,
    pub profit: usize,
    pub discount: usize,
}

impl ColumnMap {
    /// Resolves the canonical column names against a header row.
    /// Matching is exact after trimming surrounding whitespace.
    pub fn from_headers(headers: &[String]) -> Result<Self, PersistenceError> {
        let find = |name: &'static str| -> Result<usize, PersistenceError> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(PersistenceError::MissingColumn(name))
        };

        Ok(ColumnMap {
            order_date: find("Order Date")?,
            region: find("Region")?,
            state: find("State")?,
            category: find("Category")?,
            sub_category: find("Sub-Category")?,
            product_name: find("Product Name")?,
            sales: find("Sales")?,
            quantity: find("Quantity")?,
            profit: find("Profit")?,
            discount: find("Discount")?,
        })
    }
}

// ============================================================================
// CELL PARSING
// ============================================================================

/// Excel serial day 0 is 1899-12-30 (the 1900 leap-year bug is baked into
/// the epoch, not handled per-date).
fn excel_epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
}

/// Converts an Excel serial date number to a calendar date.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    excel_epoch()?.checked_add_days(Days::new(serial.trunc() as u64))
}

/// Parses a date from text in the formats the source data actually uses.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%m/%d/%Y") {
        return Some(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime.date());
        }
    }
    None
}

/// Parses a numeric cell from text.
pub fn parse_number_text(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Parses an integer count from text, accepting a whole-number float
/// representation ("3" or "3.0").
pub fn parse_count_text(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(count) = text.parse::<i64>() {
        return Some(count);
    }
    let value = text.parse::<f64>().ok()?;
    if value.fract() == 0.0 {
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_map_resolves_out_of_order_headers() {
        let headers: Vec<String> = [
            "Row ID",
            "Region",
            "State",
            "Order Date",
            "Category",
            "Sub-Category",
            "Product Name",
            "Sales",
            "Quantity",
            "Discount",
            "Profit",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let map = ColumnMap::from_headers(&headers).unwrap();
        assert_eq!(map.order_date, 3);
        assert_eq!(map.region, 1);
        assert_eq!(map.profit, 10);
    }

    #[test]
    fn column_map_reports_missing_column() {
        let headers: Vec<String> = ["Order Date", "Region"].iter().map(|s| s.to_string()).collect();
        let err = ColumnMap::from_headers(&headers).unwrap_err();
        assert!(matches!(err, PersistenceError::MissingColumn("State")));
    }

    #[test]
    fn excel_serial_matches_known_dates() {
        // 2023-01-01 is serial 44927.
        assert_eq!(
            excel_serial_to_date(44927.0),
            NaiveDate::from_ymd_opt(2023, 1, 1)
        );
        // Time-of-day fractions are dropped.
        assert_eq!(
            excel_serial_to_date(44927.75),
            NaiveDate::from_ymd_opt(2023, 1, 1)
        );
        assert_eq!(excel_serial_to_date(-1.0), None);
    }

    #[test]
    fn date_text_accepts_common_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 3, 14);
        assert_eq!(parse_date_text("2023-03-14"), expected);
        assert_eq!(parse_date_text("03/14/2023"), expected);
        assert_eq!(parse_date_text("2023-03-14T00:00:00"), expected);
        assert_eq!(parse_date_text("not a date"), None);
    }

    #[test]
    fn count_text_accepts_whole_floats() {
        assert_eq!(parse_count_text("3"), Some(3));
        assert_eq!(parse_count_text("3.0"), Some(3));
        assert_eq!(parse_count_text("3.5"), None);
    }
}
