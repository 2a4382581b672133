//! FILENAME: dataset/src/transaction.rs
//! One order line item from the sales dataset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical column names of the source spreadsheet, in export order.
pub const COLUMNS: [&str; 10] = [
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

/// A single transaction (order line item).
///
/// Profit is signed: a discounted sale can lose money. Discount is a
/// fraction in `[0, 1]`, not a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub order_date: NaiveDate,
    pub region: String,
    pub state: String,
    pub category: String,
    pub sub_category: String,
    pub product_name: String,
    pub sales: f64,
    pub quantity: i64,
    pub profit: f64,
    pub discount: f64,
}

impl Transaction {
    /// Per-line margin: profit over sales, defined as 0 when sales is 0.
    pub fn margin(&self) -> f64 {
        if self.sales != 0.0 {
            self.profit / self.sales
        } else {
            0.0
        }
    }
}
