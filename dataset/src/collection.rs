//! FILENAME: dataset/src/collection.rs
//! The immutable dataset collection and the cascade dimensions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

// ============================================================================
// DIMENSIONS
// ============================================================================

/// The four categorical filter dimensions, in cascade order.
///
/// The order matters: each dimension's candidate options are derived from
/// the dataset already narrowed by the dimensions before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Region,
    State,
    Category,
    SubCategory,
}

impl Dimension {
    /// All dimensions in cascade order (region -> state -> category -> sub-category).
    pub const CASCADE: [Dimension; 4] = [
        Dimension::Region,
        Dimension::State,
        Dimension::Category,
        Dimension::SubCategory,
    ];

    /// The source column name for this dimension.
    pub fn column_name(&self) -> &'static str {
        match self {
            Dimension::Region => "Region",
            Dimension::State => "State",
            Dimension::Category => "Category",
            Dimension::SubCategory => "Sub-Category",
        }
    }

    /// Reads this dimension's value from a transaction.
    pub fn value<'a>(&self, transaction: &'a Transaction) -> &'a str {
        match self {
            Dimension::Region => &transaction.region,
            Dimension::State => &transaction.state,
            Dimension::Category => &transaction.category,
            Dimension::SubCategory => &transaction.sub_category,
        }
    }
}

// ============================================================================
// DATASET
// ============================================================================

/// An insertion-ordered, immutable collection of transactions.
///
/// Derived datasets (the working dataset after filtering) are always built
/// fresh from an existing one; nothing mutates rows in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    rows: Vec<Transaction>,
}

impl Dataset {
    pub fn new(rows: Vec<Transaction>) -> Self {
        Dataset { rows }
    }

    pub fn empty() -> Self {
        Dataset { rows: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.rows.iter()
    }

    /// Earliest and latest order date, or None for an empty dataset.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut iter = self.rows.iter();
        let first = iter.next()?.order_date;
        let mut min = first;
        let mut max = first;
        for t in iter {
            if t.order_date < min {
                min = t.order_date;
            }
            if t.order_date > max {
                max = t.order_date;
            }
        }
        Some((min, max))
    }

    /// Sorted unique values of one dimension, blanks dropped.
    pub fn unique_values(&self, dimension: Dimension) -> Vec<String> {
        let mut values: Vec<String> = self
            .rows
            .iter()
            .map(|t| dimension.value(t))
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
            .collect();
        values.sort();
        values.dedup();
        values
    }
}

impl FromIterator<Transaction> for Dataset {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Dataset {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: (i32, u32, u32), region: &str, state: &str) -> Transaction {
        Transaction {
            order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            region: region.to_string(),
            state: state.to_string(),
            category: "Furniture".to_string(),
            sub_category: "Chairs".to_string(),
            product_name: "Chair".to_string(),
            sales: 100.0,
            quantity: 1,
            profit: 10.0,
            discount: 0.0,
        }
    }

    #[test]
    fn date_span_finds_min_and_max() {
        let ds = Dataset::new(vec![
            row((2023, 5, 2), "West", "California"),
            row((2023, 1, 14), "East", "New York"),
            row((2023, 9, 30), "West", "Oregon"),
        ]);
        assert_eq!(
            ds.date_span(),
            Some((
                NaiveDate::from_ymd_opt(2023, 1, 14).unwrap(),
                NaiveDate::from_ymd_opt(2023, 9, 30).unwrap()
            ))
        );
    }

    #[test]
    fn date_span_is_none_for_empty() {
        assert_eq!(Dataset::empty().date_span(), None);
    }

    #[test]
    fn unique_values_are_sorted_and_deduped() {
        let ds = Dataset::new(vec![
            row((2023, 1, 1), "West", "Oregon"),
            row((2023, 1, 2), "East", "New York"),
            row((2023, 1, 3), "West", "California"),
        ]);
        assert_eq!(ds.unique_values(Dimension::Region), vec!["East", "West"]);
        assert_eq!(
            ds.unique_values(Dimension::State),
            vec!["California", "New York", "Oregon"]
        );
    }

    #[test]
    fn unique_values_drop_blanks() {
        let ds = Dataset::new(vec![
            row((2023, 1, 1), "", "Oregon"),
            row((2023, 1, 2), "East", "New York"),
        ]);
        assert_eq!(ds.unique_values(Dimension::Region), vec!["East"]);
    }
}
