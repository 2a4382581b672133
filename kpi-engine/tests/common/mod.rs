//! FILENAME: tests/common/mod.rs
//! Shared fixtures for kpi-engine integration tests.

use chrono::NaiveDate;
use dataset::{Dataset, Transaction};

/// Deterministic sales data covering several regions, states, categories,
/// and months.
pub struct SalesFixture;

impl SalesFixture {
    /// (date, region, state, category, sub-category, product, sales,
    /// quantity, profit, discount)
    #[allow(clippy::type_complexity)]
    pub fn data() -> Vec<(
        (i32, u32, u32),
        &'static str,
        &'static str,
        &'static str,
        &'static str,
        &'static str,
        f64,
        i64,
        f64,
        f64,
    )> {
        vec![
            ((2023, 1, 5), "West", "California", "Furniture", "Chairs", "Desk Chair", 261.96, 2, 41.91, 0.0),
            ((2023, 1, 18), "West", "California", "Technology", "Phones", "Smartphone", 907.15, 3, 90.72, 0.2),
            ((2023, 1, 27), "West", "Oregon", "Furniture", "Tables", "Oak Table", 731.94, 1, -87.83, 0.3),
            ((2023, 2, 2), "East", "New York", "Furniture", "Chairs", "Folding Chair", 73.94, 4, 11.83, 0.0),
            ((2023, 2, 14), "East", "New York", "Office Supplies", "Binders", "Ring Binder", 14.62, 2, 6.87, 0.0),
            ((2023, 2, 21), "East", "Pennsylvania", "Technology", "Phones", "Smartphone", 911.42, 2, -45.57, 0.4),
            ((2023, 3, 3), "Central", "Texas", "Office Supplies", "Paper", "Copy Paper", 29.47, 3, 13.86, 0.2),
            ((2023, 3, 12), "Central", "Texas", "Furniture", "Tables", "Oak Table", 957.58, 2, 114.91, 0.0),
            ((2023, 3, 24), "Central", "Illinois", "Office Supplies", "Binders", "Ring Binder", 8.56, 1, 2.48, 0.2),
            ((2023, 4, 8), "South", "Florida", "Technology", "Accessories", "Keyboard", 90.48, 2, 24.43, 0.0),
            ((2023, 4, 19), "South", "Florida", "Furniture", "Chairs", "Desk Chair", 212.06, 1, 55.14, 0.0),
            ((2023, 4, 29), "South", "Georgia", "Office Supplies", "Paper", "Copy Paper", 15.55, 1, 7.15, 0.0),
        ]
    }

    pub fn dataset() -> Dataset {
        Self::data()
            .into_iter()
            .map(
                |(date, region, state, category, sub_category, product, sales, quantity, profit, discount)| {
                    Transaction {
                        order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
                        region: region.to_string(),
                        state: state.to_string(),
                        category: category.to_string(),
                        sub_category: sub_category.to_string(),
                        product_name: product.to_string(),
                        sales,
                        quantity,
                        profit,
                        discount,
                    }
                },
            )
            .collect()
    }
}
