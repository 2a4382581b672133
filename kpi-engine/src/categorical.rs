//! FILENAME: kpi-engine/src/categorical.rs
//! Categorical Aggregators - per-dimension group-by reductions.
//!
//! Each aggregator is a pure group-by over the working dataset. Groups
//! keep first-seen (insertion) order before any explicit sort, which is
//! what makes the top-N ranking's tie-break stable.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::cmp::Ordering;

use dataset::{Dataset, Metric};

/// How many products the ranking panel shows.
pub const TOP_PRODUCT_LIMIT: usize = 10;

// ============================================================================
// TOP PRODUCTS
// ============================================================================

/// Aggregates for one product across the working dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub product_name: String,
    pub sales: f64,
    pub quantity: i64,
    pub profit: f64,
    pub avg_discount: f64,
    pub margin_rate: f64,
}

impl ProductSummary {
    /// The value used when ranking by `metric`.
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Sales => self.sales,
            Metric::Quantity => self.quantity as f64,
            Metric::Profit => self.profit,
            Metric::MarginRate => self.margin_rate,
            Metric::AvgDiscount => self.avg_discount,
        }
    }
}

/// Groups by product name, ranks descending by the selected metric, and
/// keeps the first `limit` entries. The sort is stable: ties retain the
/// order products first appear in the data.
pub fn top_products(working: &Dataset, metric: Metric, limit: usize) -> Vec<ProductSummary> {
    #[derive(Default)]
    struct Accumulator {
        sales: f64,
        quantity: i64,
        profit: f64,
        discount_sum: f64,
        count: u64,
    }

    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut order: Vec<&str> = Vec::new();
    let mut groups: Vec<Accumulator> = Vec::new();

    for t in working {
        let slot = *index.entry(t.product_name.as_str()).or_insert_with(|| {
            order.push(t.product_name.as_str());
            groups.push(Accumulator::default());
            groups.len() - 1
        });
        let acc = &mut groups[slot];
        acc.sales += t.sales;
        acc.quantity += t.quantity;
        acc.profit += t.profit;
        acc.discount_sum += t.discount;
        acc.count += 1;
    }

    let mut summaries: Vec<ProductSummary> = order
        .into_iter()
        .zip(groups)
        .map(|(name, acc)| ProductSummary {
            product_name: name.to_string(),
            sales: acc.sales,
            quantity: acc.quantity,
            profit: acc.profit,
            avg_discount: if acc.count > 0 {
                acc.discount_sum / acc.count as f64
            } else {
                0.0
            },
            margin_rate: if acc.sales != 0.0 {
                acc.profit / acc.sales
            } else {
                0.0
            },
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.metric(metric)
            .partial_cmp(&a.metric(metric))
            .unwrap_or(Ordering::Equal)
    });
    summaries.truncate(limit);
    summaries
}

// ============================================================================
// SINGLE-MEASURE BREAKDOWNS
// ============================================================================

/// Summed sales per region, in first-seen order (donut panel).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSales {
    pub region: String,
    pub sales: f64,
}

pub fn sales_by_region(working: &Dataset) -> Vec<RegionSales> {
    group_sum(working, |t| t.region.as_str(), |t| t.sales)
        .into_iter()
        .map(|(region, sales)| RegionSales { region, sales })
        .collect()
}

/// Summed profit per category, sorted descending (bar panel).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryProfit {
    pub category: String,
    pub profit: f64,
}

pub fn profit_by_category(working: &Dataset) -> Vec<CategoryProfit> {
    let mut rows: Vec<CategoryProfit> = group_sum(working, |t| t.category.as_str(), |t| t.profit)
        .into_iter()
        .map(|(category, profit)| CategoryProfit { category, profit })
        .collect();
    rows.sort_by(|a, b| b.profit.partial_cmp(&a.profit).unwrap_or(Ordering::Equal));
    rows
}

/// Summed sales per sub-category, in first-seen order (treemap panel).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubCategorySales {
    pub sub_category: String,
    pub sales: f64,
}

pub fn sales_by_sub_category(working: &Dataset) -> Vec<SubCategorySales> {
    group_sum(working, |t| t.sub_category.as_str(), |t| t.sales)
        .into_iter()
        .map(|(sub_category, sales)| SubCategorySales { sub_category, sales })
        .collect()
}

/// Insertion-ordered group-by-and-sum over one key and one measure.
fn group_sum<'a>(
    working: &'a Dataset,
    key: impl Fn(&'a dataset::Transaction) -> &'a str,
    measure: impl Fn(&dataset::Transaction) -> f64,
) -> Vec<(String, f64)> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut groups: Vec<(String, f64)> = Vec::new();

    for t in working {
        let k = key(t);
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push((k.to_string(), 0.0));
            groups.len() - 1
        });
        groups[slot].1 += measure(t);
    }

    groups
}

// ============================================================================
// DISCOUNT vs MARGIN
// ============================================================================

/// One scatter point per transaction: no aggregation, sales and profit
/// carried along for hover detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscountMarginPoint {
    pub discount: f64,
    pub margin: f64,
    pub category: String,
    pub sales: f64,
    pub profit: f64,
}

pub fn discount_margin_points(working: &Dataset) -> Vec<DiscountMarginPoint> {
    working
        .iter()
        .map(|t| DiscountMarginPoint {
            discount: t.discount,
            margin: t.margin(),
            category: t.category.clone(),
            sales: t.sales,
            profit: t.profit,
        })
        .collect()
}
