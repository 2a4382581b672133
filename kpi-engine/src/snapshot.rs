//! FILENAME: kpi-engine/src/snapshot.rs
//! One full dashboard recomputation pass.
//!
//! Each aggregator stays independently callable; the snapshot just runs
//! the whole pipeline once per request in the fixed order
//! filter -> KPIs -> time series -> categorical tables.

use serde::Serialize;

use crate::categorical::{
    discount_margin_points, profit_by_category, sales_by_region, sales_by_sub_category,
    top_products, CategoryProfit, DiscountMarginPoint, ProductSummary, RegionSales,
    SubCategorySales, TOP_PRODUCT_LIMIT,
};
use crate::filter::{self, ValidationWarning};
use crate::kpi::{KpiSummary, KpiTile, MarginGauge};
use crate::timeseries::{monthly_overview, resample, PeriodBucket};
use dataset::{Dataset, FilterSelection, Granularity, Metric};

/// Everything the presentation layer needs for one render, computed fresh
/// from the immutable source dataset and the current selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub warnings: Vec<ValidationWarning>,
    /// Rows in the working dataset after all filters.
    pub row_count: usize,
    pub kpis: KpiSummary,
    pub tiles: Vec<KpiTile>,
    pub gauge: MarginGauge,
    pub timeseries: Vec<PeriodBucket>,
    pub top_products: Vec<ProductSummary>,
    pub region_sales: Vec<RegionSales>,
    pub category_profit: Vec<CategoryProfit>,
    pub sub_category_sales: Vec<SubCategorySales>,
    pub discount_margin: Vec<DiscountMarginPoint>,
    pub monthly_overview: Vec<PeriodBucket>,
}

impl DashboardSnapshot {
    /// Filters the source dataset and computes every panel's data.
    pub fn compute(
        source: &Dataset,
        selection: &FilterSelection,
        granularity: Granularity,
        metric: Metric,
    ) -> Self {
        let warnings = filter::validate(selection);
        let working = filter::apply(source, selection);
        Self::from_working(&working, warnings, granularity, metric)
    }

    /// Computes every panel's data from an already-filtered working
    /// dataset.
    pub fn from_working(
        working: &Dataset,
        warnings: Vec<ValidationWarning>,
        granularity: Granularity,
        metric: Metric,
    ) -> Self {
        let kpis = KpiSummary::compute(working);

        DashboardSnapshot {
            warnings,
            row_count: working.len(),
            tiles: kpis.tiles(),
            gauge: MarginGauge::from_summary(&kpis),
            kpis,
            timeseries: resample(working, granularity, metric),
            top_products: top_products(working, metric, TOP_PRODUCT_LIMIT),
            region_sales: sales_by_region(working),
            category_profit: profit_by_category(working),
            sub_category_sales: sales_by_sub_category(working),
            discount_margin: discount_margin_points(working),
            monthly_overview: monthly_overview(working),
        }
    }
}
