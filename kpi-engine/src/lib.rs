//! FILENAME: kpi-engine/src/lib.rs
//! KPI aggregation subsystem for storeboard.
//!
//! This crate is the computation core behind the dashboard: it turns the
//! immutable source dataset plus the user's selection into the data every
//! panel renders. It depends on `dataset` only for shared types and does
//! no I/O of its own.
//!
//! Layers:
//! - `filter`: The cascading filter pipeline and selection validation.
//! - `kpi`: The five headline metrics, tiles, and the margin gauge.
//! - `timeseries`: Calendar resampling with rolling averages.
//! - `categorical`: Per-dimension group-by reductions.
//! - `format`: Display formatting for currency/count/percent values.
//! - `snapshot`: One full recomputation pass per request.

pub mod categorical;
pub mod filter;
pub mod format;
pub mod kpi;
pub mod snapshot;
pub mod timeseries;

pub use categorical::{
    discount_margin_points, profit_by_category, sales_by_region, sales_by_sub_category,
    top_products, CategoryProfit, DiscountMarginPoint, ProductSummary, RegionSales,
    SubCategorySales, TOP_PRODUCT_LIMIT,
};
pub use filter::{apply, cascade_options, validate, FilterOptions, ValidationWarning};
pub use kpi::{KpiSummary, KpiTile, MarginGauge, GAUGE_MAX_PCT, MARGIN_TARGET};
pub use snapshot::DashboardSnapshot;
pub use timeseries::{metric_value, monthly_overview, period_start, resample, PeriodBucket};
