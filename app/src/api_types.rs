//! FILENAME: app/src/api_types.rs
//! Request and response types for the dashboard API.
//!
//! Every data endpoint takes the same query encoding of the sidebar
//! state: comma-separated multi-selects, ISO dates, and the three display
//! choices. Responses are plain serde views over the engine's output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use dataset::{FilterSelection, Granularity, Metric, ParseChoiceError, Theme};
use kpi_engine::{
    CategoryProfit, DashboardSnapshot, DiscountMarginPoint, KpiSummary, KpiTile, MarginGauge,
    PeriodBucket, ProductSummary, RegionSales, SubCategorySales,
};

// ============================================================================
// QUERY
// ============================================================================

/// The shared query string for all data endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    /// Comma-separated multi-select values; absent or empty means "all".
    pub regions: Option<String>,
    pub states: Option<String>,
    pub categories: Option<String>,
    pub sub_categories: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub granularity: Option<String>,
    pub metric: Option<String>,
    pub theme: Option<String>,
}

impl DashboardQuery {
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            regions: split_multi(&self.regions),
            states: split_multi(&self.states),
            categories: split_multi(&self.categories),
            sub_categories: split_multi(&self.sub_categories),
            date_from: self.from,
            date_to: self.to,
        }
    }

    pub fn granularity(&self) -> Result<Granularity, ParseChoiceError> {
        parse_choice(&self.granularity)
    }

    pub fn metric(&self) -> Result<Metric, ParseChoiceError> {
        parse_choice(&self.metric)
    }

    pub fn theme(&self) -> Result<Theme, ParseChoiceError> {
        parse_choice(&self.theme)
    }
}

fn split_multi(value: &Option<String>) -> Vec<String> {
    match value {
        Some(raw) => raw
            .split(',')
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
            .collect(),
        None => Vec::new(),
    }
}

fn parse_choice<T>(value: &Option<String>) -> Result<T, ParseChoiceError>
where
    T: Default + std::str::FromStr<Err = ParseChoiceError>,
{
    match value.as_deref() {
        Some(raw) if !raw.trim().is_empty() => raw.parse(),
        _ => Ok(T::default()),
    }
}

// ============================================================================
// RESPONSES
// ============================================================================

#[derive(Debug, Serialize)]
pub struct KpiResponse {
    pub row_count: usize,
    pub kpis: KpiSummary,
    pub tiles: Vec<KpiTile>,
    pub gauge: MarginGauge,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TimeSeriesResponse {
    pub granularity: &'static str,
    pub metric: &'static str,
    pub rolling_window: usize,
    pub buckets: Vec<PeriodBucket>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub metric: &'static str,
    pub products: Vec<ProductSummary>,
    pub warnings: Vec<String>,
}

/// Envelope for the single-table chart panels.
#[derive(Debug, Serialize)]
pub struct TableResponse<T: Serialize> {
    pub rows: Vec<T>,
    pub warnings: Vec<String>,
}

pub type RegionsResponse = TableResponse<RegionSales>;
pub type CategoriesResponse = TableResponse<CategoryProfit>;
pub type SubCategoriesResponse = TableResponse<SubCategorySales>;
pub type ScatterResponse = TableResponse<DiscountMarginPoint>;

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub buckets: Vec<PeriodBucket>,
    pub warnings: Vec<String>,
}

/// The full bundle for one render, plus the cosmetic chart template.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub template: &'static str,
    #[serde(flatten)]
    pub snapshot: DashboardSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_select_splits_and_trims() {
        let query = DashboardQuery {
            regions: Some("West, East ,,".to_string()),
            states: None,
            ..Default::default()
        };
        let selection = query.selection();
        assert_eq!(selection.regions, vec!["West", "East"]);
        assert!(selection.states.is_empty());
    }

    #[test]
    fn missing_choices_fall_back_to_defaults() {
        let query = DashboardQuery::default();
        assert_eq!(query.granularity().unwrap(), Granularity::Monthly);
        assert_eq!(query.metric().unwrap(), Metric::Sales);
        assert_eq!(query.theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn bad_choice_is_rejected() {
        let query = DashboardQuery {
            granularity: Some("hourly".to_string()),
            ..Default::default()
        };
        assert!(query.granularity().is_err());
    }

    #[test]
    fn metric_accepts_display_labels() {
        let query = DashboardQuery {
            metric: Some("Margin Rate".to_string()),
            ..Default::default()
        };
        assert_eq!(query.metric().unwrap(), Metric::MarginRate);
    }
}
