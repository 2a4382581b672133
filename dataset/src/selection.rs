//! FILENAME: dataset/src/selection.rs
//! User-facing filter and display choices.
//!
//! A `FilterSelection` is an immutable snapshot of the sidebar controls:
//! four categorical multi-selects plus a date range. The display choices
//! (granularity, ranked metric, theme) parameterize the aggregators but
//! never change which rows are in the working dataset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::collection::Dimension;

// ============================================================================
// FILTER SELECTION
// ============================================================================

/// The full set of active filters. An empty categorical list means
/// "all values" (no filtering on that dimension); a `None` date bound
/// leaves that side of the range open.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub regions: Vec<String>,
    pub states: Vec<String>,
    pub categories: Vec<String>,
    pub sub_categories: Vec<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl FilterSelection {
    /// A selection that keeps everything.
    pub fn all() -> Self {
        FilterSelection::default()
    }

    /// The selected values for one cascade dimension.
    pub fn values_for(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Region => &self.regions,
            Dimension::State => &self.states,
            Dimension::Category => &self.categories,
            Dimension::SubCategory => &self.sub_categories,
        }
    }

    /// True when both bounds are set and `from` is after `to`. Not fatal:
    /// the pipeline still runs and produces a (likely empty) result; the
    /// caller surfaces a validation warning.
    pub fn date_range_inverted(&self) -> bool {
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => from > to,
            _ => false,
        }
    }
}

// ============================================================================
// GRANULARITY
// ============================================================================

/// Calendar bucket size for time-series resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    /// Trailing rolling-average window, in buckets.
    pub fn rolling_window(&self) -> usize {
        match self {
            Granularity::Daily => 30,
            Granularity::Weekly => 4,
            Granularity::Monthly => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Granularity::Daily => "Daily",
            Granularity::Weekly => "Weekly",
            Granularity::Monthly => "Monthly",
        }
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity::Monthly
    }
}

impl FromStr for Granularity {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "d" => Ok(Granularity::Daily),
            "weekly" | "w" => Ok(Granularity::Weekly),
            "monthly" | "m" => Ok(Granularity::Monthly),
            _ => Err(ParseChoiceError {
                kind: "granularity",
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// METRIC
// ============================================================================

/// The KPI used for ranking products and for the time-series chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    Sales,
    Quantity,
    Profit,
    #[serde(rename = "Margin Rate")]
    MarginRate,
    #[serde(rename = "Avg Discount")]
    AvgDiscount,
}

impl Metric {
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Sales => "Sales",
            Metric::Quantity => "Quantity",
            Metric::Profit => "Profit",
            Metric::MarginRate => "Margin Rate",
            Metric::AvgDiscount => "Avg Discount",
        }
    }
}

impl Default for Metric {
    fn default() -> Self {
        Metric::Sales
    }
}

impl FromStr for Metric {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "sales" => Ok(Metric::Sales),
            "quantity" => Ok(Metric::Quantity),
            "profit" => Ok(Metric::Profit),
            "marginrate" => Ok(Metric::MarginRate),
            "avgdiscount" => Ok(Metric::AvgDiscount),
            _ => Err(ParseChoiceError {
                kind: "metric",
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// THEME
// ============================================================================

/// Dashboard theme. Cosmetic only: it selects the chart template and has
/// no effect on any computed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// The chart template name the presentation layer passes to the
    /// rendering engine.
    pub fn template(&self) -> &'static str {
        match self {
            Theme::Dark => "plotly_dark",
            Theme::Light => "plotly_white",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}

impl FromStr for Theme {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(ParseChoiceError {
                kind: "theme",
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// PARSE ERROR
// ============================================================================

/// Error for an unrecognized granularity/metric/theme string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseChoiceError {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for ParseChoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for ParseChoiceError {}
