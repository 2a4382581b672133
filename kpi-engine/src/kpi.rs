//! FILENAME: kpi-engine/src/kpi.rs
//! KPI Aggregator - the five headline metrics and the margin gauge.

use serde::{Deserialize, Serialize};

use crate::format;
use dataset::{Dataset, Metric};

/// Margin-rate target the gauge measures against (15%).
pub const MARGIN_TARGET: f64 = 0.15;

/// Upper bound of the gauge scale, in percent.
pub const GAUGE_MAX_PCT: f64 = 100.0;

// ============================================================================
// SUMMARY
// ============================================================================

/// The five scalar KPIs over a working dataset. All values are 0 on an
/// empty dataset; an empty result is never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub sales: f64,
    pub quantity: i64,
    pub profit: f64,
    /// Total profit over total sales, 0 when sales is 0.
    pub margin_rate: f64,
    pub avg_discount: f64,
}

impl KpiSummary {
    pub fn compute(working: &Dataset) -> Self {
        if working.is_empty() {
            return KpiSummary::default();
        }

        let mut sales = 0.0;
        let mut quantity = 0;
        let mut profit = 0.0;
        let mut discount_sum = 0.0;

        for t in working {
            sales += t.sales;
            quantity += t.quantity;
            profit += t.profit;
            discount_sum += t.discount;
        }

        let margin_rate = if sales != 0.0 { profit / sales } else { 0.0 };
        let avg_discount = discount_sum / working.len() as f64;

        KpiSummary {
            sales,
            quantity,
            profit,
            margin_rate,
            avg_discount,
        }
    }

    /// The summary value for one metric choice.
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Sales => self.sales,
            Metric::Quantity => self.quantity as f64,
            Metric::Profit => self.profit,
            Metric::MarginRate => self.margin_rate,
            Metric::AvgDiscount => self.avg_discount,
        }
    }

    pub fn below_target(&self) -> bool {
        self.margin_rate < MARGIN_TARGET
    }

    /// The five formatted KPI tiles, in display order.
    pub fn tiles(&self) -> Vec<KpiTile> {
        vec![
            KpiTile {
                title: "Sales",
                value: format::currency(self.sales),
                tooltip: "Total revenue generated.",
                highlight: false,
            },
            KpiTile {
                title: "Quantity Sold",
                value: format::count(self.quantity),
                tooltip: "Total units sold.",
                highlight: false,
            },
            KpiTile {
                title: "Profit",
                value: format::currency(self.profit),
                tooltip: "Net profit after costs.",
                highlight: false,
            },
            KpiTile {
                title: "Margin Rate",
                value: format::percent(self.margin_rate),
                tooltip: "Profit margin percentage.",
                // Flagged when the margin misses the 15% target
                highlight: self.below_target(),
            },
            KpiTile {
                title: "Avg Discount",
                value: format::percent(self.avg_discount),
                tooltip: "Average discount applied.",
                highlight: false,
            },
        ]
    }
}

// ============================================================================
// TILES & GAUGE
// ============================================================================

/// One rendered KPI tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiTile {
    pub title: &'static str,
    pub value: String,
    pub tooltip: &'static str,
    /// True when the tile should draw attention (margin below target).
    pub highlight: bool,
}

/// Data behind the margin-rate gauge panel: current value in percent
/// against the fixed target line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarginGauge {
    pub value_pct: f64,
    pub target_pct: f64,
    pub max_pct: f64,
    pub below_target: bool,
}

impl MarginGauge {
    pub fn from_summary(summary: &KpiSummary) -> Self {
        MarginGauge {
            value_pct: summary.margin_rate * 100.0,
            target_pct: MARGIN_TARGET * 100.0,
            max_pct: GAUGE_MAX_PCT,
            below_target: summary.below_target(),
        }
    }
}
