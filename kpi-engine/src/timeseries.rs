//! FILENAME: kpi-engine/src/timeseries.rs
//! Time-Series Aggregator - calendar resampling with rolling averages.
//!
//! Resampling produces the full date spine between the first and last
//! order date at the chosen granularity: periods with no rows still get a
//! bucket. Sums are 0 for empty buckets, but the discount mean is
//! undefined there (`None`), and that undefinedness propagates into any
//! rolling window that touches it rather than being coerced to zero.

use chrono::{Datelike, Duration, NaiveDate};
use rustc_hash::FxHashMap;
use serde::Serialize;

use dataset::{Dataset, Granularity, Metric};

// ============================================================================
// BUCKET
// ============================================================================

/// One resample period of the working dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodBucket {
    /// First calendar day of the period (the day itself for Daily, Monday
    /// for Weekly, the 1st for Monthly).
    pub period_start: NaiveDate,
    pub sales: f64,
    pub quantity: i64,
    pub profit: f64,
    /// Mean discount over the period's rows; None when the bucket is empty.
    pub avg_discount: Option<f64>,
    /// Bucket profit over bucket sales, 0 when sales is 0.
    pub margin_rate: f64,
    /// Trailing rolling average of the selected metric. None until a full
    /// window has accumulated, and None when any value in the window is
    /// itself undefined.
    pub rolling_avg: Option<f64>,
}

// ============================================================================
// RESAMPLING
// ============================================================================

/// Resamples the working dataset to `granularity`, computing the rolling
/// average of `metric` with the granularity's window (30/4/3).
pub fn resample(working: &Dataset, granularity: Granularity, metric: Metric) -> Vec<PeriodBucket> {
    let Some((min, max)) = working.date_span() else {
        return Vec::new();
    };

    #[derive(Default)]
    struct Accumulator {
        sales: f64,
        quantity: i64,
        profit: f64,
        discount_sum: f64,
        count: u64,
    }

    let mut groups: FxHashMap<NaiveDate, Accumulator> = FxHashMap::default();
    for t in working {
        let acc = groups.entry(period_start(t.order_date, granularity)).or_default();
        acc.sales += t.sales;
        acc.quantity += t.quantity;
        acc.profit += t.profit;
        acc.discount_sum += t.discount;
        acc.count += 1;
    }

    let mut buckets = Vec::new();
    let mut cursor = period_start(min, granularity);
    let last = period_start(max, granularity);

    while cursor <= last {
        let bucket = match groups.get(&cursor) {
            Some(acc) => PeriodBucket {
                period_start: cursor,
                sales: acc.sales,
                quantity: acc.quantity,
                profit: acc.profit,
                avg_discount: Some(acc.discount_sum / acc.count as f64),
                margin_rate: if acc.sales != 0.0 {
                    acc.profit / acc.sales
                } else {
                    0.0
                },
                rolling_avg: None,
            },
            None => PeriodBucket {
                period_start: cursor,
                sales: 0.0,
                quantity: 0,
                profit: 0.0,
                avg_discount: None,
                margin_rate: 0.0,
                rolling_avg: None,
            },
        };
        buckets.push(bucket);

        match next_period(cursor, granularity) {
            Some(next) => cursor = next,
            None => break,
        }
    }

    apply_rolling(&mut buckets, metric, granularity.rolling_window());
    buckets
}

/// The fixed monthly series feeding the sales-and-profit overview panel,
/// independent of the user-selected granularity.
pub fn monthly_overview(working: &Dataset) -> Vec<PeriodBucket> {
    resample(working, Granularity::Monthly, Metric::Sales)
}

/// First day of the period containing `date`.
pub fn period_start(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Daily => date,
        Granularity::Weekly => {
            date - Duration::days(date.weekday().num_days_from_monday() as i64)
        }
        Granularity::Monthly => {
            NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
        }
    }
}

fn next_period(start: NaiveDate, granularity: Granularity) -> Option<NaiveDate> {
    match granularity {
        Granularity::Daily => start.checked_add_signed(Duration::days(1)),
        Granularity::Weekly => start.checked_add_signed(Duration::days(7)),
        Granularity::Monthly => {
            let (year, month) = if start.month() == 12 {
                (start.year() + 1, 1)
            } else {
                (start.year(), start.month() + 1)
            };
            NaiveDate::from_ymd_opt(year, month, 1)
        }
    }
}

// ============================================================================
// ROLLING AVERAGE
// ============================================================================

/// The bucket's value for one metric choice. AvgDiscount is undefined on
/// empty buckets; everything else is always defined.
pub fn metric_value(bucket: &PeriodBucket, metric: Metric) -> Option<f64> {
    match metric {
        Metric::Sales => Some(bucket.sales),
        Metric::Quantity => Some(bucket.quantity as f64),
        Metric::Profit => Some(bucket.profit),
        Metric::MarginRate => Some(bucket.margin_rate),
        Metric::AvgDiscount => bucket.avg_discount,
    }
}

fn apply_rolling(buckets: &mut [PeriodBucket], metric: Metric, window: usize) {
    if window == 0 {
        return;
    }

    let values: Vec<Option<f64>> = buckets.iter().map(|b| metric_value(b, metric)).collect();

    for i in 0..buckets.len() {
        buckets[i].rolling_avg = if i + 1 < window {
            None
        } else {
            let mut sum = 0.0;
            let mut defined = true;
            for value in &values[i + 1 - window..=i] {
                match value {
                    Some(v) => sum += v,
                    None => {
                        defined = false;
                        break;
                    }
                }
            }
            if defined {
                Some(sum / window as f64)
            } else {
                None
            }
        };
    }
}
