//! FILENAME: kpi-engine/src/filter.rs
//! Filter Pipeline - cascading narrowing of the source dataset.
//!
//! Filters apply in a fixed order: region, state, category, sub-category,
//! then the date range. Each step is a pure narrowing function, and each
//! dimension's candidate option list is derived from the dataset narrowed
//! by the steps BEFORE it, so the sidebar cascade always offers values
//! that can still match.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use dataset::{Dataset, Dimension, FilterSelection, Transaction};

// ============================================================================
// PIPELINE
// ============================================================================

/// Applies the full filter cascade, producing the working dataset.
///
/// An empty selection set passes its dimension through unchanged; date
/// bounds are inclusive. The output is always a subset of the input, and
/// an inverted date range simply yields an empty result (the caller
/// surfaces the warning from `validate`).
pub fn apply(source: &Dataset, selection: &FilterSelection) -> Dataset {
    let mut rows: Vec<&Transaction> = source.iter().collect();

    for dimension in Dimension::CASCADE {
        narrow(&mut rows, dimension, selection.values_for(dimension));
    }

    narrow_dates(&mut rows, selection.date_from, selection.date_to);

    rows.into_iter().cloned().collect()
}

/// One categorical narrowing step. Retains rows whose value for the
/// dimension is a member of the selected set.
fn narrow(rows: &mut Vec<&Transaction>, dimension: Dimension, selected: &[String]) {
    if selected.is_empty() {
        return;
    }
    let wanted: HashSet<&str> = selected.iter().map(|s| s.as_str()).collect();
    rows.retain(|t| wanted.contains(dimension.value(t)));
}

/// The final date-range step: `[from, to]` inclusive, open on `None`.
fn narrow_dates(rows: &mut Vec<&Transaction>, from: Option<NaiveDate>, to: Option<NaiveDate>) {
    if let Some(from) = from {
        rows.retain(|t| t.order_date >= from);
    }
    if let Some(to) = to {
        rows.retain(|t| t.order_date <= to);
    }
}

// ============================================================================
// CASCADING OPTIONS
// ============================================================================

/// Candidate values for each sidebar control, given the current selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub states: Vec<String>,
    pub categories: Vec<String>,
    pub sub_categories: Vec<String>,
    /// Default bounds for the date inputs: the span of the categorically
    /// narrowed dataset, or of the full dataset when nothing matches.
    pub date_min: Option<NaiveDate>,
    pub date_max: Option<NaiveDate>,
}

/// Computes each dimension's candidate options from the dataset narrowed
/// by the dimensions before it in cascade order. The date bounds come
/// from the fully narrowed (but not yet date-filtered) rows.
pub fn cascade_options(source: &Dataset, selection: &FilterSelection) -> FilterOptions {
    let mut rows: Vec<&Transaction> = source.iter().collect();
    let mut options = FilterOptions::default();

    for dimension in Dimension::CASCADE {
        let values = unique_values(&rows, dimension);
        match dimension {
            Dimension::Region => options.regions = values,
            Dimension::State => options.states = values,
            Dimension::Category => options.categories = values,
            Dimension::SubCategory => options.sub_categories = values,
        }
        narrow(&mut rows, dimension, selection.values_for(dimension));
    }

    let span = date_span(&rows).or_else(|| source.date_span());
    options.date_min = span.map(|(min, _)| min);
    options.date_max = span.map(|(_, max)| max);

    options
}

fn unique_values(rows: &[&Transaction], dimension: Dimension) -> Vec<String> {
    let mut values: Vec<String> = rows
        .iter()
        .map(|t| dimension.value(t))
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .collect();
    values.sort();
    values.dedup();
    values
}

fn date_span(rows: &[&Transaction]) -> Option<(NaiveDate, NaiveDate)> {
    let mut iter = rows.iter();
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

// ============================================================================
// VALIDATION
// ============================================================================

/// Non-fatal conditions the presentation layer should surface. The
/// pipeline still runs on the (possibly empty) filtered result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationWarning {
    InvertedDateRange { from: NaiveDate, to: NaiveDate },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::InvertedDateRange { from, to } => {
                write!(f, "From date {} must be earlier than To date {}.", from, to)
            }
        }
    }
}

/// Checks a selection for surfaceable problems.
pub fn validate(selection: &FilterSelection) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    if let (Some(from), Some(to)) = (selection.date_from, selection.date_to) {
        if from > to {
            warnings.push(ValidationWarning::InvertedDateRange { from, to });
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(date: (i32, u32, u32), region: &str, state: &str, category: &str) -> Transaction {
        Transaction {
            order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            region: region.to_string(),
            state: state.to_string(),
            category: category.to_string(),
            sub_category: "Chairs".to_string(),
            product_name: "Chair".to_string(),
            sales: 100.0,
            quantity: 1,
            profit: 10.0,
            discount: 0.0,
        }
    }

    fn sample() -> Dataset {
        Dataset::new(vec![
            row((2023, 1, 1), "West", "California", "Furniture"),
            row((2023, 2, 1), "West", "Oregon", "Technology"),
            row((2023, 3, 1), "East", "New York", "Furniture"),
            row((2023, 4, 1), "East", "New York", "Office Supplies"),
        ])
    }

    #[test]
    fn empty_selection_passes_everything_through() {
        let working = apply(&sample(), &FilterSelection::all());
        assert_eq!(working.len(), 4);
    }

    #[test]
    fn each_step_narrows() {
        let mut selection = FilterSelection::all();
        selection.regions = vec!["West".to_string()];
        assert_eq!(apply(&sample(), &selection).len(), 2);

        selection.states = vec!["Oregon".to_string()];
        assert_eq!(apply(&sample(), &selection).len(), 1);

        selection.categories = vec!["Furniture".to_string()];
        assert_eq!(apply(&sample(), &selection).len(), 0);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let mut selection = FilterSelection::all();
        selection.date_from = NaiveDate::from_ymd_opt(2023, 2, 1);
        selection.date_to = NaiveDate::from_ymd_opt(2023, 3, 1);
        let working = apply(&sample(), &selection);
        assert_eq!(working.len(), 2);
    }

    #[test]
    fn inverted_range_yields_empty_not_panic() {
        let mut selection = FilterSelection::all();
        selection.date_from = NaiveDate::from_ymd_opt(2023, 4, 1);
        selection.date_to = NaiveDate::from_ymd_opt(2023, 1, 1);

        let working = apply(&sample(), &selection);
        assert!(working.is_empty());
        assert_eq!(validate(&selection).len(), 1);
    }

    #[test]
    fn output_is_subset_of_input() {
        let source = sample();
        let mut selection = FilterSelection::all();
        let mut previous = apply(&source, &selection).len();

        selection.regions = vec!["East".to_string()];
        let narrowed = apply(&source, &selection).len();
        assert!(narrowed <= previous);
        previous = narrowed;

        selection.categories = vec!["Furniture".to_string()];
        assert!(apply(&source, &selection).len() <= previous);
    }

    #[test]
    fn cascade_options_narrow_progressively() {
        let mut selection = FilterSelection::all();
        selection.regions = vec!["West".to_string()];

        let options = cascade_options(&sample(), &selection);
        // Region options always come from the full dataset
        assert_eq!(options.regions, vec!["East", "West"]);
        // State options only reflect the selected region
        assert_eq!(options.states, vec!["California", "Oregon"]);
        // Category options follow the region+state narrowing
        assert_eq!(options.categories, vec!["Furniture", "Technology"]);
    }

    #[test]
    fn cascade_date_bounds_fall_back_to_full_span() {
        let mut selection = FilterSelection::all();
        selection.regions = vec!["Nowhere".to_string()];

        let options = cascade_options(&sample(), &selection);
        assert_eq!(options.date_min, NaiveDate::from_ymd_opt(2023, 1, 1));
        assert_eq!(options.date_max, NaiveDate::from_ymd_opt(2023, 4, 1));
    }
}
