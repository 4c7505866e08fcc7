//! Per-year cost distribution boxes for the box plot.

use serde::Serialize;

use crate::aggregators::util::quantile;
use crate::model::{Selection, WasteRecord};

/// The fixed year window the box plot covers.
pub const YEARS: [i32; 5] = [2019, 2020, 2021, 2022, 2023];

/// Five-number summary plus outliers for one year's cost values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBox {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

/// One box-plot column. A year with no positive cost values carries no box
/// and renders as an explicit empty marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearCosts {
    pub year: i32,
    pub sample_count: usize,
    pub summary: Option<CostBox>,
}

/// Collects the selected city's positive cost values per fixed year,
/// sorted ascending, and computes quartiles, 1.5·IQR whiskers, and
/// outliers.
pub fn aggregate(records: &[WasteRecord], selection: &Selection) -> Vec<YearCosts> {
    YEARS
        .iter()
        .map(|&year| {
            let mut values: Vec<f64> = selection
                .city_rows(records)
                .into_iter()
                .filter(|r| r.year == year)
                .map(|r| r.cost_per_ton)
                .filter(|v| v.is_finite() && *v > 0.0)
                .collect();
            values.sort_by(|a, b| a.total_cmp(b));

            YearCosts {
                year,
                sample_count: values.len(),
                summary: summarize(&values),
            }
        })
        .collect()
}

fn summarize(sorted: &[f64]) -> Option<CostBox> {
    let q1 = quantile(sorted, 0.25)?;
    let median = quantile(sorted, 0.5)?;
    let q3 = quantile(sorted, 0.75)?;

    let iqr = q3 - q1;
    let low_fence = q1 - 1.5 * iqr;
    let high_fence = q3 + 1.5 * iqr;

    // Whiskers sit on the extreme observed values inside the fences.
    let inside: Vec<f64> = sorted
        .iter()
        .copied()
        .filter(|v| *v >= low_fence && *v <= high_fence)
        .collect();
    let whisker_low = inside.first().copied().unwrap_or(q1);
    let whisker_high = inside.last().copied().unwrap_or(q3);

    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();

    Some(CostBox {
        q1,
        median,
        q3,
        whisker_low,
        whisker_high,
        outliers,
    })
}
