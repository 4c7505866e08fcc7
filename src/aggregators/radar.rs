//! Latest-year metric snapshots for the radar chart, comparing up to three
//! cities on a fixed axis list.

use serde::Serialize;

use crate::aggregators::util::mean;
use crate::model::{Selection, WasteRecord};

/// How a metric is folded over a city's latest-year rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fold {
    Sum,
    Mean,
}

/// Fixed radar axes, in display order. Total-like metrics are summed,
/// rate-like metrics are averaged.
const METRICS: &[(&str, Fold)] = &[
    ("Municipal Efficiency (1-10)", Fold::Mean),
    ("Recycling Rate (%)", Fold::Mean),
    ("Population Density", Fold::Mean),
    ("Cost (₹/Ton)", Fold::Mean),
    ("Awareness Campaigns", Fold::Sum),
    ("Waste Generated (Tons/Day)", Fold::Sum),
    ("Landfill Capacity (Tons)", Fold::Sum),
];

/// At most this many cities are compared at once.
pub const MAX_CITIES: usize = 3;

/// One city's snapshot: raw metric values in [`RadarChart::axes`] order,
/// taken from the city's most recent year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitySnapshot {
    pub city: String,
    pub year: Option<i32>,
    pub values: Vec<f64>,
    /// Values scaled to [0, 1] by the per-axis max across the compared
    /// cities, so shapes stay comparable.
    pub normalized: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RadarChart {
    pub axes: Vec<String>,
    pub snapshots: Vec<CitySnapshot>,
}

/// Builds latest-year snapshots for the selection's radar cities (falling
/// back to the selected city alone), capped at [`MAX_CITIES`]. Cities with
/// no rows contribute all-zero snapshots.
pub fn aggregate(records: &[WasteRecord], selection: &Selection) -> RadarChart {
    let mut cities: Vec<&str> = Vec::new();
    if let Some(city) = &selection.city {
        cities.push(city);
    }
    for city in &selection.radar_cities {
        if !cities.contains(&city.as_str()) {
            cities.push(city);
        }
    }
    cities.truncate(MAX_CITIES);

    let mut snapshots: Vec<CitySnapshot> = cities
        .iter()
        .map(|city| snapshot(records, city))
        .collect();

    // Normalize each axis by the max across the compared cities.
    for axis in 0..METRICS.len() {
        let max = snapshots
            .iter()
            .map(|s| s.values[axis])
            .fold(0.0_f64, f64::max);
        for s in &mut snapshots {
            s.normalized[axis] = if max > 0.0 { s.values[axis] / max } else { 0.0 };
        }
    }

    RadarChart {
        axes: METRICS.iter().map(|(name, _)| name.to_string()).collect(),
        snapshots,
    }
}

fn snapshot(records: &[WasteRecord], city: &str) -> CitySnapshot {
    let rows: Vec<&WasteRecord> = records.iter().filter(|r| r.city == city).collect();
    let latest = rows.iter().map(|r| r.year).filter(|y| *y != 0).max();
    let rows: Vec<&WasteRecord> = match latest {
        Some(year) => rows.into_iter().filter(|r| r.year == year).collect(),
        None => rows,
    };

    let values: Vec<f64> = METRICS
        .iter()
        .map(|(name, fold)| {
            let series: Vec<f64> = rows.iter().map(|r| metric_value(r, name)).collect();
            match fold {
                Fold::Sum => series.iter().sum(),
                Fold::Mean => mean(&series),
            }
        })
        .collect();

    CitySnapshot {
        city: city.to_string(),
        year: latest,
        normalized: vec![0.0; values.len()],
        values,
    }
}

fn metric_value(r: &WasteRecord, metric: &str) -> f64 {
    match metric {
        "Municipal Efficiency (1-10)" => r.municipal_score,
        "Recycling Rate (%)" => r.recycling_rate_percent,
        "Population Density" => r.population_density,
        "Cost (₹/Ton)" => r.cost_per_ton,
        "Awareness Campaigns" => r.campaigns_count as f64,
        "Waste Generated (Tons/Day)" => r.value_tons_per_day,
        "Landfill Capacity (Tons)" => r.landfill_capacity_tons,
        _ => 0.0,
    }
}
