//! Landfill occupancy gauge: generated tonnage against landfill capacity
//! for the selected city's most recent year.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{Selection, WasteRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeStats {
    /// Sum of generated tonnage over the latest year's rows.
    pub generated: f64,
    /// Sum over landfills of the max capacity observed per landfill,
    /// floored to 1 to keep the ratio finite.
    pub capacity: f64,
    /// generated / capacity × 100, not capped; the renderer clamps
    /// separately for display.
    pub percent: f64,
    pub year: Option<i32>,
}

impl Default for GaugeStats {
    fn default() -> Self {
        GaugeStats {
            generated: 0.0,
            capacity: 1.0,
            percent: 0.0,
            year: None,
        }
    }
}

/// Computes the occupancy gauge for the selected city. No city or no rows
/// yields the zero default.
pub fn aggregate(records: &[WasteRecord], selection: &Selection) -> GaugeStats {
    if selection.city.is_none() {
        return GaugeStats::default();
    }

    let rows = selection.city_rows(records);
    let Some(latest) = rows.iter().map(|r| r.year).filter(|y| *y != 0).max() else {
        return GaugeStats::default();
    };

    let year_rows: Vec<&WasteRecord> = rows.into_iter().filter(|r| r.year == latest).collect();

    let generated: f64 = year_rows.iter().map(|r| r.value_tons_per_day).sum();

    // Capacity rows repeat per landfill; take the max per landfill name
    // and sum across landfills.
    let mut per_landfill: BTreeMap<&str, f64> = BTreeMap::new();
    for r in &year_rows {
        let cap = per_landfill.entry(r.landfill_name.as_str()).or_default();
        *cap = cap.max(r.landfill_capacity_tons);
    }
    let mut capacity: f64 = per_landfill.values().sum();
    if capacity <= 0.0 {
        capacity = 1.0;
    }

    GaugeStats {
        generated,
        capacity,
        percent: generated / capacity * 100.0,
        year: Some(latest),
    }
}
