//! Waste-type distribution for the pie charts.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{Selection, WasteRecord};

/// Which quantity a pie slice carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieMode {
    /// Sum of generated tonnage per type.
    Generated,
    /// Recycling-rate-weighted recycled estimate per type.
    Recycled,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub waste_type: String,
    pub value: f64,
}

/// Groups the selected city's rows (optionally restricted to the selected
/// year) by waste type and sums the chosen quantity. Zero and negative
/// sums are dropped; slices come back sorted descending by value, ties by
/// type name ascending.
pub fn aggregate(records: &[WasteRecord], selection: &Selection, mode: PieMode) -> Vec<PieSlice> {
    let mut by_type: BTreeMap<String, f64> = BTreeMap::new();

    for r in selection.city_rows(records) {
        if let Some(year) = selection.year {
            if r.year != year {
                continue;
            }
        }

        let value = match mode {
            PieMode::Generated => r.value_tons_per_day,
            PieMode::Recycled => r.recycled_estimate(),
        };
        *by_type.entry(r.waste_type.clone()).or_default() += value;
    }

    let mut slices: Vec<PieSlice> = by_type
        .into_iter()
        .filter(|(_, value)| *value > 0.0)
        .map(|(waste_type, value)| PieSlice { waste_type, value })
        .collect();

    slices.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.waste_type.cmp(&b.waste_type))
    });

    slices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(waste_type: &str, year: i32, value: f64, rate: f64) -> WasteRecord {
        WasteRecord {
            city: "A".into(),
            waste_type: waste_type.into(),
            year,
            value_tons_per_day: value,
            recycling_rate_percent: rate,
            ..Default::default()
        }
    }

    #[test]
    fn test_generated_distribution() {
        let records = vec![
            record("Plastic", 2020, 100.0, 50.0),
            record("Organic", 2020, 50.0, 0.0),
        ];

        let slices = aggregate(&records, &Selection::for_city("A"), PieMode::Generated);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].waste_type, "Plastic");
        assert_eq!(slices[0].value, 100.0);
        assert_eq!(slices[1].waste_type, "Organic");
        assert_eq!(slices[1].value, 50.0);
    }

    #[test]
    fn test_recycled_mode_weights_by_rate() {
        let records = vec![
            record("Plastic", 2020, 100.0, 50.0),
            record("Organic", 2020, 50.0, 0.0),
        ];

        let slices = aggregate(&records, &Selection::for_city("A"), PieMode::Recycled);
        // Organic recycles nothing, so its slice is dropped entirely.
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].waste_type, "Plastic");
        assert_eq!(slices[0].value, 50.0);
    }

    #[test]
    fn test_year_filter_applies() {
        let records = vec![
            record("Plastic", 2020, 100.0, 0.0),
            record("Plastic", 2021, 40.0, 0.0),
        ];

        let mut sel = Selection::for_city("A");
        sel.year = Some(2021);
        let slices = aggregate(&records, &sel, PieMode::Generated);
        assert_eq!(slices[0].value, 40.0);
    }

    #[test]
    fn test_no_data_is_empty_not_error() {
        let sel = Selection::for_city("Nowhere");
        assert!(aggregate(&[], &sel, PieMode::Generated).is_empty());
    }
}
