//! Yearly generated/recycled totals for the line chart.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{Selection, WasteRecord};

/// One point of the yearly trend: totals for a single year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearTotals {
    pub year: i32,
    /// Sum of generated tonnage over the year's rows.
    pub generated: f64,
    /// Recycling-rate-weighted estimate of recycled tonnage.
    pub recycled: f64,
}

/// Groups the selected city's rows by year and sums generated and recycled
/// tonnage per year. Years come back ascending; years with no rows are
/// simply absent (no zero fill).
pub fn aggregate(records: &[WasteRecord], selection: &Selection) -> Vec<YearTotals> {
    let mut by_year: BTreeMap<i32, (f64, f64)> = BTreeMap::new();

    for r in selection.city_rows(records) {
        let entry = by_year.entry(r.year).or_default();
        entry.0 += r.value_tons_per_day;
        entry.1 += r.recycled_estimate();
    }

    by_year
        .into_iter()
        .map(|(year, (generated, recycled))| YearTotals {
            year,
            generated,
            recycled,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(city: &str, waste_type: &str, year: i32, value: f64, rate: f64) -> WasteRecord {
        WasteRecord {
            city: city.into(),
            waste_type: waste_type.into(),
            year,
            value_tons_per_day: value,
            recycling_rate_percent: rate,
            ..Default::default()
        }
    }

    #[test]
    fn test_yearly_totals_for_city() {
        // Worked example: 100 t at 50% + 50 t at 0% in 2020.
        let records = vec![
            record("A", "Plastic", 2020, 100.0, 50.0),
            record("A", "Organic", 2020, 50.0, 0.0),
        ];

        let totals = aggregate(&records, &Selection::for_city("A"));
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].year, 2020);
        assert_eq!(totals[0].generated, 150.0);
        assert_eq!(totals[0].recycled, 50.0);
    }

    #[test]
    fn test_years_ascending_missing_years_absent() {
        let records = vec![
            record("A", "Plastic", 2022, 10.0, 0.0),
            record("A", "Plastic", 2019, 5.0, 0.0),
        ];

        let totals = aggregate(&records, &Selection::for_city("A"));
        let years: Vec<i32> = totals.iter().map(|t| t.year).collect();
        assert_eq!(years, vec![2019, 2022]);
    }

    #[test]
    fn test_other_cities_excluded() {
        let records = vec![
            record("A", "Plastic", 2020, 10.0, 0.0),
            record("B", "Plastic", 2020, 99.0, 0.0),
        ];

        let totals = aggregate(&records, &Selection::for_city("A"));
        assert_eq!(totals[0].generated, 10.0);
    }

    #[test]
    fn test_empty_selection_yields_empty() {
        assert!(aggregate(&[], &Selection::for_city("A")).is_empty());
    }
}
