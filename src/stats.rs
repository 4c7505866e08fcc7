//! Per-city summary statistics derived once per dataset load.

use std::collections::BTreeMap;

use crate::aggregators::util::mean;
use crate::model::{CityStat, WasteRecord};

/// Computes the per-city summary over the whole dataset: total waste
/// generated (sum) and mean population density. Pure and deterministic;
/// keyed by city name in sorted order.
pub fn compute_city_stats(records: &[WasteRecord]) -> BTreeMap<String, CityStat> {
    let mut series: BTreeMap<String, (f64, Vec<f64>)> = BTreeMap::new();

    for r in records {
        let entry = series.entry(r.city.clone()).or_default();
        entry.0 += r.value_tons_per_day;
        entry.1.push(r.population_density);
    }

    series
        .into_iter()
        .map(|(city, (total, densities))| {
            (
                city,
                CityStat {
                    total_generated: total,
                    population_density: mean(&densities),
                },
            )
        })
        .collect()
}

/// Ranks cities by total generated waste, descending; ties broken by city
/// name ascending. Used for leaderboards.
pub fn rank_cities(stats: &BTreeMap<String, CityStat>) -> Vec<(String, CityStat)> {
    let mut entries: Vec<(String, CityStat)> = stats
        .iter()
        .map(|(city, stat)| (city.clone(), stat.clone()))
        .collect();

    entries.sort_by(|a, b| {
        b.1.total_generated
            .total_cmp(&a.1.total_generated)
            .then_with(|| a.0.cmp(&b.0))
    });

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(city: &str, value: f64, density: f64) -> WasteRecord {
        WasteRecord {
            city: city.into(),
            value_tons_per_day: value,
            population_density: density,
            ..Default::default()
        }
    }

    #[test]
    fn test_totals_and_mean_density() {
        let records = vec![
            record("A", 100.0, 2000.0),
            record("A", 50.0, 4000.0),
            record("B", 30.0, 1000.0),
        ];

        let stats = compute_city_stats(&records);
        assert_eq!(stats["A"].total_generated, 150.0);
        assert_eq!(stats["A"].population_density, 3000.0);
        assert_eq!(stats["B"].total_generated, 30.0);
    }

    #[test]
    fn test_sum_of_totals_matches_sum_of_values() {
        let records = vec![
            record("A", 12.5, 0.0),
            record("B", 7.5, 0.0),
            record("A", 5.0, 0.0),
        ];

        let stats = compute_city_stats(&records);
        let total: f64 = stats.values().map(|s| s.total_generated).sum();
        let raw: f64 = records.iter().map(|r| r.value_tons_per_day).sum();
        assert_eq!(total, raw);
    }

    #[test]
    fn test_rank_cities_descending_with_name_tiebreak() {
        let records = vec![
            record("B", 10.0, 0.0),
            record("A", 10.0, 0.0),
            record("C", 99.0, 0.0),
        ];

        let ranked = rank_cities(&compute_city_stats(&records));
        let names: Vec<&str> = ranked.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_empty_dataset() {
        assert!(compute_city_stats(&[]).is_empty());
    }
}
