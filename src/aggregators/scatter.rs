//! One bubble per city for the density-vs-volume scatter plot.

use serde::Serialize;

use crate::aggregators::util::mean;
use crate::model::{Selection, WasteRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityBubble {
    pub city: String,
    /// Mean population density over the city's rows (x axis).
    pub population_density: f64,
    /// Sum of generated tonnage (y axis).
    pub total_generated: f64,
    /// Mean management cost; the renderer square-root-scales this into a
    /// radius so bubble *area* tracks cost.
    pub mean_cost: f64,
    /// Waste type with the largest summed volume, ties broken by first
    /// encounter in dataset order.
    pub primary_type: String,
}

/// Aggregates the whole dataset into one bubble per city, in first-seen
/// city order. The selection takes no part here; the scatter always shows
/// every city.
pub fn aggregate(records: &[WasteRecord], _selection: &Selection) -> Vec<CityBubble> {
    // Vec-based grouping keeps encounter order for cities and for the
    // primary-type tie break.
    let mut cities: Vec<String> = Vec::new();
    for r in records {
        if !cities.contains(&r.city) {
            cities.push(r.city.clone());
        }
    }

    cities
        .into_iter()
        .map(|city| {
            let rows: Vec<&WasteRecord> = records.iter().filter(|r| r.city == city).collect();

            let densities: Vec<f64> = rows.iter().map(|r| r.population_density).collect();
            let costs: Vec<f64> = rows.iter().map(|r| r.cost_per_ton).collect();
            let total: f64 = rows.iter().map(|r| r.value_tons_per_day).sum();

            let mut by_type: Vec<(String, f64)> = Vec::new();
            for r in &rows {
                match by_type.iter_mut().find(|(t, _)| *t == r.waste_type) {
                    Some((_, sum)) => *sum += r.value_tons_per_day,
                    None => by_type.push((r.waste_type.clone(), r.value_tons_per_day)),
                }
            }
            // Strict comparison so an earlier type keeps the tie.
            let mut primary_type = String::new();
            let mut best = f64::NEG_INFINITY;
            for (t, sum) in &by_type {
                if *sum > best {
                    best = *sum;
                    primary_type = t.clone();
                }
            }

            CityBubble {
                city,
                population_density: mean(&densities),
                total_generated: total,
                mean_cost: mean(&costs),
                primary_type,
            }
        })
        .collect()
}
