//! Scalar KPI rollups over the full dataset.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::aggregators::{gauge, util};
use crate::model::{CityStat, Selection, WasteRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KpiSummary {
    /// Sum of generated tonnage over every row.
    pub total_volume: f64,
    pub mean_recycling_rate: f64,
    /// Waste type with the largest summed volume and its share of the
    /// total, in percent.
    pub dominant_type: Option<String>,
    pub dominant_type_share: f64,
    pub mean_municipal_score: f64,
    /// Mean per-city landfill occupancy percentage; `None` when no city
    /// reports landfill capacity.
    pub mean_landfill_usage: Option<f64>,
    pub mean_cost: f64,
    /// Pearson correlation between per-city population density and total
    /// generated waste (over city stats when at least two cities exist,
    /// else over raw rows). Always finite.
    pub density_correlation: f64,
}

/// Cities kept in the recyclers ranking.
pub const TOP_RECYCLERS: usize = 5;

/// One row of the best-recyclers table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecyclerStat {
    pub city: String,
    /// Mean reported recycling rate over the city's rows.
    pub mean_recycling_rate: f64,
    /// Sum of the rate-weighted recycled estimate over the city's rows.
    pub recycled_total: f64,
}

/// Ranks cities by mean recycling rate descending (ties by name
/// ascending) and keeps the top five with their recycled volumes.
pub fn top_recyclers(records: &[WasteRecord]) -> Vec<RecyclerStat> {
    let mut by_city: BTreeMap<String, (Vec<f64>, f64)> = BTreeMap::new();
    for r in records {
        let entry = by_city.entry(r.city.clone()).or_default();
        entry.0.push(r.recycling_rate_percent);
        entry.1 += r.recycled_estimate();
    }

    let mut ranked: Vec<RecyclerStat> = by_city
        .into_iter()
        .map(|(city, (rates, recycled_total))| RecyclerStat {
            city,
            mean_recycling_rate: util::mean(&rates),
            recycled_total,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.mean_recycling_rate
            .total_cmp(&a.mean_recycling_rate)
            .then_with(|| a.city.cmp(&b.city))
    });
    ranked.truncate(TOP_RECYCLERS);

    ranked
}

/// Computes the dashboard-level KPI panel. Pure function of the dataset
/// and the derived city stats; an empty dataset yields the zero default.
pub fn aggregate(records: &[WasteRecord], stats: &BTreeMap<String, CityStat>) -> KpiSummary {
    if records.is_empty() {
        return KpiSummary::default();
    }

    let total_volume: f64 = records.iter().map(|r| r.value_tons_per_day).sum();

    let rates: Vec<f64> = records.iter().map(|r| r.recycling_rate_percent).collect();
    let scores: Vec<f64> = records.iter().map(|r| r.municipal_score).collect();
    let costs: Vec<f64> = records.iter().map(|r| r.cost_per_ton).collect();

    let mut by_type: BTreeMap<&str, f64> = BTreeMap::new();
    for r in records {
        *by_type.entry(r.waste_type.as_str()).or_default() += r.value_tons_per_day;
    }
    let dominant = by_type
        .iter()
        .max_by(|a, b| a.1.total_cmp(b.1).then_with(|| b.0.cmp(a.0)));
    let type_total: f64 = by_type.values().sum();
    let (dominant_type, dominant_type_share) = match dominant {
        Some((name, sum)) if type_total > 0.0 => {
            (Some(name.to_string()), sum / type_total * 100.0)
        }
        _ => (None, 0.0),
    };

    let density_correlation = if stats.len() >= 2 {
        let dens: Vec<f64> = stats.values().map(|s| s.population_density).collect();
        let totals: Vec<f64> = stats.values().map(|s| s.total_generated).collect();
        util::pearson(&dens, &totals)
    } else {
        let dens: Vec<f64> = records.iter().map(|r| r.population_density).collect();
        let vals: Vec<f64> = records.iter().map(|r| r.value_tons_per_day).collect();
        util::pearson(&dens, &vals)
    };

    // Landfill usage is not a dataset column; derive it as the mean of the
    // per-city occupancy gauge, counting only cities with capacity data.
    let usages: Vec<f64> = stats
        .keys()
        .filter(|city| {
            records
                .iter()
                .any(|r| &r.city == *city && r.landfill_capacity_tons > 0.0)
        })
        .map(|city| gauge::aggregate(records, &Selection::for_city(city.clone())).percent)
        .collect();
    let mean_landfill_usage = if usages.is_empty() {
        None
    } else {
        Some(util::mean(&usages))
    };

    KpiSummary {
        total_volume,
        mean_recycling_rate: util::mean(&rates),
        dominant_type,
        dominant_type_share,
        mean_municipal_score: util::mean(&scores),
        mean_landfill_usage,
        mean_cost: util::mean(&costs),
        density_correlation,
    }
}
