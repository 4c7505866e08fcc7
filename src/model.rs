//! Core data model: parsed dataset rows, derived per-city stats, and the
//! explicit selection state every aggregator consumes.

use serde::Serialize;

/// One parsed row of the municipal waste dataset.
///
/// Immutable after load; numeric fields default to 0 when the source cell
/// is missing or unparseable, string fields default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WasteRecord {
    pub city: String,
    pub waste_type: String,
    pub year: i32,
    pub value_tons_per_day: f64,
    pub recycling_rate_percent: f64,
    pub population_density: f64,
    pub municipal_score: f64,
    pub disposal_method: String,
    pub cost_per_ton: f64,
    pub campaigns_count: u32,
    pub landfill_name: String,
    pub landfill_capacity_tons: f64,
}

impl WasteRecord {
    /// Estimated recycled tonnage for this row: value weighted by the
    /// reported recycling rate.
    pub fn recycled_estimate(&self) -> f64 {
        self.value_tons_per_day * (self.recycling_rate_percent / 100.0)
    }
}

/// Derived summary for a single city across the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CityStat {
    /// Sum of `value_tons_per_day` over all of the city's rows.
    pub total_generated: f64,
    /// Mean population density over all of the city's rows.
    pub population_density: f64,
}

/// Secondary filter applied by the sankey aggregator on top of the city
/// selection.
#[derive(Debug, Clone, PartialEq)]
pub enum SankeyFilter {
    /// Keep rows of one waste type; sources are waste types.
    WasteType(String),
    /// Keep rows of one year; sources are years.
    Year(i32),
}

/// Current UI filter state, passed explicitly into every aggregator.
///
/// There is no hidden shared context: an aggregator's output is a pure
/// function of the record slice and this struct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Currently chosen city, or none before load / for dataset-wide views.
    pub city: Option<String>,
    /// Chart-local year filter (pie).
    pub year: Option<i32>,
    /// Chart-local sankey filter mode and value.
    pub sankey: Option<SankeyFilter>,
    /// Chart-local page index for the paged campaigns bar chart.
    pub page: usize,
    /// Cities compared on the radar chart (at most 3 are used).
    pub radar_cities: Vec<String>,
}

impl Selection {
    /// Selection scoped to a single city, other filters at their defaults.
    pub fn for_city(city: impl Into<String>) -> Self {
        Selection {
            city: Some(city.into()),
            ..Selection::default()
        }
    }

    /// Rows matching the selected city, in dataset order. No selected city
    /// means no rows: city-scoped charts render their placeholder instead
    /// of silently falling back to the whole dataset.
    pub fn city_rows<'a>(&self, records: &'a [WasteRecord]) -> Vec<&'a WasteRecord> {
        match &self.city {
            Some(city) => records.iter().filter(|r| &r.city == city).collect(),
            None => Vec::new(),
        }
    }
}
