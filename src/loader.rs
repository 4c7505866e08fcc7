//! CSV dataset loader.
//!
//! Parses the raw bytes of the municipal waste CSV into typed
//! [`WasteRecord`]s. Column lookup is by header name with alternate
//! spellings tolerated; every numeric cell coerces to 0 on parse failure so
//! no row is ever dropped.

use anyhow::Result;
use csv::StringRecord;
use tracing::debug;

use crate::model::WasteRecord;

/// Accepted header spellings per field, in preference order.
const CITY: &[&str] = &["City/District", "City"];
const WASTE_TYPE: &[&str] = &["Waste Type"];
const YEAR: &[&str] = &["Year"];
const VALUE: &[&str] = &["Waste Generated (Tons/Day)"];
const RECYCLING_RATE: &[&str] = &["Recycling Rate (%)"];
const DENSITY: &[&str] = &[
    "Population Density (People/km²)",
    "Population Density (People/km)",
];
const SCORE: &[&str] = &["Municipal Efficiency Score (1-10)"];
const DISPOSAL: &[&str] = &["Disposal Method"];
const COST: &[&str] = &[
    "Cost of Waste Management (₹/Ton)",
    "Cost of Waste Management (Rs/ton)",
];
const CAMPAIGNS: &[&str] = &["Awareness Campaigns Count"];
const LANDFILL_NAME: &[&str] = &["Landfill Name"];
const LANDFILL_CAPACITY: &[&str] = &["Landfill Capacity (Tons)"];

/// Resolved column indices for one CSV header row.
struct Columns {
    city: Option<usize>,
    waste_type: Option<usize>,
    year: Option<usize>,
    value: Option<usize>,
    recycling_rate: Option<usize>,
    density: Option<usize>,
    score: Option<usize>,
    disposal: Option<usize>,
    cost: Option<usize>,
    campaigns: Option<usize>,
    landfill_name: Option<usize>,
    landfill_capacity: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Self {
        let find = |aliases: &[&str]| {
            aliases
                .iter()
                .find_map(|name| headers.iter().position(|h| h.trim() == *name))
        };

        Columns {
            city: find(CITY),
            waste_type: find(WASTE_TYPE),
            year: find(YEAR),
            value: find(VALUE),
            recycling_rate: find(RECYCLING_RATE),
            density: find(DENSITY),
            score: find(SCORE),
            disposal: find(DISPOSAL),
            cost: find(COST),
            campaigns: find(CAMPAIGNS),
            landfill_name: find(LANDFILL_NAME),
            landfill_capacity: find(LANDFILL_CAPACITY),
        }
    }
}

fn text(record: &StringRecord, idx: Option<usize>) -> String {
    idx.and_then(|i| record.get(i))
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn number(record: &StringRecord, idx: Option<usize>) -> f64 {
    idx.and_then(|i| record.get(i))
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Parses CSV bytes into records, preserving file order.
///
/// # Errors
///
/// Returns an error only when the resource is not readable as CSV at all
/// (e.g. an unterminated quote). Cell-level problems never fail the load.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<WasteRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let columns = Columns::resolve(reader.headers()?);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(WasteRecord {
            city: text(&row, columns.city),
            waste_type: text(&row, columns.waste_type),
            year: number(&row, columns.year) as i32,
            value_tons_per_day: number(&row, columns.value),
            recycling_rate_percent: number(&row, columns.recycling_rate),
            population_density: number(&row, columns.density),
            municipal_score: number(&row, columns.score),
            disposal_method: text(&row, columns.disposal),
            cost_per_ton: number(&row, columns.cost),
            campaigns_count: number(&row, columns.campaigns) as u32,
            landfill_name: text(&row, columns.landfill_name),
            landfill_capacity_tons: number(&row, columns.landfill_capacity),
        });
    }

    debug!(rows = records.len(), "Dataset parsed");
    Ok(records)
}
