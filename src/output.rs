//! Output formatting and persistence for dashboard aggregates.
//!
//! Supports pretty-printing, JSON serialization, SVG files, CSV append,
//! and per-city JSON report bundles with an index.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregators::boxplot::YearCosts;
use crate::aggregators::campaigns::CampaignsPage;
use crate::aggregators::gauge::GaugeStats;
use crate::aggregators::kpi::KpiSummary;
use crate::aggregators::pie::{self, PieMode, PieSlice};
use crate::aggregators::waterfall::Waterfall;
use crate::aggregators::yearly::YearTotals;
use crate::aggregators::{boxplot, campaigns, gauge, kpi, waterfall, yearly};
use crate::model::{Selection, WasteRecord};
use crate::stats;
use csv::WriterBuilder;
use std::fs::{self, OpenOptions};
use std::path::Path;

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Serializes a value to pretty JSON and writes it to a local file.
pub fn write_json(path: &str, value: &impl Serialize) -> Result<()> {
    let body = serde_json::to_vec_pretty(value)?;
    fs::write(path, body).with_context(|| format!("failed to write {path}"))?;
    info!(path, "Wrote JSON");
    Ok(())
}

/// Writes a rendered SVG document to a local file.
pub fn write_svg(path: &str, document: &str) -> Result<()> {
    fs::write(path, document).with_context(|| format!("failed to write {path}"))?;
    info!(path, bytes = document.len(), "Wrote SVG");
    Ok(())
}

/// One city in the ranked leaderboard, timestamped per run so the CSV
/// doubles as a history ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityRow {
    pub timestamp: DateTime<Utc>,
    pub rank: usize,
    pub city: String,
    pub total_generated: f64,
    pub population_density: f64,
}

/// Appends a [`CityRow`] to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_city_row(path: &str, row: &CityRow) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(row)?;
    writer.flush()?;

    Ok(())
}

/// Appends the full ranked leaderboard for one run.
pub fn append_city_rankings(path: &str, records: &[WasteRecord]) -> Result<Vec<CityRow>> {
    let now = Utc::now();
    let city_stats = stats::compute_city_stats(records);
    let ranked = stats::rank_cities(&city_stats);

    let rows: Vec<CityRow> = ranked
        .iter()
        .enumerate()
        .map(|(i, (city, stat))| CityRow {
            timestamp: now,
            rank: i + 1,
            city: city.clone(),
            total_generated: stat.total_generated,
            population_density: stat.population_density,
        })
        .collect();

    for row in &rows {
        append_city_row(path, row)?;
    }

    Ok(rows)
}

/// Full aggregate bundle for one city, suitable for archival as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityReport {
    pub schema_version: u32,
    pub city: String,
    pub generated_at: DateTime<Utc>,
    pub kpis: KpiSummary,
    pub yearly: Vec<YearTotals>,
    pub type_breakdown: Vec<PieSlice>,
    pub disposal: Waterfall,
    pub costs: Vec<YearCosts>,
    pub landfill: GaugeStats,
    pub campaigns: CampaignsPage,
}

/// Index written alongside a batch of city reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportIndex {
    pub schema_version: u32,
    pub generated_at: DateTime<Utc>,
    pub cities: Vec<String>,
}

/// Builds the full aggregate bundle for one city.
pub fn build_city_report(records: &[WasteRecord], city: &str) -> CityReport {
    let selection = Selection::for_city(city);
    let city_records: Vec<WasteRecord> =
        selection.city_rows(records).into_iter().cloned().collect();
    let city_stats = stats::compute_city_stats(&city_records);

    CityReport {
        schema_version: 1,
        city: city.to_string(),
        generated_at: Utc::now(),
        kpis: kpi::aggregate(&city_records, &city_stats),
        yearly: yearly::aggregate(records, &selection),
        type_breakdown: pie::aggregate(records, &selection, PieMode::Generated),
        disposal: waterfall::aggregate(records, &selection),
        costs: boxplot::aggregate(records, &selection),
        landfill: gauge::aggregate(records, &selection),
        campaigns: campaigns::aggregate(&city_records, &selection),
    }
}

fn slug(city: &str) -> String {
    city.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

/// Writes one JSON report per city plus an `index.json` into `out_dir`.
#[tracing::instrument(skip(records))]
pub fn write_reports(records: &[WasteRecord], out_dir: &str) -> Result<ReportIndex> {
    fs::create_dir_all(out_dir).with_context(|| format!("failed to create {out_dir}"))?;

    let city_stats = stats::compute_city_stats(records);
    let cities: Vec<String> = city_stats.keys().cloned().collect();

    for city in &cities {
        let report = build_city_report(records, city);
        let path = format!("{out_dir}/{}.json", slug(city));
        write_json(&path, &report)?;
    }

    let index = ReportIndex {
        schema_version: 1,
        generated_at: Utc::now(),
        cities: cities.clone(),
    };
    write_json(&format!("{out_dir}/index.json"), &index)?;

    info!(out_dir, cities = cities.len(), "Report batch complete");
    Ok(index)
}
