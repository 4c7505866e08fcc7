//! Shared dashboard state: the loaded dataset, derived city stats, and the
//! current selection.
//!
//! The loader writes once at construction; every later change goes through
//! a selection setter that replaces the [`Selection`] atomically, so
//! consumers never observe a partially updated state. A failed load is
//! indistinguishable from "no data yet": both yield the empty dashboard.

use std::collections::BTreeMap;

use tracing::warn;

use crate::loader::parse_records;
use crate::model::{CityStat, Selection, WasteRecord};
use crate::session::SessionStore;
use crate::stats::compute_city_stats;

#[derive(Debug, Default)]
pub struct Dashboard {
    records: Vec<WasteRecord>,
    cities: Vec<String>,
    city_stats: BTreeMap<String, CityStat>,
    selection: Selection,
    session: SessionStore,
}

impl Dashboard {
    /// Builds the dashboard from raw CSV bytes. A parse failure is logged
    /// and downgraded to the empty dashboard; consumers render their
    /// placeholder state either way.
    pub fn from_csv_bytes(bytes: &[u8]) -> Self {
        match parse_records(bytes) {
            Ok(records) => Self::from_records(records),
            Err(e) => {
                warn!(error = %e, "Dataset load failed, continuing with empty data");
                Dashboard::default()
            }
        }
    }

    /// Builds the dashboard from already parsed records. The selected city
    /// defaults to the first city in sorted order.
    pub fn from_records(records: Vec<WasteRecord>) -> Self {
        let city_stats = compute_city_stats(&records);
        let cities: Vec<String> = city_stats.keys().cloned().collect();

        let selection = Selection {
            city: cities.first().cloned(),
            ..Selection::default()
        };

        Dashboard {
            records,
            cities,
            city_stats,
            selection,
            session: SessionStore::new(),
        }
    }

    pub fn records(&self) -> &[WasteRecord] {
        &self.records
    }

    /// Distinct city names in sorted order.
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn city_stats(&self) -> &BTreeMap<String, CityStat> {
        &self.city_stats
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Replaces the selected city. Unknown cities are rejected so the
    /// selection always names a city present in the dataset.
    pub fn select_city(&mut self, city: &str) -> bool {
        if !self.cities.iter().any(|c| c == city) {
            return false;
        }
        self.selection.city = Some(city.to_string());
        true
    }

    /// Swaps in a fully formed selection (chart-local filters included).
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
