//! Year × waste-type heatmap matrix for the selected city.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::model::{Selection, WasteRecord};

/// Dense cross-tabulation of generated tonnage.
///
/// `cells` is row-major over `waste_types` × `years`; cells with no
/// matching rows hold 0 rather than being omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeatmapMatrix {
    pub years: Vec<i32>,
    pub waste_types: Vec<String>,
    pub cells: Vec<f64>,
}

impl HeatmapMatrix {
    pub fn value(&self, waste_type: &str, year: i32) -> Option<f64> {
        let row = self.waste_types.iter().position(|t| t == waste_type)?;
        let col = self.years.iter().position(|y| *y == year)?;
        self.cells.get(row * self.years.len() + col).copied()
    }
}

/// Cross-tabulates sum of generated tonnage by (year, waste type) over the
/// selected city's rows. Years ascending, types ascending; the matrix is
/// dense over the observed year set × type set.
pub fn aggregate(records: &[WasteRecord], selection: &Selection) -> HeatmapMatrix {
    let rows = selection.city_rows(records);

    let years: Vec<i32> = rows
        .iter()
        .map(|r| r.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let waste_types: Vec<String> = rows
        .iter()
        .map(|r| r.waste_type.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut sums: BTreeMap<(i32, &str), f64> = BTreeMap::new();
    for r in &rows {
        *sums.entry((r.year, r.waste_type.as_str())).or_default() += r.value_tons_per_day;
    }

    let mut cells = Vec::with_capacity(years.len() * waste_types.len());
    for t in &waste_types {
        for y in &years {
            cells.push(sums.get(&(*y, t.as_str())).copied().unwrap_or(0.0));
        }
    }

    HeatmapMatrix {
        years,
        waste_types,
        cells,
    }
}
