//! Flow graph for the sankey diagram: filtered sources on the left,
//! disposal categories on the right.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::aggregators::disposal::{self, DisposalCategory};
use crate::model::{SankeyFilter, Selection, WasteRecord};

/// Sources past this rank are merged into an "Others" bucket.
const TOP_SOURCES: usize = 4;

/// Links thinner than this fraction of the max link are drawn at the floor
/// width; the true value is kept for tooltips.
const MIN_FLOW_FRACTION: f64 = 0.05;

pub const OTHERS_LABEL: &str = "Others";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SankeyLink {
    pub source: String,
    pub target: DisposalCategory,
    /// True aggregated flow, used for tooltips and conservation checks.
    pub value: f64,
    /// Flow after the legibility floor, used only for layout.
    pub layout_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SankeyGraph {
    /// Source node labels in display order (top sources by volume, then
    /// the merged bucket).
    pub sources: Vec<String>,
    pub links: Vec<SankeyLink>,
}

/// Aggregates flow from filtered sources to disposal categories.
///
/// Rows are filtered by the selected city and the sankey filter; the
/// source label is the filter field's value (waste type when no filter is
/// set). Each row's free-text disposal method is classified into the fixed
/// taxonomy.
pub fn aggregate(records: &[WasteRecord], selection: &Selection) -> SankeyGraph {
    let rows: Vec<&WasteRecord> = selection
        .city_rows(records)
        .into_iter()
        .filter(|r| match &selection.sankey {
            Some(SankeyFilter::WasteType(t)) => &r.waste_type == t,
            Some(SankeyFilter::Year(y)) => r.year == *y,
            None => true,
        })
        .collect();

    let source_label = |r: &WasteRecord| match &selection.sankey {
        Some(SankeyFilter::Year(_)) => r.year.to_string(),
        _ => r.waste_type.clone(),
    };

    let mut source_totals: BTreeMap<String, f64> = BTreeMap::new();
    let mut flows: BTreeMap<(String, DisposalCategory), f64> = BTreeMap::new();
    for r in &rows {
        let src = source_label(r);
        let dst = disposal::classify(&r.disposal_method);
        *source_totals.entry(src.clone()).or_default() += r.value_tons_per_day;
        *flows.entry((src, dst)).or_default() += r.value_tons_per_day;
    }

    // Top sources by volume descending, ties by label ascending.
    let mut ranked: Vec<(String, f64)> = source_totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut sources: Vec<String> = ranked
        .iter()
        .take(TOP_SOURCES)
        .map(|(label, _)| label.clone())
        .collect();
    let merged = ranked.len() > TOP_SOURCES;
    if merged {
        sources.push(OTHERS_LABEL.to_string());
    }

    let display_source = |label: &str| {
        if sources.iter().take(TOP_SOURCES).any(|s| s == label) {
            label.to_string()
        } else {
            OTHERS_LABEL.to_string()
        }
    };

    let mut merged_flows: BTreeMap<(usize, DisposalCategory), f64> = BTreeMap::new();
    for ((src, dst), value) in flows {
        let label = display_source(&src);
        let idx = sources
            .iter()
            .position(|s| *s == label)
            .unwrap_or(sources.len());
        *merged_flows.entry((idx, dst)).or_default() += value;
    }

    let max_value = merged_flows.values().fold(0.0_f64, |acc, v| acc.max(*v));
    let floor = MIN_FLOW_FRACTION * max_value;

    let links = merged_flows
        .into_iter()
        .map(|((idx, target), value)| SankeyLink {
            source: sources[idx].clone(),
            target,
            value,
            layout_value: value.max(floor),
        })
        .collect();

    SankeyGraph { sources, links }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(waste_type: &str, year: i32, value: f64, disposal: &str) -> WasteRecord {
        WasteRecord {
            city: "A".into(),
            waste_type: waste_type.into(),
            year,
            value_tons_per_day: value,
            disposal_method: disposal.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_flow_conservation_on_true_values() {
        let records = vec![
            record("Plastic", 2020, 60.0, "Recycling"),
            record("Plastic", 2020, 40.0, "Landfill"),
            record("Organic", 2020, 25.0, "Composting"),
        ];

        let mut sel = Selection::for_city("A");
        sel.sankey = Some(SankeyFilter::Year(2020));
        let graph = aggregate(&records, &sel);

        let link_sum: f64 = graph.links.iter().map(|l| l.value).sum();
        assert_eq!(link_sum, 125.0);
    }

    #[test]
    fn test_type_filter_narrows_rows() {
        let records = vec![
            record("Plastic", 2020, 60.0, "Recycling"),
            record("Organic", 2020, 25.0, "Composting"),
        ];

        let mut sel = Selection::for_city("A");
        sel.sankey = Some(SankeyFilter::WasteType("Plastic".into()));
        let graph = aggregate(&records, &sel);

        assert_eq!(graph.sources, vec!["Plastic"]);
        assert_eq!(graph.links.len(), 1);
        assert_eq!(graph.links[0].target, DisposalCategory::Recycling);
    }

    #[test]
    fn test_small_sources_merge_into_others() {
        let records = vec![
            record("T1", 2020, 100.0, "Landfill"),
            record("T2", 2020, 90.0, "Landfill"),
            record("T3", 2020, 80.0, "Landfill"),
            record("T4", 2020, 70.0, "Landfill"),
            record("T5", 2020, 5.0, "Recycling"),
            record("T6", 2020, 3.0, "Recycling"),
        ];

        let graph = aggregate(&records, &Selection::for_city("A"));
        assert_eq!(graph.sources.len(), TOP_SOURCES + 1);
        assert_eq!(graph.sources.last().map(String::as_str), Some(OTHERS_LABEL));

        let others: Vec<&SankeyLink> = graph
            .links
            .iter()
            .filter(|l| l.source == OTHERS_LABEL)
            .collect();
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].value, 8.0);
    }

    #[test]
    fn test_floor_applies_to_layout_value_only() {
        let records = vec![
            record("T1", 2020, 1000.0, "Landfill"),
            record("T2", 2020, 1.0, "Recycling"),
        ];

        let graph = aggregate(&records, &Selection::for_city("A"));
        let thin = graph.links.iter().find(|l| l.source == "T2").unwrap();
        assert_eq!(thin.value, 1.0);
        assert_eq!(thin.layout_value, 50.0); // 5% of the 1000 max
    }

    #[test]
    fn test_empty_input() {
        let graph = aggregate(&[], &Selection::for_city("A"));
        assert!(graph.sources.is_empty());
        assert!(graph.links.is_empty());
    }
}
