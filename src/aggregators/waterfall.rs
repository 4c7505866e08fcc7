//! Waterfall breakdown of the selected city's collected waste into
//! disposal categories.

use serde::Serialize;

use crate::aggregators::disposal::{self, DisposalCategory};
use crate::model::{Selection, WasteRecord};

/// One step of the waterfall, in display order after "Collected".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterfallStep {
    pub category: DisposalCategory,
    pub value: f64,
}

/// Waterfall aggregation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Waterfall {
    /// Fewer than two non-zero steps remain; the chart renders a
    /// placeholder.
    InsufficientData,
    Breakdown {
        collected: f64,
        steps: Vec<WaterfallStep>,
    },
}

/// Splits the city's total collected tonnage across the disposal taxonomy.
///
/// The recycled step prefers disposal-tagged rows and falls back to the
/// recycling-rate estimate when none exist. Whatever the categorized steps
/// do not cover lands in a residual "Other" step. Zero steps are omitted;
/// fewer than two remaining steps (the collected total plus at least one
/// category) signal [`Waterfall::InsufficientData`].
pub fn aggregate(records: &[WasteRecord], selection: &Selection) -> Waterfall {
    if selection.city.is_none() {
        return Waterfall::InsufficientData;
    }
    let rows = selection.city_rows(records);
    if rows.is_empty() {
        return Waterfall::InsufficientData;
    }

    let collected: f64 = rows.iter().map(|r| r.value_tons_per_day).sum();

    let mut recycled = 0.0;
    let mut landfill = 0.0;
    let mut incinerated = 0.0;
    let mut compost = 0.0;
    for r in &rows {
        match disposal::classify(&r.disposal_method) {
            DisposalCategory::Recycling => recycled += r.value_tons_per_day,
            DisposalCategory::Landfill => landfill += r.value_tons_per_day,
            DisposalCategory::Incineration => incinerated += r.value_tons_per_day,
            DisposalCategory::Compost => compost += r.value_tons_per_day,
            DisposalCategory::Other => {}
        }
    }

    if recycled <= 0.0 {
        let by_rate: f64 = rows.iter().map(|r| r.recycled_estimate()).sum();
        if by_rate > 0.0 {
            recycled = by_rate;
        }
    }

    let categorized = recycled + compost + landfill + incinerated;
    let other = (collected - categorized).max(0.0);

    let mut steps = Vec::new();
    for (category, value) in [
        (DisposalCategory::Recycling, recycled),
        (DisposalCategory::Compost, compost),
        (DisposalCategory::Landfill, landfill),
        (DisposalCategory::Incineration, incinerated),
        (DisposalCategory::Other, other),
    ] {
        if value > 0.0 {
            steps.push(WaterfallStep { category, value });
        }
    }

    // "Collected" itself counts as a step; at least one category must join it.
    if steps.is_empty() || collected <= 0.0 {
        return Waterfall::InsufficientData;
    }

    Waterfall::Breakdown { collected, steps }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: f64, rate: f64, disposal: &str) -> WasteRecord {
        WasteRecord {
            city: "A".into(),
            value_tons_per_day: value,
            recycling_rate_percent: rate,
            disposal_method: disposal.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_categories_reconstruct_total() {
        let records = vec![
            record(60.0, 0.0, "Recycling"),
            record(25.0, 0.0, "Landfill"),
            record(10.0, 0.0, "Incineration"),
            record(5.0, 0.0, "Open burning"), // taxonomy Other -> residual
        ];

        match aggregate(&records, &Selection::for_city("A")) {
            Waterfall::Breakdown { collected, steps } => {
                assert_eq!(collected, 100.0);
                let sum: f64 = steps.iter().map(|s| s.value).sum();
                assert_eq!(sum, collected);
            }
            Waterfall::InsufficientData => panic!("expected breakdown"),
        }
    }

    #[test]
    fn test_recycled_falls_back_to_rate_estimate() {
        // No disposal text matches recycling, but rates are reported.
        let records = vec![record(100.0, 30.0, "Unknown"), record(50.0, 0.0, "Unknown")];

        match aggregate(&records, &Selection::for_city("A")) {
            Waterfall::Breakdown { steps, .. } => {
                let recycled = steps
                    .iter()
                    .find(|s| s.category == DisposalCategory::Recycling)
                    .unwrap();
                assert_eq!(recycled.value, 30.0);
            }
            Waterfall::InsufficientData => panic!("expected breakdown"),
        }
    }

    #[test]
    fn test_zero_steps_omitted() {
        let records = vec![record(80.0, 0.0, "Landfill")];

        match aggregate(&records, &Selection::for_city("A")) {
            Waterfall::Breakdown { steps, .. } => {
                assert_eq!(steps.len(), 1);
                assert_eq!(steps[0].category, DisposalCategory::Landfill);
            }
            Waterfall::InsufficientData => panic!("expected breakdown"),
        }
    }

    #[test]
    fn test_insufficient_data() {
        assert_eq!(
            aggregate(&[], &Selection::for_city("A")),
            Waterfall::InsufficientData
        );
        assert_eq!(
            aggregate(&[record(0.0, 0.0, "")], &Selection::for_city("A")),
            Waterfall::InsufficientData
        );
    }
}
