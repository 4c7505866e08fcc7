//! Centralized chart colors.
//!
//! Every chart draws from this one configuration instead of carrying its
//! own literals, so a palette change lands everywhere at once.

use crate::aggregators::disposal::DisposalCategory;

/// Color configuration shared by all charts.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Rotating series colors for categorical data.
    pub series: Vec<String>,
    /// Fixed colors for the disposal taxonomy.
    pub recycling: String,
    pub landfill: String,
    pub incineration: String,
    pub compost: String,
    pub other: String,
    /// Gauge zone colors: safe, warning, critical.
    pub gauge_zones: [String; 3],
    /// Heatmap gradient endpoints: low value, high value.
    pub heat_low: String,
    pub heat_high: String,
    pub axis: String,
    pub text: String,
    pub grid: String,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            series: [
                "#9ad0f6", "#bfd8a6", "#f7c6c6", "#f7e3b4", "#cbb7e6", "#a6d8c9", "#f2b8d3",
                "#d0d7ff", "#ffd7b5", "#c7ead9",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            recycling: "#2b8a3e".into(),
            landfill: "#2b6cff".into(),
            incineration: "#c73a3a".into(),
            compost: "#e0b21c".into(),
            other: "#6b7280".into(),
            gauge_zones: ["#2b8a3e".into(), "#e0b21c".into(), "#c73a3a".into()],
            heat_low: "#3aafa9".into(),
            heat_high: "#ed553b".into(),
            axis: "#444444".into(),
            text: "#222222".into(),
            grid: "#e9f0ea".into(),
        }
    }
}

impl Palette {
    /// Series color for index `i`, wrapping around.
    pub fn series_color(&self, i: usize) -> &str {
        &self.series[i % self.series.len()]
    }

    pub fn disposal_color(&self, category: DisposalCategory) -> &str {
        match category {
            DisposalCategory::Recycling => &self.recycling,
            DisposalCategory::Landfill => &self.landfill,
            DisposalCategory::Incineration => &self.incineration,
            DisposalCategory::Compost => &self.compost,
            DisposalCategory::Other => &self.other,
        }
    }
}
