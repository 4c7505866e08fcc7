//! Per-chart data aggregation.
//!
//! One pure function per visualization: each takes the full record slice
//! plus the current [`crate::model::Selection`] and produces the exact
//! shape its chart needs. No aggregator holds state; recomputation on any
//! selection change is idempotent, and an absent selection or empty
//! dataset always yields an empty or zero-default result rather than an
//! error.

pub mod boxplot;
pub mod campaigns;
pub mod disposal;
pub mod gauge;
pub mod heatmap;
pub mod kpi;
pub mod pie;
pub mod radar;
pub mod sankey;
pub mod scatter;
pub mod util;
pub mod waterfall;
pub mod yearly;
