//! Chart rendering: pure geometry from aggregated data plus container
//! dimensions, serialized to standalone SVG.
//!
//! Layout never re-aggregates: a resize re-runs the layout function on the
//! same aggregate. Hover values ride along as native SVG `<title>`
//! tooltips carrying the true aggregated numbers.

pub mod geometry;
pub mod palette;
pub mod scale;
pub mod svg;

/// Horizontal text anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// One visual primitive with screen-space coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
        tooltip: Option<String>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: String,
        tooltip: Option<String>,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: String,
        stroke_width: f64,
    },
    Path {
        d: String,
        fill: Option<String>,
        stroke: Option<String>,
        stroke_width: f64,
        tooltip: Option<String>,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        size: f64,
        anchor: Anchor,
        fill: String,
    },
}
