//! Per-chart layout: aggregated data plus container dimensions in, flat
//! primitive lists out.
//!
//! Positions are deterministic for fixed inputs. Tooltips carry the true
//! aggregated values, never re-derived ones.

use std::f64::consts::PI;

use crate::aggregators::boxplot::YearCosts;
use crate::aggregators::campaigns::CampaignsPage;
use crate::aggregators::gauge::GaugeStats;
use crate::aggregators::heatmap::HeatmapMatrix;
use crate::aggregators::pie::PieSlice;
use crate::aggregators::radar::RadarChart;
use crate::aggregators::sankey::SankeyGraph;
use crate::aggregators::scatter::CityBubble;
use crate::aggregators::waterfall::Waterfall;
use crate::aggregators::yearly::YearTotals;
use crate::render::palette::Palette;
use crate::render::scale::{BandScale, LinearScale, PointScale};
use crate::render::{Anchor, Primitive};

const MARGIN: f64 = 48.0;
const LABEL_SIZE: f64 = 12.0;

/// Placeholder shown whenever a chart has nothing to draw.
fn placeholder(width: f64, height: f64, palette: &Palette) -> Vec<Primitive> {
    vec![Primitive::Text {
        x: width / 2.0,
        y: height / 2.0,
        content: "No data".into(),
        size: 14.0,
        anchor: Anchor::Middle,
        fill: palette.text.clone(),
    }]
}

fn axes(width: f64, height: f64, palette: &Palette) -> Vec<Primitive> {
    vec![
        Primitive::Line {
            x1: MARGIN,
            y1: height - MARGIN,
            x2: width - MARGIN,
            y2: height - MARGIN,
            stroke: palette.axis.clone(),
            stroke_width: 1.0,
        },
        Primitive::Line {
            x1: MARGIN,
            y1: MARGIN,
            x2: MARGIN,
            y2: height - MARGIN,
            stroke: palette.axis.clone(),
            stroke_width: 1.0,
        },
    ]
}

/// Point on a circle at d3-style angle `a` (clockwise from 12 o'clock).
fn on_circle(cx: f64, cy: f64, r: f64, a: f64) -> (f64, f64) {
    (cx + r * a.sin(), cy - r * a.cos())
}

fn pie_slice_path(cx: f64, cy: f64, r: f64, a0: f64, a1: f64) -> String {
    let (x0, y0) = on_circle(cx, cy, r, a0);
    let (x1, y1) = on_circle(cx, cy, r, a1);
    let large = if a1 - a0 > PI { 1 } else { 0 };
    format!("M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {r:.2} {r:.2} 0 {large} 1 {x1:.2} {y1:.2} Z")
}

fn annular_arc_path(cx: f64, cy: f64, r_in: f64, r_out: f64, a0: f64, a1: f64) -> String {
    let (ox0, oy0) = on_circle(cx, cy, r_out, a0);
    let (ox1, oy1) = on_circle(cx, cy, r_out, a1);
    let (ix0, iy0) = on_circle(cx, cy, r_in, a0);
    let (ix1, iy1) = on_circle(cx, cy, r_in, a1);
    let large = if a1 - a0 > PI { 1 } else { 0 };
    format!(
        "M {ox0:.2} {oy0:.2} A {r_out:.2} {r_out:.2} 0 {large} 1 {ox1:.2} {oy1:.2} \
         L {ix1:.2} {iy1:.2} A {r_in:.2} {r_in:.2} 0 {large} 0 {ix0:.2} {iy0:.2} Z"
    )
}

/// Linear blend between two `#rrggbb` colors.
fn lerp_color(low: &str, high: &str, t: f64) -> String {
    let parse = |hex: &str| {
        let h = hex.trim_start_matches('#');
        let v = u32::from_str_radix(h, 16).unwrap_or(0);
        ((v >> 16 & 0xff) as f64, (v >> 8 & 0xff) as f64, (v & 0xff) as f64)
    };
    let (r0, g0, b0) = parse(low);
    let (r1, g1, b1) = parse(high);
    let t = t.clamp(0.0, 1.0);
    format!(
        "#{:02x}{:02x}{:02x}",
        (r0 + (r1 - r0) * t).round() as u32,
        (g0 + (g1 - g0) * t).round() as u32,
        (b0 + (b1 - b0) * t).round() as u32,
    )
}

/// Yearly generated/recycled trend as two polylines with point markers.
pub fn line_chart(
    totals: &[YearTotals],
    width: f64,
    height: f64,
    palette: &Palette,
) -> Vec<Primitive> {
    if totals.is_empty() {
        return placeholder(width, height, palette);
    }

    let max_y = totals
        .iter()
        .map(|t| t.generated.max(t.recycled))
        .fold(0.0_f64, f64::max);
    let x = PointScale::new(totals.len(), (MARGIN, width - MARGIN));
    let y = LinearScale::new((0.0, max_y * 1.1), (height - MARGIN, MARGIN));

    let mut prims = axes(width, height, palette);

    for tick in y.ticks(5) {
        prims.push(Primitive::Text {
            x: MARGIN - 8.0,
            y: y.apply(tick) + 4.0,
            content: format!("{tick:.0}"),
            size: 10.0,
            anchor: Anchor::End,
            fill: palette.text.clone(),
        });
    }

    for (series, color) in [
        (
            totals.iter().map(|t| t.generated).collect::<Vec<_>>(),
            palette.series_color(0).to_string(),
        ),
        (
            totals.iter().map(|t| t.recycled).collect::<Vec<_>>(),
            palette.series_color(1).to_string(),
        ),
    ] {
        let mut d = String::new();
        for (i, v) in series.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            d.push_str(&format!("{cmd} {:.2} {:.2} ", x.position(i), y.apply(*v)));
        }
        prims.push(Primitive::Path {
            d: d.trim_end().to_string(),
            fill: None,
            stroke: Some(color.clone()),
            stroke_width: 2.0,
            tooltip: None,
        });

        for (i, v) in series.iter().enumerate() {
            prims.push(Primitive::Circle {
                cx: x.position(i),
                cy: y.apply(*v),
                r: 4.0,
                fill: color.clone(),
                tooltip: Some(format!("{}: {:.1} t/day", totals[i].year, v)),
            });
        }
    }

    for (i, t) in totals.iter().enumerate() {
        prims.push(Primitive::Text {
            x: x.position(i),
            y: height - MARGIN + 16.0,
            content: t.year.to_string(),
            size: LABEL_SIZE,
            anchor: Anchor::Middle,
            fill: palette.text.clone(),
        });
    }

    prims
}

/// Type distribution as pie slices starting at 12 o'clock, clockwise in
/// the aggregator's (descending) slice order.
pub fn pie_chart(slices: &[PieSlice], width: f64, height: f64, palette: &Palette) -> Vec<Primitive> {
    let total: f64 = slices.iter().map(|s| s.value).sum();
    if slices.is_empty() || total <= 0.0 {
        return placeholder(width, height, palette);
    }

    let cx = width / 2.0;
    let cy = height / 2.0;
    let r = (width.min(height) / 2.0 - MARGIN / 2.0).max(10.0);

    let mut prims = Vec::new();
    let mut angle = 0.0;
    for (i, slice) in slices.iter().enumerate() {
        let sweep = slice.value / total * 2.0 * PI;
        prims.push(Primitive::Path {
            d: pie_slice_path(cx, cy, r, angle, angle + sweep),
            fill: Some(palette.series_color(i).to_string()),
            stroke: None,
            stroke_width: 0.0,
            tooltip: Some(format!(
                "{}: {:.1} t/day ({:.1}%)",
                slice.waste_type,
                slice.value,
                slice.value / total * 100.0
            )),
        });

        let (lx, ly) = on_circle(cx, cy, r * 0.7, angle + sweep / 2.0);
        prims.push(Primitive::Text {
            x: lx,
            y: ly,
            content: slice.waste_type.clone(),
            size: LABEL_SIZE,
            anchor: Anchor::Middle,
            fill: palette.text.clone(),
        });

        angle += sweep;
    }

    prims
}

/// One page of the campaigns ranking as vertical bars.
pub fn bar_chart(
    page: &CampaignsPage,
    width: f64,
    height: f64,
    palette: &Palette,
) -> Vec<Primitive> {
    if page.items.is_empty() {
        return placeholder(width, height, palette);
    }

    let max = page.items.iter().map(|i| i.campaigns).max().unwrap_or(1) as f64;
    let x = BandScale::new(page.items.len(), (MARGIN, width - MARGIN), 0.25);
    let y = LinearScale::new((0.0, max), (height - MARGIN, MARGIN));

    let mut prims = axes(width, height, palette);
    for (i, item) in page.items.iter().enumerate() {
        let top = y.apply(item.campaigns as f64);
        prims.push(Primitive::Rect {
            x: x.position(i),
            y: top,
            width: x.bandwidth(),
            height: (height - MARGIN - top).max(0.0),
            fill: palette.series_color(i).to_string(),
            tooltip: Some(format!("{}: {} campaigns", item.city, item.campaigns)),
        });
        prims.push(Primitive::Text {
            x: x.center(i),
            y: height - MARGIN + 16.0,
            content: item.city.clone(),
            size: LABEL_SIZE,
            anchor: Anchor::Middle,
            fill: palette.text.clone(),
        });
    }

    prims
}

/// Dense year-by-type heatmap with a two-color value gradient.
pub fn heatmap_chart(
    matrix: &HeatmapMatrix,
    width: f64,
    height: f64,
    palette: &Palette,
) -> Vec<Primitive> {
    if matrix.cells.is_empty() {
        return placeholder(width, height, palette);
    }

    let vmax = matrix.cells.iter().fold(0.0_f64, |acc, v| acc.max(*v));
    let x = BandScale::new(matrix.years.len(), (MARGIN * 2.0, width - MARGIN), 0.0);
    let y = BandScale::new(matrix.waste_types.len(), (MARGIN, height - MARGIN), 0.0);

    let mut prims = Vec::new();
    for (row, waste_type) in matrix.waste_types.iter().enumerate() {
        for (col, year) in matrix.years.iter().enumerate() {
            let value = matrix.cells[row * matrix.years.len() + col];
            let t = if vmax > 0.0 { value / vmax } else { 0.0 };
            prims.push(Primitive::Rect {
                x: x.position(col),
                y: y.position(row),
                width: x.bandwidth(),
                height: y.bandwidth(),
                fill: lerp_color(&palette.heat_low, &palette.heat_high, t),
                tooltip: Some(format!("{waste_type} / {year}: {value:.1} t/day")),
            });
        }

        prims.push(Primitive::Text {
            x: MARGIN * 2.0 - 6.0,
            y: y.center(row) + 4.0,
            content: waste_type.clone(),
            size: LABEL_SIZE,
            anchor: Anchor::End,
            fill: palette.text.clone(),
        });
    }

    for (col, year) in matrix.years.iter().enumerate() {
        prims.push(Primitive::Text {
            x: x.center(col),
            y: height - MARGIN + 16.0,
            content: year.to_string(),
            size: LABEL_SIZE,
            anchor: Anchor::Middle,
            fill: palette.text.clone(),
        });
    }

    prims
}

/// Semicircular occupancy gauge: colored zones, a needle, and the true
/// (unclamped) percentage as the caption.
pub fn gauge_chart(stats: &GaugeStats, width: f64, height: f64, palette: &Palette) -> Vec<Primitive> {
    let cx = width / 2.0;
    let cy = height * 0.75;
    let r = (width.min(height * 2.0) * 0.4).max(20.0);

    // Gauge angles run the top semicircle, -90° to +90° in d3 convention.
    let angle_for = |pct: f64| -PI / 2.0 + PI * (pct / 100.0);

    let mut prims = Vec::new();
    let zones = [(0.0, 60.0, 0), (60.0, 85.0, 1), (85.0, 100.0, 2)];
    for (from, to, zone) in zones {
        prims.push(Primitive::Path {
            d: annular_arc_path(cx, cy, r * 0.68, r, angle_for(from), angle_for(to)),
            fill: Some(palette.gauge_zones[zone].clone()),
            stroke: None,
            stroke_width: 0.0,
            tooltip: None,
        });
    }

    // Needle clamps visually at 100; the caption keeps the true value.
    let needle_pct = stats.percent.clamp(0.0, 100.0);
    let (nx, ny) = on_circle(cx, cy, r * 0.92, angle_for(needle_pct));
    prims.push(Primitive::Line {
        x1: cx,
        y1: cy,
        x2: nx,
        y2: ny,
        stroke: palette.axis.clone(),
        stroke_width: 3.0,
    });

    prims.push(Primitive::Text {
        x: cx,
        y: cy + 24.0,
        content: format!(
            "{:.1}% ({:.0} / {:.0} t)",
            stats.percent, stats.generated, stats.capacity
        ),
        size: 14.0,
        anchor: Anchor::Middle,
        fill: palette.text.clone(),
    });

    prims
}

/// Two-column sankey: source nodes stacked left, disposal categories
/// right, links as cubic beziers whose width follows the floored layout
/// value while tooltips keep the true flow.
pub fn sankey_chart(
    graph: &SankeyGraph,
    width: f64,
    height: f64,
    palette: &Palette,
) -> Vec<Primitive> {
    if graph.links.is_empty() {
        return placeholder(width, height, palette);
    }

    let node_width = 18.0;
    let padding = 14.0;
    let left_x = MARGIN;
    let right_x = width - MARGIN - node_width;

    // Stack totals per side, in graph order.
    let mut targets: Vec<crate::aggregators::disposal::DisposalCategory> = Vec::new();
    for l in &graph.links {
        if !targets.contains(&l.target) {
            targets.push(l.target);
        }
    }

    let side_total = |labels: usize, sum: f64| {
        let usable = height - 2.0 * MARGIN - padding * (labels.saturating_sub(1)) as f64;
        if sum > 0.0 { usable / sum } else { 0.0 }
    };

    let source_sum = |s: &str| -> f64 {
        graph
            .links
            .iter()
            .filter(|l| l.source == s)
            .map(|l| l.layout_value)
            .sum()
    };
    let target_sum = |t| -> f64 {
        graph
            .links
            .iter()
            .filter(|l| l.target == t)
            .map(|l| l.layout_value)
            .sum()
    };

    let total: f64 = graph.links.iter().map(|l| l.layout_value).sum();
    let src_scale = side_total(graph.sources.len(), total);
    let dst_scale = side_total(targets.len(), total);

    let mut prims = Vec::new();

    // Node rectangles, with running y cursors reused for link anchoring.
    let mut src_tops: Vec<(String, f64, f64)> = Vec::new(); // (label, top, cursor)
    let mut y = MARGIN;
    for s in &graph.sources {
        let h = source_sum(s) * src_scale;
        prims.push(Primitive::Rect {
            x: left_x,
            y,
            width: node_width,
            height: h,
            fill: palette.series_color(src_tops.len()).to_string(),
            tooltip: Some(s.clone()),
        });
        prims.push(Primitive::Text {
            x: left_x - 6.0,
            y: y + h / 2.0 + 4.0,
            content: s.clone(),
            size: LABEL_SIZE,
            anchor: Anchor::End,
            fill: palette.text.clone(),
        });
        src_tops.push((s.clone(), y, y));
        y += h + padding;
    }

    let mut dst_tops: Vec<(crate::aggregators::disposal::DisposalCategory, f64)> = Vec::new();
    let mut y = MARGIN;
    for t in &targets {
        let h = target_sum(*t) * dst_scale;
        prims.push(Primitive::Rect {
            x: right_x,
            y,
            width: node_width,
            height: h,
            fill: palette.disposal_color(*t).to_string(),
            tooltip: Some(t.label().to_string()),
        });
        prims.push(Primitive::Text {
            x: right_x + node_width + 6.0,
            y: y + h / 2.0 + 4.0,
            content: t.label().to_string(),
            size: LABEL_SIZE,
            anchor: Anchor::Start,
            fill: palette.text.clone(),
        });
        dst_tops.push((*t, y));
        y += h + padding;
    }

    // Links, anchored at each node's running cursor.
    let mut dst_cursors: Vec<f64> = dst_tops.iter().map(|(_, top)| *top).collect();
    for link in &graph.links {
        let sw = link.layout_value * src_scale;
        let src = src_tops
            .iter_mut()
            .find(|(label, _, _)| label == &link.source);
        let dst_idx = dst_tops.iter().position(|(t, _)| *t == link.target);
        let (Some(src), Some(dst_idx)) = (src, dst_idx) else {
            continue;
        };

        let sy = src.2 + sw / 2.0;
        let ty = dst_cursors[dst_idx] + link.layout_value * dst_scale / 2.0;
        src.2 += sw;
        dst_cursors[dst_idx] += link.layout_value * dst_scale;

        let x0 = left_x + node_width;
        let x1 = right_x;
        let mid = (x0 + x1) / 2.0;
        prims.push(Primitive::Path {
            d: format!("M {x0:.2} {sy:.2} C {mid:.2} {sy:.2} {mid:.2} {ty:.2} {x1:.2} {ty:.2}"),
            fill: None,
            stroke: Some(palette.disposal_color(link.target).to_string()),
            stroke_width: sw.max(1.0),
            tooltip: Some(format!(
                "{} → {}: {:.1} t/day",
                link.source,
                link.target.label(),
                link.value
            )),
        });
    }

    prims
}

/// Per-year cost boxes with whiskers and outlier markers; empty years get
/// an explicit dash marker.
pub fn boxplot_chart(
    years: &[YearCosts],
    width: f64,
    height: f64,
    palette: &Palette,
) -> Vec<Primitive> {
    if years.iter().all(|y| y.summary.is_none()) {
        return placeholder(width, height, palette);
    }

    let vmax = years
        .iter()
        .filter_map(|y| y.summary.as_ref())
        .flat_map(|s| {
            std::iter::once(s.whisker_high).chain(s.outliers.iter().copied())
        })
        .fold(0.0_f64, f64::max);

    let x = BandScale::new(years.len(), (MARGIN, width - MARGIN), 0.4);
    let y = LinearScale::new((0.0, vmax * 1.05), (height - MARGIN, MARGIN));

    let mut prims = axes(width, height, palette);
    for (i, year) in years.iter().enumerate() {
        prims.push(Primitive::Text {
            x: x.center(i),
            y: height - MARGIN + 16.0,
            content: year.year.to_string(),
            size: LABEL_SIZE,
            anchor: Anchor::Middle,
            fill: palette.text.clone(),
        });

        let Some(s) = &year.summary else {
            prims.push(Primitive::Text {
                x: x.center(i),
                y: height / 2.0,
                content: "—".into(),
                size: 14.0,
                anchor: Anchor::Middle,
                fill: palette.text.clone(),
            });
            continue;
        };

        let color = palette.series_color(i).to_string();
        let cx = x.center(i);
        let bw = x.bandwidth();

        prims.push(Primitive::Line {
            x1: cx,
            y1: y.apply(s.whisker_low),
            x2: cx,
            y2: y.apply(s.whisker_high),
            stroke: color.clone(),
            stroke_width: 1.0,
        });
        prims.push(Primitive::Rect {
            x: x.position(i),
            y: y.apply(s.q3),
            width: bw,
            height: (y.apply(s.q1) - y.apply(s.q3)).max(0.0),
            fill: color.clone(),
            tooltip: Some(format!(
                "{}: Q1 {:.0}, median {:.0}, Q3 {:.0} ({} samples)",
                year.year, s.q1, s.median, s.q3, year.sample_count
            )),
        });
        prims.push(Primitive::Line {
            x1: x.position(i),
            y1: y.apply(s.median),
            x2: x.position(i) + bw,
            y2: y.apply(s.median),
            stroke: palette.axis.clone(),
            stroke_width: 2.0,
        });

        for outlier in &s.outliers {
            prims.push(Primitive::Circle {
                cx,
                cy: y.apply(*outlier),
                r: 3.0,
                fill: palette.incineration.clone(),
                tooltip: Some(format!("{}: outlier {:.0}", year.year, outlier)),
            });
        }
    }

    prims
}

/// Radar polygons over the fixed axis set, one per compared city.
pub fn radar_chart(chart: &RadarChart, width: f64, height: f64, palette: &Palette) -> Vec<Primitive> {
    if chart.snapshots.is_empty() {
        return placeholder(width, height, palette);
    }

    let cx = width / 2.0;
    let cy = height / 2.0;
    let r = (width.min(height) / 2.0 - MARGIN).max(20.0);
    let n = chart.axes.len();
    let angle_of = |axis: usize| 2.0 * PI * axis as f64 / n as f64;

    let mut prims = Vec::new();
    for (axis, label) in chart.axes.iter().enumerate() {
        let (ax, ay) = on_circle(cx, cy, r, angle_of(axis));
        prims.push(Primitive::Line {
            x1: cx,
            y1: cy,
            x2: ax,
            y2: ay,
            stroke: palette.grid.clone(),
            stroke_width: 1.0,
        });
        let (tx, ty) = on_circle(cx, cy, r + 12.0, angle_of(axis));
        prims.push(Primitive::Text {
            x: tx,
            y: ty,
            content: label.clone(),
            size: 10.0,
            anchor: Anchor::Middle,
            fill: palette.text.clone(),
        });
    }

    for (i, snap) in chart.snapshots.iter().enumerate() {
        let mut d = String::new();
        for (axis, norm) in snap.normalized.iter().enumerate() {
            let (px, py) = on_circle(cx, cy, r * norm, angle_of(axis));
            let cmd = if axis == 0 { 'M' } else { 'L' };
            d.push_str(&format!("{cmd} {px:.2} {py:.2} "));
        }
        d.push('Z');
        prims.push(Primitive::Path {
            d,
            fill: None,
            stroke: Some(palette.series_color(i).to_string()),
            stroke_width: 2.0,
            tooltip: Some(match snap.year {
                Some(year) => format!("{} ({year})", snap.city),
                None => snap.city.clone(),
            }),
        });
    }

    prims
}

/// Density-vs-volume bubbles, radius square-root scaled on mean cost so
/// area tracks cost.
pub fn scatter_chart(
    bubbles: &[CityBubble],
    width: f64,
    height: f64,
    palette: &Palette,
) -> Vec<Primitive> {
    if bubbles.is_empty() {
        return placeholder(width, height, palette);
    }

    let x_max = bubbles
        .iter()
        .map(|b| b.population_density)
        .fold(0.0_f64, f64::max);
    let y_max = bubbles
        .iter()
        .map(|b| b.total_generated)
        .fold(0.0_f64, f64::max);
    let cost_max = bubbles.iter().map(|b| b.mean_cost).fold(0.0_f64, f64::max);

    let x = LinearScale::new((0.0, x_max * 1.05), (MARGIN, width - MARGIN));
    let y = LinearScale::new((0.0, y_max * 1.05), (height - MARGIN, MARGIN));

    // Color keyed by primary type, in first-seen order.
    let mut types: Vec<&str> = Vec::new();
    for b in bubbles {
        if !types.contains(&b.primary_type.as_str()) {
            types.push(&b.primary_type);
        }
    }

    let mut prims = axes(width, height, palette);
    for b in bubbles {
        let r = if cost_max > 0.0 {
            4.0 + (b.mean_cost / cost_max).sqrt() * 14.0
        } else {
            4.0
        };
        let type_idx = types.iter().position(|t| *t == b.primary_type).unwrap_or(0);
        prims.push(Primitive::Circle {
            cx: x.apply(b.population_density),
            cy: y.apply(b.total_generated),
            r,
            fill: palette.series_color(type_idx).to_string(),
            tooltip: Some(format!(
                "{}: {:.1} t/day, {:.0} people/km², cost {:.0}/t, mostly {}",
                b.city, b.total_generated, b.population_density, b.mean_cost, b.primary_type
            )),
        });
    }

    prims
}

/// Decomposition waterfall: the collected total, then each category
/// dropping the running level toward zero.
pub fn waterfall_chart(
    waterfall: &Waterfall,
    width: f64,
    height: f64,
    palette: &Palette,
) -> Vec<Primitive> {
    let Waterfall::Breakdown { collected, steps } = waterfall else {
        return placeholder(width, height, palette);
    };

    let x = BandScale::new(steps.len() + 1, (MARGIN, width - MARGIN), 0.3);
    let y = LinearScale::new((0.0, *collected), (height - MARGIN, MARGIN));

    let mut prims = axes(width, height, palette);
    prims.push(Primitive::Rect {
        x: x.position(0),
        y: y.apply(*collected),
        width: x.bandwidth(),
        height: (y.apply(0.0) - y.apply(*collected)).max(0.0),
        fill: palette.series_color(0).to_string(),
        tooltip: Some(format!("Collected: {collected:.1} t/day")),
    });
    prims.push(Primitive::Text {
        x: x.center(0),
        y: height - MARGIN + 16.0,
        content: "Collected".into(),
        size: LABEL_SIZE,
        anchor: Anchor::Middle,
        fill: palette.text.clone(),
    });

    let mut level = *collected;
    for (i, step) in steps.iter().enumerate() {
        let top = level;
        level -= step.value;
        prims.push(Primitive::Rect {
            x: x.position(i + 1),
            y: y.apply(top),
            width: x.bandwidth(),
            height: (y.apply(level.max(0.0)) - y.apply(top)).max(0.0),
            fill: palette.disposal_color(step.category).to_string(),
            tooltip: Some(format!(
                "{}: {:.1} t/day ({:.1}%)",
                step.category.label(),
                step.value,
                step.value / collected * 100.0
            )),
        });
        prims.push(Primitive::Text {
            x: x.center(i + 1),
            y: height - MARGIN + 16.0,
            content: step.category.label().to_string(),
            size: LABEL_SIZE,
            anchor: Anchor::Middle,
            fill: palette.text.clone(),
        });
    }

    prims
}
