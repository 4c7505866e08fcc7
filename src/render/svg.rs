//! Serialization of layout primitives into a standalone SVG document.

use crate::render::{Anchor, Primitive};

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn fmt(v: f64) -> String {
    // Two decimals is plenty for screen space and keeps documents stable.
    format!("{v:.2}")
}

fn title(tooltip: &Option<String>) -> String {
    match tooltip {
        Some(t) => format!("<title>{}</title>", escape(t)),
        None => String::new(),
    }
}

/// Emits a complete SVG document for a primitive list. Deterministic for
/// fixed inputs.
pub fn to_svg(width: f64, height: f64, primitives: &[Primitive]) -> String {
    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}">"#,
        fmt(width),
        fmt(height)
    );

    for p in primitives {
        match p {
            Primitive::Rect {
                x,
                y,
                width,
                height,
                fill,
                tooltip,
            } => {
                out.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}">{}</rect>"#,
                    fmt(*x),
                    fmt(*y),
                    fmt(*width),
                    fmt(*height),
                    escape(fill),
                    title(tooltip)
                ));
            }
            Primitive::Circle {
                cx,
                cy,
                r,
                fill,
                tooltip,
            } => {
                out.push_str(&format!(
                    r#"<circle cx="{}" cy="{}" r="{}" fill="{}">{}</circle>"#,
                    fmt(*cx),
                    fmt(*cy),
                    fmt(*r),
                    escape(fill),
                    title(tooltip)
                ));
            }
            Primitive::Line {
                x1,
                y1,
                x2,
                y2,
                stroke,
                stroke_width,
            } => {
                out.push_str(&format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                    fmt(*x1),
                    fmt(*y1),
                    fmt(*x2),
                    fmt(*y2),
                    escape(stroke),
                    fmt(*stroke_width)
                ));
            }
            Primitive::Path {
                d,
                fill,
                stroke,
                stroke_width,
                tooltip,
            } => {
                let fill = fill.as_deref().unwrap_or("none");
                let stroke = stroke.as_deref().unwrap_or("none");
                out.push_str(&format!(
                    r#"<path d="{}" fill="{}" stroke="{}" stroke-width="{}">{}</path>"#,
                    escape(d),
                    escape(fill),
                    escape(stroke),
                    fmt(*stroke_width),
                    title(tooltip)
                ));
            }
            Primitive::Text {
                x,
                y,
                content,
                size,
                anchor,
                fill,
            } => {
                let anchor = match anchor {
                    Anchor::Start => "start",
                    Anchor::Middle => "middle",
                    Anchor::End => "end",
                };
                out.push_str(&format!(
                    r#"<text x="{}" y="{}" font-size="{}" text-anchor="{}" fill="{}">{}</text>"#,
                    fmt(*x),
                    fmt(*y),
                    fmt(*size),
                    anchor,
                    escape(fill),
                    escape(content)
                ));
            }
        }
    }

    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_is_deterministic() {
        let prims = vec![Primitive::Rect {
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
            fill: "#abc".into(),
            tooltip: Some("value: 42".into()),
        }];

        let a = to_svg(100.0, 50.0, &prims);
        let b = to_svg(100.0, 50.0, &prims);
        assert_eq!(a, b);
        assert!(a.starts_with("<svg"));
        assert!(a.contains("<title>value: 42</title>"));
    }

    #[test]
    fn test_escapes_markup_in_text() {
        let prims = vec![Primitive::Text {
            x: 0.0,
            y: 0.0,
            content: "A < B & C".into(),
            size: 12.0,
            anchor: Anchor::Start,
            fill: "#000".into(),
        }];

        let svg = to_svg(10.0, 10.0, &prims);
        assert!(svg.contains("A &lt; B &amp; C"));
    }

    #[test]
    fn test_empty_primitives_is_valid_document() {
        let svg = to_svg(10.0, 10.0, &[]);
        assert_eq!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10.00 10.00"></svg>"#
        );
    }
}
