//! SVG renderer: serializes recorded connector layers as one SVG overlay.
//!
//! Layers are stacked bottom → top → highlight, matching the canvas order
//! of a browser host.

use crate::connectors::ConnectorLayers;
use crate::renderers::canvas::{DrawOp, RecordingCanvas};
use crate::text::escape_html;

// ── Constants ────────────────────────────────────────────────────────────────

const HIGHLIGHT_OPACITY: f64 = 0.5;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn render_op(op: &DrawOp) -> String {
    match op {
        DrawOp::Bezier {
            from,
            c1,
            c2,
            to,
            stroke,
        } => {
            let color = escape_html(&stroke.color);
            let glow = if stroke.glow > 0.0 {
                format!(
                    r#" style="filter: drop-shadow(0 0 {}px {color})""#,
                    stroke.glow
                )
            } else {
                String::new()
            };
            format!(
                r#"<path d="M {} {} C {} {}, {} {}, {} {}" fill="none" stroke="{color}" stroke-width="{}"{glow}/>"#,
                from.x, from.y, c1.x, c1.y, c2.x, c2.y, to.x, to.y, stroke.width
            )
        }
        DrawOp::Dot {
            center,
            radius,
            color,
        } => format!(
            r#"<circle cx="{}" cy="{}" r="{radius}" fill="{}"/>"#,
            center.x,
            center.y,
            escape_html(color)
        ),
    }
}

fn render_layer(canvas: &RecordingCanvas, class: &str, opacity: Option<f64>) -> String {
    let opacity = opacity
        .map(|o| format!(r#" opacity="{o}""#))
        .unwrap_or_default();
    let body: Vec<String> = canvas.ops().iter().map(render_op).collect();
    format!(
        "<g class=\"{class}\"{opacity}>\n{}\n</g>",
        body.join("\n")
    )
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Render the three connector layers to an SVG string sized to the bottom
/// layer. Returns an empty string when nothing has been drawn yet.
pub fn render_layers(layers: &ConnectorLayers<RecordingCanvas>) -> String {
    let size = layers.bottom.size;
    if size.width <= 0.0 || size.height <= 0.0 {
        return String::new();
    }

    let parts = [
        render_layer(&layers.bottom, "bottomCanvas", None),
        render_layer(&layers.top, "topCanvas", None),
        render_layer(&layers.highlight, "highlightCanvas", Some(HIGHLIGHT_OPACITY)),
    ];

    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" class=\"pathwayViewer lineCanvas\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{}\n</svg>",
        parts.join("\n"),
        w = size.width,
        h = size.height,
    )
}

#[cfg(test)]
#[path = "../../tests/rust/test_renderers_svg.rs"]
mod tests;
