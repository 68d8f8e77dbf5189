//! Connector renderer: curves between rendered nodes on three layers.
//!
//! Positions are read from the host geometry on every draw. Lines run from
//! the left-centre of the source's summary anchor to the right-centre of the
//! target's display.

use std::collections::HashSet;

use crate::config::ConnectorPalette;
use crate::dom::{ElementId, ElementTree};
use crate::geometry::{Geometry, Point, content_position};
use crate::render::{EdgeKind, RenderNode, RenderTree};
use crate::renderers::canvas::{Canvas2d, RecordingCanvas, Stroke};

pub const CONTROL_OFFSET: f64 = 75.0;
pub const DOT_RADIUS: f64 = 5.0;
pub const LINE_WIDTH: f64 = 1.0;
pub const HIGHLIGHT_LINE_WIDTH: f64 = 3.0;
pub const HIGHLIGHT_GLOW: f64 = 10.0;

const EDGE_KINDS: [EdgeKind; 4] = [
    EdgeKind::Condition,
    EdgeKind::Preceding,
    EdgeKind::Child,
    EdgeKind::Target,
];

/// bottom: every line. top: dots. highlight: lines leaving highlighted nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConnectorLayers<C = RecordingCanvas> {
    pub bottom: C,
    pub top: C,
    pub highlight: C,
}

impl ConnectorLayers<RecordingCanvas> {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Counts from one draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawStats {
    pub lines: usize,
    pub highlighted_lines: usize,
    pub dots: usize,
}

/// Clear and redraw all layers for the render graph rooted at `render.root`.
pub fn draw_connectors<C: Canvas2d>(
    render: &RenderTree,
    tree: &ElementTree,
    geometry: &dyn Geometry,
    palette: &ConnectorPalette,
    layers: &mut ConnectorLayers<C>,
) -> DrawStats {
    let size = geometry.scroll_size();
    for layer in [&mut layers.bottom, &mut layers.top, &mut layers.highlight] {
        layer.resize(size);
        layer.clear();
    }

    let mut pass = LinePass {
        render,
        tree,
        geometry,
        palette,
        layers,
        visited: HashSet::new(),
        stops: Vec::new(),
        stats: DrawStats::default(),
    };
    if let Some(root) = render.root {
        pass.draw_from(root);
    }
    pass.draw_dots();

    tracing::debug!(
        lines = pass.stats.lines,
        highlighted = pass.stats.highlighted_lines,
        dots = pass.stats.dots,
        "connectors drawn"
    );
    pass.stats
}

struct LinePass<'a, C> {
    render: &'a RenderTree,
    tree: &'a ElementTree,
    geometry: &'a dyn Geometry,
    palette: &'a ConnectorPalette,
    layers: &'a mut ConnectorLayers<C>,
    visited: HashSet<RenderNode>,
    /// Line endpoints, drawn as dots after the lines.
    stops: Vec<(Point, String)>,
    stats: DrawStats,
}

impl<C: Canvas2d> LinePass<'_, C> {
    fn draw_from(&mut self, source: RenderNode) {
        if !self.visited.insert(source) {
            return;
        }
        for (kind, target) in self.render.edges_from(source) {
            if let Some(anchor) = self.render.anchor(source, kind) {
                self.draw_line(source, anchor, target);
            }
            self.draw_from(target);
        }
    }

    fn draw_line(&mut self, source: RenderNode, anchor: ElementId, target: RenderNode) {
        let display = self.render.display(target);
        let (Some(from), Some(to)) = (
            content_position(self.geometry, anchor),
            content_position(self.geometry, display),
        ) else {
            return;
        };
        let (from, to) = (from.left_center(), to.right_center());
        let c1 = Point::new(from.x - CONTROL_OFFSET, from.y);
        let c2 = Point::new(to.x + CONTROL_OFFSET, to.y);
        let color = self
            .palette
            .color_for_token(self.tree.attr(anchor, "data-connector"))
            .to_string();

        self.layers
            .bottom
            .bezier(from, c1, c2, to, &Stroke::new(&color, LINE_WIDTH, 0.0));
        self.stats.lines += 1;
        if self.render.is_highlighted(source) {
            let stroke = Stroke::new(&color, HIGHLIGHT_LINE_WIDTH, HIGHLIGHT_GLOW);
            self.layers.highlight.bezier(from, c1, c2, to, &stroke);
            self.stats.highlighted_lines += 1;
        }
        self.stops.push((to, color));
    }

    /// Dots on every non-empty anchor, then on each distinct line endpoint.
    fn draw_dots(&mut self) {
        for node in self.render.nodes() {
            for kind in EDGE_KINDS {
                let Some(anchor) = self.render.anchor(node, kind) else {
                    continue;
                };
                if matches!(self.tree.attr(anchor, "data-total"), None | Some("0")) {
                    continue;
                }
                let Some(rect) = content_position(self.geometry, anchor) else {
                    continue;
                };
                let color = self
                    .palette
                    .color_for_token(self.tree.attr(anchor, "data-connector"));
                self.layers.top.dot(rect.left_center(), DOT_RADIUS, color);
                self.stats.dots += 1;
            }
        }

        let mut seen: Vec<Point> = Vec::new();
        for (point, color) in std::mem::take(&mut self.stops) {
            if seen.contains(&point) {
                continue;
            }
            seen.push(point);
            self.layers.top.dot(point, DOT_RADIUS, &color);
            self.stats.dots += 1;
        }
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_connectors.rs"]
mod tests;
