//! Canvas2d: the drawing capability the connector renderer needs.

use crate::geometry::{Point, Size};

// ─── Stroke ───────────────────────────────────────────────────────────────────

/// Line style for a connector curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    /// Shadow blur radius in the line colour; 0 for none.
    pub glow: f64,
}

impl Stroke {
    pub fn new(color: &str, width: f64, glow: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
            glow,
        }
    }
}

// ─── Canvas2d ────────────────────────────────────────────────────────────────

/// A 2D surface. Implemented by hosts over a real canvas, and by
/// `RecordingCanvas` everywhere else.
pub trait Canvas2d {
    /// Resize the surface. Resizing discards the current content.
    fn resize(&mut self, size: Size);
    fn clear(&mut self);
    /// Cubic Bézier from `from` to `to` with control points `c1`, `c2`.
    fn bezier(&mut self, from: Point, c1: Point, c2: Point, to: Point, stroke: &Stroke);
    /// Filled circle.
    fn dot(&mut self, center: Point, radius: f64, color: &str);
}

// ─── RecordingCanvas ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Bezier {
        from: Point,
        c1: Point,
        c2: Point,
        to: Point,
        stroke: Stroke,
    },
    Dot {
        center: Point,
        radius: f64,
        color: String,
    },
}

/// Canvas that keeps the operations drawn since the last clear.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordingCanvas {
    pub size: Size,
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn curves(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Bezier { .. }))
    }

    pub fn dots(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Dot { .. }))
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl Canvas2d for RecordingCanvas {
    fn resize(&mut self, size: Size) {
        self.size = size;
        self.ops.clear();
    }

    fn clear(&mut self) {
        self.ops.clear();
    }

    fn bezier(&mut self, from: Point, c1: Point, c2: Point, to: Point, stroke: &Stroke) {
        self.ops.push(DrawOp::Bezier {
            from,
            c1,
            c2,
            to,
            stroke: stroke.clone(),
        });
    }

    fn dot(&mut self, center: Point, radius: f64, color: &str) {
        self.ops.push(DrawOp::Dot {
            center,
            radius,
            color: color.to_string(),
        });
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_renderers_canvas.rs"]
mod tests;
