//! Layout types: RenderedLevel, BodyCell, LevelLayout.

use crate::dom::ElementId;

// ─── RenderedLevel ────────────────────────────────────────────────────────────

/// Layout projection of one progression level.
///
/// `level` and `children` index `ProgressionModel::all_levels`. The element
/// handles stay `None` until the table is materialised.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLevel {
    pub level: usize,
    /// Header row, 1 for roots. 0 means the level is not reachable from a root.
    pub depth: usize,
    /// `1 + Σ child.col_span`.
    pub col_span: usize,
    /// Index among its siblings; selects the body cell of its top-level root.
    pub local_column_offset: usize,
    pub children: Vec<usize>,
    pub top_level: Option<usize>,
    pub body_cell: Option<usize>,
    /// Number of offset lanes (max offset + 1).
    pub lane_count: usize,
    /// Lane containers indexed by offset.
    pub lanes: Vec<ElementId>,
    pub header_cell: Option<ElementId>,
}

impl RenderedLevel {
    pub fn new(level: usize) -> Self {
        Self {
            level,
            depth: 0,
            col_span: 1,
            local_column_offset: 0,
            children: Vec::new(),
            top_level: None,
            body_cell: None,
            lane_count: 1,
            lanes: Vec::new(),
            header_cell: None,
        }
    }

    pub fn is_placed(&self) -> bool {
        self.depth > 0
    }

    pub fn lane(&self, offset: usize) -> Option<ElementId> {
        self.lanes.get(offset).copied()
    }
}

// ─── BodyCell ─────────────────────────────────────────────────────────────────

/// A body-row cell, shared by every level of a root with the same local offset.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyCell {
    pub top_level: usize,
    pub local_offset: usize,
    pub element: Option<ElementId>,
    pub inner: Option<ElementId>,
}

// ─── LevelLayout ──────────────────────────────────────────────────────────────

/// Header and column structure for all levels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LevelLayout {
    /// Parallel to `ProgressionModel::all_levels`.
    pub levels: Vec<RenderedLevel>,
    /// Placed levels in depth-first order from the roots.
    pub order: Vec<usize>,
    pub roots: Vec<usize>,
    pub header_rows: usize,
    pub body_cells: Vec<BodyCell>,
}

impl LevelLayout {
    /// Total header columns: the sum of the roots' spans.
    pub fn total_columns(&self) -> usize {
        self.roots.iter().map(|&r| self.levels[r].col_span).sum()
    }

    pub fn body_cell_for(&self, top_level: usize, local_offset: usize) -> Option<usize> {
        self.body_cells
            .iter()
            .position(|c| c.top_level == top_level && c.local_offset == local_offset)
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_types.rs"]
mod tests;
