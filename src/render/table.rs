//! Materialise a `LevelLayout` as the level table: header rows, body cells,
//! and offset lanes.

use crate::config::LanguageOptions;
use crate::dom::{ElementId, ElementTree};
use crate::layout::LevelLayout;
use crate::progression::ProgressionModel;
use crate::text;

#[derive(Debug, Clone, PartialEq)]
pub struct TableElements {
    pub table: ElementId,
    pub thead: ElementId,
    pub tbody: ElementId,
    pub body_row: ElementId,
    /// Header rows; row `depth` is at index `depth - 1`.
    pub header_rows: Vec<ElementId>,
}

/// Build the table under `content` and record element handles in `layout`.
pub fn build_table(
    tree: &mut ElementTree,
    content: ElementId,
    model: &ProgressionModel,
    layout: &mut LevelLayout,
    language: &LanguageOptions,
) -> TableElements {
    let table = tree.create_in(content, "table", "pathwayViewer progressionModelTable");
    let thead = tree.create_in(table, "thead", "pathwayViewer progressionModelTableHeader");
    let tbody = tree.create_in(table, "tbody", "pathwayViewer progressionModelTableBody");
    let body_row = tree.create_in(tbody, "tr", "pathwayViewer progressionModelTableBodyRow");

    let header_rows: Vec<ElementId> = (0..layout.header_rows)
        .map(|_| tree.create_in(thead, "tr", "pathwayViewer progressionModelTableHeaderRow"))
        .collect();

    for position in 0..layout.order.len() {
        let level = layout.order[position];
        let rendered = &layout.levels[level];
        let (depth, col_span, lane_count) = (rendered.depth, rendered.col_span, rendered.lane_count);

        let header_cell = tree.create_in(
            header_rows[depth - 1],
            "th",
            "pathwayViewer progressionModelTableHeaderCell",
        );
        tree.set_attr(header_cell, "colspan", col_span.to_string());
        let header_inner = tree.create_in(
            header_cell,
            "div",
            "pathwayViewer progressionModelTableHeaderCellInner",
        );
        let label = text::resolve(language, model.all_levels[level].label.as_ref());
        tree.append_markup(header_inner, label.to_markup(None));

        let Some(cell) = rendered.body_cell else {
            continue;
        };
        let inner = match layout.body_cells[cell].inner {
            Some(inner) => inner,
            None => {
                let td = tree.create_in(body_row, "td", "pathwayViewer progressionModelTableBodyCell");
                let inner =
                    tree.create_in(td, "div", "pathwayViewer progressionModelTableBodyCellInner");
                layout.body_cells[cell].element = Some(td);
                layout.body_cells[cell].inner = Some(inner);
                inner
            }
        };

        // Highest offset first, so lane 0 ends up rightmost.
        let mut lanes = vec![inner; lane_count];
        for offset in (0..lane_count).rev() {
            let lane = tree.create_in(
                inner,
                "div",
                "pathwayViewer progressionModelOffsetColumn orderableNodeList",
            );
            tree.set_attr(lane, "data-offset", offset.to_string());
            lanes[offset] = lane;
        }

        let rendered = &mut layout.levels[level];
        rendered.header_cell = Some(header_cell);
        rendered.lanes = lanes;
    }

    TableElements {
        table,
        thead,
        tbody,
        body_row,
        header_rows,
    }
}
