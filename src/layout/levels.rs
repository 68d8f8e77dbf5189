//! Level structure: synthetic-level injection and header spans.

use serde_json::json;

use super::types::{BodyCell, LevelLayout, RenderedLevel};
use crate::config::UiOptions;
use crate::error::{DiagnosticKind, Diagnostics};
use crate::extract::PathwayData;
use crate::progression::ProgressionModel;
use crate::syntax::{ComponentId, LevelNode, SyntheticLevel};

// ─── Synthetic levels ────────────────────────────────────────────────────────

/// Move components without a valid level reference onto synthetic levels.
///
/// Members go to the common level (inserted first), the destination goes to
/// the destination level (appended last). Each synthetic level is added only
/// when some component needs it.
pub fn inject_special_levels(
    data: &mut PathwayData,
    model: &mut ProgressionModel,
    ui: &UiOptions,
    diags: &mut Diagnostics,
) {
    let mut needs_common = false;
    for id in data.members.clone() {
        needs_common |= assign_special_level(data, id, SyntheticLevel::Common, model, diags);
    }
    if needs_common {
        model.insert_front(LevelNode::synthetic(
            SyntheticLevel::Common,
            ui.default_component_level_label.clone(),
        ));
    }

    let destination = data.destination;
    if assign_special_level(data, destination, SyntheticLevel::Destination, model, diags) {
        model.push_back(LevelNode::synthetic(
            SyntheticLevel::Destination,
            ui.default_destination_level_label.clone(),
        ));
    }
}

/// Returns true when the component was reassigned to `special`.
fn assign_special_level(
    data: &mut PathwayData,
    id: ComponentId,
    special: SyntheticLevel,
    model: &ProgressionModel,
    diags: &mut Diagnostics,
) -> bool {
    let component = data.component(id);
    let references: Vec<&String> = component
        .progression_levels
        .iter()
        .filter(|uri| uri.as_str() != special.id())
        .collect();

    let mut needs_special = references.is_empty();
    for uri in references {
        if model.level(uri).is_none() {
            diags.push(
                DiagnosticKind::InvalidLevelReference,
                format!(
                    "Component {} references Progression Level {uri}, but no such Level was found in this Pathway's Progression Model.",
                    component.ctid_label()
                ),
                json!({ "component": component.id, "level": uri }),
            );
            needs_special = true;
        }
    }

    if needs_special {
        data.component_mut(id).progression_levels = vec![special.id().to_string()];
    }
    needs_special
}

// ─── Header structure ────────────────────────────────────────────────────────

/// Depth, span and body-cell assignment for every level reachable from a root.
pub fn compute_header(model: &ProgressionModel, diags: &mut Diagnostics) -> LevelLayout {
    let mut layout = LevelLayout {
        levels: (0..model.all_levels.len()).map(RenderedLevel::new).collect(),
        order: Vec::new(),
        roots: Vec::new(),
        header_rows: 1,
        body_cells: Vec::new(),
    };

    for &root in &model.top_levels {
        if layout.levels[root].is_placed() {
            continue;
        }
        layout.roots.push(root);
        let mut path = Vec::new();
        dive(model, &mut layout, root, 1, root, 0, &mut path, diags);
    }

    tracing::debug!(
        header_rows = layout.header_rows,
        columns = layout.total_columns(),
        body_cells = layout.body_cells.len(),
        "computed level header"
    );
    layout
}

/// Place `level` and its descendants; returns the level's span.
#[allow(clippy::too_many_arguments)]
fn dive(
    model: &ProgressionModel,
    layout: &mut LevelLayout,
    level: usize,
    depth: usize,
    top_level: usize,
    local_offset: usize,
    path: &mut Vec<usize>,
    diags: &mut Diagnostics,
) -> usize {
    layout.header_rows = layout.header_rows.max(depth);
    layout.order.push(level);

    let body_cell = match layout.body_cell_for(top_level, local_offset) {
        Some(cell) => cell,
        None => {
            layout.body_cells.push(BodyCell {
                top_level,
                local_offset,
                element: None,
                inner: None,
            });
            layout.body_cells.len() - 1
        }
    };

    {
        let rendered = &mut layout.levels[level];
        rendered.depth = depth;
        rendered.local_column_offset = local_offset;
        rendered.top_level = Some(top_level);
        rendered.body_cell = Some(body_cell);
    }

    path.push(level);
    let mut span = 1;
    let mut sibling = 0;
    for child in model.children_of(level) {
        if path.contains(&child) {
            diags.push(
                DiagnosticKind::LevelCycle,
                format!(
                    "Possible circular reference detected in Progression Level hierarchy at {}",
                    model.all_levels[child].id
                ),
                json!({ "level": model.all_levels[level].id, "child": model.all_levels[child].id }),
            );
            continue;
        }
        if layout.levels[child].is_placed() {
            continue;
        }
        layout.levels[level].children.push(child);
        span += dive(model, layout, child, depth + 1, top_level, sibling, path, diags);
        sibling += 1;
    }
    path.pop();

    layout.levels[level].col_span = span;
    span
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_levels.rs"]
mod tests;
