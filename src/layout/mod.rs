//! Layout engine: level columns, header spans and offset lanes.
//!
//! Runs in three passes over the extracted data:
//!   1. `levels::inject_special_levels`: synthetic levels for components
//!      without a usable level reference.
//!   2. `levels::compute_header`: depth, colspan and body cell per level.
//!   3. `lanes::assign_offsets`: lane index per component.

pub mod lanes;
pub mod levels;
pub mod types;

pub use types::{BodyCell, LevelLayout, RenderedLevel};

use crate::config::UiOptions;
use crate::error::Diagnostics;
use crate::extract::PathwayData;
use crate::progression::ProgressionModel;

/// Run all layout passes. Mutates component level references and offsets in
/// place and may add synthetic levels to `model`.
pub fn layout(
    data: &mut PathwayData,
    model: &mut ProgressionModel,
    ui: &UiOptions,
    diags: &mut Diagnostics,
) -> LevelLayout {
    levels::inject_special_levels(data, model, ui, diags);
    let mut layout = levels::compute_header(model, diags);
    lanes::assign_offsets(data, model, &mut layout, diags);
    tracing::debug!(
        levels = layout.order.len(),
        header_rows = layout.header_rows,
        "layout complete"
    );
    layout
}
