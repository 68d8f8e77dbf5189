//! WASM bindings for pathway-viewer.
//!
//! Exposes `renderPathway` to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::{ViewerOptions, render_pathway_html};

/// Render a pathway graph (and optional progression model graph) to HTML.
///
/// On failure the error carries the render-blocking messages, one per line.
#[wasm_bindgen(js_name = "renderPathway")]
pub fn render_pathway(pathway_json: &str, model_json: Option<String>) -> Result<String, JsError> {
    render_pathway_html(
        pathway_json,
        model_json.as_deref(),
        ViewerOptions::default(),
        None,
    )
    .map_err(|e| JsError::new(&e.messages().join("\n")))
}
