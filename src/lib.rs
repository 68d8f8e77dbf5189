//! pathway-viewer: layout and connector rendering for JSON-LD credential pathways.
//!
//! Public API: `render_pathway_html()` for one-shot static pages, `Viewer`
//! for interactive hosts.
//!
//! Pipeline: resource → extract → progression → layout → render →
//! connectors / highlight.

pub mod config;
pub mod connectors;
pub mod dom;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod highlight;
pub mod layout;
pub mod progression;
pub mod render;
pub mod renderers;
pub mod resource;
pub mod scheduler;
pub mod syntax;
pub mod text;
pub mod viewer;

#[cfg(feature = "wasm")]
pub mod wasm;

#[cfg(test)]
#[path = "../tests/rust/support.rs"]
mod test_support;

use std::time::Duration;

use serde_json::{Value, json};

pub use config::ViewerOptions;
pub use error::{Diagnostic, DiagnosticKind, Diagnostics, ResourceError, ViewerError};
pub use geometry::Size;
pub use viewer::{Viewer, ViewerStatus};

/// Viewport used when measuring a static page.
pub const DEFAULT_VIEWPORT: Size = Size {
    width: 1600.0,
    height: 900.0,
};

/// Render a pathway document (and optional progression model document) to a
/// standalone HTML page with connectors drawn.
///
/// `highlight` names a component `@id` to focus before drawing. A model
/// document that fails to parse only adds a diagnostic.
pub fn render_pathway_html(
    pathway_json: &str,
    model_json: Option<&str>,
    options: ViewerOptions,
    highlight: Option<&str>,
) -> Result<String, ViewerError> {
    let pathway = parse_document("pathway", pathway_json)?;
    let model = model_json.map(|json| parse_document("progression model", json));
    let uri = syntax::jsonld::graph_nodes(&pathway)
        .iter()
        .find(|node| syntax::jsonld::has_type(node, syntax::jsonld::PATHWAY))
        .and_then(syntax::jsonld::node_id)
        .unwrap_or_default()
        .to_string();

    let mut viewer = Viewer::from_documents(&uri, pathway, model, options, Duration::ZERO);
    if let Some(err) = viewer.error() {
        return Err(err.clone());
    }

    let mut geometry = viewer.measure(DEFAULT_VIEWPORT);
    match highlight.and_then(|id| viewer.component_node(id)) {
        Some(node) => {
            viewer.toggle_highlight(node, &mut geometry);
        }
        None => {
            if let Some(id) = highlight {
                tracing::warn!(component = id, "highlight target was not rendered");
            }
            viewer.redraw(&geometry);
        }
    }

    Ok(renderers::html::standalone_page(&viewer))
}

fn parse_document(label: &str, json: &str) -> Result<Value, ResourceError> {
    serde_json::from_str(json)
        .map_err(|err| ResourceError::parse(label, json!({ "message": err.to_string() })))
}
