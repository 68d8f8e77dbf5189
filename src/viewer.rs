//! Viewer: one pathway rendered into one container.
//!
//! Lifecycle: `load` (or `from_documents`) fetches the graphs and renders
//! synchronously. Connector drawing is deferred: the host calls `tick` with
//! its clock, `on_resize` on window resizes, and `click` / `toggle_highlight`
//! for Focus buttons.

use std::rc::Rc;
use std::time::Duration;

use serde_json::{Value, json};

use crate::config::ViewerOptions;
use crate::connectors::{ConnectorLayers, DrawStats, draw_connectors};
use crate::dom::{ClickAction, ElementId, ElementTree};
use crate::error::{DiagnosticKind, Diagnostics, ResourceError, ViewerError};
use crate::extract::{self, PathwayData};
use crate::geometry::{FlowGeometry, Geometry, Size};
use crate::highlight::{HighlightState, Highlighter};
use crate::layout::{self, LevelLayout};
use crate::progression::{self, ProgressionModel};
use crate::render::{RenderNode, RenderTree, TableElements, build_render_tree, build_table};
use crate::renderers::svg;
use crate::resource::{ResourceCache, graph_uri};
use crate::scheduler::{INITIAL_RENDER_DELAY, RESIZE_DEBOUNCE, RedrawScheduler};
use crate::text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerStatus {
    Loading,
    Rendering,
    Finished,
    Failed,
}

/// Where the progression model came from.
#[derive(Debug, Clone)]
enum ModelSource {
    /// The pathway names no model.
    NotReferenced,
    Loaded(Rc<Value>),
    Failed { uri: String, error: ResourceError },
}

pub struct Viewer {
    pathway_uri: String,
    options: ViewerOptions,
    status: ViewerStatus,

    tree: ElementTree,
    container: ElementId,
    header: ElementId,
    content: ElementId,
    messages: ElementId,
    line_layer: Option<ElementId>,

    raw_pathway: Option<Rc<Value>>,
    model_source: ModelSource,
    error: Option<ViewerError>,

    data: Option<PathwayData>,
    model: ProgressionModel,
    layout: LevelLayout,
    table: Option<TableElements>,
    render: RenderTree,
    diagnostics: Diagnostics,

    highlighter: Highlighter,
    layers: ConnectorLayers,
    scheduler: RedrawScheduler,
}

impl Viewer {
    /// Scaffold an empty viewer in `Loading` state.
    pub fn new(pathway_uri: &str, options: ViewerOptions) -> Self {
        let mut tree = ElementTree::new();
        let container = tree.create("div", "pathwayViewer pathwayOuterContainer");
        tree.set_attr(container, "data-pathwayuri", pathway_uri);
        let header_tag = options.ui.pathway_header_tag.clone();
        let header = tree.create_in(container, &header_tag, "pathwayViewer pathwayHeader");
        let content = tree.create_in(container, "div", "pathwayViewer pathwayContent");
        let messages = tree.create_in(container, "div", "pathwayViewer pathwayMessages");

        Self {
            pathway_uri: pathway_uri.to_string(),
            options,
            status: ViewerStatus::Loading,
            tree,
            container,
            header,
            content,
            messages,
            line_layer: None,
            raw_pathway: None,
            model_source: ModelSource::NotReferenced,
            error: None,
            data: None,
            model: ProgressionModel::empty(),
            layout: LevelLayout::default(),
            table: None,
            render: RenderTree::new(),
            diagnostics: Diagnostics::new(),
            highlighter: Highlighter::new(),
            layers: ConnectorLayers::new(),
            scheduler: RedrawScheduler::new(),
        }
    }

    /// Fetch the pathway (and its model, if any) through `cache`, then render.
    ///
    /// A failed pathway fetch leaves the viewer `Failed` with the resource
    /// error's messages; a failed model fetch only adds a diagnostic.
    pub async fn load(
        cache: &ResourceCache,
        pathway_uri: &str,
        options: ViewerOptions,
        now: Duration,
    ) -> Self {
        let mut viewer = Viewer::new(pathway_uri, options);
        tracing::debug!(pathway = pathway_uri, "loading pathway");

        match cache.get(&graph_uri(pathway_uri)).await {
            Ok(document) => {
                if let Some(model_uri) = extract::progression_model_uri(&document) {
                    viewer.model_source = match cache.get(&graph_uri(&model_uri)).await {
                        Ok(model) => ModelSource::Loaded(model),
                        Err(error) => ModelSource::Failed {
                            uri: model_uri,
                            error,
                        },
                    };
                }
                viewer.raw_pathway = Some(document);
            }
            Err(error) => viewer.error = Some(ViewerError::Resource(error)),
        }

        viewer.render(now);
        viewer
    }

    /// Render from documents already in memory. `model` is used only when
    /// the pathway references a progression model; an `Err` model (or none)
    /// is recorded as a recoverable load failure.
    pub fn from_documents(
        pathway_uri: &str,
        pathway: Value,
        model: Option<Result<Value, ResourceError>>,
        options: ViewerOptions,
        now: Duration,
    ) -> Self {
        let mut viewer = Viewer::new(pathway_uri, options);
        if let Some(model_uri) = extract::progression_model_uri(&pathway) {
            viewer.model_source = match model {
                Some(Ok(model)) => ModelSource::Loaded(Rc::new(model)),
                Some(Err(error)) => ModelSource::Failed {
                    error,
                    uri: model_uri,
                },
                None => ModelSource::Failed {
                    error: ResourceError::fetch(&model_uri, Value::Null),
                    uri: model_uri,
                },
            };
        }
        viewer.raw_pathway = Some(Rc::new(pathway));
        viewer.render(now);
        viewer
    }

    /// (Re)build everything from the raw documents. Schedules the first
    /// connector draw at `now + INITIAL_RENDER_DELAY`.
    pub fn render(&mut self, now: Duration) {
        self.status = ViewerStatus::Rendering;
        self.reset();

        if let Err(err) = self.render_content() {
            tracing::error!(pathway = %self.pathway_uri, error = %err, "pathway render failed");
            for message in err.messages() {
                self.push_message(&message);
            }
            self.error = Some(err);
            self.status = ViewerStatus::Failed;
            return;
        }

        let messages: Vec<String> = self.diagnostics.messages().map(str::to_owned).collect();
        for message in &messages {
            self.push_message(message);
        }

        self.scheduler.schedule(now, INITIAL_RENDER_DELAY);
        self.status = ViewerStatus::Finished;
        tracing::debug!(
            pathway = %self.pathway_uri,
            diagnostics = self.diagnostics.len(),
            "pathway rendered"
        );
    }

    fn reset(&mut self) {
        for element in [self.header, self.content, self.messages] {
            self.tree.clear(element);
        }
        self.data = None;
        self.model = ProgressionModel::empty();
        self.layout = LevelLayout::default();
        self.table = None;
        self.render = RenderTree::new();
        self.diagnostics.clear();
        self.highlighter = Highlighter::new();
        self.layers = ConnectorLayers::new();
        self.line_layer = None;
    }

    fn render_content(&mut self) -> Result<(), ViewerError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let document = self
            .raw_pathway
            .clone()
            .ok_or_else(|| ViewerError::MissingPathway {
                pathway_uri: self.pathway_uri.clone(),
            })?;

        let diags = &mut self.diagnostics;
        let mut data = extract::extract(&document, &self.pathway_uri, diags)?;

        let name = text::resolve(&self.options.language, data.pathway.name.as_ref());
        self.tree.append_markup(self.header, name.to_markup(None));

        let mut model = match &self.model_source {
            ModelSource::NotReferenced => {
                diags.push(
                    DiagnosticKind::MissingProgressionModel,
                    "This Pathway does not reference a Progression Model.",
                    json!({ "pathway": data.pathway.id }),
                );
                ProgressionModel::empty()
            }
            ModelSource::Loaded(model) => progression::resolve(model, diags),
            ModelSource::Failed { uri, error } => {
                diags.push(
                    DiagnosticKind::ProgressionModelLoad,
                    format!("Error loading Progression Model from URI {uri}"),
                    json!({ "messages": error.messages(), "raw": error.raw_error() }),
                );
                ProgressionModel::empty()
            }
        };

        let mut layout = layout::layout(&mut data, &mut model, &self.options.ui, diags);
        let table = build_table(
            &mut self.tree,
            self.content,
            &model,
            &mut layout,
            &self.options.language,
        );
        let line_layer = self
            .tree
            .create_in(self.content, "div", "pathwayViewer connectorLayers");
        self.render = build_render_tree(&data, &model, &layout, &self.options, &mut self.tree, diags);

        self.data = Some(data);
        self.model = model;
        self.layout = layout;
        self.table = Some(table);
        self.line_layer = Some(line_layer);
        Ok(())
    }

    fn push_message(&mut self, message: &str) {
        let line = self.tree.create_in(self.messages, "div", "pathwayViewer error");
        self.tree.append_text(line, message);
    }

    // ─── Connectors ──────────────────────────────────────────────────────────

    /// Measure the current element tree with `FlowGeometry`.
    pub fn measure(&self, viewport: Size) -> FlowGeometry {
        FlowGeometry::measure(&self.tree, self.content, viewport)
    }

    /// Redraw every connector layer now.
    pub fn redraw(&mut self, geometry: &dyn Geometry) -> DrawStats {
        if self.status != ViewerStatus::Finished {
            return DrawStats::default();
        }
        let stats = draw_connectors(
            &self.render,
            &self.tree,
            geometry,
            &self.options.connectors,
            &mut self.layers,
        );
        if let Some(layer) = self.line_layer {
            self.tree.clear(layer);
            self.tree.append_markup(layer, svg::render_layers(&self.layers));
        }
        stats
    }

    /// Debounce a window resize.
    pub fn on_resize(&mut self, now: Duration) {
        self.scheduler.schedule(now, RESIZE_DEBOUNCE);
    }

    /// Run a scheduled redraw if its deadline has passed.
    pub fn tick(&mut self, now: Duration, geometry: &dyn Geometry) -> Option<DrawStats> {
        if self.scheduler.poll(now) {
            Some(self.redraw(geometry))
        } else {
            None
        }
    }

    // ─── Highlighting ────────────────────────────────────────────────────────

    /// Toggle highlighting from `node` and redraw, keeping the scroll position.
    pub fn toggle_highlight(&mut self, node: RenderNode, geometry: &mut dyn Geometry) -> HighlightState {
        let scroll = geometry.scroll_offset();
        let state = self.highlighter.toggle(&mut self.render, &mut self.tree, node);
        self.redraw(geometry);
        geometry.set_scroll_offset(scroll);
        state
    }

    /// Dispatch a click on `element`. Returns false when it has no action.
    pub fn click(&mut self, element: ElementId, geometry: &mut dyn Geometry) -> bool {
        match self.tree.get(element).on_click {
            Some(ClickAction::ToggleHighlight(node)) => {
                self.toggle_highlight(node, geometry);
                true
            }
            None => false,
        }
    }

    /// Projection of the component with `@id == uri`, if it was rendered.
    pub fn component_node(&self, uri: &str) -> Option<RenderNode> {
        let data = self.data.as_ref()?;
        data.all()
            .find(|&id| data.component(id).id == uri)
            .and_then(|id| self.render.rendered(id))
            .map(RenderNode::Component)
    }

    // ─── Accessors ───────────────────────────────────────────────────────────

    pub fn status(&self) -> ViewerStatus {
        self.status
    }

    pub fn pathway_uri(&self) -> &str {
        &self.pathway_uri
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    pub fn error(&self) -> Option<&ViewerError> {
        self.error.as_ref()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Texts currently listed in the messages element.
    pub fn messages(&self) -> Vec<String> {
        self.tree
            .child_elements(self.messages)
            .map(|line| self.tree.text_content(line))
            .collect()
    }

    pub fn data(&self) -> Option<&PathwayData> {
        self.data.as_ref()
    }

    pub fn model(&self) -> &ProgressionModel {
        &self.model
    }

    pub fn layout(&self) -> &LevelLayout {
        &self.layout
    }

    pub fn table(&self) -> Option<&TableElements> {
        self.table.as_ref()
    }

    pub fn render_tree(&self) -> &RenderTree {
        &self.render
    }

    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    pub fn container(&self) -> ElementId {
        self.container
    }

    pub fn content(&self) -> ElementId {
        self.content
    }

    pub fn layers(&self) -> &ConnectorLayers {
        &self.layers
    }

    pub fn highlight_state(&self) -> HighlightState {
        self.highlighter.state()
    }

    pub fn redraw_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Title text: the pathway name, plain.
    pub fn title(&self) -> String {
        self.data
            .as_ref()
            .map(|data| {
                text::resolve(&self.options.language, data.pathway.name.as_ref())
                    .to_plain(&self.options.language.value_joiner)
            })
            .unwrap_or_default()
    }

    pub fn to_html(&self) -> String {
        self.tree.to_html(self.container)
    }
}
