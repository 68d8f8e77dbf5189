//! Recursive render of components and conditions into their level lanes.
//!
//! The walk starts at the destination component. A component's conditions,
//! preceding components and children finish rendering, in declaration order,
//! before its summaries are filled in. Components are rendered at most once;
//! conditions once per parent.

use std::collections::HashSet;

use serde_json::json;

use super::links;
use super::{EdgeKind, RenderNode, RenderTree, RenderedComponent, RenderedCondition};
use crate::config::ViewerOptions;
use crate::dom::{ClickAction, ElementId, ElementTree};
use crate::error::{DiagnosticKind, Diagnostics, RenderError};
use crate::extract::PathwayData;
use crate::layout::LevelLayout;
use crate::progression::ProgressionModel;
use crate::syntax::{ComponentId, ConditionNode};
use crate::text;

/// Render everything reachable from the destination component, then report
/// orphans.
pub fn build_render_tree(
    data: &PathwayData,
    model: &ProgressionModel,
    layout: &LevelLayout,
    options: &ViewerOptions,
    tree: &mut ElementTree,
    diags: &mut Diagnostics,
) -> RenderTree {
    let mut builder = RenderBuilder::new(data, model, layout, options, tree, diags);
    let root = builder.render_component(data.destination);
    builder.out.root = root.map(RenderNode::Component);
    builder.finish()
}

pub struct RenderBuilder<'a> {
    data: &'a PathwayData,
    model: &'a ProgressionModel,
    layout: &'a LevelLayout,
    options: &'a ViewerOptions,
    tree: &'a mut ElementTree,
    diags: &'a mut Diagnostics,
    out: RenderTree,
    /// Components reached but without a lane to render into.
    unplaced: HashSet<ComponentId>,
}

impl<'a> RenderBuilder<'a> {
    pub fn new(
        data: &'a PathwayData,
        model: &'a ProgressionModel,
        layout: &'a LevelLayout,
        options: &'a ViewerOptions,
        tree: &'a mut ElementTree,
        diags: &'a mut Diagnostics,
    ) -> Self {
        Self {
            data,
            model,
            layout,
            options,
            tree,
            diags,
            out: RenderTree::new(),
            unplaced: HashSet::new(),
        }
    }

    pub fn render_tree(&self) -> &RenderTree {
        &self.out
    }

    /// Render `id` and its subtree. A second call for the same component
    /// records a diagnostic and returns the existing projection.
    pub fn render_component(&mut self, id: ComponentId) -> Option<usize> {
        if let Some(existing) = self.out.rendered(id) {
            self.diags.push(
                DiagnosticKind::DuplicateRender,
                "Unexpected call to render a Component more than once, rendering skipped",
                json!({ "component": self.data.component(id).id }),
            );
            return Some(existing);
        }
        if self.unplaced.contains(&id) {
            return None;
        }
        self.render_new_component(id)
    }

    /// Report members the walk never reached.
    pub fn finish(mut self) -> RenderTree {
        let data = self.data;
        for &member in &data.members {
            if self.out.rendered(member).is_some() || self.unplaced.contains(&member) {
                continue;
            }
            let component = data.component(member);
            self.diags.push(
                DiagnosticKind::OrphanComponent,
                format!(
                    "Component {} was not rendered in this Pathway, as no other Component appears to reference it.",
                    component.ctid_label()
                ),
                json!({ "component": component.id }),
            );
        }
        tracing::debug!(
            components = self.out.components.len(),
            conditions = self.out.conditions.len(),
            "render tree built"
        );
        self.out
    }

    fn reuse_or_render(&mut self, id: ComponentId) -> Option<usize> {
        match self.out.rendered(id) {
            Some(existing) => Some(existing),
            None if self.unplaced.contains(&id) => None,
            None => self.render_new_component(id),
        }
    }

    /// The lane of the component's level at the component's offset.
    fn lane_for(&mut self, id: ComponentId) -> Option<ElementId> {
        let (data, model, layout) = (self.data, self.model, self.layout);
        let component = data.component(id);
        let level = component.primary_level();
        let lane = level
            .and_then(|uri| model.level_index(uri))
            .map(|index| &layout.levels[index])
            .filter(|rendered| rendered.is_placed())
            .and_then(|rendered| rendered.lane(component.offset.unwrap_or(0)));

        if lane.is_none() {
            let err = RenderError::UnresolvedLevel {
                ctid: component.ctid_label().to_string(),
                level: level.map(str::to_owned),
            };
            self.diags.push(
                DiagnosticKind::UnresolvedLevel,
                err.to_string(),
                json!({ "component": component.id, "level": level }),
            );
            self.unplaced.insert(id);
        }
        lane
    }

    fn render_new_component(&mut self, id: ComponentId) -> Option<usize> {
        let data = self.data;
        let options = self.options;
        let component = data.component(id);
        let lane = self.lane_for(id)?;

        let tree = &mut *self.tree;
        let wrapper = tree.create_in(lane, "div", "pathwayViewer componentWrapper");
        tree.set_attr(wrapper, "data-id", component.id.as_str());
        tree.set_attr(wrapper, "data-type", component.type_label());
        if let Some(credential_type) = &component.credential_type {
            tree.set_attr(wrapper, "data-credentialtype", credential_type.as_str());
        }
        tree.set_attr(wrapper, "data-ishighlighted", "false");
        let child_conditions =
            tree.create_in(wrapper, "div", "pathwayViewer childConditions orderableNodeList");
        let display = tree.create_in(wrapper, "div", "pathwayViewer pathwayDisplay componentDisplay");
        let header = section(tree, display, "pathwayDisplayHeader componentDisplayHeader");
        let body = section(tree, display, "pathwayDisplayBody componentDisplayBody");
        let conditions_anchor = connection(tree, display, "componentDisplayConditions", EdgeKind::Condition);
        let preceding_anchor = connection(tree, display, "componentDisplayPrecededBy", EdgeKind::Preceding);
        let children_anchor = connection(tree, display, "componentDisplayChildren", EdgeKind::Child);
        let links_section = section(tree, display, "pathwayDisplayLinks componentDisplayLinks");
        let footer = section(tree, display, "pathwayDisplayFooter componentDisplayFooter");

        let index = self.out.push_component(RenderedComponent {
            component: id,
            wrapper,
            display,
            child_conditions,
            conditions_anchor,
            preceding_anchor,
            children_anchor,
            conditions: Vec::new(),
            preceding: Vec::new(),
            children: Vec::new(),
            highlighted: false,
        });
        let node = RenderNode::Component(index);

        let language = &options.language;
        let label = self.tree.create_in(header, "span", "label");
        let name = text::resolve(language, component.name.as_ref());
        self.tree.append_markup(label, name.to_markup(None));
        focus_button(self.tree, header, node);

        for link in links::component_links(component, &options.ui, language) {
            let anchor = self.tree.create_in(links_section, "a", "");
            self.tree.set_attr(anchor, "href", link.href);
            self.tree.set_attr(anchor, "target", "_blank");
            self.tree.append_text(anchor, link.label);
        }

        let description = text::resolve(language, component.description.as_ref());
        self.tree
            .append_markup(body, description.to_markup(Some("description")));

        let type_div = self.tree.create_in(footer, "div", "type");
        self.tree.append_text(type_div, component.type_label());
        let ctid_div = self.tree.create_in(footer, "div", "ctid");
        self.tree.append_text(ctid_div, component.ctid_label());

        tracing::debug!(component = %component.id, "rendering component");

        for condition in &component.conditions {
            self.render_condition(condition, node);
        }
        let total = component.conditions.len();
        let summary = format!("{total} Condition{}", plural(total));
        self.finish_summary(conditions_anchor, total, summary);

        let preceding = data.preceding(id);
        for &previous in &preceding {
            if let Some(target) = self.reuse_or_render(previous) {
                self.out.link(node, RenderNode::Component(target), EdgeKind::Preceding);
            }
        }
        let total = preceding.len();
        let summary = format!(
            "{total} Component{} directly precede{} this one",
            plural(total),
            if total == 1 { "s" } else { "" }
        );
        self.finish_summary(preceding_anchor, total, summary);

        let children = data.children(id);
        for &child in &children {
            if let Some(target) = self.reuse_or_render(child) {
                self.out.link(node, RenderNode::Component(target), EdgeKind::Child);
            }
        }
        let total = children.len();
        let summary = format!("{total} Child Component{}", plural(total));
        self.finish_summary(children_anchor, total, summary);

        Some(index)
    }

    /// Render `condition` inside `parent`'s condition container. Never
    /// deduplicated: a shared condition renders once per parent.
    pub fn render_condition(&mut self, condition: &ConditionNode, parent: RenderNode) -> usize {
        let container = match parent {
            RenderNode::Component(i) => self.out.components[i].child_conditions,
            RenderNode::Condition(i) => self.out.conditions[i].child_conditions,
        };

        let tree = &mut *self.tree;
        let wrapper = tree.create_in(container, "div", "pathwayViewer conditionWrapper");
        tree.set_attr(wrapper, "data-ishighlighted", "false");
        let child_conditions = tree.create_in(wrapper, "div", "pathwayViewer childConditions");
        let display = tree.create_in(wrapper, "div", "pathwayViewer pathwayDisplay conditionDisplay");
        let header = section(tree, display, "pathwayDisplayHeader conditionDisplayHeader");
        let body = section(tree, display, "pathwayDisplayBody conditionDisplayBody");
        let conditions_anchor = connection(tree, display, "conditionDisplayConditions", EdgeKind::Condition);
        let targets_anchor = connection(tree, display, "conditionDisplayComponents", EdgeKind::Target);
        section(tree, display, "pathwayDisplayFooter conditionDisplayFooter");
        let requirement_box = tree.create_in(display, "div", "pathwayViewer conditionRequirementsBox");

        let index = self.out.push_condition(RenderedCondition {
            condition: condition.clone(),
            parent,
            wrapper,
            display,
            child_conditions,
            requirement_box,
            conditions_anchor,
            targets_anchor,
            conditions: Vec::new(),
            targets: Vec::new(),
            highlighted: false,
        });
        let node = RenderNode::Condition(index);
        self.out.link(parent, node, EdgeKind::Condition);

        let required = condition.required_number.as_deref().unwrap_or("0");
        self.tree.set_text(requirement_box, condition.requirement_text());
        self.tree.set_attr(
            requirement_box,
            "title",
            format!(
                "Requires at least {required} of {} Components and/or Sub-Conditions",
                condition.total_referenced()
            ),
        );

        let options = self.options;
        let language = &options.language;
        let label = self.tree.create_in(header, "span", "label");
        let name = text::resolve(language, condition.name.as_ref());
        if name.is_empty() {
            self.tree.append_text(label, "Condition");
        } else {
            self.tree.append_markup(label, name.to_markup(None));
        }
        focus_button(self.tree, header, node);

        let description = text::resolve(language, condition.description.as_ref());
        self.tree
            .append_markup(body, description.to_markup(Some("description")));

        for sub in &condition.conditions {
            self.render_condition(sub, node);
        }
        let total = condition.conditions.len();
        self.finish_summary(conditions_anchor, total, format!("{total} Sub-Conditions"));

        let data = self.data;
        for uri in &condition.target_components {
            let Some(target) = data.find_member(uri) else {
                self.diags.push(
                    DiagnosticKind::UnresolvedTarget,
                    format!(
                        "Component Condition references target Component {uri}, which was not found in this Pathway."
                    ),
                    json!({ "condition": condition.id, "target": uri }),
                );
                continue;
            };
            if let Some(rendered) = self.reuse_or_render(target) {
                self.out.link(node, RenderNode::Component(rendered), EdgeKind::Target);
            }
        }
        let total = condition.target_components.len();
        self.finish_summary(targets_anchor, total, format!("{total} Components"));

        index
    }

    /// Fill a connection summary; an empty summary shows no text.
    fn finish_summary(&mut self, anchor: ElementId, total: usize, summary: String) {
        self.tree
            .set_text(anchor, if total == 0 { String::new() } else { summary });
        self.tree.set_attr(anchor, "data-total", total.to_string());
    }
}

fn section(tree: &mut ElementTree, display: ElementId, classes: &str) -> ElementId {
    tree.create_in(
        display,
        "div",
        &format!("pathwayViewer pathwayDisplaySection {classes}"),
    )
}

fn connection(tree: &mut ElementTree, display: ElementId, class: &str, kind: EdgeKind) -> ElementId {
    let anchor = section(tree, display, &format!("pathwayDisplayConnection {class}"));
    tree.set_attr(anchor, "data-connector", kind.token());
    anchor
}

fn focus_button(tree: &mut ElementTree, header: ElementId, node: RenderNode) {
    let button = tree.create_in(header, "button", "pathwayViewer pathwayDisplayButton focusButton");
    tree.append_text(button, "Focus");
    tree.set_on_click(button, ClickAction::ToggleHighlight(node));
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
