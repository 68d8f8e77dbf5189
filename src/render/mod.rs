//! Render tree: one projection per rendered component and condition, plus a
//! petgraph graph of the cross-references between them.

pub mod builder;
pub mod links;
pub mod table;

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::dom::ElementId;
use crate::syntax::{ComponentId, ConditionNode};

pub use builder::{RenderBuilder, build_render_tree};
pub use table::{TableElements, build_table};

// ─── EdgeKind ─────────────────────────────────────────────────────────────────

/// Category of a render-graph edge; selects the source anchor and line colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Condition,
    Preceding,
    Child,
    Target,
}

impl EdgeKind {
    /// Style token carried by the anchor element as `data-connector`.
    pub fn token(&self) -> &'static str {
        match self {
            EdgeKind::Condition => "condition",
            EdgeKind::Preceding => "precededBy",
            EdgeKind::Child => "child",
            EdgeKind::Target => "target",
        }
    }

    pub fn from_token(token: &str) -> Option<EdgeKind> {
        match token {
            "condition" => Some(EdgeKind::Condition),
            "precededBy" => Some(EdgeKind::Preceding),
            "child" => Some(EdgeKind::Child),
            "target" => Some(EdgeKind::Target),
            _ => None,
        }
    }
}

// ─── Projections ─────────────────────────────────────────────────────────────

/// Handle to a projection: an index into `RenderTree::components` or
/// `RenderTree::conditions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderNode {
    Component(usize),
    Condition(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedComponent {
    pub component: ComponentId,
    pub wrapper: ElementId,
    pub display: ElementId,
    /// Container for condition wrappers, left of the display.
    pub child_conditions: ElementId,
    pub conditions_anchor: ElementId,
    pub preceding_anchor: ElementId,
    pub children_anchor: ElementId,
    pub conditions: Vec<usize>,
    pub preceding: Vec<usize>,
    pub children: Vec<usize>,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCondition {
    pub condition: ConditionNode,
    pub parent: RenderNode,
    pub wrapper: ElementId,
    pub display: ElementId,
    pub child_conditions: ElementId,
    pub requirement_box: ElementId,
    pub conditions_anchor: ElementId,
    pub targets_anchor: ElementId,
    pub conditions: Vec<usize>,
    pub targets: Vec<usize>,
    pub highlighted: bool,
}

// ─── RenderTree ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct RenderTree {
    pub components: Vec<RenderedComponent>,
    pub conditions: Vec<RenderedCondition>,
    /// The destination component's projection.
    pub root: Option<RenderNode>,
    pub graph: DiGraph<RenderNode, EdgeKind>,
    by_component: HashMap<ComponentId, usize>,
    node_index: HashMap<RenderNode, NodeIndex>,
}

impl RenderTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rendered(&self, component: ComponentId) -> Option<usize> {
        self.by_component.get(&component).copied()
    }

    pub fn node_index(&self, node: RenderNode) -> Option<NodeIndex> {
        self.node_index.get(&node).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = RenderNode> + '_ {
        (0..self.components.len())
            .map(RenderNode::Component)
            .chain((0..self.conditions.len()).map(RenderNode::Condition))
    }

    pub(crate) fn push_component(&mut self, rendered: RenderedComponent) -> usize {
        let index = self.components.len();
        self.by_component.insert(rendered.component, index);
        self.components.push(rendered);
        self.register(RenderNode::Component(index));
        index
    }

    pub(crate) fn push_condition(&mut self, rendered: RenderedCondition) -> usize {
        let index = self.conditions.len();
        self.conditions.push(rendered);
        self.register(RenderNode::Condition(index));
        index
    }

    fn register(&mut self, node: RenderNode) {
        let index = self.graph.add_node(node);
        self.node_index.insert(node, index);
    }

    /// Record `from -> to` in the graph and in `from`'s child list.
    pub(crate) fn link(&mut self, from: RenderNode, to: RenderNode, kind: EdgeKind) {
        match (from, to, kind) {
            (RenderNode::Component(c), RenderNode::Condition(t), EdgeKind::Condition) => {
                self.components[c].conditions.push(t)
            }
            (RenderNode::Component(c), RenderNode::Component(t), EdgeKind::Preceding) => {
                self.components[c].preceding.push(t)
            }
            (RenderNode::Component(c), RenderNode::Component(t), EdgeKind::Child) => {
                self.components[c].children.push(t)
            }
            (RenderNode::Condition(c), RenderNode::Condition(t), EdgeKind::Condition) => {
                self.conditions[c].conditions.push(t)
            }
            (RenderNode::Condition(c), RenderNode::Component(t), EdgeKind::Target) => {
                self.conditions[c].targets.push(t)
            }
            _ => return,
        }
        if let (Some(a), Some(b)) = (self.node_index(from), self.node_index(to)) {
            self.graph.add_edge(a, b, kind);
        }
    }

    /// Outgoing edges of `node` in connector order: children, conditions,
    /// preceding, targets; each in declaration order.
    pub fn edges_from(&self, node: RenderNode) -> Vec<(EdgeKind, RenderNode)> {
        match node {
            RenderNode::Component(c) => {
                let rendered = &self.components[c];
                let children = rendered
                    .children
                    .iter()
                    .map(|&i| (EdgeKind::Child, RenderNode::Component(i)));
                let conditions = rendered
                    .conditions
                    .iter()
                    .map(|&i| (EdgeKind::Condition, RenderNode::Condition(i)));
                let preceding = rendered
                    .preceding
                    .iter()
                    .map(|&i| (EdgeKind::Preceding, RenderNode::Component(i)));
                children.chain(conditions).chain(preceding).collect()
            }
            RenderNode::Condition(c) => {
                let rendered = &self.conditions[c];
                let conditions = rendered
                    .conditions
                    .iter()
                    .map(|&i| (EdgeKind::Condition, RenderNode::Condition(i)));
                let targets = rendered
                    .targets
                    .iter()
                    .map(|&i| (EdgeKind::Target, RenderNode::Component(i)));
                conditions.chain(targets).collect()
            }
        }
    }

    pub fn wrapper(&self, node: RenderNode) -> ElementId {
        match node {
            RenderNode::Component(i) => self.components[i].wrapper,
            RenderNode::Condition(i) => self.conditions[i].wrapper,
        }
    }

    /// The element whose right-centre receives incoming lines.
    pub fn display(&self, node: RenderNode) -> ElementId {
        match node {
            RenderNode::Component(i) => self.components[i].display,
            RenderNode::Condition(i) => self.conditions[i].display,
        }
    }

    /// The summary element outgoing `kind` lines start from.
    pub fn anchor(&self, node: RenderNode, kind: EdgeKind) -> Option<ElementId> {
        match (node, kind) {
            (RenderNode::Component(i), EdgeKind::Condition) => {
                Some(self.components[i].conditions_anchor)
            }
            (RenderNode::Component(i), EdgeKind::Preceding) => {
                Some(self.components[i].preceding_anchor)
            }
            (RenderNode::Component(i), EdgeKind::Child) => Some(self.components[i].children_anchor),
            (RenderNode::Condition(i), EdgeKind::Condition) => {
                Some(self.conditions[i].conditions_anchor)
            }
            (RenderNode::Condition(i), EdgeKind::Target) => Some(self.conditions[i].targets_anchor),
            _ => None,
        }
    }

    pub fn is_highlighted(&self, node: RenderNode) -> bool {
        match node {
            RenderNode::Component(i) => self.components[i].highlighted,
            RenderNode::Condition(i) => self.conditions[i].highlighted,
        }
    }

    pub fn set_highlighted(&mut self, node: RenderNode, highlighted: bool) {
        match node {
            RenderNode::Component(i) => self.components[i].highlighted = highlighted,
            RenderNode::Condition(i) => self.conditions[i].highlighted = highlighted,
        }
    }

    pub fn highlighted_count(&self) -> usize {
        self.nodes().filter(|&n| self.is_highlighted(n)).count()
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_render.rs"]
mod tests;
