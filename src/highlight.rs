//! Highlight engine: emphasise everything reachable from a start node.

use petgraph::visit::Dfs;

use crate::dom::ElementTree;
use crate::render::{RenderNode, RenderTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightState {
    #[default]
    Idle,
    Highlighted(RenderNode),
}

#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    state: HighlightState,
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HighlightState {
        self.state
    }

    /// Toggling the current start node returns to idle; any other node
    /// becomes the new start.
    pub fn toggle(
        &mut self,
        render: &mut RenderTree,
        tree: &mut ElementTree,
        node: RenderNode,
    ) -> HighlightState {
        let same_start = self.state == HighlightState::Highlighted(node) && render.is_highlighted(node);
        self.clear(render, tree);
        if !same_start {
            let marked = mark_reachable(render, tree, node);
            self.state = HighlightState::Highlighted(node);
            tracing::debug!(?node, marked, "highlight set");
        } else {
            tracing::debug!(?node, "highlight cleared");
        }
        self.state
    }

    /// Drop every flag and return to idle.
    pub fn clear(&mut self, render: &mut RenderTree, tree: &mut ElementTree) {
        self.state = HighlightState::Idle;
        let nodes: Vec<RenderNode> = render.nodes().collect();
        for node in nodes {
            set_flag(render, tree, node, false);
        }
    }
}

/// Flag `start` and every node reachable from it; returns the count.
fn mark_reachable(render: &mut RenderTree, tree: &mut ElementTree, start: RenderNode) -> usize {
    let Some(index) = render.node_index(start) else {
        return 0;
    };
    let mut reached = Vec::new();
    let mut dfs = Dfs::new(&render.graph, index);
    while let Some(next) = dfs.next(&render.graph) {
        reached.push(render.graph[next]);
    }
    for &node in &reached {
        set_flag(render, tree, node, true);
    }
    reached.len()
}

fn set_flag(render: &mut RenderTree, tree: &mut ElementTree, node: RenderNode, highlighted: bool) {
    render.set_highlighted(node, highlighted);
    tree.set_attr(
        render.wrapper(node),
        "data-ishighlighted",
        if highlighted { "true" } else { "false" },
    );
}

#[cfg(test)]
#[path = "../tests/rust/test_highlight.rs"]
mod tests;
