//! Graph extraction: Pathway, Destination Component, and the Components set.
//!
//! Relationship edges may be asserted from either endpoint (`precededBy` on
//! one node or `precedes` on the other). The lookups here always check both
//! directions so the resolved edge set does not depend on the encoding.

use serde_json::Value;

use crate::error::{Diagnostics, ViewerError};
use crate::syntax::jsonld::{self, graph_nodes, has_type, node_id};
use crate::syntax::{ComponentId, ComponentNode, ConditionResolver, PathwayNode};

/// Classified pathway data. Components are stored in one arena; `members` is
/// the Components set (document order, destination excluded).
#[derive(Debug, Clone)]
pub struct PathwayData {
    pub pathway: PathwayNode,
    pub nodes: Vec<ComponentNode>,
    pub destination: ComponentId,
    pub members: Vec<ComponentId>,
}

/// Locate the pathway, its destination component, and the remaining components.
pub fn extract(
    document: &Value,
    pathway_uri: &str,
    diags: &mut Diagnostics,
) -> Result<PathwayData, ViewerError> {
    let graph = graph_nodes(document);

    let pathway_value = graph
        .iter()
        .find(|node| has_type(node, jsonld::PATHWAY))
        .ok_or_else(|| ViewerError::MissingPathway {
            pathway_uri: pathway_uri.to_string(),
        })?;
    let pathway = PathwayNode::from_value(pathway_value);

    let destination_value = graph
        .iter()
        .filter(|node| !has_type(node, jsonld::PATHWAY))
        .find(|node| is_destination_of(node, &pathway))
        .ok_or_else(|| ViewerError::MissingDestination {
            pathway_id: pathway.id.clone(),
        })?;

    let mut resolver = ConditionResolver::new(graph);
    let mut nodes = vec![ComponentNode::from_value(destination_value, &mut resolver, diags)];
    let mut members = Vec::new();

    for node in graph {
        if has_type(node, jsonld::PATHWAY)
            || has_type(node, jsonld::COMPONENT_CONDITION)
            || std::ptr::eq(node, destination_value)
        {
            continue;
        }
        members.push(ComponentId(nodes.len()));
        nodes.push(ComponentNode::from_value(node, &mut resolver, diags));
    }

    tracing::debug!(
        pathway = %pathway.id,
        destination = %nodes[0].id,
        components = members.len(),
        "extracted pathway graph"
    );

    Ok(PathwayData {
        pathway,
        nodes,
        destination: ComponentId(0),
        members,
    })
}

/// First `asn:hasProgressionModel` of the document's pathway node.
pub fn progression_model_uri(document: &Value) -> Option<String> {
    graph_nodes(document)
        .iter()
        .find(|node| has_type(node, jsonld::PATHWAY))
        .and_then(|node| PathwayNode::from_value(node).progression_model)
}

/// Destination edge, checked from both endpoints.
fn is_destination_of(node: &Value, pathway: &PathwayNode) -> bool {
    let Some(id) = node_id(node) else {
        return false;
    };
    jsonld::id_list(node, jsonld::IS_DESTINATION_COMPONENT_OF).contains(&pathway.id)
        || pathway.destinations.iter().any(|d| d == id)
}

impl PathwayData {
    pub fn component(&self, id: ComponentId) -> &ComponentNode {
        &self.nodes[id.0]
    }

    pub fn component_mut(&mut self, id: ComponentId) -> &mut ComponentNode {
        &mut self.nodes[id.0]
    }

    pub fn destination_component(&self) -> &ComponentNode {
        self.component(self.destination)
    }

    /// All components, destination first.
    pub fn all(&self) -> impl Iterator<Item = ComponentId> + '_ {
        std::iter::once(self.destination).chain(self.members.iter().copied())
    }

    /// Look a member up by `@id`.
    pub fn find_member(&self, uri: &str) -> Option<ComponentId> {
        self.members
            .iter()
            .copied()
            .find(|&m| self.component(m).id == uri)
    }

    /// Members that precede `id`: its `precededBy` ∪ members whose `precedes` names it.
    pub fn preceding(&self, id: ComponentId) -> Vec<ComponentId> {
        let component = self.component(id);
        self.members_where(|other| {
            component.preceded_by.contains(&other.id) || other.precedes.contains(&component.id)
        })
    }

    /// Members that are children of `id`: its `hasChild` ∪ members whose `isChildOf` names it.
    pub fn children(&self, id: ComponentId) -> Vec<ComponentId> {
        let component = self.component(id);
        self.members_where(|other| {
            component.has_child.contains(&other.id) || other.is_child_of.contains(&component.id)
        })
    }

    /// Members targeted by `id`'s conditions, transitively.
    pub fn required(&self, id: ComponentId) -> Vec<ComponentId> {
        let targets = self.component(id).required_component_ids();
        self.members_where(|other| targets.contains(&other.id))
    }

    /// Union of required, preceding and child members, in member order.
    pub fn predecessors(&self, id: ComponentId) -> Vec<ComponentId> {
        let required = self.required(id);
        let preceding = self.preceding(id);
        let children = self.children(id);
        self.members
            .iter()
            .copied()
            .filter(|m| required.contains(m) || preceding.contains(m) || children.contains(m))
            .collect()
    }

    fn members_where(&self, pred: impl Fn(&ComponentNode) -> bool) -> Vec<ComponentId> {
        self.members
            .iter()
            .copied()
            .filter(|&m| pred(self.component(m)))
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_extract.rs"]
mod tests;
