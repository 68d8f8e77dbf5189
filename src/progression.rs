//! Progression model resolution: the level taxonomy rendered as table header.
//!
//! A model is optional. Without one the pathway still renders, using only
//! the synthetic levels the layout engine injects.

use serde_json::{Value, json};

use crate::error::{DiagnosticKind, Diagnostics};
use crate::syntax::jsonld::{self, graph_nodes, has_type};
use crate::syntax::{LevelNode, ModelNode};

/// Levels of a progression model. `top_levels` indexes into `all_levels`.
#[derive(Debug, Clone, Default)]
pub struct ProgressionModel {
    pub model: Option<ModelNode>,
    pub all_levels: Vec<LevelNode>,
    pub top_levels: Vec<usize>,
}

impl ProgressionModel {
    /// No model: no levels until synthetic ones are injected.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn level_index(&self, id: &str) -> Option<usize> {
        self.all_levels.iter().position(|l| l.id == id)
    }

    pub fn level(&self, id: &str) -> Option<&LevelNode> {
        self.all_levels.iter().find(|l| l.id == id)
    }

    pub fn top_level_nodes(&self) -> impl Iterator<Item = &LevelNode> {
        self.top_levels.iter().map(|&i| &self.all_levels[i])
    }

    /// Insert a level at the front of both the level list and the roots.
    pub fn insert_front(&mut self, level: LevelNode) {
        self.all_levels.insert(0, level);
        for index in &mut self.top_levels {
            *index += 1;
        }
        self.top_levels.insert(0, 0);
    }

    /// Append a level to both the level list and the roots.
    pub fn push_back(&mut self, level: LevelNode) {
        self.all_levels.push(level);
        self.top_levels.push(self.all_levels.len() - 1);
    }

    /// Direct children of level `index`: its `narrower` ∪ levels whose
    /// `broader` names it, in level order.
    pub fn children_of(&self, index: usize) -> Vec<usize> {
        let parent = &self.all_levels[index];
        self.all_levels
            .iter()
            .enumerate()
            .filter(|(_, other)| {
                parent.narrower.contains(&other.id) || other.broader.contains(&parent.id)
            })
            .map(|(i, _)| i)
            .collect()
    }
}

/// Resolve the model node, its levels, and the root levels.
pub fn resolve(document: &Value, diags: &mut Diagnostics) -> ProgressionModel {
    let graph = graph_nodes(document);

    let model = graph
        .iter()
        .find(|node| has_type(node, jsonld::PROGRESSION_MODEL))
        .map(ModelNode::from_value);
    if model.is_none() {
        diags.push(
            DiagnosticKind::MissingProgressionModel,
            "No Progression Model object found in the Progression Model data for this Pathway.",
            Value::Null,
        );
    }

    let all_levels: Vec<LevelNode> = graph
        .iter()
        .filter(|node| has_type(node, jsonld::PROGRESSION_LEVEL))
        .map(LevelNode::from_value)
        .collect();

    let mut resolved = ProgressionModel {
        model,
        all_levels,
        top_levels: Vec::new(),
    };
    resolved.top_levels = top_levels(&resolved, diags);

    if resolved.all_levels.is_empty() {
        diags.push(
            DiagnosticKind::MissingLevels,
            "No Progression Level objects found in the Progression Model data for this Pathway.",
            Value::Null,
        );
    }

    tracing::debug!(
        levels = resolved.all_levels.len(),
        roots = resolved.top_levels.len(),
        "resolved progression model"
    );
    resolved
}

/// Explicit `hasTopConcept` roots, else inferred roots, else every level.
fn top_levels(model: &ProgressionModel, diags: &mut Diagnostics) -> Vec<usize> {
    let hinted = model
        .model
        .as_ref()
        .map(|m| m.top_concepts.as_slice())
        .unwrap_or_default();

    let mut roots = Vec::new();
    for uri in hinted {
        match model.level_index(uri) {
            Some(index) => roots.push(index),
            None => diags.push(
                DiagnosticKind::UnknownTopLevel,
                format!("Progression Model lists top level {uri}, but no such Level was found."),
                json!({ "level": uri }),
            ),
        }
    }
    if !roots.is_empty() {
        return roots;
    }

    let message = if hinted.is_empty() {
        "No skos:hasTopConcept value found in Progression Model for this Pathway. Progression Levels may be in an incorrect order."
    } else {
        "None of the skos:hasTopConcept values in Progression Model for this Pathway match a Progression Level. Progression Levels may be in an incorrect order."
    };
    diags.push(DiagnosticKind::MissingTopLevels, message, Value::Null);

    let inferred: Vec<usize> = model
        .all_levels
        .iter()
        .enumerate()
        .filter(|(_, level)| {
            level.broader.is_empty()
                && !model
                    .all_levels
                    .iter()
                    .any(|other| other.narrower.contains(&level.id))
        })
        .map(|(i, _)| i)
        .collect();
    if !inferred.is_empty() {
        return inferred;
    }

    if !model.all_levels.is_empty() {
        diags.push(
            DiagnosticKind::MissingTopLevels,
            "Unable to infer top Progression Levels; treating every Level as a top level.",
            Value::Null,
        );
    }
    (0..model.all_levels.len()).collect()
}

#[cfg(test)]
#[path = "../tests/rust/test_progression.rs"]
mod tests;
