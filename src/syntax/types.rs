//! Typed views over JSON-LD nodes: Pathway, Component, Condition, Level.
//!
//! Built once from the raw graph. Multilingual text stays as raw `Value`s and
//! is resolved at render time with the viewer's language options.

use std::collections::HashMap;

use serde_json::{Value, json};

use super::jsonld::{self, id_list, node_id, node_types, raw_property};
use crate::error::{DiagnosticKind, Diagnostics};

// ─── Identifiers ──────────────────────────────────────────────────────────────

/// Index of a component in `PathwayData::nodes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub usize);

/// Levels injected for components without a usable level reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntheticLevel {
    Common,
    Destination,
}

impl SyntheticLevel {
    pub fn id(&self) -> &'static str {
        match self {
            SyntheticLevel::Common => "_:CommonLevel",
            SyntheticLevel::Destination => "_:DestinationLevel",
        }
    }
}

// ─── PathwayNode ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct PathwayNode {
    pub id: String,
    pub name: Option<Value>,
    pub destinations: Vec<String>,
    pub progression_model: Option<String>,
}

impl PathwayNode {
    pub fn from_value(node: &Value) -> Self {
        Self {
            id: node_id(node).unwrap_or_default().to_string(),
            name: raw_property(node, jsonld::NAME),
            destinations: id_list(node, jsonld::HAS_DESTINATION_COMPONENT),
            progression_model: id_list(node, jsonld::HAS_PROGRESSION_MODEL)
                .into_iter()
                .next(),
        }
    }
}

// ─── ConditionNode ───────────────────────────────────────────────────────────

/// A requirement group. Either embedded in its parent or referenced by `@id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionNode {
    pub id: Option<String>,
    pub name: Option<Value>,
    pub description: Option<Value>,
    pub required_number: Option<String>,
    pub target_components: Vec<String>,
    pub conditions: Vec<ConditionNode>,
}

impl ConditionNode {
    /// Number of items the requirement box counts against.
    pub fn total_referenced(&self) -> usize {
        self.target_components.len() + self.conditions.len()
    }

    /// `"{requiredNumber or 0} / {targets + sub-conditions}"`.
    pub fn requirement_text(&self) -> String {
        format!(
            "{} / {}",
            self.required_number.as_deref().unwrap_or("0"),
            self.total_referenced()
        )
    }

    /// Target ids of this condition and all nested sub-conditions, first-seen order.
    pub fn collect_targets(&self, out: &mut Vec<String>) {
        for target in &self.target_components {
            if !out.contains(target) {
                out.push(target.clone());
            }
        }
        for sub in &self.conditions {
            sub.collect_targets(out);
        }
    }
}

/// Resolves `hasCondition` values against the graph's condition nodes.
pub struct ConditionResolver<'a> {
    by_id: HashMap<&'a str, &'a Value>,
    stack: Vec<String>,
}

impl<'a> ConditionResolver<'a> {
    pub fn new(graph: &'a [Value]) -> Self {
        let by_id = graph
            .iter()
            .filter(|n| jsonld::has_type(n, jsonld::COMPONENT_CONDITION))
            .filter_map(|n| node_id(n).map(|id| (id, n)))
            .collect();
        Self {
            by_id,
            stack: Vec::new(),
        }
    }

    /// Parse every `hasCondition` entry of `owner`.
    pub fn conditions_of(&mut self, owner: &Value, diags: &mut Diagnostics) -> Vec<ConditionNode> {
        jsonld::normalize_array(owner.get(jsonld::HAS_CONDITION))
            .into_iter()
            .filter_map(|entry| self.resolve(entry, diags))
            .collect()
    }

    fn resolve(&mut self, entry: &Value, diags: &mut Diagnostics) -> Option<ConditionNode> {
        let node: &Value = match entry {
            Value::String(uri) => match self.by_id.get(uri.as_str()) {
                Some(node) => *node,
                None => {
                    diags.push(
                        DiagnosticKind::UnresolvedCondition,
                        format!("Condition {uri} was not found in this Pathway."),
                        json!({ "condition": uri }),
                    );
                    return None;
                }
            },
            Value::Object(map) if map.len() == 1 && map.contains_key(jsonld::ID) => {
                let uri = node_id(entry).unwrap_or_default();
                self.by_id.get(uri).copied().unwrap_or(entry)
            }
            other => other,
        };

        let id = node_id(node).map(str::to_owned);
        if let Some(id) = &id {
            if self.stack.contains(id) {
                diags.push(
                    DiagnosticKind::UnresolvedCondition,
                    format!("Condition {id} references itself through its sub-conditions; the repeated reference was skipped."),
                    json!({ "condition": id, "path": self.stack }),
                );
                return None;
            }
            self.stack.push(id.clone());
        }

        let conditions = self.conditions_of(node, diags);
        let condition = ConditionNode {
            id: id.clone(),
            name: raw_property(node, jsonld::NAME),
            description: raw_property(node, jsonld::DESCRIPTION),
            required_number: jsonld::first_string(node, jsonld::REQUIRED_NUMBER),
            target_components: id_list(node, jsonld::TARGET_COMPONENT),
            conditions,
        };

        if id.is_some() {
            self.stack.pop();
        }
        Some(condition)
    }
}

// ─── ComponentNode ───────────────────────────────────────────────────────────

/// A step of the pathway. `progression_levels` and `offset` are rewritten by
/// the layout engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentNode {
    pub id: String,
    pub types: Vec<String>,
    pub ctid: Option<String>,
    pub name: Option<Value>,
    pub description: Option<Value>,
    pub credential_type: Option<String>,
    pub proxy_for: Vec<String>,
    pub conditions: Vec<ConditionNode>,
    pub preceded_by: Vec<String>,
    pub precedes: Vec<String>,
    pub has_child: Vec<String>,
    pub is_child_of: Vec<String>,
    pub destination_of: Vec<String>,
    pub progression_levels: Vec<String>,
    /// Lane index inside the component's level column. `None` until laid out.
    pub offset: Option<usize>,
}

impl ComponentNode {
    pub fn from_value(
        node: &Value,
        conditions: &mut ConditionResolver<'_>,
        diags: &mut Diagnostics,
    ) -> Self {
        let mut has_child = id_list(node, jsonld::HAS_CHILD);
        for child in id_list(node, jsonld::HAS_CHILD_BARE) {
            if !has_child.contains(&child) {
                has_child.push(child);
            }
        }
        let mut proxy_for = id_list(node, jsonld::PROXY_FOR_LIST);
        if proxy_for.is_empty() {
            proxy_for = id_list(node, jsonld::PROXY_FOR);
        }

        Self {
            id: node_id(node).unwrap_or_default().to_string(),
            types: node_types(node).into_iter().map(str::to_owned).collect(),
            ctid: jsonld::first_string(node, jsonld::CTID),
            name: raw_property(node, jsonld::NAME),
            description: raw_property(node, jsonld::DESCRIPTION),
            credential_type: jsonld::first_string(node, jsonld::CREDENTIAL_TYPE),
            proxy_for,
            conditions: conditions.conditions_of(node, diags),
            preceded_by: id_list(node, jsonld::PRECEDED_BY),
            precedes: id_list(node, jsonld::PRECEDES),
            has_child,
            is_child_of: id_list(node, jsonld::IS_CHILD_OF),
            destination_of: id_list(node, jsonld::IS_DESTINATION_COMPONENT_OF),
            progression_levels: id_list(node, jsonld::HAS_PROGRESSION_LEVEL),
            offset: None,
        }
    }

    /// `@type` as shown in the footer.
    pub fn type_label(&self) -> String {
        self.types.join(", ")
    }

    pub fn ctid_label(&self) -> &str {
        self.ctid.as_deref().unwrap_or("")
    }

    /// The level the component is rendered in.
    pub fn primary_level(&self) -> Option<&str> {
        self.progression_levels.first().map(String::as_str)
    }

    /// Targets of all conditions, transitively, without duplicates.
    pub fn required_component_ids(&self) -> Vec<String> {
        let mut out = Vec::new();
        for condition in &self.conditions {
            condition.collect_targets(&mut out);
        }
        out
    }
}

// ─── LevelNode ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct LevelNode {
    pub id: String,
    pub label: Option<Value>,
    pub broader: Vec<String>,
    pub narrower: Vec<String>,
    pub synthetic: Option<SyntheticLevel>,
}

impl LevelNode {
    pub fn from_value(node: &Value) -> Self {
        Self {
            id: node_id(node).unwrap_or_default().to_string(),
            label: raw_property(node, jsonld::PREF_LABEL),
            broader: id_list(node, jsonld::BROADER),
            narrower: id_list(node, jsonld::NARROWER),
            synthetic: None,
        }
    }

    pub fn synthetic(kind: SyntheticLevel, label: Value) -> Self {
        Self {
            id: kind.id().to_string(),
            label: Some(label),
            broader: Vec::new(),
            narrower: Vec::new(),
            synthetic: Some(kind),
        }
    }
}

// ─── ModelNode ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ModelNode {
    pub id: String,
    pub name: Option<Value>,
    pub top_concepts: Vec<String>,
}

impl ModelNode {
    pub fn from_value(node: &Value) -> Self {
        Self {
            id: node_id(node).unwrap_or_default().to_string(),
            name: raw_property(node, jsonld::NAME),
            top_concepts: id_list(node, jsonld::HAS_TOP_CONCEPT),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_syntax_types.rs"]
mod tests;
