//! Tolerant access to JSON-LD node properties.
//!
//! Registry documents encode any property as absent, a single value, or an
//! array. Every accessor goes through `normalize_array` so callers only ever
//! see sequences.

use serde_json::Value;

// ─── Vocabulary ───────────────────────────────────────────────────────────────

pub const ID: &str = "@id";
pub const TYPE: &str = "@type";
pub const GRAPH: &str = "@graph";

pub const PATHWAY: &str = "ceterms:Pathway";
pub const COMPONENT_CONDITION: &str = "ceterms:ComponentCondition";
pub const PROGRESSION_MODEL: &str = "asn:ProgressionModel";
pub const PROGRESSION_LEVEL: &str = "asn:ProgressionLevel";

pub const NAME: &str = "ceterms:name";
pub const DESCRIPTION: &str = "ceterms:description";
pub const CTID: &str = "ceterms:ctid";
pub const CREDENTIAL_TYPE: &str = "ceterms:credentialType";
pub const HAS_DESTINATION_COMPONENT: &str = "ceterms:hasDestinationComponent";
pub const IS_DESTINATION_COMPONENT_OF: &str = "ceterms:isDestinationComponentOf";
pub const PRECEDED_BY: &str = "ceterms:precededBy";
pub const PRECEDES: &str = "ceterms:precedes";
pub const HAS_CHILD: &str = "ceterms:hasChild";
pub const HAS_CHILD_BARE: &str = "hasChild";
pub const IS_CHILD_OF: &str = "ceterms:isChildOf";
pub const HAS_CONDITION: &str = "ceterms:hasCondition";
pub const REQUIRED_NUMBER: &str = "ceterms:requiredNumber";
pub const TARGET_COMPONENT: &str = "ceterms:targetComponent";
pub const PROXY_FOR_LIST: &str = "ceterms:proxyForList";
pub const PROXY_FOR: &str = "ceterms:proxyFor";
pub const HAS_PROGRESSION_LEVEL: &str = "asn:hasProgressionLevel";
pub const HAS_PROGRESSION_MODEL: &str = "asn:hasProgressionModel";
pub const HAS_TOP_CONCEPT: &str = "skos:hasTopConcept";
pub const BROADER: &str = "skos:broader";
pub const NARROWER: &str = "skos:narrower";
pub const PREF_LABEL: &str = "skos:prefLabel";

// ─── Normalisation ───────────────────────────────────────────────────────────

/// Whether a value counts as "not present": null, `false` or an empty string.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// `value -> sequence`: absent/blank → `[]`, array → its items, else `[value]`.
pub fn normalize_array(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None => Vec::new(),
        Some(v) if is_blank(v) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(v) => vec![v],
    }
}

/// Render a scalar as a string; objects with an `@id` yield that id.
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(map) => map.get(ID).and_then(Value::as_str).map(str::to_owned),
        _ => None,
    }
}

/// A property read as a list of URI references.
pub fn id_list(node: &Value, property: &str) -> Vec<String> {
    normalize_array(node.get(property))
        .into_iter()
        .filter_map(scalar_string)
        .filter(|s| !s.is_empty())
        .collect()
}

/// First value of a property as a string.
pub fn first_string(node: &Value, property: &str) -> Option<String> {
    normalize_array(node.get(property))
        .into_iter()
        .find_map(scalar_string)
}

/// A property's raw value, kept for language-map resolution.
pub fn raw_property(node: &Value, property: &str) -> Option<Value> {
    node.get(property).filter(|v| !is_blank(v)).cloned()
}

pub fn node_id(node: &Value) -> Option<&str> {
    node.get(ID).and_then(Value::as_str)
}

/// All `@type` values of a node.
pub fn node_types(node: &Value) -> Vec<&str> {
    normalize_array(node.get(TYPE))
        .into_iter()
        .filter_map(Value::as_str)
        .collect()
}

pub fn has_type(node: &Value, type_name: &str) -> bool {
    node_types(node).contains(&type_name)
}

/// The `@graph` array of a document; a missing or malformed graph is empty.
pub fn graph_nodes(document: &Value) -> &[Value] {
    document
        .get(GRAPH)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// The `ce-…` segment of a registry URI, or an empty string.
pub fn ctid_from_uri(uri: &str) -> String {
    uri.split('/')
        .find(|segment| segment.starts_with("ce-"))
        .unwrap_or_default()
        .to_string()
}
