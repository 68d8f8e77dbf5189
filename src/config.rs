//! Viewer configuration.
//!
//! Field names deserialize from the registry viewer's option objects
//! (`{"UI": {...}, "Language": {...}}`); every field has a default so partial
//! option documents are accepted.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::render::EdgeKind;

// ─── LanguageOptions ─────────────────────────────────────────────────────────

/// Rules for picking strings out of language maps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LanguageOptions {
    /// Upper bound on the number of language entries rendered.
    pub max_codes: usize,
    /// Render codes that are not in `preferred_codes` after the preferred ones.
    pub allow_all: bool,
    pub preferred_codes: Vec<String>,
    pub value_joiner: String,
}

impl Default for LanguageOptions {
    fn default() -> Self {
        Self {
            max_codes: 100,
            allow_all: true,
            preferred_codes: vec!["en-US".into(), "en-us".into(), "en".into()],
            value_joiner: ", ".into(),
        }
    }
}

// ─── UiOptions ────────────────────────────────────────────────────────────────

/// A link template. `{uri}` and `{ctid}` are substituted per target.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LinkPattern {
    pub label: Value,
    #[serde(rename = "URIPattern")]
    pub uri_pattern: String,
}

impl LinkPattern {
    pub fn new(label: &str, uri_pattern: &str) -> Self {
        Self {
            label: json!({ "en-us": label }),
            uri_pattern: uri_pattern.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UiOptions {
    pub pathway_header_tag: String,
    #[serde(rename = "DefaultComponentProgressionLevelHeaderLabel")]
    pub default_component_level_label: Value,
    #[serde(
        rename = "DefaultDestinationProgressionLevelHeaderLabel",
        alias = "DefaultDestinationProgressionLevelHeaderLevel"
    )]
    pub default_destination_level_label: Value,
    #[serde(rename = "ComponentURILinks")]
    pub component_uri_links: Vec<LinkPattern>,
    pub component_proxy_for_links: Vec<LinkPattern>,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            pathway_header_tag: "h2".into(),
            default_component_level_label: json!({ "en-us": "Components" }),
            default_destination_level_label: json!({ "en-us": "Destination" }),
            component_uri_links: vec![
                LinkPattern::new("View Component in Credential Registry", "{uri}"),
                LinkPattern::new(
                    "View Component in Credential Finder",
                    "https://credentialfinder.org/resources/{ctid}",
                ),
            ],
            component_proxy_for_links: vec![
                LinkPattern::new("View Resource in Credential Registry", "{uri}"),
                LinkPattern::new(
                    "View Resource in Credential Finder",
                    "https://credentialfinder.org/resources/{ctid}",
                ),
            ],
        }
    }
}

// ─── ConnectorPalette ─────────────────────────────────────────────────────────

/// Line colour per connector category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ConnectorPalette {
    pub condition: String,
    pub preceded_by: String,
    pub child: String,
    pub target: String,
    /// Used when an anchor carries no recognised style token.
    pub fallback: String,
}

impl Default for ConnectorPalette {
    fn default() -> Self {
        Self {
            condition: "#FA0".into(),
            preceded_by: "#0C3".into(),
            child: "#CCC".into(),
            target: "#03A".into(),
            fallback: "#CCC".into(),
        }
    }
}

impl ConnectorPalette {
    pub fn color(&self, kind: EdgeKind) -> &str {
        match kind {
            EdgeKind::Condition => &self.condition,
            EdgeKind::Preceding => &self.preceded_by,
            EdgeKind::Child => &self.child,
            EdgeKind::Target => &self.target,
        }
    }

    /// Colour for a `data-connector` style token.
    pub fn color_for_token(&self, token: Option<&str>) -> &str {
        token
            .and_then(EdgeKind::from_token)
            .map(|kind| self.color(kind))
            .unwrap_or(&self.fallback)
    }
}

// ─── ViewerOptions ────────────────────────────────────────────────────────────

/// Per-viewer configuration surface.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    #[serde(rename = "UI")]
    pub ui: UiOptions,
    #[serde(rename = "Language")]
    pub language: LanguageOptions,
    #[serde(rename = "Connectors")]
    pub connectors: ConnectorPalette,
}

impl ViewerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an options document; missing fields keep their defaults.
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}
