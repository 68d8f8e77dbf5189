//! Component and proxy-for links built from `LinkPattern` templates.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::{LanguageOptions, UiOptions};
use crate::syntax::ComponentNode;
use crate::syntax::jsonld::ctid_from_uri;
use crate::text;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(uri|ctid)\}").expect("placeholder pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub label: String,
}

/// Substitute every `{uri}` and `{ctid}` in `pattern`.
pub fn expand(pattern: &str, uri: &str, ctid: &str) -> String {
    PLACEHOLDER_RE
        .replace_all(pattern, |caps: &Captures| match &caps[1] {
            "uri" => uri.to_string(),
            _ => ctid.to_string(),
        })
        .into_owned()
}

/// Links shown on a component: its own registry links (only for `http` ids),
/// then one link per proxy-for pattern and target.
pub fn component_links(
    component: &ComponentNode,
    ui: &UiOptions,
    language: &LanguageOptions,
) -> Vec<Link> {
    let mut links = Vec::new();

    if component.id.starts_with("http") {
        let ctid = ctid_from_uri(&component.id);
        for pattern in &ui.component_uri_links {
            links.push(Link {
                href: expand(&pattern.uri_pattern, &component.id, &ctid),
                label: label_of(&pattern.label, language),
            });
        }
    }

    let many = component.proxy_for.len() > 1;
    for pattern in &ui.component_proxy_for_links {
        let label = label_of(&pattern.label, language);
        for target in &component.proxy_for {
            let ctid = ctid_from_uri(target);
            links.push(Link {
                href: expand(&pattern.uri_pattern, target, &ctid),
                label: if many {
                    format!("{label}: {ctid}")
                } else {
                    label.clone()
                },
            });
        }
    }

    links
}

fn label_of(label: &serde_json::Value, language: &LanguageOptions) -> String {
    text::resolve(language, Some(label)).to_plain(&language.value_joiner)
}
