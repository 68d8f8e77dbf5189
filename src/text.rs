//! Language-text resolution.
//!
//! Picks displayable strings out of plain values, arrays, and language maps
//! (`{"en-us": "...", "es": [...]}`) according to `LanguageOptions`.

use serde_json::Value;

use crate::config::LanguageOptions;
use crate::syntax::jsonld::{is_blank, normalize_array, scalar_string};

// ─── RenderableText ──────────────────────────────────────────────────────────

/// One selected entry of a language map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageFragment {
    pub code: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RenderableText {
    #[default]
    Empty,
    Plain(String),
    Fragments(Vec<LanguageFragment>),
}

impl RenderableText {
    pub fn is_empty(&self) -> bool {
        match self {
            RenderableText::Empty => true,
            RenderableText::Plain(s) => s.is_empty(),
            RenderableText::Fragments(f) => f.is_empty(),
        }
    }

    /// Text without markup; fragments are joined with `joiner`.
    pub fn to_plain(&self, joiner: &str) -> String {
        match self {
            RenderableText::Empty => String::new(),
            RenderableText::Plain(s) => s.clone(),
            RenderableText::Fragments(fragments) => fragments
                .iter()
                .map(|f| f.value.as_str())
                .collect::<Vec<_>>()
                .join(joiner),
        }
    }

    /// HTML markup. Each fragment becomes a `langString` block tagged with its code.
    pub fn to_markup(&self, css_class: Option<&str>) -> String {
        match self {
            RenderableText::Empty => String::new(),
            RenderableText::Plain(s) => escape_html(s),
            RenderableText::Fragments(fragments) => {
                let class = css_class.unwrap_or("");
                fragments
                    .iter()
                    .map(|f| {
                        format!(
                            r#"<div class="pathwayViewer langString {class}" data-language="{code}"><span class="langCode">{code}</span><span class="langValue">{value}</span></div>"#,
                            code = escape_html(&f.code),
                            value = escape_html(&f.value),
                        )
                    })
                    .collect()
            }
        }
    }
}

// ─── Resolution ───────────────────────────────────────────────────────────────

/// Resolve `value` into renderable text.
///
/// Preferred codes come first in their configured order, then (with
/// `allow_all`) the remaining codes in document order; both passes stop at
/// `max_codes` entries.
pub fn resolve(options: &LanguageOptions, value: Option<&Value>) -> RenderableText {
    let Some(value) = value.filter(|v| !is_blank(v)) else {
        return RenderableText::Empty;
    };

    match value {
        Value::Array(items) => {
            let joined = join_values(items.iter(), &options.value_joiner);
            RenderableText::Plain(joined)
        }
        Value::Object(map) => {
            let mut selected: Vec<LanguageFragment> = Vec::new();

            for code in &options.preferred_codes {
                if selected.len() >= options.max_codes {
                    break;
                }
                if let Some(entry) = map.get(code) {
                    selected.push(fragment(code, entry, options));
                }
            }

            if options.allow_all {
                for (code, entry) in map {
                    if selected.len() >= options.max_codes {
                        break;
                    }
                    if selected.iter().any(|f| &f.code == code) {
                        continue;
                    }
                    selected.push(fragment(code, entry, options));
                }
            }

            RenderableText::Fragments(selected)
        }
        scalar => RenderableText::Plain(scalar_string(scalar).unwrap_or_default()),
    }
}

fn fragment(code: &str, entry: &Value, options: &LanguageOptions) -> LanguageFragment {
    LanguageFragment {
        code: code.to_string(),
        value: join_values(normalize_array(Some(entry)).into_iter(), &options.value_joiner),
    }
}

fn join_values<'a>(values: impl Iterator<Item = &'a Value>, joiner: &str) -> String {
    values
        .map(|v| scalar_string(v).unwrap_or_else(|| v.to_string()))
        .collect::<Vec<_>>()
        .join(joiner)
}

/// Escape text for HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
#[path = "../tests/rust/test_text.rs"]
mod tests;
