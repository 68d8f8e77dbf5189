use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn options() -> LanguageOptions {
    LanguageOptions::default()
}

#[test]
fn test_blank_values_are_empty() {
    let opts = options();
    assert_eq!(resolve(&opts, None), RenderableText::Empty);
    assert_eq!(resolve(&opts, Some(&json!(null))), RenderableText::Empty);
    assert_eq!(resolve(&opts, Some(&json!(""))), RenderableText::Empty);
    assert!(resolve(&opts, Some(&json!(false))).is_empty());
}

#[test]
fn test_plain_string_and_array() {
    let opts = options();
    assert_eq!(
        resolve(&opts, Some(&json!("Nursing"))),
        RenderableText::Plain("Nursing".into())
    );
    assert_eq!(
        resolve(&opts, Some(&json!(["a", "b", 3]))),
        RenderableText::Plain("a, b, 3".into())
    );
}

#[test]
fn test_preferred_codes_come_first() {
    let opts = options();
    let text = resolve(&opts, Some(&json!({ "es": "Hola", "en": "Hello" })));
    let RenderableText::Fragments(fragments) = text else {
        panic!("expected fragments");
    };
    let codes: Vec<&str> = fragments.iter().map(|f| f.code.as_str()).collect();
    assert_eq!(codes, vec!["en", "es"]);
}

#[test]
fn test_allow_all_false_drops_other_codes() {
    let opts = LanguageOptions {
        allow_all: false,
        ..options()
    };
    let text = resolve(&opts, Some(&json!({ "es": "Hola", "en-us": "Hello" })));
    assert_eq!(text.to_plain(" | "), "Hello");
}

#[test]
fn test_max_codes_caps_fragments() {
    let opts = LanguageOptions {
        max_codes: 2,
        ..options()
    };
    let text = resolve(
        &opts,
        Some(&json!({ "fr": "Bonjour", "es": "Hola", "en": "Hello", "de": "Hallo" })),
    );
    assert_eq!(text.to_plain("/"), "Hello/Bonjour");
}

#[test]
fn test_language_entry_arrays_joined() {
    let opts = LanguageOptions {
        value_joiner: " + ".into(),
        ..options()
    };
    let text = resolve(&opts, Some(&json!({ "en": ["one", "two"] })));
    assert_eq!(text.to_plain(""), "one + two");
}

#[test]
fn test_markup_escapes_and_tags_codes() {
    let opts = options();
    let plain = resolve(&opts, Some(&json!("a < b")));
    assert_eq!(plain.to_markup(None), "a &lt; b");

    let tagged = resolve(&opts, Some(&json!({ "en": "Tom & Jerry" })));
    let markup = tagged.to_markup(Some("description"));
    assert!(markup.contains(r#"class="pathwayViewer langString description""#));
    assert!(markup.contains(r#"data-language="en""#));
    assert!(markup.contains("Tom &amp; Jerry"));
}

#[test]
fn test_escape_html() {
    assert_eq!(escape_html(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
}
