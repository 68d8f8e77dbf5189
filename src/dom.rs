//! Retained element tree.
//!
//! The viewer builds its UI into an `ElementTree` arena. A browser host
//! mirrors it into real DOM nodes; the static host serializes it with
//! `to_html`. Elements are never removed, only emptied.

use crate::render::RenderNode;
use crate::text::escape_html;

// ─── Identifiers ──────────────────────────────────────────────────────────────

/// Index of an element in its `ElementTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// What a host should do when the element is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    ToggleHighlight(RenderNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Element(ElementId),
    /// Plain text, escaped on output.
    Text(String),
    /// Pre-rendered markup, emitted as is.
    Markup(String),
}

// ─── Element ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    /// Attributes in insertion order.
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Child>,
    pub on_click: Option<ClickAction>,
    pub parent: Option<ElementId>,
}

impl Element {
    fn new(tag: &str, classes: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: classes.split_whitespace().map(str::to_owned).collect(),
            attrs: Vec::new(),
            children: Vec::new(),
            on_click: None,
            parent: None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

// ─── ElementTree ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ElementTree {
    elements: Vec<Element>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Create a detached element. `classes` is a space-separated class list.
    pub fn create(&mut self, tag: &str, classes: &str) -> ElementId {
        self.elements.push(Element::new(tag, classes));
        ElementId(self.elements.len() - 1)
    }

    /// Create an element and append it to `parent`.
    pub fn create_in(&mut self, parent: ElementId, tag: &str, classes: &str) -> ElementId {
        let id = self.create(tag, classes);
        self.append(parent, id);
        id
    }

    pub fn append(&mut self, parent: ElementId, child: ElementId) {
        self.elements[child.0].parent = Some(parent);
        self.elements[parent.0].children.push(Child::Element(child));
    }

    pub fn get(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn get_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    pub fn set_attr(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        let value = value.into();
        let attrs = &mut self.elements[id.0].attrs;
        match attrs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => attrs.push((name.to_string(), value)),
        }
    }

    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id).attr(name)
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id).has_class(class)
    }

    pub fn append_text(&mut self, id: ElementId, text: impl Into<String>) {
        self.elements[id.0].children.push(Child::Text(text.into()));
    }

    pub fn append_markup(&mut self, id: ElementId, markup: impl Into<String>) {
        self.elements[id.0].children.push(Child::Markup(markup.into()));
    }

    /// Replace the content with a single text node; empty text empties the element.
    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        self.clear(id);
        let text = text.into();
        if !text.is_empty() {
            self.append_text(id, text);
        }
    }

    /// Detach every child. Detached elements stay in the arena.
    pub fn clear(&mut self, id: ElementId) {
        let children = std::mem::take(&mut self.elements[id.0].children);
        for child in children {
            if let Child::Element(c) = child {
                self.elements[c.0].parent = None;
            }
        }
    }

    pub fn set_on_click(&mut self, id: ElementId, action: ClickAction) {
        self.elements[id.0].on_click = Some(action);
    }

    /// Direct element children of `id`.
    pub fn child_elements(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        self.get(id).children.iter().filter_map(|c| match c {
            Child::Element(e) => Some(*e),
            _ => None,
        })
    }

    /// Elements under `root` (inclusive) matching `pred`, in document order.
    pub fn find_all(&self, root: ElementId, pred: impl Fn(&Element) -> bool) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if pred(self.get(id)) {
                out.push(id);
            }
            let children: Vec<ElementId> = self.child_elements(id).collect();
            stack.extend(children.into_iter().rev());
        }
        out
    }

    pub fn find_by_class(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        self.find_all(root, |e| e.has_class(class))
    }

    /// Concatenated text of `id` and its descendants. Markup is included raw.
    pub fn text_content(&self, id: ElementId) -> String {
        let mut out = String::new();
        for child in &self.get(id).children {
            match child {
                Child::Element(e) => out.push_str(&self.text_content(*e)),
                Child::Text(t) | Child::Markup(t) => out.push_str(t),
            }
        }
        out
    }

    /// Serialize `root` and its descendants.
    pub fn to_html(&self, root: ElementId) -> String {
        let mut out = String::new();
        self.write_html(root, &mut out);
        out
    }

    fn write_html(&self, id: ElementId, out: &mut String) {
        let element = self.get(id);
        out.push('<');
        out.push_str(&element.tag);
        if !element.classes.is_empty() {
            out.push_str(&format!(r#" class="{}""#, escape_html(&element.classes.join(" "))));
        }
        for (name, value) in &element.attrs {
            out.push_str(&format!(r#" {name}="{}""#, escape_html(value)));
        }
        out.push('>');
        if is_void(&element.tag) {
            return;
        }
        for child in &element.children {
            match child {
                Child::Element(e) => self.write_html(*e, out),
                Child::Text(t) => out.push_str(&escape_html(t)),
                Child::Markup(m) => out.push_str(m),
            }
        }
        out.push_str(&format!("</{}>", element.tag));
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "br" | "hr" | "img" | "input" | "meta" | "link")
}

#[cfg(test)]
#[path = "../tests/rust/test_dom.rs"]
mod tests;
