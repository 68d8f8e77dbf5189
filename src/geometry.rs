//! Screen geometry seen by the connector renderer.
//!
//! A browser host answers these queries from live layout. `FlowGeometry` is a
//! deterministic stand-in that measures the element tree itself with a small
//! flex-like box model; the static page and the tests use it.

use std::collections::HashMap;

use crate::dom::{Child, Element, ElementId, ElementTree};

// ─── Point / Size / Rect ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn left_center(&self) -> Point {
        Point::new(self.x, self.y + self.height * 0.5)
    }

    pub fn right_center(&self) -> Point {
        Point::new(self.right(), self.y + self.height * 0.5)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

// ─── Geometry ─────────────────────────────────────────────────────────────────

/// Layout queries against the host. Boxes are in screen coordinates.
pub trait Geometry {
    /// Bounding box of the scrolling content element.
    fn content_box(&self) -> Rect;
    fn scroll_offset(&self) -> Point;
    fn set_scroll_offset(&mut self, offset: Point);
    /// Full scrollable size of the content element.
    fn scroll_size(&self) -> Size;
    /// `None` when the element is not laid out.
    fn bounding_box(&self, element: ElementId) -> Option<Rect>;
}

/// An element's box relative to the content origin: `box - content_box + scroll`.
pub fn content_position(geometry: &dyn Geometry, element: ElementId) -> Option<Rect> {
    let rect = geometry.bounding_box(element)?;
    let content = geometry.content_box();
    let scroll = geometry.scroll_offset();
    Some(rect.translate(scroll.x - content.x, scroll.y - content.y))
}

// ─── FlowGeometry ────────────────────────────────────────────────────────────

const CHAR_WIDTH: f64 = 7.0;
const LINE_HEIGHT: f64 = 18.0;
const DISPLAY_WIDTH: f64 = 500.0;
const DISPLAY_MARGIN_X: f64 = 100.0;
const DISPLAY_MARGIN_Y: f64 = 50.0;
const SECTION_PADDING_X: f64 = 10.0;
const SECTION_PADDING_Y: f64 = 5.0;

/// Box-model rules for one element.
#[derive(Debug, Clone, Copy, Default)]
struct BoxStyle {
    horizontal: bool,
    hidden: bool,
    fixed_width: Option<f64>,
    padding: (f64, f64),
    margin: (f64, f64),
}

fn style_of(element: &Element) -> BoxStyle {
    let mut style = BoxStyle {
        horizontal: element.tag == "tr"
            || ["componentWrapper", "conditionWrapper", "progressionModelTableBodyCellInner", "pathwayDisplayHeader"]
                .iter()
                .any(|c| element.has_class(c)),
        ..BoxStyle::default()
    };
    if element.has_class("connectorLayers") {
        style.hidden = true;
    }
    if element.has_class("pathwayDisplay") {
        style.fixed_width = Some(DISPLAY_WIDTH);
        style.margin = (DISPLAY_MARGIN_X, DISPLAY_MARGIN_Y);
    }
    if element.has_class("pathwayDisplaySection") {
        if element.children.is_empty() {
            style.hidden = true;
        }
        style.padding = (SECTION_PADDING_X, SECTION_PADDING_Y);
    }
    if matches!(element.tag.as_str(), "th" | "button") {
        style.padding = (SECTION_PADDING_X, SECTION_PADDING_Y);
    }
    style
}

/// Rough text width: characters outside markup tags.
fn text_size(text: &str, markup: bool) -> Size {
    let mut chars = 0usize;
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' if markup => in_tag = true,
            '>' if markup => in_tag = false,
            _ if !in_tag => chars += 1,
            _ => {}
        }
    }
    if chars == 0 {
        Size::default()
    } else {
        Size::new(chars as f64 * CHAR_WIDTH, LINE_HEIGHT)
    }
}

/// Deterministic geometry computed from an element tree.
///
/// The content element sits at the screen origin with a fixed viewport.
/// Every box is measured once; scrolling only shifts the reported boxes.
#[derive(Debug, Clone)]
pub struct FlowGeometry {
    boxes: HashMap<ElementId, Rect>,
    viewport: Size,
    extent: Size,
    scroll: Point,
}

impl FlowGeometry {
    pub fn measure(tree: &ElementTree, content: ElementId, viewport: Size) -> Self {
        let mut sizes = HashMap::new();
        let outer = measure_outer(tree, content, &mut sizes);
        let mut boxes = HashMap::new();
        place(tree, content, Point::default(), &sizes, &mut boxes);
        Self {
            boxes,
            viewport,
            extent: Size::new(outer.width.max(viewport.width), outer.height.max(viewport.height)),
            scroll: Point::default(),
        }
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }
}

impl Geometry for FlowGeometry {
    fn content_box(&self) -> Rect {
        Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height)
    }

    fn scroll_offset(&self) -> Point {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: Point) {
        let max_x = (self.extent.width - self.viewport.width).max(0.0);
        let max_y = (self.extent.height - self.viewport.height).max(0.0);
        self.scroll = Point::new(offset.x.clamp(0.0, max_x), offset.y.clamp(0.0, max_y));
    }

    fn scroll_size(&self) -> Size {
        self.extent
    }

    fn bounding_box(&self, element: ElementId) -> Option<Rect> {
        self.boxes
            .get(&element)
            .map(|rect| rect.translate(-self.scroll.x, -self.scroll.y))
    }
}

/// Border-box size per element, plus its margins.
type Sizes = HashMap<ElementId, (Size, BoxStyle)>;

/// Measure `id` and return its margin-box size.
fn measure_outer(tree: &ElementTree, id: ElementId, sizes: &mut Sizes) -> Size {
    let element = tree.get(id);
    let style = style_of(element);
    if style.hidden {
        sizes.insert(id, (Size::default(), style));
        return Size::default();
    }

    let mut content = Size::default();
    for child in &element.children {
        let size = match child {
            Child::Element(e) => measure_outer(tree, *e, sizes),
            Child::Text(t) => text_size(t, false),
            Child::Markup(m) => text_size(m, true),
        };
        if style.horizontal {
            content.width += size.width;
            content.height = content.height.max(size.height);
        } else {
            content.width = content.width.max(size.width);
            content.height += size.height;
        }
    }

    let (pad_x, pad_y) = style.padding;
    let mut border = Size::new(content.width + 2.0 * pad_x, content.height + 2.0 * pad_y);
    if let Some(width) = style.fixed_width {
        border.width = width;
    }
    sizes.insert(id, (border, style));

    let (margin_x, margin_y) = style.margin;
    Size::new(border.width + 2.0 * margin_x, border.height + 2.0 * margin_y)
}

/// Assign boxes; `origin` is the top-left of `id`'s margin box.
fn place(tree: &ElementTree, id: ElementId, origin: Point, sizes: &Sizes, boxes: &mut HashMap<ElementId, Rect>) {
    let Some(&(size, style)) = sizes.get(&id) else {
        return;
    };
    if style.hidden {
        return;
    }
    let (margin_x, margin_y) = style.margin;
    let rect = Rect::new(origin.x + margin_x, origin.y + margin_y, size.width, size.height);
    boxes.insert(id, rect);

    let (pad_x, pad_y) = style.padding;
    let mut cursor = Point::new(rect.x + pad_x, rect.y + pad_y);
    for child in &tree.get(id).children {
        let advance = match child {
            Child::Element(e) => {
                place(tree, *e, cursor, sizes, boxes);
                outer_size(*e, sizes)
            }
            Child::Text(t) => text_size(t, false),
            Child::Markup(m) => text_size(m, true),
        };
        if style.horizontal {
            cursor.x += advance.width;
        } else {
            cursor.y += advance.height;
        }
    }
}

fn outer_size(id: ElementId, sizes: &Sizes) -> Size {
    match sizes.get(&id) {
        Some((_, style)) if style.hidden => Size::default(),
        Some((size, style)) => Size::new(
            size.width + 2.0 * style.margin.0,
            size.height + 2.0 * style.margin.1,
        ),
        None => Size::default(),
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_geometry.rs"]
mod tests;
