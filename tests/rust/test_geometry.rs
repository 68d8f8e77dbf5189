use super::*;
use pretty_assertions::assert_eq;

const VIEWPORT: Size = Size {
    width: 100.0,
    height: 100.0,
};

#[test]
fn test_rect_helpers() {
    let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(rect.right(), 40.0);
    assert_eq!(rect.bottom(), 60.0);
    assert_eq!(rect.left_center(), Point::new(10.0, 40.0));
    assert_eq!(rect.right_center(), Point::new(40.0, 40.0));
    assert_eq!(rect.translate(-10.0, 5.0), Rect::new(0.0, 25.0, 30.0, 40.0));
}

#[test]
fn test_text_is_measured_without_markup() {
    let mut tree = ElementTree::new();
    let content = tree.create("div", "");
    let plain = tree.create_in(content, "div", "");
    tree.append_text(plain, "abc");
    let marked = tree.create_in(content, "div", "");
    tree.append_markup(marked, "<b>ab</b>");

    let geometry = FlowGeometry::measure(&tree, content, VIEWPORT);
    assert_eq!(geometry.bounding_box(plain), Some(Rect::new(0.0, 0.0, 21.0, 18.0)));
    assert_eq!(geometry.bounding_box(marked), Some(Rect::new(0.0, 18.0, 14.0, 18.0)));
}

#[test]
fn test_rows_lay_out_horizontally() {
    let mut tree = ElementTree::new();
    let content = tree.create("div", "");
    let row = tree.create_in(content, "tr", "");
    let first = tree.create_in(row, "td", "");
    tree.append_text(first, "ab");
    let second = tree.create_in(row, "td", "");
    tree.append_text(second, "abcd");

    let geometry = FlowGeometry::measure(&tree, content, VIEWPORT);
    assert_eq!(geometry.bounding_box(second), Some(Rect::new(14.0, 0.0, 28.0, 18.0)));
    assert_eq!(geometry.bounding_box(row), Some(Rect::new(0.0, 0.0, 42.0, 18.0)));
}

#[test]
fn test_displays_have_fixed_width_and_margin() {
    let mut tree = ElementTree::new();
    let content = tree.create("div", "");
    let display = tree.create_in(content, "div", "pathwayViewer pathwayDisplay");
    let section = tree.create_in(display, "div", "pathwayDisplaySection");
    tree.append_text(section, "x");

    let geometry = FlowGeometry::measure(&tree, content, VIEWPORT);
    let rect = geometry.bounding_box(display).expect("display box");
    assert_eq!(rect.x, 100.0);
    assert_eq!(rect.y, 50.0);
    assert_eq!(rect.width, 500.0);
    // one line plus the section's vertical padding
    assert_eq!(rect.height, 28.0);
    assert_eq!(geometry.scroll_size(), Size::new(700.0, 128.0));
}

#[test]
fn test_hidden_elements_have_no_box() {
    let mut tree = ElementTree::new();
    let content = tree.create("div", "");
    let layers = tree.create_in(content, "div", "connectorLayers");
    tree.append_text(layers, "ignored");
    let empty_section = tree.create_in(content, "div", "pathwayDisplaySection");

    let geometry = FlowGeometry::measure(&tree, content, VIEWPORT);
    assert_eq!(geometry.bounding_box(layers), None);
    assert_eq!(geometry.bounding_box(empty_section), None);
    assert_eq!(geometry.scroll_size(), VIEWPORT);
}

#[test]
fn test_scroll_is_clamped_and_shifts_boxes() {
    let mut tree = ElementTree::new();
    let content = tree.create("div", "");
    let wide = tree.create_in(content, "div", "");
    tree.append_text(wide, "x".repeat(100));
    let second = tree.create_in(content, "div", "");
    tree.append_text(second, "y");

    let mut geometry = FlowGeometry::measure(&tree, content, VIEWPORT);
    geometry.set_scroll_offset(Point::new(1000.0, -5.0));
    assert_eq!(geometry.scroll_offset(), Point::new(600.0, 0.0));
    assert_eq!(geometry.bounding_box(second), Some(Rect::new(-600.0, 18.0, 7.0, 18.0)));
    assert_eq!(
        content_position(&geometry, second),
        Some(Rect::new(0.0, 18.0, 7.0, 18.0))
    );
    assert_eq!(geometry.viewport(), VIEWPORT);
}
