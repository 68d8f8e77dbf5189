use super::*;
use pretty_assertions::assert_eq;

use crate::test_support::*;

fn uri(name: &str) -> String {
    format!("https://example.org/resources/ce-{name}")
}

fn offset_of(rendered: &Rendered, name: &str) -> Option<usize> {
    let id = rendered.data.find_member(&uri(name)).expect("member");
    rendered.data.component(id).offset
}

fn common_lane_count(rendered: &Rendered) -> usize {
    let common = rendered
        .model
        .level_index("_:CommonLevel")
        .expect("common level");
    rendered.layout.levels[common].lane_count
}

#[test]
fn test_deepest_path_wins() {
    // a <- b <- c <- d <- e, plus a shortcut a <- c.
    let document = pathway_doc(
        destination_with(json!({ "ceterms:precededBy": uri("a") })),
        vec![
            component_with(&uri("a"), json!({ "ceterms:precededBy": [uri("b"), uri("c")] })),
            component_with(&uri("b"), json!({ "ceterms:precededBy": uri("c") })),
            component_with(&uri("c"), json!({ "ceterms:precededBy": uri("d") })),
            component_with(&uri("d"), json!({ "ceterms:precededBy": uri("e") })),
            component(&uri("e")),
        ],
    );
    let rendered = run_pipeline(&document, None);

    assert_eq!(offset_of(&rendered, "a"), Some(0));
    assert_eq!(offset_of(&rendered, "b"), Some(1));
    assert_eq!(offset_of(&rendered, "c"), Some(2));
    assert_eq!(offset_of(&rendered, "e"), Some(4));
    assert_eq!(common_lane_count(&rendered), 5);
    assert_eq!(rendered.data.destination_component().offset, Some(0));
    assert_eq!(rendered.diags.count(DiagnosticKind::PrecedenceCycle), 0);
}

#[test]
fn test_member_order_does_not_change_offsets() {
    let document = pathway_doc(
        destination(),
        vec![
            component(&uri("c")),
            component_with(&uri("b"), json!({ "ceterms:precededBy": uri("c") })),
            component_with(&uri("a"), json!({ "ceterms:precededBy": uri("b") })),
        ],
    );
    let rendered = run_pipeline(&document, None);
    assert_eq!(offset_of(&rendered, "a"), Some(0));
    assert_eq!(offset_of(&rendered, "b"), Some(1));
    assert_eq!(offset_of(&rendered, "c"), Some(2));
}

#[test]
fn test_conditions_and_children_push_lanes() {
    let document = pathway_doc(
        destination(),
        vec![
            component_with(
                &uri("a"),
                json!({
                    "ceterms:hasCondition": { "ceterms:targetComponent": uri("b") },
                    "ceterms:hasChild": uri("c")
                }),
            ),
            component(&uri("b")),
            component_with(&uri("c"), json!({ "ceterms:isChildOf": uri("d") })),
            component(&uri("d")),
        ],
    );
    let rendered = run_pipeline(&document, None);
    assert_eq!(offset_of(&rendered, "b"), Some(1));
    assert_eq!(offset_of(&rendered, "c"), Some(1));
}

#[test]
fn test_two_node_cycle_reported_once() {
    let document = pathway_doc(
        destination(),
        vec![
            component_with(&uri("a"), json!({ "ceterms:precededBy": uri("b") })),
            component_with(&uri("b"), json!({ "ceterms:precededBy": uri("a") })),
        ],
    );
    let rendered = run_pipeline(&document, None);

    assert_eq!(rendered.diags.count(DiagnosticKind::PrecedenceCycle), 1);
    let cycle = rendered
        .diags
        .entries()
        .iter()
        .find(|d| d.kind == DiagnosticKind::PrecedenceCycle)
        .expect("cycle diagnostic");
    assert_eq!(
        cycle.message,
        "Possible circular reference detected in Component precededBy/hasChild/precedes/isChildOf path"
    );
    assert!(offset_of(&rendered, "a").is_some());
    assert!(offset_of(&rendered, "b").is_some());
}

#[test]
fn test_self_reference_reported() {
    let document = pathway_doc(
        destination(),
        vec![component_with(&uri("a"), json!({ "ceterms:precededBy": uri("a") }))],
    );
    let rendered = run_pipeline(&document, None);
    assert_eq!(rendered.diags.count(DiagnosticKind::PrecedenceCycle), 1);
}

#[test]
fn test_cross_level_predecessors_ignored() {
    let model = model_doc(&["l1", "l2"], vec![level("l1", json!({})), level("l2", json!({}))]);
    let document = pathway_doc(
        destination(),
        vec![
            component_with(
                &uri("a"),
                json!({ "asn:hasProgressionLevel": "l2", "ceterms:precededBy": uri("b") }),
            ),
            component_with(&uri("b"), json!({ "asn:hasProgressionLevel": "l1" })),
        ],
    );
    let rendered = run_pipeline(&document, Some(&model));
    assert_eq!(offset_of(&rendered, "a"), Some(0));
    assert_eq!(offset_of(&rendered, "b"), Some(0));
    let l2 = rendered.model.level_index("l2").expect("l2");
    assert_eq!(rendered.layout.levels[l2].lane_count, 1);
}
