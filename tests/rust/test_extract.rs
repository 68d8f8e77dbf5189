use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_support::*;

const A: &str = "https://example.org/resources/ce-a";
const B: &str = "https://example.org/resources/ce-b";
const C: &str = "https://example.org/resources/ce-c";

fn extracted(document: &Value) -> PathwayData {
    let mut diags = Diagnostics::new();
    extract(document, PATHWAY, &mut diags).expect("extracts")
}

fn ids(data: &PathwayData, list: &[ComponentId]) -> Vec<String> {
    list.iter().map(|&id| data.component(id).id.clone()).collect()
}

#[test]
fn test_members_exclude_pathway_destination_and_conditions() {
    let document = pathway_doc(
        destination(),
        vec![
            component(A),
            json!({ "@id": "cond", "@type": "ceterms:ComponentCondition" }),
            component(B),
        ],
    );
    let data = extracted(&document);
    assert_eq!(data.pathway.id, PATHWAY);
    assert_eq!(data.destination_component().id, DESTINATION);
    assert_eq!(ids(&data, &data.members), vec![A, B]);
    assert_eq!(data.all().count(), 3);
}

#[test]
fn test_destination_found_from_either_endpoint() {
    let pathway = json!({ "@id": PATHWAY, "@type": "ceterms:Pathway" });
    let dest = component_with(
        DESTINATION,
        json!({ "ceterms:isDestinationComponentOf": PATHWAY }),
    );
    let data = extracted(&doc(vec![pathway, component(A), dest]));
    assert_eq!(data.destination_component().id, DESTINATION);
    assert_eq!(ids(&data, &data.members), vec![A]);
}

#[test]
fn test_missing_pathway_is_fatal() {
    let mut diags = Diagnostics::new();
    let err = extract(&doc(vec![component(A)]), PATHWAY, &mut diags).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("No ceterms:Pathway object found for Pathway {PATHWAY}")
    );
}

#[test]
fn test_missing_destination_is_fatal() {
    let pathway = json!({ "@id": PATHWAY, "@type": "ceterms:Pathway" });
    let mut diags = Diagnostics::new();
    let err = extract(&doc(vec![pathway, component(A)]), PATHWAY, &mut diags).unwrap_err();
    assert!(matches!(err, ViewerError::MissingDestination { .. }));
    assert_eq!(err.messages(), vec!["No Destination Component found for this Pathway."]);
}

#[test]
fn test_preceding_is_bidirectional() {
    let document = pathway_doc(
        destination_with(json!({ "ceterms:precededBy": A })),
        vec![
            component(A),
            component_with(B, json!({ "ceterms:precedes": DESTINATION })),
            component(C),
        ],
    );
    let data = extracted(&document);
    assert_eq!(ids(&data, &data.preceding(data.destination)), vec![A, B]);
}

#[test]
fn test_children_are_bidirectional() {
    let document = pathway_doc(
        destination_with(json!({ "ceterms:hasChild": B })),
        vec![
            component_with(A, json!({ "ceterms:isChildOf": DESTINATION })),
            component(B),
        ],
    );
    let data = extracted(&document);
    assert_eq!(ids(&data, &data.children(data.destination)), vec![A, B]);
}

#[test]
fn test_predecessors_union_in_member_order() {
    let document = pathway_doc(
        destination_with(json!({
            "ceterms:hasChild": C,
            "ceterms:precededBy": B,
            "ceterms:hasCondition": { "ceterms:targetComponent": [A, B] }
        })),
        vec![component(C), component(B), component(A)],
    );
    let data = extracted(&document);
    assert_eq!(ids(&data, &data.required(data.destination)), vec![B, A]);
    assert_eq!(ids(&data, &data.predecessors(data.destination)), vec![C, B, A]);
}

#[test]
fn test_find_member_skips_destination() {
    let data = extracted(&pathway_doc(destination(), vec![component(A)]));
    assert!(data.find_member(A).is_some());
    assert!(data.find_member(DESTINATION).is_none());
}

#[test]
fn test_progression_model_uri() {
    let document = doc(vec![json!({
        "@id": PATHWAY,
        "@type": "ceterms:Pathway",
        "asn:hasProgressionModel": "https://example.org/resources/ce-model"
    })]);
    assert_eq!(
        progression_model_uri(&document).as_deref(),
        Some("https://example.org/resources/ce-model")
    );
    assert_eq!(progression_model_uri(&pathway_doc(destination(), vec![])), None);
}
