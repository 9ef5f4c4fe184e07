//! Precedence and consistency properties of the two-pass assembly

use equity_graph::{build_graph, BuildConfig, GraphBuilder, Origin, OwnershipRecord};
use pretty_assertions::assert_eq;
use serde_json::json;

fn records(values: serde_json::Value) -> Vec<OwnershipRecord> {
    serde_json::from_value(values).expect("valid records")
}

fn holding_structure() -> Vec<OwnershipRecord> {
    records(json!([
        { "name": "Alpha Group", "eid": "E1", "type": "company", "level": "0" },
        {
            "name": "Beta Ltd", "eid": "E2", "type": "company", "short_name": "",
            "parent_id": "E1", "amount": "100", "percent": "60%", "sh_type": "corporate",
            "children": "[{'name':'Gamma Co','eid':'E3','amount':'50','children':[{'name':'Delta','percent':'5%'}]}]"
        },
        {
            "name": "Gamma Co", "eid": "E3", "type": "", "parent_id": "E2", "amount": "75",
            "children": "[{'name':'Beta Ltd','eid':'E2','type':'person','short_name':'Beta'}]"
        },
        {
            "name": "Alpha Group", "eid": "E1",
            "children": "[{'name':'Beta Ltd','eid':'E2','amount':'1','percent':'1%'}, {'name':'Zeta','type':'fund'}]"
        }
    ]))
}

#[test]
fn node_ids_follow_eid_then_name() {
    let graph = build_graph(&holding_structure());

    assert!(graph.contains_entity("E1"));
    assert!(graph.contains_entity("E3"));
    assert!(graph.contains_entity("Delta"));
    assert!(graph.contains_entity("Zeta"));
    assert!(!graph.contains_entity("Gamma Co"));
}

#[test]
fn row_attributes_survive_children_descriptions() {
    let graph = build_graph(&holding_structure());

    let beta = graph.entity("E2").unwrap();
    assert_eq!(beta.attrs.entity_type, "company");
    assert_eq!(beta.origin, Origin::Row);
    // the row left short_name empty, so the descriptor may fill it
    assert_eq!(beta.attrs.short_name, "Beta");

    // the last Alpha row has no type and overwrites the first one
    assert_eq!(graph.entity("E1").unwrap().attrs.entity_type, "");
}

#[test]
fn row_edges_are_not_touched_by_children() {
    let graph = build_graph(&holding_structure());

    let edge = graph.ownership("E1", "E2").unwrap();
    assert_eq!(edge.attrs.amount, "100");
    assert_eq!(edge.attrs.percent, "60%");
    assert_eq!(edge.attrs.sh_type, "corporate");
    assert_eq!(edge.origin, Origin::Row);

    // Gamma's row edge was recorded in pass 1, before Beta's children said 50
    assert_eq!(graph.ownership("E2", "E3").unwrap().attrs.amount, "75");
}

#[test]
fn children_only_relationships_are_added() {
    let graph = build_graph(&holding_structure());

    let delta = graph.ownership("E3", "Delta").unwrap();
    assert_eq!(delta.attrs.percent, "5%");
    assert_eq!(delta.origin, Origin::Descriptor);
    assert!(graph.contains_ownership("E3", "E2"));
    assert_eq!(graph.entity("Zeta").unwrap().attrs.entity_type, "fund");
}

#[test]
fn every_edge_has_both_endpoints() {
    let mut input = holding_structure();
    input.extend(records(json!([{ "name": "Orphan", "parent_id": "Nobody" }])));

    let graph = build_graph(&input);

    for (parent, child, _) in graph.ownerships() {
        assert!(graph.contains_entity(&parent.id));
        assert!(graph.contains_entity(&child.id));
    }
    assert_eq!(graph.unnamed_entities().len(), 1);
}

#[test]
fn escaped_quotes_reach_the_graph_intact() {
    let input = records(json!([{
        "name": "Holding",
        "children": r"[{'name':'O\'Neil Partners','sh_type':'LP'}]"
    }]));

    let graph = build_graph(&input);

    assert!(graph.contains_ownership("Holding", "O'Neil Partners"));
    assert_eq!(graph.entity("O'Neil Partners").unwrap().attrs.name, "O'Neil Partners");
}

#[test]
fn broken_children_text_drops_only_that_row_subtree() {
    let input = records(json!([
        { "name": "Broken", "children": "[{'name': 'Lost'" },
        { "name": "Healthy", "children": "[{'name':'Kept'}]" }
    ]));

    let report = GraphBuilder::default().build(&input);

    assert_eq!(report.stats.expansion.dropped_payloads, 1);
    assert!(report.graph.contains_entity("Broken"));
    assert!(!report.graph.contains_entity("Lost"));
    assert!(report.graph.contains_ownership("Healthy", "Kept"));
}

#[test]
fn double_quoted_children_with_apostrophe_are_dropped() {
    let input = records(json!([{
        "name": "Holding",
        "children": r#"[{"name":"Smith's Trading"}]"#
    }]));

    let report = GraphBuilder::default().build(&input);

    assert_eq!(report.stats.expansion.dropped_payloads, 1);
    assert!(!report.graph.contains_entity("Smith's Trading"));
    assert!(!report.graph.contains_ownership("Holding", "Smith's Trading"));
}

#[test]
fn pre_decoded_children_lists_are_accepted() {
    let input = records(json!([{
        "name": "Holding",
        "eid": "H",
        "children": [{ "name": "Sub", "eid": "S", "percent": 100 }]
    }]));

    let graph = build_graph(&input);

    assert_eq!(graph.ownership("H", "S").unwrap().attrs.percent, "100");
}

#[test]
fn rebuilding_gives_identical_attributes() {
    let input = holding_structure();
    let builder = GraphBuilder::new(BuildConfig::default()).unwrap();

    let first = builder.build(&input).graph.snapshot();
    let second = builder.build(&input).graph.snapshot();

    assert_eq!(first, second);
}
