//! Tests for OwnershipGraph operations

use equity_graph::{EntityAttrs, GraphError, MergePolicy, Origin, OwnershipAttrs, OwnershipGraph};
use pretty_assertions::assert_eq;

fn stake(amount: &str) -> OwnershipAttrs {
    OwnershipAttrs {
        amount: amount.to_string(),
        ..OwnershipAttrs::default()
    }
}

fn named(graph: &mut OwnershipGraph, id: &str, name: &str) {
    graph.upsert_entity(id, EntityAttrs::named(name), MergePolicy::OverwriteAlways);
}

#[test]
fn test_upsert_and_find() {
    let mut graph = OwnershipGraph::new();

    let idx = graph.upsert_entity(
        "E1",
        EntityAttrs::named("Alpha"),
        MergePolicy::OverwriteAlways,
    );

    assert_eq!(graph.find_node("E1"), Some(idx));
    assert!(graph.contains_entity("E1"));
    assert!(!graph.contains_entity("Alpha"));
    assert_eq!(graph.node_count(), 1);
}

#[test]
fn test_reinsert_updates_in_place() {
    let mut graph = OwnershipGraph::new();

    let first = graph.upsert_entity(
        "E1",
        EntityAttrs::named("Alpha"),
        MergePolicy::OverwriteAlways,
    );
    let second = graph.upsert_entity(
        "E1",
        EntityAttrs::named("Alpha Ltd"),
        MergePolicy::OverwriteAlways,
    );

    assert_eq!(first, second);
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.entity("E1").unwrap().attrs.name, "Alpha Ltd");
}

#[test]
fn test_first_edge_write_wins() {
    let mut graph = OwnershipGraph::new();
    named(&mut graph, "E1", "Alpha");
    named(&mut graph, "E2", "Beta");

    assert!(graph.insert_ownership_if_absent("E1", "E2", stake("100"), Origin::Row));
    assert!(!graph.insert_ownership_if_absent("E1", "E2", stake("999"), Origin::Descriptor));

    assert_eq!(graph.edge_count(), 1);
    let edge = graph.ownership("E1", "E2").unwrap();
    assert_eq!(edge.attrs.amount, "100");
    assert_eq!(edge.origin, Origin::Row);
}

#[test]
fn test_edge_identity_is_ordered() {
    let mut graph = OwnershipGraph::new();
    named(&mut graph, "E1", "Alpha");
    named(&mut graph, "E2", "Beta");

    assert!(graph.insert_ownership_if_absent("E1", "E2", stake("1"), Origin::Row));
    assert!(graph.insert_ownership_if_absent("E2", "E1", stake("2"), Origin::Row));

    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.ownership("E2", "E1").unwrap().attrs.amount, "2");
}

#[test]
fn test_missing_endpoint_becomes_reference() {
    let mut graph = OwnershipGraph::new();
    named(&mut graph, "E2", "Beta");

    graph.insert_ownership_if_absent("E1", "E2", stake("100"), Origin::Row);

    let parent = graph.entity("E1").unwrap();
    assert_eq!(parent.origin, Origin::Reference);
    assert!(!parent.is_named());
    assert_eq!(parent.display_name(), "E1");
    assert_eq!(graph.unnamed_entities().len(), 1);
}

#[test]
fn test_shareholders_and_holdings() {
    let mut graph = OwnershipGraph::new();
    named(&mut graph, "H", "Holding");
    named(&mut graph, "S1", "Sub One");
    named(&mut graph, "S2", "Sub Two");
    graph.insert_ownership_if_absent("H", "S1", stake("10"), Origin::Row);
    graph.insert_ownership_if_absent("H", "S2", stake("20"), Origin::Row);

    let holdings: Vec<_> = graph
        .holdings_of("H")
        .unwrap()
        .into_iter()
        .map(|(entity, _)| entity.id.clone())
        .collect();
    assert_eq!(holdings.len(), 2);
    assert!(holdings.contains(&"S1".to_string()));
    assert!(holdings.contains(&"S2".to_string()));

    let owners = graph.shareholders_of("S2").unwrap();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].0.id, "H");
    assert_eq!(owners[0].1.attrs.amount, "20");

    assert!(matches!(
        graph.holdings_of("missing"),
        Err(GraphError::EntityNotFound(_))
    ));
}

#[test]
fn test_degree_rankings() {
    let mut graph = OwnershipGraph::new();
    for (id, name) in [("A", "Alpha"), ("B", "Beta"), ("C", "Gamma"), ("D", "Delta")] {
        named(&mut graph, id, name);
    }
    graph.insert_ownership_if_absent("A", "C", stake(""), Origin::Row);
    graph.insert_ownership_if_absent("B", "C", stake(""), Origin::Row);
    graph.insert_ownership_if_absent("A", "D", stake(""), Origin::Row);
    graph.insert_ownership_if_absent("A", "B", stake(""), Origin::Row);

    let most_owned = graph.in_degree_ranking(2);
    assert_eq!(most_owned[0].id, "C");
    assert_eq!(most_owned[0].degree, 2);
    // B and D tie on one shareholder each, insertion order decides
    assert_eq!(most_owned[1].id, "B");

    let largest = graph.out_degree_ranking(1);
    assert_eq!(largest[0].name, "Alpha");
    assert_eq!(largest[0].degree, 3);

    assert_eq!(graph.in_degree("C"), 2);
    assert_eq!(graph.out_degree("missing"), 0);
}

#[test]
fn test_snapshot_lists_everything() {
    let mut graph = OwnershipGraph::new();
    named(&mut graph, "E1", "Alpha");
    named(&mut graph, "E2", "Beta");
    graph.insert_ownership_if_absent("E1", "E2", stake("100"), Origin::Row);

    let snapshot = graph.snapshot();
    assert_eq!(snapshot.node_count, 2);
    assert_eq!(snapshot.edge_count, 1);
    assert_eq!(snapshot.edges[0].parent, "E1");
    assert_eq!(snapshot.edges[0].child, "E2");

    let json: serde_json::Value = serde_json::from_str(&graph.to_json_pretty().unwrap()).unwrap();
    assert_eq!(json["nodes"][0]["name"], "Alpha");
    assert_eq!(json["nodes"][0]["origin"], "row");
    assert_eq!(json["edges"][0]["amount"], "100");
}
