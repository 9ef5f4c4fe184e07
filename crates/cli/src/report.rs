use equity_graph::{BuildStats, DegreeEntry, OwnershipGraph};

pub fn render_summary(graph: &OwnershipGraph, stats: &BuildStats) -> String {
    let (nodes, edges) = graph.stats();
    let expansion = &stats.expansion;
    let mut out = String::new();

    out.push_str(&format!("Nodes: {nodes}\n"));
    out.push_str(&format!("Edges: {edges}\n"));
    out.push_str(&format!(
        "Rows: {} ({} skipped without name, {} with children)\n",
        stats.rows, stats.rows_skipped, stats.rows_with_children
    ));
    out.push_str(&format!(
        "Row edges: {} inserted, {} repeated\n",
        stats.row_edges_inserted, stats.row_edges_ignored
    ));
    out.push_str(&format!(
        "Children: {} descriptors, {} edges inserted, {} already present, {} unnamed\n",
        expansion.descriptors,
        expansion.edges_inserted,
        expansion.edges_ignored,
        expansion.skipped_unnamed
    ));
    let dropped = expansion.dropped_payloads
        + expansion.malformed_items
        + expansion.truncated
        + expansion.cycles;
    if dropped > 0 {
        out.push_str(&format!(
            "Dropped: {} payloads, {} malformed entries, {} too deep, {} cyclic\n",
            expansion.dropped_payloads,
            expansion.malformed_items,
            expansion.truncated,
            expansion.cycles
        ));
    }
    if stats.unnamed_entities > 0 {
        out.push_str(&format!("Unnamed entities: {}\n", stats.unnamed_entities));
    }
    out
}

pub fn render_ranking(title: &str, unit: &str, entries: &[DegreeEntry]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{title}:\n"));
    if entries.is_empty() {
        out.push_str("  (none)\n");
    }
    for entry in entries {
        out.push_str(&format!("- {}: {} {unit}\n", entry.name, entry.degree));
    }
    out
}
