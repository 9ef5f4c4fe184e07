use crate::config::BuildConfig;
use crate::error::Result;
use crate::expander::{ChildrenExpander, ExpansionStats};
use crate::merge::MergePolicy;
use crate::records::OwnershipRecord;
use crate::types::{EntityAttrs, Origin, OwnershipGraph};
use serde::Serialize;

/// Counters for one assembly run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub rows: usize,
    /// Rows without a usable name, ignored by both passes
    pub rows_skipped: usize,
    pub row_edges_inserted: usize,
    /// Row edges whose pair was already taken by an earlier row
    pub row_edges_ignored: usize,
    pub rows_with_children: usize,
    pub expansion: ExpansionStats,
    /// Nodes still without a name once both passes are done
    pub unnamed_entities: usize,
}

/// Assembled graph with the counters of the run that built it
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub graph: OwnershipGraph,
    pub stats: BuildStats,
}

/// Build an ownership graph from records in two passes.
///
/// Pass 1 applies each row's own fields, Pass 2 expands each row's nested
/// children. Pass 1 always completes first so that row-level attributes and
/// edges take precedence over anything described inside `children`.
pub struct GraphBuilder {
    config: BuildConfig,
}

impl GraphBuilder {
    pub fn new(config: BuildConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build graph from records, in source order
    #[must_use]
    pub fn build(&self, records: &[OwnershipRecord]) -> BuildReport {
        let mut graph = OwnershipGraph::new();
        let mut stats = BuildStats {
            rows: records.len(),
            ..BuildStats::default()
        };

        // Pass 1: row fields, overwrite node attributes, first edge per pair wins
        for record in records {
            let Some(node_id) = record.entity_id() else {
                stats.rows_skipped += 1;
                continue;
            };

            graph.upsert_entity(node_id, record.entity_attrs(), MergePolicy::OverwriteAlways);

            if let Some(parent_id) = record.parent_id() {
                if graph.insert_ownership_if_absent(
                    parent_id,
                    node_id,
                    record.ownership_attrs(),
                    Origin::Row,
                ) {
                    stats.row_edges_inserted += 1;
                } else {
                    log::debug!("Ignoring repeated row edge {parent_id} -> {node_id}");
                    stats.row_edges_ignored += 1;
                }
            }
        }

        // Pass 2: nested children supplement what the rows established
        let mut expander = ChildrenExpander::new(&mut graph, self.config.max_depth);
        for record in records {
            let (Some(node_id), Some(name)) = (record.entity_id(), record.usable_name()) else {
                continue;
            };
            let Some(payload) = record.children_payload() else {
                continue;
            };
            stats.rows_with_children += 1;
            expander.ensure_entity(node_id, EntityAttrs::named(name));
            expander.expand(node_id, payload);
        }
        stats.expansion = expander.stats();

        stats.unnamed_entities = graph.unnamed_entities().len();
        if stats.unnamed_entities > 0 {
            log::warn!(
                "{} referenced entities were never named by a row or a children entry",
                stats.unnamed_entities
            );
        }

        log::info!(
            "Built ownership graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        BuildReport { graph, stats }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self {
            config: BuildConfig::default(),
        }
    }
}

/// Build with the default configuration
#[must_use]
pub fn build_graph(records: &[OwnershipRecord]) -> OwnershipGraph {
    GraphBuilder::default().build(records).graph
}
