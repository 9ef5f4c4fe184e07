use crate::error::{GraphError, Result};
use crate::types::{Entity, Origin, Ownership, OwnershipAttrs, OwnershipGraph};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

/// One row of a degree ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeEntry {
    pub id: String,
    pub name: String,
    pub degree: usize,
}

/// Serializable view of a finished graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes: Vec<Entity>,
    pub edges: Vec<OwnershipEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipEdge {
    pub parent: String,
    pub child: String,
    #[serde(flatten)]
    pub attrs: OwnershipAttrs,
    pub origin: Origin,
}

impl OwnershipGraph {
    fn require_node(&self, id: &str) -> Result<NodeIndex> {
        self.find_node(id)
            .ok_or_else(|| GraphError::EntityNotFound(id.to_string()))
    }

    /// Entities holding a stake in `id` (incoming edges)
    pub fn shareholders_of(&self, id: &str) -> Result<Vec<(&Entity, &Ownership)>> {
        let node = self.require_node(id)?;
        Ok(self
            .graph
            .edges_directed(node, Direction::Incoming)
            .map(|e| (&self.graph[e.source()], e.weight()))
            .collect())
    }

    /// Entities `id` holds a stake in (outgoing edges)
    pub fn holdings_of(&self, id: &str) -> Result<Vec<(&Entity, &Ownership)>> {
        let node = self.require_node(id)?;
        Ok(self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .map(|e| (&self.graph[e.target()], e.weight()))
            .collect())
    }

    #[must_use]
    pub fn in_degree(&self, id: &str) -> usize {
        self.degree(id, Direction::Incoming)
    }

    #[must_use]
    pub fn out_degree(&self, id: &str) -> usize {
        self.degree(id, Direction::Outgoing)
    }

    fn degree(&self, id: &str, direction: Direction) -> usize {
        self.find_node(id)
            .map_or(0, |node| self.graph.edges_directed(node, direction).count())
    }

    /// Most-owned entities: highest number of shareholders first
    #[must_use]
    pub fn in_degree_ranking(&self, limit: usize) -> Vec<DegreeEntry> {
        self.ranking(Direction::Incoming, limit)
    }

    /// Largest shareholders: highest number of holdings first
    #[must_use]
    pub fn out_degree_ranking(&self, limit: usize) -> Vec<DegreeEntry> {
        self.ranking(Direction::Outgoing, limit)
    }

    /// Ties keep node insertion order (stable sort)
    fn ranking(&self, direction: Direction, limit: usize) -> Vec<DegreeEntry> {
        let mut scores: Vec<(NodeIndex, usize)> = self
            .graph
            .node_indices()
            .map(|n| (n, self.graph.edges_directed(n, direction).count()))
            .collect();

        scores.sort_by(|a, b| b.1.cmp(&a.1));
        scores.truncate(limit);
        scores
            .into_iter()
            .map(|(n, degree)| {
                let entity = &self.graph[n];
                DegreeEntry {
                    id: entity.id.clone(),
                    name: entity.display_name().to_string(),
                    degree,
                }
            })
            .collect()
    }

    /// Edge endpoints that no record has named
    #[must_use]
    pub fn unnamed_entities(&self) -> Vec<&Entity> {
        self.entities().filter(|e| !e.is_named()).collect()
    }

    /// Get statistics about the graph as `(nodes, edges)`
    #[must_use]
    pub fn stats(&self) -> (usize, usize) {
        (self.node_count(), self.edge_count())
    }

    #[must_use]
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            nodes: self.entities().cloned().collect(),
            edges: self
                .ownerships()
                .map(|(parent, child, ownership)| OwnershipEdge {
                    parent: parent.id.clone(),
                    child: child.id.clone(),
                    attrs: ownership.attrs.clone(),
                    origin: ownership.origin,
                })
                .collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}
