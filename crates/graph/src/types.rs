use crate::merge::MergePolicy;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where a node or edge got its current content from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Written from a row's own fields (first pass)
    Row,
    /// Written from a nested children descriptor (second pass)
    Descriptor,
    /// Only referenced as an edge endpoint, no record has described it yet
    Reference,
}

/// Descriptive attributes of an entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAttrs {
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub short_name: String,
    pub level: String,
}

impl EntityAttrs {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Company or person in the ownership structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    #[serde(flatten)]
    pub attrs: EntityAttrs,
    pub origin: Origin,
}

impl Entity {
    /// Endpoint placeholder with no attributes
    #[must_use]
    pub fn reference(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attrs: EntityAttrs::default(),
            origin: Origin::Reference,
        }
    }

    #[must_use]
    pub fn is_named(&self) -> bool {
        !self.attrs.name.is_empty()
    }

    /// Name for display, falling back to the id for unnamed endpoints
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.is_named() {
            &self.attrs.name
        } else {
            &self.id
        }
    }
}

/// Stake attributes carried by an ownership edge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipAttrs {
    pub amount: String,
    pub percent: String,
    pub sh_type: String,
}

/// Directed "parent owns a stake in child" relationship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    #[serde(flatten)]
    pub attrs: OwnershipAttrs,
    pub origin: Origin,
}

/// Directed ownership graph keyed by resolved entity id.
///
/// At most one edge is stored per ordered `(parent, child)` pair and every
/// edge endpoint is present as a node.
#[derive(Debug, Clone, Default)]
pub struct OwnershipGraph {
    pub(crate) graph: DiGraph<Entity, Ownership>,
    index: HashMap<String, NodeIndex>,
}

impl OwnershipGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn find_node(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    #[must_use]
    pub fn get_node(&self, idx: NodeIndex) -> Option<&Entity> {
        self.graph.node_weight(idx)
    }

    #[must_use]
    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.find_node(id).and_then(|idx| self.get_node(idx))
    }

    #[must_use]
    pub fn contains_entity(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn ownership(&self, parent: &str, child: &str) -> Option<&Ownership> {
        let from = self.find_node(parent)?;
        let to = self.find_node(child)?;
        let edge = self.graph.find_edge(from, to)?;
        self.graph.edge_weight(edge)
    }

    #[must_use]
    pub fn contains_ownership(&self, parent: &str, child: &str) -> bool {
        self.ownership(parent, child).is_some()
    }

    /// Insert the entity or merge `attrs` into the existing node under `policy`
    pub fn upsert_entity(
        &mut self,
        id: &str,
        attrs: EntityAttrs,
        policy: MergePolicy,
    ) -> NodeIndex {
        let idx = self.ensure_node(id);
        policy.apply(&mut self.graph[idx], attrs);
        idx
    }

    /// Record `parent -> child` unless that ordered pair already has an edge.
    ///
    /// Missing endpoints are added as [`Origin::Reference`] nodes. Returns
    /// `false` when an earlier write already owns the pair.
    pub fn insert_ownership_if_absent(
        &mut self,
        parent: &str,
        child: &str,
        attrs: OwnershipAttrs,
        origin: Origin,
    ) -> bool {
        let from = self.ensure_node(parent);
        let to = self.ensure_node(child);
        if self.graph.find_edge(from, to).is_some() {
            return false;
        }
        self.graph.add_edge(from, to, Ownership { attrs, origin });
        true
    }

    fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(Entity::reference(id));
        self.index.insert(id.to_string(), idx);
        idx
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All entities in insertion order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// All edges as `(parent, child, ownership)` in insertion order
    pub fn ownerships(&self) -> impl Iterator<Item = (&Entity, &Entity, &Ownership)> + '_ {
        self.graph.edge_indices().filter_map(move |edge| {
            let (from, to) = self.graph.edge_endpoints(edge)?;
            Some((&self.graph[from], &self.graph[to], &self.graph[edge]))
        })
    }
}
