//! Attribute precedence between the two assembly passes.
//!
//! Nodes are merged under a [`MergePolicy`]; edges have a single policy,
//! insert-if-absent, implemented by
//! [`OwnershipGraph::insert_ownership_if_absent`](crate::OwnershipGraph::insert_ownership_if_absent).

use crate::types::{Entity, EntityAttrs, Origin};

/// How incoming node attributes combine with the stored ones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Row-level writes: every attribute is replaced, empty or not
    OverwriteAlways,
    /// Children-level writes: fill empty attributes and take non-empty
    /// values, never blanking a stored value. Values written by a row are
    /// not replaced.
    FillIfEmpty,
}

impl MergePolicy {
    pub fn apply(self, entity: &mut Entity, incoming: EntityAttrs) {
        match self {
            Self::OverwriteAlways => {
                entity.attrs = incoming;
                entity.origin = Origin::Row;
            }
            Self::FillIfEmpty => {
                let protect = entity.origin == Origin::Row;
                let EntityAttrs {
                    name,
                    entity_type,
                    short_name,
                    level,
                } = incoming;
                fill_if_empty(&mut entity.attrs.name, name, protect);
                fill_if_empty(&mut entity.attrs.entity_type, entity_type, protect);
                fill_if_empty(&mut entity.attrs.short_name, short_name, protect);
                fill_if_empty(&mut entity.attrs.level, level, protect);
                if entity.origin == Origin::Reference {
                    entity.origin = Origin::Descriptor;
                }
            }
        }
    }
}

/// Store `incoming` when the slot is empty, or when it is non-empty and the
/// stored value is not protected.
pub fn fill_if_empty(slot: &mut String, incoming: String, protect: bool) {
    if incoming.is_empty() {
        return;
    }
    if slot.is_empty() || !protect {
        *slot = incoming;
    }
}
