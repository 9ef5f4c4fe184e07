use crate::merge::MergePolicy;
use crate::parser::parse_children;
use crate::records::{ChildDescriptor, ChildrenPayload};
use crate::types::{EntityAttrs, Origin, OwnershipGraph};
use serde::Serialize;

/// Counters collected while expanding nested children
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExpansionStats {
    /// Descriptors taken from decoded lists
    pub descriptors: usize,
    /// Descriptors skipped for lack of a usable name
    pub skipped_unnamed: usize,
    pub edges_inserted: usize,
    /// Descriptors whose edge pair was already present
    pub edges_ignored: usize,
    /// Payloads dropped as undecodable or of an unsupported type
    pub dropped_payloads: usize,
    pub malformed_items: usize,
    /// Nested payloads not expanded because of the depth limit
    pub truncated: usize,
    /// Nested payloads not expanded because the entity is its own ancestor
    pub cycles: usize,
}

/// Pending descriptors of one parent
struct Frame {
    parent_id: String,
    depth: usize,
    pending: std::vec::IntoIter<ChildDescriptor>,
}

/// Walks nested children to any depth with an explicit stack.
///
/// Visiting order is depth-first pre-order, the same order a recursive walk
/// would take: each descriptor is merged before its own children, and all of
/// them before its next sibling.
pub struct ChildrenExpander<'g> {
    graph: &'g mut OwnershipGraph,
    max_depth: usize,
    stats: ExpansionStats,
}

impl<'g> ChildrenExpander<'g> {
    pub fn new(graph: &'g mut OwnershipGraph, max_depth: usize) -> Self {
        Self {
            graph,
            max_depth,
            stats: ExpansionStats::default(),
        }
    }

    /// Make sure an expansion root exists before its children are attached
    pub fn ensure_entity(&mut self, id: &str, attrs: EntityAttrs) {
        self.graph.upsert_entity(id, attrs, MergePolicy::FillIfEmpty);
    }

    /// Merge every descriptor reachable from `payload` under `root_id`
    pub fn expand(&mut self, root_id: &str, payload: ChildrenPayload) {
        let mut stack = Vec::new();
        if let Some(frame) = self.open_frame(root_id, 1, payload) {
            stack.push(frame);
        }

        loop {
            let Some(frame) = stack.last_mut() else {
                break;
            };
            let Some(mut descriptor) = frame.pending.next() else {
                stack.pop();
                continue;
            };
            let parent_id = frame.parent_id.clone();
            let depth = frame.depth;
            self.stats.descriptors += 1;

            let Some(child_id) = descriptor.entity_id().map(str::to_owned) else {
                log::debug!("Skipping unnamed child of parent '{parent_id}'");
                self.stats.skipped_unnamed += 1;
                continue;
            };

            self.graph.upsert_entity(
                &child_id,
                descriptor.entity_attrs(),
                MergePolicy::FillIfEmpty,
            );
            if self.graph.insert_ownership_if_absent(
                &parent_id,
                &child_id,
                descriptor.ownership_attrs(),
                Origin::Descriptor,
            ) {
                self.stats.edges_inserted += 1;
            } else {
                self.stats.edges_ignored += 1;
            }

            let Some(nested) = descriptor.take_children() else {
                continue;
            };
            if depth >= self.max_depth {
                log::warn!(
                    "Children of '{child_id}' exceed the maximum nesting depth {}, not expanded",
                    self.max_depth
                );
                self.stats.truncated += 1;
                continue;
            }
            if stack.iter().any(|frame| frame.parent_id == child_id) {
                log::warn!(
                    "Children of '{child_id}' nest under '{child_id}' itself, not expanded"
                );
                self.stats.cycles += 1;
                continue;
            }
            if let Some(frame) = self.open_frame(&child_id, depth + 1, nested) {
                stack.push(frame);
            }
        }
    }

    fn open_frame(
        &mut self,
        parent_id: &str,
        depth: usize,
        payload: ChildrenPayload,
    ) -> Option<Frame> {
        let parsed = parse_children(parent_id, payload);
        if parsed.dropped {
            self.stats.dropped_payloads += 1;
        }
        self.stats.malformed_items += parsed.malformed_items;
        if parsed.descriptors.is_empty() {
            return None;
        }
        Some(Frame {
            parent_id: parent_id.to_string(),
            depth,
            pending: parsed.descriptors.into_iter(),
        })
    }

    #[must_use]
    pub const fn stats(&self) -> ExpansionStats {
        self.stats
    }
}
