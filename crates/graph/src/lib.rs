//! # Equity Graph
//!
//! Ownership graph assembly from tabular equity records.
//!
//! ## Features
//!
//! - **Identifier resolution** - `eid` when present, otherwise `name`, at every level
//! - **Children repair** - single-quoted `children` text decoded through a fallback ladder
//! - **Unbounded nesting** - subsidiaries expanded to any depth with an explicit worklist
//! - **Precedence** - row fields win over nested descriptions, first edge per pair wins
//!
//! ## Architecture
//!
//! ```text
//! OwnershipRecord[]
//!     │
//!     ├──> Pass 1: row fields
//!     │      ├─ Resolve id (eid | name)
//!     │      ├─ Upsert node (OverwriteAlways)
//!     │      └─ parent_id -> id edge (InsertIfAbsent)
//!     │
//!     ├──> Pass 2: children field
//!     │      ├─ Sanitize (escaped quotes → blind quotes)
//!     │      ├─ Parse descriptors
//!     │      └─ Expand depth-first (FillIfEmpty nodes, InsertIfAbsent edges)
//!     │
//!     └──> Ownership Graph (petgraph)
//!            ├─ Nodes: entities {name, type, short_name, level}
//!            └─ Edges: stakes {amount, percent, sh_type}
//! ```

mod builder;
mod config;
mod error;
mod expander;
mod graph;
mod merge;
mod parser;
mod records;
mod sanitize;
mod types;

pub use builder::{build_graph, BuildReport, BuildStats, GraphBuilder};
pub use config::{BuildConfig, DEFAULT_MAX_DEPTH};
pub use error::{DecodeError, GraphError, Result, StrategyError};
pub use expander::{ChildrenExpander, ExpansionStats};
pub use graph::{DegreeEntry, GraphSnapshot, OwnershipEdge};
pub use merge::{fill_if_empty, MergePolicy};
pub use parser::{decode_payload, parse_children, ParsedChildren};
pub use records::{resolve_id, ChildDescriptor, ChildrenPayload, OwnershipRecord};
pub use sanitize::{decode_quasi_json, SanitizeStrategy};
pub use types::{Entity, EntityAttrs, Origin, Ownership, OwnershipAttrs, OwnershipGraph};
