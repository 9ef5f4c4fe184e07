//! # Equity Loader
//!
//! Reads ownership records from CSV or JSON sources.
//!
//! Source bytes are decoded with the first encoding of
//! [`LoaderConfig::encodings`] that accepts them; when none does, loading
//! fails with [`LoadError::Undecodable`] and no records are returned.
//!
//! ## Example
//!
//! ```no_run
//! use equity_graph::GraphBuilder;
//! use equity_loader::{load_records, LoaderConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let records = load_records("holdings.csv".as_ref(), &LoaderConfig::default())?;
//!     let report = GraphBuilder::default().build(&records);
//!
//!     println!("{} nodes, {} edges", report.graph.node_count(), report.graph.edge_count());
//!     Ok(())
//! }
//! ```

mod config;
mod decode;
mod error;
mod json;
mod tabular;

pub use config::{LoaderConfig, DEFAULT_ENCODINGS, DEFAULT_NULL_MARKERS};
pub use decode::{decode_with_fallback, DecodedText};
pub use error::{LoadError, Result};
pub use json::load_json;
pub use tabular::{load_csv, parse_csv};

use equity_graph::OwnershipRecord;
use std::path::Path;

/// Load records, choosing the format from the file extension (`.json` or CSV)
pub fn load_records(path: &Path, config: &LoaderConfig) -> Result<Vec<OwnershipRecord>> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        load_json(path, config)
    } else {
        load_csv(path, config)
    }
}
