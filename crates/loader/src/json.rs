use crate::config::LoaderConfig;
use crate::decode::read_decoded;
use crate::error::Result;
use equity_graph::OwnershipRecord;
use std::path::Path;

/// Load a JSON array of records. `children` may be text or an already
/// decoded list.
pub fn load_json(path: &Path, config: &LoaderConfig) -> Result<Vec<OwnershipRecord>> {
    config.validate()?;
    let text = read_decoded(path, &config.encodings)?;
    let records: Vec<OwnershipRecord> = serde_json::from_str(&text)?;
    log::info!("Loaded {} records from '{}'", records.len(), path.display());
    Ok(records)
}
