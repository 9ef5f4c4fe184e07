use crate::config::LoaderConfig;
use crate::decode::read_decoded;
use crate::error::Result;
use equity_graph::{ChildDescriptor, OwnershipRecord};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Raw CSV row; every column optional, unknown columns ignored
#[derive(Debug, Default, Deserialize)]
struct CsvRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    eid: Option<String>,
    #[serde(rename = "type", default)]
    entity_type: Option<String>,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    parent_id: Option<String>,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    percent: Option<String>,
    #[serde(default)]
    sh_type: Option<String>,
    #[serde(default)]
    children: Option<String>,
}

impl CsvRow {
    fn into_record(self, config: &LoaderConfig) -> OwnershipRecord {
        let cell = |value: Option<String>| value.filter(|v| !config.is_null(v));
        OwnershipRecord {
            entity: ChildDescriptor {
                name: cell(self.name),
                eid: cell(self.eid),
                entity_type: cell(self.entity_type),
                short_name: cell(self.short_name),
                level: cell(self.level),
                amount: cell(self.amount),
                percent: cell(self.percent),
                sh_type: cell(self.sh_type),
                children: cell(self.children).map(Value::String),
            },
            parent_id: cell(self.parent_id),
        }
    }
}

/// Parse CSV text with a header row into records, in file order
pub fn parse_csv(text: &str, config: &LoaderConfig) -> Result<Vec<OwnershipRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(config.delimiter as u8)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        records.push(row?.into_record(config));
    }
    Ok(records)
}

/// Load a CSV file, trying each configured encoding in turn
pub fn load_csv(path: &Path, config: &LoaderConfig) -> Result<Vec<OwnershipRecord>> {
    config.validate()?;
    let text = read_decoded(path, &config.encodings)?;
    let records = parse_csv(&text, config)?;
    log::info!("Loaded {} rows from '{}'", records.len(), path.display());
    Ok(records)
}
