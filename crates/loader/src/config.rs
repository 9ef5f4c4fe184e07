use crate::error::{LoadError, Result};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

/// Encodings tried in order until one decodes the whole source
pub const DEFAULT_ENCODINGS: &[&str] = &["utf-8", "gbk", "gb18030", "gb2312", "big5"];

/// Cell values read as missing, matching common spreadsheet exports
pub const DEFAULT_NULL_MARKERS: &[&str] = &[
    "#N/A", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    #[serde(default = "default_encodings")]
    pub encodings: Vec<String>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_null_markers")]
    pub null_markers: Vec<String>,
}

fn default_encodings() -> Vec<String> {
    DEFAULT_ENCODINGS.iter().map(ToString::to_string).collect()
}

fn default_delimiter() -> char {
    ','
}

fn default_null_markers() -> Vec<String> {
    DEFAULT_NULL_MARKERS.iter().map(ToString::to_string).collect()
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            encodings: default_encodings(),
            delimiter: default_delimiter(),
            null_markers: default_null_markers(),
        }
    }
}

impl LoaderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.encodings.is_empty() {
            return Err(LoadError::InvalidConfig(
                "load.encodings must name at least one encoding".to_string(),
            ));
        }
        for label in &self.encodings {
            if Encoding::for_label(label.as_bytes()).is_none() {
                return Err(LoadError::InvalidConfig(format!(
                    "load.encodings contains unknown encoding {label:?}"
                )));
            }
        }
        if !self.delimiter.is_ascii() {
            return Err(LoadError::InvalidConfig(format!(
                "load.delimiter must be an ASCII character (got {:?})",
                self.delimiter
            )));
        }
        Ok(())
    }

    pub(crate) fn is_null(&self, value: &str) -> bool {
        self.null_markers.iter().any(|marker| marker == value)
    }
}
