use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Deepest nesting level of children descriptors that is expanded
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl BuildConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=10_000).contains(&self.max_depth) {
            return Err(GraphError::InvalidConfig(format!(
                "build.max_depth must be in [1, 10000] (got {})",
                self.max_depth
            )));
        }
        Ok(())
    }
}
