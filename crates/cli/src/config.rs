use anyhow::{Context, Result};
use equity_graph::BuildConfig;
use equity_loader::LoaderConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings read from the optional TOML file passed with `--config`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub load: LoaderConfig,
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.build.validate()?;
        config.load.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
