use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dateguess_engine::{Accuracy, GuesserConfig};
use guess_logging::guess_info;
use serde::{Deserialize, Serialize};

/// Contents of the optional RON config file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub guesser: GuesserConfig,
    pub min_accuracy: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn min_accuracy(&self) -> Result<Option<Accuracy>> {
        self.min_accuracy
            .as_deref()
            .map(|name| name.parse::<Accuracy>())
            .transpose()
            .context("invalid min_accuracy in config")
    }
}

pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    guess_info!("loaded config from {:?}", path);
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<AppConfig> {
    Ok(ron::from_str(content)?)
}
