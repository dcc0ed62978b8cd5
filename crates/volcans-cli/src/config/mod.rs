//! Configuration loading for VOLCANS.
//! Reads volcans.toml from the current directory or path in VOLCANS_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use volcans_data::VolcansData;

pub const CONFIG_ENV: &str = "VOLCANS_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "volcans.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { dir: default_data_dir() }
    }
}

fn default_data_dir() -> PathBuf { VolcansData::default_data_dir() }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

fn default_count()            -> usize { volcans_ranker::scorer::DEFAULT_ANALOGUE_COUNT }
fn default_suggestion_limit() -> usize { volcans_ranker::catalogue::DEFAULT_SUGGESTION_LIMIT }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub write_csv: bool,
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default)]
    pub open_browser: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            write_csv: false,
            dir: default_output_dir(),
            open_browser: false,
        }
    }
}

fn default_output_dir() -> PathBuf { PathBuf::from(".") }

mod tests;

impl Config {
    /// Load configuration from volcans.toml.
    /// Checks `explicit`, then the VOLCANS_CONFIG env var, then the current directory.
    /// A missing file gives the defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => std::env::var(CONFIG_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE)),
        };

        if !path.exists() {
            tracing::warn!("Config file not found: {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content)
            .map_err(|e| volcans_common::VolcansError::Config(e.to_string()).into())
    }
}
