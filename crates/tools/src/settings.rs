//! `delve.toml` settings. Every field is optional; command-line flags override them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use delve_core::FloorConfig;
use serde::Deserialize;

/// Environment variable read for the generator api key when none is configured.
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";

#[derive(Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolSettings {
    pub theme: Option<String>,
    pub difficulty: Option<String>,
    pub level: Option<u32>,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
    pub generator: Option<GeneratorSettings>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GeneratorSettings {
    pub program: String,
    /// Arguments placed before the generator flags, such as the script path.
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

impl ToolSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Floor defaults with the file's values layered on top.
    pub fn floor_config(&self) -> FloorConfig {
        let mut config = FloorConfig::default();
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if let Some(difficulty) = &self.difficulty {
            config.difficulty = difficulty.clone();
        }
        if let Some(level) = self.level {
            config.level = level;
        }
        config
    }
}
