use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::Tool;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Program names (or paths) used to launch each external tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub spotdl: String,
    pub yt_dlp: String,
    pub ffmpeg: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            spotdl: Tool::Spotdl.label().to_string(),
            yt_dlp: Tool::YtDlp.label().to_string(),
            ffmpeg: Tool::Ffmpeg.label().to_string(),
        }
    }
}

impl ToolsConfig {
    pub fn program(&self, tool: Tool) -> &str {
        let configured = match tool {
            Tool::Spotdl => &self.spotdl,
            Tool::YtDlp => &self.yt_dlp,
            Tool::Ffmpeg => &self.ffmpeg,
        };
        if configured.trim().is_empty() {
            tool.label()
        } else {
            configured
        }
    }
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("MEDIADL_CONFIG") {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
        .join(".config")
        .join("mediadl")
        .join("config.toml")
}

pub fn load_config() -> Config {
    let path = config_path();
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Config::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(content) => parse_config(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), "ignoring invalid config: {:#}", e);
            Config::default()
        }),
        Err(e) => {
            warn!(path = %path.display(), "cannot read config: {}", e);
            Config::default()
        }
    }
}

fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).context("config is not valid TOML")
}

pub fn save_config(config: &Config) -> Result<PathBuf> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(&path, content).with_context(|| format!("cannot write {}", path.display()))?;
    Ok(path)
}
