use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::audit::AuditTool;
use crate::gate::GateConfig;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "license-gate.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Root of the build output tree (report lands beneath it)
    pub output_root: Option<PathBuf>,

    /// Candidate source directories, one list per build component
    pub source_sets: Option<Vec<Vec<PathBuf>>>,

    /// Glob patterns for directories to leave out of the scan
    pub exclude: Option<Vec<String>>,

    /// Output format (table, json)
    pub format: Option<String>,

    /// External audit tool invocation
    pub tool: Option<AuditTool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_root: Some(PathBuf::from("build")),
            source_sets: None,
            exclude: Some(vec![]),
            format: Some("table".to_string()),
            tool: None,
        }
    }
}

impl Config {
    /// Explicit gate inputs with defaults applied.
    pub fn gate_config(&self) -> GateConfig {
        GateConfig {
            source_sets: self.source_sets.clone().unwrap_or_default(),
            exclude: self.exclude.clone().unwrap_or_default(),
            output_root: self
                .output_root
                .clone()
                .unwrap_or_else(|| PathBuf::from("build")),
        }
    }

    /// The audit tool is mandatory for a check run; everything else has a
    /// usable default.
    pub fn tool(&self) -> Result<&AuditTool> {
        self.tool.as_ref().ok_or_else(|| {
            anyhow::anyhow!(
                "No audit tool configured. Add a [tool] section to {} or run 'license-header-gate init' first.",
                CONFIG_FILE
            )
        })
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(tool) = &self.tool {
            if tool.command.trim().is_empty() {
                anyhow::bail!("tool.command must not be empty");
            }
        }

        for pattern in self.exclude.as_deref().unwrap_or_default() {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid exclude pattern: {}", pattern))?;
        }

        if let Some(format) = self.format.as_deref() {
            if format != "table" && format != "json" {
                anyhow::bail!("Unsupported format '{}' (expected table or json)", format);
            }
        }

        Ok(())
    }
}

/// Load configuration from license-gate.toml in the working directory.
pub fn load_config() -> Result<Config> {
    let path = std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_FILE);
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(config)
}
