//! Configuration management for reportrag
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.reportrag/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{RagError, Result};
use crate::rag::reranking::DEFAULT_MAX_FEATURES;
use crate::rag::DEFAULT_TOP_K;

/// Complete configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Knowledge base location and file naming
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    pub path: String,
    pub extension: String,
    pub modality_prefix: String,
}

/// Ranking parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub default_top_k: usize,
    pub max_features: usize,
}

/// Terminal output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub default_verbosity: String,
    pub color_output: bool,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: "knowledge/reports/training".to_string(),
            extension: "txt".to_string(),
            modality_prefix: "irm".to_string(),
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_top_k: DEFAULT_TOP_K,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_verbosity: "normal".to_string(),
            color_output: true,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RagError::ConfigError(format!("Failed to read config: {}", e)))?;

        Self::from_toml(&contents)
    }

    /// Parse and validate TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| RagError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".reportrag").join("config.toml");
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.knowledge.extension.trim_start_matches('.').is_empty() {
            return Err(RagError::ConfigError(
                "knowledge.extension must not be empty".to_string(),
            ));
        }

        if self.knowledge.modality_prefix.is_empty() {
            return Err(RagError::ConfigError(
                "knowledge.modality_prefix must not be empty".to_string(),
            ));
        }

        if self.retrieval.max_features == 0 {
            return Err(RagError::ConfigError(
                "max_features must be greater than 0".to_string(),
            ));
        }

        match self.telemetry.default_verbosity.as_str() {
            "quiet" | "normal" | "verbose" | "very_verbose" => {}
            _ => {
                return Err(RagError::ConfigError(format!(
                    "Invalid verbosity level: {}",
                    self.telemetry.default_verbosity
                )))
            }
        }

        Ok(())
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| RagError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| RagError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RagError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Knowledge base directory
    pub fn knowledge_dir(&self) -> PathBuf {
        Self::expand_path(&self.knowledge.path)
    }
}
