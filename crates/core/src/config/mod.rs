//! Configuration module for searcheval
//!
//! This module provides configuration structures and loading mechanisms.
//! Configuration can be loaded from TOML (or YAML) files and/or environment
//! variables.

mod defaults;
mod loading;


use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.searcheval/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".searcheval").join("config.toml"))
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Search service configuration
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Metric cutoffs
    #[serde(default)]
    pub evaluation: EvaluationConfig,

    /// Input and output locations
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Connection and query settings for the Watson Discovery v2 service
///
/// Credentials stay optional here so that offline commands work without
/// them; the live client checks for them when it is created.
#[derive(Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Service instance URL (or use WATSON_DISCOVERY_URL env var)
    #[serde(default)]
    pub service_url: Option<String>,

    /// API key for authentication (or use WATSON_DISCOVERY_APIKEY env var)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Project to query (or use WATSON_DISCOVERY_PROJECT_ID env var)
    #[serde(default)]
    pub project_id: Option<String>,

    /// API version date
    #[serde(default = "default_discovery_version")]
    pub version: String,

    /// Collections to query when no queries file is given
    #[serde(default)]
    pub collection_ids: Vec<String>,

    /// Number of results requested per query
    #[serde(default = "default_result_count")]
    pub result_count: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Query used by the connection check
    #[serde(default)]
    pub test_query: Option<String>,

    /// Passage retrieval settings
    #[serde(default)]
    pub passages: PassagesConfig,
}

impl std::fmt::Debug for DiscoveryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryConfig")
            .field("service_url", &self.service_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***REDACTED***"))
            .field("project_id", &self.project_id)
            .field("version", &self.version)
            .field("collection_ids", &self.collection_ids)
            .field("result_count", &self.result_count)
            .field("timeout_secs", &self.timeout_secs)
            .field("test_query", &self.test_query)
            .field("passages", &self.passages)
            .finish()
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            service_url: None,
            api_key: None,
            project_id: None,
            version: default_discovery_version(),
            collection_ids: Vec::new(),
            result_count: default_result_count(),
            timeout_secs: default_timeout_secs(),
            test_query: None,
            passages: PassagesConfig::default(),
        }
    }
}

/// Passage retrieval settings sent with every query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassagesConfig {
    /// Whether passages are returned
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum passages per document
    #[serde(default = "default_max_per_document")]
    pub max_per_document: usize,

    /// Approximate passage length in characters
    #[serde(default = "default_passage_characters")]
    pub characters: usize,
}

impl Default for PassagesConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            max_per_document: default_max_per_document(),
            characters: default_passage_characters(),
        }
    }
}

/// Metric cutoffs used by the evaluation runners
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Number of top titles checked by the FAQ test
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Cutoffs reported for precision@k and recall@k
    #[serde(default = "default_k_values")]
    pub k_values: Vec<usize>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            k_values: default_k_values(),
        }
    }
}

/// Data file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory searched first for input datasets
    #[serde(default = "default_data_input_dir")]
    pub data_input_dir: String,

    /// Directory for reports; also the fallback location for inputs
    #[serde(default = "default_data_output_dir")]
    pub data_output_dir: String,

    /// Directory holding queries files
    #[serde(default = "default_queries_input_dir")]
    pub queries_input_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_input_dir: default_data_input_dir(),
            data_output_dir: default_data_output_dir(),
            queries_input_dir: default_queries_input_dir(),
        }
    }
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.evaluation.top_k == 0 {
            return Err(Error::config(
                "evaluation.top_k must be greater than 0".to_string(),
            ));
        }

        if self.evaluation.k_values.is_empty() {
            return Err(Error::config(
                "evaluation.k_values must contain at least one cutoff".to_string(),
            ));
        }

        if self.evaluation.k_values.contains(&0) {
            return Err(Error::config(
                "evaluation.k_values must not contain 0".to_string(),
            ));
        }

        if self.discovery.result_count == 0 {
            return Err(Error::config(
                "discovery.result_count must be greater than 0".to_string(),
            ));
        }

        if self.discovery.timeout_secs == 0 {
            return Err(Error::config(
                "discovery.timeout_secs must be greater than 0".to_string(),
            ));
        }

        let passages = &self.discovery.passages;
        if passages.max_per_document == 0 {
            return Err(Error::config(
                "discovery.passages.max_per_document must be greater than 0".to_string(),
            ));
        }

        // Discovery v2 accepts passage lengths between 50 and 2000 characters
        if !(50..=2000).contains(&passages.characters) {
            return Err(Error::config(format!(
                "Invalid passage length {}. Must be between 50 and 2000",
                passages.characters
            )));
        }

        if let Some(url) = &self.discovery.service_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(Error::config(format!(
                    "Invalid discovery.service_url '{url}': must start with http:// or https://"
                )));
            }
        }

        Ok(())
    }

    /// Saves the configuration to a TOML file
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, toml_string)
            .map_err(|e| Error::config(format!("Failed to write config file: {e}")))?;

        Ok(())
    }
}
