//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, Environment, File};
use std::path::Path;

use super::{global_config_path, Config};

/// Watson Discovery environment variables, mapped to config keys
const LEGACY_DISCOVERY_ENV: &[(&str, &str)] = &[
    ("WATSON_DISCOVERY_URL", "discovery.service_url"),
    ("WATSON_DISCOVERY_APIKEY", "discovery.api_key"),
    ("WATSON_DISCOVERY_PROJECT_ID", "discovery.project_id"),
    ("WATSON_DISCOVERY_VERSION", "discovery.version"),
];

impl Config {
    /// Loads configuration from a file with environment variable overrides
    ///
    /// The file format follows the extension (`.toml`, `.yaml`, ...). Environment
    /// variables are prefixed with `SEARCHEVAL_` and use double underscores for
    /// nested values. For example:
    /// - `SEARCHEVAL_EVALUATION__TOP_K=5`
    /// - `SEARCHEVAL_DISCOVERY__COLLECTION_IDS=abc,def`
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut builder = ConfigLib::builder();

        // Add the config file if it exists
        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        // Add environment variables with SEARCHEVAL_ prefix
        builder = builder.add_source(
            Environment::with_prefix("SEARCHEVAL")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("discovery.collection_ids")
                .with_list_parse_key("evaluation.k_values")
                .try_parsing(true),
        );

        // Support the Watson Discovery environment variables
        for (var, key) in LEGACY_DISCOVERY_ENV {
            if let Ok(value) = std::env::var(var) {
                builder = builder
                    .set_override(*key, value)
                    .map_err(|e| Error::config(format!("Failed to set {var}: {e}")))?;
            }
        }

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from a single file
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (~/.searcheval/config.toml or custom --config path)
    /// 3. Environment variables (SEARCHEVAL_*, WATSON_DISCOVERY_*)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => global_config_path()?,
        };
        Self::from_file(&path)
    }
}
