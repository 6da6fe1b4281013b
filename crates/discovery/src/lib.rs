//! Result suppliers for the search service under evaluation
//!
//! A result supplier turns a query into the service's ranked result list.
//! This crate provides the Watson Discovery v2 client used for live runs and
//! a static supplier for tests and offline runs.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use async_trait::async_trait;
use searcheval_core::config::DiscoveryConfig;
use searcheval_core::error::{Error, Result};
use std::sync::Arc;
use tracing::info;

pub mod error;
pub mod models;
mod static_supplier;
mod watson;

pub use error::DiscoveryError;
pub use models::{DocumentPassage, QueryResponse, QueryResult, ResultMetadata};
pub use static_supplier::StaticResultSupplier;
pub use watson::WatsonDiscoveryClient;

/// Trait for services that return ranked results for a query
#[async_trait]
pub trait ResultSupplier: Send + Sync {
    /// Run a natural language query against the given collections
    ///
    /// # Returns
    /// The service's results in rank order (index 0 is the top result)
    async fn query(&self, query: &str, collection_ids: &[String]) -> Result<QueryResponse>;
}

/// Take a required setting from config, naming the env var that can provide it
fn required(value: &Option<String>, key: &str, env_var: &str) -> Result<String> {
    value
        .clone()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            Error::config(format!(
                "Discovery {key} required. Set discovery.{key} or {env_var} env var"
            ))
        })
}

/// Create the live result supplier from configuration
pub fn create_result_supplier(config: &DiscoveryConfig) -> Result<Arc<dyn ResultSupplier>> {
    let service_url = required(&config.service_url, "service_url", "WATSON_DISCOVERY_URL")?;
    let api_key = required(&config.api_key, "api_key", "WATSON_DISCOVERY_APIKEY")?;
    let project_id = required(&config.project_id, "project_id", "WATSON_DISCOVERY_PROJECT_ID")?;

    info!("Creating Watson Discovery result supplier");
    let client = WatsonDiscoveryClient::new(
        service_url,
        api_key,
        project_id,
        config.version.clone(),
        config.result_count,
        config.passages.clone(),
        config.timeout_secs,
    )?;

    Ok(Arc::new(client))
}
