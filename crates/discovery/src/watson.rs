//! IBM Watson Discovery v2 query client

use crate::error::DiscoveryError;
use crate::models::{PassagesRequest, QueryRequest, QueryResponse};
use crate::ResultSupplier;
use async_trait::async_trait;
use reqwest::Client;
use searcheval_core::config::PassagesConfig;
use searcheval_core::error::Result;
use tracing::{debug, info, warn};

/// Watson Discovery v2 client
///
/// Authenticates with HTTP basic auth using the literal user name `apikey`
/// and the instance API key as password.
pub struct WatsonDiscoveryClient {
    client: Client,
    service_url: String,
    api_key: String,
    project_id: String,
    version: String,
    result_count: usize,
    passages: PassagesConfig,
}

impl WatsonDiscoveryClient {
    /// Create a new Discovery client
    ///
    /// # Arguments
    /// * `service_url` - Instance URL, e.g. `https://api.eu-gb.discovery.watson.cloud.ibm.com/instances/<id>`
    /// * `api_key` - Instance API key
    /// * `project_id` - Project holding the collections to query
    /// * `version` - API version date (e.g. "2023-03-31")
    /// * `result_count` - Number of results requested per query
    /// * `passages` - Passage retrieval settings
    /// * `timeout_secs` - Request timeout in seconds
    pub fn new(
        service_url: String,
        api_key: String,
        project_id: String,
        version: String,
        result_count: usize,
        passages: PassagesConfig,
        timeout_secs: u64,
    ) -> Result<Self> {
        info!("Initializing Watson Discovery client");
        info!("  Service URL: {service_url}");
        info!("  Project: {project_id}");
        info!("  Version: {version}");
        info!("  Timeout: {timeout_secs}s");

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                DiscoveryError::ConfigError(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            service_url: service_url.trim_end_matches('/').to_string(),
            api_key,
            project_id,
            version,
            result_count,
            passages,
        })
    }

    fn query_url(&self) -> String {
        format!(
            "{}/v2/projects/{}/query",
            self.service_url, self.project_id
        )
    }
}

#[async_trait]
impl ResultSupplier for WatsonDiscoveryClient {
    async fn query(&self, query: &str, collection_ids: &[String]) -> Result<QueryResponse> {
        let request = QueryRequest {
            collection_ids: collection_ids.to_vec(),
            natural_language_query: query.to_string(),
            count: self.result_count,
            passages: PassagesRequest::from(&self.passages),
        };

        debug!(
            "Discovery query over {} collections: {query}",
            collection_ids.len()
        );

        let response = self
            .client
            .post(self.query_url())
            .query(&[("version", self.version.as_str())])
            .basic_auth("apikey", Some(&self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let error_kind = if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() {
                    "connection"
                } else if e.is_request() {
                    "request build"
                } else {
                    "unknown"
                };
                warn!("Discovery query failed ({error_kind}): {e}");
                DiscoveryError::Request(format!("{error_kind}: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Discovery returned {status} for query '{query}'");
            return Err(DiscoveryError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| DiscoveryError::Decode(e.to_string()))?;

        debug!(
            "Discovery returned {} results ({} matching)",
            parsed.results.len(),
            parsed.matching_results
        );

        Ok(parsed)
    }
}
