//! In-memory result supplier for tests and offline runs

use crate::models::QueryResponse;
use crate::ResultSupplier;
use async_trait::async_trait;
use searcheval_core::error::{Error, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// Result supplier that answers from a fixed map of query text to response
///
/// Unknown queries get an empty response. Queries registered with
/// [`StaticResultSupplier::with_failure`] return a search error.
#[derive(Default)]
pub struct StaticResultSupplier {
    responses: HashMap<String, QueryResponse>,
    failures: HashMap<String, String>,
    received: Mutex<Vec<(String, Vec<String>)>>,
}

impl StaticResultSupplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the response returned for `query`
    pub fn with_response(mut self, query: impl Into<String>, response: QueryResponse) -> Self {
        self.responses.insert(query.into(), response);
        self
    }

    /// Make `query` fail with the given message
    pub fn with_failure(mut self, query: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures.insert(query.into(), message.into());
        self
    }

    /// Queries received so far, with the collections they targeted
    pub fn received(&self) -> Vec<(String, Vec<String>)> {
        self.received
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ResultSupplier for StaticResultSupplier {
    async fn query(&self, query: &str, collection_ids: &[String]) -> Result<QueryResponse> {
        if let Ok(mut received) = self.received.lock() {
            received.push((query.to_string(), collection_ids.to_vec()));
        }

        if let Some(message) = self.failures.get(query) {
            return Err(Error::search(message.clone()));
        }

        Ok(self.responses.get(query).cloned().unwrap_or_default())
    }
}
