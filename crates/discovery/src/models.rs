//! Query request and response shapes for the Discovery v2 query API

use searcheval_core::config::PassagesConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a `POST /v2/projects/{project_id}/query` request
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    pub collection_ids: Vec<String>,
    pub natural_language_query: String,
    pub count: usize,
    pub passages: PassagesRequest,
}

/// Passage settings as the service expects them
#[derive(Debug, Clone, Serialize)]
pub struct PassagesRequest {
    pub enabled: bool,
    pub max_per_document: usize,
    pub characters: usize,
}

impl From<&PassagesConfig> for PassagesRequest {
    fn from(config: &PassagesConfig) -> Self {
        Self {
            enabled: config.enabled,
            max_per_document: config.max_per_document,
            characters: config.characters,
        }
    }
}

/// Ranked results for one query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub matching_results: usize,
    #[serde(default)]
    pub results: Vec<QueryResult>,
}

/// A single ranked result
///
/// Which fields are present depends on the documents in the collection; the
/// text-like fields are kept as raw JSON and read through the accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub document_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<Value>,
    #[serde(default)]
    pub result_metadata: Option<ResultMetadata>,
    #[serde(default)]
    pub document_passages: Vec<DocumentPassage>,
}

/// Service-assigned metadata for a result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    #[serde(default)]
    pub collection_id: Option<String>,
    #[serde(default)]
    pub document_retrieval_source: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// A passage extracted from a result document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentPassage {
    pub passage_text: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub start_offset: Option<usize>,
    #[serde(default)]
    pub end_offset: Option<usize>,
}

/// Render a text-like field; arrays of strings are joined with a space
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(field_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(" "))
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Object(_) => None,
    }
}

impl QueryResult {
    pub fn title_text(&self) -> Option<String> {
        self.title.as_ref().and_then(field_text)
    }

    pub fn subtitle_text(&self) -> Option<String> {
        self.subtitle.as_ref().and_then(field_text)
    }

    pub fn body_text(&self) -> Option<String> {
        self.text.as_ref().and_then(field_text)
    }

    /// Raw table content; tables are structured, so no text rendering applies
    pub fn table_value(&self) -> Option<&Value> {
        self.table.as_ref().filter(|value| !value.is_null())
    }

    pub fn confidence(&self) -> Option<f64> {
        self.result_metadata.as_ref().and_then(|m| m.confidence)
    }
}

impl QueryResponse {
    /// Document IDs in rank order
    pub fn document_ids(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.document_id.as_str()).collect()
    }

    /// Titles in rank order; `None` where a result has no title
    pub fn titles(&self) -> Vec<Option<String>> {
        self.results.iter().map(QueryResult::title_text).collect()
    }

    /// Subtitles in rank order; `None` where a result has no subtitle
    pub fn subtitles(&self) -> Vec<Option<String>> {
        self.results.iter().map(QueryResult::subtitle_text).collect()
    }

    /// Body text in rank order; `None` where a result has no text field
    pub fn texts(&self) -> Vec<Option<String>> {
        self.results.iter().map(QueryResult::body_text).collect()
    }

    /// Table content in rank order; `None` where a result has no table
    pub fn tables(&self) -> Vec<Option<&Value>> {
        self.results.iter().map(QueryResult::table_value).collect()
    }

    /// Confidence scores in rank order; `None` where the service gave none
    pub fn confidences(&self) -> Vec<Option<f64>> {
        self.results.iter().map(QueryResult::confidence).collect()
    }

    /// Passage texts per result, in rank order
    pub fn passages(&self) -> Vec<Vec<&str>> {
        self.results
            .iter()
            .map(|r| {
                r.document_passages
                    .iter()
                    .map(|p| p.passage_text.as_str())
                    .collect()
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
