//! Loaders for evaluation inputs: FAQ test sheets, relevance judgments and
//! collection lists.

use csv::StringRecord;
use searcheval_core::error::{Error, Result};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

/// One row of a FAQ test sheet kept for testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqTestCase {
    pub user_input: String,
    pub correct_faq: String,
    pub associated_url: String,
}

/// Judged ranking for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledQuery {
    pub query: String,
    /// Document IDs in retrieval order
    pub retrieved: Vec<String>,
    pub relevant: HashSet<String>,
}

/// Column positions resolved from a CSV header row
struct Columns {
    file: String,
    positions: HashMap<String, usize>,
}

impl Columns {
    fn from_headers(file: &Path, headers: &StringRecord) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();
        Self {
            file: file.display().to_string(),
            positions,
        }
    }

    fn required(&self, name: &str) -> Result<usize> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| Error::dataset(&self.file, format!("missing column '{name}'")))
    }

    fn optional(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }
}

fn field(record: &StringRecord, position: usize) -> &str {
    record.get(position).unwrap_or_default().trim()
}

fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::dataset(path.display().to_string(), e.to_string()))
}

/// Load the FAQ cases marked for testing (`keep_faq_for_test` is `Y`)
///
/// Rows with an empty user input are skipped.
pub fn load_faq_test_cases(path: &Path) -> Result<Vec<FaqTestCase>> {
    let mut reader = open_reader(path)?;
    let headers = reader
        .headers()
        .map_err(|e| Error::dataset(path.display().to_string(), e.to_string()))?
        .clone();
    let columns = Columns::from_headers(path, &headers);

    let user_input = columns.required("User Input")?;
    let correct_faq = columns.required("Correct FAQ")?;
    let keep = columns.required("keep_faq_for_test")?;
    let url = columns.optional("Associated URL");

    let mut cases = Vec::new();
    let mut skipped = 0usize;
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            Error::dataset(&columns.file, format!("row {}: {e}", row + 2))
        })?;

        if field(&record, keep) != "Y" || field(&record, user_input).is_empty() {
            skipped += 1;
            continue;
        }

        cases.push(FaqTestCase {
            user_input: field(&record, user_input).to_string(),
            correct_faq: field(&record, correct_faq).to_string(),
            associated_url: url
                .map(|position| field(&record, position).to_string())
                .unwrap_or_default(),
        });
    }

    info!(
        "Loaded {} FAQ test cases from {} ({} rows skipped)",
        cases.len(),
        path.display(),
        skipped
    );
    Ok(cases)
}

fn parse_relevance(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "y" | "yes" => Some(true),
        "0" | "false" | "n" | "no" => Some(false),
        _ => None,
    }
}

/// Load relevance judgments grouped by query
///
/// Queries keep the order in which they first appear. Within a query,
/// documents are ordered by `Retrieval Order` when that column is present
/// and by file order otherwise.
pub fn load_labeled_queries(path: &Path) -> Result<Vec<LabeledQuery>> {
    let mut reader = open_reader(path)?;
    let headers = reader
        .headers()
        .map_err(|e| Error::dataset(path.display().to_string(), e.to_string()))?
        .clone();
    let columns = Columns::from_headers(path, &headers);

    let query_col = columns.required("Query")?;
    let doc_col = columns.required("Document ID")?;
    let relevant_col = columns.required("Is Relevant")?;
    let order_col = columns.optional("Retrieval Order");

    // (order, file position, document id, relevant) per query
    let mut groups: Vec<(String, Vec<(usize, usize, String, bool)>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (row, record) in reader.records().enumerate() {
        let line = row + 2;
        let record =
            record.map_err(|e| Error::dataset(&columns.file, format!("row {line}: {e}")))?;

        let query = field(&record, query_col);
        let document = field(&record, doc_col);
        if query.is_empty() || document.is_empty() {
            warn!("Skipping row {line} of {}: empty query or document", columns.file);
            continue;
        }

        let raw_relevance = field(&record, relevant_col);
        let relevant = parse_relevance(raw_relevance).ok_or_else(|| {
            Error::dataset(
                &columns.file,
                format!("row {line}: invalid 'Is Relevant' value '{raw_relevance}'"),
            )
        })?;

        let order = match order_col {
            Some(position) => {
                let raw = field(&record, position);
                raw.parse::<usize>().map_err(|_| {
                    Error::dataset(
                        &columns.file,
                        format!("row {line}: invalid 'Retrieval Order' value '{raw}'"),
                    )
                })?
            }
            None => row,
        };

        let slot = *index.entry(query.to_string()).or_insert_with(|| {
            groups.push((query.to_string(), Vec::new()));
            groups.len() - 1
        });
        groups[slot]
            .1
            .push((order, row, document.to_string(), relevant));
    }

    let queries: Vec<LabeledQuery> = groups
        .into_iter()
        .map(|(query, mut rows)| {
            rows.sort_by_key(|(order, position, _, _)| (*order, *position));
            let relevant = rows
                .iter()
                .filter(|(_, _, _, relevant)| *relevant)
                .map(|(_, _, doc, _)| doc.clone())
                .collect();
            let retrieved = rows.into_iter().map(|(_, _, doc, _)| doc).collect();
            LabeledQuery {
                query,
                retrieved,
                relevant,
            }
        })
        .collect();

    info!(
        "Loaded judgments for {} queries from {}",
        queries.len(),
        path.display()
    );
    Ok(queries)
}

/// Read the collection IDs listed in a queries file
///
/// The file holds `{"collections": [...]}`; a file whose whole content is
/// that object encoded as a JSON string is also accepted.
pub fn load_collections(path: &Path) -> Result<Vec<String>> {
    let file = path.display().to_string();
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::with_context(format!("Failed to read {file}"), e))?;

    let mut document: Value =
        serde_json::from_str(&content).map_err(|e| Error::dataset(&file, e.to_string()))?;
    if let Value::String(inner) = &document {
        debug!("Queries file {file} holds an encoded JSON string");
        document = serde_json::from_str(inner).map_err(|e| Error::dataset(&file, e.to_string()))?;
    }

    let collections = document
        .get("collections")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::dataset(&file, "missing 'collections' array"))?;

    collections
        .iter()
        .map(|value| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| Error::dataset(&file, format!("collection id {value} is not a string")))
        })
        .collect()
}
