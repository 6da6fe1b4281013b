//! Retrieval metrics over a judged ranking file

use crate::dataset::LabeledQuery;
use searcheval_metrics::{EvaluationResults, RetrievalMetrics};

/// Per-query metrics for a set of judged rankings
#[derive(Debug, Clone)]
pub struct IrEvaluation {
    pub k_values: Vec<usize>,
    pub results: EvaluationResults,
    /// (retrieved, relevant) counts per query, parallel to `results`
    counts: Vec<(usize, usize)>,
}

/// Score every judged query
pub fn evaluate_labeled_queries(queries: &[LabeledQuery], k_values: &[usize]) -> IrEvaluation {
    let mut results = EvaluationResults::new();
    let mut counts = Vec::with_capacity(queries.len());

    for query in queries {
        let metrics = RetrievalMetrics::new(&query.retrieved, &query.relevant);
        results.record(query.query.clone(), metrics.summarize(k_values));
        counts.push((query.retrieved.len(), query.relevant.len()));
    }

    IrEvaluation {
        k_values: k_values.to_vec(),
        results,
        counts,
    }
}

fn score(value: f64) -> String {
    format!("{value:.4}")
}

impl IrEvaluation {
    pub fn headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = [
            "Query",
            "Retrieved",
            "Relevant",
            "Precision",
            "Recall",
            "F1",
            "Reciprocal Rank",
            "nDCG",
            "Average Precision",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect();
        headers.extend(self.k_values.iter().map(|k| format!("Precision@{k}")));
        headers.extend(self.k_values.iter().map(|k| format!("Recall@{k}")));
        headers
    }

    pub fn records(&self) -> Vec<Vec<String>> {
        self.results
            .queries()
            .iter()
            .zip(&self.counts)
            .map(|(query, (retrieved, relevant))| {
                let s = &query.summary;
                let mut row = vec![
                    query.query_id.clone(),
                    retrieved.to_string(),
                    relevant.to_string(),
                    score(s.precision),
                    score(s.recall),
                    score(s.f1_score),
                    score(s.reciprocal_rank),
                    score(s.ndcg),
                    score(s.average_precision),
                ];
                row.extend(
                    self.k_values
                        .iter()
                        .map(|k| score(s.precision_at_k.get(k).copied().unwrap_or_default())),
                );
                row.extend(
                    self.k_values
                        .iter()
                        .map(|k| score(s.recall_at_k.get(k).copied().unwrap_or_default())),
                );
                row
            })
            .collect()
    }
}
