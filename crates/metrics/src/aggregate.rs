//! Cross-query aggregation of per-query metric summaries.

use crate::retrieval::MetricsSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One evaluated query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEvaluation {
    pub query_id: String,
    pub summary: MetricsSummary,
}

/// Metrics averaged over a query set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub total_queries: usize,
    pub mean_precision: f64,
    pub mean_recall: f64,
    pub mean_f1_score: f64,
    /// Mean reciprocal rank
    pub mrr: f64,
    pub mean_ndcg: f64,
    /// Mean average precision
    pub map: f64,
    pub mean_precision_at_k: BTreeMap<usize, f64>,
    pub mean_recall_at_k: BTreeMap<usize, f64>,
}

/// Collects per-query summaries in the order they were recorded
#[derive(Debug, Clone, Default)]
pub struct EvaluationResults {
    queries: Vec<QueryEvaluation>,
}

impl EvaluationResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the summary for one query
    pub fn record(&mut self, query_id: impl Into<String>, summary: MetricsSummary) {
        self.queries.push(QueryEvaluation {
            query_id: query_id.into(),
            summary,
        });
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn queries(&self) -> &[QueryEvaluation] {
        &self.queries
    }

    /// Average every metric over the recorded queries.
    ///
    /// A cutoff missing from some summaries is averaged over the queries that
    /// report it. An empty result set yields all zeros.
    pub fn compute_metrics(&self) -> AggregateMetrics {
        let total = self.queries.len();
        if total == 0 {
            return AggregateMetrics::default();
        }

        let mean = |select: fn(&MetricsSummary) -> f64| -> f64 {
            self.queries.iter().map(|q| select(&q.summary)).sum::<f64>() / total as f64
        };

        AggregateMetrics {
            total_queries: total,
            mean_precision: mean(|s| s.precision),
            mean_recall: mean(|s| s.recall),
            mean_f1_score: mean(|s| s.f1_score),
            mrr: mean(|s| s.reciprocal_rank),
            mean_ndcg: mean(|s| s.ndcg),
            map: mean(|s| s.average_precision),
            mean_precision_at_k: self.mean_by_cutoff(|s| &s.precision_at_k),
            mean_recall_at_k: self.mean_by_cutoff(|s| &s.recall_at_k),
        }
    }

    fn mean_by_cutoff(
        &self,
        select: fn(&MetricsSummary) -> &BTreeMap<usize, f64>,
    ) -> BTreeMap<usize, f64> {
        let mut sums: BTreeMap<usize, (f64, usize)> = BTreeMap::new();
        for query in &self.queries {
            for (&k, &value) in select(&query.summary) {
                let entry = sums.entry(k).or_insert((0.0, 0));
                entry.0 += value;
                entry.1 += 1;
            }
        }
        sums.into_iter()
            .map(|(k, (sum, count))| (k, sum / count as f64))
            .collect()
    }

    /// Print the aggregated metrics to stdout
    pub fn print_metrics(&self) {
        print!("{}", self.compute_metrics());
    }
}

impl fmt::Display for AggregateMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Queries evaluated: {}", self.total_queries)?;
        writeln!(f, "  Precision:         {:.1}%", self.mean_precision * 100.0)?;
        writeln!(f, "  Recall:            {:.1}%", self.mean_recall * 100.0)?;
        writeln!(f, "  F1:                {:.1}%", self.mean_f1_score * 100.0)?;
        writeln!(f, "  MRR:               {:.3}", self.mrr)?;
        writeln!(f, "  nDCG:              {:.3}", self.mean_ndcg)?;
        writeln!(f, "  MAP:               {:.3}", self.map)?;
        for (k, value) in &self.mean_precision_at_k {
            let label = format!("Precision@{k}:");
            writeln!(f, "  {label:<19}{:.1}%", value * 100.0)?;
        }
        for (k, value) in &self.mean_recall_at_k {
            let label = format!("Recall@{k}:");
            writeln!(f, "  {label:<19}{:.1}%", value * 100.0)?;
        }
        Ok(())
    }
}
