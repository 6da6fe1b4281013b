//! Per-query retrieval metrics with binary relevance.
//!
//! A [`RetrievalMetrics`] borrows one ranked result list (index 0 is the top
//! rank) and the set of identifiers known to be relevant for the query that
//! produced it. Every metric is a pure function of those two inputs, so an
//! evaluator can be queried any number of times, in any order.
//!
//! # Repeated identifiers
//!
//! The ranking is taken as supplied, duplicates included. Precision counts
//! every position holding a relevant identifier: it describes the list the
//! service returned, and a repeated relevant result still occupies a slot
//! that shows the user something relevant. Recall, nDCG and average
//! precision measure coverage of the relevant set, where a repeat adds
//! nothing, so they credit an identifier only at its first occurrence and
//! stay within `[0, 1]`. For `[a, a, b]` against `{a, b}` this gives
//! precision@2 of 1.0 but recall@2 of 0.5.
//!
//! # References
//!
//! - Järvelin & Kekäläinen (2002). "Cumulated gain-based evaluation of IR techniques"
//! - Voorhees & Harman (2005). "TREC: Experiment and Evaluation in Information Retrieval"

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

/// Retrieval quality evaluator for a single query.
///
/// # Example
///
/// ```
/// use searcheval_metrics::RetrievalMetrics;
/// use std::collections::HashSet;
///
/// let retrieved = ["doc1", "doc2", "doc3", "doc4", "doc5"];
/// let relevant: HashSet<_> = ["doc1", "doc3"].into_iter().collect();
/// let metrics = RetrievalMetrics::new(&retrieved, &relevant);
///
/// assert_eq!(metrics.precision(), 0.4);
/// assert_eq!(metrics.recall(), 1.0);
/// assert_eq!(metrics.mean_reciprocal_rank(), 1.0);
/// ```
#[derive(Debug)]
pub struct RetrievalMetrics<'a, T> {
    retrieved: &'a [T],
    relevant: &'a HashSet<T>,
}

impl<T> Clone for RetrievalMetrics<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RetrievalMetrics<'_, T> {}

impl<'a, T: Eq + Hash> RetrievalMetrics<'a, T> {
    /// Creates an evaluator over a ranked result list and a relevant set.
    ///
    /// Empty inputs are valid; every metric is then `0.0`.
    pub fn new(retrieved: &'a [T], relevant: &'a HashSet<T>) -> Self {
        Self {
            retrieved,
            relevant,
        }
    }

    /// The ranked result list being scored
    pub fn retrieved(&self) -> &'a [T] {
        self.retrieved
    }

    /// The relevant identifiers
    pub fn relevant(&self) -> &'a HashSet<T> {
        self.relevant
    }

    /// Evaluator restricted to the first `k` ranked results.
    ///
    /// `k` larger than the ranking keeps the whole ranking.
    pub fn top_k(&self, k: usize) -> Self {
        let end = k.min(self.retrieved.len());
        Self {
            retrieved: &self.retrieved[..end],
            relevant: self.relevant,
        }
    }

    fn is_relevant(&self, item: &T) -> bool {
        self.relevant.contains(item)
    }

    /// Positions of relevant identifiers, first occurrences only
    fn first_hit_positions(&self) -> impl Iterator<Item = usize> + 'a {
        let relevant = self.relevant;
        let mut seen: HashSet<&'a T> = HashSet::new();
        self.retrieved
            .iter()
            .enumerate()
            .filter(move |(_, item)| relevant.contains(*item) && seen.insert(*item))
            .map(|(position, _)| position)
    }

    /// Fraction of retrieved results that are relevant.
    ///
    /// Returns `0.0` when nothing was retrieved.
    pub fn precision(&self) -> f64 {
        if self.retrieved.is_empty() {
            return 0.0;
        }
        let hits = self
            .retrieved
            .iter()
            .filter(|item| self.is_relevant(item))
            .count();
        hits as f64 / self.retrieved.len() as f64
    }

    /// Fraction of relevant identifiers that were retrieved.
    ///
    /// Returns `0.0` when the relevant set is empty.
    pub fn recall(&self) -> f64 {
        if self.relevant.is_empty() {
            return 0.0;
        }
        self.first_hit_positions().count() as f64 / self.relevant.len() as f64
    }

    /// Harmonic mean of precision and recall.
    ///
    /// Returns `0.0` when both are zero.
    pub fn f1_score(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();
        if precision + recall == 0.0 {
            return 0.0;
        }
        2.0 * precision * recall / (precision + recall)
    }

    /// Reciprocal of the 1-based rank of the first relevant result.
    ///
    /// This is the reciprocal rank of one query; averaging it over a query set
    /// is done by [`crate::EvaluationResults`]. Returns `0.0` without a hit.
    pub fn mean_reciprocal_rank(&self) -> f64 {
        self.retrieved
            .iter()
            .position(|item| self.is_relevant(item))
            .map_or(0.0, |index| 1.0 / (index + 1) as f64)
    }

    /// Normalized discounted cumulative gain with binary gains.
    ///
    /// ```text
    /// DCG  = Σ gain(i) / log₂(i + 2)        over ranked positions i (0-based)
    /// IDCG = Σ 1 / log₂(j + 2)              for j in 0..|relevant|
    /// nDCG = DCG / IDCG
    /// ```
    ///
    /// Returns `0.0` when the relevant set is empty.
    pub fn ndcg(&self) -> f64 {
        let idcg: f64 = (0..self.relevant.len()).map(discount).sum();
        if idcg == 0.0 {
            return 0.0;
        }
        let dcg: f64 = self.first_hit_positions().map(discount).sum();
        dcg / idcg
    }

    /// Average of the precision values taken at each rank holding a relevant result.
    ///
    /// The sum is divided by the size of the whole relevant set, not by the
    /// number of hits, so relevant identifiers that were never retrieved pull
    /// the score down. Returns `0.0` without hits or with an empty relevant set.
    pub fn average_precision(&self) -> f64 {
        if self.relevant.is_empty() {
            return 0.0;
        }
        let cumulative: f64 = self
            .first_hit_positions()
            .enumerate()
            .map(|(hits_before, position)| (hits_before + 1) as f64 / (position + 1) as f64)
            .sum();
        cumulative / self.relevant.len() as f64
    }

    /// Precision over the first `k` ranked results.
    pub fn precision_at_k(&self, k: usize) -> f64 {
        self.top_k(k).precision()
    }

    /// Recall over the first `k` ranked results.
    pub fn recall_at_k(&self, k: usize) -> f64 {
        self.top_k(k).recall()
    }

    /// All metrics for this query, with precision@k and recall@k for each cutoff.
    pub fn summarize(&self, k_values: &[usize]) -> MetricsSummary {
        MetricsSummary {
            precision: self.precision(),
            recall: self.recall(),
            f1_score: self.f1_score(),
            reciprocal_rank: self.mean_reciprocal_rank(),
            ndcg: self.ndcg(),
            average_precision: self.average_precision(),
            precision_at_k: k_values
                .iter()
                .map(|&k| (k, self.precision_at_k(k)))
                .collect(),
            recall_at_k: k_values
                .iter()
                .map(|&k| (k, self.recall_at_k(k)))
                .collect(),
        }
    }
}

/// Logarithmic rank discount for a 0-based position
#[inline]
fn discount(position: usize) -> f64 {
    1.0 / ((position + 2) as f64).log2()
}

/// Scalar metric values for one query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    /// Reciprocal rank of the first relevant result
    pub reciprocal_rank: f64,
    pub ndcg: f64,
    pub average_precision: f64,
    /// Precision over the top k results, keyed by k
    pub precision_at_k: BTreeMap<usize, f64>,
    /// Recall over the top k results, keyed by k
    pub recall_at_k: BTreeMap<usize, f64>,
}
