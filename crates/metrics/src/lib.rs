//! Retrieval quality metrics for ranked search results.
//!
//! This crate provides:
//! - [`RetrievalMetrics`], a per-query evaluator computing precision, recall,
//!   F1, reciprocal rank, nDCG and average precision over one ranked result list
//! - [`EvaluationResults`], which collects per-query summaries and averages them
//!   across a query set (MAP, MRR, mean nDCG, ...)

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod aggregate;
pub mod retrieval;

pub use aggregate::{AggregateMetrics, EvaluationResults, QueryEvaluation};
pub use retrieval::{MetricsSummary, RetrievalMetrics};
