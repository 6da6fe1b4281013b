//! Bounds and consistency checks over every small ranking drawn from a fixed pool

use pretty_assertions::assert_eq;
use searcheval_metrics::{EvaluationResults, MetricsSummary, RetrievalMetrics};
use std::collections::HashSet;

const POOL: [&str; 4] = ["d1", "d2", "d3", "d4"];

/// All rankings of length 0..=3 drawn from the pool, repeats allowed
fn rankings() -> Vec<Vec<&'static str>> {
    let mut all = vec![Vec::new()];
    let mut frontier = vec![Vec::new()];
    for _ in 0..3 {
        let mut next = Vec::new();
        for prefix in &frontier {
            for doc in POOL {
                let mut ranking: Vec<&str> = prefix.clone();
                ranking.push(doc);
                next.push(ranking);
            }
        }
        all.extend(next.iter().cloned());
        frontier = next;
    }
    all
}

/// Every subset of the pool
fn relevant_sets() -> Vec<HashSet<&'static str>> {
    (0..(1u32 << POOL.len()))
        .map(|mask| {
            POOL.iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, doc)| *doc)
                .collect()
        })
        .collect()
}

fn in_unit_interval(value: f64) -> bool {
    (0.0..=1.0 + 1e-12).contains(&value)
}

#[test]
fn test_metrics_stay_within_unit_interval() {
    for retrieved in rankings() {
        for relevant in relevant_sets() {
            let metrics = RetrievalMetrics::new(&retrieved, &relevant);
            let summary = metrics.summarize(&[0, 1, 2, 5]);
            for (name, value) in [
                ("precision", summary.precision),
                ("recall", summary.recall),
                ("f1", summary.f1_score),
                ("rr", summary.reciprocal_rank),
                ("ndcg", summary.ndcg),
                ("ap", summary.average_precision),
            ] {
                assert!(
                    in_unit_interval(value),
                    "{name} = {value} for {retrieved:?} / {relevant:?}"
                );
            }
        }
    }
}

#[test]
fn test_full_recall_when_relevant_is_subset_of_retrieved() {
    for retrieved in rankings() {
        let present: HashSet<&str> = retrieved.iter().copied().collect();
        for relevant in relevant_sets() {
            if relevant.is_empty() || !relevant.is_subset(&present) {
                continue;
            }
            let metrics = RetrievalMetrics::new(&retrieved, &relevant);
            assert_eq!(metrics.recall(), 1.0, "{retrieved:?} / {relevant:?}");
        }
    }
}

#[test]
fn test_disjoint_inputs_score_zero() {
    for retrieved in rankings() {
        let present: HashSet<&str> = retrieved.iter().copied().collect();
        for relevant in relevant_sets() {
            if !relevant.is_disjoint(&present) {
                continue;
            }
            let summary = RetrievalMetrics::new(&retrieved, &relevant).summarize(&[]);
            assert_eq!(
                summary,
                MetricsSummary::default(),
                "{retrieved:?} / {relevant:?}"
            );
        }
    }
}

#[test]
fn test_cutoff_at_or_beyond_length_matches_full_ranking() {
    for retrieved in rankings() {
        for relevant in relevant_sets() {
            let metrics = RetrievalMetrics::new(&retrieved, &relevant);
            for k in retrieved.len()..retrieved.len() + 3 {
                assert_eq!(metrics.precision_at_k(k), metrics.precision());
                assert_eq!(metrics.recall_at_k(k), metrics.recall());
            }
        }
    }
}

#[test]
fn test_recall_at_k_never_decreases_with_k() {
    for retrieved in rankings() {
        for relevant in relevant_sets() {
            let metrics = RetrievalMetrics::new(&retrieved, &relevant);
            let recalls: Vec<f64> = (0..=retrieved.len())
                .map(|k| metrics.recall_at_k(k))
                .collect();
            assert!(recalls.windows(2).all(|pair| pair[0] <= pair[1]));
        }
    }
}

#[test]
fn test_evaluators_score_independently_across_threads() {
    let relevant: HashSet<&str> = ["d2", "d3"].into_iter().collect();
    let rankings = rankings();

    let sequential: Vec<MetricsSummary> = rankings
        .iter()
        .map(|r| RetrievalMetrics::new(r, &relevant).summarize(&[1, 3]))
        .collect();

    let parallel: Vec<MetricsSummary> = std::thread::scope(|scope| {
        let handles: Vec<_> = rankings
            .chunks(16)
            .map(|chunk| {
                let relevant = &relevant;
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|r| RetrievalMetrics::new(r, relevant).summarize(&[1, 3]))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap_or_default())
            .collect()
    });

    assert_eq!(sequential, parallel);
}

#[test]
fn test_mean_average_precision_over_query_set() {
    let queries: [(&str, Vec<&str>, Vec<&str>); 3] = [
        ("q1", vec!["d1", "d2", "d3"], vec!["d1", "d3"]),
        ("q2", vec!["d4", "d1"], vec!["d1"]),
        ("q3", vec!["d2"], vec!["d3"]),
    ];

    let mut results = EvaluationResults::new();
    for (id, retrieved, relevant) in &queries {
        let relevant: HashSet<&str> = relevant.iter().copied().collect();
        results.record(
            *id,
            RetrievalMetrics::new(retrieved, &relevant).summarize(&[1]),
        );
    }

    let aggregate = results.compute_metrics();
    let expected_map = ((1.0 + 2.0 / 3.0) / 2.0 + 0.5 + 0.0) / 3.0;
    assert!((aggregate.map - expected_map).abs() < 1e-9);
    assert!((aggregate.mrr - (1.0 + 0.5 + 0.0) / 3.0).abs() < 1e-9);
    assert_eq!(aggregate.total_queries, 3);
}
