//! Command implementations shared by the binary and the integration tests

use crate::dataset::{load_collections, load_faq_test_cases, load_labeled_queries};
use crate::faq_test::{run_faq_test, FaqTestOptions, FaqTestSummary};
use crate::files::{resolve_input, resolve_queries, write_csv, write_json};
use crate::ir_eval::evaluate_labeled_queries;
use indicatif::ProgressBar;
use searcheval_core::config::Config;
use searcheval_core::error::{cutoff_from_i64, Error, Result};
use searcheval_discovery::ResultSupplier;
use searcheval_metrics::AggregateMetrics;
use std::path::{Path, PathBuf};
use tracing::info;

/// Files and totals produced by a FAQ discovery test
#[derive(Debug, Clone)]
pub struct DiscoveryTestOutcome {
    pub report_path: PathBuf,
    pub summary_path: PathBuf,
    pub summary: FaqTestSummary,
}

/// Files and metrics produced by a labeled IR evaluation
#[derive(Debug, Clone)]
pub struct IrMetricsOutcome {
    pub report_path: PathBuf,
    pub summary_path: PathBuf,
    pub metrics: AggregateMetrics,
}

/// Parse a rank cutoff given on the command line
///
/// Anything other than a non-negative integer is rejected as invalid input.
pub fn parse_cutoff(value: &str) -> Result<usize> {
    let k: i64 = value.trim().parse().map_err(|_| {
        Error::invalid_input(format!("cutoff k must be an integer, got '{value}'"))
    })?;
    cutoff_from_i64(k)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "evaluation".to_string())
}

/// Collections from a queries file when given, else from config
pub fn resolve_collections(config: &Config, queries: Option<&Path>) -> Result<Vec<String>> {
    let collections = match queries {
        Some(name) => load_collections(&resolve_queries(&config.paths, name)?)?,
        None => config.discovery.collection_ids.clone(),
    };

    if collections.is_empty() {
        return Err(Error::config(
            "No collections to query. Pass --queries or set discovery.collection_ids",
        ));
    }
    Ok(collections)
}

/// Run the FAQ discovery test and write its report and summary
pub async fn run_discovery_test(
    config: &Config,
    supplier: &dyn ResultSupplier,
    input: &Path,
    queries: Option<&Path>,
    pb: &ProgressBar,
) -> Result<DiscoveryTestOutcome> {
    let input_path = resolve_input(&config.paths, input)?;
    let cases = load_faq_test_cases(&input_path)?;
    let collections = resolve_collections(config, queries)?;

    info!(
        "Running {} FAQ test cases against {} collections (top {})",
        cases.len(),
        collections.len(),
        config.evaluation.top_k
    );

    let options = FaqTestOptions {
        top_k: config.evaluation.top_k,
        k_values: config.evaluation.k_values.clone(),
    };
    pb.set_length(cases.len() as u64);
    let report = run_faq_test(supplier, &cases, &collections, &options, pb).await;

    let output_dir = Path::new(&config.paths.data_output_dir);
    let stem = file_stem(&input_path);
    let report_path = write_csv(
        output_dir,
        &format!("{stem}_output"),
        &report.headers(),
        &report.records(),
    )?;

    let summary = report.summary();
    let summary_path = write_json(output_dir, &format!("{stem}_summary"), &summary)?;

    info!(
        "{} of {} cases found the correct FAQ in the top {} ({} errors)",
        summary.hits, summary.cases, summary.top_k, summary.errors
    );

    Ok(DiscoveryTestOutcome {
        report_path,
        summary_path,
        summary,
    })
}

/// Score a judged ranking file and write the per-query report and summary
pub fn run_ir_metrics(config: &Config, input: &Path) -> Result<IrMetricsOutcome> {
    let input_path = resolve_input(&config.paths, input)?;
    let queries = load_labeled_queries(&input_path)?;
    if queries.is_empty() {
        return Err(Error::dataset(
            input_path.display().to_string(),
            "no judged queries found",
        ));
    }

    let evaluation = evaluate_labeled_queries(&queries, &config.evaluation.k_values);

    let output_dir = Path::new(&config.paths.data_output_dir);
    let stem = file_stem(&input_path);
    let report_path = write_csv(
        output_dir,
        &format!("{stem}_ir_metrics"),
        &evaluation.headers(),
        &evaluation.records(),
    )?;

    let metrics = evaluation.results.compute_metrics();
    let summary_path = write_json(output_dir, &format!("{stem}_ir_summary"), &metrics)?;

    Ok(IrMetricsOutcome {
        report_path,
        summary_path,
        metrics,
    })
}

/// Send the configured test query and return the number of results
pub async fn check_connection(
    config: &Config,
    supplier: &dyn ResultSupplier,
    queries: Option<&Path>,
) -> Result<usize> {
    let query = config
        .discovery
        .test_query
        .as_deref()
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| Error::config("discovery.test_query is not set"))?;
    let collections = resolve_collections(config, queries)?;

    let response = supplier.query(query, &collections).await?;
    info!(
        "Connection OK: {} results received ({} matching) for '{query}'",
        response.results.len(),
        response.matching_results
    );
    Ok(response.results.len())
}
