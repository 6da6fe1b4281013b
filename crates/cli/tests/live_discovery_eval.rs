//! FAQ discovery evaluation against a live Watson Discovery project.
//!
//! Usage:
//!   SEARCHEVAL_EVAL_INPUT=faq_cases.csv cargo test -p searcheval --test live_discovery_eval -- --ignored --nocapture
//!
//! Requirements:
//! - discovery.service_url, api_key, project_id and collection_ids set in
//!   ~/.searcheval/config.toml or through WATSON_DISCOVERY_* / SEARCHEVAL_* env vars
//! - SEARCHEVAL_EVAL_INPUT naming a FAQ test sheet findable from data_input_dir

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use searcheval::commands::run_discovery_test;
use searcheval::Config;
use searcheval_discovery::create_result_supplier;
use std::path::PathBuf;

/// Minimum share of cases expected to find the correct FAQ in the top k
const MIN_HIT_RATE: f64 = 0.5;

#[tokio::test]
#[ignore]
async fn test_live_faq_discovery_eval() -> Result<()> {
    let input = std::env::var("SEARCHEVAL_EVAL_INPUT")
        .context("SEARCHEVAL_EVAL_INPUT must name a FAQ test sheet")?;

    let config = Config::load(None).context("Failed to load configuration")?;
    config.validate()?;
    let supplier = create_result_supplier(&config.discovery)?;

    let outcome = run_discovery_test(
        &config,
        supplier.as_ref(),
        &PathBuf::from(input),
        None,
        &ProgressBar::hidden(),
    )
    .await?;

    let summary = &outcome.summary;
    println!("\n=== FAQ Discovery Evaluation ===");
    println!("Cases: {}", summary.cases);
    println!("Errors: {}", summary.errors);
    println!(
        "Correct FAQ in top {}: {}/{} ({:.1}%)",
        summary.top_k,
        summary.hits,
        summary.cases,
        summary.hit_rate * 100.0
    );
    print!("{}", summary.metrics);
    println!("Report: {}", outcome.report_path.display());

    assert!(
        summary.hit_rate >= MIN_HIT_RATE,
        "hit rate {:.1}% below {:.0}%",
        summary.hit_rate * 100.0,
        MIN_HIT_RATE * 100.0
    );
    Ok(())
}
