//! searcheval CLI - retrieval evaluation for search services
//!
//! This binary provides the command-line interface for running FAQ
//! discovery tests and scoring judged rankings.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use searcheval::commands::{check_connection, parse_cutoff, run_discovery_test, run_ir_metrics};
use searcheval::create_progress_bar;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use searcheval_core::config::Config;
use searcheval_core::timestamps::Stopwatch;
use searcheval_discovery::create_result_supplier;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "searcheval")]
#[command(about = "Retrieval evaluation for search services")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the expected FAQ comes back in the top results
    DiscoveryTest {
        /// FAQ test sheet (CSV)
        #[arg(short, long, value_name = "CSV")]
        input: PathBuf,
        /// Queries file listing the collections to search
        #[arg(short, long, value_name = "JSON")]
        queries: Option<PathBuf>,
        /// Number of top results checked
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Compute retrieval metrics from judged rankings
    IrMetrics {
        /// Judged rankings (CSV)
        #[arg(short, long, value_name = "CSV")]
        input: PathBuf,
        /// Cutoff for precision@k and recall@k (repeatable)
        #[arg(
            short,
            long = "k",
            value_name = "N",
            value_parser = parse_cutoff,
            allow_negative_numbers = true
        )]
        k: Vec<usize>,
    },
    /// Send the configured test query to the search service
    CheckConnection {
        /// Queries file listing the collections to search
        #[arg(short, long, value_name = "JSON")]
        queries: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;

    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::DiscoveryTest {
            input,
            queries,
            top_k,
        } => {
            if let Some(top_k) = top_k {
                config.evaluation.top_k = top_k;
            }
            config.validate()?;
            discovery_test(&config, &input, queries.as_deref()).await
        }
        Commands::IrMetrics { input, k } => {
            if !k.is_empty() {
                config.evaluation.k_values = k;
            }
            config.validate()?;
            ir_metrics(&config, &input)
        }
        Commands::CheckConnection { queries } => {
            config.validate()?;
            let supplier = create_result_supplier(&config.discovery)?;
            let count = check_connection(&config, supplier.as_ref(), queries.as_deref()).await?;
            println!("Connection OK: {count} results received");
            Ok(())
        }
    }
}

/// Initialize logging system
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "searcheval={level},searcheval_core={level},searcheval_metrics={level},searcheval_discovery={level}"
        ))
        .init();

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = Config::load(path).context("Failed to load configuration")?;
    debug!("Loaded configuration: {config:?}");
    Ok(config)
}

async fn discovery_test(config: &Config, input: &Path, queries: Option<&Path>) -> Result<()> {
    let stopwatch = Stopwatch::start("Discovery test");
    let supplier = create_result_supplier(&config.discovery)?;

    let pb = create_progress_bar(0, "Querying");
    let outcome = run_discovery_test(config, supplier.as_ref(), input, queries, &pb).await?;
    pb.finish_with_message("Done");

    println!("\nDiscovery test results:");
    println!(
        "  Correct FAQ in top {}: {}/{} ({:.1}%)",
        outcome.summary.top_k,
        outcome.summary.hits,
        outcome.summary.cases,
        outcome.summary.hit_rate * 100.0
    );
    println!("  Errors:            {}", outcome.summary.errors);
    print!("{}", outcome.summary.metrics);
    println!("\nReport:  {}", outcome.report_path.display());
    println!("Summary: {}", outcome.summary_path.display());

    stopwatch.finish();
    Ok(())
}

fn ir_metrics(config: &Config, input: &Path) -> Result<()> {
    let stopwatch = Stopwatch::start("IR metrics");
    let outcome = run_ir_metrics(config, input)?;
    info!("Scored {} queries", outcome.metrics.total_queries);

    println!("\nRetrieval metrics:");
    print!("{}", outcome.metrics);
    println!("\nReport:  {}", outcome.report_path.display());
    println!("Summary: {}", outcome.summary_path.display());

    stopwatch.finish();
    Ok(())
}
