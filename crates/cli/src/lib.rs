//! Library interface for the searcheval CLI
//!
//! This module exposes the dataset loaders and evaluation runners for
//! integration testing while keeping argument handling in main.rs.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod commands;
pub mod dataset;
pub mod files;
pub mod ir_eval;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;

// Re-export commonly needed types for tests
pub use searcheval_core::config::Config;
pub use searcheval_core::error::{Error, Result};

/// Create a progress bar for query runs
pub fn create_progress_bar(total: usize, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .map_err(|e| error!("Failed to set progress bar style: {}", e))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    pb.set_message(message.to_string());
    pb
}
