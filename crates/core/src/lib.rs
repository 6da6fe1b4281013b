//! Core types for the searcheval retrieval evaluation tools
//!
//! This crate provides the foundational pieces shared by the other
//! searcheval crates:
//!
//! - **Configuration**: search service, evaluation and path settings
//! - **Error handling**: unified error types
//! - **Text**: title normalization used when matching expected answers
//! - **Timestamps**: file stamps and run timing
//!

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod config;
pub mod error;
pub mod text;
pub mod timestamps;

// Re-export main types for convenience
pub use config::{Config, DiscoveryConfig, EvaluationConfig, PassagesConfig, PathsConfig};
pub use error::{Error, Result, ResultExt};
