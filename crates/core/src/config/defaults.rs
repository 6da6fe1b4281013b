//! Default values and functions for configuration

// Default constants
pub(crate) const DEFAULT_DISCOVERY_VERSION: &str = "2023-03-31";
pub(crate) const DEFAULT_DATA_INPUT_DIR: &str = "data/input";
pub(crate) const DEFAULT_DATA_OUTPUT_DIR: &str = "data/output";
pub(crate) const DEFAULT_QUERIES_INPUT_DIR: &str = "data/queries/input";

pub(crate) fn default_discovery_version() -> String {
    DEFAULT_DISCOVERY_VERSION.to_string()
}

pub(crate) fn default_result_count() -> usize {
    10
}

pub(crate) fn default_timeout_secs() -> u64 {
    30
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_max_per_document() -> usize {
    3
}

pub(crate) fn default_passage_characters() -> usize {
    200
}

pub(crate) fn default_top_k() -> usize {
    3
}

pub(crate) fn default_k_values() -> Vec<usize> {
    vec![1, 3, 5, 10]
}

pub(crate) fn default_data_input_dir() -> String {
    DEFAULT_DATA_INPUT_DIR.to_string()
}

pub(crate) fn default_data_output_dir() -> String {
    DEFAULT_DATA_OUTPUT_DIR.to_string()
}

pub(crate) fn default_queries_input_dir() -> String {
    DEFAULT_QUERIES_INPUT_DIR.to_string()
}
