use searcheval_core::config::Config;
use std::fs;
use tempfile::TempDir;

const FILE_CONFIG: &str = r#"
    [discovery]
    service_url = "https://file.example.com"
    project_id = "from-file"
    collection_ids = ["faq"]

    [evaluation]
    top_k = 3
"#;

const ENV_VARS: &[&str] = &[
    "SEARCHEVAL_EVALUATION__TOP_K",
    "SEARCHEVAL_EVALUATION__K_VALUES",
    "SEARCHEVAL_DISCOVERY__COLLECTION_IDS",
    "SEARCHEVAL_PATHS__DATA_OUTPUT_DIR",
    "WATSON_DISCOVERY_URL",
    "WATSON_DISCOVERY_APIKEY",
    "WATSON_DISCOVERY_PROJECT_ID",
    "WATSON_DISCOVERY_VERSION",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

// Environment is process-wide, so all override cases run in one test
#[test]
fn test_environment_overrides_file_values() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, FILE_CONFIG).unwrap();

    // File values apply without overrides
    let config = Config::from_file(&config_path).unwrap();
    assert_eq!(config.evaluation.top_k, 3);
    assert_eq!(config.discovery.project_id.as_deref(), Some("from-file"));
    assert_eq!(config.discovery.collection_ids, vec!["faq"]);

    // Prefixed variables override nested keys, lists split on commas
    std::env::set_var("SEARCHEVAL_EVALUATION__TOP_K", "5");
    std::env::set_var("SEARCHEVAL_EVALUATION__K_VALUES", "1,5,20");
    std::env::set_var("SEARCHEVAL_DISCOVERY__COLLECTION_IDS", "faq,support");
    std::env::set_var("SEARCHEVAL_PATHS__DATA_OUTPUT_DIR", "/tmp/reports");

    let config = Config::from_file(&config_path).unwrap();
    assert_eq!(config.evaluation.top_k, 5);
    assert_eq!(config.evaluation.k_values, vec![1, 5, 20]);
    assert_eq!(config.discovery.collection_ids, vec!["faq", "support"]);
    assert_eq!(config.paths.data_output_dir, "/tmp/reports");

    // Watson Discovery variables take precedence over the file
    std::env::set_var("WATSON_DISCOVERY_URL", "https://env.example.com");
    std::env::set_var("WATSON_DISCOVERY_APIKEY", "env-key");
    std::env::set_var("WATSON_DISCOVERY_PROJECT_ID", "from-env");
    std::env::set_var("WATSON_DISCOVERY_VERSION", "2024-01-01");

    let config = Config::from_file(&config_path).unwrap();
    assert_eq!(
        config.discovery.service_url.as_deref(),
        Some("https://env.example.com")
    );
    assert_eq!(config.discovery.api_key.as_deref(), Some("env-key"));
    assert_eq!(config.discovery.project_id.as_deref(), Some("from-env"));
    assert_eq!(config.discovery.version, "2024-01-01");
    assert!(config.validate().is_ok());

    // Missing file still picks up the environment
    let config = Config::from_file(&temp_dir.path().join("missing.toml")).unwrap();
    assert_eq!(config.evaluation.top_k, 5);
    assert_eq!(config.discovery.project_id.as_deref(), Some("from-env"));

    clear_env();
}
