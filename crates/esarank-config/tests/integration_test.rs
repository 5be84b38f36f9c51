//! Integration tests for configuration loading from files.

use esarank_config::{AuthorListConfig, ConfigError, ConfigLoader, ConfigValidator, RunMode};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_yaml_file_then_env_overrides() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("esarank.yaml");
    fs::write(
        &config_path,
        r##"
paths:
  input_json: from_yaml.json
  ranking_output: yaml_ranking.png
ranking:
  lookback: 1
chart:
  title_prefix: Paper ranking
  palette: ["#111111", "#222222"]
"##,
    )
    .unwrap();

    let mut env = HashMap::new();
    env.insert("ESARANK_CONFIG", config_path.display().to_string());
    env.insert("JSON_PATH", "from_env.json".to_string());
    env.insert("ESA_RANKING_ALL", "env_all.png".to_string());

    let config = ConfigLoader::load_with(|var| env.get(var).cloned()).unwrap();

    assert_eq!(config.paths.input_json, Some(PathBuf::from("from_env.json")));
    assert_eq!(
        config.paths.ranking_output,
        Some(PathBuf::from("yaml_ranking.png"))
    );
    assert_eq!(
        config.paths.ranking_all_output,
        Some(PathBuf::from("env_all.png"))
    );
    assert_eq!(config.ranking.lookback, 1);
    assert_eq!(config.chart.title_prefix, "Paper ranking");
    assert_eq!(config.chart.palette.len(), 2);

    ConfigValidator::validate(&config, RunMode::Render).unwrap();
}

#[test]
fn test_missing_config_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.yaml").display().to_string();

    let err = ConfigLoader::load_with(|var| (var == "ESARANK_CONFIG").then(|| missing.clone()))
        .unwrap_err();
    assert!(matches!(err, ConfigError::IoError { .. }));
}

#[test]
fn test_env_only_config_without_outputs_fails_validation() {
    let config =
        ConfigLoader::load_with(|var| (var == "JSON_PATH").then(|| "a.json".to_string()))
            .unwrap();
    let err = ConfigValidator::validate(&config, RunMode::Render).unwrap_err();
    assert!(matches!(err, ConfigError::MissingConfig(ref var) if var == "ESA_RANKING"));
}

#[test]
fn test_author_list_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("authors.yaml");
    fs::write(&path, "valid_users:\n  - 佐藤\n  - tanaka\n").unwrap();

    let list = AuthorListConfig::load(&path).unwrap();
    assert_eq!(
        list.valid_users,
        Some(vec!["佐藤".to_string(), "tanaka".to_string()])
    );
}
