//! Integration tests for configuration resolution
//!
//! Covers the CLI → ENV → TOML → default priority order and the handling of
//! missing or explicitly named config files.
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Every test that reads or writes WAZN_* variables is marked #[serial].

use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;
use wazn_common::config::{
    CliOverrides, ServiceConfig, DEFAULT_CORPUS_PATH, DEFAULT_HOST, DEFAULT_PORT, ENV_CONFIG,
    ENV_CORPUS, ENV_HOST, ENV_PORT,
};

fn clear_env() {
    for name in [ENV_CONFIG, ENV_CORPUS, ENV_HOST, ENV_PORT] {
        env::remove_var(name);
    }
}

fn write_config(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("wazn.toml");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
#[serial]
fn test_explicit_config_file_values_are_used() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
        host = "0.0.0.0"
        port = 6100
        corpus_path = "/srv/wazn/examples.json"

        [logging]
        level = "debug"

        [matching]
        min_confidence = 0.4
        "#,
    );

    let config = ServiceConfig::resolve(&CliOverrides {
        config: Some(path.clone()),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 6100);
    assert_eq!(config.corpus_path, PathBuf::from("/srv/wazn/examples.json"));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.matching.min_confidence, 0.4);
    assert_eq!(config.config_file, Some(path));
}

#[test]
#[serial]
fn test_env_overrides_toml() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "port = 6100\nhost = \"10.0.0.1\"\n");

    env::set_var(ENV_CONFIG, &path);
    env::set_var(ENV_PORT, "6200");
    env::set_var(ENV_CORPUS, "/tmp/env-corpus.json");

    let config = ServiceConfig::resolve(&CliOverrides::default()).unwrap();
    clear_env();

    assert_eq!(config.port, 6200);
    assert_eq!(config.host, "10.0.0.1");
    assert_eq!(config.corpus_path, PathBuf::from("/tmp/env-corpus.json"));
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    env::set_var(ENV_HOST, "10.1.1.1");
    env::set_var(ENV_PORT, "6200");

    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "");

    let config = ServiceConfig::resolve(&CliOverrides {
        config: Some(path),
        corpus: Some(PathBuf::from("cli.json")),
        host: Some("192.168.0.2".to_string()),
        port: Some(6300),
    })
    .unwrap();
    clear_env();

    assert_eq!(config.host, "192.168.0.2");
    assert_eq!(config.port, 6300);
    assert_eq!(config.corpus_path, PathBuf::from("cli.json"));
}

#[test]
#[serial]
fn test_empty_config_file_falls_back_to_defaults() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "");

    let config = ServiceConfig::resolve(&CliOverrides {
        config: Some(path),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.corpus_path, PathBuf::from(DEFAULT_CORPUS_PATH));
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.bind_address(), format!("{}:{}", DEFAULT_HOST, DEFAULT_PORT));
}

#[test]
#[serial]
fn test_missing_explicit_config_is_an_error() {
    clear_env();
    let result = ServiceConfig::resolve(&CliOverrides {
        config: Some(PathBuf::from("/nonexistent/wazn.toml")),
        ..Default::default()
    });
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_invalid_env_port_is_an_error() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "");
    env::set_var(ENV_PORT, "not-a-port");

    let result = ServiceConfig::resolve(&CliOverrides {
        config: Some(path),
        ..Default::default()
    });
    clear_env();

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_unparsable_config_is_an_error() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "port = \"six thousand\"");

    let result = ServiceConfig::resolve(&CliOverrides {
        config: Some(path),
        ..Default::default()
    });
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_invalid_matching_table_is_rejected() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[matching.weights]\nlevenshtein = -1.0\n");

    let result = ServiceConfig::resolve(&CliOverrides {
        config: Some(path),
        ..Default::default()
    });
    assert!(result.is_err());
}
