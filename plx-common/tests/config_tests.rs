//! Tests for configuration resolution and graceful degradation
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate PLX_TEST_CONFIG are marked with #[serial].

use plx_common::config::{ConfigResolver, ConfigSource, TomlConfig};
use plx_common::Error;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

const TEST_ENV_VAR: &str = "PLX_TEST_CONFIG";

fn resolver(platform_path: Option<PathBuf>) -> ConfigResolver {
    ConfigResolver::new()
        .with_env_var(TEST_ENV_VAR)
        .with_platform_path(platform_path)
}

fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_no_sources_uses_defaults() {
    env::remove_var(TEST_ENV_VAR);

    let resolved = resolver(None).resolve(None).unwrap();

    assert_eq!(resolved.source, ConfigSource::Defaults);
    assert_eq!(resolved.config, TomlConfig::default());
}

#[test]
#[serial]
fn test_missing_platform_file_does_not_error() {
    env::remove_var(TEST_ENV_VAR);
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("plx").join("config.toml");

    let resolved = resolver(Some(missing)).resolve(None).unwrap();

    assert_eq!(resolved.source, ConfigSource::Defaults);
}

#[test]
#[serial]
fn test_platform_file_is_loaded() {
    env::remove_var(TEST_ENV_VAR);
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        "config.toml",
        r#"
        output_filename = "Platform.csv"

        [labels]
        artist = "Other Artist"
        "#,
    );

    let resolved = resolver(Some(path.clone())).resolve(None).unwrap();

    assert_eq!(resolved.source, ConfigSource::PlatformFile(path));
    assert_eq!(resolved.config.output_filename, "Platform.csv");
    assert_eq!(resolved.config.labels.artist, "Other Artist");
    assert_eq!(resolved.config.labels.label, "Paralux");
}

#[test]
#[serial]
fn test_env_var_takes_precedence_over_platform_file() {
    let temp_dir = TempDir::new().unwrap();
    let platform = write_config(&temp_dir, "platform.toml", "output_filename = \"platform.csv\"");
    let from_env = write_config(&temp_dir, "env.toml", "output_filename = \"env.csv\"");
    env::set_var(TEST_ENV_VAR, &from_env);

    let resolved = resolver(Some(platform)).resolve(None).unwrap();

    assert_eq!(resolved.source, ConfigSource::Environment(from_env));
    assert_eq!(resolved.config.output_filename, "env.csv");

    // Cleanup
    env::remove_var(TEST_ENV_VAR);
}

#[test]
#[serial]
fn test_cli_takes_precedence_over_env_var() {
    let temp_dir = TempDir::new().unwrap();
    let from_env = write_config(&temp_dir, "env.toml", "output_filename = \"env.csv\"");
    let from_cli = write_config(&temp_dir, "cli.toml", "output_filename = \"cli.csv\"");
    env::set_var(TEST_ENV_VAR, &from_env);

    let resolved = resolver(None).resolve(Some(&from_cli)).unwrap();

    assert_eq!(resolved.source, ConfigSource::CommandLine(from_cli));
    assert_eq!(resolved.config.output_filename, "cli.csv");

    // Cleanup
    env::remove_var(TEST_ENV_VAR);
}

#[test]
#[serial]
fn test_explicit_missing_file_is_an_error() {
    env::remove_var(TEST_ENV_VAR);
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.toml");

    let err = resolver(None).resolve(Some(&missing)).unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
#[serial]
fn test_unreadable_config_path_is_an_io_error() {
    env::remove_var(TEST_ENV_VAR);
    let temp_dir = TempDir::new().unwrap();

    // A directory exists but cannot be read as a file
    let err = resolver(None).resolve(Some(temp_dir.path())).unwrap_err();

    assert!(matches!(err, Error::Io(_)));
}

#[test]
#[serial]
fn test_malformed_file_is_a_config_error() {
    env::remove_var(TEST_ENV_VAR);
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "bad.toml", "[columns\ntrack_name = ");

    let err = resolver(None).resolve(Some(&path)).unwrap_err();

    assert!(matches!(err, Error::Config(_)));
}

#[test]
#[serial]
fn test_logging_section_round_trips_from_file() {
    env::remove_var(TEST_ENV_VAR);
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        "logging.toml",
        r#"
        [logging]
        level = "debug"
        file = "/tmp/plx.log"
        "#,
    );

    let resolved = resolver(None).resolve(Some(&path)).unwrap();

    assert_eq!(resolved.config.logging.level, "debug");
    assert_eq!(resolved.config.logging.file, Some(PathBuf::from("/tmp/plx.log")));
}
