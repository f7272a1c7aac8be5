//! Configuration resolution tests
//!
//! Priority order: CLI override > environment variable > TOML file > default.
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Every test that reads or writes PEOPLE_* variables is marked #[serial].

use people_common::config::{
    Backend, ConfigError, ConfigOverrides, ServiceConfig, ENV_BACKEND, ENV_CONFIG, ENV_DB_PATH,
    ENV_HOST, ENV_LOG_LEVEL, ENV_PORT,
};
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn clear_env() {
    for name in [ENV_HOST, ENV_PORT, ENV_BACKEND, ENV_DB_PATH, ENV_LOG_LEVEL, ENV_CONFIG] {
        env::remove_var(name);
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn with_file(file: &NamedTempFile) -> ConfigOverrides {
    ConfigOverrides {
        config_file: Some(file.path().to_path_buf()),
        ..Default::default()
    }
}

#[test]
#[serial]
fn test_empty_file_uses_defaults() {
    clear_env();
    let file = write_config("");

    let config = ServiceConfig::resolve(with_file(&file)).unwrap();
    let defaults = ServiceConfig::default();

    assert_eq!(config, defaults);
    assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    assert_eq!(config.backend, Backend::Memory);
}

#[test]
#[serial]
fn test_file_values_override_defaults() {
    clear_env();
    let file = write_config(
        r#"
        host = "0.0.0.0"
        port = 9090
        backend = "sqlite"
        db_path = "/tmp/people-test.db"
        log_level = "debug"
        "#,
    );

    let config = ServiceConfig::resolve(with_file(&file)).unwrap();

    assert_eq!(config.bind_addr(), "0.0.0.0:9090");
    assert_eq!(config.backend, Backend::Sqlite);
    assert_eq!(config.db_path, PathBuf::from("/tmp/people-test.db"));
    assert_eq!(config.log_level, "debug");
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();
    let file = write_config("port = 9090\nbackend = \"sqlite\"\n");
    env::set_var(ENV_PORT, "7000");
    env::set_var(ENV_BACKEND, "memory");

    let config = ServiceConfig::resolve(with_file(&file)).unwrap();
    clear_env();

    assert_eq!(config.port, 7000);
    assert_eq!(config.backend, Backend::Memory);
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    let file = write_config("");
    env::set_var(ENV_HOST, "10.0.0.1");
    env::set_var(ENV_PORT, "7000");

    let overrides = ConfigOverrides {
        port: Some(6000),
        ..with_file(&file)
    };
    let config = ServiceConfig::resolve(overrides).unwrap();
    clear_env();

    assert_eq!(config.port, 6000);
    assert_eq!(config.host, "10.0.0.1");
}

#[test]
#[serial]
fn test_config_file_from_env() {
    clear_env();
    let file = write_config("port = 9191\n");
    env::set_var(ENV_CONFIG, file.path());

    let config = ServiceConfig::resolve(ConfigOverrides::default()).unwrap();
    clear_env();

    assert_eq!(config.port, 9191);
}

#[test]
#[serial]
fn test_invalid_env_port_rejected() {
    clear_env();
    let file = write_config("");
    env::set_var(ENV_PORT, "not-a-port");

    let result = ServiceConfig::resolve(with_file(&file));
    clear_env();

    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue { key: "port", .. })
    ));
}

#[test]
#[serial]
fn test_malformed_file_rejected() {
    clear_env();
    let file = write_config("port = \"eighty\"\n");

    let result = ServiceConfig::resolve(with_file(&file));
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
#[serial]
fn test_missing_explicit_file_rejected() {
    clear_env();
    let overrides = ConfigOverrides {
        config_file: Some(PathBuf::from("/nonexistent/people/config.toml")),
        ..Default::default()
    };

    let result = ServiceConfig::resolve(overrides);
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}
