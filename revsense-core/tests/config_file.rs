//! Loads config files from disk.

use std::io::Write;

use revsense_core::config::Config;
use revsense_core::error::ConfigError;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = Config::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn file_values_are_applied() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let raw = r#"
theme = "dark"

[api]
base_url = "http://localhost:8000"

[analysis]
analyze_on_edit = true

[tickets]
latency_ms = 10

[log]
file = "/tmp/revsense-test.log"
"#;
    file.write_all(raw.as_bytes()).unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.theme, "dark");
    assert_eq!(config.api.base_url, "http://localhost:8000");
    assert!(config.analysis.analyze_on_edit);
    assert_eq!(config.tickets.latency_ms, 10);
    assert_eq!(
        config.log.file.as_deref(),
        Some(std::path::Path::new("/tmp/revsense-test.log"))
    );
}

#[test]
fn broken_file_reports_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[api\nbase_url = 1").unwrap();
    assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse(_))));
}
