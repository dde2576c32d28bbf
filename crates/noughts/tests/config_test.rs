//! Tests for session config loading.

use noughts::{Mode, SessionConfig};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults() {
    let config = SessionConfig::default();
    assert_eq!(*config.reply_delay_ms(), 500);
    assert_eq!(*config.mode(), Mode::HumanVsComputer);
    assert_eq!(config.reply_delay(), Duration::from_millis(500));
}

#[test]
fn test_load_full_config() {
    let file = write_config("reply_delay_ms = 250\nmode = \"human-vs-human\"\n");
    let config = SessionConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.reply_delay_ms(), 250);
    assert_eq!(*config.mode(), Mode::HumanVsHuman);
}

#[test]
fn test_missing_keys_use_defaults() {
    let file = write_config("");
    let config = SessionConfig::from_file(file.path()).unwrap();
    assert_eq!(config, SessionConfig::default());
}

#[test]
fn test_unknown_mode_is_an_error() {
    let file = write_config("mode = \"computer-vs-computer\"\n");
    let err = SessionConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"), "{}", err);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SessionConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"), "{}", err);
}

#[test]
fn test_overrides() {
    let config = SessionConfig::default()
        .with_reply_delay_ms(0)
        .with_mode(Mode::HumanVsHuman);
    assert_eq!(config.reply_delay(), Duration::ZERO);
    assert_eq!(*config.mode(), Mode::HumanVsHuman);
}

#[test]
fn test_round_trip_through_toml() {
    let config = SessionConfig::new(100, Mode::HumanVsHuman);
    let text = toml::to_string(&config).unwrap();
    let file = write_config(&text);
    assert_eq!(SessionConfig::from_file(file.path()).unwrap(), config);
}
