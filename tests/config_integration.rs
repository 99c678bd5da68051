use chat_widget::config::AppConfig;
use serial_test::serial;
use std::env;
use std::fs;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("CHAT_WIDGET_BACKEND__BASE_URL");
        env::remove_var("CHAT_WIDGET_WIDGET__HEALTH_INTERVAL_SECS");
        env::remove_var("CHAT_BACKEND_URL");
        env::remove_var("CHAT_SUBJECT_NAME");
        env::remove_var("CHAT_HEALTH_INTERVAL");
        env::remove_var("CONFIG_FILE");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args(["chat-widget"]).expect("defaults should load");
    assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
    assert_eq!(config.backend.health_path, "/health");
    assert_eq!(config.backend.chat_path, "/chat");
    assert!(config.backend.request_timeout_secs.is_none());
    assert_eq!(config.widget.subject_name, "Benitha");
    assert_eq!(config.widget.health_interval_secs, 30);
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("CHAT_WIDGET_BACKEND__BASE_URL", "http://backend:8080");
        env::set_var("CHAT_WIDGET_WIDGET__HEALTH_INTERVAL_SECS", "5");
    }

    let config = AppConfig::load_from_args(["chat-widget"]).expect("Failed to load config");
    assert_eq!(config.backend.base_url, "http://backend:8080");
    assert_eq!(config.widget.health_interval_secs, 5);

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_beats_env() {
    clear_env_vars();
    unsafe {
        env::set_var("CHAT_WIDGET_BACKEND__BASE_URL", "http://from-env:8080");
    }

    let config = AppConfig::load_from_args([
        "chat-widget",
        "--base-url",
        "http://from-flag:9090",
        "--subject",
        "Ann",
        "--health-interval",
        "0",
    ])
    .expect("Failed to load config");

    assert_eq!(config.backend.base_url, "http://from-flag:9090");
    assert_eq!(config.widget.subject_name, "Ann");
    assert!(config.widget.health_interval().is_none());

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = dir.path().join("widget.yaml");
    fs::write(
        &file_path,
        r"
backend:
  base_url: http://files:7070
  request_timeout_secs: 20
widget:
  subject_name: Grace
  greeting: Welcome!
",
    )
    .expect("Failed to write temp config");

    let config = AppConfig::load_from_args([
        "chat-widget",
        "--config",
        file_path.to_str().expect("utf-8 temp path"),
    ])
    .expect("Failed to load config from file");

    assert_eq!(config.backend.base_url, "http://files:7070");
    assert_eq!(config.backend.request_timeout_secs, Some(20));
    // Untouched keys keep their defaults.
    assert_eq!(config.backend.chat_path, "/chat");
    assert_eq!(config.widget.subject_name, "Grace");
    assert_eq!(config.widget.greeting_text(), "Welcome!");
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env_vars();

    let result = AppConfig::load_from_args(["chat-widget", "--config", "/nonexistent/widget.yaml"]);
    assert!(result.is_err());
}
