/// Integration tests for layered configuration.
///
/// # Safety
///
/// These tests use `std::env::set_var` / `remove_var` which are `unsafe` in
/// Rust 2024 edition. Everything that touches the environment lives in a
/// single `#[test]`, so no other thread in this binary reads the variables
/// while they change.
use std::time::Duration;

use phishscan::client::http::HttpPredictionClient;
use phishscan::config::{self, PhishscanConfig};

/// Helper: set an env var (wraps the `unsafe` call).
///
/// # Safety
/// Must only be called from single-threaded test contexts.
unsafe fn set_env(key: &str, val: &str) {
    unsafe { std::env::set_var(key, val) }
}

/// Helper: remove an env var (wraps the `unsafe` call).
///
/// # Safety
/// Must only be called from single-threaded test contexts.
unsafe fn remove_env(key: &str) {
    unsafe { std::env::remove_var(key) }
}

const VARS: [&str; 5] = [
    "PHISHSCAN_ENDPOINT",
    "PHISHSCAN_TIMEOUT_MS",
    "PHISHSCAN_STORAGE_DIR",
    "PHISHSCAN_LOGGING",
    "PHISHSCAN_WEB_ADDR",
];

#[test]
fn env_vars_override_config_layers() {
    // --- endpoint and timeout ---
    unsafe { set_env("PHISHSCAN_ENDPOINT", "http://10.1.2.3:8000/predict") };
    unsafe { set_env("PHISHSCAN_TIMEOUT_MS", "2500") };
    let cfg = config::load();
    assert_eq!(cfg.endpoint.url, "http://10.1.2.3:8000/predict");
    assert_eq!(cfg.endpoint.timeout(), Some(Duration::from_millis(2500)));

    let client = HttpPredictionClient::from_config(&cfg.endpoint);
    assert_eq!(client.endpoint(), "http://10.1.2.3:8000/predict");
    assert_eq!(client.timeout(), Some(Duration::from_millis(2500)));

    // --- unparseable timeout is ignored ---
    unsafe { set_env("PHISHSCAN_TIMEOUT_MS", "soon") };
    let cfg = config::load();
    assert_ne!(cfg.endpoint.timeout_ms, 2500);

    // --- empty endpoint is ignored ---
    unsafe { set_env("PHISHSCAN_ENDPOINT", "") };
    let cfg = config::load();
    assert_ne!(cfg.endpoint.url, "");

    // --- storage dir and logging ---
    let dir = tempfile::tempdir().unwrap();
    unsafe { set_env("PHISHSCAN_STORAGE_DIR", dir.path().to_str().unwrap()) };
    unsafe { set_env("PHISHSCAN_LOGGING", "off") };
    let cfg = config::load();
    assert_eq!(cfg.storage.resolved_dir().as_deref(), Some(dir.path()));
    assert!(!cfg.logging.enabled);

    unsafe { set_env("PHISHSCAN_LOGGING", "YES") };
    assert!(config::load().logging.enabled);

    // --- web address ---
    unsafe { set_env("PHISHSCAN_WEB_ADDR", "0.0.0.0:8088") };
    assert_eq!(config::load().web.addr, "0.0.0.0:8088");

    for var in VARS {
        unsafe { remove_env(var) };
    }
}

#[test]
fn default_toml_is_loadable_and_matches_defaults() {
    let parsed: PhishscanConfig = toml::from_str(&PhishscanConfig::default_toml()).unwrap();
    let defaults = PhishscanConfig::default();
    assert_eq!(parsed.endpoint.url, defaults.endpoint.url);
    assert_eq!(parsed.endpoint.url, "http://127.0.0.1:5000/predict");
    assert_eq!(parsed.storage.history_key, "phishingDetectorHistory");
    assert_eq!(parsed.endpoint.timeout(), None);
    assert_eq!(parsed.web.addr, "127.0.0.1:9747");
}

#[test]
fn partial_file_falls_back_to_defaults() {
    let parsed: PhishscanConfig = toml::from_str("[endpoint]\ntimeout_ms = 750\n").unwrap();
    assert_eq!(parsed.endpoint.timeout(), Some(Duration::from_millis(750)));
    assert_eq!(parsed.endpoint.url, "http://127.0.0.1:5000/predict");
    assert!(parsed.logging.enabled);
}

#[test]
fn project_file_overrides_only_the_keys_it_sets() {
    let dir = tempfile::tempdir().unwrap();
    let global = dir.path().join("config.toml");
    let project = dir.path().join(".phishscan.toml");
    std::fs::write(
        &global,
        "[endpoint]\nurl = \"http://10.9.9.9:5000/predict\"\ntimeout_ms = 800\n\n[logging]\nenabled = false\n",
    )
    .unwrap();
    std::fs::write(&project, "[web]\naddr = \"127.0.0.1:9999\"\n").unwrap();

    let cfg = config::load_files(Some(global.clone()), Some(project.clone()));
    assert_eq!(cfg.endpoint.url, "http://10.9.9.9:5000/predict");
    assert_eq!(cfg.endpoint.timeout(), Some(Duration::from_millis(800)));
    assert!(!cfg.logging.enabled);
    assert_eq!(cfg.web.addr, "127.0.0.1:9999");
    assert_eq!(cfg.storage.history_key, "phishingDetectorHistory");

    // A key set in both files takes the project value.
    std::fs::write(&project, "[endpoint]\ntimeout_ms = 50\n").unwrap();
    let cfg = config::load_files(Some(global.clone()), Some(project));
    assert_eq!(cfg.endpoint.url, "http://10.9.9.9:5000/predict");
    assert_eq!(cfg.endpoint.timeout(), Some(Duration::from_millis(50)));

    // Missing or malformed files are skipped.
    let broken = dir.path().join("broken.toml");
    std::fs::write(&broken, "[endpoint\nurl = ").unwrap();
    let cfg = config::load_files(Some(global), Some(broken));
    assert_eq!(cfg.endpoint.url, "http://10.9.9.9:5000/predict");
    let cfg = config::load_files(None, Some(dir.path().join("missing.toml")));
    assert_eq!(cfg.endpoint.url, "http://127.0.0.1:5000/predict");
}
