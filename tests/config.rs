use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use pl_dashboard::config::{AppConfig, join_base_url};

fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
    let vars = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<HashMap<_, _>>();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_point_at_local_backend() {
    let cfg = AppConfig::default();
    assert_eq!(cfg.api_base_url, "http://localhost:8080/api/v1");
    assert_eq!(cfg.stale_after, Duration::from_secs(30));
    assert_eq!(cfg.debounce, Duration::from_millis(400));
    assert_eq!(cfg.page_size, 10);
    assert!(cfg.log_file.ends_with("pl_dashboard.log"));
}

#[test]
fn origin_and_path_are_joined() {
    let cfg = config_from(&[
        ("PL_API_ORIGIN", "https://stats.example.com/"),
        ("PL_API_BASE_PATH", "/v2/"),
    ]);
    assert_eq!(cfg.api_base_url, "https://stats.example.com/v2");
}

#[test]
fn full_base_url_wins() {
    let cfg = config_from(&[
        ("PL_API_BASE_URL", "http://10.0.0.5:9000/api"),
        ("PL_API_ORIGIN", "https://ignored.example.com"),
    ]);
    assert_eq!(cfg.api_base_url, "http://10.0.0.5:9000/api");
}

#[test]
fn numeric_overrides_and_fallbacks() {
    let cfg = config_from(&[
        ("PL_STALE_SECS", "5"),
        ("PL_DEBOUNCE_MS", "oops"),
        ("PL_PAGE_SIZE", "500"),
        ("PL_LOG_FILE", " /tmp/pl.log "),
    ]);
    assert_eq!(cfg.stale_after, Duration::from_secs(5));
    assert_eq!(cfg.debounce, Duration::from_millis(400));
    assert_eq!(cfg.page_size, 100);
    assert_eq!(cfg.log_file, PathBuf::from("/tmp/pl.log"));

    assert_eq!(config_from(&[("PL_PAGE_SIZE", "0")]).page_size, 1);
}

#[test]
fn join_handles_empty_path() {
    assert_eq!(join_base_url("http://localhost:8080", ""), "http://localhost:8080");
    assert_eq!(join_base_url("http://localhost:8080/", "api/v1"), "http://localhost:8080/api/v1");
}
