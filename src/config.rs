use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_BASE_PATH: &str = "/api/v1";
const DEFAULT_STALE_SECS: u64 = 30;
const DEFAULT_DEBOUNCE_MS: u64 = 400;
const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub stale_after: Duration,
    pub debounce: Duration,
    pub page_size: usize,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    /// Reads `PL_*` variables; call after the `.env` files are loaded.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_base_url = get("PL_API_BASE_URL").unwrap_or_else(|| {
            let origin = get("PL_API_ORIGIN").unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
            let path = get("PL_API_BASE_PATH").unwrap_or_else(|| DEFAULT_BASE_PATH.to_string());
            join_base_url(&origin, &path)
        });
        let stale_secs = get("PL_STALE_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_STALE_SECS);
        let debounce_ms = get("PL_DEBOUNCE_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_DEBOUNCE_MS);
        let page_size = get("PL_PAGE_SIZE")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, 100);
        let log_file = get("PL_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join("pl_dashboard.log"));

        Self {
            api_base_url,
            stale_after: Duration::from_secs(stale_secs),
            debounce: Duration::from_millis(debounce_ms),
            page_size,
            log_file,
        }
    }
}

pub fn join_base_url(origin: &str, path: &str) -> String {
    let origin = origin.trim().trim_end_matches('/');
    let path = path.trim().trim_matches('/');
    if path.is_empty() {
        origin.to_string()
    } else {
        format!("{origin}/{path}")
    }
}
