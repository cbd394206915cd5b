//! Environment-driven client configuration.

use std::time::Duration;

use common::search_const::{DEFAULT_DEBOUNCE_MS, PAGE_SIZE};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000/api";

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogApiConfig {
    pub base_url: String,
    pub debounce: Duration,
    pub page_size: u64,
    pub request_timeout: Duration,
}

impl Default for CatalogApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            page_size: PAGE_SIZE,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl CatalogApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Unparseable numbers fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let base_url = lookup("WARDROBE_API_URL").unwrap_or(defaults.base_url);
        let debounce = lookup("WARDROBE_SEARCH_DEBOUNCE_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.debounce);
        let page_size = lookup("WARDROBE_PAGE_SIZE")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(defaults.page_size);
        let request_timeout = lookup("WARDROBE_REQUEST_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);
        Self { base_url: base_url.trim_end_matches('/').to_string(), debounce, page_size, request_timeout }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
