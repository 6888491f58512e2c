use crate::services::retry::RetryPolicy;
use log::LevelFilter;
use std::str::FromStr;

pub const DEFAULT_API_BASE_URL: &str = "https://wealthsync-backend3.onrender.com";

/// Per-attempt limit enforced by the transport
pub const REQUEST_TIMEOUT_MS: u32 = 30_000;

/// Client settings, fixed at build time and overridable in code
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u32,
    pub retry: RetryPolicy,
    pub log_level: LevelFilter,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: normalize_base_url(option_env!("BUDGET_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL)),
            timeout_ms: REQUEST_TIMEOUT_MS,
            retry: RetryPolicy::network(),
            log_level: parse_log_level(option_env!("BUDGET_LOG_LEVEL")),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = normalize_base_url(base_url.as_ref());
        self
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn parse_log_level(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|level| LevelFilter::from_str(level.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}
