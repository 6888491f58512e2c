use crate::services::config::ClientConfig;
use async_trait::async_trait;
use gloo::net::http::{Request, Response};
use gloo::timers::callback::Timeout;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{BudgetRequest, BudgetResult, HistoryEntry, HistoryRequest, LocationOption};
use thiserror::Error;
use web_sys::{AbortController, AbortSignal};

/// Failure of a single request attempt
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request timed out after {0}ms")]
    Timeout(u32),
    #[error("Server error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Failed to serialize request: {0}")]
    Encode(String),
}

/// Endpoints of the remote budgeting service
#[async_trait(?Send)]
pub trait BudgetApi {
    async fn continents(&self) -> Result<Vec<LocationOption>, ApiError>;

    async fn countries(&self, continent: &str) -> Result<Vec<LocationOption>, ApiError>;

    async fn cities(&self, continent: &str, country: &str) -> Result<Vec<LocationOption>, ApiError>;

    async fn submit_budget(&self, request: &BudgetRequest) -> Result<BudgetResult, ApiError>;

    async fn budget_history(&self, request: &HistoryRequest) -> Result<Vec<HistoryEntry>, ApiError>;
}

/// API client for communicating with the budgeting service
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    timeout_ms: u32,
}

impl ApiClient {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout_ms: config.timeout_ms,
        }
    }

    /// Build an endpoint URL, percent-encoding each path segment
    fn url(&self, path: &str, segments: &[&str]) -> String {
        let mut url = format!("{}/api/{}", self.base_url, path);
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        log::debug!(target: "api", "GET {}", url);
        let guard = TimeoutGuard::start(self.timeout_ms)?;
        let result = Request::get(url)
            .abort_signal(Some(guard.signal()))
            .send()
            .await;
        read_response(result, &guard).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T, ApiError> {
        log::debug!(target: "api", "POST {}", url);
        let guard = TimeoutGuard::start(self.timeout_ms)?;
        let request = Request::post(url)
            .abort_signal(Some(guard.signal()))
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let result = request.send().await;
        read_response(result, &guard).await
    }
}

#[async_trait(?Send)]
impl BudgetApi for ApiClient {
    async fn continents(&self) -> Result<Vec<LocationOption>, ApiError> {
        self.get_json(&self.url("continents", &[])).await
    }

    async fn countries(&self, continent: &str) -> Result<Vec<LocationOption>, ApiError> {
        self.get_json(&self.url("countries", &[continent])).await
    }

    async fn cities(&self, continent: &str, country: &str) -> Result<Vec<LocationOption>, ApiError> {
        self.get_json(&self.url("cities", &[continent, country])).await
    }

    async fn submit_budget(&self, request: &BudgetRequest) -> Result<BudgetResult, ApiError> {
        self.post_json(&self.url("budget", &[]), request).await
    }

    async fn budget_history(&self, request: &HistoryRequest) -> Result<Vec<HistoryEntry>, ApiError> {
        self.post_json(&self.url("budget/history", &[]), request).await
    }
}

/// Aborts the in-flight fetch once the timeout elapses; dropping it
/// cancels the timer.
struct TimeoutGuard {
    signal: AbortSignal,
    timeout_ms: u32,
    _timer: Timeout,
}

impl TimeoutGuard {
    fn start(timeout_ms: u32) -> Result<Self, ApiError> {
        let controller = AbortController::new()
            .map_err(|e| ApiError::Network(format!("Failed to create abort controller: {:?}", e)))?;
        let signal = controller.signal();
        let timer = Timeout::new(timeout_ms, move || controller.abort());
        Ok(Self {
            signal,
            timeout_ms,
            _timer: timer,
        })
    }

    fn signal(&self) -> &AbortSignal {
        &self.signal
    }

    fn expired(&self) -> bool {
        self.signal.aborted()
    }
}

async fn read_response<T: DeserializeOwned>(
    result: Result<Response, gloo::net::Error>,
    guard: &TimeoutGuard,
) -> Result<T, ApiError> {
    let response = result.map_err(|e| {
        if guard.expired() {
            ApiError::Timeout(guard.timeout_ms)
        } else {
            ApiError::Network(e.to_string())
        }
    })?;

    if !response.ok() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        log::warn!(target: "api", "{} returned {}", response.url(), status);
        return Err(ApiError::Status { status, body });
    }

    response.json::<T>().await.map_err(|e| {
        if guard.expired() {
            ApiError::Timeout(guard.timeout_ms)
        } else {
            ApiError::Decode(e.to_string())
        }
    })
}
