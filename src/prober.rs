//! Endpoint health probing
//!
//! One probe is one HTTP request against one configured endpoint. The result
//! is always a two-way classification; transport failures never escape the
//! prober.

use crate::config::EndpointSpec;
use crate::errors::{MonitorError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use std::fmt;
use std::time::{Duration, Instant};

/// Fixed per-request timeout
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Latency budget for a healthy response, in milliseconds
pub const LATENCY_BUDGET_MS: u64 = 500;

/// Outcome of a single health check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    Up,
    Down,
}

impl CheckResult {
    pub fn is_up(&self) -> bool {
        matches!(self, CheckResult::Up)
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckResult::Up => write!(f, "UP"),
            CheckResult::Down => write!(f, "DOWN"),
        }
    }
}

/// Health check capability for a single endpoint
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe one endpoint. Total from the caller's view: always classifies,
    /// never errors.
    async fn check(&self, endpoint: &EndpointSpec) -> CheckResult;
}

/// What a dispatched request came back with
#[derive(Debug)]
struct ProbeOutcome {
    status: StatusCode,
    elapsed_ms: u64,
}

/// Prober issuing real HTTP requests with a fixed timeout
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(PROBE_TIMEOUT)
            .user_agent(format!("uptime_monitor/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(MonitorError::Http)?;

        Ok(Self { client })
    }

    /// Issue the request and time it, surfacing every failure as an error
    async fn dispatch(&self, endpoint: &EndpointSpec) -> Result<ProbeOutcome> {
        let method = Method::from_bytes(endpoint.method.to_uppercase().as_bytes())
            .map_err(|_| MonitorError::Config(format!("invalid HTTP method: {}", endpoint.method)))?;

        let mut request = self.client.request(method, &endpoint.url);

        for (key, value) in &endpoint.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        if let Some(body) = &endpoint.body {
            request = request.json(body);
        }

        let started = Instant::now();
        let response = request.send().await?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        Ok(ProbeOutcome {
            status: response.status(),
            elapsed_ms,
        })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn check(&self, endpoint: &EndpointSpec) -> CheckResult {
        // The single boundary where every failure variant collapses to DOWN.
        match self.dispatch(endpoint).await {
            Ok(outcome) if outcome.status.is_success() && outcome.elapsed_ms <= LATENCY_BUDGET_MS => {
                CheckResult::Up
            }
            Ok(_) => CheckResult::Down,
            Err(_) => CheckResult::Down,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn endpoint(url: String) -> EndpointSpec {
        EndpointSpec {
            url,
            name: None,
            method: "GET".to_string(),
            headers: HashMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_fast_success_is_up() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let prober = HttpProber::new().unwrap();
        let result = prober.check(&endpoint(format!("{}/health", server.uri()))).await;

        assert_eq!(result, CheckResult::Up);
    }

    #[tokio::test]
    async fn test_non_success_status_is_down() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let prober = HttpProber::new().unwrap();
        let result = prober.check(&endpoint(format!("{}/health", server.uri()))).await;

        assert_eq!(result, CheckResult::Down);
    }

    #[tokio::test]
    async fn test_slow_success_is_down() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(600)))
            .mount(&server)
            .await;

        let prober = HttpProber::new().unwrap();
        let result = prober.check(&endpoint(format!("{}/health", server.uri()))).await;

        assert_eq!(result, CheckResult::Down);
    }

    #[tokio::test]
    async fn test_slow_server_error_is_down() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503).set_delay(Duration::from_millis(600)))
            .mount(&server)
            .await;

        let prober = HttpProber::new().unwrap();
        let result = prober.check(&endpoint(format!("{}/health", server.uri()))).await;

        assert_eq!(result, CheckResult::Down);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_down() {
        let server = MockServer::start().await;
        let url = format!("{}/health", server.uri());
        drop(server);

        let prober = HttpProber::new().unwrap();
        let result = prober.check(&endpoint(url)).await;

        assert_eq!(result, CheckResult::Down);
    }

    #[tokio::test]
    async fn test_invalid_method_is_down() {
        let server = MockServer::start().await;

        let mut target = endpoint(format!("{}/health", server.uri()));
        target.method = "NOT A METHOD".to_string();

        let prober = HttpProber::new().unwrap();
        let result = prober.check(&target).await;

        assert_eq!(result, CheckResult::Down);
    }

    #[tokio::test]
    async fn test_request_carries_method_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .and(header("X-Api-Key", "secret"))
            .and(body_json(serde_json::json!({"ping": true})))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let mut target = endpoint(format!("{}/submit", server.uri()));
        target.method = "post".to_string();
        target.headers.insert("X-Api-Key".to_string(), "secret".to_string());
        target.body = Some(serde_json::json!({"ping": true}));

        let prober = HttpProber::new().unwrap();
        let result = prober.check(&target).await;

        // Lower-case method is normalized before dispatch; 204 is in range
        assert_eq!(result, CheckResult::Up);
    }
}
