//! HTTP transport for the hosting-provider clients.
//!
//! Wraps a [`reqwest::Client`] with bearer authentication, the provider's
//! JSON media type, automatic retry with exponential backoff, and error
//! response parsing into [`ApiError`].

use std::time::Duration;

use rand::thread_rng;
use rand::Rng;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Default base URL for the GitHub REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// GitHub rejects requests without a user agent.
const USER_AGENT: &str = concat!("gitbot/", env!("CARGO_PKG_VERSION"));

/// Configuration for automatic retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Base backoff factor for exponential backoff
    pub backoff_factor: f64,
    /// Status codes that trigger retry
    pub retry_on: Vec<u16>,
    /// Whether to respect Retry-After header
    pub respect_retry_after: bool,
    /// Maximum backoff time in seconds
    pub max_backoff: f64,
    /// Jitter factor (0.1 = ±10%)
    pub jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: 2.0,
            retry_on: vec![429, 500, 502, 503],
            respect_retry_after: true,
            max_backoff: 60.0,
            jitter: 0.1,
        }
    }
}

/// HTTP transport layer with automatic authentication and retry logic.
///
/// Handles:
/// - Bearer authentication and the provider media-type headers
/// - Exponential backoff with jitter for retries
/// - Retry-After header respect for rate limiting
/// - Error response parsing into typed errors
pub struct HttpTransport {
    base_url: String,
    token: String,
    client: Client,
    retry_config: RetryConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL for API requests (e.g., "<https://api.github.com>")
    /// * `token` - Provider access token
    /// * `timeout` - Request timeout
    /// * `retry_config` - Configuration for retry behavior
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        base_url: &str,
        token: &str,
        timeout: Duration,
        retry_config: Option<RetryConfig>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client,
            retry_config: retry_config.unwrap_or_default(),
        })
    }

    /// GET `path` and deserialize the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for any non-success status.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute_with_retry(Method::GET, path, None).await?;
        if !response.status().is_success() {
            return Err(self.parse_error_response(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Http(format!("failed to parse response body: {e}")))
    }

    /// GET `path` where the listed non-success statuses are part of the
    /// answer rather than failures. Membership probes encode their result
    /// in the status code.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for any non-success status not in `allow`.
    pub async fn get_status(
        &self,
        path: &str,
        allow: &[StatusCode],
    ) -> Result<StatusCode, ApiError> {
        let response = self.execute_with_retry(Method::GET, path, None).await?;
        let status = response.status();
        if status.is_success() || allow.contains(&status) {
            return Ok(status);
        }

        Err(self.parse_error_response(response).await)
    }

    /// PUT a JSON `body` to `path`, returning the response status.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for any non-success status.
    pub async fn put_json(&self, path: &str, body: &Value) -> Result<StatusCode, ApiError> {
        let response = self.execute_with_retry(Method::PUT, path, Some(body)).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(status);
        }

        Err(self.parse_error_response(response).await)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
    }

    /// Issue a request, retrying retryable failures, and return the final
    /// response whatever its status.
    async fn execute_with_retry(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response, ApiError> {
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..=self.retry_config.max_retries {
            let mut request = self.request(method.clone(), path);
            if let Some(b) = body {
                request = request.header("Content-Type", "application/json").json(b);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if !self.should_retry(status.as_u16(), attempt) {
                        return Ok(response);
                    }

                    let error = self.parse_error_response(response).await;
                    let retry_after = error.retry_after();
                    last_error = Some(error);

                    let wait_time = self.backoff_time(attempt, retry_after);
                    tokio::time::sleep(Duration::from_secs_f64(wait_time)).await;
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt >= self.retry_config.max_retries {
                        return Err(ApiError::Http(e.to_string()));
                    }

                    last_error = Some(ApiError::Http(e.to_string()));
                    let wait_time = self.backoff_time(attempt, None);
                    tokio::time::sleep(Duration::from_secs_f64(wait_time)).await;
                }
            }
        }

        // Should not reach here, but just in case
        Err(last_error
            .unwrap_or_else(|| ApiError::Http("request failed after maximum retries".to_string())))
    }

    /// Determine if a request should be retried.
    fn should_retry(&self, status_code: u16, attempt: u32) -> bool {
        if attempt >= self.retry_config.max_retries {
            return false;
        }

        self.retry_config.retry_on.contains(&status_code)
    }

    /// Calculate backoff time for retry.
    ///
    /// Uses exponential backoff with jitter, respecting Retry-After if
    /// present.
    fn backoff_time(&self, attempt: u32, retry_after: Option<u32>) -> f64 {
        if let Some(ra) = retry_after {
            if self.retry_config.respect_retry_after {
                return f64::from(ra);
            }
        }

        // Exponential backoff: backoff_factor ^ attempt
        let base_wait = self.retry_config.backoff_factor.powi(attempt as i32);

        // Apply jitter (±jitter%) if jitter is non-zero
        let wait_time = if self.retry_config.jitter > 0.0 {
            let jitter_range = base_wait * self.retry_config.jitter;
            let mut rng = thread_rng();
            let jitter = rng.gen_range(-jitter_range..jitter_range);
            base_wait + jitter
        } else {
            base_wait
        };

        wait_time.min(self.retry_config.max_backoff)
    }

    /// Parse an error response into a typed error.
    async fn parse_error_response(&self, response: Response) -> ApiError {
        let status = response.status();
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());

        let data: Value = response
            .json()
            .await
            .unwrap_or_else(|_| serde_json::json!({}));

        let message = data
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or(&format!("HTTP {}", status.as_u16()))
            .to_string();

        match status {
            StatusCode::UNAUTHORIZED => ApiError::Authentication { message },
            StatusCode::FORBIDDEN => ApiError::Forbidden { message },
            StatusCode::NOT_FOUND => ApiError::NotFound { message },
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited {
                message,
                retry_after: retry_after.unwrap_or(60),
            },
            s if s.is_server_error() => ApiError::Server {
                message,
                status: s.as_u16(),
            },
            _ => ApiError::Validation { message },
        }
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_config_default() {
        let config = RetryConfig::default();

        assert_eq!(config.max_retries, 3);
        assert!((config.backoff_factor - 2.0).abs() < f64::EPSILON);
        assert!(config.retry_on.contains(&429));
        assert!(config.retry_on.contains(&500));
        assert!(config.retry_on.contains(&502));
        assert!(config.retry_on.contains(&503));
    }

    #[test]
    fn test_should_retry() {
        let transport = create_test_transport(RetryConfig::default());

        // Should retry on 429
        assert!(transport.should_retry(429, 0));
        assert!(transport.should_retry(429, 1));
        assert!(transport.should_retry(429, 2));
        assert!(!transport.should_retry(429, 3)); // Max retries reached

        // Should retry on 5xx
        assert!(transport.should_retry(500, 0));
        assert!(transport.should_retry(502, 0));
        assert!(transport.should_retry(503, 0));

        // Should NOT retry on 4xx (except 429)
        assert!(!transport.should_retry(401, 0));
        assert!(!transport.should_retry(403, 0));
        assert!(!transport.should_retry(404, 0));
        assert!(!transport.should_retry(422, 0));
    }

    #[test]
    fn test_backoff_time_exponential() {
        let config = RetryConfig {
            backoff_factor: 2.0,
            jitter: 0.0, // No jitter for deterministic test
            max_backoff: 60.0,
            ..Default::default()
        };
        let transport = create_test_transport(config);

        assert!((transport.backoff_time(0, None) - 1.0).abs() < 0.01);
        assert!((transport.backoff_time(1, None) - 2.0).abs() < 0.01);
        assert!((transport.backoff_time(2, None) - 4.0).abs() < 0.01);
        assert!((transport.backoff_time(3, None) - 8.0).abs() < 0.01);
    }

    #[test]
    fn test_backoff_time_respects_retry_after() {
        let config = RetryConfig {
            respect_retry_after: true,
            ..Default::default()
        };
        let transport = create_test_transport(config);

        assert!((transport.backoff_time(0, Some(30)) - 30.0).abs() < 0.01);
    }

    #[test]
    fn test_backoff_time_capped_at_max() {
        let config = RetryConfig {
            backoff_factor: 10.0,
            jitter: 0.0,
            max_backoff: 30.0,
            ..Default::default()
        };
        let transport = create_test_transport(config);

        // 10^3 = 1000, but should be capped at 30
        assert!((transport.backoff_time(3, None) - 30.0).abs() < 0.01);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let transport = HttpTransport::new(
            "https://api.github.com/",
            "test-token",
            Duration::from_secs(30),
            None,
        )
        .expect("transport creation should succeed");

        assert_eq!(transport.base_url(), "https://api.github.com");
    }

    fn create_test_transport(config: RetryConfig) -> HttpTransport {
        HttpTransport::new(
            "https://api.github.com",
            "test-token",
            Duration::from_secs(30),
            Some(config),
        )
        .expect("transport creation should succeed")
    }
}
