//! HTTP layer: status mapping and retry.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::TestApiConfig;
use crate::error::{TestApiError, TestApiResult};

use super::helpers::resource_label;

/// HTTP backend for making requests (holds reqwest client and config).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) config: TestApiConfig,
}

impl HttpBackend {
    /// GET a URL and return the body text.
    pub(crate) async fn get_text(&self, url: &str) -> TestApiResult<String> {
        let response = self.request(reqwest::Method::GET, url, None).await?;
        read_body(response).await
    }

    /// POST a JSON body and return the response body text.
    pub(crate) async fn post_json(&self, url: &str, body: &Value) -> TestApiResult<String> {
        let response = self
            .request(reqwest::Method::POST, url, Some(body))
            .await?;
        read_body(response).await
    }

    /// Make a request, retrying transient failures with jittered backoff.
    ///
    /// Only idempotent methods are retried. A POST is sent exactly once.
    pub(crate) async fn request(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&Value>,
    ) -> TestApiResult<reqwest::Response> {
        use rand::Rng;

        let mut retries = 0;
        let max_retries = if is_idempotent(&method) {
            self.config.max_retries
        } else {
            0
        };

        loop {
            let result = self.request_once(method.clone(), url, body).await;

            match result {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && retries < max_retries => {
                    retries += 1;

                    let backoff = match &e {
                        TestApiError::RateLimited {
                            retry_after: Some(retry_after),
                        } => {
                            let capped = (*retry_after).min(Duration::from_secs(30));
                            let base_ms = capped.as_millis() as u64;
                            let jitter_factor: f64 =
                                rand::thread_rng().gen_range(0.9_f64..=1.1_f64);
                            let jittered_ms = ((base_ms as f64) * jitter_factor).round() as u64;
                            Duration::from_millis(jittered_ms.max(100))
                        }
                        _ => {
                            let base_backoff = Duration::from_secs(1 << retries);
                            let base_backoff = base_backoff.min(Duration::from_secs(30));
                            let jittered_ms =
                                rand::thread_rng().gen_range(0..=base_backoff.as_millis() as u64);
                            Duration::from_millis(jittered_ms.max(10))
                        }
                    };

                    warn!(
                        error = %e,
                        retry = retries,
                        max_retries = max_retries,
                        backoff_ms = backoff.as_millis(),
                        "retrying request"
                    );

                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn request_once(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&Value>,
    ) -> TestApiResult<reqwest::Response> {
        let mut request = self.client.request(method, url);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(url, status = status.as_u16(), "response received");

        match status.as_u16() {
            200..=299 => Ok(response),

            404 => Err(TestApiError::NotFound {
                resource: resource_label(url),
            }),

            429 => {
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .map(Duration::from_secs);

                Err(TestApiError::RateLimited { retry_after })
            }

            500..=599 => {
                let message = response.text().await.unwrap_or_else(|_| status.to_string());
                Err(TestApiError::Network {
                    message: format!("HTTP {}: {}", status.as_u16(), message),
                })
            }

            _ => {
                let message = response.text().await.unwrap_or_else(|_| status.to_string());
                Err(TestApiError::InvalidResponse {
                    message: format!("HTTP {}: {}", status.as_u16(), message),
                })
            }
        }
    }
}

fn is_idempotent(method: &reqwest::Method) -> bool {
    matches!(
        *method,
        reqwest::Method::GET | reqwest::Method::HEAD | reqwest::Method::PUT | reqwest::Method::DELETE
    )
}

async fn read_body(response: reqwest::Response) -> TestApiResult<String> {
    response.text().await.map_err(|e| TestApiError::Network {
        message: format!("failed to read response body: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_is_not_idempotent() {
        assert!(is_idempotent(&reqwest::Method::GET));
        assert!(!is_idempotent(&reqwest::Method::POST));
    }
}
