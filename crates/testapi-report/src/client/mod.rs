//! TestAPI client for case lists, results, and applications.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;
use url::Url;

use crate::application::{Application, NewApplication};
use crate::config::TestApiConfig;
use crate::error::{TestApiError, TestApiResult};
use crate::model::RawResult;
use crate::source::ResultSource;

mod helpers;
mod http;

use helpers::{endpoint, parse_base_url, parse_case_names, parse_results};
use http::HttpBackend;

/// User-Agent sent with every request.
pub const TESTAPI_USER_AGENT: &str = concat!("testapi-report/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, serde::Deserialize)]
struct ApplicationsResponse {
    #[serde(default)]
    applications: Vec<Application>,
}

/// HTTP client for the TestAPI.
#[derive(Debug, Clone)]
pub struct TestApiClient {
    http: HttpBackend,
    base_url: Url,
}

impl TestApiClient {
    pub fn new(config: TestApiConfig) -> TestApiResult<Self> {
        let base_url = parse_base_url(&config.url)?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(TESTAPI_USER_AGENT));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| TestApiError::Network {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http: HttpBackend { client, config },
            base_url,
        })
    }

    pub fn from_env() -> TestApiResult<Self> {
        Self::new(TestApiConfig::from_env())
    }

    pub fn config(&self) -> &TestApiConfig {
        &self.http.config
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Case names registered for `project`.
    pub async fn list_cases(&self, project: &str) -> TestApiResult<Vec<String>> {
        let url = endpoint(&self.base_url, &["projects", project, "cases"]);
        debug!(url = %url, "listing cases");

        let body = self.http.get_text(url.as_str()).await?;
        parse_case_names(&body)
    }

    /// Result records stored under the build tag of `case` in `run_id`.
    pub async fn fetch_results(&self, run_id: &str, case: &str) -> TestApiResult<Vec<RawResult>> {
        let build_tag = self.config().build_tag(run_id, case);
        let mut url = endpoint(&self.base_url, &["results"]);
        url.query_pairs_mut().append_pair("build_tag", &build_tag);
        debug!(url = %url, "fetching results");

        let body = self.http.get_text(url.as_str()).await?;
        parse_results(&body)
    }

    /// All submitted applications.
    pub async fn list_applications(&self) -> TestApiResult<Vec<Application>> {
        let url = endpoint(&self.base_url, &["cvp", "applications"]);
        debug!(url = %url, "listing applications");

        let body = self.http.get_text(url.as_str()).await?;
        let parsed: ApplicationsResponse =
            serde_json::from_str(&body).map_err(|e| TestApiError::InvalidResponse {
                message: format!("failed to parse applications: {}", e),
            })?;
        Ok(parsed.applications)
    }

    /// Submit a new application.
    pub async fn submit_application(&self, application: &NewApplication) -> TestApiResult<()> {
        let url = endpoint(&self.base_url, &["cvp", "applications"]);
        debug!(url = %url, product = %application.product_name, "submitting application");

        let body = serde_json::to_value(application).map_err(|e| TestApiError::Config {
            message: format!("failed to encode application: {}", e),
        })?;
        self.http.post_json(url.as_str(), &body).await?;
        Ok(())
    }
}

#[async_trait]
impl ResultSource for TestApiClient {
    async fn list_cases(&self, project: &str) -> TestApiResult<Vec<String>> {
        TestApiClient::list_cases(self, project).await
    }

    async fn fetch_results(&self, run_id: &str, case: &str) -> TestApiResult<Vec<RawResult>> {
        TestApiClient::fetch_results(self, run_id, case).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_url() {
        let config = TestApiConfig::default().with_url("::nope::");
        assert!(matches!(
            TestApiClient::new(config),
            Err(TestApiError::Config { .. })
        ));
    }

    #[test]
    fn test_base_url_normalized() {
        let client =
            TestApiClient::new(TestApiConfig::default().with_url("http://testapi.example:8000"))
                .unwrap();
        assert_eq!(client.base_url(), "http://testapi.example:8000/");
    }

    #[test]
    fn test_user_agent_has_version() {
        assert!(TESTAPI_USER_AGENT.starts_with("testapi-report/"));
    }
}
