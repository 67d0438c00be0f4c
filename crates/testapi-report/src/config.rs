//! Client configuration.

use serde::{Deserialize, Serialize};

/// TestAPI client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestApiConfig {
    /// Base URL of the TestAPI, including the `/api/v1` prefix.
    #[serde(default = "default_url")]
    pub url: String,

    /// Project whose case list drives a report.
    #[serde(default = "default_project")]
    pub project: String,

    /// Prefix of the build tags results are stored under.
    #[serde(default = "default_build_tag_prefix")]
    pub build_tag_prefix: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries for transient failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Upper bound on result fetches in flight while building a report.
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
}

fn default_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

fn default_project() -> String {
    "dovetail".to_string()
}

fn default_build_tag_prefix() -> String {
    "daily-master".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_max_concurrent_fetches() -> usize {
    8
}

impl Default for TestApiConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            project: default_project(),
            build_tag_prefix: default_build_tag_prefix(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
        }
    }
}

impl TestApiConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `TESTAPI_URL` | API base URL |
    /// | `TESTAPI_PROJECT` | Project to list cases for |
    /// | `TESTAPI_BUILD_TAG_PREFIX` | Build tag prefix |
    /// | `TESTAPI_TIMEOUT` | Request timeout in seconds |
    /// | `TESTAPI_MAX_RETRIES` | Retries for transient failures |
    /// | `TESTAPI_MAX_CONCURRENT_FETCHES` | Concurrent result fetches |
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("TESTAPI_URL").unwrap_or_else(|_| default_url()),
            project: std::env::var("TESTAPI_PROJECT").unwrap_or_else(|_| default_project()),
            build_tag_prefix: std::env::var("TESTAPI_BUILD_TAG_PREFIX")
                .unwrap_or_else(|_| default_build_tag_prefix()),
            timeout_secs: std::env::var("TESTAPI_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
            max_retries: std::env::var("TESTAPI_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_max_retries),
            max_concurrent_fetches: std::env::var("TESTAPI_MAX_CONCURRENT_FETCHES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or_else(default_max_concurrent_fetches),
        }
    }

    /// Set the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the project.
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    /// Set the build tag prefix.
    pub fn with_build_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.build_tag_prefix = prefix.into();
        self
    }

    /// Set the retry budget.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the fetch concurrency. Zero is raised to one.
    pub fn with_max_concurrent_fetches(mut self, n: usize) -> Self {
        self.max_concurrent_fetches = n.max(1);
        self
    }

    /// Build tag results of `case` in run `run_id` are stored under.
    pub fn build_tag(&self, run_id: &str, case: &str) -> String {
        format!("{}-{}-{}", self.build_tag_prefix, run_id, case)
    }
}
