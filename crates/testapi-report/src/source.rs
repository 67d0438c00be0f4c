//! Where case lists and result records come from.

use async_trait::async_trait;

use crate::error::TestApiResult;
use crate::model::RawResult;

/// Provider of case names and raw results for a test run.
///
/// [`crate::TestApiClient`] implements this over HTTP; tests can supply
/// in-memory sources.
#[async_trait]
pub trait ResultSource: Send + Sync {
    /// Names of the test cases registered for `project`.
    async fn list_cases(&self, project: &str) -> TestApiResult<Vec<String>>;

    /// Result records of `case` in run `run_id`.
    async fn fetch_results(&self, run_id: &str, case: &str) -> TestApiResult<Vec<RawResult>>;
}
