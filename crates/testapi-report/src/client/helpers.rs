//! Pure helpers: URL building and response body parsing (no HTTP, no status logic).

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use url::Url;

use crate::error::{TestApiError, TestApiResult};
use crate::model::RawResult;

/// Parse and validate the configured base URL.
pub(crate) fn parse_base_url(base: &str) -> TestApiResult<Url> {
    let url = Url::parse(base).map_err(|e| TestApiError::Config {
        message: format!("invalid base url {base:?}: {e}"),
    })?;
    if url.cannot_be_a_base() {
        return Err(TestApiError::Config {
            message: format!("base url {base:?} cannot carry a path"),
        });
    }
    Ok(url)
}

/// Append path segments to the base URL. Segments are percent-encoded.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Resource label for errors: the URL path plus query.
pub(crate) fn resource_label(url: &str) -> String {
    match Url::parse(url) {
        Ok(u) => match u.query() {
            Some(q) => format!("{}?{}", u.path(), q),
            None => u.path().to_string(),
        },
        Err(_) => url.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct CaseEntry {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CasesResponse {
    #[serde(default)]
    testcases: Vec<CaseEntry>,
}

#[derive(Debug, Deserialize)]
struct ResultsResponse {
    #[serde(default)]
    results: Vec<Value>,
}

/// Parse `{"testcases": [{"name": ...}]}` into case names. Unnamed entries are dropped.
pub(crate) fn parse_case_names(body: &str) -> TestApiResult<Vec<String>> {
    let parsed: CasesResponse =
        serde_json::from_str(body).map_err(|e| TestApiError::InvalidResponse {
            message: format!("failed to parse case list: {e}"),
        })?;
    Ok(parsed
        .testcases
        .into_iter()
        .filter_map(|c| c.name)
        .collect())
}

/// Parse `{"results": [...]}`. Entries that are not result objects are skipped.
pub(crate) fn parse_results(body: &str) -> TestApiResult<Vec<RawResult>> {
    let parsed: ResultsResponse =
        serde_json::from_str(body).map_err(|e| TestApiError::InvalidResponse {
            message: format!("failed to parse results: {e}"),
        })?;

    let mut results = Vec::with_capacity(parsed.results.len());
    for (index, value) in parsed.results.into_iter().enumerate() {
        match serde_json::from_value::<RawResult>(value) {
            Ok(r) => results.push(r),
            Err(e) => warn!(index, error = %e, "skipping malformed result record"),
        }
    }
    Ok(results)
}
