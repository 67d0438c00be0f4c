//! Report for one test run: classified results, totals, and fetch failures.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::classify::classify;
use crate::error::{TestApiError, TestApiResult};
use crate::model::{ClassifiedResult, RawResult};
use crate::source::ResultSource;
use crate::summary::Summary;

/// A case whose results could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseFailure {
    pub case: String,
    pub error: String,
}

/// Classified results of a test run, in arrival order, with their totals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub run_id: String,
    pub summary: Summary,
    pub cases: Vec<ClassifiedResult>,
    pub failures: Vec<CaseFailure>,
}

impl Report {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            ..Self::default()
        }
    }

    /// Fetch every case of `project` for `run_id` and fold the results in.
    ///
    /// Up to `concurrency` fetches run at once and are ingested as they
    /// complete. A failed fetch is recorded in `failures` and does not stop
    /// the others; only failing to list the cases is an error.
    pub async fn build<S>(
        source: &S,
        project: &str,
        run_id: &str,
        concurrency: usize,
    ) -> TestApiResult<Self>
    where
        S: ResultSource + ?Sized,
    {
        let cases = source.list_cases(project).await?;
        debug!(project, run_id, cases = cases.len(), "building report");

        let mut report = Self::new(run_id);
        let mut fetches = stream::iter(cases)
            .map(|case| async move {
                let outcome = source.fetch_results(run_id, &case).await;
                (case, outcome)
            })
            .buffer_unordered(concurrency.max(1));

        while let Some((case, outcome)) = fetches.next().await {
            match outcome {
                Ok(results) => report.ingest(&case, results),
                Err(e) => report.record_failure(&case, &e),
            }
        }

        info!(
            run_id,
            results = report.cases.len(),
            failed_cases = report.failures.len(),
            total = report.summary.total,
            "report built"
        );
        Ok(report)
    }

    /// Classify and count one case's results.
    pub fn ingest(&mut self, case: &str, results: Vec<RawResult>) {
        debug!(case, results = results.len(), "ingesting results");
        for raw in results {
            let classified = classify(raw);
            self.summary = self.summary.accumulate(&classified);
            self.cases.push(classified);
        }
    }

    pub fn record_failure(&mut self, case: &str, error: &TestApiError) {
        warn!(case, error = %error, "failed to fetch case results");
        self.failures.push(CaseFailure {
            case: case.to_string(),
            error: error.to_string(),
        });
    }

    /// Unfold every result.
    pub fn expand_all(&mut self) {
        for c in &mut self.cases {
            c.folded = false;
        }
    }

    /// Fold every result.
    pub fn collapse_all(&mut self) {
        for c in &mut self.cases {
            c.folded = true;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Bucket;
    use crate::summary::summarize;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    struct StaticSource {
        cases: Vec<String>,
        results: HashMap<String, Vec<RawResult>>,
        delays: HashMap<String, u64>,
    }

    impl StaticSource {
        fn new() -> Self {
            Self {
                cases: Vec::new(),
                results: HashMap::new(),
                delays: HashMap::new(),
            }
        }

        fn case(mut self, name: &str, results: Vec<RawResult>) -> Self {
            self.cases.push(name.to_string());
            self.results.insert(name.to_string(), results);
            self
        }

        fn missing_case(mut self, name: &str) -> Self {
            self.cases.push(name.to_string());
            self
        }

        fn delayed(mut self, name: &str, ms: u64) -> Self {
            self.delays.insert(name.to_string(), ms);
            self
        }
    }

    #[async_trait]
    impl ResultSource for StaticSource {
        async fn list_cases(&self, project: &str) -> TestApiResult<Vec<String>> {
            if project == "dovetail" {
                Ok(self.cases.clone())
            } else {
                Err(TestApiError::NotFound {
                    resource: format!("project {project}"),
                })
            }
        }

        async fn fetch_results(&self, _run_id: &str, case: &str) -> TestApiResult<Vec<RawResult>> {
            if let Some(ms) = self.delays.get(case) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            self.results
                .get(case)
                .cloned()
                .ok_or_else(|| TestApiError::Network {
                    message: "connection reset".to_string(),
                })
        }
    }

    fn functest(tag: &str, details: serde_json::Value) -> RawResult {
        RawResult::new("functest", format!("daily-master-42-{tag}")).with_details(details)
    }

    #[tokio::test]
    async fn test_build_counts_all_cases() {
        let source = StaticSource::new()
            .case(
                "dovetail.ha.tc001",
                vec![functest("dovetail.ha.tc001", json!({"success": "a,b,"}))],
            )
            .case(
                "dovetail.tempest.tc002",
                vec![functest(
                    "dovetail.tempest.tc002",
                    json!({"success": "a,", "errors": "b,c,"}),
                )],
            );

        let report = Report::build(&source, "dovetail", "42", 4).await.unwrap();

        assert_eq!(report.run_id, "42");
        assert_eq!(report.cases.len(), 2);
        assert!(report.is_complete());
        assert_eq!(report.summary.total, 5);
        assert_eq!(report.summary.bucket(Bucket::Mandatory), (2, 2, 0));
        assert_eq!(report.summary.bucket(Bucket::Optional), (3, 1, 2));
    }

    #[tokio::test]
    async fn test_build_records_failed_case_and_continues() {
        let source = StaticSource::new()
            .missing_case("dovetail.vping.tc001")
            .case(
                "dovetail.defcore.tc001",
                vec![functest("dovetail.defcore.tc001", json!({})).with_criteria("PASS")],
            );

        let report = Report::build(&source, "dovetail", "42", 2).await.unwrap();

        assert_eq!(report.cases.len(), 1);
        assert_eq!(report.summary.mandatory_pass, 1);
        assert_eq!(
            report.failures,
            vec![CaseFailure {
                case: "dovetail.vping.tc001".to_string(),
                error: "network error: connection reset".to_string(),
            }]
        );
        assert!(!report.is_complete());
    }

    #[tokio::test]
    async fn test_build_fails_when_case_list_unavailable() {
        let source = StaticSource::new();
        let err = Report::build(&source, "unknown", "42", 2).await.unwrap_err();
        assert!(matches!(err, TestApiError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_build_ingests_in_completion_order() {
        let source = StaticSource::new()
            .case("slow.ha.a", vec![functest("slow.ha.a", json!({"success": "a,"}))])
            .delayed("slow.ha.a", 50)
            .case("fast.smoke.b", vec![functest("fast.smoke.b", json!({"errors": "b,"}))]);

        let report = Report::build(&source, "dovetail", "42", 2).await.unwrap();

        assert_eq!(report.cases[0].bucket, Bucket::Optional);
        assert_eq!(report.cases[1].bucket, Bucket::Mandatory);
        assert_eq!(report.summary, summarize(report.cases.iter().rev()));
    }

    #[test]
    fn test_ingest_accumulates_per_result() {
        let mut report = Report::new("7");
        report.ingest(
            "dovetail.ha.tc001",
            vec![
                functest("x.ha.1", json!({"success": "a,"})),
                functest("x.ha.1", json!({"success": "a,"})),
            ],
        );
        // repeated records add again
        assert_eq!(report.summary.mandatory_total, 2);
        assert_eq!(report.cases.len(), 2);
    }

    #[test]
    fn test_expand_and_collapse_all() {
        let mut report = Report::new("7");
        report.ingest(
            "c",
            vec![functest("x.ha.1", json!({})), functest("x.smoke.1", json!({}))],
        );
        assert!(report.cases.iter().all(|c| c.folded));

        report.expand_all();
        assert!(report.cases.iter().all(|c| !c.folded));

        report.collapse_all();
        assert!(report.cases.iter().all(|c| c.folded));
    }
}
