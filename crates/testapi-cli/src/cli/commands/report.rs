use std::fmt::Write as _;

use testapi_report::{Bucket, ClassifiedResult, Report, TestApiClient, TestApiConfig};

use crate::cli::args::{OutputFormat, ReportArgs};
use crate::exit_codes::{INCOMPLETE_REPORT, SUCCESS};

pub async fn run(args: ReportArgs, config: TestApiConfig) -> anyhow::Result<i32> {
    let mut config = config;
    if let Some(project) = &args.project {
        config = config.with_project(project);
    }
    if let Some(n) = args.concurrency {
        config = config.with_max_concurrent_fetches(n);
    }

    let client = TestApiClient::new(config.clone())?;
    let mut report = Report::build(
        &client,
        &config.project,
        &args.run_id,
        config.max_concurrent_fetches,
    )
    .await?;

    if args.expand {
        report.expand_all();
    }

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if args.strict && !report.is_complete() {
        return Ok(INCOMPLETE_REPORT);
    }
    Ok(SUCCESS)
}

fn verdict(result: &ClassifiedResult) -> &'static str {
    if !result.is_counted() {
        "SKIP"
    } else if result.fail == 0 {
        "PASS"
    } else {
        "FAIL"
    }
}

fn label(result: &ClassifiedResult) -> &str {
    result
        .raw
        .case_name()
        .unwrap_or(result.raw.build_tag.as_str())
}

/// Human-readable report: one line per result, then bucket totals.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Test run {}", report.run_id);

    for result in &report.cases {
        let _ = writeln!(
            out,
            "  [{:<9}] {:<4} {:>3}/{:<3} {} ({})",
            result.bucket,
            verdict(result),
            result.pass,
            result.total,
            label(result),
            result.raw.project_name
        );
        if !result.folded {
            for case in &result.success_cases {
                let _ = writeln!(out, "      + {case}");
            }
            for case in &result.error_cases {
                let _ = writeln!(out, "      - {case}");
            }
        }
    }

    let s = &report.summary;
    for bucket in [Bucket::Mandatory, Bucket::Optional] {
        let (total, pass, fail) = s.bucket(bucket);
        let _ = writeln!(
            out,
            "{:<10} total {total}, pass {pass}, fail {fail}",
            format!("{bucket}:")
        );
    }
    let _ = writeln!(
        out,
        "{:<10} total {}, pass {}, fail {}",
        "all:",
        s.total,
        s.pass(),
        s.fail()
    );

    if !report.failures.is_empty() {
        let _ = writeln!(
            out,
            "Could not fetch {} case(s):",
            report.failures.len()
        );
        for failure in &report.failures {
            let _ = writeln!(out, "  {}: {}", failure.case, failure.error);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use testapi_report::{RawResult, TestApiError};

    fn sample_report() -> Report {
        let mut report = Report::new("42");
        report.ingest(
            "dovetail.ha.tc001",
            vec![RawResult::new("functest", "daily-master-42-dovetail.ha.tc001")
                .with_details(json!({"success": "a,b,", "errors": "c,"}))],
        );
        report.ingest(
            "dovetail.tempest.tc001",
            vec![
                RawResult::new("functest", "daily-master-42-dovetail.tempest.tc001")
                    .with_criteria("PASS"),
            ],
        );
        report
    }

    #[test]
    fn test_render_text_lines_and_totals() {
        let text = render_text(&sample_report());

        assert!(text.starts_with("Test run 42\n"));
        assert!(text.contains("[mandatory] FAIL   2/3   daily-master-42-dovetail.ha.tc001 (functest)"));
        assert!(text.contains("[optional ] PASS   1/1   daily-master-42-dovetail.tempest.tc001 (functest)"));
        assert!(text.contains("mandatory: total 3, pass 2, fail 1"));
        assert!(text.contains("optional:  total 1, pass 1, fail 0"));
        assert!(text.contains("all:       total 4, pass 3, fail 1"));
        assert!(!text.contains("Could not fetch"));
        // folded results hide sub-cases
        assert!(!text.contains("+ a"));
    }

    #[test]
    fn test_render_text_expanded_and_failures() {
        let mut report = sample_report();
        report.expand_all();
        report.record_failure(
            "dovetail.ipv6.tc001",
            &TestApiError::Network {
                message: "HTTP 500: db down".into(),
            },
        );

        let text = render_text(&report);
        assert!(text.contains("      + a\n      + b\n      - c\n"));
        assert!(text.contains("Could not fetch 1 case(s):"));
        assert!(text.contains("  dovetail.ipv6.tc001: network error: HTTP 500: db down"));
    }

    #[test]
    fn test_verdict_for_uncounted_result() {
        let mut report = Report::new("1");
        report.ingest("x", vec![RawResult::new("yardstick", "t-1.ha")]);
        assert_eq!(verdict(&report.cases[0]), "SKIP");
    }
}
