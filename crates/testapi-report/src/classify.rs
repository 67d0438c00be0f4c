//! Per-record pass/fail derivation.

use tracing::debug;

use crate::category::Bucket;
use crate::model::{
    sla_passed, split_sub_cases, ClassifiedResult, GenericDetails, RawResult, ResultDetails,
    YardstickDetails, CRITERIA_FAILED, CRITERIA_PASS, DERIVED_KEYS,
};

/// Derive total/pass/fail counts and the summary bucket for one record.
///
/// Never fails: missing details count as no sub-case data and an
/// unparseable build tag falls back to [`Bucket::Optional`].
pub fn classify(mut raw: RawResult) -> ClassifiedResult {
    let bucket = Bucket::for_build_tag(&raw.build_tag);

    let outcome = match raw.details() {
        ResultDetails::Yardstick(details) => classify_yardstick(details),
        ResultDetails::Generic(details) => classify_generic(details, raw.criteria_passed()),
    };

    if let Some(criteria) = outcome.criteria {
        raw.criteria = Some(criteria.to_string());
    }

    for key in DERIVED_KEYS {
        if raw.extra.remove(key).is_some() {
            debug!(key, build_tag = %raw.build_tag, "dropping server field shadowed by derived count");
        }
    }

    ClassifiedResult {
        raw,
        total: outcome.total,
        pass: outcome.pass,
        fail: outcome.fail,
        bucket,
        success_cases: outcome.success_cases,
        error_cases: outcome.error_cases,
        folded: true,
    }
}

#[derive(Debug, Default)]
struct Outcome {
    total: u64,
    pass: u64,
    fail: u64,
    success_cases: Vec<String>,
    error_cases: Vec<String>,
    criteria: Option<&'static str>,
}

fn classify_generic(details: GenericDetails<'_>, criteria_passed: bool) -> Outcome {
    let mut out = Outcome::default();

    if let Some(success) = details.success {
        out.success_cases = split_sub_cases(success);
        out.pass += out.success_cases.len() as u64;
    }
    if let Some(errors) = details.errors {
        out.error_cases = split_sub_cases(errors);
        out.fail += out.error_cases.len() as u64;
    }
    out.total = out.pass + out.fail;

    // Coarse verdict only when there was no sub-case breakdown at all
    if out.total == 0 {
        out.total = 1;
        if criteria_passed {
            out.pass = 1;
        } else {
            out.fail = 1;
        }
    }

    out
}

fn classify_yardstick(details: YardstickDetails<'_>) -> Outcome {
    let Some(benchmark) = details.first_benchmark() else {
        return Outcome::default();
    };

    if sla_passed(benchmark) {
        Outcome {
            total: 1,
            pass: 1,
            criteria: Some(CRITERIA_PASS),
            ..Outcome::default()
        }
    } else {
        Outcome {
            total: 1,
            fail: 1,
            criteria: Some(CRITERIA_FAILED),
            ..Outcome::default()
        }
    }
}
