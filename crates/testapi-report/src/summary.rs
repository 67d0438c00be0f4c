//! Pass/fail totals across a report.
//!
//! `Summary` is a plain value folded over classified results. Accumulation
//! is addition only, so the final totals do not depend on the order results
//! arrive in.

use serde::{Deserialize, Serialize};

use crate::category::Bucket;
use crate::model::ClassifiedResult;

/// Running counters for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: u64,
    pub mandatory_total: u64,
    pub mandatory_pass: u64,
    pub mandatory_fail: u64,
    pub optional_total: u64,
    pub optional_pass: u64,
    pub optional_fail: u64,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one classified result.
    ///
    /// Not idempotent: accumulating the same result twice counts it twice.
    #[must_use]
    pub fn accumulate(mut self, result: &ClassifiedResult) -> Self {
        self.total += result.total;
        match result.bucket {
            Bucket::Mandatory => {
                self.mandatory_total += result.total;
                self.mandatory_pass += result.pass;
                self.mandatory_fail += result.fail;
            }
            Bucket::Optional => {
                self.optional_total += result.total;
                self.optional_pass += result.pass;
                self.optional_fail += result.fail;
            }
        }
        self
    }

    /// Combine two partial summaries.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            mandatory_total: self.mandatory_total + other.mandatory_total,
            mandatory_pass: self.mandatory_pass + other.mandatory_pass,
            mandatory_fail: self.mandatory_fail + other.mandatory_fail,
            optional_total: self.optional_total + other.optional_total,
            optional_pass: self.optional_pass + other.optional_pass,
            optional_fail: self.optional_fail + other.optional_fail,
        }
    }

    pub fn pass(&self) -> u64 {
        self.mandatory_pass + self.optional_pass
    }

    pub fn fail(&self) -> u64 {
        self.mandatory_fail + self.optional_fail
    }

    /// Totals for one bucket as `(total, pass, fail)`.
    pub fn bucket(&self, bucket: Bucket) -> (u64, u64, u64) {
        match bucket {
            Bucket::Mandatory => (
                self.mandatory_total,
                self.mandatory_pass,
                self.mandatory_fail,
            ),
            Bucket::Optional => (self.optional_total, self.optional_pass, self.optional_fail),
        }
    }
}

/// Fold a sequence of classified results into a fresh summary.
pub fn summarize<'a, I>(results: I) -> Summary
where
    I: IntoIterator<Item = &'a ClassifiedResult>,
{
    results.into_iter().fold(Summary::new(), Summary::accumulate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::model::RawResult;
    use serde_json::json;

    fn sample(tag: &str, success: &str, errors: &str) -> ClassifiedResult {
        classify(
            RawResult::new("functest", format!("daily-master-42.{tag}"))
                .with_details(json!({"success": success, "errors": errors})),
        )
    }

    #[test]
    fn test_accumulate_buckets() {
        let s = Summary::new()
            .accumulate(&sample("ha", "a,b,", "c,"))
            .accumulate(&sample("smoke", "a,", ""));

        assert_eq!(s.total, 4);
        assert_eq!((s.mandatory_total, s.mandatory_pass, s.mandatory_fail), (3, 2, 1));
        assert_eq!((s.optional_total, s.optional_pass, s.optional_fail), (1, 1, 0));
        assert_eq!(s.pass(), 3);
        assert_eq!(s.fail(), 1);
        assert_eq!(s.bucket(Bucket::Mandatory), (3, 2, 1));
    }

    #[test]
    fn test_accumulate_twice_doubles() {
        let r = sample("vping", "a,b,", "c,");
        let once = Summary::new().accumulate(&r);
        let twice = once.accumulate(&r);

        assert_eq!(twice.total, once.total * 2);
        assert_eq!(twice.mandatory_pass, once.mandatory_pass * 2);
        assert_eq!(twice.mandatory_fail, once.mandatory_fail * 2);
        assert_ne!(twice, once);
    }

    #[test]
    fn test_uncounted_result_adds_nothing() {
        let r = classify(RawResult::new("yardstick", "daily-master-42.ha"));
        assert_eq!(Summary::new().accumulate(&r), Summary::new());
    }

    #[test]
    fn test_summarize_matches_merge() {
        let a = sample("ha", "a,", "b,c,");
        let b = sample("defcore", "", "x,");
        let c = sample("tempest", "a,b,c,d,", "");

        let all = summarize([&a, &b, &c]);
        let split = summarize([&a]).merge(summarize([&b, &c]));
        assert_eq!(all, split);
        assert_eq!(all.total, 3 + 1 + 4);
    }

    #[test]
    fn test_summary_serializes_flat_counters() {
        let s = summarize([&sample("ha", "a,", "")]);
        let v = serde_json::to_value(s).unwrap();
        assert_eq!(v["mandatory_pass"], 1);
        assert_eq!(v["optional_total"], 0);
        assert_eq!(v["total"], 1);
    }
}
