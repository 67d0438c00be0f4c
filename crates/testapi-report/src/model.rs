//! Result records as returned by the TestAPI `/results` endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::category::Bucket;

/// Producer identifier for benchmark-style results.
pub const YARDSTICK_PROJECT: &str = "yardstick";

/// Criteria value for a passing result.
pub const CRITERIA_PASS: &str = "PASS";

/// Criteria value written for a failing benchmark result.
pub const CRITERIA_FAILED: &str = "FAILED";

/// One execution record for a test case.
///
/// Only the fields classification reads are typed; everything else the
/// server sends is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    /// Producer identifier (e.g. "functest", "yardstick").
    #[serde(default, deserialize_with = "lenient_string")]
    pub project_name: String,

    /// Build tag, `<prefix>-...-<run>.<category>...`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub build_tag: String,

    /// Producer-specific payload. `Null` when absent.
    #[serde(default)]
    pub details: Value,

    /// Coarse verdict; "PASS" or anything else.
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub criteria: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawResult {
    /// Create a record with the given producer and build tag and no details.
    pub fn new(project_name: impl Into<String>, build_tag: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            build_tag: build_tag.into(),
            details: Value::Null,
            criteria: None,
            extra: Map::new(),
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    pub fn with_criteria(mut self, criteria: impl Into<String>) -> Self {
        self.criteria = Some(criteria.into());
        self
    }

    /// Which producer generated this record.
    pub fn producer(&self) -> Producer {
        Producer::from_project_name(&self.project_name)
    }

    /// Typed view of `details` for this record's producer.
    ///
    /// Missing or mistyped fields read as absent.
    pub fn details(&self) -> ResultDetails<'_> {
        match self.producer() {
            Producer::Yardstick => ResultDetails::Yardstick(YardstickDetails {
                results: self
                    .details
                    .get("results")
                    .and_then(Value::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or_default(),
            }),
            Producer::Generic => ResultDetails::Generic(GenericDetails {
                success: self.details.get("success").and_then(Value::as_str),
                errors: self.details.get("errors").and_then(Value::as_str),
            }),
        }
    }

    /// Whether the coarse criteria says the result passed.
    pub fn criteria_passed(&self) -> bool {
        self.criteria.as_deref() == Some(CRITERIA_PASS)
    }

    /// Test case name, when the server included one.
    pub fn case_name(&self) -> Option<&str> {
        self.extra.get("case_name").and_then(Value::as_str)
    }
}

/// Subsystem that produced a result; decides how pass/fail is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Producer {
    /// Benchmark results with an SLA verdict.
    Yardstick,
    /// Functional-test style results with sub-case lists.
    Generic,
}

impl Producer {
    pub fn from_project_name(name: &str) -> Self {
        if name == YARDSTICK_PROJECT {
            Self::Yardstick
        } else {
            Self::Generic
        }
    }
}

/// Producer-specific view of a result's `details`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultDetails<'a> {
    Generic(GenericDetails<'a>),
    Yardstick(YardstickDetails<'a>),
}

/// Functional-test details: comma-terminated sub-case lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenericDetails<'a> {
    pub success: Option<&'a str>,
    pub errors: Option<&'a str>,
}

/// Benchmark details: ordered scenario entries.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct YardstickDetails<'a> {
    pub results: &'a [Value],
}

impl<'a> YardstickDetails<'a> {
    /// First entry carrying a `benchmark` object; later ones are never read.
    pub fn first_benchmark(&self) -> Option<&'a Value> {
        self.results
            .iter()
            .find_map(|entry| entry.get("benchmark").filter(|b| is_truthy(b)))
    }
}

/// Whether a benchmark's `data.sla_pass` flag equals 1.
///
/// Accepts numeric, boolean and string encodings of the flag.
pub fn sla_passed(benchmark: &Value) -> bool {
    match benchmark.pointer("/data/sla_pass") {
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().parse::<f64>().ok() == Some(1.0),
        _ => false,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Split a comma-terminated list, dropping the segment after the final comma.
///
/// `"a,b,c,"` yields `["a", "b", "c"]`.
pub fn split_sub_cases(list: &str) -> Vec<String> {
    let mut parts: Vec<String> = list.split(',').map(String::from).collect();
    parts.pop();
    parts
}

/// Keys [`ClassifiedResult`] writes next to the flattened raw record.
pub(crate) const DERIVED_KEYS: [&str; 7] = [
    "total",
    "pass",
    "fail",
    "bucket",
    "success_cases",
    "error_cases",
    "folded",
];

/// A raw result with derived counts and its summary bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedResult {
    #[serde(flatten)]
    pub raw: RawResult,

    pub total: u64,
    pub pass: u64,
    pub fail: u64,

    pub bucket: Bucket,

    /// Parsed `details.success` sub-cases (generic producer only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub success_cases: Vec<String>,

    /// Parsed `details.errors` sub-cases (generic producer only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub error_cases: Vec<String>,

    /// Collapsed in the report view. Presentation state only.
    pub folded: bool,
}

impl ClassifiedResult {
    /// Whether this result contributes anything to a summary.
    pub fn is_counted(&self) -> bool {
        self.total > 0
    }
}

fn lenient_string<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(d)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Null => None,
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}
