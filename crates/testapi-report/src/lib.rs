//! Test-run result aggregation for the TestAPI results dashboard.
//!
//! This crate turns the raw result records a test run stores in the TestAPI
//! into pass/fail totals:
//!
//! - Per-producer classification of records (functional-test sub-case lists,
//!   benchmark SLA verdicts, coarse criteria fallback)
//! - Mandatory/optional bucketing from the build tag's category
//! - An order-independent [`Summary`] fold
//! - An HTTP [`TestApiClient`] and a [`Report`] builder that fetches cases
//!   concurrently and tolerates per-case failures
//! - Vendor application submit/list with page slicing
//!
//! # Quick Start
//!
//! ```no_run
//! use testapi_report::{Report, TestApiClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = TestApiClient::from_env()?;
//! let config = client.config().clone();
//!
//! let report = Report::build(&client, &config.project, "42", config.max_concurrent_fetches).await?;
//! println!(
//!     "mandatory {}/{} passed",
//!     report.summary.mandatory_pass, report.summary.mandatory_total
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `TESTAPI_URL` | API base URL (default: `http://localhost:8000/api/v1`) |
//! | `TESTAPI_PROJECT` | Project whose cases make up a report (default: `dovetail`) |
//! | `TESTAPI_BUILD_TAG_PREFIX` | Build tag prefix (default: `daily-master`) |
//! | `TESTAPI_TIMEOUT` | Request timeout in seconds (default: 30) |
//! | `TESTAPI_MAX_RETRIES` | Max retries for transient failures (default: 3) |
//! | `TESTAPI_MAX_CONCURRENT_FETCHES` | Result fetches in flight (default: 8) |

pub mod application;
pub mod category;
pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod source;
pub mod summary;

// Re-export main types
pub use application::{Application, NewApplication, Pager};
pub use category::{category_tag, Bucket, MANDATORY_CATEGORIES};
pub use classify::classify;
pub use client::{TestApiClient, TESTAPI_USER_AGENT};
pub use config::TestApiConfig;
pub use error::{ClassifyError, TestApiError, TestApiResult};
pub use model::{ClassifiedResult, Producer, RawResult, ResultDetails};
pub use report::{CaseFailure, Report};
pub use source::ResultSource;
pub use summary::{summarize, Summary};
