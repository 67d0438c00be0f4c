//! Report command arguments.

use clap::Parser;

use super::OutputFormat;

#[derive(Parser, Clone, Debug)]
pub struct ReportArgs {
    /// Test run identifier
    pub run_id: String,

    /// Project whose cases make up the report
    #[arg(long, env = "TESTAPI_PROJECT")]
    pub project: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Show sub-case lists under each result
    #[arg(long)]
    pub expand: bool,

    /// Exit non-zero when any case could not be fetched
    #[arg(long)]
    pub strict: bool,

    /// Result fetches in flight (default from TESTAPI_MAX_CONCURRENT_FETCHES)
    #[arg(long)]
    pub concurrency: Option<usize>,
}
