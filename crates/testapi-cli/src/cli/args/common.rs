//! Shared argument types used across multiple commands.

use clap::ValueEnum;
use testapi_report::TestApiConfig;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// TestAPI base URL, including the /api/v1 prefix
    #[arg(long, global = true, env = "TESTAPI_URL")]
    pub url: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,
}

impl GlobalArgs {
    /// Environment configuration with command-line overrides applied.
    pub fn config(&self) -> TestApiConfig {
        let config = TestApiConfig::from_env();
        match &self.url {
            Some(url) => config.with_url(url),
            None => config,
        }
    }
}
