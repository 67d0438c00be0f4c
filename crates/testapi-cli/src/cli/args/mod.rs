use clap::{Parser, Subcommand};

pub mod applications;
pub mod common;
pub mod report;
pub use applications::*;
pub use common::*;
pub use report::*;

#[derive(Parser)]
#[command(
    name = "testapi",
    version,
    about = "Test-run reports and vendor applications from a TestAPI server"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch and summarize the results of a test run
    Report(ReportArgs),
    /// Submit or list vendor applications
    Applications(ApplicationsArgs),
    Version,
}
