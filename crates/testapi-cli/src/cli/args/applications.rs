//! Vendor application command arguments.

use clap::{Parser, Subcommand};
use testapi_report::application::{DEFAULT_PER_PAGE, DEFAULT_PRODUCT_CATEGORIES};
use testapi_report::NewApplication;

use super::OutputFormat;

#[derive(Parser, Clone, Debug)]
pub struct ApplicationsArgs {
    #[command(subcommand)]
    pub cmd: ApplicationsSub,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ApplicationsSub {
    /// List submitted applications, one page at a time
    List(ListApplicationsArgs),
    /// Submit a new application
    Submit(SubmitApplicationArgs),
}

#[derive(Parser, Clone, Debug)]
pub struct ListApplicationsArgs {
    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
    pub per_page: usize,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Clone, Debug)]
pub struct SubmitApplicationArgs {
    #[arg(long)]
    pub organization_name: String,

    #[arg(long)]
    pub organization_web: Option<String>,

    #[arg(long)]
    pub product_name: String,

    #[arg(long)]
    pub product_documentation: Option<String>,

    #[arg(long, default_value = DEFAULT_PRODUCT_CATEGORIES)]
    pub product_categories: String,

    #[arg(long)]
    pub user_id: Option<String>,
}

impl SubmitApplicationArgs {
    pub fn to_application(&self) -> NewApplication {
        let mut app = NewApplication::new(&self.organization_name, &self.product_name)
            .with_product_categories(&self.product_categories);
        if let Some(web) = &self.organization_web {
            app = app.with_organization_web(web);
        }
        if let Some(doc) = &self.product_documentation {
            app = app.with_product_documentation(doc);
        }
        if let Some(user) = &self.user_id {
            app = app.with_user_id(user);
        }
        app
    }
}
