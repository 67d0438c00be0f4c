use std::fmt::Write as _;

use testapi_report::{Application, Pager, TestApiClient, TestApiConfig};
use tracing::info;

use crate::cli::args::{ListApplicationsArgs, OutputFormat, SubmitApplicationArgs};
use crate::exit_codes::SUCCESS;

pub async fn list(args: ListApplicationsArgs, config: TestApiConfig) -> anyhow::Result<i32> {
    let client = TestApiClient::new(config)?;
    let applications = client.list_applications().await?;

    let pager = Pager::new(args.per_page);
    let page = pager.page(&applications, args.page);

    match args.format {
        OutputFormat::Text => print!(
            "{}",
            render_page(page, args.page, pager.page_count(applications.len()), applications.len())
        ),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(page)?),
    }
    Ok(SUCCESS)
}

pub async fn submit(args: SubmitApplicationArgs, config: TestApiConfig) -> anyhow::Result<i32> {
    let client = TestApiClient::new(config)?;
    let application = args.to_application();
    client.submit_application(&application).await?;

    info!(
        organization = %application.organization_name,
        product = %application.product_name,
        "application submitted"
    );
    println!(
        "submitted {} / {}",
        application.organization_name, application.product_name
    );
    Ok(SUCCESS)
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

/// One line per application under a page header.
pub fn render_page(page: &[Application], number: usize, pages: usize, total: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Page {number}/{pages} ({total} applications)");
    for app in page {
        let _ = writeln!(
            out,
            "  {} / {} [{}] {}",
            field(&app.organization_name),
            field(&app.product_name),
            field(&app.product_categories),
            field(&app.organization_web)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_page() {
        let apps: Vec<Application> = serde_json::from_value(json!([
            {"organization_name": "Acme", "product_name": "Acme Cloud",
             "product_categories": "soft&hard", "organization_web": "https://acme.example"},
            {"organization_name": "Initech"}
        ]))
        .unwrap();

        let text = render_page(&apps, 2, 3, 12);
        assert_eq!(
            text,
            "Page 2/3 (12 applications)\n  Acme / Acme Cloud [soft&hard] https://acme.example\n  Initech / - [-] -\n"
        );
    }
}
