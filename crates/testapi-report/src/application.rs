//! Vendor applications (organization/product metadata) and list paging.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Product category submitted when none is chosen.
pub const DEFAULT_PRODUCT_CATEGORIES: &str = "soft&hard";

/// Applications shown per page by default.
pub const DEFAULT_PER_PAGE: usize = 5;

/// Body of `POST /cvp/applications`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    pub organization_name: String,
    pub organization_web: Option<String>,
    pub product_name: String,
    pub product_documentation: Option<String>,
    #[serde(default = "default_product_categories")]
    pub product_categories: String,
    pub user_id: Option<String>,
}

fn default_product_categories() -> String {
    DEFAULT_PRODUCT_CATEGORIES.to_string()
}

impl NewApplication {
    pub fn new(organization_name: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self {
            organization_name: organization_name.into(),
            organization_web: None,
            product_name: product_name.into(),
            product_documentation: None,
            product_categories: default_product_categories(),
            user_id: None,
        }
    }

    pub fn with_organization_web(mut self, url: impl Into<String>) -> Self {
        self.organization_web = Some(url.into());
        self
    }

    pub fn with_product_documentation(mut self, url: impl Into<String>) -> Self {
        self.product_documentation = Some(url.into());
        self
    }

    pub fn with_product_categories(mut self, categories: impl Into<String>) -> Self {
        self.product_categories = categories.into();
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// An application as listed by `GET /cvp/applications`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub organization_web: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_documentation: Option<String>,
    #[serde(default)]
    pub product_categories: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fixed-size pages over a list, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    per_page: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}

impl Pager {
    /// Zero is raised to one item per page.
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.per_page)
    }

    /// Items on page `page`; empty when out of range.
    pub fn page<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let Some(index) = page.checked_sub(1) else {
            return &[];
        };
        let start = index.saturating_mul(self.per_page);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.per_page).min(items.len());
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_application_payload() {
        let app = NewApplication::new("Acme", "Acme Cloud").with_user_id("u-1");
        let v = serde_json::to_value(&app).unwrap();
        assert_eq!(
            v,
            json!({
                "organization_name": "Acme",
                "organization_web": null,
                "product_name": "Acme Cloud",
                "product_documentation": null,
                "product_categories": "soft&hard",
                "user_id": "u-1"
            })
        );
    }

    #[test]
    fn test_application_keeps_server_fields() {
        let app: Application = serde_json::from_value(json!({
            "_id": "5a1",
            "organization_name": "Acme",
            "creation_date": "2017-11-01 10:00:00"
        }))
        .unwrap();
        assert_eq!(app.organization_name.as_deref(), Some("Acme"));
        assert!(app.product_name.is_none());
        assert_eq!(app.extra.get("_id"), Some(&json!("5a1")));
    }

    #[test]
    fn test_page_count() {
        let pager = Pager::default();
        assert_eq!(pager.page_count(0), 0);
        assert_eq!(pager.page_count(5), 1);
        assert_eq!(pager.page_count(6), 2);
        assert_eq!(pager.page_count(11), 3);
        assert_eq!(Pager::new(0).page_count(3), 3);
    }

    #[test]
    fn test_page_slices() {
        let items: Vec<u32> = (1..=12).collect();
        let pager = Pager::new(5);
        assert_eq!(pager.page(&items, 1), &[1, 2, 3, 4, 5]);
        assert_eq!(pager.page(&items, 3), &[11, 12]);
        assert!(pager.page(&items, 4).is_empty());
        assert!(pager.page(&items, 0).is_empty());
        assert!(pager.page(&items, usize::MAX).is_empty());
    }
}
