//! Build tag parsing and mandatory/optional bucketing.
//!
//! Build tags look like `daily-master-<run>-<project>.<category>.<case>`: the
//! category is the second dot-separated field of the last dash-separated
//! segment.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ClassifyError;

/// Category tags whose results count towards the mandatory bucket.
pub const MANDATORY_CATEGORIES: &[&str] = &["ha", "defcore", "vping"];

/// Summary partition a result is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Mandatory,
    Optional,
}

impl Bucket {
    /// Bucket for a category tag.
    pub fn for_category(tag: &str) -> Self {
        if MANDATORY_CATEGORIES.contains(&tag) {
            Self::Mandatory
        } else {
            Self::Optional
        }
    }

    /// Bucket for a build tag. Malformed tags land in [`Bucket::Optional`].
    pub fn for_build_tag(build_tag: &str) -> Self {
        match category_tag(build_tag) {
            Ok(tag) => Self::for_category(tag),
            Err(e) => {
                warn!(error = %e, "unparseable category tag, counting as optional");
                Self::Optional
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mandatory => "mandatory",
            Self::Optional => "optional",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Extract the category tag from a build tag.
///
/// `"daily-master-42.ha"` yields `"ha"`. Fails when the last dash segment has
/// no second dot field.
pub fn category_tag(build_tag: &str) -> Result<&str, ClassifyError> {
    // rsplit always yields at least one item
    let last = build_tag.rsplit('-').next().unwrap_or(build_tag);
    last.split('.')
        .nth(1)
        .ok_or_else(|| ClassifyError::MalformedBuildTag {
            build_tag: build_tag.to_string(),
        })
}
