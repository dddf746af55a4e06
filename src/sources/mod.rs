pub mod github;

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::locator::PrLocator;

/// Pull request metadata used in report headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PrInfo {
    pub html_url: Option<String>,
    pub title: Option<String>,
}

/// Where raw review data comes from. Each call is a single blocking fetch.
pub trait CommentSource {
    /// Line-anchored review comments, as raw API records.
    fn fetch_comments(&self, pr: &PrLocator) -> Result<Vec<Value>>;

    /// Submitted reviews, including their summary bodies.
    fn fetch_reviews(&self, pr: &PrLocator) -> Result<Vec<Value>>;

    /// Title and URL of the pull request.
    fn fetch_pr_info(&self, pr: &PrLocator) -> Result<PrInfo>;
}
