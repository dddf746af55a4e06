#![allow(dead_code)]

use std::cell::RefCell;

use serde_json::{Value, json};

use pr_comments::cli::OutputFormat;
use pr_comments::config::Config;
use pr_comments::error::{Error, Result};
use pr_comments::locator::PrLocator;
use pr_comments::sources::{CommentSource, PrInfo};

pub const PR_URL: &str = "https://github.com/acme/widgets/pull/7";
pub const PR_TITLE: &str = "Add retries";

/// Three review comments across two files, as returned by the pulls comments endpoint.
pub fn sample_comments() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "path": "src/lib.rs",
            "line": 10,
            "start_line": null,
            "user": {"login": "alice"},
            "body": "Rename this.",
            "created_at": "2026-01-30T09:00:00Z",
            "updated_at": "2026-01-30T10:00:00Z",
            "diff_hunk": "@@ -8,3 +8,3 @@\n fn a() {}\n-fn b() {}\n+fn c() {}",
            "html_url": "https://github.com/acme/widgets/pull/7#discussion_r1"
        }),
        json!({
            "id": 2,
            "path": "src/lib.rs",
            "line": 4,
            "start_line": 2,
            "user": {"login": "bob"},
            "body": "Add docs.",
            "created_at": "2026-01-30T11:00:00Z",
            "updated_at": "2026-01-30T12:00:00Z",
            "diff_hunk": "@@ -1,4 +1,4 @@\n // header\n use std::io;\n+use std::fs;",
            "html_url": "https://github.com/acme/widgets/pull/7#discussion_r2"
        }),
        json!({
            "id": 3,
            "path": "README.md",
            "line": null,
            "original_line": null,
            "user": {"login": "alice"},
            "body": "Typo in title.",
            "created_at": "2026-01-30T09:00:00Z",
            "updated_at": "2026-01-30T09:00:00Z",
            "diff_hunk": "",
            "html_url": "https://github.com/acme/widgets/pull/7#discussion_r3"
        }),
    ]
}

pub fn sample_pr_info() -> PrInfo {
    PrInfo {
        html_url: Some(PR_URL.to_string()),
        title: Some(PR_TITLE.to_string()),
    }
}

/// Sensible default `Config` for tests. Callers can override fields via struct update syntax.
pub fn default_test_config() -> Config {
    Config {
        pr: PrLocator::new("acme", "widgets", 7).unwrap(),
        format: OutputFormat::Claude,
        include_snippet: true,
        snippet_lines: 15,
        author: None,
        most_recent: false,
        include_reviews: false,
        strip_html: false,
        gh_binary: "gh".to_string(),
        output: None,
    }
}

/// In-memory `CommentSource` with canned responses and a call log.
pub struct MockSource {
    pub comments: Result<Vec<Value>>,
    pub reviews: Vec<Value>,
    pub info: PrInfo,
    pub calls: RefCell<Vec<String>>,
}

impl MockSource {
    pub fn new(comments: Vec<Value>) -> Self {
        Self {
            comments: Ok(comments),
            reviews: Vec::new(),
            info: sample_pr_info(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            comments: Err(Error::Fetch(message.to_string())),
            ..Self::new(Vec::new())
        }
    }
}

impl CommentSource for MockSource {
    fn fetch_comments(&self, pr: &PrLocator) -> Result<Vec<Value>> {
        self.calls.borrow_mut().push(format!("comments {pr}"));
        match &self.comments {
            Ok(comments) => Ok(comments.clone()),
            Err(e) => Err(Error::Fetch(e.to_string())),
        }
    }

    fn fetch_reviews(&self, pr: &PrLocator) -> Result<Vec<Value>> {
        self.calls.borrow_mut().push(format!("reviews {pr}"));
        Ok(self.reviews.clone())
    }

    fn fetch_pr_info(&self, pr: &PrLocator) -> Result<PrInfo> {
        self.calls.borrow_mut().push(format!("info {pr}"));
        Ok(self.info.clone())
    }
}
