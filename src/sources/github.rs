use std::io::ErrorKind;
use std::process::Command;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::locator::PrLocator;

use super::{CommentSource, PrInfo};

/// Abstraction over `gh` CLI execution for testability.
pub trait GhClient {
    /// Run `gh api <endpoint>` and return its stdout.
    fn api(&self, endpoint: &str) -> Result<String>;
}

/// Real `gh` CLI client. One attempt per call.
pub struct CliGhClient {
    binary: String,
}

impl CliGhClient {
    pub fn new(binary: &str) -> Self {
        Self {
            binary: binary.to_string(),
        }
    }
}

impl GhClient for CliGhClient {
    fn api(&self, endpoint: &str) -> Result<String> {
        debug!(binary = %self.binary, endpoint, "running gh api");
        let output = Command::new(&self.binary)
            .args(["api", endpoint])
            .output()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    Error::Fetch(format!(
                        "{} not found; install the GitHub CLI from https://cli.github.com/",
                        self.binary
                    ))
                } else {
                    Error::Fetch(format!("failed to run {}: {e}", self.binary))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            return Err(Error::Fetch(if stderr.is_empty() {
                format!("{} exited with {}", self.binary, output.status)
            } else {
                stderr.to_string()
            }));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| Error::Fetch(format!("invalid utf8 from {}: {e}", self.binary)))
    }
}

/// Fetches review data for a pull request through the `gh` CLI.
pub struct GitHubSource {
    client: Box<dyn GhClient>,
}

impl GitHubSource {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Box::new(CliGhClient::new(&config.gh_binary)),
        }
    }

    pub fn with_client(client: Box<dyn GhClient>) -> Self {
        Self { client }
    }

    fn fetch_json<T: DeserializeOwned>(&self, endpoint: &str, what: &str) -> Result<T> {
        let body = self
            .client
            .api(endpoint)
            .map_err(|e| Error::Fetch(format!("failed to fetch {what}: {e}")))?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Fetch(format!("failed to parse API response for {what}: {e}")))
    }
}

fn pull_endpoint(pr: &PrLocator) -> String {
    format!("repos/{}/{}/pulls/{}", pr.owner, pr.repo, pr.number)
}

impl CommentSource for GitHubSource {
    fn fetch_comments(&self, pr: &PrLocator) -> Result<Vec<Value>> {
        let comments: Vec<Value> =
            self.fetch_json(&format!("{}/comments", pull_endpoint(pr)), "PR comments")?;
        debug!(%pr, count = comments.len(), "fetched review comments");
        Ok(comments)
    }

    fn fetch_reviews(&self, pr: &PrLocator) -> Result<Vec<Value>> {
        let reviews: Vec<Value> =
            self.fetch_json(&format!("{}/reviews", pull_endpoint(pr)), "PR reviews")?;
        debug!(%pr, count = reviews.len(), "fetched reviews");
        Ok(reviews)
    }

    fn fetch_pr_info(&self, pr: &PrLocator) -> Result<PrInfo> {
        self.fetch_json(&pull_endpoint(pr), "PR info")
    }
}
