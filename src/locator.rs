use std::fmt;

use crate::error::{Error, Result};

const GITHUB_PREFIXES: &[&str] = &["https://github.com/", "http://github.com/"];

/// Identifies one pull request: `owner/repo#number`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrLocator {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl fmt::Display for PrLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

impl PrLocator {
    pub fn new(owner: &str, repo: &str, number: u64) -> Result<Self> {
        let valid = |part: &str| !part.is_empty() && !part.contains('/');
        if !valid(owner) || !valid(repo) {
            return Err(Error::MalformedIdentifier(format!(
                "invalid owner/repository {owner:?}/{repo:?}"
            )));
        }
        if number == 0 {
            return Err(Error::MalformedIdentifier(
                "PR number must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
        })
    }
}

fn parse_number(text: &str, original: &str) -> Result<u64> {
    text.parse::<u64>().map_err(|_| {
        Error::MalformedIdentifier(format!("invalid PR number {text:?} in {original}"))
    })
}

/// Parse a PR URL (`https://github.com/owner/repo/pull/123`) or the
/// shorthand `owner/repo#123`.
pub fn parse_locator(text: &str) -> Result<PrLocator> {
    let trimmed = text.trim().trim_end_matches('/');

    if let Some(path) = GITHUB_PREFIXES.iter().find_map(|p| trimmed.strip_prefix(p)) {
        let parts: Vec<&str> = path.split('/').collect();
        if let [owner, repo, "pull", number, ..] = parts.as_slice() {
            return PrLocator::new(owner, repo, parse_number(number, trimmed)?);
        }
    }

    if let Some((repo_part, number)) = trimmed.split_once('#')
        && let Some((owner, repo)) = repo_part.split_once('/')
    {
        return PrLocator::new(owner, repo, parse_number(number, trimmed)?);
    }

    Err(Error::MalformedIdentifier(trimmed.to_string()))
}

/// Resolve the PR from a positional locator or from explicit parts.
///
/// A positional locator wins. Otherwise owner, repo and number must all be given.
pub fn resolve(
    positional: Option<&str>,
    owner: Option<&str>,
    repo: Option<&str>,
    number: Option<u64>,
) -> Result<PrLocator> {
    if let Some(text) = positional {
        return parse_locator(text);
    }
    match (owner, repo, number) {
        (Some(owner), Some(repo), Some(number)) => PrLocator::new(owner, repo, number),
        _ => Err(Error::MalformedIdentifier(
            "provide a PR URL or --owner, --repo, and --pr-number".to_string(),
        )),
    }
}
