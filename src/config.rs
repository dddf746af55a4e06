use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::error::{Error, Result};
use crate::locator::{self, PrLocator};

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".pr-comments.toml";
pub const DEFAULT_SNIPPET_LINES: usize = 15;
pub const DEFAULT_GH_BINARY: &str = "gh";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub format: Option<OutputFormat>,
    pub snippet_lines: Option<usize>,
    pub no_snippet: Option<bool>,
    pub author: Option<String>,
    pub most_recent: Option<bool>,
    pub include_reviews: Option<bool>,
    pub strip_html: Option<bool>,
    pub gh_binary: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub pr: PrLocator,
    pub format: OutputFormat,
    pub include_snippet: bool,
    pub snippet_lines: usize,
    pub author: Option<String>,
    pub most_recent: bool,
    pub include_reviews: bool,
    pub strip_html: bool,
    pub gh_binary: String,
    pub output: Option<PathBuf>,
}

impl Config {
    /// Resolve the PR and build the effective configuration:
    /// CLI flags over config file over defaults.
    pub fn load(cli: &Cli) -> Result<Self> {
        let pr = locator::resolve(
            cli.pr.as_deref(),
            cli.owner.as_deref(),
            cli.repo.as_deref(),
            cli.pr_number,
        )?;
        let file_config = load_file(
            cli.config.as_deref().map(Path::new),
            Path::new(DEFAULT_CONFIG_FILE),
        )?;
        merge(file_config, cli, pr)
    }
}

/// Read the explicit config file (which must exist) or, failing that, the
/// default file if present.
pub fn load_file(explicit: Option<&Path>, default: &Path) -> Result<ConfigFile> {
    let path = match explicit {
        Some(path) if !path.exists() => return Err(Error::ConfigNotFound(path.to_path_buf())),
        Some(path) => path,
        None if default.exists() => default,
        None => return Ok(ConfigFile::default()),
    };
    debug!(path = %path.display(), "loading config file");
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<ConfigFile> {
    let config: ConfigFile = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn validate_snippet_lines(lines: usize) -> Result<()> {
    if lines == 0 {
        return Err(Error::ConfigValidation(
            "snippet_lines must be > 0".to_string(),
        ));
    }
    Ok(())
}

fn validate(config: &ConfigFile) -> Result<()> {
    if let Some(lines) = config.snippet_lines {
        validate_snippet_lines(lines)?;
    }
    if let Some(ref binary) = config.gh_binary
        && binary.trim().is_empty()
    {
        return Err(Error::ConfigValidation(
            "gh_binary must not be empty".to_string(),
        ));
    }
    Ok(())
}

pub fn merge(file: ConfigFile, cli: &Cli, pr: PrLocator) -> Result<Config> {
    let snippet_lines = cli
        .snippet_lines
        .or(file.snippet_lines)
        .unwrap_or(DEFAULT_SNIPPET_LINES);
    validate_snippet_lines(snippet_lines)?;

    Ok(Config {
        pr,
        format: cli.format.or(file.format).unwrap_or(OutputFormat::Claude),
        include_snippet: !(cli.no_snippet || file.no_snippet.unwrap_or(false)),
        snippet_lines,
        author: cli.author.clone().or(file.author),
        most_recent: cli.most_recent || file.most_recent.unwrap_or(false),
        include_reviews: cli.include_reviews || file.include_reviews.unwrap_or(false),
        strip_html: cli.strip_html || file.strip_html.unwrap_or(false),
        gh_binary: cli
            .gh_binary
            .clone()
            .or(file.gh_binary)
            .unwrap_or_else(|| DEFAULT_GH_BINARY.to_string()),
        output: cli.output.as_ref().map(PathBuf::from),
    })
}
