use clap::{Parser, ValueEnum};
use serde::Deserialize;

/// Output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Claude/LLM-oriented report (default)
    Claude,
    /// Grouped by file
    Grouped,
    /// Flat list, most recent first
    Flat,
    /// Compact one-line-per-comment overview
    Minimal,
    /// JSON array for scripts
    Json,
}

/// Fetch GitHub PR review comments and format them for LLM consumption
#[derive(Parser, Debug, Clone)]
#[command(name = "pr-comments", version, about)]
pub struct Cli {
    /// PR URL (https://github.com/owner/repo/pull/123) or owner/repo#123
    #[arg(value_name = "PR")]
    pub pr: Option<String>,

    /// Repository owner
    #[arg(short = 'o', long)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(short = 'r', long)]
    pub repo: Option<String>,

    /// Pull request number
    #[arg(short = 'n', long = "pr-number")]
    pub pr_number: Option<u64>,

    /// Only show comments by this author
    #[arg(short = 'a', long)]
    pub author: Option<String>,

    /// Only show the most recent comment per file
    #[arg(short = 'm', long)]
    pub most_recent: bool,

    /// Output format (default: claude)
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Exclude code snippets from output
    #[arg(long)]
    pub no_snippet: bool,

    /// Maximum lines in code snippets (default: 15)
    #[arg(long)]
    pub snippet_lines: Option<usize>,

    /// Write output to this file instead of stdout
    #[arg(short = 'O', long)]
    pub output: Option<String>,

    /// Also include review summary comments (not attached to a file)
    #[arg(long)]
    pub include_reviews: bool,

    /// Strip HTML tags and comments from comment bodies
    #[arg(long)]
    pub strip_html: bool,

    /// GitHub CLI binary to invoke (default: gh)
    #[arg(long)]
    pub gh_binary: Option<String>,

    /// Path to config file (default: .pr-comments.toml if present)
    #[arg(long)]
    pub config: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}
