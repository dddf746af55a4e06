use std::io::{self, ErrorKind, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::cli::OutputFormat;
use crate::comment::CommentRecord;
use crate::config::Config;
use crate::error::Result;
use crate::formatter::{self, PrHeader, SnippetOptions};
use crate::parser;
use crate::sanitizer;
use crate::sources::{CommentSource, PrInfo};
use crate::structured;

/// Drives one invocation: fetch, parse, filter, format, deliver.
pub struct Orchestrator<S: CommentSource> {
    source: S,
    config: Config,
}

impl<S: CommentSource> Orchestrator<S> {
    pub fn new(source: S, config: Config) -> Self {
        Self { source, config }
    }

    /// Fetch and normalize the records for the configured PR, with filters applied.
    pub fn collect(&self) -> Result<(Vec<CommentRecord>, PrInfo)> {
        let pr = &self.config.pr;
        info!(%pr, "fetching review comments");

        let raw = self.source.fetch_comments(pr)?;
        let pr_info = self.source.fetch_pr_info(pr)?;
        let mut records = parser::parse_many(&raw)?;

        if self.config.include_reviews {
            let reviews = self.source.fetch_reviews(pr)?;
            let summaries = parser::parse_reviews(&reviews)?;
            debug!(count = summaries.len(), "adding review summaries");
            records.extend(summaries);
        }

        if self.config.strip_html {
            records = sanitizer::strip_bodies(records);
        }

        let before = records.len();
        records = parser::filter_by_author(records, self.config.author.as_deref());
        if self.config.most_recent {
            records = parser::most_recent_per_file(records);
        }
        debug!(before, after = records.len(), "filters applied");

        Ok((records, pr_info))
    }

    /// Produce the rendered report in the configured format.
    pub fn render(&self) -> Result<String> {
        let (records, pr_info) = self.collect()?;
        let options = SnippetOptions::new(self.config.include_snippet, self.config.snippet_lines);

        let output = match self.config.format {
            OutputFormat::Json => structured::to_json(
                &records,
                self.config.include_snippet,
                self.config.snippet_lines,
            )?,
            OutputFormat::Grouped => formatter::format_grouped(&records, options),
            OutputFormat::Flat => formatter::format_flat(&records, options),
            OutputFormat::Minimal => formatter::format_minimal(&records),
            OutputFormat::Claude => {
                let header = PrHeader {
                    url: pr_info.html_url.as_deref(),
                    title: pr_info.title.as_deref(),
                };
                formatter::format_claude(&records, header, options)
            }
        };
        Ok(output)
    }

    /// Render and deliver: to the output file when configured, otherwise stdout.
    pub fn run(&self) -> Result<()> {
        let output = self.render()?;
        match self.config.output.as_deref() {
            Some(path) => {
                write_output(path, &output)?;
                eprintln!("Output written to {}", path.display());
            }
            None => write_report(&mut io::stdout().lock(), &output)?,
        }
        Ok(())
    }
}

/// Write the report plus a trailing newline. A reader that closed the pipe
/// early (`pr-comments ... | head`) is not an error.
pub fn write_report<W: Write>(out: &mut W, output: &str) -> Result<()> {
    match writeln!(out, "{output}").and_then(|()| out.flush()) {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            debug!("stdout closed before the report was fully written");
            Ok(())
        }
        result => Ok(result?),
    }
}

fn write_output(path: &Path, output: &str) -> Result<()> {
    std::fs::write(path, output)?;
    info!(path = %path.display(), bytes = output.len(), "output written");
    Ok(())
}
