use crate::comment::CommentRecord;
use crate::parser::{FileGroup, group_by_file};

/// Empty-state message for the grouped, flat and minimal renderers.
pub const NO_COMMENTS: &str = "No comments found.";

/// Empty-state message for the Claude renderer.
pub const NO_REVIEW_COMMENTS: &str = "No review comments found on this PR.";

/// Minimal-format body previews are cut to this many characters.
const PREVIEW_CHARS: usize = 100;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Snippet and rendering options shared by the prose renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnippetOptions {
    pub include_snippet: bool,
    pub max_lines: usize,
}

impl SnippetOptions {
    pub fn new(include_snippet: bool, max_lines: usize) -> Self {
        Self {
            include_snippet,
            max_lines,
        }
    }

    /// Snippet to show for `record`, or `None` when disabled or empty.
    fn snippet_for(&self, record: &CommentRecord) -> Option<String> {
        if !self.include_snippet {
            return None;
        }
        let snippet = record.code_snippet(self.max_lines);
        (!snippet.is_empty()).then_some(snippet)
    }
}

/// Groups sorted by file path, each group's comments sorted by
/// (line, updated_at). File-level comments sort as line 0.
fn sorted_groups(records: &[CommentRecord]) -> Vec<FileGroup<'_>> {
    let mut groups = group_by_file(records);
    groups.sort_by(|a, b| a.file_path.cmp(b.file_path));
    for group in &mut groups {
        group
            .comments
            .sort_by_key(|c| (c.sort_line(), c.updated_at));
    }
    groups
}

fn push_code_block(lines: &mut Vec<String>, label: &str, snippet: String) {
    lines.push(label.to_string());
    lines.push("```".to_string());
    lines.push(snippet);
    lines.push("```".to_string());
    lines.push(String::new());
}

/// Render one comment as a self-contained block (heading, author, date,
/// optional code context, body). The block ends with a newline.
pub fn render_comment(record: &CommentRecord, options: SnippetOptions) -> String {
    let mut lines = vec![
        format!("### {} ({})", record.file_path, record.line_info()),
        format!("**Author:** {}", record.author),
        format!("**Date:** {}", record.updated_at.format(DATE_FORMAT)),
        String::new(),
    ];

    if let Some(snippet) = options.snippet_for(record) {
        push_code_block(&mut lines, "**Code context:**", snippet);
    }

    lines.push("**Comment:**".to_string());
    lines.push(record.body.clone());
    lines.push(String::new());

    lines.join("\n")
}

/// Comments grouped by file (files sorted by path), each followed by a rule.
pub fn format_grouped(records: &[CommentRecord], options: SnippetOptions) -> String {
    if records.is_empty() {
        return NO_COMMENTS.to_string();
    }

    let groups = sorted_groups(records);
    let mut lines = vec![
        "# PR Comments Summary".to_string(),
        format!("Total comments: {}", records.len()),
        format!("Files with comments: {}", groups.len()),
        String::new(),
    ];

    for group in &groups {
        lines.push(format!("## {}", group.file_path));
        lines.push(format!("({} comment(s))", group.comments.len()));
        lines.push(String::new());

        for comment in &group.comments {
            lines.push(render_comment(comment, options));
            lines.push("---".to_string());
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

/// Comments numbered from 1, most recently updated first.
pub fn format_flat(records: &[CommentRecord], options: SnippetOptions) -> String {
    if records.is_empty() {
        return NO_COMMENTS.to_string();
    }

    let mut sorted: Vec<&CommentRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    let mut lines = vec![format!("# PR Comments ({} total)", records.len()), String::new()];

    for (i, comment) in sorted.iter().enumerate() {
        lines.push(format!("## Comment {}", i + 1));
        lines.push(render_comment(comment, options));
        lines.push("---".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}

/// One-line body preview: first 100 characters, newlines flattened,
/// `...` appended when cut.
fn preview(body: &str) -> String {
    let mut text: String = body
        .chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    if body.chars().nth(PREVIEW_CHARS).is_some() {
        text.push_str("...");
    }
    text
}

/// Compact overview: one line per comment under a marker line per file.
pub fn format_minimal(records: &[CommentRecord]) -> String {
    if records.is_empty() {
        return NO_COMMENTS.to_string();
    }

    let mut groups = group_by_file(records);
    groups.sort_by(|a, b| a.file_path.cmp(b.file_path));

    let mut lines = vec![
        format!(
            "PR Comments: {} total across {} files",
            records.len(),
            groups.len()
        ),
        String::new(),
    ];

    for group in &mut groups {
        group.comments.sort_by_key(|c| c.sort_line());
        lines.push(format!("\u{1F4C4} {}", group.file_path));
        for comment in &group.comments {
            lines.push(format!(
                "  \u{2514}\u{2500} {} ({}): {}",
                comment.line_info(),
                comment.author,
                preview(&comment.body)
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Optional pull request metadata shown in the Claude header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrHeader<'a> {
    pub url: Option<&'a str>,
    pub title: Option<&'a str>,
}

/// LLM-oriented rendering: header, fixed preamble, per-file sections and a
/// closing list of things to consider for each comment.
///
/// Prompts downstream match on these headings and instructions verbatim.
pub fn format_claude(
    records: &[CommentRecord],
    header: PrHeader<'_>,
    options: SnippetOptions,
) -> String {
    if records.is_empty() {
        return NO_REVIEW_COMMENTS.to_string();
    }

    let groups = sorted_groups(records);
    let mut lines = vec!["# Pull Request Review Comments".to_string()];
    if let Some(title) = header.title.filter(|t| !t.is_empty()) {
        lines.push(format!("**PR Title:** {title}"));
    }
    if let Some(url) = header.url.filter(|u| !u.is_empty()) {
        lines.push(format!("**PR URL:** {url}"));
    }
    lines.push(format!("**Total Comments:** {}", records.len()));
    lines.push(format!("**Files Affected:** {}", groups.len()));
    lines.extend(
        [
            "",
            "Below are the review comments that need to be addressed. Each comment includes:",
            "- The file path and line number(s)",
            "- A code snippet showing the context",
            "- The reviewer's comment/feedback",
            "",
            "---",
            "",
        ]
        .map(String::from),
    );

    for group in &groups {
        lines.push(format!("## File: `{}`", group.file_path));
        lines.push(String::new());

        for comment in &group.comments {
            lines.push(format!("### {}", comment.line_info()));
            lines.push(format!("**Reviewer:** {}", comment.author));
            lines.push(String::new());

            if let Some(snippet) = options.snippet_for(comment) {
                push_code_block(&mut lines, "**Code being reviewed:**", snippet);
            }

            lines.push("**Review comment:**".to_string());
            lines.push(comment.body.clone());
            lines.push(String::new());
            lines.push("---".to_string());
            lines.push(String::new());
        }
    }

    lines.extend(
        [
            "## Instructions for Addressing Comments",
            "",
            "Please review each comment above and make the necessary changes to the code.",
            "For each comment, consider:",
            "1. What specific change is being requested?",
            "2. Is the suggestion valid and should be implemented?",
            "3. Are there any related changes needed in other parts of the codebase?",
        ]
        .map(String::from),
    );

    lines.join("\n")
}
