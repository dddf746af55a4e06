use serde::Serialize;

use crate::comment::CommentRecord;
use crate::error::Result;

/// Machine-readable form of a comment for `--format json`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StructuredComment<'a> {
    pub file: &'a str,
    pub line: Option<u32>,
    pub author: &'a str,
    pub body: &'a str,
    /// `null` when snippets are disabled; may be empty when the hunk is.
    pub snippet: Option<String>,
    pub url: &'a str,
}

impl<'a> StructuredComment<'a> {
    pub fn from_record(record: &'a CommentRecord, include_snippet: bool, max_lines: usize) -> Self {
        Self {
            file: &record.file_path,
            line: record.line_number,
            author: &record.author,
            body: &record.body,
            snippet: include_snippet.then(|| record.code_snippet(max_lines)),
            url: &record.html_url,
        }
    }
}

/// Serialize records as a pretty-printed JSON array, in input order.
pub fn to_json(records: &[CommentRecord], include_snippet: bool, max_lines: usize) -> Result<String> {
    let entries: Vec<StructuredComment<'_>> = records
        .iter()
        .map(|r| StructuredComment::from_record(r, include_snippet, max_lines))
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}
