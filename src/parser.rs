use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::comment::CommentRecord;
use crate::error::{Error, Result};

/// Sentinel used when the raw record carries no path or principal.
pub const UNKNOWN: &str = "unknown";

/// Pseudo file path for review-level comments, which are not anchored to a file.
pub const REVIEW_SUMMARY_PATH: &str = "(review summary)";

const EPOCH: &str = "1970-01-01T00:00:00Z";

// --- Raw API shapes ---

#[derive(Debug, Deserialize)]
struct RawUser {
    login: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawComment {
    id: Option<u64>,
    path: Option<String>,
    line: Option<u32>,
    original_line: Option<u32>,
    start_line: Option<u32>,
    original_start_line: Option<u32>,
    user: Option<RawUser>,
    body: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
    diff_hunk: Option<String>,
    html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawReview {
    id: Option<u64>,
    user: Option<RawUser>,
    body: Option<String>,
    submitted_at: Option<String>,
    html_url: Option<String>,
}

/// Comments on a PR grouped under one file path, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup<'a> {
    pub file_path: &'a str,
    pub comments: Vec<&'a CommentRecord>,
}

/// Parse a GitHub timestamp such as `2026-01-30T23:06:02Z` into UTC.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Format(format!("invalid timestamp {text:?}: {e}")))
}

fn parse_optional_timestamp(text: Option<&str>) -> Result<DateTime<Utc>> {
    parse_timestamp(text.unwrap_or(EPOCH))
}

/// First candidate that holds a value, tried in order.
fn first_present(candidates: [Option<u32>; 2]) -> Option<u32> {
    candidates.into_iter().flatten().next()
}

fn author_of(user: Option<RawUser>) -> String {
    user.and_then(|u| u.login)
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn decode<T: DeserializeOwned>(raw: &Value, what: &str) -> Result<T> {
    T::deserialize(raw).map_err(|e| Error::Format(format!("malformed {what}: {e}")))
}

/// Convert one raw review comment into a `CommentRecord`.
///
/// Missing fields fall back to documented defaults; only an unparsable
/// timestamp or a field of the wrong JSON type is an error.
pub fn parse_one(raw: &Value) -> Result<CommentRecord> {
    let raw: RawComment = decode(raw, "review comment")?;

    Ok(CommentRecord {
        id: raw.id.unwrap_or(0),
        file_path: raw.path.unwrap_or_else(|| UNKNOWN.to_string()),
        line_number: first_present([raw.line, raw.original_line]),
        start_line: first_present([raw.start_line, raw.original_start_line]),
        author: author_of(raw.user),
        body: raw.body.unwrap_or_default(),
        created_at: parse_optional_timestamp(raw.created_at.as_deref())?,
        updated_at: parse_optional_timestamp(raw.updated_at.as_deref())?,
        diff_hunk: raw.diff_hunk.unwrap_or_default(),
        html_url: raw.html_url.unwrap_or_default(),
    })
}

/// Parse every raw comment, preserving input order. The first failure aborts.
pub fn parse_many(raw: &[Value]) -> Result<Vec<CommentRecord>> {
    let records = raw.iter().map(parse_one).collect::<Result<Vec<_>>>()?;
    debug!(count = records.len(), "parsed review comments");
    Ok(records)
}

/// Convert a submitted review into a file-less `CommentRecord`.
///
/// Reviews without body text (plain approvals, empty "comment" reviews)
/// yield `None`.
pub fn parse_review(raw: &Value) -> Result<Option<CommentRecord>> {
    let raw: RawReview = decode(raw, "review")?;

    let Some(body) = raw.body.filter(|b| !b.trim().is_empty()) else {
        return Ok(None);
    };
    let submitted_at = parse_optional_timestamp(raw.submitted_at.as_deref())?;

    Ok(Some(CommentRecord {
        id: raw.id.unwrap_or(0),
        file_path: REVIEW_SUMMARY_PATH.to_string(),
        line_number: None,
        start_line: None,
        author: author_of(raw.user),
        body,
        created_at: submitted_at,
        updated_at: submitted_at,
        diff_hunk: String::new(),
        html_url: raw.html_url.unwrap_or_default(),
    }))
}

/// Parse all reviews that carry body text, preserving input order.
pub fn parse_reviews(raw: &[Value]) -> Result<Vec<CommentRecord>> {
    let mut records = Vec::new();
    for value in raw {
        if let Some(record) = parse_review(value)? {
            records.push(record);
        }
    }
    debug!(
        count = records.len(),
        skipped = raw.len() - records.len(),
        "parsed review summaries"
    );
    Ok(records)
}

/// Keep only comments by `author` (exact, case-sensitive match).
///
/// `None` or an empty author returns the input untouched.
pub fn filter_by_author(records: Vec<CommentRecord>, author: Option<&str>) -> Vec<CommentRecord> {
    match author {
        Some(author) if !author.is_empty() => records
            .into_iter()
            .filter(|r| r.author == author)
            .collect(),
        _ => records,
    }
}

/// Keep the most recently updated comment for each file.
///
/// On equal `updated_at` the earlier comment is kept. Output follows the
/// order in which each file was first seen.
pub fn most_recent_per_file(records: Vec<CommentRecord>) -> Vec<CommentRecord> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut latest: Vec<CommentRecord> = Vec::new();

    for record in records {
        match slots.get(&record.file_path) {
            Some(&slot) => {
                if record.updated_at > latest[slot].updated_at {
                    latest[slot] = record;
                }
            }
            None => {
                slots.insert(record.file_path.clone(), latest.len());
                latest.push(record);
            }
        }
    }

    latest
}

/// Group comments by file path.
///
/// Groups appear in first-seen order and keep each file's comments in input order.
pub fn group_by_file(records: &[CommentRecord]) -> Vec<FileGroup<'_>> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<FileGroup<'_>> = Vec::new();

    for record in records {
        let path = record.file_path.as_str();
        match slots.get(path) {
            Some(&slot) => groups[slot].comments.push(record),
            None => {
                slots.insert(path, groups.len());
                groups.push(FileGroup {
                    file_path: path,
                    comments: vec![record],
                });
            }
        }
    }

    groups
}
