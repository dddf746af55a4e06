use chrono::{DateTime, Utc};

/// Marker that opens a unified-diff hunk header line.
const HUNK_HEADER_MARKER: &str = "@@";

/// A single pull request review comment in canonical form.
///
/// Text fields are never absent: the parser substitutes an empty string or
/// the `"unknown"` sentinel when the raw record lacks a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub id: u64,
    pub file_path: String,
    pub line_number: Option<u32>,
    pub start_line: Option<u32>,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub diff_hunk: String,
    pub html_url: String,
}

impl CommentRecord {
    /// Extract the tail of the diff hunk for display.
    ///
    /// Every line starting with `@@` is dropped, wherever it appears. When more
    /// than `max_lines` lines remain only the last `max_lines` are kept, since
    /// the comment is anchored at the end of the hunk.
    pub fn code_snippet(&self, max_lines: usize) -> String {
        if self.diff_hunk.is_empty() {
            return String::new();
        }

        let content: Vec<&str> = self
            .diff_hunk
            .split('\n')
            .filter(|line| !line.starts_with(HUNK_HEADER_MARKER))
            .collect();

        let skip = content.len().saturating_sub(max_lines);
        content[skip..].join("\n")
    }

    /// Human-readable anchor: `lines 45-50`, `line 42` or `line unknown`.
    pub fn line_info(&self) -> String {
        match (self.start_line, self.line_number) {
            (Some(start), Some(line)) if start != line => format!("lines {start}-{line}"),
            (_, Some(line)) => format!("line {line}"),
            (_, None) => "line unknown".to_string(),
        }
    }

    /// Line number used for ordering; file-level comments sort as line 0.
    pub fn sort_line(&self) -> u32 {
        self.line_number.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::make_record;

    fn with_hunk(hunk: &str) -> CommentRecord {
        CommentRecord {
            diff_hunk: hunk.to_string(),
            ..make_record(1, "src/main.rs", Some(10), "alice")
        }
    }

    fn with_lines(start: Option<u32>, line: Option<u32>) -> CommentRecord {
        CommentRecord {
            start_line: start,
            ..make_record(1, "src/main.rs", line, "alice")
        }
    }

    #[test]
    fn test_line_info_single_line() {
        assert_eq!(with_lines(None, Some(42)).line_info(), "line 42");
    }

    #[test]
    fn test_line_info_range() {
        assert_eq!(with_lines(Some(45), Some(50)).line_info(), "lines 45-50");
    }

    #[test]
    fn test_line_info_range_with_equal_ends_is_single_line() {
        assert_eq!(with_lines(Some(42), Some(42)).line_info(), "line 42");
    }

    #[test]
    fn test_line_info_unknown() {
        assert_eq!(with_lines(None, None).line_info(), "line unknown");
        assert_eq!(with_lines(Some(7), None).line_info(), "line unknown");
    }

    #[test]
    fn test_snippet_empty_hunk() {
        assert_eq!(with_hunk("").code_snippet(10), "");
    }

    #[test]
    fn test_snippet_strips_header_and_passes_short_hunk_through() {
        let record = with_hunk("@@ -1,3 +1,4 @@ fn main() {\n     let a = 1;\n+    let b = 2;\n }");
        assert_eq!(
            record.code_snippet(10),
            "     let a = 1;\n+    let b = 2;\n }"
        );
    }

    #[test]
    fn test_snippet_keeps_last_lines_when_truncating() {
        let mut hunk = String::from("@@ -1,20 +1,20 @@");
        for i in 0..20 {
            hunk.push_str(&format!("\nline {i}"));
        }
        let snippet = with_hunk(&hunk).code_snippet(5);
        let lines: Vec<&str> = snippet.split('\n').collect();
        assert_eq!(
            lines,
            vec!["line 15", "line 16", "line 17", "line 18", "line 19"]
        );
    }

    #[test]
    fn test_snippet_drops_header_lines_anywhere() {
        let record = with_hunk("@@ -1,2 +1,2 @@\n a\n@@ -10,2 +10,2 @@\n b");
        assert_eq!(record.code_snippet(10), " a\n b");
    }

    #[test]
    fn test_snippet_exact_fit_is_unchanged() {
        let record = with_hunk("@@ -1,3 +1,3 @@\n a\n b\n c");
        assert_eq!(record.code_snippet(3), " a\n b\n c");
    }

    #[test]
    fn test_sort_line_treats_absent_as_zero() {
        assert_eq!(with_lines(None, None).sort_line(), 0);
        assert_eq!(with_lines(None, Some(9)).sort_line(), 9);
    }
}
