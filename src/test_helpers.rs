use chrono::{DateTime, TimeZone, Utc};

use crate::comment::CommentRecord;

/// Timestamp on 2026-01-30 at the given UTC hour and minute.
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 30, hour, minute, 0)
        .single()
        .unwrap()
}

/// Create a `CommentRecord` with sensible defaults for tests.
pub fn make_record(id: u64, file: &str, line: Option<u32>, author: &str) -> CommentRecord {
    CommentRecord {
        id,
        file_path: file.to_string(),
        line_number: line,
        start_line: None,
        author: author.to_string(),
        body: format!("comment {id}"),
        created_at: at(10, 0),
        updated_at: at(10, 0),
        diff_hunk: "@@ -1,2 +1,3 @@\n fn main() {\n+    run();\n }".to_string(),
        html_url: format!("https://github.com/acme/widgets/pull/7#discussion_r{id}"),
    }
}
