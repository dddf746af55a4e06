use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::comment::CommentRecord;

// An unterminated comment swallows the rest of the text.
static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?(?:-->|\z)").unwrap());
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Strip HTML comments and tags from a comment body, keeping the text between them.
///
/// Bot reviewers wrap findings in `<details>` blocks, badges and hidden
/// `<!-- ... -->` metadata. Runs of three or more newlines left behind are
/// collapsed to a single blank line. Text without `<` is returned borrowed.
pub fn strip_html(input: &str) -> Cow<'_, str> {
    if !input.contains('<') {
        return Cow::Borrowed(input);
    }

    let without_comments = HTML_COMMENT.replace_all(input, "");
    let without_tags = HTML_TAG.replace_all(&without_comments, "");
    Cow::Owned(BLANK_RUN.replace_all(&without_tags, "\n\n").into_owned())
}

/// Apply [`strip_html`] to every record's body.
pub fn strip_bodies(records: Vec<CommentRecord>) -> Vec<CommentRecord> {
    records
        .into_iter()
        .map(|record| {
            let body = strip_html(&record.body).into_owned();
            CommentRecord { body, ..record }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::make_record;

    #[test]
    fn test_plain_text_is_borrowed() {
        let input = "Plain text with **markdown** and `code`";
        assert!(matches!(strip_html(input), Cow::Borrowed(s) if s == input));
    }

    #[test]
    fn test_simple_and_nested_tags() {
        assert_eq!(strip_html("<p>Hello</p>"), "Hello");
        assert_eq!(
            strip_html("<div><p>Hello <strong>World</strong></p></div>"),
            "Hello World"
        );
    }

    #[test]
    fn test_tag_with_attributes() {
        let input = r#"<a href="https://example.com" target="_blank">Link</a>"#;
        assert_eq!(strip_html(input), "Link");
    }

    #[test]
    fn test_self_closing_tag() {
        assert_eq!(strip_html("Line 1<br/>Line 2"), "Line 1Line 2");
    }

    #[test]
    fn test_html_comment_removed() {
        assert_eq!(strip_html("Before<!-- comment -->After"), "BeforeAfter");
        assert_eq!(
            strip_html("Before<!-- \nmultiline\ncomment\n -->After"),
            "BeforeAfter"
        );
    }

    #[test]
    fn test_unterminated_comment_swallows_rest() {
        assert_eq!(strip_html("Keep<!-- never closed > oops"), "Keep");
    }

    #[test]
    fn test_mixed_content() {
        let input = "Normal text <strong>bold</strong> more text <!-- hidden --> end";
        assert_eq!(strip_html(input), "Normal text bold more text  end");
    }

    #[test]
    fn test_bot_metadata_comment() {
        let input = "<!-- devin-review-comment {\"id\": \"BUG_123\"} -->\n\n🔴 **Bug found**";
        assert_eq!(strip_html(input), "\n\n🔴 **Bug found**");
    }

    #[test]
    fn test_details_block_keeps_text() {
        let input = "<details>\n<summary>Click to expand</summary>\n\nContent here\n\n</details>";
        let result = strip_html(input);
        assert!(!result.contains("<details>"));
        assert!(!result.contains("<summary>"));
        assert!(result.contains("Click to expand"));
        assert!(result.contains("Content here"));
    }

    #[test]
    fn test_blank_runs_collapsed() {
        assert_eq!(strip_html("Line 1<br>\n\n\n\n\nLine 2"), "Line 1\n\nLine 2");
    }

    #[test]
    fn test_code_fence_preserved() {
        let input = "```python\nprint('hello')\n```";
        assert_eq!(strip_html(input), input);
    }

    #[test]
    fn test_strip_bodies() {
        let records = vec![
            crate::comment::CommentRecord {
                body: "<b>Fix</b> this".to_string(),
                ..make_record(1, "a.rs", Some(1), "alice")
            },
            make_record(2, "b.rs", Some(2), "bob"),
        ];
        let stripped = strip_bodies(records);
        assert_eq!(stripped[0].body, "Fix this");
        assert_eq!(stripped[1].body, "comment 2");
    }
}
