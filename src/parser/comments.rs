//! Comment stripping
//!
//! Pure text-to-text pass run before lexing. Removes `#` line comments and
//! `"""`-delimited block comments.

use regex::Regex;
use std::sync::LazyLock;

/// Everything from the first `#` of a line to its end
static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)#[^\n]*").expect("line comment pattern is valid")
});

const BLOCK_DELIMITER: &str = r#"""""#;

/// Remove comments from source text.
///
/// Each line is cut at its first `#`. The result is then split on `"""` and
/// every odd-indexed piece (the inside of a block comment) is dropped, so an
/// unterminated block comment swallows the rest of the input.
pub fn strip_comments(source: &str) -> String {
    let without_line_comments = LINE_COMMENT.replace_all(source, "");
    without_line_comments
        .split(BLOCK_DELIMITER)
        .step_by(2)
        .collect()
}
