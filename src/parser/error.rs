use thiserror::Error;

/// Malformed input reported by the lexer or parser.
///
/// `line` and `column` are 1-based; `text` is the offending source line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message} at line {line}, column {column}: {text}")]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub text: String,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, source: &str, line: usize, column: usize) -> Self {
        let text = source
            .lines()
            .nth(line.saturating_sub(1))
            .unwrap_or_default()
            .trim_end()
            .to_string();
        SyntaxError {
            message: message.into(),
            line,
            column,
            text,
        }
    }
}

pub type SyntaxResult<T> = Result<T, SyntaxError>;
