//! Frontend for the Python subset
//!
//! This module contains:
//! - `comments`: strips `#` and `"""` comments from source text
//! - `lexer`: indentation-aware tokenizer
//! - `syntax`: recursive-descent parser producing the generic syntax tree

pub mod comments;
pub mod error;
pub mod lexer;
pub mod syntax;

pub use comments::strip_comments;
pub use error::{SyntaxError, SyntaxResult};
pub use syntax::{parse, Parser};

/// Strip comments, then parse
pub fn parse_source(source: &str) -> SyntaxResult<crate::tree::Node> {
    let stripped = strip_comments(source);
    log::debug!(
        "Parsing {} bytes ({} after comment stripping)",
        source.len(),
        stripped.len()
    );
    parse(&stripped)
}
