//! # py2smt
//!
//! Translates a small subset of Python (arithmetic, boolean logic,
//! comparisons, assignment, `if/elif/else`, function definitions, `return`)
//! into SMT-LIB2 s-expressions for an external solver.
//!
//! This crate provides:
//! - `tree`: the generic syntax tree shared by frontends and the translator
//! - `parser`: comment stripping and a recursive-descent frontend
//! - `translator`: the syntax tree → SMT-LIB2 code generator
//!
//! ## Usage
//!
//! ```rust
//! use py2smt::{python_to_smt, Sort};
//!
//! let source = "def f(x):\n    y = x + 1\n    return y\n";
//! let smt = python_to_smt(source, Sort::Int).unwrap();
//! assert_eq!(smt, "(define-fun f ((x Int)) Int (let y (+ x 1))\ny)");
//! ```
//!
//! The output is one fragment per top-level statement, newline-separated; the
//! caller supplies `(assert ...)`/`(check-sat)` boilerplate.

pub mod parser;
pub mod translator;
pub mod tree;

pub use parser::{parse_source, strip_comments, SyntaxError};
pub use translator::{translate, SmtTranslator, TranslationError, UnsupportedPolicy};
pub use tree::{
    BinaryOperator, BoolOperator, CompareOperator, Constant, Node, Sort, UnaryOperator,
};

/// Errors from the full source → SMT-LIB2 pipeline
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed Python source
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Translation(#[from] TranslationError),
    /// Malformed serialized syntax tree
    #[error("Malformed syntax tree: {0}")]
    Tree(#[from] serde_json::Error),
}

/// Strip comments, parse, and translate Python source, marking unsupported
/// constructs with sentinels
pub fn python_to_smt(source: &str, sort: Sort) -> Result<String, Error> {
    SmtTranslator::new(sort).translate_source(source)
}

/// Read a syntax tree serialized as JSON by another frontend
pub fn tree_from_json(json: &str) -> Result<Node, Error> {
    Ok(serde_json::from_str(json)?)
}
