//! Translator module
//!
//! This module contains:
//! - `smt_translator`: syntax tree → SMT-LIB2 text

pub mod smt_translator;

pub use smt_translator::*;

use crate::tree::{Node, Sort};

/// Translate a tree with the given result sort, marking unsupported
/// constructs with sentinels
pub fn translate(tree: &Node, sort: Sort) -> Result<String, TranslationError> {
    SmtTranslator::new(sort).translate(tree)
}
