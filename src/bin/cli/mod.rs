//! CLI modules for py2smt
//!
//! Handles input discovery, per-file translation, and output formatting

pub mod output;
pub mod translate;
