//! Translation orchestration
//!
//! Discovers input files, reads them, and runs the frontend and translator on each

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use py2smt::{SmtTranslator, Sort};

/// A source of program text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    pub fn from_option(path: Option<&PathBuf>) -> Self {
        match path {
            Some(path) => Input::File(path.clone()),
            None => Input::Stdin,
        }
    }

    pub fn read(&self) -> Result<String> {
        match self {
            Input::Stdin => std::io::read_to_string(std::io::stdin()).context("reading stdin"),
            Input::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display())),
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Stdin => write!(f, "<stdin>"),
            Input::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Result of translating one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Translated(String),
    Failed(String),
}

/// A translated (or failed) input
#[derive(Debug, Clone)]
pub struct TranslationReport {
    pub source: String,
    /// SHA-256 of the raw input text
    pub sha256: String,
    pub sort: Sort,
    pub outcome: Outcome,
}

impl TranslationReport {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }
}

/// Expand the given paths into inputs. Directories are walked recursively for
/// `.py` files (`.json` when `tree` is set); no paths means stdin.
pub fn discover_inputs(paths: &[PathBuf], tree: bool) -> Result<Vec<Input>> {
    if paths.is_empty() {
        return Ok(vec![Input::Stdin]);
    }

    let extension = if tree { "json" } else { "py" };
    let mut inputs = Vec::new();
    for path in paths {
        if path.is_dir() {
            inputs.extend(walk_directory(path, extension)?);
        } else if path.exists() {
            inputs.push(Input::File(path.clone()));
        } else {
            anyhow::bail!("{} does not exist", path.display());
        }
    }
    Ok(inputs)
}

fn walk_directory(root: &Path, extension: &str) -> Result<Vec<Input>> {
    let mut inputs = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e.path(), root))
    {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().and_then(|s| s.to_str()) == Some(extension)
        {
            inputs.push(Input::File(path.to_path_buf()));
        }
    }
    log::debug!(
        "Found {} .{} files under {}",
        inputs.len(),
        extension,
        root.display()
    );
    Ok(inputs)
}

/// Hidden and build directories below the root are not searched
fn is_skipped_dir(path: &Path, root: &Path) -> bool {
    if path == root {
        return false;
    }
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| {
            name.starts_with('.') || name == "__pycache__" || name == "venv" || name == "target"
        })
        .unwrap_or(false)
}

/// Translate one input. Only I/O failures are errors; syntax and translation
/// failures are recorded in the report.
pub fn translate_input(
    input: &Input,
    translator: SmtTranslator,
    tree: bool,
) -> Result<TranslationReport> {
    let content = input.read()?;
    log::info!("Translating {}", input);

    let result = if tree {
        py2smt::tree_from_json(&content)
            .and_then(|node| translator.translate(&node).map_err(py2smt::Error::from))
    } else {
        translator.translate_source(&content)
    };

    let outcome = match result {
        Ok(smt) => Outcome::Translated(smt),
        Err(e) => {
            log::debug!("Translation of {} failed", input);
            Outcome::Failed(e.to_string())
        }
    };

    Ok(TranslationReport {
        source: input.to_string(),
        sha256: format!("{:x}", Sha256::digest(content.as_bytes())),
        sort: translator.sort(),
        outcome,
    })
}
