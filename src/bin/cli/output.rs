//! Output formatting for translation reports
//!
//! Formats reports as raw SMT-LIB2, human-readable text, or JSON

use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::cli::translate::{Outcome, TranslationReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Bare SMT-LIB2 fragments
    Smt,
    Human,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "smt" | "smt2" => Ok(OutputFormat::Smt),
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown format '{}' (expected smt, human or json)",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Smt => "smt",
            OutputFormat::Human => "human",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// Format translation reports
pub fn format_reports(reports: &[TranslationReport], format: OutputFormat) -> String {
    match format {
        OutputFormat::Smt => format_smt(reports),
        OutputFormat::Human => format_human(reports),
        OutputFormat::Json => format_json(reports),
    }
}

/// Failure lines for stderr, one per failed input. Only the raw SMT format
/// needs them; the other formats carry failures in the report itself.
pub fn format_failures(reports: &[TranslationReport], format: OutputFormat) -> String {
    if format != OutputFormat::Smt {
        return String::new();
    }
    let mut output = String::new();
    for report in reports {
        if let Outcome::Failed(error) = &report.outcome {
            output.push_str(&format!("{}: {}\n", report.source, error));
        }
    }
    output
}

/// Write to the given file, or stdout when none is given
pub fn write_output(output: &str, path: Option<&PathBuf>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, output)
            .with_context(|| format!("writing {}", path.display())),
        None => {
            print!("{}", output);
            Ok(())
        }
    }
}

/// Translated fragments only. With several inputs each block is preceded by
/// an SMT-LIB2 comment naming its source.
fn format_smt(reports: &[TranslationReport]) -> String {
    let mut output = String::new();
    let label = reports.len() > 1;
    for report in reports {
        if let Outcome::Translated(smt) = &report.outcome {
            if label {
                output.push_str(&format!("; {}\n", report.source));
            }
            output.push_str(smt);
            output.push('\n');
        }
    }
    output
}

fn format_human(reports: &[TranslationReport]) -> String {
    let mut output = String::new();
    output.push_str("Translating Python to SMT-LIB2...\n\n");

    for report in reports {
        output.push_str(&format!("{} (sort {})\n", report.source, report.sort));
        match &report.outcome {
            Outcome::Translated(smt) => {
                output.push_str("  ✅ Status: TRANSLATED\n");
                for line in smt.lines() {
                    output.push_str(&format!("    {}\n", line));
                }
            }
            Outcome::Failed(error) => {
                output.push_str("  ❌ Status: FAILED\n");
                output.push_str(&format!("    Reason: {}\n", error));
            }
        }
        output.push('\n');
    }

    let failed = reports.iter().filter(|r| r.is_failure()).count();
    output.push_str(&format!(
        "result: {}. {} translated; {} failed\n",
        if failed > 0 { "FAILED" } else { "ok" },
        reports.len() - failed,
        failed
    ));
    output
}

fn format_json(reports: &[TranslationReport]) -> String {
    use serde_json::json;

    let failed = reports.iter().filter(|r| r.is_failure()).count();

    let mut results = Vec::new();
    for report in reports {
        let mut result = json!({
            "file": report.source,
            "sha256": report.sha256,
            "sort": report.sort.to_string(),
        });
        match &report.outcome {
            Outcome::Translated(smt) => {
                result["status"] = json!("translated");
                result["smt"] = json!(smt);
            }
            Outcome::Failed(error) => {
                result["status"] = json!("failed");
                result["error"] = json!(error);
            }
        }
        results.push(result);
    }

    let output = json!({
        "summary": {
            "total": reports.len(),
            "translated": reports.len() - failed,
            "failed": failed,
        },
        "results": results,
    });

    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}
