//! Command-line front end for py2smt
//!
//! Usage: py2smt translate [options] [PATHS...]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use py2smt::{SmtTranslator, Sort, UnsupportedPolicy};

mod cli;

use cli::output::OutputFormat;

#[derive(Parser)]
#[command(name = "py2smt")]
#[command(about = "Translate a Python subset into SMT-LIB2", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbose output (debug logging; RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate Python files (or directories of them) to SMT-LIB2
    Translate {
        /// Files or directories to translate (default: stdin)
        paths: Vec<PathBuf>,

        /// Sort of every function parameter and result
        #[arg(long, default_value = "Int")]
        sort: Sort,

        /// Fail on unsupported constructs instead of emitting UNKNOWN_TYPE_ markers
        #[arg(long)]
        strict: bool,

        /// Inputs are JSON syntax trees instead of Python source
        #[arg(long)]
        tree: bool,

        /// Output format
        #[arg(long, default_value = "smt")]
        format: OutputFormat,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print source with comments removed
    Strip {
        /// Input file (default: stdin)
        path: Option<PathBuf>,
    },

    /// Print the syntax tree of a Python file as JSON
    Parse {
        /// Input file (default: stdin)
        path: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Commands::Translate {
            paths,
            sort,
            strict,
            tree,
            format,
            output,
        } => {
            let policy = if strict {
                UnsupportedPolicy::Strict
            } else {
                UnsupportedPolicy::Sentinel
            };
            let translator = SmtTranslator::new(sort).with_policy(policy);
            handle_translate(&paths, translator, tree, format, output.as_ref())
        }
        Commands::Strip { path } => handle_strip(path.as_ref()),
        Commands::Parse { path } => handle_parse(path.as_ref()),
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn handle_translate(
    paths: &[PathBuf],
    translator: SmtTranslator,
    tree: bool,
    format: OutputFormat,
    output_path: Option<&PathBuf>,
) -> i32 {
    let inputs = match cli::translate::discover_inputs(paths, tree) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("Error discovering inputs: {:#}", e);
            return 1;
        }
    };

    if inputs.is_empty() {
        eprintln!("No input files found");
        return 1;
    }

    let mut reports = Vec::new();
    for input in &inputs {
        match cli::translate::translate_input(input, translator, tree) {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("Error reading {}: {:#}", input, e);
                return 1;
            }
        }
    }

    let output = cli::output::format_reports(&reports, format);
    if let Err(e) = cli::output::write_output(&output, output_path) {
        eprintln!("Error writing output: {:#}", e);
        return 1;
    }

    eprint!("{}", cli::output::format_failures(&reports, format));

    if reports.iter().any(|report| report.is_failure()) {
        1
    } else {
        0
    }
}

fn handle_strip(path: Option<&PathBuf>) -> i32 {
    let input = cli::translate::Input::from_option(path);
    match input.read() {
        Ok(source) => {
            print!("{}", py2smt::strip_comments(&source));
            0
        }
        Err(e) => {
            eprintln!("Error reading {}: {:#}", input, e);
            1
        }
    }
}

fn handle_parse(path: Option<&PathBuf>) -> i32 {
    let input = cli::translate::Input::from_option(path);
    let source = match input.read() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {}: {:#}", input, e);
            return 1;
        }
    };

    let tree = match py2smt::parse_source(&source) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("{}: Syntax error: {}", input, e);
            return 1;
        }
    };

    match serde_json::to_string_pretty(&tree) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error serializing syntax tree: {}", e);
            1
        }
    }
}
