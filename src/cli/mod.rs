//! CLI module for reqlgen
//!
//! ## Commands
//!
//! - `convert <FILE.jsonl>...` - Convert test-item streams, printing one JSON record per line
//! - `expr <SOURCE>` - Convert a single host line and print the Java text
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `miette::Result<ExitCode>` instead of calling `process::exit`.
//! Only the top-level `run()` function reports errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert host-language driver tests into Java driver tests
#[derive(Parser, Debug)]
#[command(name = "reqlgen")]
#[command(version = VERSION)]
#[command(about = "Convert host-language driver tests into Java driver tests", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert JSON-lines test-item files
    Convert {
        /// Item files; the file id is the path without its extension
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
        /// Table variables known to be DSL values (space or comma separated)
        #[arg(long = "table-var", value_name = "NAMES")]
        table_vars: Vec<String>,
        /// Skip files whose id starts with this prefix (replaces the default list)
        #[arg(long = "exclude", value_name = "PREFIX")]
        exclude: Vec<String>,
    },

    /// Convert a single host line
    Expr {
        /// Host expression or assignment
        #[arg(value_name = "SOURCE")]
        source: String,
        /// Extra names known to be DSL values
        #[arg(long = "dsl-var", value_name = "NAME")]
        dsl_vars: Vec<String>,
        /// Emit a bare expression as a plain value instead of a DSL chain
        #[arg(long)]
        plain: bool,
    },
}

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code != ExitCode::SUCCESS {
                process::exit(exit_code.0);
            }
        }
        Err(report) => {
            eprintln!("{report:?}");
            process::exit(ExitCode::FAILURE.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> miette::Result<ExitCode> {
    match cli.command {
        Command::Convert {
            files,
            table_vars,
            exclude,
        } => commands::convert_files(&files, &table_vars, &exclude),
        Command::Expr {
            source,
            dsl_vars,
            plain,
        } => commands::convert_expr(&source, &dsl_vars, plain),
    }
}
