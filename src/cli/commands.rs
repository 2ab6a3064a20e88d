//! CLI command implementations
//!
//! All command functions return `miette::Result<ExitCode>` instead of calling
//! `process::exit`. Error reporting and exits happen in the top-level `run()`.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, WrapErr};
use reqlgen_syntax::diagnostics::format_error;
use reqlgen_syntax::parse_line;

use super::ExitCode;
use crate::classify::DslVars;
use crate::config::ConvertConfig;
use crate::convert::run_batch;
use crate::emit::{Mode, emit_statement};
use crate::errors::ItemError;
use crate::items::{ItemReader, TestItem};

type Items = Box<dyn Iterator<Item = Result<TestItem, ItemError>>>;

/// Convert item files and print every record as one JSON line.
///
/// Files that fail to open or break mid-stream are reported; the rest are still converted.
pub fn convert_files(files: &[PathBuf], table_vars: &[String], exclude: &[String]) -> miette::Result<ExitCode> {
    let mut config = ConvertConfig::new()
        .with_table_var_names(table_vars.iter().flat_map(|raw| ConvertConfig::parse_table_var_names(raw)));
    if !exclude.is_empty() {
        config = config.with_exclusions(exclude.iter().cloned());
    }

    let inputs = files.iter().map(|path| {
        let file_id = file_id(path);
        let items: Items = match File::open(path) {
            Ok(file) => Box::new(ItemReader::new(file_id.clone(), BufReader::new(file))),
            Err(e) => Box::new(std::iter::once(Err(ItemError::Io(e)))),
        };
        (file_id, items)
    });
    let outputs = run_batch(inputs, &config);

    let mut out = BufWriter::new(io::stdout().lock());
    let mut failed = 0usize;
    for output in &outputs {
        match &output.records {
            Ok(records) => {
                for record in records {
                    serde_json::to_writer(&mut out, record)
                        .into_diagnostic()
                        .wrap_err_with(|| format!("writing records for {}", output.file_id))?;
                    writeln!(out).into_diagnostic()?;
                }
            }
            Err(err) => {
                eprintln!("{}: {err}", output.file_id);
                failed += 1;
            }
        }
    }
    out.flush().into_diagnostic()?;

    if failed > 0 {
        return Err(miette::miette!("{failed} of {} files could not be converted", outputs.len()));
    }
    Ok(ExitCode::SUCCESS)
}

/// Convert one host line and print the Java text.
///
/// A line that parses but cannot be converted prints its skip reason and exits with failure.
pub fn convert_expr(source: &str, dsl_vars: &[String], plain: bool) -> miette::Result<ExitCode> {
    let config = ConvertConfig::new();
    let statement = parse_line(source).map_err(|errors| {
        let rendered: String = errors.iter().map(|e| format_error("<expr>", source, e)).collect();
        miette::miette!("{}", rendered.trim_end())
    })?;

    let mut vars = DslVars::for_file(&config);
    for name in dsl_vars {
        vars.insert(name);
    }
    let mode = if plain { Mode::Plain } else { Mode::Dsl };

    match emit_statement(&statement, mode, &vars, &config) {
        Ok(java) => {
            println!("{java}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("skipped: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// `tests/math/arith.jsonl` -> `tests/math/arith`
fn file_id(path: &Path) -> String {
    path.with_extension("").to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_id_drops_the_extension() {
        assert_eq!(file_id(Path::new("regression/1133.jsonl")), "regression/1133");
        assert_eq!(file_id(Path::new("math")), "math");
    }
}
