//! Command-line interface for the SED-ML library
//!
//! This binary provides a CLI to inspect and check SED-ML documents:
//! - Validating a document (reader diagnostics and consistency checks)
//! - Reading and writing a document back out
//! - Summarizing a document as tables
//!
//! # Usage
//!
//! ```bash
//! # Validate a document, printing colored results
//! sedml validate simulation.sedml
//!
//! # Validate a document, printing the report as JSON
//! sedml validate simulation.sedml --json
//!
//! # Round-trip a document through the reader and writer
//! sedml echo simulation.sedml copy.sedml
//!
//! # Show the contents of a document
//! sedml info simulation.sedml
//! ```

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{debug, error, LevelFilter};
use sedml::{
    errorlog::{SedErrorLog, Severity},
    info::summary_table,
    io::{read_sedml_from_file, SedWriter, WriterOptionsBuilder},
    validation::consistency::{check_consistency, Report},
};

/// Main CLI configuration struct
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print debug output of the reader and writer
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Read a document and check its consistency
    Validate {
        /// Path to the SED-ML document
        path: PathBuf,

        /// Print the diagnostics and the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read a document and write it back out
    Echo {
        /// Path to the SED-ML document to read
        input: PathBuf,

        /// Path to write the document to
        output: PathBuf,
    },
    /// Show a summary of a document
    Info {
        /// Path to the SED-ML document
        path: PathBuf,
    },
}

/// Main entry point for the CLI application
pub fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Error
    };
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();

    let code = match &cli.command {
        Commands::Validate { path, json } => validate(path, *json),
        Commands::Echo { input, output } => echo(input, output),
        Commands::Info { path } => info(path),
    };
    process::exit(code);
}

fn validate(path: &Path, json: bool) -> i32 {
    let document = read_sedml_from_file(path);
    let report = check_consistency(&document);
    let log = document.error_log();

    if json {
        #[derive(serde::Serialize)]
        struct Output<'a> {
            diagnostics: &'a SedErrorLog,
            consistency: &'a Report,
        }

        match serde_json::to_string_pretty(&Output {
            diagnostics: log,
            consistency: &report,
        }) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                error!("Failed to serialize the report: {err}");
                return 2;
            }
        }
    } else {
        if !log.is_empty() {
            println!("{log}");
        }
        for result in &report.results {
            println!("{result}");
        }
        if log.has_critical_errors() || !report.is_valid {
            println!("{}", "Document is invalid".bold().red());
        } else {
            println!("{}", "Document is valid".bold().green());
        }
    }

    if log.has_critical_errors() || !report.is_valid {
        1
    } else {
        0
    }
}

fn echo(input: &Path, output: &Path) -> i32 {
    let document = read_sedml_from_file(input);
    if document.error_log().num_errors_with_severity(Severity::Fatal) > 0 {
        eprintln!("{}", document.error_log());
        return 1;
    }
    debug!("Read {} with {} diagnostic(s)", input.display(), document.num_errors());

    let options = WriterOptionsBuilder::default()
        .program_name(env!("CARGO_PKG_NAME"))
        .program_version(env!("CARGO_PKG_VERSION"))
        .build();
    let writer = match options {
        Ok(options) => SedWriter::with_options(options),
        Err(err) => {
            error!("Invalid writer options: {err}");
            return 2;
        }
    };

    match writer.write_to_file(&document, output) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("Failed to write {}: {err}", output.display());
            1
        }
    }
}

fn info(path: &Path) -> i32 {
    let document = read_sedml_from_file(path);
    println!("{}", summary_table(&document));
    println!("{document}");
    i32::from(document.error_log().has_critical_errors())
}
