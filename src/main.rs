//! dupescan - Content-Addressed Duplicate Finder
//!
//! Entry point for the dupescan CLI.

use std::io;
use std::sync::Arc;

use clap::Parser;

use dupescan::cli::{Cli, OutputFormat};
use dupescan::duplicates::{DuplicateFinder, FinderConfig};
use dupescan::error::{ExitCode, StructuredError};
use dupescan::output;
use dupescan::progress::Progress;

fn main() {
    let cli = Cli::parse();
    let json_errors = cli.json_errors;

    dupescan::logging::init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::GeneralError;
            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                if let Ok(json) = serde_json::to_string_pretty(&structured) {
                    eprintln!("{json}");
                } else {
                    eprintln!("[{}] Error: {}", exit_code.code_prefix(), err);
                }
            } else {
                eprintln!("[{}] Error: {}", exit_code.code_prefix(), err);
            }
            std::process::exit(exit_code.as_i32());
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let mut config = FinderConfig::default()
        .with_size_threshold_mb(cli.min_size_mb)
        .with_extensions(cli.extensions.clone())
        .with_workers(cli.workers)
        .with_keep_going(cli.keep_going)
        // The CLI renders the chosen format itself
        .with_verbose(false);

    // Progress bars only make sense for interactive table output
    if cli.output == OutputFormat::Table && !cli.quiet {
        config = config.with_progress(Arc::new(Progress::new(cli.quiet)));
    }

    let finder = DuplicateFinder::new(config);
    let (report, summary) = finder.find(&cli.path)?;

    match cli.output {
        OutputFormat::Table => {
            output::table::render(&report, &summary, &mut io::stdout())?;
        }
        OutputFormat::Json => {
            output::json::JsonOutput::new(&report, &summary).write_to(io::stdout())?;
        }
        OutputFormat::Csv => {
            output::csv::CsvOutput::new(&report).write_to(io::stdout())?;
        }
    }

    Ok(if report.is_empty() {
        ExitCode::NoDuplicates
    } else {
        ExitCode::Success
    })
}
