//! CLI command handling, separated from main.rs to enable unit testing.

use crate::cli::Cli;
use crate::exclusion::ExclusionList;
use crate::export::{CsvSink, FindingsSink, JsonlSink};
use crate::pipeline::{self, RunSummary};
use crate::report::load_report;
use colored::Colorize;
use std::process::ExitCode;
use tracing::{debug, info};

/// Result type for handler functions that can be tested.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerResult {
    Success,
    Error(u8),
}

impl From<HandlerResult> for ExitCode {
    fn from(result: HandlerResult) -> Self {
        match result {
            HandlerResult::Success => ExitCode::SUCCESS,
            HandlerResult::Error(code) => ExitCode::from(code),
        }
    }
}

/// Run the full pipeline for the parsed CLI. Exit codes: 0 for a clean
/// run, 1 when findings were skipped or imports failed, 2 for fatal setup
/// errors (unreadable input, bad exclusion file).
pub fn run_pipeline(cli: &Cli) -> HandlerResult {
    let report = match load_report(&cli.input) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{e}");
            return HandlerResult::Error(2);
        }
    };
    info!(path = %cli.input.display(), findings = report.findings.len(), "loaded report");

    // The exclusion file must be fully validated before any finding is
    // processed; an arity mismatch here aborts the run.
    let exclusions = match &cli.exclusions {
        Some(path) => match ExclusionList::load(path, cli.matcher) {
            Ok(list) => {
                debug!(rules = list.len(), "loaded exclusion list");
                list
            }
            Err(e) => {
                eprintln!("{e}");
                return HandlerResult::Error(2);
            }
        },
        None => ExclusionList::empty(cli.matcher),
    };

    let mut csv = if cli.skip_csv {
        None
    } else {
        match CsvSink::open(&cli.output) {
            Ok(sink) => Some(sink),
            Err(e) => {
                eprintln!("{e}");
                return HandlerResult::Error(2);
            }
        }
    };

    let mut sink = if cli.skip_import {
        None
    } else {
        match JsonlSink::open(&cli.findings_out) {
            Ok(sink) => Some(sink),
            Err(e) => {
                eprintln!("{e}");
                return HandlerResult::Error(2);
            }
        }
    };

    let summary = match pipeline::run(
        &report,
        &exclusions,
        csv.as_mut(),
        sink.as_mut().map(|s| s as &mut dyn FindingsSink),
        cli.scope,
    ) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{e}");
            return HandlerResult::Error(2);
        }
    };

    print_summary(&summary);

    if summary.is_clean() {
        HandlerResult::Success
    } else {
        HandlerResult::Error(1)
    }
}

fn print_summary(summary: &RunSummary) {
    println!(
        "{} {} processed, {} excluded, {} exported",
        "Done:".green().bold(),
        summary.processed,
        summary.excluded,
        summary.exported
    );
    if summary.skipped > 0 {
        println!(
            "{} {} finding(s) skipped (missing gateway component)",
            "Warning:".yellow().bold(),
            summary.skipped
        );
    }
    if summary.failed_imports > 0 {
        println!(
            "{} {} import(s) failed",
            "Warning:".yellow().bold(),
            summary.failed_imports
        );
    }
}
