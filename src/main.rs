//! Main entry point for the apksize CLI application.
//!
//! Analyzes or compares archives, prints a report, and checks the
//! configured size budget.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use apksize::budget::BudgetViolation;
use apksize::cli::{Cli, Command, OutputArgs};
use apksize::report::{Report, write_report};
use apksize::{AnalysisResult, analyze, compare, logging};

/// Exit status when a size budget is exceeded.
const EXIT_BUDGET_EXCEEDED: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let budget = cli.command.budget();

    let violations = match &cli.command {
        Command::Analyze {
            archive, output, ..
        } => {
            let result = analyze_in_background(archive.clone()).await?;
            emit(Report::Analysis(&result), output)?;
            budget.check_analysis(&result)
        }
        Command::Compare {
            baseline,
            archive,
            output,
            ..
        } => {
            // The two analyses are independent, so read both archives at once
            let (old, new) = tokio::try_join!(
                analyze_in_background(baseline.clone()),
                analyze_in_background(archive.clone())
            )
            .context("cannot compare archives")?;

            let result = compare(Arc::new(old), Arc::new(new))?;
            emit(Report::Comparison(&result), output)?;
            budget.check_comparison(&result)
        }
    };

    Ok(report_violations(&violations))
}

/// Run a blocking analysis on tokio's blocking pool.
async fn analyze_in_background(path: PathBuf) -> Result<AnalysisResult> {
    let display = path.display().to_string();
    let result = tokio::task::spawn_blocking(move || analyze(&path))
        .await
        .context("analysis task panicked")?
        .with_context(|| format!("failed to analyze {display}"))?;
    Ok(result)
}

/// Write the report to the configured destination.
fn emit(report: Report<'_>, output: &OutputArgs) -> Result<()> {
    let options = output.report_options();
    match &output.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            write_report(&mut out, report, &options)?;
            out.flush()?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_report(&mut out, report, &options)?;
            out.flush()?;
        }
    }
    Ok(())
}

fn report_violations(violations: &[BudgetViolation]) -> ExitCode {
    if violations.is_empty() {
        return ExitCode::SUCCESS;
    }
    for violation in violations {
        eprintln!("Size budget exceeded: {violation}");
    }
    ExitCode::from(EXIT_BUDGET_EXCEEDED)
}
