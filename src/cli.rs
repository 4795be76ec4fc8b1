use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::budget::SizeBudget;
use crate::report::{DEFAULT_TOP, ReportFormat, ReportOptions};

const KB: u64 = 1024;
const MB: u64 = KB * 1024;

#[derive(Parser, Debug)]
#[command(name = "apksize")]
#[command(version)]
#[command(about = "Size breakdown and size-regression diffing for APK and other zip archives", long_about = None)]
#[command(after_help = "Examples:\n  \
  apksize analyze app-release.apk                    folder and file type breakdown\n  \
  apksize analyze app.apk --format csv -o files.csv  export the entry list\n  \
  apksize analyze app.apk --format html -o size.html standalone HTML report\n  \
  apksize compare --baseline old.apk new.apk         diff two builds\n  \
  APKSIZE_BASELINE=main.apk apksize compare pr.apk --max-increase-kb 200")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report the size composition of one archive
    Analyze {
        /// Archive to analyze
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        budget: BudgetArgs,
    },

    /// Diff the sizes of two archives
    Compare {
        /// Baseline (old) archive
        #[arg(long, value_name = "ARCHIVE", env = "APKSIZE_BASELINE")]
        baseline: PathBuf,

        /// Archive to compare against the baseline
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        budget: BudgetArgs,

        /// Fail when the archive grew by more than this many KiB
        #[arg(long, value_name = "KB", env = "APKSIZE_MAX_INCREASE_KB")]
        max_increase_kb: Option<u64>,
    },
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text, env = "APKSIZE_FORMAT")]
    pub format: ReportFormat,

    /// Rows to show in per-file tables
    #[arg(long, value_name = "N", default_value_t = DEFAULT_TOP, env = "APKSIZE_TOP")]
    pub top: usize,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Size limits checked after the report is written.
#[derive(Args, Debug)]
pub struct BudgetArgs {
    /// Fail when the (new) archive is larger than this many MiB
    #[arg(long, value_name = "MB", env = "APKSIZE_MAX_SIZE_MB")]
    pub max_size_mb: Option<u64>,
}

impl OutputArgs {
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            format: self.format,
            top: self.top,
        }
    }
}

impl Command {
    pub fn output(&self) -> &OutputArgs {
        match self {
            Command::Analyze { output, .. } | Command::Compare { output, .. } => output,
        }
    }

    pub fn budget(&self) -> SizeBudget {
        let (budget, max_increase_kb) = match self {
            Command::Analyze { budget, .. } => (budget, None),
            Command::Compare {
                budget,
                max_increase_kb,
                ..
            } => (budget, *max_increase_kb),
        };
        SizeBudget {
            max_total_size: budget.max_size_mb.map(|mb| mb.saturating_mul(MB)),
            max_increase: max_increase_kb.map(|kb| kb.saturating_mul(KB)),
        }
    }
}
