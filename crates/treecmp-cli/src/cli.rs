use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use treecmp_index::AccessPolicy;
use treecmp_report::SummaryFormat;

#[derive(Parser)]
#[command(
    name = "treecmp",
    about = "Compare two directory trees by content checksum and report line diffs",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Directory for the daily log file
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for SummaryFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => SummaryFormat::Text,
            OutputFormat::Json => SummaryFormat::Json,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare a source tree against a target tree
    Compare(CompareArgs),
    /// Show the line diff between two files
    Diff(DiffArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    /// Source (baseline) directory
    pub source: PathBuf,
    /// Target (updated) directory
    pub target: PathBuf,
    /// Directory for CompareList.csv, diff files and logs
    pub result_dir: PathBuf,
    /// Write a unified diff for every changed text file
    #[arg(short = 'd', long)]
    pub emit_diffs: bool,
    /// What to do with unreadable files and directories
    #[arg(long, default_value = "abort")]
    pub on_access_denied: AccessMode,
    /// Hashing threads (0 or 1 hashes sequentially)
    #[arg(short = 'j', long, default_value = "0")]
    pub jobs: usize,
    /// Follow symbolic links
    #[arg(long)]
    pub follow_links: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum AccessMode {
    Abort,
    Skip,
}

impl From<AccessMode> for AccessPolicy {
    fn from(mode: AccessMode) -> Self {
        match mode {
            AccessMode::Abort => AccessPolicy::Abort,
            AccessMode::Skip => AccessPolicy::Skip,
        }
    }
}

#[derive(Args)]
pub struct DiffArgs {
    pub source: PathBuf,
    pub target: PathBuf,
}
