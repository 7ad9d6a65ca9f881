use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use colored::Colorize;
use tracing::info;
use treecmp_diff::diff_bytes;
use treecmp_index::{ContentClassifier, SniffClassifier};
use treecmp_reconcile::{compare_trees, CompareConfig};
use treecmp_report::{render_summary, CompareListWriter};

use crate::cli::*;
use crate::logging;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Compare(args) => cmd_compare(args, cli.format, cli.verbose, cli.log_dir),
        Command::Diff(args) => cmd_diff(args, cli.format, cli.verbose, cli.log_dir),
    }
}

fn cmd_compare(
    args: CompareArgs,
    format: OutputFormat,
    verbose: bool,
    log_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Both roots are checked before anything is written.
    for (label, root) in [("source", &args.source), ("target", &args.target)] {
        if !root.is_dir() {
            bail!("{label} directory not found: {}", root.display());
        }
    }
    fs::create_dir_all(&args.result_dir).with_context(|| {
        format!("failed to create result directory {}", args.result_dir.display())
    })?;

    let log_dir = log_dir.unwrap_or_else(|| args.result_dir.join("log"));
    logging::init(verbose, Some(&log_dir))?;

    let config = CompareConfig {
        emit_diffs: args.emit_diffs,
        access_policy: args.on_access_denied.into(),
        follow_links: args.follow_links,
        hash_workers: args.jobs,
        ..CompareConfig::new(&args.source, &args.target, &args.result_dir)
    };
    info!(
        source = %config.source_root.display(),
        target = %config.target_root.display(),
        "comparing trees"
    );

    let classifier: Arc<dyn ContentClassifier> = Arc::new(SniffClassifier::default());
    let comparison = compare_trees(&config, classifier)?;
    let writer = CompareListWriter::new(&args.result_dir);
    let list_path = writer.write(&comparison.entries)?;

    let summary = render_summary(&comparison.summary, format.into())?;
    match format {
        OutputFormat::Json => println!("{summary}"),
        OutputFormat::Text => {
            println!(
                "{} {} {} {}",
                "Compared".green().bold(),
                comparison.source_root.display(),
                "->".dimmed(),
                comparison.target_root.display()
            );
            println!();
            print!("{summary}");
            println!();
            if !comparison.summary.has_differences() {
                println!("  {}", "Trees are identical".green());
            }
            println!("  Comparison list: {}", list_path.display().to_string().cyan());
            if let Some(dir) = config.diff_dir() {
                println!(
                    "  Diff files:      {} ({})",
                    dir.display().to_string().cyan(),
                    comparison.summary.diffs_written
                );
            }
            for issue in &comparison.issues {
                println!(
                    "  {} {} ({:?}: {})",
                    "skipped:".yellow(),
                    issue.path.display(),
                    issue.kind,
                    issue.message
                );
            }
        }
    }
    Ok(())
}

fn cmd_diff(
    args: DiffArgs,
    format: OutputFormat,
    verbose: bool,
    log_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    logging::init(verbose, log_dir.as_deref())?;

    let old = fs::read(&args.source)
        .with_context(|| format!("failed to read {}", args.source.display()))?;
    let new = fs::read(&args.target)
        .with_context(|| format!("failed to read {}", args.target.display()))?;

    let classifier = SniffClassifier::default();
    let both_text = classifier.classify(&mut Cursor::new(&old))?.is_text()
        && classifier.classify(&mut Cursor::new(&new))?.is_text();
    if !both_text {
        if old != new {
            println!(
                "Binary files {} and {} differ",
                args.source.display(),
                args.target.display()
            );
        }
        return Ok(());
    }

    let diff = diff_bytes(&old, &new);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        OutputFormat::Text => {
            let source = args.source.display().to_string();
            let target = args.target.display().to_string();
            for line in diff.to_unified(Some((&source, &target))).lines() {
                println!("{}", paint(line));
            }
        }
    }
    Ok(())
}

fn paint(line: &str) -> colored::ColoredString {
    if line.starts_with("---") || line.starts_with("+++") {
        line.bold()
    } else if line.starts_with("@@") {
        line.cyan()
    } else if line.starts_with('-') {
        line.red()
    } else if line.starts_with('+') {
        line.green()
    } else {
        line.dimmed()
    }
}
