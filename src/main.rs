//! filesift - inventory and classify recently changed files.
//!
//! Usage:
//!   filesift [ROOTS]...          Scan and print a category summary
//!   filesift --days 30 ~/Downloads
//!   filesift --format json       Emit the full result as JSON
//!   filesift --policy rules.json Use a policy file instead of defaults

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use humansize::{BINARY, format_size};

use filesift_analyze::{Aggregator, ClassificationResult};
use filesift_classify::{Classify, ContentHintClassifier, ExtensionClassifier, classify_all};
use filesift_core::{ScanParams, SiftPolicy};
use filesift_scan::{Walker, dedup};

#[derive(Parser)]
#[command(
    name = "filesift",
    version,
    about = "Inventory, classify, and summarize recently changed files",
    long_about = "filesift walks the given roots (or the policy defaults), keeps files \
                  created or modified within the cutoff window, classifies them by \
                  extension, and prints per-category and statistical summaries."
)]
struct Cli {
    /// Roots to scan (defaults to the policy's configured roots)
    roots: Vec<PathBuf>,

    /// Cutoff age in days
    #[arg(short, long, default_value = "7")]
    days: u32,

    /// Include hidden files and directories
    #[arg(long)]
    hidden: bool,

    /// Maximum recursion depth
    #[arg(long, default_value = "10")]
    depth: u32,

    /// Classification policy file (JSON); defaults are compiled in
    #[arg(short, long)]
    policy: Option<PathBuf>,

    /// Classify by content hints (flags/MIME/filename) instead of the
    /// extension rule table
    #[arg(long)]
    hints: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let policy = match &cli.policy {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("reading policy file {}", path.display()))?;
            serde_json::from_str::<SiftPolicy>(&raw)
                .wrap_err_with(|| format!("parsing policy file {}", path.display()))?
        }
        None => SiftPolicy::default(),
    };
    policy.validate().wrap_err("invalid classification policy")?;

    let params = ScanParams::builder()
        .cutoff_days(cli.days)
        .roots(cli.roots.clone())
        .include_hidden(cli.hidden)
        .max_depth(cli.depth)
        .build()
        .map_err(|e| color_eyre::eyre::eyre!("invalid scan parameters: {e}"))?;

    let outcome = Walker::new(&policy, &params).walk();
    let mut records = dedup(outcome.records);

    let extension = ExtensionClassifier::new(&policy);
    let hints = ContentHintClassifier::new();
    let classifier: &dyn Classify = if cli.hints { &hints } else { &extension };
    classify_all(classifier, &mut records);

    let result = Aggregator::new(&policy)
        .aggregate(records)
        .with_scan_report(outcome.warnings, outcome.skipped);

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_summary(&result),
    }

    Ok(())
}

fn print_summary(result: &ClassificationResult) {
    println!(
        "{} files, {} total",
        result.total_files,
        format_size(result.total_size(), BINARY)
    );

    for summary in &result.summaries {
        println!(
            "  {:<8} {:>6} files  {:>10}  {:>6.2}%  {}",
            summary.label,
            summary.count,
            format_size(summary.total_size, BINARY),
            summary.percentage,
            summary.description,
        );
    }

    let stats = &result.statistics;
    if !stats.largest_files.is_empty() {
        println!("\nLargest:");
        for record in &stats.largest_files {
            println!(
                "  {:>10}  {}",
                format_size(record.size, BINARY),
                record.path.display()
            );
        }
    }

    if !stats.duplicate_groups.is_empty() {
        println!("\nCandidate duplicates (same size and mtime):");
        for group in &stats.duplicate_groups {
            println!(
                "  {} x {} ({} reclaimable)",
                group.count(),
                format_size(group.size, BINARY),
                format_size(group.wasted_bytes, BINARY)
            );
            for path in &group.paths {
                println!("    {}", path.display());
            }
        }
    }

    if result.skipped.total() > 0 {
        eprintln!(
            "\nskipped: {} missing roots, {} unreadable directories, {} stat failures",
            result.skipped.missing_roots,
            result.skipped.unreadable_dirs,
            result.skipped.stat_failures
        );
    }
}
