//! dirsift - Find interesting files in a scanned directory tree.
//!
//! Usage:
//!   dirsift discover <CATEGORY> <TREE.json>   List the items of one category
//!   dirsift all <TREE.json>                   Count matches for every category
//!   dirsift categories                        List known categories
//!   dirsift --help                            Show help

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use serde::Deserialize;
use strum::IntoEnumIterator;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use dirsift_analyze::{Category, DiscoveredItem, Discovery, DiscoveryReport, ThresholdValue};
use dirsift_core::{FileNode, FileTree, ThresholdConfig, TreeStats};
use dirsift_render::{fill_width, percent_of_parent};

/// Width of the text percent bar in characters.
const BAR_WIDTH: i32 = 10;

#[derive(Parser)]
#[command(
    name = "dirsift",
    version,
    about = "Find the largest, newest, oldest and otherwise interesting files in a scanned tree",
    long_about = "dirsift reads a directory tree produced by a scanner (as JSON) and lists \
                  the files that belong to a category, such as the largest files or \
                  broken symbolic links."
)]
struct Cli {
    /// Log debug output to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the items of a subtree that belong to a category
    Discover {
        /// Category to search for (see `dirsift categories`)
        category: Category,

        /// Scanned tree in JSON format
        tree: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Count the matches of every category
    All {
        /// Scanned tree in JSON format
        tree: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// List category ids and titles
    Categories,
}

/// Options shared by the commands that classify a subtree.
#[derive(clap::Args)]
struct SelectionArgs {
    /// Subtree to classify, relative to the scanned root (defaults to the root)
    #[arg(short, long)]
    subtree: Option<PathBuf>,

    /// Maximum rank of the threshold for largest/newest/oldest
    #[arg(long)]
    cap: Option<usize>,

    /// Fraction of files, in (0, 1], largest/newest/oldest aim to match
    #[arg(long)]
    percentile: Option<f64>,
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
    init_tracing(cli.verbose);

    match cli.command {
        Command::Discover {
            category,
            tree,
            selection,
            format,
        } => {
            run_discover(category, &tree, &selection, format)?;
        }
        Command::All { tree, selection } => {
            run_all(&tree, &selection)?;
        }
        Command::Categories => {
            run_categories();
        }
    }

    Ok(())
}

/// Install the stderr log subscriber.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Classify one category and print the matches.
fn run_discover(
    category: Category,
    tree_path: &Path,
    selection: &SelectionArgs,
    format: OutputFormat,
) -> Result<()> {
    let tree = load_tree(tree_path)?;
    let discovery = Discovery::with_config(threshold_config(selection.cap, selection.percentile)?);
    let subtree = select_subtree(&tree, selection.subtree.as_deref())?;

    let report = discovery.report_subtree(category, &tree, subtree);

    info!(%category, matches = report.len(), "discovery finished");

    match format {
        OutputFormat::Text => print_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

/// Classify every category and print the match counts.
fn run_all(tree_path: &Path, selection: &SelectionArgs) -> Result<()> {
    let tree = load_tree(tree_path)?;
    let discovery = Discovery::with_config(threshold_config(selection.cap, selection.percentile)?);
    let subtree = select_subtree(&tree, selection.subtree.as_deref())?;

    let label = selection
        .subtree
        .as_deref()
        .map_or_else(|| tree.root_path.clone(), |path| tree.root_path.join(path));

    println!();
    println!("{}", "─".repeat(70));
    for line in subtree_summary(&label, subtree) {
        println!("{line}");
    }
    println!("{}", "─".repeat(70));
    println!();

    for (category, matches) in discovery.classify_all(subtree) {
        let total: u64 = matches.iter().map(|node| node.size).sum();
        println!(
            "   {:<16} {:<32} {:>8} items {:>12}",
            category.id(),
            category.title(),
            matches.len(),
            format_size(total)
        );
    }
    println!();

    Ok(())
}

/// Header lines describing the classified subtree.
fn subtree_summary(label: &Path, subtree: &FileNode) -> [String; 2] {
    let stats = TreeStats::from_root(subtree);
    [
        format!(" {} - {}", label.display(), format_size(subtree.size)),
        format!(" {} files, {} directories", stats.total_files, stats.total_dirs),
    ]
}

/// List the known categories.
fn run_categories() {
    for category in Category::iter() {
        let marker = if category.needs_preparation() {
            " (threshold)"
        } else {
            ""
        };
        println!("{:<16} {}{}", category.id(), category.title(), marker);
    }
}

/// Read a scanned tree from a JSON file.
///
/// Every directory level nests two JSON values, so deep trees exceed
/// serde_json's default recursion limit. The limit is lifted and the stack
/// grows on demand instead.
fn load_tree(path: &Path) -> Result<FileTree> {
    let json = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    let invalid = || format!("Invalid tree in {}", path.display());
    let mut tree = parse_tree(&json).wrap_err_with(invalid)?;
    tree.check_unique_ids().wrap_err_with(invalid)?;
    tree.refresh_stats();

    debug!(
        path = %path.display(),
        files = tree.total_files(),
        dirs = tree.total_dirs(),
        "loaded tree"
    );

    Ok(tree)
}

fn parse_tree(json: &str) -> serde_json::Result<FileTree> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let tree = FileTree::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(tree)
}

/// Resolve the `--subtree` option, defaulting to the root.
fn select_subtree<'a>(tree: &'a FileTree, subtree: Option<&Path>) -> Result<&'a FileNode> {
    match subtree {
        None => Ok(&tree.root),
        Some(path) => tree.resolve(path).wrap_err("Invalid --subtree"),
    }
}

/// Build the threshold config from the command-line overrides.
fn threshold_config(cap: Option<usize>, percentile: Option<f64>) -> Result<ThresholdConfig> {
    let mut builder = ThresholdConfig::builder();
    if let Some(cap) = cap {
        builder.cap(cap);
    }
    if let Some(percentile) = percentile {
        builder.percentile(percentile);
    }
    builder.build().wrap_err("Invalid threshold options")
}

/// Print a report as a table, one row per match.
fn print_report(report: &DiscoveryReport) {
    println!();
    println!("{}", "─".repeat(70));
    println!(" {} in {}", report.title, report.subtree.display());
    if let Some(threshold) = report.threshold {
        println!(" Threshold: {}", format_threshold(threshold));
    }
    println!("{}", "─".repeat(70));
    println!();

    if report.is_empty() {
        println!(" No matching items found.");
        println!();
        return;
    }

    for item in &report.items {
        println!(
            " {} {:>10}  {}  {}",
            make_bar(percent_of_parent(item.size, item.parent_size)),
            format_size(item.size),
            format_mtime(item),
            item.path.display()
        );
    }

    println!();
    println!(
        " {} items, {} total",
        report.len(),
        format_size(report.total_size())
    );
}

/// Create a text percent bar.
fn make_bar(percent: f64) -> String {
    let filled = fill_width(percent, BAR_WIDTH, 0) as usize;
    let empty = (BAR_WIDTH as usize).saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Format a modification time as UTC, or the raw seconds if out of range.
fn format_mtime(item: &DiscoveredItem) -> String {
    chrono::DateTime::from_timestamp(item.mtime, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| item.mtime.to_string())
}

fn format_threshold(threshold: ThresholdValue) -> String {
    match threshold {
        ThresholdValue::Size(bytes) => format_size(bytes),
        ThresholdValue::Modified(secs) => chrono::DateTime::from_timestamp(secs, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| secs.to_string()),
    }
}
