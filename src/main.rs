//! dirprops - aggregate file attribute counts and sizes for a directory tree.
//!
//! Usage:
//!   dirprops [PATH]                  Summary of non-zero properties
//!   dirprops [PATH] --all            Every key, including zero counters
//!   dirprops [PATH] --format json    Full property map as JSON
//!   dirprops --help                  Show help

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};

use dirprops_core::{
    AttributeTally, DirectoryProperties, EntryFilter, EnumerationOptions, SIZE_KEY,
};
use dirprops_scan::PropertiesAggregator;

#[derive(Parser)]
#[command(
    name = "dirprops",
    version,
    about = "Aggregate file attribute counts and sizes for a directory tree",
    long_about = "dirprops walks a directory without following symbolic links or mount \
                  points and reports how many objects carry each file attribute, \
                  together with the File, Total and Size summary counts.\n\n\
                  Set RUST_LOG=debug to see entries that could not be read."
)]
struct Cli {
    /// Directory to analyze (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Only enumerate non-directory entries
    #[arg(long, conflicts_with = "folders_only")]
    files_only: bool,

    /// Only enumerate directories
    #[arg(long)]
    folders_only: bool,

    /// Only look at the immediate children of PATH
    #[arg(long)]
    no_recurse: bool,

    /// Maximum depth to enumerate (1 = immediate children)
    #[arg(short = 'd', long)]
    max_depth: Option<u32>,

    /// Leave symlinks, junctions and mount points out entirely
    #[arg(long)]
    skip_reparse_points: bool,

    /// Count every attribute under itself instead of folding directory attributes into Directory
    #[arg(long)]
    per_attribute: bool,

    /// Load enumeration options from a JSON file (flags override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show zero counters in text output
    #[arg(short, long)]
    all: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let options = build_options(&cli)?;

    let properties = PropertiesAggregator::new()
        .aggregate(&cli.path, &options)
        .with_context(|| format!("Cannot read properties of {}", cli.path.display()))?;

    let rendered = match cli.format {
        OutputFormat::Text => render_text(&cli.path, &properties, cli.all),
        OutputFormat::Json => serde_json::to_string_pretty(&properties)?,
    };

    match cli.output {
        Some(output_path) => {
            std::fs::write(&output_path, rendered)
                .with_context(|| format!("Cannot write {}", output_path.display()))?;
            eprintln!("Exported to {}", output_path.display());
        }
        None => println!("{rendered}"),
    }

    if properties.has_errors() {
        tracing::warn!(
            errors = properties.error_count(),
            "unreadable entries skipped; counts are partial"
        );
    }

    Ok(())
}

/// Merge the optional config file with command-line flags.
fn build_options(cli: &Cli) -> Result<EnumerationOptions> {
    let mut options = match &cli.config {
        Some(path) => load_options(path)?,
        None => EnumerationOptions::default(),
    };

    if cli.files_only {
        options.filter = EntryFilter::FilesOnly;
    }
    if cli.folders_only {
        options.filter = EntryFilter::FoldersOnly;
    }
    if cli.no_recurse {
        options.recursive = false;
    }
    if cli.max_depth.is_some() {
        options.max_depth = cli.max_depth;
    }
    if cli.skip_reparse_points {
        options.skip_reparse_points = true;
    }
    if cli.per_attribute {
        options.tally = AttributeTally::PerAttribute;
    }

    options.validate()?;
    Ok(options)
}

fn load_options(path: &Path) -> Result<EnumerationOptions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

/// Render the property map as an aligned two-column listing.
fn render_text(path: &Path, properties: &DirectoryProperties, all: bool) -> String {
    let map = properties.to_map();
    let width = map.keys().map(|k| k.len()).max().unwrap_or(0);

    let mut lines = vec![
        "─".repeat(40),
        format!(" {}", path.display()),
        "─".repeat(40),
    ];

    for (key, value) in &map {
        if !all && *value == 0 {
            continue;
        }
        let shown = if *key == SIZE_KEY {
            format!("{value} ({})", format_size(properties.total_size()))
        } else {
            value.to_string()
        };
        lines.push(format!(" {key:<width$}  {shown}"));
    }

    lines.join("\n")
}

/// Format bytes as human-readable size.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
