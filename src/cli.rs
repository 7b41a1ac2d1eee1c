//! CLI argument parsing and command definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::fuzzy::{Metric, TieBreak};
use crate::store::{Field, PaintStatus, PaintType, SortKey};

/// A slim CLI for tracking a miniature paint collection
#[derive(Debug, Parser)]
#[command(
    name = "paintbox",
    author,
    version,
    about = "A slim CLI for tracking a miniature paint collection",
    propagate_version = true,
    after_help = "Use 'paintbox <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,
    #[command(subcommand)]
    pub command: Command,
}

/// Global options available to all commands
#[derive(Debug, Clone, Args)]
pub struct GlobalOpts {
    /// Output format (json, yaml, table, auto)
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        global = true,
        conflicts_with = "json"
    )]
    pub output_format: Option<OutputFormat>,

    /// Output as JSON (shorthand for -o json)
    #[arg(long, global = true)]
    pub json: bool,

    /// Inventory file to use
    #[arg(long, value_name = "PATH", env = "PAINTBOX_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Override config file path
    #[arg(long, value_name = "PATH", env = "PAINTBOX_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Reduce output to only errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase logging verbosity (stackable: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Enable debug logging (equivalent to -vv)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Enable trace logging
    #[arg(long, global = true)]
    pub trace: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Hide table headers
    #[arg(long, global = true)]
    pub no_headers: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[non_exhaustive]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
    Auto,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a paint, or update one that is already in the inventory
    Add(AddCommand),

    /// List paints with optional filter
    List(ListCommand),

    /// Check a pasted list of paint names against the inventory
    Check(CheckCommand),

    /// Export the whole inventory to CSV
    Export {
        /// Destination file (defaults to export.inventory_file)
        path: Option<PathBuf>,
    },

    /// Inspect and manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct AddCommand {
    /// Paint brand (e.g., "Citadel")
    #[arg(short, long)]
    pub brand: String,

    /// Paint name (e.g., "Abaddon Black")
    #[arg(short, long)]
    pub name: String,

    /// Paint type
    #[arg(short = 't', long = "type", value_enum, default_value = "base")]
    pub paint_type: PaintType,

    /// Ownership status
    #[arg(short, long, value_enum, default_value = "owned")]
    pub status: PaintStatus,

    /// Number of pots to add
    #[arg(long, default_value_t = 1)]
    pub quantity: u32,
}

#[derive(Debug, Args)]
pub struct ListCommand {
    /// Value the chosen field must start with (case-insensitive)
    pub filter: Option<String>,

    /// Field to filter on
    #[arg(long = "by", value_enum, default_value = "name")]
    pub field: Field,

    /// Use fuzzy matching instead of prefix matching
    #[arg(long)]
    pub fuzzy: bool,

    /// Sort by column
    #[arg(long, value_enum, value_name = "COLUMN")]
    pub sort_by: Option<SortKey>,

    /// Sort in descending order
    #[arg(long, requires = "sort_by")]
    pub desc: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// File with one paint name per line ('-' or omitted reads stdin)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Minimum similarity for a suggestion (0.0 - 1.0)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Similarity metric for suggestions
    #[arg(long, value_enum)]
    pub metric: Option<Metric>,

    /// How to choose between equally good suggestions
    #[arg(long, value_enum)]
    pub tie_break: Option<TieBreak>,

    /// Print grouped lists instead of a table
    #[arg(long)]
    pub grouped: bool,

    /// Do not write unresolved names to CSV
    #[arg(long, conflicts_with = "export_path")]
    pub no_export: bool,

    /// Where to write unresolved names (defaults to export.missing_file)
    #[arg(long, value_name = "PATH")]
    pub export_path: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show effective configuration
    Show,

    /// Print config file path
    Path,

    /// Get a specific configuration value
    Get {
        /// Configuration key (dot-separated path)
        key: Option<String>,
    },

    /// Reset configuration to defaults
    Reset,
}
