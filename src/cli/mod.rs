//! CLI argument parsing for vetai
//!
//! Global flags: --root, --store, --format, --quiet, --verbose, --client

pub mod format;
pub mod output;
pub mod paths;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub use output::OutputFormat;

/// VetAI - consultation record store with duplicate compaction
#[derive(Parser, Debug)]
#[command(name = "vetai")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory holding vetai.toml and the default store
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit record store directory
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Debug-level logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter, e.g. `debug` or `vetai_core=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Caller identity used for rate limiting destructive commands
    #[arg(long, global = true, env = "VETAI_CLIENT", default_value = "cli")]
    pub client: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the record store and a default vetai.toml
    Init,

    /// Save a consultation from a JSON file (or stdin)
    Save(SaveArgs),

    /// List consultations, newest first
    List(ListArgs),

    /// Remove duplicate consultations, keeping the newest of each group
    ///
    /// Destructive runs are limited per --client within one process; each
    /// invocation of the binary starts with a fresh budget.
    Compact(CompactArgs),

    /// Show how much space compaction could reclaim
    Stats,

    /// Run the startup routine: port health and confirmed auto-compaction
    Start,

    /// Knowledge-graph port commands
    Graph {
        #[command(subcommand)]
        command: GraphCommands,
    },
}

#[derive(Args, Debug)]
pub struct SaveArgs {
    /// Consultation JSON file; `-` or omitted reads stdin
    pub file: Option<PathBuf>,

    /// Do not offer the record to the knowledge graph
    #[arg(long)]
    pub no_index: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Maximum number of consultations to show
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Only consultations for this patient (case-insensitive)
    #[arg(long)]
    pub patient: Option<String>,
}

#[derive(Args, Debug)]
pub struct CompactArgs {
    /// Report what would be removed without touching any file
    #[arg(long)]
    pub dry_run: bool,

    /// Delete duplicates instead of moving them to a backup directory
    #[arg(long, conflicts_with = "backup_dir")]
    pub no_backup: bool,

    /// Backup directory; must lie under the store parent, temp dir or home dir
    #[arg(long)]
    pub backup_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum GraphCommands {
    /// Report knowledge-graph and language-model availability
    Health,

    /// Graph view centered on one patient
    Patient {
        /// Patient name
        name: String,
    },

    /// Search indexed consultation episodes
    Search {
        /// Free-text query
        query: String,

        /// Maximum number of episodes to return
        #[arg(long, short = 'n', default_value_t = 10)]
        limit: usize,
    },

    /// Show knowledge-graph statistics
    Stats,
}
