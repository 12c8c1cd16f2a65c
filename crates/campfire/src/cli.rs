//! Clap derive structures for the `campfire` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use campfire_core::EntityId;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// campfire -- browse campsites, partners and promotions
#[derive(Debug, Parser)]
#[command(
    name = "campfire",
    version,
    about = "Browse the Campfire campsite directory from the command line",
    long_about = "Browse campsites, partners and promotions, keep a list of favorite\n\
        campsites, and post comments.\n\n\
        Fetched collections and favorites are persisted locally, so the last\n\
        known data is shown when the catalog service is unreachable.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Path to config file
    #[arg(long, env = "CAMPFIRE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Catalog service URL (overrides config)
    #[arg(long, short = 'u', global = true)]
    pub base_url: Option<String>,

    /// Directory for persisted state (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Show persisted data without contacting the catalog service
    #[arg(long, global = true)]
    pub offline: bool,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "CAMPFIRE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Featured campsite, promotion and partner
    Home,

    /// List campsites
    #[command(alias = "sites")]
    Campsites(CampsitesArgs),

    /// Show one campsite with its comments
    Campsite {
        /// Campsite ID
        id: EntityId,
    },

    /// List comments for a campsite
    Comments {
        /// Campsite ID
        campsite_id: EntityId,
    },

    /// List partners
    Partners,

    /// List promotions
    Promotions,

    /// Toggle a campsite in the favorites list
    #[command(alias = "fav")]
    Favorite {
        /// Campsite ID
        id: EntityId,
    },

    /// Post a comment on a campsite
    Comment(CommentArgs),

    /// Show the fetch lifecycle of every collection
    Status,

    /// Delete all persisted state
    Purge,

    /// Show or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Command Arguments ────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CampsitesArgs {
    /// Only list favorite campsites
    #[arg(long, short = 'f')]
    pub favorites: bool,
}

#[derive(Debug, Args)]
pub struct CommentArgs {
    /// Campsite ID
    pub campsite_id: EntityId,

    /// Comment author
    #[arg(long, short = 'a')]
    pub author: String,

    /// Rating from 1 to 5
    #[arg(long, short = 'r', value_parser = clap::value_parser!(u8).range(1..=5))]
    pub rating: u8,

    /// Comment text
    #[arg(long, short = 't')]
    pub text: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write the resolved configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display the resolved configuration
    Show,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
