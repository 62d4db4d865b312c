//! Clap derive structures for the `possync` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// possync -- pull one day of StoreHub POS data as a single JSON payload
#[derive(Debug, Parser)]
#[command(
    name = "possync",
    version,
    about = "Synchronize StoreHub POS transactions, customers, and products",
    long_about = "Fetches one day of StoreHub transactions (required) plus the current\n\
        customer and product snapshots (best-effort) and emits them as one JSON\n\
        payload, either once from the command line or behind an HTTP endpoint.",
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
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "POSSYNC_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// StoreHub API base URL (overrides config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one synchronization and print the payload
    Sync(SyncArgs),

    /// Serve the sync endpoint over HTTP
    Serve(ServeArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Sync ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// StoreHub username (overrides POSSYNC_USERNAME and config)
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Prompt for the StoreHub password instead of using env/keyring/config
    #[arg(long)]
    pub prompt_password: bool,

    /// Day to sync, YYYY-MM-DD (defaults to today)
    #[arg(long, short = 'd')]
    pub date: Option<String>,

    /// Write the payload to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long)]
    pub compact: bool,
}

// ── Serve ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides config)
    #[arg(long, short = 'b')]
    pub bind: Option<String>,

    /// Allowed CORS origins: `*` or a comma-separated list (overrides config)
    #[arg(long)]
    pub cors_origin: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (secrets masked)
    Show,

    /// Print the config file location
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Store a StoreHub password in the system keyring
    SetPassword {
        /// StoreHub username the password belongs to
        #[arg(long, short = 'u')]
        username: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
