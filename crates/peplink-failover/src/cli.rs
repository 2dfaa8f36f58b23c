//! Clap derive structures for the `peplink-failover` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// peplink-failover -- disable unhealthy WAN uplinks on a Peplink router
#[derive(Debug, Parser)]
#[command(
    name = "peplink-failover",
    version,
    about = "Disable unhealthy WAN uplinks on Peplink routers",
    long_about = "Checks every WAN connection on a Peplink router and disables the ones\n\
        that are not connected, so traffic fails over to healthy uplinks.\n\n\
        Passive WANs are never touched. Each disable can raise a webhook alert.\n\
        Designed to run from cron: one invocation, one pass.",
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
    #[arg(long, env = "PEPLINK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Device URL, e.g. https://192.168.50.1 (overrides config)
    #[arg(long, short = 'u', global = true)]
    pub base_url: Option<String>,

    /// Device admin username (overrides config)
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// WAN name never to disable; repeat to list several (replaces config)
    #[arg(long = "passive-wan", value_name = "NAME", global = true)]
    pub passive_wans: Vec<String>,

    /// Webhook URL for disable alerts (overrides config)
    #[arg(long, global = true)]
    pub webhook_url: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PEPLINK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Log line format
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output, Color & Log Enums ────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines on stderr
    Text,
    /// One JSON object per line (log collectors, cron mail)
    Json,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check all WANs and disable the unhealthy ones
    Run(RunArgs),

    /// Show device identity and WAN health without changing anything
    #[command(alias = "st")]
    Status,

    /// List WANs or toggle one by hand
    #[command(alias = "w")]
    Wans(WansArgs),

    /// Inspect the effective configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ═══════════════════════════════════════════════════════════════════════
// Run
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Report what would be disabled without writing or alerting
    #[arg(long, short = 'n')]
    pub dry_run: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// WANs
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Args)]
pub struct WansArgs {
    #[command(subcommand)]
    pub command: WansCommand,
}

#[derive(Debug, Subcommand)]
pub enum WansCommand {
    /// List WAN connections with their health
    #[command(alias = "ls")]
    List,

    /// Enable a WAN connection
    Enable {
        /// Connection ID (see `wans list`)
        id: u32,
    },

    /// Disable a WAN connection (sends the usual alert)
    Disable {
        /// Connection ID (see `wans list`)
        id: u32,
    },
}

// ═══════════════════════════════════════════════════════════════════════
// Config
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the effective configuration (password redacted)
    Show,

    /// Print the config file location
    Path,
}

// ═══════════════════════════════════════════════════════════════════════
// Completions
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
