//! Clap derive structures for the `unifigw` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// unifigw -- UniFi gateway health sensors
#[derive(Debug, Parser)]
#[command(
    name = "unifigw",
    version,
    about = "Poll UniFi gateway health sensors",
    long_about = "Validates a UniFi controller profile, checks its credentials, and polls\n\
        one sensor per monitored condition (vpn, www, wan, lan, wlan, alerts,\n\
        firmware). Each sensor refreshes at most once every 30 seconds.",
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
    /// Gateway profile to use
    #[arg(long, short = 'p', env = "UNIFIGW_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "UNIFIGW_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds [default: from config, else 30]
    #[arg(long, env = "UNIFIGW_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate the profile and test its credentials
    Check,

    /// Poll every monitored sensor once and print the readings
    #[command(alias = "st")]
    Status,

    /// Poll sensors on the trigger interval until interrupted
    Watch(WatchArgs),

    /// List the recognized monitored conditions
    Conditions,

    /// Show or change the profile's stored options
    #[command(alias = "opt")]
    Options(OptionsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Watch ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between update triggers [default: from config, else 10]
    #[arg(long, short = 'i', value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,
}

// ── Options ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OptionsArgs {
    #[command(subcommand)]
    pub command: OptionsCommand,
}

#[derive(Debug, Subcommand)]
pub enum OptionsCommand {
    /// Show the stored options (platforms default to enabled)
    Show,

    /// Merge option flags, re-test credentials, and save
    Set {
        /// Flags as KEY=BOOL, e.g. sensor=false
        #[arg(required = true, value_parser = parse_option_pair)]
        pairs: Vec<(String, bool)>,
    },
}

/// Parse `KEY=BOOL` for `options set`.
fn parse_option_pair(raw: &str) -> Result<(String, bool), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=BOOL, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err("option name must not be empty".into());
    }
    let flag = match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => true,
        "false" | "off" | "no" | "0" => false,
        other => return Err(format!("expected a boolean for '{key}', got '{other}'")),
    };
    Ok((key.to_owned(), flag))
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
