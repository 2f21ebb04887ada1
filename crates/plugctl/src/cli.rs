//! Clap derive structures for the `plugctl` CLI.
//!
//! Self-contained (clap only) so `build.rs` can include it for man pages.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// plugctl -- control and meter smart plugs over their local HTTP API
#[derive(Debug, Parser)]
#[command(
    name = "plugctl",
    version,
    about = "Control and meter Shelly-style smart plugs",
    long_about = "Switch, inspect and read energy usage from power-metering plugs.\n\n\
        Supports both the legacy REST firmware (gen1) and the RPC firmware (gen2).\n\
        The generation is selected explicitly with --generation or a profile.",
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
    /// Plug profile to use
    #[arg(long, short = 'p', env = "PLUGCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Device address: host, host:port or http://[user:pass@]host (overrides profile)
    #[arg(long, short = 'A', env = "PLUGCTL_ADDRESS", global = true)]
    pub address: Option<String>,

    /// Device username
    #[arg(long, short = 'U', env = "PLUGCTL_USERNAME", global = true)]
    pub username: Option<String>,

    /// Device password
    #[arg(long, short = 'P', env = "PLUGCTL_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Device API generation (overrides profile)
    #[arg(long, short = 'g', env = "PLUGCTL_GENERATION", global = true)]
    pub generation: Option<GenerationArg>,

    /// Request timeout in seconds (default: no timeout)
    #[arg(long, env = "PLUGCTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenerationArg {
    /// Legacy REST firmware
    #[value(alias = "1", alias = "legacy")]
    Gen1,
    /// RPC firmware
    #[value(alias = "2", alias = "rpc")]
    Gen2,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Turn the relay on
    On,

    /// Turn the relay off
    Off,

    /// Show device information
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Show current energy usage
    #[command(alias = "e")]
    Energy(EnergyArgs),

    /// Manage configuration profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Info / Energy ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Produce JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct EnergyArgs {
    /// Produce JSON output
    #[arg(long, conflicts_with = "metrics")]
    pub json: bool,

    /// Produce a {labels, metrics} envelope for monitoring pipelines
    #[arg(long, alias = "choria")]
    pub metrics: bool,

    /// Label to attach to metrics output (repeatable)
    #[arg(long = "label", value_name = "KEY=VALUE", value_parser = parse_label)]
    pub labels: Vec<(String, String)>,
}

fn parse_label(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_owned(), value.to_owned())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Print the config file path
    Path,

    /// List configured profiles (* marks the default)
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },

    /// Set a key on the active profile (address, generation, username, password_env, timeout, label.<key>)
    Set {
        /// Key to set
        key: String,
        /// Value
        value: String,
    },

    /// Store the device password in the system keyring
    SetPassword {
        /// Profile to store it for (defaults to the active profile)
        #[arg(long = "for", value_name = "PROFILE")]
        profile: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
