//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Webspace routing inspection CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, TOML or JSON (default: routing.toml)
    #[arg(short = 'C', long, global = true, default_value = webspace_routing::config::CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Load, validate and compile the configuration
    #[command(visible_alias = "c")]
    Check,

    /// Dump the compiled routing index as JSON
    #[command(visible_alias = "i")]
    Index {
        #[command(flatten)]
        args: IndexArgs,
    },

    /// Resolve a request url against the routing index
    #[command(visible_alias = "r")]
    Resolve {
        /// Environment to resolve in (e.g., prod, dev)
        environment: String,

        /// Request url, with or without scheme
        #[arg(value_hint = clap::ValueHint::Url)]
        url: String,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the resource locator cleaned up for a locale
    Cleanup {
        /// Text or path to clean up
        text: String,

        /// Locale selecting the replacer tables (e.g., de, de_at)
        #[arg(short, long, default_value = "en")]
        locale: String,
    },
}

/// Index command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct IndexArgs {
    /// Only dump this environment
    #[arg(short, long)]
    pub environment: Option<String>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

impl Cli {
    /// Whether the command can run without a config file.
    pub const fn config_optional(&self) -> bool {
        matches!(self.command, Commands::Cleanup { .. })
    }
}
