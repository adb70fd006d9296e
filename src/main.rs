//! wsroute - inspect webspace routing configurations.

mod cli;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use webspace_routing::config::{RoutingConfig, find_config_file};
use webspace_routing::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Check => cli::check::run_check(&config),
        Commands::Index { args } => cli::index::run_index(args, &config),
        Commands::Resolve {
            environment,
            url,
            pretty,
        } => cli::resolve::run_resolve(environment, url, *pretty, &config),
        Commands::Cleanup { text, locale } => cli::cleanup::run_cleanup(text, locale, &config),
    }
}

/// Locate, load and validate the config file.
///
/// Commands that work without one fall back to the defaults.
fn load_config(cli: &Cli) -> Result<RoutingConfig> {
    let Some(path) = find_config_file(&cli.config) else {
        if cli.config_optional() {
            return Ok(RoutingConfig::default());
        }
        anyhow::bail!("config file `{}` not found", cli.config.display());
    };

    let config = RoutingConfig::load(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
