//! Willow - a JSON-backed blog server with static export.

mod build;
mod cli;
mod cms;
mod config;
mod generator;
mod logger;
mod post;
mod render;
mod richtext;
mod serve;
mod toc;
mod utils;

use anyhow::Result;
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use serve::serve_site;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(&cli)?));

    match &cli.command {
        Commands::Serve { .. } => serve_site(config),
        Commands::Build { .. } => build_site(config),
    }
}

/// Load and validate configuration from CLI arguments.
///
/// A missing config file is not an error: every section has defaults.
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        log!("config"; "{} not found, using defaults", config_path.display());
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}
