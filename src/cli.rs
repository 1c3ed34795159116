//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Willow blog server CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: willow.toml)
    #[arg(short = 'C', long, default_value = "willow.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve the site, re-reading content as it goes stale
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,

        /// Override base URL used in feed and sitemap links
        #[arg(long = "base-url")]
        base_url: Option<String>,
    },

    /// Render every route into the output directory
    Build {
        /// Clean output directory completely before building
        #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        clean: Option<bool>,

        /// Override base URL for the site.
        ///
        /// Useful when the deployed URL differs from local development:
        ///   willow build --base-url "https://notes.example.com"
        #[arg(long = "base-url")]
        base_url: Option<String>,

        /// Output directory path (relative to project root)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
