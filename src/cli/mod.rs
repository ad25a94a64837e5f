//! Command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// OSINT Intelligence Platform
/// Investigation tracking and simulated intelligence lookups over HTTP
#[derive(Parser)]
#[command(name = "osint-platform")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the search path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    #[command(alias = "s")]
    Serve {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,

        /// Override `server.port`
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Write a default config.toml in the current directory
    Init,

    /// Load and validate the configuration, then exit
    #[command(alias = "check")]
    CheckConfig,
}

impl Cli {
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
