//! CLI interface for the LimeSurvey client.

mod commands;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;
pub use utils::*;

#[derive(Parser)]
#[command(name = "limesurvey")]
#[command(about = "Query a LimeSurvey installation over its RemoteControl JSON-RPC API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List surveys visible to the configured user
    Surveys {
        /// Only list surveys owned by this user (superadmin only)
        #[arg(long, short = 'u')]
        user: Option<String>,

        /// Print the raw JSON result instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Call any RemoteControl method; the session key is prepended to the parameters
    Call {
        method: String,

        /// Positional parameters after the session key, as a JSON array
        #[arg(long, short = 'j')]
        params_json: Option<String>,
    },

    /// Initialize default configuration at default location
    Init {
        #[arg(long)]
        force: bool,
    },

    /// Manage configuration
    Config {
        #[arg(long)]
        show: bool,

        #[arg(long)]
        validate: bool,
    },

    /// Show version information
    Version,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Run the CLI command
    pub async fn run(self) -> Result<()> {
        let config = self.config;
        match self.command {
            Commands::Surveys { user, json } => surveys(config, user, json).await,
            Commands::Call {
                method,
                params_json,
            } => call(config, method, params_json).await,
            Commands::Init { force } => init(force).await,
            Commands::Config { show, validate } => config_command(config, show, validate).await,
            Commands::Version => version().await,
        }
    }
}
