use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{ENV_API_TOKEN, ENV_CONFIG, ENV_DEBUG, ENV_HOST, ENV_PORT, ENV_WORKSPACE_ID};

#[derive(Parser)]
#[command(name = "toggl-effort")]
#[command(version, about = "Toggl effort totals for spreadsheets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Enable debug logging
    #[arg(long, global = true, env = ENV_DEBUG)]
    pub debug: bool,

    /// Path to config file (YAML, or JSON with a .json extension)
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Toggl API token
    #[arg(long, global = true, env = ENV_API_TOKEN, hide_env_values = true)]
    pub api_token: Option<String>,

    /// Toggl workspace id
    #[arg(long, global = true, env = ENV_WORKSPACE_ID)]
    pub workspace_id: Option<u64>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the server (default command)
    Start,
    /// Look up one effort total and print it with its report link
    Effort(EffortArgs),
}

/// One-shot effort lookup; same parameters as `GET /effort`
#[derive(clap::Args, Clone, Debug, Default)]
pub struct EffortArgs {
    /// Calendar month, YYYY-MM
    #[arg(long)]
    pub month: Option<String>,

    /// Half-month sprint, YYYY.MM.H with H = 1 or 2
    #[arg(long)]
    pub sprint: Option<String>,

    /// Toggl project id
    #[arg(long)]
    pub project: Option<String>,

    /// Toggl task id
    #[arg(long)]
    pub task: Option<String>,

    /// seconds, minutes, hours or days (default)
    #[arg(long)]
    pub units: Option<String>,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: bool,
    pub config: Option<PathBuf>,
    pub api_token: Option<String>,
    pub workspace_id: Option<u64>,
}

impl Cli {
    fn into_parts(self) -> (CliConfig, Option<Commands>) {
        let config = CliConfig {
            host: self.host,
            port: self.port,
            debug: self.debug,
            config: self.config,
            api_token: self.api_token,
            workspace_id: self.workspace_id,
        };
        (config, self.command)
    }
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    Cli::parse().into_parts()
}
