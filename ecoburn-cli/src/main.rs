//! EcoBurn CLI
//!
//! Command-line interface for the EcoBurn server.

mod commands;
mod config;
mod id_resolver;
mod types;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "ecoburn")]
#[command(about = "EcoBurn burn job CLI", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(long, env = "ECOBURN_SERVER_URL", default_value = "http://localhost:8080")]
    server_url: String,

    /// API bearer token
    #[arg(long, env = "ECOBURN_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        server_url: cli.server_url,
        token: cli.token,
    };

    handle_command(cli.command, &config).await
}
