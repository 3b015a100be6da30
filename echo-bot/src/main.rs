//! Binary for the echo bot webhook service.

use anyhow::Result;
use clap::Parser;
use echo_bot::{run, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { bind } => run(bind).await,
    }
}
