//! ebot CLI: run the webhook server. Config from env and optional CLI args.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ebot")]
#[command(about = "Echo bot: webhook server with roster commands", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the webhook server (config from env; --bind overrides BIND_ADDR).
    Run {
        #[arg(short, long)]
        bind: Option<String>,
    },
}
