//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tbot")]
#[command(about = "Telegram image ticket bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Load and validate configuration, then print it with secrets masked.
    CheckConfig {
        #[arg(short, long)]
        token: Option<String>,
    },
}
