//! tbot: Telegram image ticket bot. Config from env (and `.env`) plus optional CLI args.

use anyhow::Result;
use clap::Parser;
use tbot_cli::{run, AppConfig, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = AppConfig::from_env(token)?;
            run(config).await
        }
        Commands::CheckConfig { token } => {
            let config = AppConfig::from_env(token)?;
            println!("Configuration OK");
            println!("{}", config.summary());
            Ok(())
        }
    }
}
