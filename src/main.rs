//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use std::process::ExitCode;

use footdata::{
    cli::{Commands, Footdata},
    commands::{extract::handle_extract, init_db::handle_init_db},
    Config, FootdataError, Result,
};

/// Run the CLI. Exit code 0 on full success, 1 on any fatal condition.
#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("✗ {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let app = Footdata::parse();
    let mut config = Config::from_env()?;

    match app.command {
        Commands::Extract {
            league_id,
            season,
            max_pages,
            verbose,
        } => {
            if let Some(cap) = max_pages {
                config.max_pages = cap;
            }

            let pipeline = handle_extract(&config, league_id, season, verbose);
            // Interruption drops the pipeline future; an uncommitted
            // transaction rolls back with it, so nothing partial lands.
            tokio::select! {
                result = pipeline => result.map(|_| ()),
                _ = tokio::signal::ctrl_c() => Err(FootdataError::Interrupted),
            }
        }

        Commands::InitDb { verbose } => handle_init_db(&config, verbose),
    }
}
