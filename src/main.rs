use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use finrag::cli::{self, Args, Command};
use finrag::config::Config;
use finrag::logging;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    // A missing .env file is fine; the environment may already carry the key
    dotenv::dotenv().ok();

    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref())?;
    args.apply(&mut config);

    logging::init(&config.logging, args.verbose);

    match args.command.clone().unwrap_or(Command::Ask { question: None }) {
        Command::Ask { question } => {
            // Fail on a missing credential before any document is touched
            config.generation.require_api_key()?;
            cli::run_ask(&config, question.as_deref()).await
        }
        Command::Serve { bind } => {
            config.generation.require_api_key()?;
            cli::run_serve(&config, bind).await
        }
        Command::Search { query, limit, json } => {
            cli::run_search(&config, &query, limit, json).await
        }
        Command::Index => cli::run_index(&config).await,
    }
}
