// src/main.rs
use std::process::exit;
use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use leadsmith::cli::{execute_command, Args};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // --verbose raises the default level
    let default_level = if args.verbose { "leadsmith=debug" } else { "leadsmith=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.parse()?))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute_command(&args).await {
        error!("Command execution failed: {}", e);
        eprintln!("Error: {}", e);
        exit(1);
    }

    Ok(())
}
