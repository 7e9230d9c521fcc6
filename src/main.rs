mod builder;
mod commands;
mod config;
mod models;
mod remote;
mod services;
mod show_data;
mod sync;
mod ui;
mod utils;
mod version;

use clap::Parser;

use crate::commands::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.tracing_level_filter())
        .init();

    commands::handle(&cli.command).await?;

    Ok(())
}
