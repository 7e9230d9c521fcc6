mod download;
mod show;
mod sync;
mod track;

use anyhow::Result;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};

use crate::commands::{
    download::DownloadArgs, show::ShowArgs, sync::SyncArgs, track::TrackArgs,
};

#[derive(Parser)]
#[command(about, version, author, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Sync(SyncArgs),
    Download(DownloadArgs),
    Track(TrackArgs),
    Show(ShowArgs),
}

pub async fn handle(command: &Commands) -> Result<()> {
    match command {
        Commands::Sync(sync_args) => {
            sync::handle(sync_args).await?;
        }
        Commands::Download(download_args) => {
            download::handle(download_args).await?;
        }
        Commands::Track(track_args) => {
            track::handle(track_args).await?;
        }
        Commands::Show(show_args) => {
            show::handle(show_args).await?;
        }
    }

    Ok(())
}
