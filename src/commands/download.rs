use anyhow::{Result, bail};
use clap::Args;
use tracing::debug;

use crate::config::DefaultAppConfig;
use crate::models::Selection;
use crate::sync::Synchronizer;

#[derive(Args, Debug)]
#[command(about = "Refresh one component's metadata and download its files to the local mirror")]
pub struct DownloadArgs {
    #[arg(help = "Component to download, e.g. \"rig\"")]
    component: String,
    #[arg(long, help = "Limit the pass to one asset type, e.g. \"char\"")]
    asset_type: Option<String>,
    #[arg(help = "Asset names to download; everything in scope when omitted")]
    names: Vec<String>,
}

pub async fn handle(args: &DownloadArgs) -> Result<()> {
    debug!("Downloading asset files with args: {:?}", args);
    if !args.names.is_empty() && args.asset_type.is_none() {
        bail!("Asset names require --asset-type");
    }

    let selection = Selection::from_scope(
        args.asset_type.as_deref(),
        Some(&args.component),
        &args.names,
    );
    let synchronizer = Synchronizer::from_app_config(&DefaultAppConfig::from_env())?;
    let report = synchronizer
        .sync_and_download(&args.component, &selection)
        .await?;
    report.print_summary();
    Ok(())
}
