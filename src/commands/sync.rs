use anyhow::{Result, bail};
use clap::Args;
use tracing::debug;

use crate::config::DefaultAppConfig;
use crate::models::Selection;
use crate::sync::Synchronizer;

#[derive(Args, Debug)]
#[command(about = "Rebuild the asset metadata cache from the remote store")]
pub struct SyncArgs {
    #[arg(long, help = "Limit the pass to one asset type, e.g. \"char\"")]
    asset_type: Option<String>,
    #[arg(long, help = "Limit the pass to one component, e.g. \"rig\"")]
    component: Option<String>,
    #[arg(help = "Asset names to refresh, e.g. \"charHei\"; everything in scope when omitted")]
    names: Vec<String>,
}

pub async fn handle(args: &SyncArgs) -> Result<()> {
    debug!("Syncing asset cache with args: {:?}", args);
    if !args.names.is_empty() && (args.asset_type.is_none() || args.component.is_none()) {
        bail!("Asset names require both --asset-type and --component");
    }

    let selection = Selection::from_scope(
        args.asset_type.as_deref(),
        args.component.as_deref(),
        &args.names,
    );
    let synchronizer = Synchronizer::from_app_config(&DefaultAppConfig::from_env())?;
    let report = synchronizer.sync(&selection).await?;
    report.print_summary();
    Ok(())
}
