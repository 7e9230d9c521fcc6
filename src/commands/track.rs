use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Args;
use tracing::debug;

use crate::config::{AppConfig, DefaultAppConfig, DefaultSelectionStore, SelectionStore};
use crate::models::Selection;
use crate::services::DefaultFileService;

#[derive(Args, Debug)]
#[command(about = "Record which assets a component should keep updated")]
pub struct TrackArgs {
    #[arg(help = "Component the selection applies to, e.g. \"rig\"")]
    component: String,
    #[arg(long, help = "Asset type the names belong to, e.g. \"char\"")]
    asset_type: Option<String>,
    #[arg(help = "Asset names to keep updated; omit to deselect everything")]
    names: Vec<String>,
}

pub async fn handle(args: &TrackArgs) -> Result<()> {
    debug!("Tracking update selection with args: {:?}", args);
    if !args.names.is_empty() && args.asset_type.is_none() {
        bail!("Asset names require --asset-type");
    }

    let new_selection = Selection::from_scope(
        args.asset_type.as_deref(),
        Some(&args.component),
        &args.names,
    );
    let app_config = DefaultAppConfig::from_env();
    let selection_store = DefaultSelectionStore::new(
        app_config.get_selection_file_path().to_path_buf(),
        Arc::new(DefaultFileService),
    );
    let merged = selection_store.merge(&args.component, &new_selection)?;
    println!("{}", serde_json::to_string_pretty(&merged)?);
    Ok(())
}
