use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tracing::debug;

use crate::config::{AppConfig, CacheStore, DefaultAppConfig, DefaultCacheStore};
use crate::services::DefaultFileService;

#[derive(Args, Debug)]
#[command(about = "Print the cached metadata for one asset component")]
pub struct ShowArgs {
    #[arg(help = "Asset type, e.g. \"char\"")]
    asset_type: String,
    #[arg(help = "Component, e.g. \"rig\"")]
    component: String,
    #[arg(help = "Asset name, e.g. \"charHei\"")]
    name: String,
}

pub async fn handle(args: &ShowArgs) -> Result<()> {
    debug!("Showing cached entry with args: {:?}", args);
    let app_config = DefaultAppConfig::from_env();
    let cache_store = DefaultCacheStore::new(
        app_config.get_cache_file_path().to_path_buf(),
        Arc::new(DefaultFileService),
    );
    let cache = cache_store.load()?;
    let entry = cache.get(&args.asset_type, &args.component, &args.name)?;
    println!("{}", serde_json::to_string_pretty(entry)?);
    Ok(())
}
