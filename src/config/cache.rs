use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::models::AssetCache;
use crate::services::{DefaultFileService, FileService};

/// Serialize with the cache file's fixed 4-space indentation.
fn to_indented_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize to JSON")?;
    String::from_utf8(buffer).context("Serialized JSON is not valid UTF-8")
}

pub struct DefaultCacheStore {
    cache_file_path: PathBuf,
    file_service: Arc<dyn FileService + Send + Sync>,
}

impl Default for DefaultCacheStore {
    fn default() -> Self {
        DefaultCacheStore {
            cache_file_path: PathBuf::from("asset_cache.json"),
            file_service: Arc::new(DefaultFileService),
        }
    }
}

impl DefaultCacheStore {
    pub fn new(
        cache_file_path: PathBuf,
        file_service: Arc<dyn FileService + Send + Sync>,
    ) -> Self {
        DefaultCacheStore {
            cache_file_path,
            file_service,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
impl CacheStore for DefaultCacheStore {
    /// Load the persisted cache. A missing, unreadable, or malformed file
    /// is "no data", never a hard error: the pass starts from an empty
    /// cache and rebuilds.
    fn load(&self) -> Result<AssetCache> {
        if !self.file_service.file_exists(&self.cache_file_path)? {
            return Ok(AssetCache::default());
        }
        let content = match self.file_service.read_file(&self.cache_file_path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "Could not read cache file {}, starting empty: {:#}",
                    self.cache_file_path.display(),
                    e
                );
                return Ok(AssetCache::default());
            }
        };
        match serde_json::from_str::<AssetCache>(&content) {
            Ok(cache) => Ok(cache),
            Err(e) => {
                warn!(
                    "Cache file {} is not a valid cache object, starting empty: {}",
                    self.cache_file_path.display(),
                    e
                );
                Ok(AssetCache::default())
            }
        }
    }

    fn save(&self, cache: &AssetCache) -> Result<String> {
        if let Some(parent) = self.cache_file_path.parent() {
            if !parent.as_os_str().is_empty() {
                self.file_service.create_directory(parent)?;
            }
        }

        let content = to_indented_json(cache).with_context(|| {
            format!(
                "Failed to serialize asset cache: {}",
                self.cache_file_path.display()
            )
        })?;

        self.file_service.write_file(&self.cache_file_path, &content)?;
        info!(
            "Saved asset cache with {} entries to {}",
            cache.entry_count(),
            self.cache_file_path.display()
        );
        Ok(content)
    }
}

pub trait CacheStore: Send + Sync {
    fn load(&self) -> Result<AssetCache>;
    fn save(&self, cache: &AssetCache) -> Result<String>;
}
