use std::fmt;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::ComponentSpec;
use crate::models::{AssetEntry, AssetKey};
use crate::remote::{ListMode, RemoteStore};
use crate::utils::Utils;
use crate::version::latest_version;

/// A failed resolution for one (type, component, name) triple. Carries the
/// key so a pass report can say which asset broke without aborting the
/// siblings.
#[derive(Debug, Clone)]
pub struct BuildError {
    pub key: AssetKey,
    pub message: String,
}

impl BuildError {
    pub fn new(key: AssetKey, source: anyhow::Error) -> BuildError {
        BuildError {
            key,
            message: format!("{source:#}"),
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

impl std::error::Error for BuildError {}

/// Resolves one asset component into an [`AssetEntry`] by interrogating the
/// remote store. Cheap to clone; every sync unit gets its own copy.
#[derive(Clone)]
pub struct DescriptorBuilder {
    remote_store: Arc<dyn RemoteStore + Send + Sync>,
    remote_root: String,
    local_root: String,
}

impl DescriptorBuilder {
    pub fn new(
        remote_store: Arc<dyn RemoteStore + Send + Sync>,
        remote_root: &str,
        local_root: &str,
    ) -> DescriptorBuilder {
        DescriptorBuilder {
            remote_store,
            remote_root: remote_root.to_string(),
            local_root: local_root.to_string(),
        }
    }

    /// Resolve the current state of one asset component.
    ///
    /// `Ok(None)` means the component does not exist for this asset, which
    /// is routine: not every asset has every component published.
    pub async fn resolve(
        &self,
        type_root: &str,
        asset_type: &str,
        asset_name: &str,
        component: &ComponentSpec,
    ) -> Result<Option<(AssetKey, AssetEntry)>, BuildError> {
        let key = AssetKey::new(asset_type, &component.name, asset_name);
        match self.resolve_entry(type_root, asset_name, component).await {
            Ok(Some(entry)) => Ok(Some((key, entry))),
            Ok(None) => Ok(None),
            Err(e) => Err(BuildError::new(key, e)),
        }
    }

    async fn resolve_entry(
        &self,
        type_root: &str,
        asset_name: &str,
        component: &ComponentSpec,
    ) -> Result<Option<AssetEntry>> {
        let asset_path = format!("{}/{}/{}", self.remote_root, type_root, asset_name);

        // Component names may span several directory levels ("model/cache"),
        // so walk them one listing at a time. A missing segment is a normal
        // no-entry outcome.
        let mut component_path = asset_path;
        for segment in component.name.split('/') {
            let entries = self
                .remote_store
                .list(&component_path, ListMode::Dirs)
                .await
                .with_context(|| format!("Failed to list {}", component_path))?;
            if !entries.iter().any(|e| e == segment) {
                debug!("No {} under {}, skipping", segment, component_path);
                return Ok(None);
            }
            component_path = format!("{}/{}", component_path, segment);
        }

        if !component.publishable {
            return Ok(Some(self.unversioned_entry(&component_path).await?));
        }

        let contents = self
            .remote_store
            .list(&component_path, ListMode::FilesAndDirs)
            .await
            .with_context(|| format!("Failed to list {}", component_path))?;

        if contents.iter().any(|e| e == "approved") {
            Ok(Some(self.approved_entry(&component_path, component).await?))
        } else {
            Ok(Some(self.work_entry(&component_path, component).await?))
        }
    }

    /// An approved publish: files come straight from `approved/`, the
    /// version tag from the `approved/history` archive.
    async fn approved_entry(
        &self,
        component_path: &str,
        component: &ComponentSpec,
    ) -> Result<AssetEntry> {
        let remote_path = format!("{}/approved", component_path);
        let file_names = self
            .remote_store
            .list(&remote_path, ListMode::Files)
            .await
            .with_context(|| format!("Failed to list {}", remote_path))?;

        let mut version = String::new();
        let mut notes_path = None;
        if component.versioned {
            let history_path = format!("{}/history", remote_path);
            let history = self
                .remote_store
                .list(&history_path, ListMode::Files)
                .await
                .with_context(|| format!("Failed to list {}", history_path))?;
            version = latest_version(&history).1;

            if component.notes && !version.is_empty() {
                if let Some(primary) = file_names.first() {
                    let notes_name = approved_notes_name(primary, &version);
                    if history.iter().any(|f| f == &notes_name) {
                        notes_path = Some(format!("{}/{}", history_path, notes_name));
                    }
                }
            }
        }

        Ok(AssetEntry::new(
            true,
            remote_path.clone(),
            self.local_path(&remote_path),
            version,
            file_names,
            notes_path,
        ))
    }

    /// No approved publish yet: resolve the newest work version and keep
    /// only the files belonging to it.
    async fn work_entry(
        &self,
        component_path: &str,
        component: &ComponentSpec,
    ) -> Result<AssetEntry> {
        let work_path = format!("{}/work", component_path);
        let work_files = self
            .remote_store
            .list(&work_path, ListMode::Files)
            .await
            .with_context(|| format!("Failed to list {}", work_path))?;

        let (primary, version) = latest_version(&work_files);
        let file_names: Vec<String> = work_files
            .iter()
            .filter(|f| f.contains(&version))
            .cloned()
            .collect();

        let mut notes_path = None;
        if component.notes && !version.is_empty() {
            let notes_name = with_txt_extension(&primary);
            if work_files.iter().any(|f| f == &notes_name) {
                notes_path = Some(format!("{}/{}", work_path, notes_name));
            }
        }

        let remote_path = format!("{}/", work_path);
        Ok(AssetEntry::new(
            false,
            remote_path.clone(),
            self.local_path(&remote_path),
            version,
            file_names,
            notes_path,
        ))
    }

    /// Components without a publish flow list their directory as-is.
    async fn unversioned_entry(&self, component_path: &str) -> Result<AssetEntry> {
        let file_names = self
            .remote_store
            .list(component_path, ListMode::Files)
            .await
            .with_context(|| format!("Failed to list {}", component_path))?;

        Ok(AssetEntry::new(
            false,
            component_path.to_string(),
            self.local_path(component_path),
            String::new(),
            file_names,
            None,
        ))
    }

    fn local_path(&self, remote_path: &str) -> String {
        Utils::remote_to_local(remote_path, &self.remote_root, &self.local_root)
            .display()
            .to_string()
    }
}

/// Approved notes live in history under the primary file's name with the
/// version tag inserted ahead of the `_high` suffix:
/// `charHei_rig_high.mb` + `v012` -> `charHei_rig_v012_high.txt`.
fn approved_notes_name(primary: &str, version: &str) -> String {
    let stem = Path::new(primary)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(primary);
    match stem.strip_suffix("_high") {
        Some(prefix) => format!("{}_{}_high.txt", prefix, version),
        None => format!("{}_{}.txt", stem, version),
    }
}

/// Work notes sit next to the payload file under the same stem.
fn with_txt_extension(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    format!("{}.txt", stem)
}
