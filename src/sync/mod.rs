use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, info};

mod progress;
mod report;

pub use progress::PassProgress;
pub use report::{PassReport, UnitError};

use crate::builder::{BuildError, DescriptorBuilder};
use crate::config::{
    AppConfig, CacheStore, ComponentSpec, DefaultAppConfig, DefaultCacheStore, ShowConfig,
    TypeSpec,
};
use crate::models::{AssetEntry, AssetKey, Selection};
use crate::remote::{DefaultRemoteStore, DownloadJob, ListMode, RemoteStore};
use crate::services::{DefaultFileService, FileService};
use crate::show_data::{DefaultShowData, ShowData};
use crate::ui::{Operation, OperationManager};

pub type CompletionCallback = Box<dyn Fn(&PassReport) + Send + Sync>;

/// One (type, component, name) resolution waiting to run.
struct SyncUnit {
    type_root: String,
    asset_type: String,
    asset_name: String,
    component: ComponentSpec,
}

fn worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Orchestrates rebuild and download passes: enumerates units from the show
/// registry, runs them on the tokio pool behind a semaphore, merges the
/// results into the cache single-threaded, and persists.
pub struct Synchronizer {
    show_config: ShowConfig,
    remote_root: String,
    local_root: String,
    remote_store: Arc<dyn RemoteStore + Send + Sync>,
    show_data: Arc<dyn ShowData + Send + Sync>,
    cache_store: Box<dyn CacheStore>,
    file_service: Arc<dyn FileService + Send + Sync>,
    on_complete: Option<CompletionCallback>,
}

impl Synchronizer {
    pub fn from_app_config(app_config: &DefaultAppConfig) -> Result<Synchronizer> {
        let file_service: Arc<dyn FileService + Send + Sync> = Arc::new(DefaultFileService);
        let show_config = ShowConfig::load(app_config.get_show_config_path(), &file_service)?;
        Ok(Synchronizer {
            show_config,
            remote_root: app_config.get_remote_root().to_string(),
            local_root: app_config.get_local_root().to_string(),
            remote_store: Arc::new(DefaultRemoteStore::new(
                app_config.get_remote_base_url().to_string(),
            )),
            show_data: Arc::new(DefaultShowData::new(
                app_config.get_shot_list_path().to_path_buf(),
                Arc::clone(&file_service),
            )),
            cache_store: Box::new(DefaultCacheStore::new(
                app_config.get_cache_file_path().to_path_buf(),
                Arc::clone(&file_service),
            )),
            file_service,
            on_complete: None,
        })
    }

    pub fn new(
        show_config: ShowConfig,
        remote_root: &str,
        local_root: &str,
        remote_store: Arc<dyn RemoteStore + Send + Sync>,
        show_data: Arc<dyn ShowData + Send + Sync>,
        cache_store: Box<dyn CacheStore>,
        file_service: Arc<dyn FileService + Send + Sync>,
    ) -> Synchronizer {
        Synchronizer {
            show_config,
            remote_root: remote_root.to_string(),
            local_root: local_root.to_string(),
            remote_store,
            show_data,
            cache_store,
            file_service,
            on_complete: None,
        }
    }

    pub fn with_completion_callback(mut self, callback: CompletionCallback) -> Synchronizer {
        self.on_complete = Some(callback);
        self
    }

    /// Rebuild the cached metadata for every asset component in scope.
    pub async fn sync(&self, selection: &Selection) -> Result<PassReport> {
        let mut cache = self.cache_store.load()?;
        let (units, mut errors) = self.collect_units(selection, None).await;
        let total = units.len();
        info!("Resolving {} asset components", total);

        let (resolved, unit_errors) = self.metadata_pass(units).await?;
        let succeeded = total - unit_errors.len();
        errors.extend(unit_errors);

        for (key, entry) in resolved {
            cache.insert(&key, entry);
        }
        if let Err(e) = self.cache_store.save(&cache) {
            errors.push(UnitError::new("cache", format!("{e:#}")));
        }

        let report = PassReport {
            total,
            succeeded,
            errors,
            component: None,
        };
        if let Some(callback) = &self.on_complete {
            callback(&report);
        }
        Ok(report)
    }

    /// Rebuild one component's metadata, then pull its files down to the
    /// local mirror and stamp each fully fetched directory with a
    /// `version.json` sidecar.
    pub async fn sync_and_download(
        &self,
        component: &str,
        selection: &Selection,
    ) -> Result<PassReport> {
        let mut cache = self.cache_store.load()?;
        let (units, mut errors) = self.collect_units(selection, Some(component)).await;
        let mut total = units.len();
        info!("Resolving {} {} components", total, component);

        let (resolved, unit_errors) = self.metadata_pass(units).await?;
        let mut succeeded = total - unit_errors.len();
        errors.extend(unit_errors);

        for (key, entry) in &resolved {
            cache.insert(key, entry.clone());
        }
        if let Err(e) = self.cache_store.save(&cache) {
            errors.push(UnitError::new("cache", format!("{e:#}")));
        }

        let (complete_entries, download_total, download_errors) =
            self.download_pass(&resolved).await?;
        total += download_total;
        succeeded += download_total - download_errors.len();
        errors.extend(download_errors);

        for index in complete_entries {
            let (_, entry) = &resolved[index];
            if entry.version.is_empty() {
                continue;
            }
            if let Err(e) = self.write_version_sidecar(entry) {
                errors.push(UnitError::new(&entry.local_path, format!("{e:#}")));
            }
        }

        let finished = OperationManager::new(Operation::Finished)?;
        finished.finish();

        let report = PassReport {
            total,
            succeeded,
            errors,
            component: Some(component.to_string()),
        };
        if let Some(callback) = &self.on_complete {
            callback(&report);
        }
        Ok(report)
    }

    /// Expand the scoped selection into concrete units. Name listings are
    /// fetched once per type and only when some component needs them; a
    /// failed enumeration skips that type but never the pass.
    async fn collect_units(
        &self,
        selection: &Selection,
        component_filter: Option<&str>,
    ) -> (Vec<SyncUnit>, Vec<UnitError>) {
        let mut units = Vec::new();
        let mut errors = Vec::new();

        for (asset_type, type_spec) in &self.show_config.asset_types {
            if !selection.includes_type(asset_type) {
                continue;
            }
            let components: Vec<&ComponentSpec> = type_spec
                .components
                .iter()
                .filter(|c| component_filter.is_none_or(|f| f == c.name))
                .filter(|c| selection.includes_component(asset_type, &c.name))
                .collect();
            if components.is_empty() {
                continue;
            }

            let needs_listing = components.iter().any(|c| {
                selection
                    .names(asset_type, &c.name)
                    .is_none_or(|names| names.is_empty())
            });

            let mut all_names: Vec<String> = Vec::new();
            if needs_listing {
                match self.asset_names(type_spec).await {
                    Ok(names) => all_names = names,
                    Err(e) => {
                        errors.push(UnitError::new(asset_type, format!("{e:#}")));
                        continue;
                    }
                }
            }

            for component in components {
                let names = match selection.names(asset_type, &component.name) {
                    Some(names) if !names.is_empty() => names.clone(),
                    _ => all_names.clone(),
                };
                for name in names {
                    units.push(SyncUnit {
                        type_root: type_spec.root.clone(),
                        asset_type: asset_type.clone(),
                        asset_name: name,
                        component: component.clone(),
                    });
                }
            }
        }

        (units, errors)
    }

    async fn asset_names(&self, type_spec: &TypeSpec) -> Result<Vec<String>> {
        if type_spec.shots {
            return self.show_data.shot_names();
        }
        let path = format!("{}/{}", self.remote_root, type_spec.root);
        self.remote_store.list(&path, ListMode::Dirs).await
    }

    /// Run the builder over every unit concurrently. The unit total is
    /// fixed before the first dispatch; results are merged by the caller
    /// after all units land.
    async fn metadata_pass(
        &self,
        units: Vec<SyncUnit>,
    ) -> Result<(Vec<(AssetKey, AssetEntry)>, Vec<UnitError>)> {
        let manager = OperationManager::new(Operation::Sync)?;
        let bar = manager.add_progress_bar(units.len(), "asset components")?;
        let progress = Arc::new(PassProgress::new(units.len()));
        let semaphore = Arc::new(Semaphore::new(worker_count()));
        let builder = DescriptorBuilder::new(
            Arc::clone(&self.remote_store),
            &self.remote_root,
            &self.local_root,
        );

        let mut labels = Vec::with_capacity(units.len());
        let mut handles = Vec::with_capacity(units.len());
        for unit in units {
            let key = AssetKey::new(&unit.asset_type, &unit.component.name, &unit.asset_name);
            labels.push(key.to_string());
            let builder = builder.clone();
            let semaphore = Arc::clone(&semaphore);
            let progress = Arc::clone(&progress);
            let bar = bar.clone();
            handles.push(tokio::spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => {
                        builder
                            .resolve(
                                &unit.type_root,
                                &unit.asset_type,
                                &unit.asset_name,
                                &unit.component,
                            )
                            .await
                    }
                    Err(e) => Err(BuildError::new(
                        key,
                        anyhow::anyhow!("Worker pool closed: {}", e),
                    )),
                };
                let percent = progress.record_unit();
                debug!("Rebuild pass at {:.1}%", percent);
                bar.inc(1);
                result
            }));
        }

        let mut resolved = Vec::new();
        let mut errors = Vec::new();
        for (label, outcome) in labels.iter().zip(join_all(handles).await) {
            match outcome {
                Ok(Ok(Some(pair))) => resolved.push(pair),
                Ok(Ok(None)) => {}
                Ok(Err(build_error)) => errors.push(build_error.into()),
                Err(e) => errors.push(UnitError::new(label, format!("Task failed: {}", e))),
            }
        }

        bar.finish();
        manager.finish();
        debug!(
            "Rebuild pass done: {}/{} units, complete={}",
            progress.completed(),
            progress.total(),
            progress.is_complete()
        );
        Ok((resolved, errors))
    }

    /// Pull every resolved file down, one bounded unit per file. Returns
    /// the indexes of entries whose files all arrived.
    async fn download_pass(
        &self,
        resolved: &[(AssetKey, AssetEntry)],
    ) -> Result<(Vec<usize>, usize, Vec<UnitError>)> {
        let mut jobs: Vec<(usize, DownloadJob)> = Vec::new();
        for (index, (_, entry)) in resolved.iter().enumerate() {
            let base = entry.remote_path.trim_end_matches('/');
            for file_name in &entry.file_names {
                jobs.push((
                    index,
                    DownloadJob {
                        remote_path: format!("{}/{}", base, file_name),
                        local_path: Path::new(&entry.local_path).join(file_name),
                    },
                ));
            }
        }

        let total = jobs.len();
        info!("Downloading {} files", total);
        let manager = OperationManager::new(Operation::Download)?;
        let bar = manager.add_progress_bar(total, "asset files")?;
        let progress = Arc::new(PassProgress::new(total));
        let semaphore = Arc::new(Semaphore::new(worker_count()));

        let mut job_meta = Vec::with_capacity(total);
        let mut handles = Vec::with_capacity(total);
        for (index, job) in jobs {
            job_meta.push((index, job.remote_path.clone()));
            let remote_store = Arc::clone(&self.remote_store);
            let semaphore = Arc::clone(&semaphore);
            let progress = Arc::clone(&progress);
            let bar = bar.clone();
            handles.push(tokio::spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => remote_store.download(std::slice::from_ref(&job)).await,
                    Err(e) => Err(anyhow::anyhow!("Worker pool closed: {}", e)),
                };
                let percent = progress.record_unit();
                debug!("Download pass at {:.1}%", percent);
                bar.inc(1);
                result
            }));
        }

        let mut errors = Vec::new();
        let mut failed_entries: HashSet<usize> = HashSet::new();
        for ((index, remote_path), outcome) in
            job_meta.into_iter().zip(join_all(handles).await)
        {
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    failed_entries.insert(index);
                    errors.push(UnitError::new(&remote_path, format!("{e:#}")));
                }
                Err(e) => {
                    failed_entries.insert(index);
                    errors.push(UnitError::new(&remote_path, format!("Task failed: {}", e)));
                }
            }
        }

        bar.finish();
        manager.finish();
        debug!(
            "Download pass done: {}/{} files",
            progress.completed(),
            progress.total()
        );

        let complete = (0..resolved.len())
            .filter(|index| !failed_entries.contains(index))
            .collect();
        Ok((complete, total, errors))
    }

    fn write_version_sidecar(&self, entry: &AssetEntry) -> Result<()> {
        let dir = Path::new(&entry.local_path);
        self.file_service.create_directory(dir)?;
        let content =
            serde_json::to_string_pretty(&serde_json::json!({ "version": entry.version }))?;
        self.file_service
            .write_file(&dir.join("version.json"), &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::config::MockDefaultCacheStore;
    use crate::models::AssetCache;
    use crate::remote::MockDefaultRemoteStore;
    use crate::show_data::MockDefaultShowData;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn single_type_config(versioned: bool) -> ShowConfig {
        let mut asset_types = BTreeMap::new();
        asset_types.insert(
            "char".to_string(),
            TypeSpec {
                root: "assets/char".to_string(),
                shots: false,
                components: vec![ComponentSpec::new("rig", "Rig", true, versioned, false)],
            },
        );
        ShowConfig { asset_types }
    }

    /// A deterministic in-memory remote with per-call latency jitter and a
    /// programmable set of failing asset names.
    struct FakeRemoteStore {
        failing: HashSet<String>,
    }

    impl FakeRemoteStore {
        fn new(failing: &[String]) -> FakeRemoteStore {
            FakeRemoteStore {
                failing: failing.iter().cloned().collect(),
            }
        }
    }

    #[async_trait::async_trait]
    impl RemoteStore for FakeRemoteStore {
        async fn list(&self, path: &str, mode: ListMode) -> Result<Vec<String>> {
            let jitter = (path.len() % 5) as u64 * 50;
            tokio::time::sleep(Duration::from_micros(jitter)).await;
            if self.failing.iter().any(|name| path.contains(name.as_str())) {
                anyhow::bail!("synthetic outage for {}", path);
            }
            match mode {
                ListMode::Dirs => Ok(names(&["rig"])),
                ListMode::FilesAndDirs => Ok(names(&["approved"])),
                ListMode::Files if path.ends_with("/history") => {
                    Ok(names(&["asset_rig_v007_high.mb"]))
                }
                ListMode::Files => Ok(names(&["asset_rig_high.mb"])),
            }
        }

        async fn download(&self, jobs: &[DownloadJob]) -> Result<()> {
            for job in jobs {
                if let Some(parent) = job.local_path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&job.local_path, b"payload").await?;
            }
            Ok(())
        }
    }

    fn capturing_cache_store(
        saved: &Arc<Mutex<Option<AssetCache>>>,
    ) -> Box<MockDefaultCacheStore> {
        let saved = Arc::clone(saved);
        let mut cache_store = MockDefaultCacheStore::new();
        cache_store
            .expect_load()
            .returning(|| Ok(AssetCache::default()));
        cache_store.expect_save().returning(move |cache| {
            *saved.lock().unwrap() = Some(cache.clone());
            Ok(String::new())
        });
        Box::new(cache_store)
    }

    #[tokio::test]
    async fn test_sync_stress_pass_counts_failures_and_fires_callback_once() {
        let asset_names: Vec<String> = (0..500).map(|i| format!("char{:03}", i)).collect();
        let failing: Vec<String> = asset_names.iter().step_by(50).cloned().collect();
        assert_eq!(failing.len(), 10);

        let saved = Arc::new(Mutex::new(None));
        let callbacks = Arc::new(AtomicUsize::new(0));
        let callback_count = Arc::clone(&callbacks);

        let synchronizer = Synchronizer::new(
            single_type_config(false),
            "/LongGong",
            "L:",
            Arc::new(FakeRemoteStore::new(&failing)),
            Arc::new(MockDefaultShowData::new()),
            capturing_cache_store(&saved),
            Arc::new(DefaultFileService),
        )
        .with_completion_callback(Box::new(move |_report| {
            callback_count.fetch_add(1, Ordering::SeqCst);
        }));

        let mut selection = Selection::default();
        selection.insert("char", "rig", asset_names);

        let report = synchronizer.sync(&selection).await.unwrap();

        assert_eq!(report.total, 500);
        assert_eq!(report.succeeded, 490);
        assert_eq!(report.errors.len(), 10);
        assert_eq!(callbacks.load(Ordering::SeqCst), 1);
        let saved = saved.lock().unwrap();
        assert_eq!(saved.as_ref().unwrap().entry_count(), 490);
    }

    #[tokio::test]
    async fn test_sync_merges_into_existing_cache_entries() {
        let saved = Arc::new(Mutex::new(None));
        let saved_capture = Arc::clone(&saved);
        let mut cache_store = MockDefaultCacheStore::new();
        cache_store.expect_load().returning(|| {
            let mut cache = AssetCache::default();
            cache.insert(
                &AssetKey::new("prop", "rig", "propLantern"),
                AssetEntry::create_mock_work_entry(),
            );
            Ok(cache)
        });
        cache_store.expect_save().returning(move |cache| {
            *saved_capture.lock().unwrap() = Some(cache.clone());
            Ok(String::new())
        });

        let synchronizer = Synchronizer::new(
            single_type_config(false),
            "/LongGong",
            "L:",
            Arc::new(FakeRemoteStore::new(&[])),
            Arc::new(MockDefaultShowData::new()),
            Box::new(cache_store),
            Arc::new(DefaultFileService),
        );

        let mut selection = Selection::default();
        selection.insert("char", "rig", names(&["charHei"]));

        let report = synchronizer.sync(&selection).await.unwrap();
        assert_eq!(report.succeeded, 1);

        let saved = saved.lock().unwrap();
        let cache = saved.as_ref().unwrap();
        assert_eq!(cache.entry_count(), 2);
        assert!(cache.get("prop", "rig", "propLantern").is_ok());
        assert!(cache.get("char", "rig", "charHei").is_ok());
    }

    #[tokio::test]
    async fn test_failed_type_enumeration_skips_type_but_not_pass() {
        let mut remote_store = MockDefaultRemoteStore::new();
        remote_store
            .expect_list()
            .withf(|path, mode| path == "/LongGong/assets/char" && *mode == ListMode::Dirs)
            .returning(|_, _| Err(anyhow::anyhow!("listing unavailable")));
        remote_store
            .expect_list()
            .withf(|path, mode| path == "/LongGong/assets/prop" && *mode == ListMode::Dirs)
            .returning(|_, _| Ok(names(&["lantern"])));
        remote_store
            .expect_list()
            .withf(|path, mode| path == "/LongGong/assets/prop/lantern" && *mode == ListMode::Dirs)
            .returning(|_, _| Ok(names(&["rig"])));
        remote_store
            .expect_list()
            .withf(|path, mode| {
                path == "/LongGong/assets/prop/lantern/rig" && *mode == ListMode::FilesAndDirs
            })
            .returning(|_, _| Ok(names(&["approved"])));
        remote_store
            .expect_list()
            .withf(|path, mode| {
                path == "/LongGong/assets/prop/lantern/rig/approved" && *mode == ListMode::Files
            })
            .returning(|_, _| Ok(names(&["propLantern_rig_high.mb"])));

        let mut config = single_type_config(false);
        config.asset_types.insert(
            "prop".to_string(),
            TypeSpec {
                root: "assets/prop".to_string(),
                shots: false,
                components: vec![ComponentSpec::new("rig", "Rig", true, false, false)],
            },
        );

        let saved = Arc::new(Mutex::new(None));
        let synchronizer = Synchronizer::new(
            config,
            "/LongGong",
            "L:",
            Arc::new(remote_store),
            Arc::new(MockDefaultShowData::new()),
            capturing_cache_store(&saved),
            Arc::new(DefaultFileService),
        );

        let report = synchronizer.sync(&Selection::default()).await.unwrap();

        assert_eq!(report.total, 1);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].unit, "char");
        let saved = saved.lock().unwrap();
        assert!(saved.as_ref().unwrap().get("prop", "rig", "lantern").is_ok());
    }

    #[tokio::test]
    async fn test_collect_units_uses_show_data_for_shot_types() {
        let mut asset_types = BTreeMap::new();
        asset_types.insert(
            "shot".to_string(),
            TypeSpec {
                root: "shots".to_string(),
                shots: true,
                components: vec![
                    ComponentSpec::new("anim-cache", "Anim Cache", true, true, false),
                    ComponentSpec::new("camera", "Camera", true, true, false),
                ],
            },
        );

        let mut show_data = MockDefaultShowData::new();
        show_data
            .expect_shot_names()
            .returning(|| Ok(names(&["seq010/sh010", "seq010/sh020"])));

        let synchronizer = Synchronizer::new(
            ShowConfig { asset_types },
            "/LongGong",
            "L:",
            Arc::new(MockDefaultRemoteStore::new()),
            Arc::new(show_data),
            Box::new(MockDefaultCacheStore::new()),
            Arc::new(DefaultFileService),
        );

        let (units, errors) = synchronizer
            .collect_units(&Selection::default(), None)
            .await;
        assert!(errors.is_empty());
        assert_eq!(units.len(), 4);
        assert!(units.iter().all(|u| u.asset_type == "shot"));
        assert!(units.iter().any(|u| u.asset_name == "seq010/sh020"));
    }

    #[tokio::test]
    async fn test_collect_units_with_explicit_names_skips_listing() {
        // no list expectations: an unexpected call would panic the mock
        let synchronizer = Synchronizer::new(
            single_type_config(false),
            "/LongGong",
            "L:",
            Arc::new(MockDefaultRemoteStore::new()),
            Arc::new(MockDefaultShowData::new()),
            Box::new(MockDefaultCacheStore::new()),
            Arc::new(DefaultFileService),
        );

        let mut selection = Selection::default();
        selection.insert("char", "rig", names(&["charHei", "charYin"]));

        let (units, errors) = synchronizer.collect_units(&selection, None).await;
        assert!(errors.is_empty());
        assert_eq!(units.len(), 2);
    }

    #[tokio::test]
    async fn test_sync_and_download_writes_files_and_version_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let local_root = dir.path().display().to_string();

        let saved = Arc::new(Mutex::new(None));
        let synchronizer = Synchronizer::new(
            single_type_config(true),
            "/LongGong",
            &local_root,
            Arc::new(FakeRemoteStore::new(&[])),
            Arc::new(MockDefaultShowData::new()),
            capturing_cache_store(&saved),
            Arc::new(DefaultFileService),
        );

        let mut selection = Selection::default();
        selection.insert("char", "rig", names(&["charHei"]));

        let report = synchronizer
            .sync_and_download("rig", &selection)
            .await
            .unwrap();

        assert_eq!(report.component.as_deref(), Some("rig"));
        assert!(report.errors.is_empty());
        // one metadata unit plus one file download
        assert_eq!(report.total, 2);
        assert_eq!(report.succeeded, 2);

        let approved_dir = dir
            .path()
            .join("assets")
            .join("char")
            .join("charHei")
            .join("rig")
            .join("approved");
        assert!(approved_dir.join("asset_rig_high.mb").exists());
        let sidecar = std::fs::read_to_string(approved_dir.join("version.json")).unwrap();
        assert!(sidecar.contains("\"version\": \"v007\""));
    }

    #[tokio::test]
    async fn test_sync_and_download_ignores_other_components() {
        let mut config = single_type_config(false);
        config
            .asset_types
            .get_mut("char")
            .unwrap()
            .components
            .push(ComponentSpec::new("gpu-cache", "GPU Cache", true, false, false));

        let dir = tempfile::tempdir().unwrap();
        let saved = Arc::new(Mutex::new(None));
        let synchronizer = Synchronizer::new(
            config,
            "/LongGong",
            &dir.path().display().to_string(),
            Arc::new(FakeRemoteStore::new(&[])),
            Arc::new(MockDefaultShowData::new()),
            capturing_cache_store(&saved),
            Arc::new(DefaultFileService),
        );

        let mut selection = Selection::default();
        selection.insert("char", "rig", names(&["charHei"]));
        selection.insert("char", "gpu-cache", names(&["charHei"]));

        let report = synchronizer
            .sync_and_download("rig", &selection)
            .await
            .unwrap();

        let saved = saved.lock().unwrap();
        let cache = saved.as_ref().unwrap();
        assert!(cache.get("char", "rig", "charHei").is_ok());
        assert!(cache.get("char", "gpu-cache", "charHei").is_err());
        assert_eq!(report.component.as_deref(), Some("rig"));
    }

    #[tokio::test]
    async fn test_sync_surfaces_persistence_failure_in_report() {
        let mut cache_store = MockDefaultCacheStore::new();
        cache_store
            .expect_load()
            .returning(|| Ok(AssetCache::default()));
        cache_store
            .expect_save()
            .returning(|_| Err(anyhow::anyhow!("disk full")));

        let synchronizer = Synchronizer::new(
            single_type_config(false),
            "/LongGong",
            "L:",
            Arc::new(FakeRemoteStore::new(&[])),
            Arc::new(MockDefaultShowData::new()),
            Box::new(cache_store),
            Arc::new(DefaultFileService),
        );

        let mut selection = Selection::default();
        selection.insert("char", "rig", names(&["charHei"]));

        let report = synchronizer.sync(&selection).await.unwrap();
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].unit, "cache");
        assert!(report.errors[0].message.contains("disk full"));
    }
}
