use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};
use tracing::{error, info};
use url::Url;

/// What a directory listing should contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    Files,
    Dirs,
    FilesAndDirs,
}

impl ListMode {
    fn as_query(&self) -> &'static str {
        match self {
            ListMode::Files => "files",
            ListMode::Dirs => "dirs",
            ListMode::FilesAndDirs => "files_and_dirs",
        }
    }
}

/// One file to pull down: remote source and local destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadJob {
    pub remote_path: String,
    pub local_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct DefaultRemoteStore {
    base_url: String,
}

impl DefaultRemoteStore {
    pub fn new(base_url: String) -> DefaultRemoteStore {
        DefaultRemoteStore { base_url }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
impl RemoteStore for DefaultRemoteStore {
    async fn list(&self, path: &str, mode: ListMode) -> Result<Vec<String>> {
        let url = Url::parse_with_params(
            &format!("{}/list", self.base_url),
            [("path", path), ("mode", mode.as_query())],
        )?;

        match reqwest::get(url.as_str()).await {
            Ok(response) => {
                info!("[GET] {} [{}]", url, response.status());
                if !response.status().is_success() {
                    bail!("Listing {} failed with status {}", path, response.status());
                }
                let names = response.json::<Vec<String>>().await?;
                Ok(names)
            }
            Err(e) => {
                match e.status() {
                    Some(status) => error!("[GET] {} [{}] - Error: {}", url, status, e),
                    None => error!("[GET] {} - Error: {}", url, e),
                }
                Err(anyhow!("Failed to list {}: {}", path, e))
            }
        }
    }

    async fn download(&self, jobs: &[DownloadJob]) -> Result<()> {
        for job in jobs {
            let url = Url::parse_with_params(
                &format!("{}/fetch", self.base_url),
                [("path", job.remote_path.as_str())],
            )?;

            let response = match reqwest::get(url.as_str()).await {
                Ok(response) => {
                    info!("[GET] {} [{}]", url, response.status());
                    if !response.status().is_success() {
                        bail!(
                            "Downloading {} failed with status {}",
                            job.remote_path,
                            response.status()
                        );
                    }
                    response
                }
                Err(e) => {
                    match e.status() {
                        Some(status) => error!("[GET] {} [{}] - Error: {}", url, status, e),
                        None => error!("[GET] {} - Error: {}", url, e),
                    }
                    bail!("Failed to download {}: {}", job.remote_path, e);
                }
            };

            let content = response.bytes().await?;
            if let Some(parent) = job.local_path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&job.local_path, &content).await?;
            info!(
                "Downloaded {} to {}",
                job.remote_path,
                job.local_path.display()
            );
        }
        Ok(())
    }
}

#[async_trait::async_trait]
pub trait RemoteStore: Send + Sync {
    async fn list(&self, path: &str, mode: ListMode) -> Result<Vec<String>>;
    async fn download(&self, jobs: &[DownloadJob]) -> Result<()>;
}
