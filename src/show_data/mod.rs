use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::services::{DefaultFileService, FileService};

/// Source of shot names for shot-type assets. Shots are not listed from the
/// remote store; production publishes the sequence/shot breakdown
/// separately.
pub struct DefaultShowData {
    shot_list_path: PathBuf,
    file_service: Arc<dyn FileService + Send + Sync>,
}

impl Default for DefaultShowData {
    fn default() -> Self {
        DefaultShowData {
            shot_list_path: PathBuf::from("shot_list.json"),
            file_service: Arc::new(DefaultFileService),
        }
    }
}

impl DefaultShowData {
    pub fn new(
        shot_list_path: PathBuf,
        file_service: Arc<dyn FileService + Send + Sync>,
    ) -> Self {
        DefaultShowData {
            shot_list_path,
            file_service,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
impl ShowData for DefaultShowData {
    /// Returns `sequence/shot` names, e.g. `seq010/sh020`, ordered by
    /// sequence then shot.
    fn shot_names(&self) -> Result<Vec<String>> {
        let content = self
            .file_service
            .read_file(&self.shot_list_path)
            .with_context(|| {
                format!("Failed to read shot list: {}", self.shot_list_path.display())
            })?;
        let sequences: BTreeMap<String, Vec<String>> = serde_json::from_str(&content)
            .with_context(|| {
                format!(
                    "Failed to parse shot list: {}",
                    self.shot_list_path.display()
                )
            })?;

        let names = sequences
            .iter()
            .flat_map(|(sequence, shots)| {
                shots.iter().map(move |shot| format!("{}/{}", sequence, shot))
            })
            .collect();
        Ok(names)
    }
}

pub trait ShowData: Send + Sync {
    fn shot_names(&self) -> Result<Vec<String>>;
}
