use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::models::Selection;
use crate::services::{DefaultFileService, FileService};

pub struct DefaultSelectionStore {
    selection_file_path: PathBuf,
    file_service: Arc<dyn FileService + Send + Sync>,
}

impl Default for DefaultSelectionStore {
    fn default() -> Self {
        DefaultSelectionStore {
            selection_file_path: PathBuf::from("update_selection.json"),
            file_service: Arc::new(DefaultFileService),
        }
    }
}

impl DefaultSelectionStore {
    pub fn new(
        selection_file_path: PathBuf,
        file_service: Arc<dyn FileService + Send + Sync>,
    ) -> Self {
        DefaultSelectionStore {
            selection_file_path,
            file_service,
        }
    }

    fn to_indented_json<T: Serialize>(value: &T) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        value
            .serialize(&mut serializer)
            .context("Failed to serialize to JSON")?;
        String::from_utf8(buffer).context("Serialized JSON is not valid UTF-8")
    }
}

#[cfg_attr(test, mockall::automock)]
impl SelectionStore for DefaultSelectionStore {
    /// Load the persisted selection; missing or malformed files read as an
    /// empty selection.
    fn load(&self) -> Result<Selection> {
        if !self.file_service.file_exists(&self.selection_file_path)? {
            return Ok(Selection::default());
        }
        let content = match self.file_service.read_file(&self.selection_file_path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "Could not read selection file {}, starting empty: {:#}",
                    self.selection_file_path.display(),
                    e
                );
                return Ok(Selection::default());
            }
        };
        match serde_json::from_str::<Selection>(&content) {
            Ok(selection) => Ok(selection),
            Err(e) => {
                warn!(
                    "Selection file {} is not a valid selection object, starting empty: {}",
                    self.selection_file_path.display(),
                    e
                );
                Ok(Selection::default())
            }
        }
    }

    fn save(&self, selection: &Selection) -> Result<String> {
        if let Some(parent) = self.selection_file_path.parent() {
            if !parent.as_os_str().is_empty() {
                self.file_service.create_directory(parent)?;
            }
        }

        let content = Self::to_indented_json(selection).with_context(|| {
            format!(
                "Failed to serialize selection: {}",
                self.selection_file_path.display()
            )
        })?;

        self.file_service
            .write_file(&self.selection_file_path, &content)?;
        info!(
            "Saved update selection to {}",
            self.selection_file_path.display()
        );
        Ok(content)
    }

    /// Reconcile a freshly submitted selection for one component into the
    /// persisted selection file and return the merged result.
    ///
    /// When no file exists yet, the new selection becomes the file as-is.
    fn merge(&self, selected_component: &str, new_selection: &Selection) -> Result<Selection> {
        if !self.file_service.file_exists(&self.selection_file_path)? {
            self.save(new_selection)?;
            return Ok(new_selection.clone());
        }

        let mut persisted = self.load()?;
        persisted.merge_component(selected_component, new_selection);
        self.save(&persisted)?;
        Ok(persisted)
    }
}

pub trait SelectionStore: Send + Sync {
    fn load(&self) -> Result<Selection>;
    fn save(&self, selection: &Selection) -> Result<String>;
    fn merge(&self, selected_component: &str, new_selection: &Selection) -> Result<Selection>;
}
