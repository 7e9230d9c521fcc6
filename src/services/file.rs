use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Default, Clone)]
pub struct DefaultFileService;

#[cfg_attr(test, mockall::automock)]
impl FileService for DefaultFileService {
    fn read_file(&self, file_path: &Path) -> Result<String> {
        debug!("Reading file: {}", file_path.display());
        std::fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    fn file_exists(&self, file_path: &Path) -> Result<bool> {
        debug!("Checking if file exists: {}", file_path.display());
        file_path
            .try_exists()
            .with_context(|| format!("Failed to check if file exists: {}", file_path.display()))
    }

    fn write_file(&self, file_path: &Path, content: &str) -> Result<()> {
        debug!("Writing file: {}", file_path.display());
        std::fs::write(file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;
        Ok(())
    }

    fn create_directory(&self, dir_path: &Path) -> Result<()> {
        debug!("Creating directory: {}", dir_path.display());
        std::fs::create_dir_all(dir_path)
            .with_context(|| format!("Failed to create directory: {}", dir_path.display()))?;
        info!("Created directory: {}", dir_path.display());
        Ok(())
    }
}

pub trait FileService: Send + Sync + 'static {
    fn read_file(&self, file_path: &Path) -> Result<String>;
    fn file_exists(&self, file_path: &Path) -> Result<bool>;
    fn write_file(&self, file_path: &Path, content: &str) -> Result<()>;
    fn create_directory(&self, dir_path: &Path) -> Result<()>;
}
