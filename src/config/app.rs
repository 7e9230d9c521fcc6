use serde_derive::Deserialize;

use std::path::Path;

/// Application configuration settings
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultAppConfig {
    /// REMOTE_BASE_URL environment variable
    pub remote_base_url: String,
    /// REMOTE_ROOT environment variable
    remote_root: String,
    /// LOCAL_ROOT environment variable
    local_root: String,
    /// CACHE_FILE_PATH environment variable
    cache_file_path: String,
    /// SELECTION_FILE_PATH environment variable
    selection_file_path: String,
    /// SHOW_CONFIG_PATH environment variable
    show_config_path: String,
    /// SHOT_LIST_PATH environment variable
    shot_list_path: String,
}

impl DefaultAppConfig {
    /// Read the configuration from environment variables, keeping the
    /// default for any unset variable.
    pub fn from_env() -> DefaultAppConfig {
        DefaultAppConfig::new(
            std::env::var("REMOTE_BASE_URL").ok(),
            std::env::var("REMOTE_ROOT").ok(),
            std::env::var("LOCAL_ROOT").ok(),
            std::env::var("CACHE_FILE_PATH").ok(),
            std::env::var("SELECTION_FILE_PATH").ok(),
            std::env::var("SHOW_CONFIG_PATH").ok(),
            std::env::var("SHOT_LIST_PATH").ok(),
        )
    }

    pub fn new(
        remote_base_url: Option<String>,
        remote_root: Option<String>,
        local_root: Option<String>,
        cache_file_path: Option<String>,
        selection_file_path: Option<String>,
        show_config_path: Option<String>,
        shot_list_path: Option<String>,
    ) -> DefaultAppConfig {
        DefaultAppConfig {
            remote_base_url: remote_base_url
                .unwrap_or("https://cms.studio.example/api".to_string()),
            remote_root: remote_root.unwrap_or("/LongGong".to_string()),
            local_root: local_root.unwrap_or("L:".to_string()),
            cache_file_path: cache_file_path.unwrap_or("asset_cache.json".to_string()),
            selection_file_path: selection_file_path
                .unwrap_or("update_selection.json".to_string()),
            show_config_path: show_config_path.unwrap_or("show_config.json".to_string()),
            shot_list_path: shot_list_path.unwrap_or("shot_list.json".to_string()),
        }
    }
}

impl Default for DefaultAppConfig {
    fn default() -> Self {
        DefaultAppConfig {
            remote_base_url: "https://cms.studio.example/api".to_string(),
            remote_root: "/LongGong".to_string(),
            local_root: "L:".to_string(),
            cache_file_path: "asset_cache.json".to_string(),
            selection_file_path: "update_selection.json".to_string(),
            show_config_path: "show_config.json".to_string(),
            shot_list_path: "shot_list.json".to_string(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
impl AppConfig for DefaultAppConfig {
    fn get_remote_base_url(&self) -> &str {
        &self.remote_base_url
    }

    fn get_remote_root(&self) -> &str {
        &self.remote_root
    }

    fn get_local_root(&self) -> &str {
        &self.local_root
    }

    fn get_cache_file_path(&self) -> &Path {
        Path::new(&self.cache_file_path)
    }

    fn get_selection_file_path(&self) -> &Path {
        Path::new(&self.selection_file_path)
    }

    fn get_show_config_path(&self) -> &Path {
        Path::new(&self.show_config_path)
    }

    fn get_shot_list_path(&self) -> &Path {
        Path::new(&self.shot_list_path)
    }
}

pub trait AppConfig: Send + Sync + 'static {
    fn get_remote_base_url(&self) -> &str;
    fn get_remote_root(&self) -> &str;
    fn get_local_root(&self) -> &str;
    fn get_cache_file_path(&self) -> &Path;
    fn get_selection_file_path(&self) -> &Path;
    fn get_show_config_path(&self) -> &Path;
    fn get_shot_list_path(&self) -> &Path;
}
