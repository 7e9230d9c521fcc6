use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_derive::{Deserialize, Serialize};
use tracing::debug;

use crate::services::FileService;

/// One named facet of an asset type, e.g. "rig" or "model/cache".
///
/// The name doubles as the component's root path relative to the asset
/// folder and may span multiple segments. Flags for a given component name
/// are assumed identical across asset types.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ComponentSpec {
    pub name: String,
    pub display_name: String,
    pub publishable: bool,
    pub versioned: bool,
    pub notes: bool,
}

impl ComponentSpec {
    pub fn new(
        name: &str,
        display_name: &str,
        publishable: bool,
        versioned: bool,
        notes: bool,
    ) -> ComponentSpec {
        ComponentSpec {
            name: name.to_string(),
            display_name: display_name.to_string(),
            publishable,
            versioned,
            notes,
        }
    }
}

/// One top-level asset category and where its assets live on the remote.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TypeSpec {
    /// Remote root of this type, relative to the show root.
    pub root: String,
    /// Asset names come from the show-data collaborator instead of a
    /// remote directory listing.
    #[serde(default)]
    pub shots: bool,
    pub components: Vec<ComponentSpec>,
}

/// The show's asset type registry. Fixed at load time, never mutated by a
/// pass.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct ShowConfig {
    pub asset_types: BTreeMap<String, TypeSpec>,
}

impl Default for ShowConfig {
    fn default() -> Self {
        let char_components = vec![
            ComponentSpec::new("rig", "Rig", true, true, true),
            ComponentSpec::new("model/cache", "Model Cache", true, true, false),
            ComponentSpec::new("gpu-cache", "GPU Cache", true, true, false),
        ];
        let prop_components = vec![
            ComponentSpec::new("rig", "Rig", true, true, true),
            ComponentSpec::new("model/cache", "Model Cache", true, true, false),
        ];
        let set_components = vec![
            ComponentSpec::new("model/cache", "Model Cache", true, true, false),
            ComponentSpec::new("gpu-cache", "GPU Cache", true, true, false),
        ];
        let shot_components = vec![
            ComponentSpec::new("audio", "Audio", true, false, false),
            ComponentSpec::new("anim-cache", "Anim Cache", true, true, false),
            ComponentSpec::new("camera", "Camera", true, true, false),
        ];

        let asset_types = BTreeMap::from([
            (
                "char".to_string(),
                TypeSpec {
                    root: "assets/char".to_string(),
                    shots: false,
                    components: char_components,
                },
            ),
            (
                "prop".to_string(),
                TypeSpec {
                    root: "assets/prop".to_string(),
                    shots: false,
                    components: prop_components,
                },
            ),
            (
                "set".to_string(),
                TypeSpec {
                    root: "assets/set".to_string(),
                    shots: false,
                    components: set_components,
                },
            ),
            (
                "shot".to_string(),
                TypeSpec {
                    root: "shots".to_string(),
                    shots: true,
                    components: shot_components,
                },
            ),
        ]);

        ShowConfig { asset_types }
    }
}

impl ShowConfig {
    /// Load the registry from disk, falling back to the built-in defaults
    /// when no config file exists. A present but malformed file is an
    /// error; silently ignoring it would rebuild the wrong asset set.
    pub fn load(
        show_config_path: &Path,
        file_service: &Arc<dyn FileService + Send + Sync>,
    ) -> Result<ShowConfig> {
        if !file_service.file_exists(show_config_path)? {
            debug!(
                "No show config at {}, using built-in defaults",
                show_config_path.display()
            );
            return Ok(ShowConfig::default());
        }
        let content = file_service.read_file(show_config_path)?;
        let config: ShowConfig = serde_json::from_str(&content).with_context(|| {
            format!(
                "Failed to parse show config file: {}",
                show_config_path.display()
            )
        })?;
        Ok(config)
    }
}
