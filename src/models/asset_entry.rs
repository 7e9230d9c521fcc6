use serde_derive::{Deserialize, Serialize};

/// One resolved asset component as it exists on the remote store.
///
/// `version` stays empty for unversioned components; `notes_path` is only
/// present when the component supports release notes and a notes file was
/// found for the resolved version.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AssetEntry {
    pub approved: bool,
    pub remote_path: String,
    pub local_path: String,
    pub version: String,
    pub file_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_path: Option<String>,
}

impl AssetEntry {
    pub fn new(
        approved: bool,
        remote_path: String,
        local_path: String,
        version: String,
        file_names: Vec<String>,
        notes_path: Option<String>,
    ) -> AssetEntry {
        AssetEntry {
            approved,
            remote_path,
            local_path,
            version,
            file_names,
            notes_path,
        }
    }

    #[cfg(test)]
    pub fn create_mock_approved_entry() -> AssetEntry {
        AssetEntry::new(
            true,
            "/LongGong/assets/char/Hei/rig/approved".to_string(),
            "L:/assets/char/Hei/rig/approved".to_string(),
            "v012".to_string(),
            vec!["charHei_rig_high.mb".to_string()],
            None,
        )
    }

    #[cfg(test)]
    pub fn create_mock_work_entry() -> AssetEntry {
        AssetEntry::new(
            false,
            "/LongGong/assets/prop/lantern/rig/work/".to_string(),
            "L:/assets/prop/lantern/rig/work".to_string(),
            "v004".to_string(),
            vec!["propLantern_rig_v004.mb".to_string()],
            None,
        )
    }
}
