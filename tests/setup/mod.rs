#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

pub fn setup_test_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Binary wired to a temp working directory and an unreachable remote, so
/// no test ever talks to a real endpoint.
pub fn get_bin(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("anicache").expect("Failed to find binary");

    cmd.current_dir(temp_dir.path())
        .env("REMOTE_BASE_URL", "http://127.0.0.1:1/api")
        .env("REMOTE_ROOT", "/LongGong")
        .env(
            "LOCAL_ROOT",
            temp_dir.path().join("mirror").display().to_string(),
        )
        .env("CACHE_FILE_PATH", "asset_cache.json")
        .env("SELECTION_FILE_PATH", "update_selection.json")
        .env("SHOW_CONFIG_PATH", "show_config.json")
        .env("SHOT_LIST_PATH", "shot_list.json");

    cmd
}

pub fn get_bin_in_test_dir() -> (Command, TempDir) {
    let temp_dir = setup_test_dir();
    let cmd = get_bin(&temp_dir);
    (cmd, temp_dir)
}

pub fn create_asset_cache(dir: &TempDir, content: &str) {
    let cache_path = dir.path().join("asset_cache.json");
    fs::write(cache_path, content).expect("Failed to write asset_cache.json");
}

pub fn create_update_selection(dir: &TempDir, content: &str) {
    let selection_path = dir.path().join("update_selection.json");
    fs::write(selection_path, content).expect("Failed to write update_selection.json");
}

pub fn read_update_selection(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("update_selection.json"))
        .expect("Failed to read update_selection.json")
}

pub const CACHE_JSON_WITH_ONE_ENTRY: &str = r#"{
    "char": {
        "rig": {
            "charHei": {
                "approved": true,
                "remote_path": "/LongGong/assets/char/Hei/rig/approved",
                "local_path": "L:/assets/char/Hei/rig/approved",
                "version": "v012",
                "file_names": [
                    "charHei_rig_high.mb"
                ]
            }
        }
    }
}"#;

pub const SELECTION_JSON_WITH_RIG_AND_AUDIO: &str = r#"{
    "char": {
        "audio": [
            "charHei"
        ],
        "rig": [
            "charHei",
            "charYin"
        ]
    }
}"#;
