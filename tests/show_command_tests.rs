mod setup;

use predicates::prelude::*;

#[test]
fn test_show_prints_cached_entry_as_json() {
    let (mut cmd, temp_dir) = setup::get_bin_in_test_dir();
    setup::create_asset_cache(&temp_dir, setup::CACHE_JSON_WITH_ONE_ENTRY);

    cmd.args(["show", "char", "rig", "charHei"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\": \"v012\""))
        .stdout(predicate::str::contains("charHei_rig_high.mb"));
}

#[test]
fn test_show_missing_asset_reports_name_level() {
    let (mut cmd, temp_dir) = setup::get_bin_in_test_dir();
    setup::create_asset_cache(&temp_dir, setup::CACHE_JSON_WITH_ONE_ENTRY);

    cmd.args(["show", "char", "rig", "charYin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Asset \"charYin\" not found under \"char/rig\"",
        ));
}

#[test]
fn test_show_missing_component_reports_component_level() {
    let (mut cmd, temp_dir) = setup::get_bin_in_test_dir();
    setup::create_asset_cache(&temp_dir, setup::CACHE_JSON_WITH_ONE_ENTRY);

    cmd.args(["show", "char", "audio", "charHei"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Component \"audio\" not found under asset type \"char\"",
        ));
}

#[test]
fn test_show_with_missing_cache_file_reports_type_level() {
    let (mut cmd, _temp_dir) = setup::get_bin_in_test_dir();

    cmd.args(["show", "char", "rig", "charHei"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Asset type \"char\" not found in cache",
        ));
}

#[test]
fn test_show_with_malformed_cache_file_reads_as_empty() {
    let (mut cmd, temp_dir) = setup::get_bin_in_test_dir();
    setup::create_asset_cache(&temp_dir, "not json at all");

    cmd.args(["show", "char", "rig", "charHei"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Asset type \"char\" not found in cache",
        ));
}
