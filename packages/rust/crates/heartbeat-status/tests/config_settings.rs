#![allow(missing_docs)]

use std::path::PathBuf;

use heartbeat_status::{
    load_runtime_settings_from_paths, runtime_settings_paths, set_config_home_override,
};
use tempfile::TempDir;

fn write_file(path: PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write yaml");
}

#[test]
fn merge_user_overrides_system() {
    let tmp = TempDir::new().expect("tempdir");
    let system = tmp.path().join("packages/conf/settings.yaml");
    let user = tmp.path().join(".config/heartbeat-status/settings.yaml");

    write_file(
        system.clone(),
        r#"
status:
  threshold_secs: 480
  dead_code: 1
  alive_code: 0
  metric_template: "accounts.{environment}.{account_id}.status"
  index_key: "account_index"
  db: 0
"#,
    );
    write_file(
        user.clone(),
        r#"
status:
  threshold_secs: 900
  index_key: "heartbeats:accounts"
"#,
    );

    let settings = load_runtime_settings_from_paths(&system, &user);
    assert_eq!(settings.status.threshold_secs, Some(900));
    assert_eq!(
        settings.status.index_key.as_deref(),
        Some("heartbeats:accounts")
    );
    assert_eq!(settings.status.dead_code, Some(1));
    assert_eq!(settings.status.alive_code, Some(0));
    assert_eq!(
        settings.status.metric_template.as_deref(),
        Some("accounts.{environment}.{account_id}.status")
    );
    assert_eq!(settings.status.db, Some(0));
}

#[test]
fn missing_files_yield_defaults() {
    let tmp = TempDir::new().expect("tempdir");
    let settings = load_runtime_settings_from_paths(
        &tmp.path().join("nope/system.yaml"),
        &tmp.path().join("nope/user.yaml"),
    );
    assert!(settings.status.threshold_secs.is_none());
    assert!(settings.status.metric_template.is_none());
}

#[test]
fn invalid_user_file_is_ignored() {
    let tmp = TempDir::new().expect("tempdir");
    let system = tmp.path().join("system.yaml");
    let user = tmp.path().join("user.yaml");
    write_file(system.clone(), "status:\n  threshold_secs: 600\n");
    write_file(user.clone(), "status: [not, a, mapping\n");

    let settings = load_runtime_settings_from_paths(&system, &user);
    assert_eq!(settings.status.threshold_secs, Some(600));
}

#[test]
fn empty_file_is_treated_as_no_settings() {
    let tmp = TempDir::new().expect("tempdir");
    let system = tmp.path().join("system.yaml");
    let user = tmp.path().join("user.yaml");
    write_file(system.clone(), "status:\n  dead_code: 5\n");
    write_file(user.clone(), "");

    let settings = load_runtime_settings_from_paths(&system, &user);
    assert_eq!(settings.status.dead_code, Some(5));
}

#[test]
fn conf_override_moves_user_settings_path() {
    let tmp = TempDir::new().expect("tempdir");
    set_config_home_override(tmp.path());

    let (system, user) = runtime_settings_paths();
    assert!(system.ends_with("packages/conf/settings.yaml"));
    assert_eq!(user, tmp.path().join("heartbeat-status/settings.yaml"));
}
