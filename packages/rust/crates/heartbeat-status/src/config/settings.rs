//! Runtime settings loader for heartbeat-status.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/settings.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/heartbeat-status/settings.yaml`
//!
//! Merge precedence is user over system. Missing or unparsable files are
//! skipped with a warning.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::observability::ReporterEvent;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/settings.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "heartbeat-status/settings.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";
static CONFIG_HOME_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeSettings {
    #[serde(default)]
    pub status: StatusSettings,
}

/// `status:` section. Every field falls back to the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusSettings {
    pub threshold_secs: Option<u64>,
    pub dead_code: Option<i64>,
    pub alive_code: Option<i64>,
    pub metric_template: Option<String>,
    pub index_key: Option<String>,
    pub db: Option<i64>,
}

impl RuntimeSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            status: self.status.merge(overlay.status),
        }
    }
}

impl StatusSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            threshold_secs: overlay.threshold_secs.or(self.threshold_secs),
            dead_code: overlay.dead_code.or(self.dead_code),
            alive_code: overlay.alive_code.or(self.alive_code),
            metric_template: overlay.metric_template.or(self.metric_template),
            index_key: overlay.index_key.or(self.index_key),
            db: overlay.db.or(self.db),
        }
    }
}

/// Load merged runtime settings (user overrides system).
pub fn load_runtime_settings() -> RuntimeSettings {
    let (system_path, user_path) = runtime_settings_paths();
    load_runtime_settings_from_paths(&system_path, &user_path)
}

#[doc(hidden)]
pub fn runtime_settings_paths() -> (PathBuf, PathBuf) {
    let root = project_root();
    let system_path = root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH);
    let user_path = resolve_config_home(&root).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH);
    (system_path, user_path)
}

#[doc(hidden)]
pub fn load_runtime_settings_from_paths(system: &Path, user: &Path) -> RuntimeSettings {
    load_one(system).merge(load_one(user))
}

fn load_one(path: &Path) -> RuntimeSettings {
    if !path.exists() {
        return RuntimeSettings::default();
    }
    let parsed = std::fs::read_to_string(path)
        .map_err(|error| ("read", error.to_string()))
        .and_then(|raw| {
            serde_yaml::from_str::<Option<RuntimeSettings>>(&raw)
                .map_err(|error| ("parse", error.to_string()))
        });
    match parsed {
        Ok(settings) => {
            tracing::debug!(
                event = ReporterEvent::SettingsFileLoaded.as_str(),
                path = %path.display(),
                "settings file loaded"
            );
            settings.unwrap_or_default()
        }
        Err((stage, error)) => {
            tracing::warn!(
                event = ReporterEvent::SettingsFileIgnored.as_str(),
                path = %path.display(),
                stage,
                error = %error,
                "failed to load settings file; ignoring"
            );
            RuntimeSettings::default()
        }
    }
}

/// Non-empty, trimmed value of an environment variable.
fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn project_root() -> PathBuf {
    env_path("PRJ_ROOT")
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Set config-home override (used by CLI `--conf`).
///
/// The path can be absolute, or relative to `PRJ_ROOT`/cwd.
pub fn set_config_home_override(path: impl Into<PathBuf>) {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return;
    }
    if CONFIG_HOME_OVERRIDE.set(path.clone()).is_err()
        && let Some(current) = CONFIG_HOME_OVERRIDE.get()
        && current != &path
    {
        tracing::warn!(
            event = ReporterEvent::ConfigHomeOverrideIgnored.as_str(),
            current = %current.display(),
            ignored = %path.display(),
            "config home override already set; ignoring subsequent value"
        );
    }
}

fn resolve_config_home(project_root: &Path) -> PathBuf {
    let config_home = CONFIG_HOME_OVERRIDE
        .get()
        .cloned()
        .or_else(|| env_path("PRJ_CONFIG_HOME"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_HOME_RELATIVE_PATH));
    absolutize(project_root, config_home)
}

fn absolutize(project_root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        project_root.join(path)
    }
}
