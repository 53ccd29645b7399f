//! Config namespace: YAML runtime settings and per-run resolution.

mod run;
mod settings;

pub use run::StatusRunRequest;
pub use settings::{
    RuntimeSettings, StatusSettings, load_runtime_settings, load_runtime_settings_from_paths,
    runtime_settings_paths, set_config_home_override,
};
