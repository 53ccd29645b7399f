//! Stable `event` field values for reporter logs.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReporterEvent {
    StoreConfigured,
    RunStarted,
    DeadAccountsListed,
    AliveAccountsListed,
    RunCompleted,
    RunFailed,
    SettingsFileLoaded,
    SettingsFileIgnored,
    ConfigHomeOverrideIgnored,
}

impl ReporterEvent {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StoreConfigured => "heartbeat.status.store.configured",
            Self::RunStarted => "heartbeat.status.run.started",
            Self::DeadAccountsListed => "heartbeat.status.dead_accounts.listed",
            Self::AliveAccountsListed => "heartbeat.status.alive_accounts.listed",
            Self::RunCompleted => "heartbeat.status.run.completed",
            Self::RunFailed => "heartbeat.status.run.failed",
            Self::SettingsFileLoaded => "heartbeat.status.settings.loaded",
            Self::SettingsFileIgnored => "heartbeat.status.settings.ignored",
            Self::ConfigHomeOverrideIgnored => "heartbeat.status.settings.override_ignored",
        }
    }
}
