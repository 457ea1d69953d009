use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use log::LevelFilter;
use serde::Deserialize;
use timeline_core::SchedulerSettings;
use timeline_engine::ClientSettings;

use super::logging::LogDestination;

/// Application settings, read from a RON file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub poll_interval_secs: u64,
    pub force_reload_delay_secs: u64,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub log_level: String,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            poll_interval_secs: 30,
            force_reload_delay_secs: 10,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            log_level: "info".to_string(),
            log_destination: LogDestination::File,
            log_file: PathBuf::from("mediatimeline.log"),
        }
    }
}

impl AppConfig {
    pub fn scheduler_settings(&self) -> SchedulerSettings {
        SchedulerSettings {
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            force_reload_delay: Duration::from_secs(self.force_reload_delay_secs),
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ClientSettings::default()
        }
    }

    pub fn level_filter(&self) -> anyhow::Result<LevelFilter> {
        self.log_level
            .parse()
            .with_context(|| format!("unknown log level {:?}", self.log_level))
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.poll_interval_secs == 0 {
            bail!("poll_interval_secs must be greater than zero");
        }
        self.level_filter()?;
        Ok(())
    }
}

/// Loads the config at `path`; a missing file yields the defaults.
pub fn load(path: &Path) -> anyhow::Result<AppConfig> {
    let config = match fs::read_to_string(path) {
        Ok(text) => ron::from_str::<AppConfig>(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()))
        }
    };
    config.validate()?;
    Ok(config)
}
