//! Layered dashboard settings.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::Deserialize;

const DEFAULT_CONFIG: &str = include_str!("../ecoevent.toml");

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Settings {
    pub event: String,
    pub attendee: String,
    pub tick_rate_ms: u64,
    pub alert_timeout_secs: u64,
    pub log_level: String,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Bundled defaults, then the user config directory, then `./ecoevent.toml`,
    /// then `explicit`, then `ECOEVENT_*` environment variables.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = defaults();

        if let Some(dir) = dirs::config_dir() {
            let user_config = dir.join("ecoevent").join("ecoevent.toml");
            builder = builder.add_source(File::from(user_config).required(false));
        }
        builder = builder.add_source(File::with_name("ecoevent").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(Environment::with_prefix("ECOEVENT"))
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    #[cfg(test)]
    fn from_toml(overrides: &str) -> Result<Self> {
        defaults()
            .add_source(File::from_str(overrides, FileFormat::Toml))
            .build()?
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    pub(crate) fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub(crate) fn alert_timeout(&self) -> Duration {
        Duration::from_secs(self.alert_timeout_secs)
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(env::temp_dir)
                .join("ecoevent")
                .join("ecoevent.log")
        })
    }
}

fn defaults() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.event, "expo");
        assert_eq!(settings.attendee, "1");
        assert_eq!(settings.alert_timeout(), Duration::from_secs(5));
        assert_eq!(settings.tick_rate(), Duration::from_millis(100));
        assert!(settings.log_file.is_none());
        assert!(settings.log_path().ends_with("ecoevent/ecoevent.log"));
    }

    #[test]
    fn overrides_replace_defaults() {
        let settings = Settings::from_toml(
            "attendee = \"2\"\nalert_timeout_secs = 2\nlog_file = \"/tmp/eco.log\"\n",
        )
        .unwrap();
        assert_eq!(settings.attendee, "2");
        assert_eq!(settings.alert_timeout(), Duration::from_secs(2));
        assert_eq!(settings.log_path(), PathBuf::from("/tmp/eco.log"));
        assert_eq!(settings.log_level, "info");
    }
}
