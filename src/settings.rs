use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, time::Duration};

use crate::{display::theme::NEON_GREEN, log_info, log_warn};

const ENABLE_LOGS: bool = true;

pub const SETTINGS_PATH_VAR: &str = "NEONCLOCK_SETTINGS";
pub const DEBUG_VAR: &str = "NEONCLOCK_DEBUG";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum OutputMode {
    #[default]
    Terminal,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetSettings {
    pub use_24_hour: bool,
    pub clock_interval_ms: u64,
    pub stopwatch_interval_ms: u64,
    pub accent: String,
    pub output: OutputMode,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            use_24_hour: true,
            clock_interval_ms: 1000,
            stopwatch_interval_ms: 50,
            accent: NEON_GREEN.into(),
            output: OutputMode::Terminal,
        }
    }
}

impl WidgetSettings {
    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms)
    }

    pub fn stopwatch_interval(&self) -> Duration {
        Duration::from_millis(self.stopwatch_interval_ms)
    }

    fn validate(self) -> Result<Self> {
        if self.clock_interval_ms == 0 {
            bail!("clockIntervalMs must be greater than zero");
        }
        if self.stopwatch_interval_ms == 0 {
            bail!("stopwatchIntervalMs must be greater than zero");
        }
        Ok(self)
    }
}

/// Read-only settings loader. Nothing is ever written back.
pub struct SettingsStore {
    path: Option<PathBuf>,
    data: WidgetSettings,
}

impl SettingsStore {
    pub fn from_env() -> Result<Self> {
        Self::new(env::var_os(SETTINGS_PATH_VAR).map(PathBuf::from))
    }

    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let data = match &path {
            Some(path) if path.exists() => {
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read settings from {}", path.display()))?;
                match serde_json::from_str(&contents) {
                    Ok(data) => {
                        log_info!("Loaded settings from {}", path.display());
                        data
                    }
                    Err(err) => {
                        log_warn!(
                            "Ignoring unreadable settings in {}: {}",
                            path.display(),
                            err
                        );
                        WidgetSettings::default()
                    }
                }
            }
            Some(path) => {
                log_warn!("Settings file {} not found; using defaults", path.display());
                WidgetSettings::default()
            }
            None => WidgetSettings::default(),
        };

        let data = data.validate().with_context(|| match &path {
            Some(path) => format!("Invalid settings in {}", path.display()),
            None => "Invalid default settings".to_string(),
        })?;

        Ok(Self { path, data })
    }

    pub fn settings(&self) -> &WidgetSettings {
        &self.data
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}

/// `1` or `true` (any case) in `NEONCLOCK_DEBUG` turns on debug logging.
pub fn debug_mode() -> bool {
    env::var(DEBUG_VAR)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
