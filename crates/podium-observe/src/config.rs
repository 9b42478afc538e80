use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::{
    clock::LoggerTimeZone,
    error::{LoggerError, LoggerResult},
    format::LoggerFormat,
    level::LoggerLevel,
};

/// Logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output format.
    pub format: LoggerFormat,
    /// Filter expression (e.g. `"info"`, `"podium_core=debug,info"`).
    pub level: LoggerLevel,
    /// Timezone used for timestamps.
    pub tz: LoggerTimeZone,
    /// Include module targets in each line.
    pub with_targets: bool,
    /// Colorize text output when stdout is a terminal.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Build a config from `PODIUM_LOG_*` environment variables.
    ///
    /// | variable             | field          |
    /// |----------------------|----------------|
    /// | `PODIUM_LOG_FORMAT`  | `format`       |
    /// | `PODIUM_LOG_LEVEL`   | `level`        |
    /// | `PODIUM_LOG_TZ`      | `tz`           |
    /// | `PODIUM_LOG_TARGETS` | `with_targets` |
    /// | `PODIUM_LOG_COLOR`   | `use_color`    |
    ///
    /// Unset variables keep their defaults; malformed ones are an error.
    pub fn from_env() -> LoggerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LoggerConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> LoggerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup("PODIUM_LOG_FORMAT") {
            cfg.format = v.parse()?;
        }
        if let Some(v) = lookup("PODIUM_LOG_LEVEL") {
            cfg.level = v.parse()?;
        }
        if let Some(v) = lookup("PODIUM_LOG_TZ") {
            cfg.tz = v.parse()?;
        }
        if let Some(v) = lookup("PODIUM_LOG_TARGETS") {
            cfg.with_targets = parse_bool("PODIUM_LOG_TARGETS", &v)?;
        }
        if let Some(v) = lookup("PODIUM_LOG_COLOR") {
            cfg.use_color = parse_bool("PODIUM_LOG_COLOR", &v)?;
        }
        Ok(cfg)
    }

    /// Color is used only when enabled in config and stdout is a terminal.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }
}

fn parse_bool(key: &'static str, value: &str) -> LoggerResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(LoggerError::InvalidEnv {
            key,
            value: value.to_string(),
        }),
    }
}
