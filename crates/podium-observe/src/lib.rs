//! Logging setup shared by the podium binaries.
mod clock;
mod config;
mod error;
mod format;
mod install;
mod level;

pub use clock::{LogTimer, LoggerTimeZone, init_local_offset, local_offset};
pub use config::LoggerConfig;
pub use error::{LoggerError, LoggerResult};
pub use format::LoggerFormat;
pub use level::LoggerLevel;

/// Install the global tracing subscriber described by `cfg`.
///
/// With `LoggerTimeZone::Local`, call [`init_local_offset`] first, before any
/// thread (or the tokio runtime) is started.
///
/// ```rust
/// use podium_observe::{LoggerConfig, init_logger};
///
/// init_logger(&LoggerConfig::default()).expect("logger");
/// tracing::info!("ready");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    match cfg.format {
        LoggerFormat::Text => install::text(cfg),
        LoggerFormat::Json => install::json(cfg),
        LoggerFormat::Journald => install::journald(cfg),
    }
}
