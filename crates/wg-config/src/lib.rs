//! Configuration model for the WebView guardian.
//!
//! The values loaded here seed the monitor's first options snapshot; every
//! `startMonitoring` call then merges its own fields on top of it.

mod config;
mod error;
mod log_level;
mod logging_config;
mod monitoring_config;
mod restart_strategy;

pub use config::GuardianConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use monitoring_config::MonitoringConfig;
pub use restart_strategy::RestartStrategy;

#[cfg(test)]
mod tests;

pub const CONFIG_DIR_ENV: &str = "WG_CONFIG_DIR";
pub const CONFIG_DIR_NAME: &str = ".webview-guardian";
pub const CONFIG_FILENAME: &str = "guardian.toml";

pub const DEFAULT_FOREGROUND_DEBOUNCE_MS: u64 = 600;
pub const MAX_FOREGROUND_DEBOUNCE_MS: u64 = 60_000;
pub const DEFAULT_PING_SCRIPT: &str = "document.readyState";
pub const DEFAULT_AUTO_RESTART: bool = true;
pub const DEFAULT_DEBUG: bool = false;
pub const DEFAULT_RUN_INITIAL_CHECK: bool = true;
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;
pub const MAX_PROBE_TIMEOUT_MS: u64 = 120_000;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "logs";
const DEFAULT_LOG_ENABLED: bool = false;
