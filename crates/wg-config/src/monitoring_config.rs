use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_AUTO_RESTART, DEFAULT_DEBUG,
    DEFAULT_FOREGROUND_DEBOUNCE_MS, DEFAULT_PING_SCRIPT, DEFAULT_PROBE_TIMEOUT_MS,
    DEFAULT_RUN_INITIAL_CHECK, MAX_FOREGROUND_DEBOUNCE_MS, MAX_PROBE_TIMEOUT_MS, RestartStrategy,
};

use serde::Deserialize;
use url::Url;

/// Factory defaults for the monitor, before any `startMonitoring` call.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Delay before probing after the app returns to the foreground
    pub foreground_debounce_ms: u64,
    /// Script evaluated as the liveness probe
    pub ping_script: String,
    /// Reload automatically after a terminal failure
    pub auto_restart: bool,
    pub restart_strategy: RestartStrategy,
    /// Target for `RestartStrategy::CustomUrl`
    pub custom_restart_url: Option<String>,
    /// Verbose monitor logging
    pub debug: bool,
    /// Probe immediately when monitoring starts
    pub run_initial_check: bool,
    /// Upper bound on one script evaluation; 0 waits forever
    pub probe_timeout_ms: u64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            foreground_debounce_ms: DEFAULT_FOREGROUND_DEBOUNCE_MS,
            ping_script: String::from(DEFAULT_PING_SCRIPT),
            auto_restart: DEFAULT_AUTO_RESTART,
            restart_strategy: RestartStrategy::default(),
            custom_restart_url: None,
            debug: DEFAULT_DEBUG,
            run_initial_check: DEFAULT_RUN_INITIAL_CHECK,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
        }
    }
}

impl MonitoringConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.foreground_debounce_ms > MAX_FOREGROUND_DEBOUNCE_MS {
            return Err(ConfigError::monitoring(format!(
                "monitoring.foreground_debounce_ms must be 0-{}, got {}",
                MAX_FOREGROUND_DEBOUNCE_MS, self.foreground_debounce_ms
            )));
        }

        if self.probe_timeout_ms > MAX_PROBE_TIMEOUT_MS {
            return Err(ConfigError::monitoring(format!(
                "monitoring.probe_timeout_ms must be 0-{}, got {}",
                MAX_PROBE_TIMEOUT_MS, self.probe_timeout_ms
            )));
        }

        if self.ping_script.trim().is_empty() {
            return Err(ConfigError::monitoring(
                "monitoring.ping_script cannot be empty",
            ));
        }

        if let Some(raw) = &self.custom_restart_url
            && let Err(e) = Url::parse(raw)
        {
            return Err(ConfigError::monitoring(format!(
                "monitoring.custom_restart_url '{raw}' is not a valid URL: {e}"
            )));
        }

        Ok(())
    }

    /// Parsed restart target, if one is configured and valid.
    pub fn custom_restart_url(&self) -> Option<Url> {
        self.custom_restart_url
            .as_deref()
            .and_then(|raw| Url::parse(raw).ok())
    }
}
