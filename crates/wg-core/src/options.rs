//! Monitoring options and the merge applied by `startMonitoring`.

use crate::RestartStrategy;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;
use wg_config::MonitoringConfig;

/// Active configuration snapshot of the monitor.
///
/// Replaced wholesale on every start call; never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoringOptions {
    pub foreground_debounce_ms: u64,
    pub ping_script: String,
    pub auto_restart: bool,
    pub restart_strategy: RestartStrategy,
    pub custom_restart_url: Option<Url>,
    pub debug: bool,
    /// 0 disables the probe timeout
    pub probe_timeout_ms: u64,
}

impl MonitoringOptions {
    pub fn foreground_debounce(&self) -> Duration {
        Duration::from_millis(self.foreground_debounce_ms)
    }

    pub fn probe_timeout(&self) -> Option<Duration> {
        (self.probe_timeout_ms > 0).then(|| Duration::from_millis(self.probe_timeout_ms))
    }
}

impl From<&MonitoringConfig> for MonitoringOptions {
    fn from(config: &MonitoringConfig) -> Self {
        Self {
            foreground_debounce_ms: config.foreground_debounce_ms,
            ping_script: config.ping_script.clone(),
            auto_restart: config.auto_restart,
            restart_strategy: config.restart_strategy,
            custom_restart_url: config.custom_restart_url(),
            debug: config.debug,
            probe_timeout_ms: config.probe_timeout_ms,
        }
    }
}

impl Default for MonitoringOptions {
    fn default() -> Self {
        Self::from(&MonitoringConfig::default())
    }
}

/// Options accepted by `startMonitoring`; absent fields keep their previous value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartMonitoringOptions {
    /// Negative values are treated as 0
    pub foreground_debounce_ms: Option<i64>,
    pub ping_script: Option<String>,
    pub auto_restart: Option<bool>,
    /// Parsed leniently; unknown names keep the previous strategy
    pub restart_strategy: Option<String>,
    /// Unparseable URLs keep the previous URL
    pub custom_restart_url: Option<String>,
    pub debug: Option<bool>,
    /// Consumed by the start call only, never stored
    pub run_initial_check: Option<bool>,
    pub probe_timeout_ms: Option<u64>,
}

impl StartMonitoringOptions {
    /// Overlay the fields present in this call onto `previous`.
    pub fn merge_onto(&self, previous: &MonitoringOptions) -> MonitoringOptions {
        let restart_strategy = match self.restart_strategy.as_deref() {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("ignoring restartStrategy: {e}");
                previous.restart_strategy
            }),
            None => previous.restart_strategy,
        };

        let custom_restart_url = match self.custom_restart_url.as_deref() {
            Some(raw) => match Url::parse(raw) {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!("ignoring customRestartUrl '{raw}': {e}");
                    previous.custom_restart_url.clone()
                }
            },
            None => previous.custom_restart_url.clone(),
        };

        MonitoringOptions {
            foreground_debounce_ms: self
                .foreground_debounce_ms
                .map(|ms| ms.max(0) as u64)
                .unwrap_or(previous.foreground_debounce_ms),
            ping_script: self
                .ping_script
                .clone()
                .unwrap_or_else(|| previous.ping_script.clone()),
            auto_restart: self.auto_restart.unwrap_or(previous.auto_restart),
            restart_strategy,
            custom_restart_url,
            debug: self.debug.unwrap_or(previous.debug),
            probe_timeout_ms: self.probe_timeout_ms.unwrap_or(previous.probe_timeout_ms),
        }
    }
}
