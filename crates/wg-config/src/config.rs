use crate::{
    CONFIG_DIR_ENV, CONFIG_DIR_NAME, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    LoggingConfig, MonitoringConfig, RestartStrategy,
};

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GuardianConfig {
    pub monitoring: MonitoringConfig,
    pub logging: LoggingConfig,
}

impl GuardianConfig {
    /// Load config from the default directory.
    ///
    /// Loading order:
    /// 1. Check for WG_CONFIG_DIR env var, else use ./.webview-guardian/
    /// 2. Load guardian.toml if it exists, else use defaults
    /// 3. Apply WG_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;
        Self::load_from(&config_dir)
    }

    /// Load config from an explicit directory (e.g. a Tauri app config dir).
    ///
    /// A missing directory or file is not an error; defaults are used.
    pub fn load_from(config_dir: &Path) -> ConfigErrorResult<Self> {
        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            GuardianConfig::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: WG_CONFIG_DIR env var > ./.webview-guardian/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.monitoring.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        let m = &self.monitoring;

        info!("Guardian configuration loaded:");
        info!(
            "  monitoring: debounce={}ms, timeout={}ms, initial_check={}",
            m.foreground_debounce_ms, m.probe_timeout_ms, m.run_initial_check
        );
        info!(
            "  restart: auto={}, strategy={}",
            m.auto_restart, m.restart_strategy
        );
        info!(
            "  logging: {} (level: {}, dir: {})",
            if self.logging.enabled {
                "enabled"
            } else {
                "host-managed"
            },
            self.logging.level,
            self.logging.dir
        );

        if m.restart_strategy == RestartStrategy::CustomUrl && m.custom_restart_url().is_none() {
            warn!("  restart strategy is customUrl but no valid URL is set; plain reload will be used");
        }
    }

    fn apply_env_overrides(&mut self) {
        // Monitoring
        Self::apply_env_parse(
            "WG_FOREGROUND_DEBOUNCE_MS",
            &mut self.monitoring.foreground_debounce_ms,
        );
        Self::apply_env_string("WG_PING_SCRIPT", &mut self.monitoring.ping_script);
        Self::apply_env_bool("WG_AUTO_RESTART", &mut self.monitoring.auto_restart);
        Self::apply_env_parse(
            "WG_RESTART_STRATEGY",
            &mut self.monitoring.restart_strategy,
        );
        Self::apply_env_option_string(
            "WG_CUSTOM_RESTART_URL",
            &mut self.monitoring.custom_restart_url,
        );
        Self::apply_env_bool("WG_DEBUG", &mut self.monitoring.debug);
        Self::apply_env_bool(
            "WG_RUN_INITIAL_CHECK",
            &mut self.monitoring.run_initial_check,
        );
        Self::apply_env_parse("WG_PROBE_TIMEOUT_MS", &mut self.monitoring.probe_timeout_ms);

        // Logging
        Self::apply_env_bool("WG_LOG_ENABLED", &mut self.logging.enabled);
        Self::apply_env_parse("WG_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_string("WG_LOG_DIR", &mut self.logging.dir);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
