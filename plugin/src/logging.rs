//! Optional logging setup with file rotation.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};
use wg_config::LoggingConfig;

pub(crate) const LOG_FILE_PREFIX: &str = "webview-guardian";
const MAX_LOG_FILES: usize = 7;

/// Install console and rotating file output for the guardian.
///
/// # Log Layers
/// - Console: human-readable, colored output
/// - File: plain text, daily rotation, 7-day retention
///
/// `RUST_LOG` wins over the configured level. Fails if the host already
/// installed a global subscriber.
pub fn setup_logging(log_dir: &Path, config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(log_dir)?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(true);

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(log_dir)?;

    let file_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_writer(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config)));

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

pub(crate) fn default_directives(config: &LoggingConfig) -> String {
    let level = config.level.as_directive();
    format!("warn,wg_core={level},wg_config={level},tauri_plugin_webview_guardian={level}")
}
