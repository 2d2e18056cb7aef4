use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failures surfaced to direct callers of the monitor.
///
/// Terminal WebView crashes are not errors: they resolve as a
/// [`CheckResult`](crate::CheckResult) with `healthy == false`.
#[derive(Error, Debug)]
pub enum GuardianError {
    #[error("WebView unavailable {location}")]
    WebViewUnavailable { location: ErrorLocation },

    #[error("Ping failed: {message} {location}")]
    PingFailed {
        message: String,
        location: ErrorLocation,
    },

    #[error("WebView guardian is no longer running {location}")]
    MonitorClosed { location: ErrorLocation },
}

impl GuardianError {
    #[track_caller]
    pub fn webview_unavailable() -> Self {
        Self::WebViewUnavailable {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn ping_failed<S: Into<String>>(message: S) -> Self {
        Self::PingFailed {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn monitor_closed() -> Self {
        Self::MonitorClosed {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Rejection text handed across the plugin bridge (no source location).
    pub fn caller_message(&self) -> String {
        match self {
            Self::WebViewUnavailable { .. } => "WebView unavailable".into(),
            Self::PingFailed { message, .. } => format!("Ping failed: {message}"),
            Self::MonitorClosed { .. } => "WebView guardian is no longer running".into(),
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::WebViewUnavailable { .. } => {
                "No WebView is attached to the guardian. \
                   Make sure the window exists before checking its health."
            }
            Self::PingFailed { .. } => {
                "The probe script failed without a renderer crash. \
                   Check the configured pingScript."
            }
            Self::MonitorClosed { .. } => {
                "The guardian was shut down. Restart the application to resume monitoring."
            }
        }
    }
}

/// Failure to issue a command (reload, navigate) to the render surface.
#[derive(Error, Debug)]
#[error("{operation} failed: {message} {location}")]
pub struct SurfaceError {
    pub operation: &'static str,
    pub message: String,
    pub location: ErrorLocation,
}

impl SurfaceError {
    #[track_caller]
    pub fn new<S: Into<String>>(operation: &'static str, message: S) -> Self {
        Self {
            operation,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type GuardianResult<T> = std::result::Result<T, GuardianError>;
pub type SurfaceResult<T> = std::result::Result<T, SurfaceError>;
