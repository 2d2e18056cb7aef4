//! WebView health monitoring and crash recovery.
//!
//! A [`GuardianHandle`] fronts a single monitor task that owns all mutable
//! state. The host supplies a [`RenderSurface`] to probe and reload, and feeds
//! app foreground/background transitions through a [`LifecycleNotifier`].
//!
//! ```no_run
//! # async fn demo(surface: std::sync::Arc<dyn wg_core::RenderSurface>) -> wg_core::GuardianResult<()> {
//! use wg_core::{GuardianHandle, LifecycleNotifier, StartMonitoringOptions};
//!
//! let lifecycle = LifecycleNotifier::new();
//! let guardian = GuardianHandle::spawn(&wg_config::MonitoringConfig::default(), &lifecycle);
//! guardian.attach_surface(surface).await?;
//!
//! let state = guardian.start_monitoring(StartMonitoringOptions::default()).await?;
//! assert!(state.monitoring);
//!
//! let result = guardian.check_now(None).await?;
//! println!("healthy={} restarted={}", result.healthy, result.restarted);
//! # Ok(())
//! # }
//! ```

mod check_result;
mod error;
mod event;
mod guardian_state;
mod lifecycle;
mod monitor;
mod options;
mod surface;
mod timestamp;

pub use check_result::CheckResult;
pub use error::{GuardianError, GuardianResult, SurfaceError, SurfaceResult};
pub use event::{GuardianEvent, GuardianEventKind};
pub use guardian_state::GuardianState;
pub use lifecycle::{AppTransition, LifecycleNotifier};
pub use monitor::{GuardianHandle, ProbeOutcome, RestartAction};
pub use options::{MonitoringOptions, StartMonitoringOptions};
pub use surface::{EvalError, EvalErrorKind, RenderSurface, WK_ERROR_DOMAIN};
pub use timestamp::format_timestamp;

pub use wg_config::RestartStrategy;

#[cfg(test)]
mod tests;

/// Reason tags attached to state payloads and probe results.
pub mod reason {
    pub const START: &str = "start";
    pub const STOP: &str = "stop";
    pub const STATE: &str = "state";
    pub const FOREGROUND: &str = "foreground";
    pub const MANUAL: &str = "manual";
}

/// Message used when a terminal failure carries no description of its own.
pub const DEFAULT_CRASH_MESSAGE: &str = "WebView content process terminated";

const EVENT_CHANNEL_CAPACITY: usize = 64;
const COMMAND_CHANNEL_CAPACITY: usize = 32;
