//! Health monitor / restart controller.
//!
//! One task owns every mutable field and the render-surface handle. Public
//! operations, delayed probes, probe completions and lifecycle transitions
//! all arrive as [`MonitorCommand`]s, so state is only touched from that task.
//! Background tasks hold weak senders and become no-ops once it exits.

/// Debug output gated by the `debug` monitoring option.
macro_rules! guardian_debug {
    ($actor:expr, $($arg:tt)+) => {
        if $actor.options.debug {
            tracing::debug!($($arg)+);
        }
    };
}

mod actor;
mod monitor_command;
mod probe;
mod restart;

pub use probe::ProbeOutcome;
pub use restart::RestartAction;

use crate::{
    COMMAND_CHANNEL_CAPACITY, CheckResult, EVENT_CHANNEL_CAPACITY, GuardianError, GuardianEvent,
    GuardianResult, GuardianState, LifecycleNotifier, MonitoringOptions, RenderSurface,
    StartMonitoringOptions,
};
use actor::MonitorActor;
pub(crate) use monitor_command::MonitorCommand;

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use wg_config::MonitoringConfig;

/// Cloneable front end of a running monitor.
///
/// The monitor stops when [`shutdown`](Self::shutdown) is called or the last
/// handle is dropped.
#[derive(Clone)]
pub struct GuardianHandle {
    command_tx: mpsc::Sender<MonitorCommand>,
    event_tx: broadcast::Sender<GuardianEvent>,
}

impl GuardianHandle {
    /// Spawn a monitor on the current tokio runtime.
    ///
    /// `config` seeds the options snapshot the first `start_monitoring`
    /// merges onto. The monitor registers with `lifecycle` immediately.
    pub fn spawn(config: &MonitoringConfig, lifecycle: &LifecycleNotifier) -> Self {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        lifecycle.register(command_tx.downgrade());
        let actor = MonitorActor::new(
            MonitoringOptions::from(config),
            config.run_initial_check,
            event_tx.clone(),
            command_tx.downgrade(),
        );
        tokio::spawn(actor.run(command_rx));

        Self {
            command_tx,
            event_tx,
        }
    }

    /// Merge `options` over the current snapshot and enable monitoring.
    ///
    /// Returns before the initial probe (if any) has run.
    pub async fn start_monitoring(
        &self,
        options: StartMonitoringOptions,
    ) -> GuardianResult<GuardianState> {
        self.request(|reply| MonitorCommand::Start { options, reply })
            .await
    }

    /// Disable automatic probes. A probe that is already scheduled still runs.
    pub async fn stop_monitoring(&self) -> GuardianResult<GuardianState> {
        self.request(|reply| MonitorCommand::Stop { reply }).await
    }

    pub async fn get_state(&self) -> GuardianResult<GuardianState> {
        self.request(|reply| MonitorCommand::GetState { reply })
            .await
    }

    /// Probe the WebView now, whether or not monitoring is enabled.
    ///
    /// Resolves with the probe outcome; terminal crashes resolve (not reject)
    /// with `healthy == false`.
    pub async fn check_now(&self, reason: Option<String>) -> GuardianResult<CheckResult> {
        let reason = reason.unwrap_or_else(|| crate::reason::MANUAL.to_string());
        self.request(|reply| MonitorCommand::CheckNow { reason, reply })
            .await?
    }

    /// Current options snapshot.
    pub async fn options(&self) -> GuardianResult<MonitoringOptions> {
        self.request(|reply| MonitorCommand::Options { reply })
            .await
    }

    pub async fn attach_surface(&self, surface: Arc<dyn RenderSurface>) -> GuardianResult<()> {
        self.request(|reply| MonitorCommand::AttachSurface { surface, reply })
            .await
    }

    pub async fn detach_surface(&self) -> GuardianResult<()> {
        self.request(|reply| MonitorCommand::DetachSurface { reply })
            .await
    }

    /// Receiver for `foreground`, `webviewHealthy`, `webviewCrashed` and `webviewRestarted`.
    pub fn subscribe(&self) -> broadcast::Receiver<GuardianEvent> {
        self.event_tx.subscribe()
    }

    /// Stop the monitor task. Pending timers and probes become no-ops.
    pub async fn shutdown(&self) {
        let _ = self
            .request(|reply| MonitorCommand::Shutdown { reply })
            .await;
    }

    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> MonitorCommand,
    ) -> GuardianResult<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| GuardianError::monitor_closed())?;

        reply_rx.await.map_err(|_| GuardianError::monitor_closed())
    }
}
