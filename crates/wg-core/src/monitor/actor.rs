use super::monitor_command::{CheckReply, MonitorCommand};
use super::probe::{self, ProbeOutcome};
use super::restart::RestartAction;
use crate::{
    AppTransition, CheckResult, GuardianError, GuardianEvent, GuardianEventKind, GuardianResult,
    GuardianState, MonitoringOptions, RenderSurface, StartMonitoringOptions, reason,
};

use std::ops::ControlFlow;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, mpsc};
use tracing::{info, trace, warn};

/// Sole owner of monitor state. Runs until shutdown or the last handle drops.
pub(super) struct MonitorActor {
    options: MonitoringOptions,
    run_initial_check_default: bool,
    monitoring_enabled: bool,
    last_healthy_at: Option<DateTime<Utc>>,
    last_restart_at: Option<DateTime<Utc>>,
    last_crash_at: Option<DateTime<Utc>>,
    pending_restart_reason: Option<String>,
    surface: Option<Arc<dyn RenderSurface>>,
    event_tx: broadcast::Sender<GuardianEvent>,
    command_tx: mpsc::WeakSender<MonitorCommand>,
}

impl MonitorActor {
    pub(super) fn new(
        options: MonitoringOptions,
        run_initial_check_default: bool,
        event_tx: broadcast::Sender<GuardianEvent>,
        command_tx: mpsc::WeakSender<MonitorCommand>,
    ) -> Self {
        Self {
            options,
            run_initial_check_default,
            monitoring_enabled: false,
            last_healthy_at: None,
            last_restart_at: None,
            last_crash_at: None,
            pending_restart_reason: None,
            surface: None,
            event_tx,
            command_tx,
        }
    }

    pub(super) async fn run(
        mut self,
        mut command_rx: mpsc::Receiver<MonitorCommand>,
    ) {
        trace!("WebView guardian task started");

        while let Some(command) = command_rx.recv().await {
            if self.handle(command).is_break() {
                break;
            }
        }

        self.surface = None;
        info!("WebView guardian shut down");
    }

    fn handle(&mut self, command: MonitorCommand) -> ControlFlow<()> {
        match command {
            MonitorCommand::Start { options, reply } => {
                let state = self.start(options);
                let _ = reply.send(state);
            }
            MonitorCommand::Stop { reply } => {
                self.monitoring_enabled = false;
                info!("WebView monitoring stopped");
                let _ = reply.send(self.state(reason::STOP, None));
            }
            MonitorCommand::GetState { reply } => {
                let _ = reply.send(self.state(reason::STATE, None));
            }
            MonitorCommand::Options { reply } => {
                let _ = reply.send(self.options.clone());
            }
            MonitorCommand::CheckNow { reason, reply } => self.begin_probe(reason, Some(reply)),
            MonitorCommand::ScheduledProbe { reason } => self.begin_probe(reason, None),
            MonitorCommand::ProbeFinished {
                reason,
                outcome,
                reply,
            } => self.finish_probe(reason, ProbeOutcome::classify(outcome), reply),
            MonitorCommand::Lifecycle(AppTransition::Foreground) => self.on_foreground(),
            MonitorCommand::Lifecycle(AppTransition::Background) => self.on_background(),
            MonitorCommand::AttachSurface { surface, reply } => {
                self.surface = Some(surface);
                guardian_debug!(self, "render surface attached");
                let _ = reply.send(());
            }
            MonitorCommand::DetachSurface { reply } => {
                self.surface = None;
                guardian_debug!(self, "render surface detached");
                let _ = reply.send(());
            }
            MonitorCommand::Shutdown { reply } => {
                let _ = reply.send(());
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn start(&mut self, requested: StartMonitoringOptions) -> GuardianState {
        self.options = requested.merge_onto(&self.options);
        self.monitoring_enabled = true;

        info!(
            debounce_ms = self.options.foreground_debounce_ms,
            auto_restart = self.options.auto_restart,
            strategy = %self.options.restart_strategy,
            "WebView monitoring started"
        );

        if requested
            .run_initial_check
            .unwrap_or(self.run_initial_check_default)
        {
            self.schedule_probe(reason::START);
        }

        self.state(reason::START, None)
    }

    fn on_foreground(&mut self) {
        if !self.monitoring_enabled {
            return;
        }
        self.emit(
            GuardianEventKind::Foreground,
            self.state(reason::FOREGROUND, None),
        );
        self.schedule_probe(reason::FOREGROUND);
    }

    fn on_background(&mut self) {
        self.pending_restart_reason = None;
        guardian_debug!(self, "app entered background");
    }

    /// Post a probe after the foreground debounce. Every call schedules its
    /// own timer; earlier ones are not cancelled.
    fn schedule_probe(&self, reason: &str) {
        let delay = self.options.foreground_debounce();
        let command_tx = self.command_tx.clone();
        let reason = reason.to_string();

        guardian_debug!(self, %reason, delay_ms = delay.as_millis() as u64, "health check scheduled");

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(tx) = command_tx.upgrade() else {
                return;
            };
            let _ = tx.send(MonitorCommand::ScheduledProbe { reason }).await;
        });
    }

    fn begin_probe(&mut self, reason: String, reply: Option<CheckReply>) {
        let Some(surface) = self.surface.clone() else {
            guardian_debug!(self, %reason, "no WebView attached, skipping health check");
            respond(reply, Err(GuardianError::webview_unavailable()));
            return;
        };

        let script = self.options.ping_script.clone();
        let timeout = self.options.probe_timeout();
        let command_tx = self.command_tx.clone();

        guardian_debug!(self, %reason, "running health check");

        tokio::spawn(async move {
            let outcome = probe::evaluate(surface, script, timeout).await;
            let Some(tx) = command_tx.upgrade() else {
                return;
            };
            let _ = tx
                .send(MonitorCommand::ProbeFinished {
                    reason,
                    outcome,
                    reply,
                })
                .await;
        });
    }

    fn finish_probe(&mut self, reason: String, outcome: ProbeOutcome, reply: Option<CheckReply>) {
        match outcome {
            ProbeOutcome::Healthy => {
                self.last_healthy_at = Some(Utc::now());
                guardian_debug!(self, %reason, "WebView healthy");
                self.emit(
                    GuardianEventKind::WebviewHealthy,
                    self.state(&reason, None),
                );
                respond(reply, Ok(CheckResult::healthy(&reason)));
            }
            ProbeOutcome::Failed(message) => {
                guardian_debug!(self, %reason, error = %message, "health check failed without a crash");
                respond(reply, Err(GuardianError::ping_failed(message)));
            }
            ProbeOutcome::Crashed(message) => self.on_crash(reason, message, reply),
        }
    }

    fn on_crash(&mut self, reason: String, message: String, reply: Option<CheckReply>) {
        self.last_crash_at = Some(Utc::now());
        warn!(%reason, error = %message, "WebView render process terminated");
        self.emit(
            GuardianEventKind::WebviewCrashed,
            self.state(&reason, Some(message.clone())),
        );

        if !self.options.auto_restart {
            self.pending_restart_reason = Some(reason.clone());
            respond(reply, Ok(CheckResult::pending_restart(&reason, message)));
            return;
        }

        self.restart(reason, message, reply);
    }

    fn restart(&mut self, reason: String, message: String, reply: Option<CheckReply>) {
        let Some(surface) = self.surface.clone() else {
            warn!(%reason, "WebView detached before it could be restarted");
            respond(reply, Err(GuardianError::webview_unavailable()));
            return;
        };

        let action = RestartAction::select(
            self.options.restart_strategy,
            self.options.custom_restart_url.as_ref(),
            surface.supports_reload_from_origin(),
        );
        if let Err(e) = action.issue(surface.as_ref()) {
            warn!(%action, "restart command failed: {e}");
        }
        info!(%reason, %action, "WebView restarted");

        self.pending_restart_reason = None;
        self.last_restart_at = Some(Utc::now());
        self.emit(
            GuardianEventKind::WebviewRestarted,
            self.state(&reason, Some(message.clone())),
        );
        respond(reply, Ok(CheckResult::restarted(&reason, message)));
    }

    fn state(&self, reason: &str, error: Option<String>) -> GuardianState {
        GuardianState {
            monitoring: self.monitoring_enabled,
            reason: reason.to_string(),
            timestamp: Utc::now(),
            last_healthy_at: self.last_healthy_at,
            last_restart_at: self.last_restart_at,
            last_crash_at: self.last_crash_at,
            pending_restart_reason: self.pending_restart_reason.clone(),
            error,
        }
    }

    fn emit(&self, kind: GuardianEventKind, state: GuardianState) {
        // No subscribers is fine
        let _ = self.event_tx.send(GuardianEvent::new(kind, state));
    }
}

fn respond(reply: Option<CheckReply>, result: GuardianResult<CheckResult>) {
    if let Some(reply) = reply {
        let _ = reply.send(result);
    }
}
