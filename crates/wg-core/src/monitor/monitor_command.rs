use crate::{
    AppTransition, CheckResult, EvalError, GuardianResult, GuardianState, MonitoringOptions,
    RenderSurface, StartMonitoringOptions,
};

use std::sync::Arc;

use tokio::sync::oneshot;

pub(crate) type CheckReply = oneshot::Sender<GuardianResult<CheckResult>>;

/// Everything the monitor task reacts to.
pub(crate) enum MonitorCommand {
    Start {
        options: StartMonitoringOptions,
        reply: oneshot::Sender<GuardianState>,
    },
    Stop {
        reply: oneshot::Sender<GuardianState>,
    },
    GetState {
        reply: oneshot::Sender<GuardianState>,
    },
    Options {
        reply: oneshot::Sender<MonitoringOptions>,
    },
    CheckNow {
        reason: String,
        reply: CheckReply,
    },
    /// Debounced probe fired by a timer; nobody waits on it
    ScheduledProbe { reason: String },
    /// Script evaluation finished on a probe task
    ProbeFinished {
        reason: String,
        outcome: Result<(), EvalError>,
        reply: Option<CheckReply>,
    },
    Lifecycle(AppTransition),
    AttachSurface {
        surface: Arc<dyn RenderSurface>,
        reply: oneshot::Sender<()>,
    },
    DetachSurface {
        reply: oneshot::Sender<()>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}
