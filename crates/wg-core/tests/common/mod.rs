#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;
use url::Url;
use wg_config::MonitoringConfig;
use wg_core::{
    EvalError, EvalErrorKind, GuardianEvent, GuardianHandle, LifecycleNotifier, RenderSurface,
    SurfaceResult,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Evaluate(String),
    Reload,
    ReloadFromOrigin,
    LoadUrl(String),
}

/// Render surface with scripted evaluation results.
///
/// Evaluations pop the next queued result and succeed once the queue is empty.
#[derive(Default)]
pub struct FakeSurface {
    results: Mutex<VecDeque<Result<(), EvalError>>>,
    calls: Mutex<Vec<SurfaceCall>>,
    supports_origin: bool,
    terminal_timeouts: bool,
    hang: AtomicBool,
}

impl FakeSurface {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_origin_reload() -> Arc<Self> {
        Arc::new(Self {
            supports_origin: true,
            ..Self::default()
        })
    }

    /// Surface that reports an unanswered script as an invalidated webview
    pub fn with_terminal_timeouts() -> Arc<Self> {
        Arc::new(Self {
            terminal_timeouts: true,
            ..Self::default()
        })
    }

    pub fn push_result(&self, result: Result<(), EvalError>) {
        self.results.lock().unwrap().push_back(result);
    }

    /// Make every following evaluation wait forever
    pub fn hang(&self) {
        self.hang.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn evaluations(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Evaluate(_)))
            .count()
    }

    /// Calls other than script evaluation
    pub fn restart_calls(&self) -> Vec<SurfaceCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, SurfaceCall::Evaluate(_)))
            .collect()
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RenderSurface for FakeSurface {
    async fn evaluate_script(&self, script: &str) -> Result<(), EvalError> {
        self.record(SurfaceCall::Evaluate(script.to_string()));
        if self.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        self.results.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    fn reload(&self) -> SurfaceResult<()> {
        self.record(SurfaceCall::Reload);
        Ok(())
    }

    fn supports_reload_from_origin(&self) -> bool {
        self.supports_origin
    }

    fn reload_from_origin(&self) -> SurfaceResult<()> {
        self.record(SurfaceCall::ReloadFromOrigin);
        Ok(())
    }

    fn load_url(&self, url: &Url) -> SurfaceResult<()> {
        self.record(SurfaceCall::LoadUrl(url.to_string()));
        Ok(())
    }

    fn timeout_error(&self, after_ms: u64) -> EvalError {
        if self.terminal_timeouts {
            return EvalError::new(
                EvalErrorKind::WebViewInvalidated,
                Some(format!("no answer within {after_ms}ms")),
            );
        }
        EvalError::timed_out(after_ms)
    }
}

pub struct Harness {
    pub guardian: GuardianHandle,
    pub lifecycle: LifecycleNotifier,
    pub surface: Arc<FakeSurface>,
    pub events: broadcast::Receiver<GuardianEvent>,
}

pub async fn harness(config: MonitoringConfig, surface: Arc<FakeSurface>) -> Harness {
    let lifecycle = LifecycleNotifier::new();
    let guardian = GuardianHandle::spawn(&config, &lifecycle);
    let events = guardian.subscribe();
    guardian.attach_surface(surface.clone()).await.unwrap();
    Harness {
        guardian,
        lifecycle,
        surface,
        events,
    }
}

pub async fn default_harness() -> Harness {
    harness(MonitoringConfig::default(), FakeSurface::new()).await
}

/// Let queued lifecycle messages and spawned probes run (paused clock).
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

/// Every event received so far, by listener name
pub fn drain_event_names(events: &mut broadcast::Receiver<GuardianEvent>) -> Vec<&'static str> {
    let mut names = Vec::new();
    while let Ok(event) = events.try_recv() {
        names.push(event.name());
    }
    names
}

pub fn drain_events(events: &mut broadcast::Receiver<GuardianEvent>) -> Vec<GuardianEvent> {
    let mut drained = Vec::new();
    while let Ok(event) = events.try_recv() {
        drained.push(event);
    }
    drained
}
