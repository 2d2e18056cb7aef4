//! Render-surface abstraction the monitor probes and restarts.

use crate::SurfaceResult;

use std::fmt;

use async_trait::async_trait;
use url::Url;

/// Error domain WebKit uses for WebView-level failures.
pub const WK_ERROR_DOMAIN: &str = "WKErrorDomain";
const WK_WEB_CONTENT_PROCESS_TERMINATED: i64 = 2;
const WK_WEB_VIEW_INVALIDATED: i64 = 3;

/// The embedded web view being guarded.
///
/// Reload and navigation are fire-and-forget: implementations return once the
/// command is issued, not when the page has loaded.
#[async_trait]
pub trait RenderSurface: Send + Sync {
    /// Evaluate `script` and report whether it ran.
    async fn evaluate_script(&self, script: &str) -> Result<(), EvalError>;

    fn reload(&self) -> SurfaceResult<()>;

    /// Whether [`reload_from_origin`](Self::reload_from_origin) bypasses caches on this platform.
    fn supports_reload_from_origin(&self) -> bool {
        false
    }

    fn reload_from_origin(&self) -> SurfaceResult<()> {
        self.reload()
    }

    fn load_url(&self, url: &Url) -> SurfaceResult<()>;

    /// Error for an evaluation still running when the probe timeout expires.
    ///
    /// Non-terminal by default. Surfaces whose script channel only goes
    /// silent when the renderer is gone report invalidation instead.
    fn timeout_error(&self, after_ms: u64) -> EvalError {
        EvalError::timed_out(after_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// The web content process was killed by the OS
    ContentProcessTerminated,
    /// The WebView was torn down underneath the monitor
    WebViewInvalidated,
    /// The probe did not complete within the configured timeout
    Timeout,
    /// Any other evaluation failure (script error, unsupported result, ...)
    Script,
}

/// Outcome of a failed script evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub message: Option<String>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind, message: Option<String>) -> Self {
        Self { kind, message }
    }

    pub fn process_terminated() -> Self {
        Self::new(EvalErrorKind::ContentProcessTerminated, None)
    }

    pub fn invalidated() -> Self {
        Self::new(EvalErrorKind::WebViewInvalidated, None)
    }

    pub fn script<S: Into<String>>(message: S) -> Self {
        Self::new(EvalErrorKind::Script, Some(message.into()))
    }

    pub fn timed_out(after_ms: u64) -> Self {
        Self::new(
            EvalErrorKind::Timeout,
            Some(format!("probe timed out after {after_ms}ms")),
        )
    }

    /// Classify a native `(domain, code)` error pair.
    ///
    /// Only `WKErrorDomain` codes 2 (web content process terminated) and
    /// 3 (web view invalidated) are terminal.
    pub fn from_platform(domain: &str, code: i64, message: Option<String>) -> Self {
        let kind = match (domain, code) {
            (WK_ERROR_DOMAIN, WK_WEB_CONTENT_PROCESS_TERMINATED) => {
                EvalErrorKind::ContentProcessTerminated
            }
            (WK_ERROR_DOMAIN, WK_WEB_VIEW_INVALIDATED) => EvalErrorKind::WebViewInvalidated,
            _ => EvalErrorKind::Script,
        };
        Self::new(kind, message)
    }

    /// Whether the render process is gone and the surface needs a restart.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            EvalErrorKind::ContentProcessTerminated | EvalErrorKind::WebViewInvalidated
        )
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => f.write_str(message),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

impl std::error::Error for EvalError {}
