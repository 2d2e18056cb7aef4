use crate::ping_ack::{self, PingAcks};
use wg_core::{EvalError, RenderSurface, SurfaceError, SurfaceResult};

use std::sync::Arc;

use async_trait::async_trait;
use tauri::{Runtime, WebviewWindow};
use url::Url;

/// [`RenderSurface`] over a Tauri webview window.
///
/// Each ping script is wrapped to answer through the `ping_ack` command, so
/// a probe succeeds only when the page actually ran it. A page that stays
/// silent past the probe timeout, or a missing window, counts as invalidated.
pub struct TauriSurface<R: Runtime> {
    window: WebviewWindow<R>,
    acks: Arc<PingAcks>,
}

impl<R: Runtime> TauriSurface<R> {
    pub fn new(window: WebviewWindow<R>, acks: Arc<PingAcks>) -> Self {
        Self { window, acks }
    }

    pub fn label(&self) -> &str {
        self.window.label()
    }
}

#[async_trait]
impl<R: Runtime> RenderSurface for TauriSurface<R> {
    async fn evaluate_script(&self, script: &str) -> Result<(), EvalError> {
        let pending = self.acks.register();
        let wrapped = ping_ack::wrap_script(script, pending.nonce);
        self.window
            .eval(&wrapped)
            .map_err(|e| classify_eval_error(&e))?;
        pending.wait().await
    }

    fn reload(&self) -> SurfaceResult<()> {
        self.window
            .reload()
            .map_err(|e| SurfaceError::new("reload", e.to_string()))
    }

    fn load_url(&self, url: &Url) -> SurfaceResult<()> {
        let mut window = self.window.clone();
        window
            .navigate(url.clone())
            .map_err(|e| SurfaceError::new("navigate", e.to_string()))
    }

    fn timeout_error(&self, after_ms: u64) -> EvalError {
        ping_ack::unanswered(after_ms)
    }
}

/// Missing window or webview is terminal; every other failure is a script error.
pub(crate) fn classify_eval_error(error: &tauri::Error) -> EvalError {
    match error {
        tauri::Error::WebviewNotFound | tauri::Error::WindowNotFound => {
            EvalError::new(wg_core::EvalErrorKind::WebViewInvalidated, Some(error.to_string()))
        }
        other => EvalError::script(other.to_string()),
    }
}
