//! Round trip for ping scripts run through `WebviewWindow::eval`.
//!
//! `eval` only reports whether a script was dispatched. The ping script is
//! wrapped so the page answers through the `ping_ack` command with the nonce
//! it was sent; a page that never answers has lost its renderer.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;
use wg_core::{EvalError, EvalErrorKind};

pub(crate) const ACK_COMMAND: &str = "ping_ack";

pub(crate) type AckResult = Result<(), String>;

/// Outstanding ping scripts keyed by nonce.
#[derive(Default)]
pub struct PingAcks {
    next_nonce: AtomicU64,
    waiting: Mutex<HashMap<u64, oneshot::Sender<AckResult>>>,
}

impl PingAcks {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn register(self: &Arc<Self>) -> PendingAck {
        let nonce = self.next_nonce.fetch_add(1, Ordering::Relaxed) + 1;
        let (ack_tx, ack_rx) = oneshot::channel();
        self.waiting().insert(nonce, ack_tx);
        PendingAck {
            nonce,
            ack_rx,
            acks: Arc::clone(self),
        }
    }

    /// Deliver the page's answer; `false` when nobody waits for `nonce` anymore.
    pub(crate) fn resolve(&self, nonce: u64, result: AckResult) -> bool {
        match self.waiting().remove(&nonce) {
            Some(ack_tx) => ack_tx.send(result).is_ok(),
            None => false,
        }
    }

    pub(crate) fn outstanding(&self) -> usize {
        self.waiting().len()
    }

    fn waiting(&self) -> MutexGuard<'_, HashMap<u64, oneshot::Sender<AckResult>>> {
        self.waiting.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One ping awaiting its answer. Dropping it forgets the nonce.
pub(crate) struct PendingAck {
    pub(crate) nonce: u64,
    ack_rx: oneshot::Receiver<AckResult>,
    acks: Arc<PingAcks>,
}

impl PendingAck {
    pub(crate) async fn wait(mut self) -> Result<(), EvalError> {
        match (&mut self.ack_rx).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(message)) => Err(EvalError::script(message)),
            Err(_) => Err(EvalError::invalidated()),
        }
    }
}

impl Drop for PendingAck {
    fn drop(&mut self) {
        self.acks.waiting().remove(&self.nonce);
    }
}

/// Map the arguments of a `ping_ack` call onto an answer.
pub(crate) fn ack_result(ok: bool, error: Option<String>) -> AckResult {
    if ok {
        return Ok(());
    }
    Err(error.unwrap_or_else(|| "ping script failed".to_string()))
}

/// Wrap `script` so the page reports its outcome under `nonce`.
///
/// The script runs through indirect `eval`, so expressions and statements both
/// work and a returned promise is awaited.
pub(crate) fn wrap_script(script: &str, nonce: u64) -> String {
    let source = serde_json::Value::String(script.to_string());
    format!(
        "(async () => {{ let ok = true; let error = null; \
         try {{ await (0, eval)({source}); }} \
         catch (e) {{ ok = false; error = String((e && e.message) || e); }} \
         await window.__TAURI_INTERNALS__.invoke('plugin:{plugin}|{command}', {{ nonce: {nonce}, ok, error }}); \
         }})();",
        plugin = crate::PLUGIN_NAME,
        command = ACK_COMMAND,
    )
}

/// Classification of a ping the page never answered.
pub(crate) fn unanswered(after_ms: u64) -> EvalError {
    EvalError::new(
        EvalErrorKind::WebViewInvalidated,
        Some(format!("webview did not answer within {after_ms}ms")),
    )
}
