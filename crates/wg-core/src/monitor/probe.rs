use crate::{DEFAULT_CRASH_MESSAGE, EvalError, RenderSurface};

use std::sync::Arc;
use std::time::Duration;

/// Classification of one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Script evaluated without error
    Healthy,
    /// Evaluation failed but the renderer is alive; carries the error text
    Failed(String),
    /// Render process terminated or surface invalidated; carries the crash message
    Crashed(String),
}

impl ProbeOutcome {
    pub fn classify(outcome: Result<(), EvalError>) -> Self {
        match outcome {
            Ok(()) => ProbeOutcome::Healthy,
            Err(e) if e.is_terminal() => ProbeOutcome::Crashed(
                e.message
                    .unwrap_or_else(|| DEFAULT_CRASH_MESSAGE.to_string()),
            ),
            Err(e) => ProbeOutcome::Failed(e.to_string()),
        }
    }
}

/// Evaluate the probe script, bounded by `timeout` when set.
///
/// The surface decides how an expired timeout is classified.
pub(super) async fn evaluate(
    surface: Arc<dyn RenderSurface>,
    script: String,
    timeout: Option<Duration>,
) -> Result<(), EvalError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, surface.evaluate_script(&script))
            .await
            .unwrap_or_else(|_| Err(surface.timeout_error(limit.as_millis() as u64))),
        None => surface.evaluate_script(&script).await,
    }
}
