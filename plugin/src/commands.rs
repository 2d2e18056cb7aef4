//! Tauri IPC commands for the guest frontend.
//!
//! Invoked as `plugin:webview-guardian|<command>`. Failures reach the frontend
//! as plain rejection strings.

use crate::ping_ack::{PingAcks, ack_result};
use wg_core::{CheckResult, GuardianError, GuardianHandle, GuardianState, StartMonitoringOptions};

use std::sync::Arc;

use tauri::State;

#[tauri::command]
pub(crate) async fn start_monitoring(
    guardian: State<'_, GuardianHandle>,
    options: Option<StartMonitoringOptions>,
) -> Result<GuardianState, String> {
    guardian
        .start_monitoring(options.unwrap_or_default())
        .await
        .map_err(rejection)
}

#[tauri::command]
pub(crate) async fn stop_monitoring(
    guardian: State<'_, GuardianHandle>,
) -> Result<GuardianState, String> {
    guardian.stop_monitoring().await.map_err(rejection)
}

#[tauri::command]
pub(crate) async fn get_state(guardian: State<'_, GuardianHandle>) -> Result<GuardianState, String> {
    guardian.get_state().await.map_err(rejection)
}

/// Resolves with `healthy: false` on a crash; rejects only when no probe result exists.
#[tauri::command]
pub(crate) async fn check_now(
    guardian: State<'_, GuardianHandle>,
    reason: Option<String>,
) -> Result<CheckResult, String> {
    guardian.check_now(reason).await.map_err(rejection)
}

/// Answer from a wrapped ping script running in the monitored page.
#[tauri::command]
pub(crate) fn ping_ack(
    acks: State<'_, Arc<PingAcks>>,
    nonce: u64,
    ok: bool,
    error: Option<String>,
) {
    if !acks.resolve(nonce, ack_result(ok, error)) {
        tracing::debug!(nonce, "ignoring late ping answer");
    }
}

pub(crate) fn rejection(error: GuardianError) -> String {
    tracing::debug!(hint = error.recovery_hint(), "command rejected: {error}");
    error.caller_message()
}
