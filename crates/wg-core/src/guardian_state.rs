use chrono::{DateTime, Utc};
use serde::Serialize;

/// Snapshot of the monitor, assembled fresh for every response and event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardianState {
    pub monitoring: bool,
    pub reason: String,
    #[serde(serialize_with = "crate::timestamp::serialize")]
    pub timestamp: DateTime<Utc>,
    #[serde(
        serialize_with = "crate::timestamp::serialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_healthy_at: Option<DateTime<Utc>>,
    #[serde(
        serialize_with = "crate::timestamp::serialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_restart_at: Option<DateTime<Utc>>,
    #[serde(
        serialize_with = "crate::timestamp::serialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_crash_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_restart_reason: Option<String>,
    /// Only present on crash/restart events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
