use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of one manual health probe, returned only to its caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub healthy: bool,
    pub restarted: bool,
    pub reason: String,
    #[serde(serialize_with = "crate::timestamp::serialize")]
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub pending_restart: bool,
}

impl CheckResult {
    pub(crate) fn healthy(reason: &str) -> Self {
        Self::build(true, false, reason, None, false)
    }

    pub(crate) fn pending_restart(reason: &str, error: String) -> Self {
        Self::build(false, false, reason, Some(error), true)
    }

    pub(crate) fn restarted(reason: &str, error: String) -> Self {
        Self::build(false, true, reason, Some(error), false)
    }

    fn build(
        healthy: bool,
        restarted: bool,
        reason: &str,
        error: Option<String>,
        pending_restart: bool,
    ) -> Self {
        Self {
            healthy,
            restarted,
            reason: reason.to_string(),
            timestamp: Utc::now(),
            error,
            pending_restart,
        }
    }
}
