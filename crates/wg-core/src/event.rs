use crate::GuardianState;

use serde::Serialize;

/// Named events delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GuardianEventKind {
    /// App returned to the foreground while monitoring
    Foreground,
    WebviewHealthy,
    WebviewCrashed,
    WebviewRestarted,
}

impl GuardianEventKind {
    pub const ALL: [GuardianEventKind; 4] = [
        GuardianEventKind::Foreground,
        GuardianEventKind::WebviewHealthy,
        GuardianEventKind::WebviewCrashed,
        GuardianEventKind::WebviewRestarted,
    ];

    /// Listener name exposed to the embedding application.
    pub fn name(&self) -> &'static str {
        match self {
            GuardianEventKind::Foreground => "foreground",
            GuardianEventKind::WebviewHealthy => "webviewHealthy",
            GuardianEventKind::WebviewCrashed => "webviewCrashed",
            GuardianEventKind::WebviewRestarted => "webviewRestarted",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GuardianEvent {
    pub kind: GuardianEventKind,
    pub state: GuardianState,
}

impl GuardianEvent {
    pub fn new(kind: GuardianEventKind, state: GuardianState) -> Self {
        Self { kind, state }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}
