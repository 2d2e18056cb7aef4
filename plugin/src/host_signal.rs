//! Mapping from Tauri run and window events to guardian actions.

use wg_core::{AppTransition, GuardianEventKind};

use tauri::{RunEvent, WindowEvent};

/// What the plugin does in response to a host event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HostSignal {
    /// Windows from the app config exist; attach the monitored one
    Attach,
    Transition(AppTransition),
    /// The monitored window is gone
    Detach,
    Shutdown,
}

/// Signals for app-wide events. Window events go through [`window_signal`].
pub(crate) fn run_signal(event: &RunEvent) -> Option<HostSignal> {
    match event {
        RunEvent::Ready => Some(HostSignal::Attach),
        RunEvent::Resumed => Some(HostSignal::Transition(AppTransition::Foreground)),
        RunEvent::Exit => Some(HostSignal::Shutdown),
        _ => None,
    }
}

/// Signals for events on the monitored window.
pub(crate) fn window_signal(event: &WindowEvent) -> Option<HostSignal> {
    match event {
        WindowEvent::Focused(true) => Some(HostSignal::Transition(AppTransition::Foreground)),
        WindowEvent::Focused(false) => Some(HostSignal::Transition(AppTransition::Background)),
        WindowEvent::Destroyed => Some(HostSignal::Detach),
        _ => None,
    }
}

/// Frontend event channel for a guardian event, e.g. `webview-guardian://webviewCrashed`.
pub(crate) fn event_channel(kind: GuardianEventKind) -> String {
    format!("{}://{}", crate::PLUGIN_NAME, kind.name())
}
