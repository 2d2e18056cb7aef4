use crate::monitor::MonitorCommand;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{trace, warn};

/// App visibility transition reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppTransition {
    Foreground,
    Background,
}

/// Publisher the host drives with app lifecycle transitions.
///
/// Monitors register their command queue when they are spawned. A transition
/// is queued on every live monitor before [`notify`](Self::notify) returns,
/// so commands sent afterwards are handled after it. The notifier only holds
/// weak senders; torn-down monitors are pruned on the next call.
#[derive(Clone, Default)]
pub struct LifecycleNotifier {
    monitors: Arc<Mutex<Vec<mpsc::WeakSender<MonitorCommand>>>>,
}

impl LifecycleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&self, command_tx: mpsc::WeakSender<MonitorCommand>) {
        self.monitors().push(command_tx);
    }

    /// Queue a transition on every live monitor; returns how many accepted it.
    ///
    /// Never blocks. A monitor whose queue is full drops the transition.
    pub fn notify(&self, transition: AppTransition) -> usize {
        trace!(?transition, "app lifecycle transition");

        let mut delivered = 0;
        self.monitors().retain(|monitor| {
            let Some(tx) = monitor.upgrade() else {
                return false;
            };
            match tx.try_send(MonitorCommand::Lifecycle(transition)) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(TrySendError::Full(_)) => {
                    warn!(?transition, "monitor command queue full, transition dropped");
                    true
                }
                Err(TrySendError::Closed(_)) => false,
            }
        });
        delivered
    }

    pub fn foreground(&self) -> usize {
        self.notify(AppTransition::Foreground)
    }

    pub fn background(&self) -> usize {
        self.notify(AppTransition::Background)
    }

    /// Monitors that are still running
    pub fn monitor_count(&self) -> usize {
        let mut monitors = self.monitors();
        monitors.retain(|monitor| monitor.upgrade().is_some_and(|tx| !tx.is_closed()));
        monitors.len()
    }

    fn monitors(&self) -> MutexGuard<'_, Vec<mpsc::WeakSender<MonitorCommand>>> {
        self.monitors.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
