use std::ops::ControlFlow;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::warn;

use cquizy_core::model::{CheatEvent, QuizId};

use super::QuizAdminService;
use crate::quiz_player::RepeatingTask;

pub const EVENT_POLL_PERIOD: Duration = Duration::from_secs(3);

/// One refresh of the event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSnapshot {
    pub events: Vec<CheatEvent>,
    pub active_count: usize,
}

impl EventSnapshot {
    #[must_use]
    pub fn new(events: Vec<CheatEvent>) -> Self {
        let active_count = events.iter().filter(|event| event.is_active()).count();
        Self {
            events,
            active_count,
        }
    }
}

/// Periodically refreshed event log. Stops when dropped or when the
/// receiving side goes away.
pub struct EventMonitor {
    task: RepeatingTask,
    snapshots: mpsc::UnboundedReceiver<EventSnapshot>,
}

impl EventMonitor {
    pub(super) fn start(service: QuizAdminService, quiz_id: QuizId) -> Self {
        let (tx, snapshots) = mpsc::unbounded_channel();
        let task = RepeatingTask::new();
        task.start_now(EVENT_POLL_PERIOD, move || {
            let service = service.clone();
            let tx = tx.clone();
            async move {
                if tx.is_closed() {
                    return ControlFlow::Break(());
                }
                match service.list_events(quiz_id).await {
                    Ok(events) => {
                        if tx.send(EventSnapshot::new(events)).is_err() {
                            return ControlFlow::Break(());
                        }
                    }
                    Err(err) => warn!(%quiz_id, error = %err, "event refresh failed"),
                }
                ControlFlow::Continue(())
            }
        });
        Self { task, snapshots }
    }

    /// Wait for the next snapshot. `None` once the monitor stopped.
    pub async fn next(&mut self) -> Option<EventSnapshot> {
        self.snapshots.recv().await
    }

    pub fn stop(&self) {
        self.task.stop();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.is_running()
    }
}
