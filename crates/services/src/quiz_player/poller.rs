use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use tracing::{info, warn};

use super::{PlayerEvent, PlayerInner, UNLOCK_POLL_PERIOD, UNLOCKED_NOTICE};

/// Ask the server every few seconds whether the lock was lifted.
///
/// Replaces any poll loop already running. Does nothing unless the quiz is
/// active and locked.
pub(super) fn start_unlock_polling(inner: &Arc<PlayerInner>) {
    if !inner.is_active() || !inner.is_locked() {
        return;
    }
    let quiz_id = inner.quiz.id;
    let weak = Arc::downgrade(inner);
    inner.poller.start(UNLOCK_POLL_PERIOD, move || {
        let weak = weak.clone();
        async move {
            let Some(inner) = weak.upgrade() else {
                return ControlFlow::Break(());
            };
            if !inner.is_active() || !inner.is_locked() {
                return ControlFlow::Break(());
            }
            match inner.api.lock_status(quiz_id).await {
                Ok(status) if status.is_locked => {
                    inner.emit(PlayerEvent::LockMessage(
                        status.display_message().to_string(),
                    ));
                    ControlFlow::Continue(())
                }
                Ok(_) => {
                    inner.locked.store(false, Ordering::SeqCst);
                    info!(%quiz_id, "quiz unlocked by teacher");
                    inner.emit(PlayerEvent::LockHidden);
                    inner.emit(PlayerEvent::Notice(UNLOCKED_NOTICE.to_string()));
                    ControlFlow::Break(())
                }
                Err(err) => {
                    warn!(%quiz_id, error = %err, "lock status poll failed");
                    ControlFlow::Continue(())
                }
            }
        }
    });
}
