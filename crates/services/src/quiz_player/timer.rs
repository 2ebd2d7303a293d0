use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::info;

use cquizy_core::countdown::CountdownDisplay;

use super::{PlayerEvent, PlayerInner, QuizPlayer, TICK_PERIOD, TIME_UP_NOTICE};

/// Stand-in deadline for quizzes ending too far out to represent.
const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

/// Arm the countdown. Remaining time is measured on the monotonic clock from
/// this moment, so every tick reports strictly less time than the last.
pub(super) fn start_timer(inner: &Arc<PlayerInner>) {
    let remaining = inner
        .clock
        .until(inner.quiz.date_end)
        .to_std()
        .unwrap_or(Duration::ZERO);
    let now = Instant::now();
    let deadline = now
        .checked_add(remaining)
        .unwrap_or_else(|| now + FAR_FUTURE);

    let weak = Arc::downgrade(inner);
    inner.timer.start(TICK_PERIOD, move || {
        let weak = weak.clone();
        async move {
            let Some(inner) = weak.upgrade() else {
                return ControlFlow::Break(());
            };
            let left = deadline.saturating_duration_since(Instant::now());
            let display = CountdownDisplay::from_remaining(
                chrono::Duration::from_std(left).unwrap_or(chrono::Duration::MAX),
            );
            let time_up = display.is_time_up();
            inner.emit(PlayerEvent::Countdown(display));
            if !time_up {
                return ControlFlow::Continue(());
            }

            if inner.is_active() {
                info!(quiz_id = %inner.quiz.id, "time is up, forcing submission");
                inner.emit(PlayerEvent::Notice(TIME_UP_NOTICE.to_string()));
                QuizPlayer { inner }.force_submit();
            }
            ControlFlow::Break(())
        }
    });
}
