use std::sync::Arc;
use std::sync::atomic::Ordering;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use cquizy_core::model::{EventReport, LockReason};

use super::{PlayerEvent, QuizPlayer, poller};

/// A browser-side signal that the student left the quiz window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusSignal {
    VisibilityHidden,
    WindowBlur,
}

impl FocusSignal {
    #[must_use]
    pub fn reason(self) -> LockReason {
        match self {
            Self::VisibilityHidden => LockReason::VisibilityHidden,
            Self::WindowBlur => LockReason::FocusLost,
        }
    }

    /// Decode the tag posted by the focus watcher script.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "visibility" => Some(Self::VisibilityHidden),
            "blur" => Some(Self::WindowBlur),
            _ => None,
        }
    }
}

/// Keeps the watchdog alive. Dropping it stops listening.
#[derive(Debug)]
pub struct FocusSubscription {
    handle: Option<JoinHandle<()>>,
}

impl FocusSubscription {
    pub fn unsubscribe(mut self) {
        self.abort();
    }

    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn abort(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for FocusSubscription {
    fn drop(&mut self) {
        self.abort();
    }
}

impl QuizPlayer {
    /// Feed focus signals into the lockout logic.
    ///
    /// Returns `None` when the quiz has anti-cheat disabled; the signals are
    /// then never consumed.
    #[must_use]
    pub fn watch_focus(
        &self,
        mut signals: mpsc::UnboundedReceiver<FocusSignal>,
    ) -> Option<FocusSubscription> {
        if !self.inner.quiz.anticheat_enabled {
            return None;
        }
        let weak = Arc::downgrade(&self.inner);
        let handle = tokio::spawn(async move {
            while let Some(signal) = signals.recv().await {
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                if !inner.is_active() {
                    break;
                }
                QuizPlayer { inner }.focus_lost(signal.reason());
            }
        });
        Some(FocusSubscription {
            handle: Some(handle),
        })
    }

    /// Lock the quiz because the window was left.
    ///
    /// Returns `false` when nothing happened: anti-cheat is off, the quiz is no
    /// longer active, or it is already locked.
    pub fn focus_lost(&self, reason: LockReason) -> bool {
        let inner = &self.inner;
        if !inner.quiz.anticheat_enabled || !inner.is_active() {
            return false;
        }
        if inner
            .locked
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!(quiz_id = %inner.quiz.id, ?reason, "already locked");
            return false;
        }

        warn!(quiz_id = %inner.quiz.id, reason = reason.describe(), "quiz window left, locking");
        inner.emit(PlayerEvent::LockShown);

        let report = EventReport::tab_switch(inner.quiz.id, reason);
        let api = Arc::clone(&inner.api);
        let weak = Arc::downgrade(inner);
        tokio::spawn(async move {
            if let Err(err) = api.report_event(&report).await {
                warn!(error = %err, "failed to report cheat event");
            }
            if let Some(inner) = weak.upgrade() {
                poller::start_unlock_polling(&inner);
            }
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_names_map_to_reasons() {
        assert_eq!(
            FocusSignal::from_name("visibility").map(FocusSignal::reason),
            Some(LockReason::VisibilityHidden)
        );
        assert_eq!(
            FocusSignal::from_name(" blur ").map(FocusSignal::reason),
            Some(LockReason::FocusLost)
        );
        assert_eq!(FocusSignal::from_name("resize"), None);
    }
}
